//! Field rules for the item form.
//!
//! Every field is checked independently, so a single call can report errors
//! on `name`, `description` and `price` at once. Within a field the first
//! violated rule wins.
use std::collections::BTreeMap;
use std::fmt;

use crate::NormalizedItem;

pub const NAME_MAX_CHARS: usize = 60;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;
pub const PRICE_MAX: f64 = 100_000.0;

/// Raw text as typed into the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawFormInput {
    pub name: String,
    pub description: String,
    pub price: String,
}

impl RawFormInput {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Description => &self.description,
            Field::Price => &self.price,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Description => self.description = value,
            Field::Price => self.price = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Description,
    Price,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Description, Field::Price];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Description => "description",
            Field::Price => "price",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    TooLong,
    NotANumber,
    NotPositive,
    TooLarge,
}

/// A single violated rule together with the message shown next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub rule: Rule,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: Field, rule: Rule) -> Self {
        let message = match (field, rule) {
            (Field::Name, Rule::Required) => "Item name is required",
            (Field::Name, _) => "Item name must be 60 characters or less",
            (Field::Description, _) => "Description must be 1000 characters or less",
            (Field::Price, Rule::NotPositive) => "Price must be a positive number",
            (Field::Price, Rule::TooLarge) => "Price cannot exceed 100,000",
            (Field::Price, _) => "Price must be a number",
        };
        Self { rule, message }
    }
}

/// Field errors keyed by field; at most one per field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    pub fn rule(&self, field: Field) -> Option<Rule> {
        self.get(field).map(|err| err.rule)
    }

    pub fn message(&self, field: Field) -> Option<&'static str> {
        self.get(field).map(|err| err.message)
    }

    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.0.iter().map(|(field, err)| (*field, err))
    }

    fn record(&mut self, field: Field, rule: Option<Rule>) {
        if let Some(rule) = rule {
            self.0.insert(field, FieldError::new(field, rule));
        }
    }
}

/// Checks raw form input and produces either a sendable payload or the set
/// of field errors.
pub fn validate(input: &RawFormInput) -> Result<NormalizedItem, FieldErrors> {
    let name = input.name.trim();
    let mut errors = FieldErrors::default();

    errors.record(Field::Name, check_name(name));
    errors.record(Field::Description, check_description(&input.description));
    let price = match coerce_price(&input.price) {
        Ok(price) => Some(price),
        Err(rule) => {
            errors.record(Field::Price, Some(rule));
            None
        }
    };

    match price {
        Some(price) if errors.is_empty() => Ok(NormalizedItem {
            name: name.to_string(),
            description: input.description.clone(),
            price,
        }),
        _ => Err(errors),
    }
}

fn check_name(name: &str) -> Option<Rule> {
    if name.is_empty() {
        Some(Rule::Required)
    } else if name.chars().count() > NAME_MAX_CHARS {
        Some(Rule::TooLong)
    } else {
        None
    }
}

fn check_description(description: &str) -> Option<Rule> {
    (description.chars().count() > DESCRIPTION_MAX_CHARS).then_some(Rule::TooLong)
}

/// Numeric coercion of the price text. Blank text coerces to zero, which
/// then fails the positivity rule rather than the number rule.
fn coerce_price(raw: &str) -> Result<f64, Rule> {
    let trimmed = raw.trim();
    let value = if trimmed.is_empty() {
        0.0
    } else {
        trimmed.parse::<f64>().map_err(|_| Rule::NotANumber)?
    };
    if value.is_nan() {
        Err(Rule::NotANumber)
    } else if value <= 0.0 {
        Err(Rule::NotPositive)
    } else if value > PRICE_MAX {
        Err(Rule::TooLarge)
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_price_counts_as_zero() {
        assert_eq!(coerce_price("   "), Err(Rule::NotPositive));
    }

    #[test]
    fn infinities_fall_on_range_rules() {
        assert_eq!(coerce_price("inf"), Err(Rule::TooLarge));
        assert_eq!(coerce_price("-inf"), Err(Rule::NotPositive));
        assert_eq!(coerce_price("NaN"), Err(Rule::NotANumber));
    }

    #[test]
    fn field_names_parse_case_insensitively() {
        assert_eq!(Field::parse(" Price "), Some(Field::Price));
        assert_eq!(Field::parse("colour"), None);
    }
}
