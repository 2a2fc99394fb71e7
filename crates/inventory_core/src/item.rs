use serde::{Deserialize, Deserializer, Serialize};

/// Backend-assigned item identifier.
pub type ItemId = i64;

/// An inventory record as returned by the backend.
///
/// Description and price are read leniently: a `null` description becomes
/// empty, and a price that is missing, `null` or not numeric is stored as
/// `None` so the list can still display and sort the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<f64>,
}

impl Item {
    /// Price used for ordering; absent prices sort as zero.
    pub fn price_or_zero(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    /// Price formatted to two decimals, or "N/A".
    pub fn display_price(&self) -> String {
        match self.price {
            Some(price) => format!("{price:.2}"),
            None => "N/A".to_string(),
        }
    }
}

/// A validated item payload, ready to be sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedItem {
    pub name: String,
    /// Always serialized, empty included.
    pub description: String,
    pub price: f64,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WirePrice {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let price = Option::<WirePrice>::deserialize(deserializer)?.and_then(|raw| match raw {
        WirePrice::Number(value) => Some(value),
        WirePrice::Text(text) => text.trim().parse::<f64>().ok(),
        WirePrice::Other(_) => None,
    });
    Ok(price.filter(|value| value.is_finite()))
}
