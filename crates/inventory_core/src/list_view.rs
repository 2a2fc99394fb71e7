use std::cmp::Ordering;
use std::fmt;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::Item;

/// Number of item cards per page.
pub const PAGE_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    AToZ,
    PriceDesc,
    PriceAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::AToZ, SortKey::PriceDesc, SortKey::PriceAsc];

    /// Stable identifier used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::AToZ => "a-z",
            SortKey::PriceDesc => "price-desc",
            SortKey::PriceAsc => "price-asc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::AToZ => "A-Z",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::PriceAsc => "Price: Low to High",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(raw))
    }

    fn compare(self, a: &Item, b: &Item) -> Ordering {
        match self {
            SortKey::AToZ => compare_names(&a.name, &b.name),
            SortKey::PriceDesc => b.price_or_zero().total_cmp(&a.price_or_zero()),
            SortKey::PriceAsc => a.price_or_zero().total_cmp(&b.price_or_zero()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Search, sort and page parameters plus the raw item set they apply to.
///
/// The value is never mutated in place by callers; the `with_*` builders
/// produce the next state and reset or clamp the page as needed.
#[derive(Debug, Clone, PartialEq)]
pub struct ListViewState {
    pub raw_items: Vec<Item>,
    pub search_term: String,
    pub sort_key: SortKey,
    pub page: usize,
}

impl Default for ListViewState {
    fn default() -> Self {
        Self {
            raw_items: Vec::new(),
            search_term: String::new(),
            sort_key: SortKey::default(),
            page: 1,
        }
    }
}

impl ListViewState {
    /// Replaces the raw items wholesale and starts over at page 1.
    pub fn with_items(self, raw_items: Vec<Item>) -> Self {
        Self {
            raw_items,
            page: 1,
            ..self
        }
    }

    pub fn with_search_term(self, search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            page: 1,
            ..self
        }
    }

    pub fn with_sort_key(self, sort_key: SortKey) -> Self {
        Self {
            sort_key,
            page: 1,
            ..self
        }
    }

    /// Moves to `page`, clamped to the pages currently available.
    pub fn with_page(self, page: usize) -> Self {
        let last = total_pages(self.matching_count()).max(1);
        Self {
            page: page.clamp(1, last),
            ..self
        }
    }

    fn matching_count(&self) -> usize {
        let needle = self.search_term.to_lowercase();
        self.raw_items
            .iter()
            .filter(|item| matches_search(item, &needle))
            .count()
    }
}

/// The page of items to display.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView {
    pub visible_items: Vec<Item>,
    pub matching_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
}

impl DerivedView {
    pub fn shows_pagination(&self) -> bool {
        self.total_pages > 1
    }
}

/// Filters, sorts and slices the raw items. Does not clamp `page`; a page
/// past the end yields no visible items.
pub fn derive_view(state: &ListViewState) -> DerivedView {
    let needle = state.search_term.to_lowercase();
    let mut sorted: Vec<&Item> = state
        .raw_items
        .iter()
        .filter(|item| matches_search(item, &needle))
        .collect();
    // `sort_by` is stable: equal keys keep their fetched order.
    sorted.sort_by(|a, b| state.sort_key.compare(a, b));

    let start = state.page.saturating_sub(1).saturating_mul(PAGE_SIZE);
    let visible_items = sorted
        .iter()
        .skip(start)
        .take(PAGE_SIZE)
        .map(|item| (*item).clone())
        .collect();

    DerivedView {
        visible_items,
        matching_items: sorted.len(),
        total_pages: total_pages(sorted.len()),
        current_page: state.page,
    }
}

fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

fn matches_search(item: &Item, lowercase_needle: &str) -> bool {
    item.name.to_lowercase().contains(lowercase_needle)
}

/// Locale-style name order. Base letters decide first, ignoring accents and
/// case; then an unaccented letter precedes its accented forms; then
/// lowercase precedes uppercase.
fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| b.cmp(a))
}

fn base_letters(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn folded(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd().flat_map(char::to_lowercase)
}
