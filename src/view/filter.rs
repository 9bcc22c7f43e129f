use std::collections::HashSet;

use serde::Serialize;

use super::sort::locale_cmp;
use crate::model::Hotel;

pub const ALL_CATEGORIES: &str = "all";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case(ALL_CATEGORIES) {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(label) => label.as_str(),
        }
    }

    fn admits(&self, hotel: &Hotel) -> bool {
        match self {
            Self::All => true,
            Self::Only(label) => hotel.star_segment.as_deref() == Some(label.as_str()),
        }
    }
}

fn matches_search(hotel: &Hotel, needle: &str) -> bool {
    needle.is_empty()
        || hotel.hotel_name.to_lowercase().contains(needle)
        || hotel.full_address.to_lowercase().contains(needle)
}

/// Records whose name or address contains `search` (case-insensitive) and
/// whose category passes `category`. Input order is preserved.
pub fn filter_hotels<'a>(
    hotels: &'a [Hotel],
    search: &str,
    category: &CategoryFilter,
) -> Vec<&'a Hotel> {
    let needle = search.to_lowercase();
    hotels
        .iter()
        .filter(|h| matches_search(h, &needle) && category.admits(h))
        .collect()
}

/// Values offered by the category selector: the sentinel first, then every
/// distinct non-empty label in locale order.
pub fn category_options(hotels: &[Hotel]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut labels: Vec<String> = hotels
        .iter()
        .filter_map(|h| h.category())
        .filter(|label| seen.insert(*label))
        .map(|label| label.to_string())
        .collect();
    labels.sort_by(|a, b| locale_cmp(a, b));

    let mut out = Vec::with_capacity(labels.len() + 1);
    out.push(ALL_CATEGORIES.to_string());
    out.extend(labels);
    out
}
