use std::cmp::Ordering;

use serde::Serialize;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::model::Hotel;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    Rating,
    Reviews,
    Category,
}

impl SortKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "name" | "hotel_name" => Some(Self::Name),
            "rating" | "google_rating" => Some(Self::Rating),
            "reviews" | "rating-count" | "rating_count" | "user_ratings_total" => {
                Some(Self::Reviews)
            }
            "category" | "segment" | "star_segment" => Some(Self::Category),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Rating => "rating",
            Self::Reviews => "reviews",
            Self::Category => "category",
        }
    }

    /// Compares two records on this key. Records missing the key always land
    /// after records that have it, whatever the direction.
    pub fn compare(self, a: &Hotel, b: &Hotel, direction: SortDirection) -> Ordering {
        match self {
            Self::Name => absent_last(
                Some(a.hotel_name.as_str()),
                Some(b.hotel_name.as_str()),
                direction,
                |x, y| locale_cmp(x, y),
            ),
            Self::Rating => absent_last(a.google_rating, b.google_rating, direction, |x, y| {
                x.total_cmp(y)
            }),
            Self::Reviews => absent_last(
                a.user_ratings_total,
                b.user_ratings_total,
                direction,
                |x, y| x.cmp(y),
            ),
            // An empty label counts as absent here, so it sorts last in both
            // directions instead of first when ascending.
            Self::Category => absent_last(a.category(), b.category(), direction, |x, y| {
                locale_cmp(x, y)
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

fn absent_last<T>(
    a: Option<T>,
    b: Option<T>,
    direction: SortDirection,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => direction.apply(cmp(&a, &b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort; records with equal keys keep their input order.
pub fn sort_hotels(hotels: &mut [&Hotel], key: SortKey, direction: SortDirection) {
    hotels.sort_by(|a, b| key.compare(a, b, direction));
}

fn primary_key(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn secondary_key(value: &str) -> String {
    value.nfd().flat_map(char::to_lowercase).collect()
}

// Lowercase ranks ahead of uppercase on the case level.
fn tertiary_cmp(a: &str, b: &str) -> Ordering {
    let case = |c: char| (c.is_uppercase(), c.to_lowercase().next().unwrap_or(c));
    a.nfd().map(case).cmp(b.nfd().map(case))
}

/// Collation-style string ordering: base letters first, then accents, then
/// case, then raw code points so the result is total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary_cmp(a, b))
        .then_with(|| a.cmp(b))
}
