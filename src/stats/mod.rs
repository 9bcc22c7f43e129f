//! Collection-wide statistics and chart series.
//!
//! These are computed over the full collection and ignore the table's
//! search and category filter.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::Hotel;

pub const UNKNOWN_CATEGORY: &str = "Unknown";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RatingBand {
    #[serde(rename = "4.5-5.0")]
    Excellent,
    #[serde(rename = "4.0-4.5")]
    VeryGood,
    #[serde(rename = "3.5-4.0")]
    Good,
    #[serde(rename = "3.0-3.5")]
    Fair,
    #[serde(rename = "<3.0")]
    Poor,
}

impl RatingBand {
    pub const ALL: [RatingBand; 5] = [
        RatingBand::Excellent,
        RatingBand::VeryGood,
        RatingBand::Good,
        RatingBand::Fair,
        RatingBand::Poor,
    ];

    pub fn of(rating: f64) -> Self {
        if rating >= 4.5 {
            Self::Excellent
        } else if rating >= 4.0 {
            Self::VeryGood
        } else if rating >= 3.5 {
            Self::Good
        } else if rating >= 3.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "4.5-5.0",
            Self::VeryGood => "4.0-4.5",
            Self::Good => "3.5-4.0",
            Self::Fair => "3.0-3.5",
            Self::Poor => "<3.0",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BandCount {
    pub band: RatingBand,
    pub count: usize,
}

/// Rated records per band, top band first. Unrated records are not counted.
pub fn rating_distribution(hotels: &[Hotel]) -> Vec<BandCount> {
    let mut counts = [0usize; 5];
    for rating in hotels.iter().filter_map(|h| h.google_rating) {
        let band = RatingBand::of(rating);
        if let Some(slot) = RatingBand::ALL.iter().position(|b| *b == band) {
            counts[slot] += 1;
        }
    }
    RatingBand::ALL
        .iter()
        .zip(counts)
        .map(|(band, count)| BandCount { band: *band, count })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
    /// Share of the whole collection, rounded to a whole percent.
    pub percent: u32,
}

/// Record count per category label in order of first appearance. Records
/// without a label are counted under [`UNKNOWN_CATEGORY`].
pub fn category_distribution(hotels: &[Hotel]) -> Vec<CategoryCount> {
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for hotel in hotels {
        let label = hotel.category().unwrap_or(UNKNOWN_CATEGORY);
        match index.get(label) {
            Some(&slot) => order[slot].1 += 1,
            None => {
                index.insert(label.to_string(), order.len());
                order.push((label.to_string(), 1));
            }
        }
    }
    let total = hotels.len();
    order
        .into_iter()
        .map(|(label, count)| CategoryCount {
            label,
            count,
            percent: percent_of(count, total).unwrap_or(0),
        })
        .collect()
}

fn percent_of(part: usize, total: usize) -> Option<u32> {
    if total == 0 {
        return None;
    }
    Some((part as f64 / total as f64 * 100.0).round() as u32)
}

/// Label contains a '5' or a '7' ("5-star", "7 Star Luxury"). This is a
/// substring test, so "15-room boutique" also counts.
pub fn is_premium(hotel: &Hotel) -> bool {
    hotel
        .category()
        .map(|label| label.contains('5') || label.contains('7'))
        .unwrap_or(false)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub rated: usize,
    /// `None` when no record carries a rating.
    pub average_rating: Option<f64>,
    pub with_phone: usize,
    pub with_email: usize,
    pub phone_coverage: Option<u32>,
    pub email_coverage: Option<u32>,
    pub total_reviews: u64,
    pub premium: usize,
}

pub fn summarize(hotels: &[Hotel]) -> Summary {
    let ratings: Vec<f64> = hotels.iter().filter_map(|h| h.google_rating).collect();
    let average_rating = if ratings.is_empty() {
        None
    } else {
        Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
    };
    let with_phone = hotels.iter().filter(|h| h.has_phone()).count();
    let with_email = hotels.iter().filter(|h| h.has_email()).count();
    Summary {
        total: hotels.len(),
        rated: ratings.len(),
        average_rating,
        with_phone,
        with_email,
        phone_coverage: percent_of(with_phone, hotels.len()),
        email_coverage: percent_of(with_email, hotels.len()),
        total_reviews: hotels.iter().filter_map(|h| h.user_ratings_total).sum(),
        premium: hotels.iter().filter(|h| is_premium(h)).count(),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Statistics {
    pub summary: Summary,
    pub ratings: Vec<BandCount>,
    pub categories: Vec<CategoryCount>,
}

impl Statistics {
    pub fn compute(hotels: &[Hotel]) -> Self {
        Self {
            summary: summarize(hotels),
            ratings: rating_distribution(hotels),
            categories: category_distribution(hotels),
        }
    }
}
