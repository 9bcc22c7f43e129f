pub mod report;

use colored::Colorize;
use itertools::Itertools;

use crate::model::Hotel;
use crate::session::DashboardSnapshot;
use crate::stats::Summary;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

/// Rendered in place of a value that cannot be computed, such as the
/// average rating of a collection with no ratings.
pub const UNDEFINED: &str = "NaN";
pub const NOT_AVAILABLE: &str = "N/A";

pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_average(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| UNDEFINED.to_string())
}

pub fn format_percent(value: Option<u32>) -> String {
    format!(
        "{}%",
        value
            .map(|v| v.to_string())
            .unwrap_or_else(|| UNDEFINED.to_string())
    )
}

pub fn format_rating(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.1}"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn format_reviews(value: Option<u64>) -> String {
    value
        .map(format_thousands)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn segment_label(hotel: &Hotel) -> &str {
    hotel.category().unwrap_or(NOT_AVAILABLE)
}

/// Stat cards as (title, value, caption), in display order.
pub fn stat_cards(summary: &Summary) -> Vec<(&'static str, String, String)> {
    vec![
        (
            "Total Hotels",
            summary.total.to_string(),
            "Hotel leads collected".to_string(),
        ),
        (
            "Average Rating",
            format_average(summary.average_rating),
            "Based on Google reviews".to_string(),
        ),
        (
            "Contact Coverage",
            format_percent(summary.phone_coverage),
            format!("{} hotels with phone", summary.with_phone),
        ),
        (
            "Email Coverage",
            format_percent(summary.email_coverage),
            format!("{} hotels with email", summary.with_email),
        ),
        (
            "Total Reviews",
            format_thousands(summary.total_reviews),
            "Combined user reviews".to_string(),
        ),
        (
            "Premium Hotels",
            summary.premium.to_string(),
            "5-star and 7-star properties".to_string(),
        ),
    ]
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    "█".repeat(count * width / max)
}

fn contact_line(hotel: &Hotel) -> String {
    [hotel.phone(), hotel.first_email(), hotel.website()]
        .into_iter()
        .flatten()
        .join(" | ")
}

const BAR_WIDTH: usize = 40;

pub fn render_text(snapshot: &DashboardSnapshot<'_>) -> Vec<u8> {
    let mut out = String::new();
    let summary = &snapshot.statistics.summary;

    out.push_str(&format!("{}\n", "Hotels Dashboard".bold().white()));
    out.push_str(&format!(
        "Comprehensive view of {} hotel leads\n\n",
        summary.total
    ));

    for (title, value, caption) in stat_cards(summary) {
        out.push_str(&format!(
            ":: {:<16}: {} {}\n",
            title,
            format!("{value:<8}").bold().cyan(),
            caption.dimmed()
        ));
    }
    out.push('\n');

    out.push_str(&format!("{}\n", "Rating Distribution".bold().white()));
    let max = snapshot
        .statistics
        .ratings
        .iter()
        .map(|b| b.count)
        .max()
        .unwrap_or(0);
    for band in &snapshot.statistics.ratings {
        out.push_str(&format!(
            "  {:<8} {} {}\n",
            band.band.label(),
            bar(band.count, max, BAR_WIDTH).blue(),
            band.count
        ));
    }
    out.push('\n');

    out.push_str(&format!("{}\n", "Star Segment Distribution".bold().white()));
    let max = snapshot
        .statistics
        .categories
        .iter()
        .map(|c| c.count)
        .max()
        .unwrap_or(0);
    for category in &snapshot.statistics.categories {
        out.push_str(&format!(
            "  {:<20} {} {} ({}%)\n",
            truncate(&category.label, 20),
            bar(category.count, max, BAR_WIDTH).green(),
            category.count,
            category.percent
        ));
    }
    out.push('\n');

    let view = snapshot.view;
    out.push_str(&format!(
        "{} search={:?} segment={} sort={} {}\n",
        "Hotels ::".bold().white(),
        view.search,
        view.category.label(),
        view.sort_key.label(),
        view.direction.label()
    ));
    out.push_str(&format!(
        "{:<36} {:<14} {:>6} {:>9}  {}\n",
        "NAME", "SEGMENT", "RATING", "REVIEWS", "CONTACT"
    ));
    for hotel in &snapshot.rows {
        out.push_str(&format!(
            "{} {:<14} {:>6} {:>9}  {}\n",
            format!("{:<36}", truncate(&hotel.hotel_name, 36)).bold(),
            truncate(segment_label(hotel), 14),
            format_rating(hotel.google_rating).yellow(),
            format_reviews(hotel.user_ratings_total),
            contact_line(hotel)
        ));
        out.push_str(&format!("  {}\n", truncate(&hotel.full_address, 80).dimmed()));
    }
    out.push('\n');
    out.push_str(&snapshot.summary);
    out.push('\n');
    if snapshot.pager.controls_visible {
        out.push_str(&format!(
            "Page {} of {}{}{}\n",
            snapshot.pager.page,
            snapshot.pager.page_count,
            if snapshot.pager.has_previous {
                "  [prev]"
            } else {
                ""
            },
            if snapshot.pager.has_next { "  [next]" } else { "" }
        ));
    }
    out.into_bytes()
}

pub fn render_json(snapshot: &DashboardSnapshot<'_>) -> Vec<u8> {
    serde_json::to_vec_pretty(snapshot).unwrap_or_else(|_| b"{}\n".to_vec())
}

pub fn render_html(snapshot: &DashboardSnapshot<'_>) -> Vec<u8> {
    report::render_html(snapshot)
}

pub fn render(format: OutputFormat, snapshot: &DashboardSnapshot<'_>) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(snapshot),
        OutputFormat::Json => render_json(snapshot),
        OutputFormat::Html => render_html(snapshot),
    }
}
