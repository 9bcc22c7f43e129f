use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One hotel lead as stored in the data file.
///
/// Optional fields holding `null`, or a value of the wrong shape, decode to
/// `None`; the two identifying strings (`hotel_name`, `google_place_id`) and
/// the address fall back to an empty string. A single sloppy entry never fails
/// the whole collection.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Hotel {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hotel_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub google_place_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub full_address: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub google_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub user_ratings_total: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u8")]
    pub price_level: Option<u8>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub primary_phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub star_segment: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub primary_email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub alternate_emails: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub travel_desk_phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub travel_desk_email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub alternate_phones: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub notes: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

/// Strings stay as-is and numbers are kept as their JSON text (phone numbers
/// are sometimes stored unquoted). Anything else is absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?
        .as_f64()
        .filter(|v| v.is_finite()))
}

/// Whole non-negative numbers, including ones written as `1.5e3`.
fn whole_number(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|v| v.fract() == 0.0 && *v >= 0.0 && *v <= u64::MAX as f64)
            .map(|v| v as u64)
    })
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(whole_number(&Value::deserialize(deserializer)?))
}

fn lenient_u8<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(whole_number(&Value::deserialize(deserializer)?).and_then(|v| u8::try_from(v).ok()))
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.as_str()).filter(|s| !s.is_empty())
}

impl Hotel {
    /// Category label, with empty strings treated as absent.
    pub fn category(&self) -> Option<&str> {
        non_empty(self.star_segment.as_ref())
    }

    pub fn phone(&self) -> Option<&str> {
        non_empty(self.primary_phone.as_ref())
    }

    pub fn website(&self) -> Option<&str> {
        non_empty(self.website.as_ref())
    }

    pub fn has_phone(&self) -> bool {
        self.phone().is_some()
    }

    pub fn has_email(&self) -> bool {
        non_empty(self.primary_email.as_ref()).is_some()
    }

    /// First address of the comma-separated `primary_email` list.
    pub fn first_email(&self) -> Option<&str> {
        non_empty(self.primary_email.as_ref())?
            .split(',')
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }

    /// Every address across the primary, alternate and travel-desk fields.
    pub fn all_emails(&self) -> impl Iterator<Item = &str> {
        [
            self.primary_email.as_ref(),
            self.alternate_emails.as_ref(),
            self.travel_desk_email.as_ref(),
        ]
        .into_iter()
        .flatten()
        .flat_map(|list| list.split(','))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

/// Decode a JSON array of hotels.
pub fn parse_hotels(raw: &[u8]) -> Result<Vec<Hotel>, serde_json::Error> {
    serde_json::from_slice::<Vec<Hotel>>(raw)
}
