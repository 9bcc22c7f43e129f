use serde::{Deserialize, Serialize};

use crate::model::Hotel;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct MapView {
    pub center: (f64, f64),
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        // Hyderabad
        Self {
            center: (17.385044, 78.486671),
            zoom: 11,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapMarker<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub latitude: f64,
    pub longitude: f64,
    pub category: Option<&'a str>,
    pub rating: Option<f64>,
    pub phone: Option<&'a str>,
    pub website: Option<&'a str>,
    /// Every address from the primary, alternate and travel-desk fields.
    pub emails: Vec<&'a str>,
}

/// One marker per record with both coordinates, in collection order.
pub fn markers(hotels: &[Hotel]) -> Vec<MapMarker<'_>> {
    hotels
        .iter()
        .filter_map(|h| {
            let (latitude, longitude) = h.coordinates()?;
            Some(MapMarker {
                id: &h.google_place_id,
                name: &h.hotel_name,
                latitude,
                longitude,
                category: h.category(),
                rating: h.google_rating,
                phone: h.phone(),
                website: h.website(),
                emails: h.all_emails().collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_without_coordinates_get_no_marker() {
        let hotels = vec![
            Hotel {
                google_place_id: "a".into(),
                latitude: Some(17.4),
                longitude: Some(78.4),
                primary_email: Some("gm@a.in, fo@a.in".into()),
                travel_desk_email: Some("desk@a.in".into()),
                ..Hotel::default()
            },
            Hotel {
                google_place_id: "b".into(),
                latitude: Some(17.4),
                ..Hotel::default()
            },
        ];
        let out = markers(&hotels);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "a");
        assert_eq!(out[0].emails, ["gm@a.in", "fo@a.in", "desk@a.in"]);
    }
}
