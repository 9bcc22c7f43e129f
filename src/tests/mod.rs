use std::collections::HashSet;
use std::num::NonZeroUsize;

use crate::model::Hotel;
use crate::view::{self, Action, CategoryFilter, SortDirection, SortKey, ViewState};

fn hotel(id: &str, name: &str) -> Hotel {
    Hotel {
        google_place_id: id.to_string(),
        hotel_name: name.to_string(),
        ..Hotel::default()
    }
}

fn mixed_collection() -> Vec<Hotel> {
    let segments = [Some("5-star"), None, Some("3-star"), Some("4-star"), Some("")];
    (0..37)
        .map(|i| Hotel {
            google_rating: (i % 4 != 0).then(|| 2.5 + (i % 6) as f64 * 0.5),
            user_ratings_total: (i % 3 != 0).then_some((i % 5) as u64 * 100),
            star_segment: segments[i % segments.len()].map(str::to_string),
            full_address: format!("{} Road, Hyderabad", i % 7),
            ..hotel(&format!("p{i}"), &format!("Hotel {}", (i * 7) % 11))
        })
        .collect()
}

fn ids<'a>(rows: &[&'a Hotel]) -> Vec<&'a str> {
    rows.iter().map(|h| h.google_place_id.as_str()).collect()
}

#[test]
fn pages_partition_the_sequence() {
    let hotels = mixed_collection();
    for size in [1usize, 3, 10, 37, 50] {
        let page_size = NonZeroUsize::new(size).unwrap();
        let mut seen = Vec::new();
        let pages = view::page_count(hotels.len(), page_size);
        for page in 1..=pages + 1 {
            let slice = view::page_slice(&hotels, page, page_size);
            assert!(slice.len() <= size);
            seen.extend(slice.iter().map(|h| h.google_place_id.clone()));
        }
        let all: Vec<String> = hotels.iter().map(|h| h.google_place_id.clone()).collect();
        assert_eq!(seen, all, "page size {size}");
    }
}

#[test]
fn sorting_is_stable_for_equal_keys() {
    let hotels: Vec<Hotel> = (0..12)
        .map(|i| Hotel {
            google_rating: Some(if i % 2 == 0 { 4.0 } else { 3.0 }),
            ..hotel(&format!("p{i}"), "Same Name")
        })
        .collect();
    for key in [SortKey::Name, SortKey::Rating] {
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let mut rows: Vec<&Hotel> = hotels.iter().collect();
            view::sort_hotels(&mut rows, key, direction);
            let mut last_index: Option<(String, usize)> = None;
            for row in &rows {
                let index: usize = row.google_place_id[1..].parse().unwrap();
                let group = format!("{:?}", row.google_rating);
                if let Some((prev_group, prev_index)) = &last_index {
                    if *prev_group == group {
                        assert!(*prev_index < index, "{key:?} {direction:?}");
                    }
                }
                last_index = Some((group, index));
            }
        }
    }
}

#[test]
fn absent_values_sort_last_in_both_directions() {
    let hotels = mixed_collection();
    let present = |key: SortKey, h: &Hotel| match key {
        SortKey::Name => true,
        SortKey::Rating => h.google_rating.is_some(),
        SortKey::Reviews => h.user_ratings_total.is_some(),
        SortKey::Category => h.category().is_some(),
    };
    for key in [SortKey::Name, SortKey::Rating, SortKey::Reviews, SortKey::Category] {
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let mut rows: Vec<&Hotel> = hotels.iter().collect();
            view::sort_hotels(&mut rows, key, direction);
            let first_absent = rows.iter().position(|h| !present(key, *h));
            if let Some(at) = first_absent {
                assert!(
                    rows[at..].iter().all(|h| !present(key, *h)),
                    "{key:?} {direction:?}"
                );
            }
        }
    }
}

#[test]
fn empty_search_and_all_is_identity() {
    let hotels = mixed_collection();
    let rows = view::filter_hotels(&hotels, "", &CategoryFilter::All);
    let got: HashSet<&str> = ids(&rows).into_iter().collect();
    let want: HashSet<&str> = hotels.iter().map(|h| h.google_place_id.as_str()).collect();
    assert_eq!(got, want);
    assert_eq!(rows.len(), hotels.len());
}

#[test]
fn rating_bands_cover_every_rated_record_once() {
    let mut hotels = mixed_collection();
    hotels.push(Hotel {
        google_rating: Some(0.0),
        ..hotel("zero", "Zero")
    });
    hotels.push(Hotel {
        google_rating: Some(4.5),
        ..hotel("edge", "Edge")
    });
    let stats = crate::stats::Statistics::compute(&hotels);
    let banded: usize = stats.ratings.iter().map(|b| b.count).sum();
    assert_eq!(banded, stats.summary.rated);
    assert_eq!(
        stats.summary.rated,
        hotels.iter().filter(|h| h.google_rating.is_some()).count()
    );
}

#[test]
fn average_of_unrated_collection_is_undefined() {
    let hotels = vec![hotel("a", "A"), hotel("b", "B")];
    let summary = crate::stats::summarize(&hotels);
    assert_eq!(summary.average_rating, None);
    assert_eq!(crate::output::format_average(summary.average_rating), "NaN");

    let empty = crate::stats::summarize(&[]);
    assert_eq!(empty.total, 0);
    assert_eq!(empty.average_rating, None);
}

#[test]
fn rating_desc_puts_unrated_last() {
    let hotels = vec![
        Hotel {
            google_rating: Some(4.6),
            ..hotel("a", "Alpha")
        },
        hotel("b", "Beta"),
        Hotel {
            google_rating: Some(3.9),
            ..hotel("g", "Gamma")
        },
    ];
    let state = ViewState::default();
    let derived = view::derive(&hotels, &state);
    let names: Vec<&str> = derived.rows.iter().map(|h| h.hotel_name.as_str()).collect();
    assert_eq!(names, ["Alpha", "Gamma", "Beta"]);
}

#[test]
fn twenty_five_records_page_three_and_four() {
    let hotels: Vec<Hotel> = (0..25)
        .map(|i| hotel(&format!("p{i:02}"), &format!("Hotel {i:02}")))
        .collect();
    let state = ViewState::default().reduce(Action::SetSort(SortKey::Name, SortDirection::Asc));

    let page3 = view::derive(&hotels, &state.reduce(Action::GoToPage(3)));
    assert_eq!(ids(&page3.rows), ["p20", "p21", "p22", "p23", "p24"]);
    assert_eq!(page3.pager.page_count, 3);

    let page4 = view::derive(&hotels, &state.reduce(Action::GoToPage(4)));
    assert!(page4.rows.is_empty());
    assert_eq!(page4.pager.page_count, 3);
}

#[test]
fn category_grouping_counts_unknown() {
    let hotels: Vec<Hotel> = [Some("5-star"), None, Some("5-star"), Some("3-star")]
        .into_iter()
        .enumerate()
        .map(|(i, segment)| Hotel {
            star_segment: segment.map(str::to_string),
            ..hotel(&format!("p{i}"), "H")
        })
        .collect();
    let groups: Vec<(String, usize)> = crate::stats::category_distribution(&hotels)
        .into_iter()
        .map(|c| (c.label, c.count))
        .collect();
    assert_eq!(
        groups,
        [
            ("5-star".to_string(), 2),
            ("Unknown".to_string(), 1),
            ("3-star".to_string(), 1)
        ]
    );
}

#[test]
fn search_matches_name_or_address() {
    let hotels = vec![
        hotel("a", "Grand Hyderabad"),
        Hotel {
            full_address: "12 Grandview Road".to_string(),
            ..hotel("b", "Lakeside Inn")
        },
        hotel("c", "Budget Stay"),
    ];
    let rows = view::filter_hotels(&hotels, "grand", &CategoryFilter::All);
    assert_eq!(ids(&rows), ["a", "b"]);
}

#[test]
fn dashboard_flow_over_a_session() {
    let hotels = mixed_collection();
    let mut session = crate::session::Session::with_hotels(
        hotels,
        ViewState::default(),
        crate::map::MapView::default(),
    );
    assert!(session.page_count() > 1);

    session.next_page();
    assert_eq!(session.state().page, 2);

    session.dispatch(Action::SetCategory(CategoryFilter::parse("5-star")));
    assert_eq!(session.state().page, 1);
    let snapshot = session.snapshot();
    assert!(snapshot
        .rows
        .iter()
        .all(|h| h.star_segment.as_deref() == Some("5-star")));
    assert_eq!(snapshot.statistics.summary.total, 37);
    assert!(snapshot.category_options.starts_with(&["all".to_string()]));

    assert!(session.begin_refresh());
    assert!(!session.begin_refresh());
    assert!(session.snapshot().loading);
    session.finish_load(Ok(Vec::new()));
    let snapshot = session.snapshot();
    assert_eq!(snapshot.summary, "Showing 0 of 0 hotels");
    assert!(!snapshot.pager.controls_visible);
}
