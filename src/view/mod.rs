//! Derived view engine: records + view-state -> the rows on screen.
//!
//! Every call recomputes filter, sort and pagination from the source slice;
//! nothing is cached between states.

pub mod filter;
pub mod page;
pub mod sort;

use std::num::NonZeroUsize;

use serde::Serialize;

use crate::model::Hotel;
pub use filter::{category_options, filter_hotels, CategoryFilter, ALL_CATEGORIES};
pub use page::{page_count, page_slice, Pager, DEFAULT_PAGE_SIZE};
pub use sort::{locale_cmp, sort_hotels, SortDirection, SortKey};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub search: String,
    pub category: CategoryFilter,
    pub sort_key: SortKey,
    pub direction: SortDirection,
    pub page: usize,
    pub page_size: NonZeroUsize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: CategoryFilter::All,
            sort_key: SortKey::Rating,
            direction: SortDirection::Desc,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    SetSearch(String),
    SetCategory(CategoryFilter),
    /// Header click: same key flips the direction, a new key starts descending.
    SortBy(SortKey),
    SetSort(SortKey, SortDirection),
    NextPage { page_count: usize },
    PreviousPage,
    GoToPage(usize),
}

impl ViewState {
    /// Pure transition. Any change to search, category or sort lands on page 1.
    pub fn reduce(&self, action: Action) -> ViewState {
        let mut next = self.clone();
        match action {
            Action::SetSearch(search) => {
                next.search = search;
                next.page = 1;
            }
            Action::SetCategory(category) => {
                next.category = category;
                next.page = 1;
            }
            Action::SortBy(key) => {
                if key == self.sort_key {
                    next.direction = self.direction.toggled();
                } else {
                    next.sort_key = key;
                    next.direction = SortDirection::Desc;
                }
                next.page = 1;
            }
            Action::SetSort(key, direction) => {
                next.sort_key = key;
                next.direction = direction;
                next.page = 1;
            }
            Action::NextPage { page_count } => {
                next.page = self.page.saturating_add(1).min(page_count.max(1));
            }
            Action::PreviousPage => {
                next.page = self.page.saturating_sub(1).max(1);
            }
            Action::GoToPage(page) => {
                next.page = page;
            }
        }
        log::debug!(
            "view state: search={:?} category={} sort={} {} page={}",
            next.search,
            next.category.label(),
            next.sort_key.label(),
            next.direction.label(),
            next.page
        );
        next
    }
}

/// Filtered and sorted records plus the slice for the current page.
#[derive(Clone, Debug)]
pub struct DerivedView<'a> {
    pub matched: Vec<&'a Hotel>,
    pub rows: Vec<&'a Hotel>,
    pub pager: Pager,
}

impl DerivedView<'_> {
    pub fn matched_len(&self) -> usize {
        self.matched.len()
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Showing {} of {} hotels",
            self.rows.len(),
            self.matched.len()
        )
    }
}

pub fn derive<'a>(hotels: &'a [Hotel], state: &ViewState) -> DerivedView<'a> {
    let mut matched = filter_hotels(hotels, &state.search, &state.category);
    sort_hotels(&mut matched, state.sort_key, state.direction);
    let count = page_count(matched.len(), state.page_size);
    let rows = page_slice(&matched, state.page, state.page_size).to_vec();
    DerivedView {
        pager: Pager::new(state.page, count),
        matched,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_click_toggles_or_switches() {
        let state = ViewState {
            page: 4,
            ..ViewState::default()
        };
        let flipped = state.reduce(Action::SortBy(SortKey::Rating));
        assert_eq!(flipped.direction, SortDirection::Asc);
        assert_eq!(flipped.page, 1);

        let switched = flipped.reduce(Action::SortBy(SortKey::Name));
        assert_eq!(switched.sort_key, SortKey::Name);
        assert_eq!(switched.direction, SortDirection::Desc);
    }

    #[test]
    fn filter_changes_reset_page() {
        let state = ViewState {
            page: 3,
            ..ViewState::default()
        };
        assert_eq!(state.reduce(Action::SetSearch("inn".into())).page, 1);
        assert_eq!(
            state
                .reduce(Action::SetCategory(CategoryFilter::parse("5-star")))
                .page,
            1
        );
        assert_eq!(state.page, 3);
    }

    #[test]
    fn paging_clamps_to_bounds() {
        let state = ViewState::default();
        assert_eq!(state.reduce(Action::PreviousPage).page, 1);
        let last = state
            .reduce(Action::NextPage { page_count: 2 })
            .reduce(Action::NextPage { page_count: 2 });
        assert_eq!(last.page, 2);
        assert_eq!(state.reduce(Action::NextPage { page_count: 0 }).page, 1);
    }

    #[test]
    fn derive_is_repeatable() {
        let hotels: Vec<Hotel> = (0..13)
            .map(|i| Hotel {
                hotel_name: format!("Hotel {i}"),
                google_rating: Some(4.0),
                ..Hotel::default()
            })
            .collect();
        let state = ViewState::default().reduce(Action::GoToPage(2));
        let first = derive(&hotels, &state);
        let second = derive(&hotels, &state);
        assert_eq!(first.rows, second.rows);
        assert_eq!(first.rows.len(), 3);
        assert_eq!(first.rows[0].hotel_name, "Hotel 10");
        assert_eq!(first.summary_line(), "Showing 3 of 13 hotels");
        assert_eq!(first.pager, Pager::new(2, 2));
    }
}
