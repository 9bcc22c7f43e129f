use serde::Serialize;

use crate::loader::{LoadError, LoadState};
use crate::map::{self, MapMarker, MapView};
use crate::model::Hotel;
use crate::stats::Statistics;
use crate::view::{self, Action, Pager, ViewState};

/// Loaded collection plus the user's current view-state.
#[derive(Clone, Debug, Default)]
pub struct Session {
    load: LoadState,
    state: ViewState,
    map: MapView,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, Serialize)]
pub struct DashboardSnapshot<'a> {
    pub loading: bool,
    pub statistics: Statistics,
    pub category_options: Vec<String>,
    pub view: &'a ViewState,
    pub matched: usize,
    pub summary: String,
    pub pager: Pager,
    pub rows: Vec<&'a Hotel>,
    pub map: MapView,
    pub markers: Vec<MapMarker<'a>>,
}

impl Session {
    pub fn new(state: ViewState, map: MapView) -> Self {
        Self {
            load: LoadState::Pending,
            state,
            map,
        }
    }

    pub fn with_hotels(hotels: Vec<Hotel>, state: ViewState, map: MapView) -> Self {
        let mut session = Self::new(state, map);
        session.finish_load(Ok(hotels));
        session
    }

    pub fn hotels(&self) -> &[Hotel] {
        self.load.records()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn finish_load(&mut self, result: Result<Vec<Hotel>, LoadError>) {
        self.load.finish(result);
    }

    pub fn begin_refresh(&mut self) -> bool {
        self.load.begin_refresh()
    }

    pub fn page_count(&self) -> usize {
        view::derive(self.hotels(), &self.state).pager.page_count
    }

    pub fn dispatch(&mut self, action: Action) {
        self.state = self.state.reduce(action);
    }

    pub fn next_page(&mut self) {
        let page_count = self.page_count();
        self.dispatch(Action::NextPage { page_count });
    }

    pub fn snapshot(&self) -> DashboardSnapshot<'_> {
        let hotels = self.hotels();
        let derived = view::derive(hotels, &self.state);
        DashboardSnapshot {
            loading: self.load.is_loading(),
            statistics: Statistics::compute(hotels),
            category_options: view::category_options(hotels),
            view: &self.state,
            matched: derived.matched_len(),
            summary: derived.summary_line(),
            pager: derived.pager,
            rows: derived.rows,
            map: self.map,
            markers: map::markers(hotels),
        }
    }
}
