use std::num::NonZeroUsize;

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => unreachable!(),
};

pub fn page_count(total: usize, page_size: NonZeroUsize) -> usize {
    total.div_ceil(page_size.get())
}

/// The 1-based `page` of `items`. Pages past the end (and page 0) are empty.
pub fn page_slice<T>(items: &[T], page: usize, page_size: NonZeroUsize) -> &[T] {
    let Some(index) = page.checked_sub(1) else {
        return &[];
    };
    let start = index.saturating_mul(page_size.get()).min(items.len());
    let end = start.saturating_add(page_size.get()).min(items.len());
    &items[start..end]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Pager {
    pub page: usize,
    pub page_count: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub controls_visible: bool,
}

impl Pager {
    pub fn new(page: usize, page_count: usize) -> Self {
        Self {
            page,
            page_count,
            has_previous: page > 1,
            has_next: page < page_count,
            controls_visible: page_count > 1,
        }
    }
}
