use std::ops::Range;

use serde::Serialize;

use crate::consts::consts::{MAX_VISIBLE_PAGES, PAGE_SIZE};

/// One control in the pager
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

pub fn total_pages(item_count: usize) -> usize {
    item_count.div_ceil(PAGE_SIZE)
}

/// Index range of `page` (1-based) within a list of `item_count` items, clipped to the list
pub fn page_bounds(page: usize, item_count: usize) -> Range<usize> {
    let start = (page.saturating_sub(1) * PAGE_SIZE).min(item_count);
    let end = (start + PAGE_SIZE).min(item_count);

    start..end
}

/// Page numbers shown in the pager. Ascending, at most two ellipses, and always includes the
/// first and last page when there is at least one page.
#[tracing::instrument]
pub fn page_window(current_page: usize, total_pages: usize) -> Vec<PageMarker> {
    if total_pages <= MAX_VISIBLE_PAGES {
        return (1..=total_pages).map(PageMarker::Page).collect();
    }

    if current_page <= 3 {
        let mut markers: Vec<PageMarker> = (1..=4).map(PageMarker::Page).collect();
        markers.push(PageMarker::Ellipsis);
        markers.push(PageMarker::Page(total_pages));
        return markers;
    }

    if current_page >= total_pages - 2 {
        let mut markers = vec![PageMarker::Page(1), PageMarker::Ellipsis];
        markers.extend((total_pages - 3..=total_pages).map(PageMarker::Page));
        return markers;
    }

    vec![
        PageMarker::Page(1),
        PageMarker::Ellipsis,
        PageMarker::Page(current_page - 1),
        PageMarker::Page(current_page),
        PageMarker::Page(current_page + 1),
        PageMarker::Ellipsis,
        PageMarker::Page(total_pages),
    ]
}
