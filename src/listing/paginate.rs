use std::ops::Range;

/// Default number of cards per page.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Number of pages needed for `len` items. Zero items means zero pages.
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Index range of `page` (0-based) within `len` items.
///
/// Pages past the end yield an empty range rather than being clamped back
/// to the last page.
pub fn page_range(len: usize, page: usize, page_size: usize) -> Range<usize> {
    let page_size = page_size.max(1);
    let start = page.saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// The items shown on `page`.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    &items[page_range(items.len(), page, page_size)]
}
