//! Offset/limit slicing of result sets

/// Returns the page of `items` starting at `offset`
///
/// An offset past the end yields an empty page, and a limit larger than the
/// whole set returns the set unchanged. Order is never altered.
pub fn paginate<T>(items: &[T], limit: usize, offset: usize) -> &[T] {
    if offset >= items.len() {
        return &[];
    }
    if limit > items.len() {
        return items;
    }
    let end = offset.saturating_add(limit).min(items.len());
    &items[offset..end]
}

/// Number of pages of size `limit` needed to hold `total` items
pub fn total_pages(total: usize, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}
