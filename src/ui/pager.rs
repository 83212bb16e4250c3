//! Windowed page-number layout for the pager.
//!
//! Long page ranges are collapsed: the first and last `margin` pages are always
//! shown, plus a window of `range` pages around the active one. Gaps between
//! shown pages become a single [`PagerItem::Break`], except a gap of exactly
//! one page which is shown as that page.

/// One slot in the pager row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerItem {
    /// Zero-indexed page.
    Page(u32),
    /// Ellipsis standing in for hidden pages.
    Break,
}

/// Pages shown around the active page.
pub const PAGE_RANGE: u32 = 5;

/// Pages always shown at each end.
pub const MARGIN_PAGES: u32 = 1;

/// Lays out the pager for `page_count` pages with `active` selected.
///
/// `active` is clamped into range. Returns an empty layout when there are no
/// pages.
///
/// # Examples
///
/// ```
/// use marquee::ui::pager::{pager_items, PagerItem};
///
/// let items = pager_items(20, 10, 5, 1);
/// assert_eq!(items.first(), Some(&PagerItem::Page(0)));
/// assert_eq!(items[1], PagerItem::Break);
/// assert_eq!(items.last(), Some(&PagerItem::Page(19)));
/// ```
#[must_use]
pub fn pager_items(page_count: u32, active: u32, range: u32, margin: u32) -> Vec<PagerItem> {
    if page_count == 0 {
        return Vec::new();
    }

    let active = active.min(page_count - 1);
    let range = range.max(1);

    let window_end = active
        .saturating_sub(range / 2)
        .saturating_add(range)
        .min(page_count);
    let window_start = window_end.saturating_sub(range);

    let shown = |index: u32| {
        index < margin
            || index >= page_count.saturating_sub(margin)
            || (window_start..window_end).contains(&index)
    };

    let mut items = Vec::new();
    let mut index = 0;
    while index < page_count {
        if shown(index) {
            items.push(PagerItem::Page(index));
            index += 1;
            continue;
        }

        let gap_end = (index..page_count).find(|&i| shown(i)).unwrap_or(page_count);
        if gap_end - index == 1 {
            items.push(PagerItem::Page(index));
        } else {
            items.push(PagerItem::Break);
        }
        index = gap_end;
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use PagerItem::{Break, Page};

    fn layout(count: u32, active: u32) -> Vec<PagerItem> {
        pager_items(count, active, PAGE_RANGE, MARGIN_PAGES)
    }

    #[test]
    fn test_small_counts_show_every_page() {
        assert_eq!(layout(3, 0), vec![Page(0), Page(1), Page(2)]);
        assert_eq!(layout(7, 3), (0..7).map(Page).collect::<Vec<_>>());
    }

    #[test]
    fn test_window_in_the_middle_has_two_breaks() {
        assert_eq!(
            layout(20, 10),
            vec![Page(0), Break, Page(8), Page(9), Page(10), Page(11), Page(12), Break, Page(19)]
        );
    }

    #[test]
    fn test_window_clamps_at_edges() {
        assert_eq!(
            layout(20, 0),
            vec![Page(0), Page(1), Page(2), Page(3), Page(4), Break, Page(19)]
        );
        assert_eq!(
            layout(20, 19),
            vec![Page(0), Break, Page(15), Page(16), Page(17), Page(18), Page(19)]
        );
    }

    #[test]
    fn test_single_page_gap_is_filled() {
        // Window 2..7 leaves only page 1 hidden before it.
        assert_eq!(layout(20, 4)[..3], [Page(0), Page(1), Page(2)]);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(layout(0, 0).is_empty());
        assert_eq!(layout(1, 5), vec![Page(0)]);
        assert_eq!(pager_items(4, 1, 0, 0), vec![Page(0), Page(1), Break]);
    }
}
