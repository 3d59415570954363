//! Paging engine
//!
//! Three paging styles coexist across the search surfaces:
//! - Numbered pages with a sliding window of page links (best-match,
//!   previous-name and advanced search)
//! - Cursor paging over a collation key (alphabetical search)
//! - A fixed visible slice carved out of one oversized alphabetical batch
//!
//! Everything here is pure; the service layer owns the upstream calls.

use serde::Serialize;

/// Page links shown either side of the current page.
const WINDOW_BEFORE: u32 = 4;
const WINDOW_AFTER: u32 = 6;
/// Preferred number of page links in the window.
const WINDOW_WIDTH: u32 = 10;

/// Alphabetical batches larger than this get cut down to the visible slice.
const OVERSIZED_BATCH_THRESHOLD: usize = 20;
const VISIBLE_SLICE_START: usize = 20;
const VISIBLE_SLICE_END: usize = 61;

/// Half-open range of page numbers to render as links, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub start: u32,
    pub end: u32,
}

/// Compute the page-link window around `current_page`.
///
/// The window starts four pages back and ends six pages ahead, then is
/// adjusted in order: the start is clamped to page 1, the end widened to
/// keep ten links, the end clamped to one past the last page, and finally
/// the start shifted down (never below 1) to recover the ten-link width.
pub fn page_window(current_page: u32, total_pages: u32) -> PageWindow {
    let mut start = current_page.saturating_sub(WINDOW_BEFORE).max(1);
    let mut end = current_page.saturating_add(WINDOW_AFTER);

    if end.saturating_sub(start) < WINDOW_WIDTH {
        end = start.saturating_add(WINDOW_WIDTH);
    }

    let limit = total_pages.saturating_add(1);
    if end > limit {
        end = limit;
        if end.saturating_sub(start) < WINDOW_WIDTH {
            start = end.saturating_sub(WINDOW_WIDTH).max(1);
        }
    }

    PageWindow { start, end }
}

/// Number of pages needed for `hits` results, capped at `max_pages`.
pub fn page_count(hits: u64, page_size: u32, max_pages: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    hits.div_ceil(page_size as u64).min(max_pages as u64) as u32
}

/// Reduce an oversized alphabetical batch to the visible slice.
///
/// Batches of up to twenty items pass through untouched. Anything larger is
/// cut to the items at indices 20..61, clamped to what the batch actually
/// holds.
pub fn slice_oversized_batch<T>(items: Vec<T>) -> Vec<T> {
    if items.len() <= OVERSIZED_BATCH_THRESHOLD {
        return items;
    }
    let end = VISIBLE_SLICE_END.min(items.len());
    items
        .into_iter()
        .skip(VISIBLE_SLICE_START)
        .take(end - VISIBLE_SLICE_START)
        .collect()
}

/// Cursors bracketing the visible alphabetical batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchCursors {
    /// Sort key of the first visible item; pages backwards from here.
    pub previous: Option<String>,
    /// Sort key of the last visible item; pages forwards from here.
    pub next: Option<String>,
}

/// Derive paging cursors from the visible batch. An empty batch yields no
/// cursors, which in turn hides both paging links.
pub fn batch_cursors<T, F>(items: &[T], sort_key: F) -> BatchCursors
where
    F: Fn(&T) -> &str,
{
    BatchCursors {
        previous: items.first().map(|item| sort_key(item).to_string()),
        next: items.last().map(|item| sort_key(item).to_string()),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_page_window_small_total_keeps_start_at_one() {
        // Few pages: window covers everything without shifting below 1
        assert_eq!(page_window(1, 3), PageWindow { start: 1, end: 4 });
    }

    #[test]
    fn test_page_window_mid_range() {
        assert_eq!(page_window(7, 100), PageWindow { start: 3, end: 13 });
    }

    #[test]
    fn test_page_window_near_start_widens_to_ten() {
        assert_eq!(page_window(2, 100), PageWindow { start: 1, end: 11 });
    }

    #[test]
    fn test_page_window_near_end_shifts_start_down() {
        assert_eq!(page_window(50, 52), PageWindow { start: 43, end: 53 });
        assert_eq!(page_window(52, 52), PageWindow { start: 43, end: 53 });
    }

    #[test]
    fn test_page_window_zero_total_degenerates() {
        assert_eq!(page_window(1, 0), PageWindow { start: 1, end: 1 });
    }

    #[test]
    fn test_page_window_current_past_total() {
        // Current page beyond the last page still yields a sane window
        assert_eq!(page_window(10, 2), PageWindow { start: 1, end: 3 });
    }

    #[test]
    fn test_page_count_rounds_up_and_caps() {
        assert_eq!(page_count(0, 20, 50), 0);
        assert_eq!(page_count(1, 20, 50), 1);
        assert_eq!(page_count(20, 20, 50), 1);
        assert_eq!(page_count(21, 20, 50), 2);
        assert_eq!(page_count(100_000, 20, 50), 50);
    }

    #[test]
    fn test_slice_passes_small_batch_through() {
        let items: Vec<u32> = (0..20).collect();
        assert_eq!(slice_oversized_batch(items.clone()), items);
    }

    #[test]
    fn test_slice_cuts_oversized_batch_to_window() {
        let items: Vec<u32> = (0..82).collect();
        let visible = slice_oversized_batch(items);
        assert_eq!(visible.len(), 41);
        assert_eq!(visible.first(), Some(&20));
        assert_eq!(visible.last(), Some(&60));
    }

    #[test]
    fn test_slice_clamps_to_available_items() {
        let items: Vec<u32> = (0..30).collect();
        let visible = slice_oversized_batch(items);
        assert_eq!(visible.len(), 10);
        assert_eq!(visible.first(), Some(&20));
        assert_eq!(visible.last(), Some(&29));
    }

    #[test]
    fn test_slice_empty_batch() {
        let items: Vec<u32> = Vec::new();
        assert!(slice_oversized_batch(items).is_empty());
    }

    #[test]
    fn test_batch_cursors_from_ends() {
        let items = vec!["ALPHA:1", "BRAVO:2", "CHARLIE:3"];
        let cursors = batch_cursors(&items, |i| *i);
        assert_eq!(cursors.previous.as_deref(), Some("ALPHA:1"));
        assert_eq!(cursors.next.as_deref(), Some("CHARLIE:3"));
    }

    #[test]
    fn test_batch_cursors_single_item_uses_it_for_both() {
        let items = vec!["ONLY:1"];
        let cursors = batch_cursors(&items, |i| *i);
        assert_eq!(cursors.previous.as_deref(), Some("ONLY:1"));
        assert_eq!(cursors.next.as_deref(), Some("ONLY:1"));
    }

    #[test]
    fn test_batch_cursors_empty_batch_yields_none() {
        let items: Vec<&str> = Vec::new();
        let cursors = batch_cursors(&items, |i| *i);
        assert_eq!(cursors, BatchCursors::default());
    }

    // -- Property tests --
    //
    // The window arithmetic is all saturating, so any page/total pair is
    // in contract. These pin down the bounds the link renderer relies on.

    proptest! {
        #[test]
        fn window_bounds_always_sane(current in 1u32..5_000, total in 0u32..5_000) {
            let window = page_window(current, total);
            prop_assert!(window.start >= 1);
            prop_assert!(window.start <= window.end);
            prop_assert!(window.end <= total.saturating_add(1).max(window.start));
        }

        /// With ten or more pages the window always offers exactly ten links.
        #[test]
        fn window_keeps_full_width_when_room(current in 1u32..5_000, total in 10u32..5_000) {
            let window = page_window(current, total);
            prop_assert_eq!(window.end - window.start, WINDOW_WIDTH);
        }

        /// With fewer than ten pages the window simply covers all of them.
        #[test]
        fn window_covers_everything_when_few_pages(current in 1u32..5_000, total in 0u32..10) {
            let window = page_window(current, total);
            prop_assert_eq!(window, PageWindow { start: 1, end: total + 1 });
        }

        #[test]
        fn slice_output_matches_expected_len(len in 0usize..200) {
            let items: Vec<usize> = (0..len).collect();
            let visible = slice_oversized_batch(items);
            if len <= OVERSIZED_BATCH_THRESHOLD {
                prop_assert_eq!(visible.len(), len);
            } else {
                prop_assert_eq!(
                    visible.len(),
                    VISIBLE_SLICE_END.min(len) - VISIBLE_SLICE_START
                );
                prop_assert_eq!(visible.first(), Some(&VISIBLE_SLICE_START));
            }
        }
    }
}
