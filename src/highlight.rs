//! Nearest-match highlighting
//!
//! Alphabetical and best-match result pages mark at most one row as the
//! nearest match to what the user typed. The upstream response nominates a
//! top hit; this module finds where that hit sits in the visible batch.

/// Find the row to highlight: the first item whose sort key equals the top
/// hit's key, if any.
///
/// The scan folds an explicit `flagged` accumulator over the batch so that
/// later duplicates of the key can never pick up a second highlight. A top
/// hit that does not appear in the visible batch is not an error; nothing
/// gets flagged.
pub fn flag_nearest<T, F>(items: &[T], top_hit_key: Option<&str>, sort_key: F) -> Option<usize>
where
    F: Fn(&T) -> &str,
{
    let top_hit_key = top_hit_key?;

    let (_, nearest) = items.iter().enumerate().fold(
        (false, None),
        |(flagged, nearest), (index, item)| {
            if !flagged && sort_key(item) == top_hit_key {
                (true, Some(index))
            } else {
                (flagged, nearest)
            }
        },
    );
    nearest
}
