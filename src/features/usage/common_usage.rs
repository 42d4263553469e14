//! Dominant-user selection
//!
//! Decides which event list an effect file is "commonly used" in: the list
//! must use it at all, and its drain time divided by the (mode-adjusted) use
//! count must fall below the common usage threshold. Among qualifying lists
//! the one with the most raw uses wins.
//!
//! Ties on raw use count keep whichever list comes first in pool order. That
//! order is incidental rather than meaningful, so callers should not rely on
//! which of two equally used lists is returned.

use crate::pool::EventList;

/// Use count adjusted for modes where objects routinely coincide
pub fn effective_uses(list: &EventList, uses: usize) -> f64 {
    let uses = uses as f64;
    if list.mode().allows_simultaneous_objects() {
        uses / 2.0
    } else {
        uses
    }
}

/// Mean gap between uses in milliseconds, `None` for an unused file
pub fn mean_gap_ms(list: &EventList, uses: usize) -> Option<f64> {
    if uses == 0 {
        return None;
    }
    Some(list.active_duration_ms() / effective_uses(list, uses))
}

/// Whether `uses` uses over the list's drain time count as habitual
pub fn is_commonly_used(list: &EventList, uses: usize, threshold_ms: f64) -> bool {
    mean_gap_ms(list, uses).is_some_and(|gap| gap < threshold_ms)
}

/// Pick the list an effect file is most commonly used in
///
/// # Arguments
///
/// * `lists` - Event lists in pool order
/// * `uses` - Use count per list, aligned with `lists`
/// * `threshold_ms` - Largest mean gap still considered common
///
/// # Returns
///
/// Index of the selected list, or `None` if no list qualifies
pub fn select_common_user(lists: &[EventList], uses: &[usize], threshold_ms: f64) -> Option<usize> {
    let mut selected: Option<(usize, usize)> = None;

    for (i, (list, &count)) in lists.iter().zip(uses).enumerate() {
        if !is_commonly_used(list, count, threshold_ms) {
            continue;
        }
        if selected.map_or(true, |(_, best)| count > best) {
            selected = Some((i, count));
        }
    }

    if let Some((i, count)) = selected {
        log::debug!(
            "Commonly used in {} ({} uses over {:.0} ms)",
            lists[i].name(),
            count,
            lists[i].active_duration_ms()
        );
    }

    selected.map(|(i, _)| i)
}
