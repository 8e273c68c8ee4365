//! Ranking Engine: total order over due items.

use super::types::DueItem;
use std::cmp::Ordering;

/// Sorts items most urgent first.
///
/// Status rank decides first, then the smallest present remaining value
/// (items tracking nothing sort last in their group). `sort_by` is stable,
/// so full ties keep catalog order.
pub fn rank_items(items: &mut [DueItem<'_>]) {
    items.sort_by(compare_urgency);
}

/// Urgency ordering between two items. `Less` means `a` is more urgent.
#[must_use]
pub fn compare_urgency(a: &DueItem<'_>, b: &DueItem<'_>) -> Ordering {
    a.status
        .rank()
        .cmp(&b.status.rank())
        .then_with(|| tie_break(a).total_cmp(&tie_break(b)))
}

fn tie_break(item: &DueItem<'_>) -> f64 {
    item.closest_remaining().unwrap_or(f64::INFINITY)
}
