use std::collections::HashSet;

use super::events::MaterializationEvent;

/// The materialization label followed by each metadata entry label,
/// deduplicated in first-seen order.
pub fn collect_labels(event: &MaterializationEvent) -> Vec<&str> {
    let materialization = &event.materialization;
    let mut seen = HashSet::new();

    std::iter::once(materialization.label.as_str())
        .chain(materialization.metadata_entries.iter().map(|entry| entry.label()))
        .filter(|label| seen.insert(*label))
        .collect()
}
