//! Headless run: apply a sequence of actions and report the final layout.

use serde::Serialize;

use crate::core::format::{column_count, count_label, squares_label, sum_equation};
use crate::core::{GroupCounts, GroupStore, LayoutEngine, LayoutGeometry, Snapshot};
use crate::types::{BlockAction, Place};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DumpReport {
    pub value: u32,
    pub steps: Vec<DumpStep>,
    pub counts: GroupCounts,
    pub columns: Vec<ColumnLabels>,
    pub equation: String,
    pub snapshot: Snapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DumpStep {
    pub action: &'static str,
    pub changed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnLabels {
    pub place: &'static str,
    pub count: u32,
    pub label: String,
    pub squares: String,
}

/// Initialize a store to `value`, apply `actions` in order and lay out the result.
pub fn run(value: u32, actions: &[BlockAction], geometry: LayoutGeometry) -> DumpReport {
    let mut store = GroupStore::with_value(value);
    let steps = actions
        .iter()
        .map(|&action| DumpStep {
            action: action.as_str(),
            changed: store.apply(action),
        })
        .collect();

    let mut snapshot = store.snapshot();
    LayoutEngine::new(geometry).apply(&mut snapshot);

    let counts = snapshot.counts();
    let columns = Place::ALL
        .into_iter()
        .map(|place| {
            let count = column_count(counts, place);
            ColumnLabels {
                place: place.name(),
                count,
                label: count_label(count, place),
                squares: squares_label(count, place),
            }
        })
        .collect();

    DumpReport {
        value: store.value(),
        steps,
        counts,
        columns,
        equation: sum_equation(counts, store.value()),
        snapshot,
    }
}
