use crate::indicators::{INDICATOR_COUNT, Indicator};
use crate::pipeline::types::{AggregateRow, AggregateTable};
use crate::pipeline::utility::min_max_scale;

/// Min-max normalizes every indicator against the whole table.
///
/// The same `(min, max)` is used for every granularity so values stay
/// comparable across filter selections. An indicator whose values are all
/// equal becomes 0.0 everywhere.
pub fn normalize(table: &AggregateTable) -> AggregateTable {
    let mut ranges = [(0.0, 0.0); INDICATOR_COUNT];
    for indicator in Indicator::ALL {
        if let Some(range) = table.range(indicator) {
            ranges[indicator.index()] = range;
        }
    }

    let rows = table
        .rows
        .iter()
        .map(|row| AggregateRow {
            key: row.key.clone(),
            values: row.values.map(|indicator, v| {
                let (min, max) = ranges[indicator.index()];
                min_max_scale(v, min, max)
            }),
        })
        .collect();

    AggregateTable { rows }
}
