use crate::indicators::Indicator;
use crate::pipeline::types::{AggregateTable, ChartRow, ChartTable};

/// Pivots a wide table into one row per `(group, indicator)`.
///
/// Rows are indicator-major: every group for the first indicator, then every
/// group for the second, and so on. Non-finite values are written as 0.0.
pub fn to_long(table: &AggregateTable) -> ChartTable {
    let mut rows = Vec::with_capacity(table.len() * Indicator::ALL.len());

    for indicator in Indicator::ALL {
        for row in &table.rows {
            let value = row.values.get(indicator);
            rows.push(ChartRow {
                diet_group: row.key.diet_group.clone(),
                sex: row.key.sex.clone(),
                age_group: row.key.age_group.clone(),
                indicator,
                value: if value.is_finite() { value } else { 0.0 },
            });
        }
    }

    ChartTable { rows }
}
