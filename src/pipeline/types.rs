//! Tables passed between pipeline stages.

use crate::indicators::{Indicator, IndicatorValues};
use serde::Serialize;

/// Synthetic `sex` value for rows aggregated over both sexes.
pub const TOTAL_SEX: &str = "Total";

/// Synthetic `age_group` value for rows aggregated over every age band.
pub const ALL_AGES: &str = "All Ages";

/// Identifies one aggregate row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub diet_group: String,
    pub sex: String,
    pub age_group: String,
}

impl GroupKey {
    pub fn new(diet_group: &str, sex: &str, age_group: &str) -> Self {
        Self {
            diet_group: diet_group.to_string(),
            sex: sex.to_string(),
            age_group: age_group.to_string(),
        }
    }
}

/// Mean indicator values for a group of respondents.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub key: GroupKey,
    pub values: IndicatorValues,
}

/// Wide table: one row per group key, one value per indicator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregateTable {
    pub rows: Vec<AggregateRow>,
}

impl AggregateTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up the row for an exact key.
    pub fn get(&self, key: &GroupKey) -> Option<&AggregateRow> {
        self.rows.iter().find(|row| &row.key == key)
    }

    /// `(min, max)` of one indicator over every row, or `None` for an empty table.
    pub fn range(&self, indicator: Indicator) -> Option<(f64, f64)> {
        let mut values = self.rows.iter().map(|row| row.values.get(indicator));
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

/// One `(group, indicator, value)` observation of the chart-ready table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub diet_group: String,
    pub sex: String,
    pub age_group: String,
    pub indicator: Indicator,
    pub value: f64,
}

/// Long-form table consumed by the chart builder.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ChartTable {
    pub rows: Vec<ChartRow>,
}

impl ChartTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
