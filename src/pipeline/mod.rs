//! Aggregation and normalization pipeline.
//!
//! Respondents are averaged at four grouping granularities, normalized
//! against the combined table, and reshaped into the long-form
//! [`ChartTable`]. Every stage takes its input by reference and returns a new
//! table.

pub mod aggregate;
pub mod normalize;
pub mod reshape;
pub mod types;
pub mod utility;

use crate::dataset::Respondent;
use tracing::info;
pub use types::{ALL_AGES, AggregateTable, ChartRow, ChartTable, GroupKey, TOTAL_SEX};

/// Runs aggregate, normalize and reshape in order.
pub fn run(respondents: &[Respondent]) -> ChartTable {
    let aggregated = aggregate::aggregate(respondents);
    let normalized = normalize::normalize(&aggregated);
    let table = reshape::to_long(&normalized);

    info!(
        respondents = respondents.len(),
        groups = aggregated.len(),
        rows = table.len(),
        "Chart table built"
    );

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{Indicator, IndicatorValues};

    fn respondent(diet: &str, sex: &str, age: &str, ghg: f64) -> Respondent {
        let mut values = IndicatorValues::default();
        values.set(Indicator::GreenhouseGas, ghg);
        Respondent::new(diet, sex, age, values)
    }

    #[test]
    fn test_run_is_deterministic() {
        let rs = vec![
            respondent("vegan", "female", "20-29", 1.0),
            respondent("fish", "male", "50-59", 3.0),
            respondent("meat100", "female", "70-79", 9.0),
        ];
        assert_eq!(run(&rs), run(&rs));
    }

    #[test]
    fn test_run_values_span_unit_range() {
        let rs = vec![
            respondent("vegan", "female", "20-29", 1.0),
            respondent("meat100", "male", "20-29", 9.0),
        ];
        let table = run(&rs);
        let ghg: Vec<f64> = table
            .rows
            .iter()
            .filter(|r| r.indicator == Indicator::GreenhouseGas)
            .map(|r| r.value)
            .collect();
        let min = ghg.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = ghg.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(min, 0.0);
        assert_eq!(max, 1.0);

        // Every other indicator is constant zero, so it stays zero.
        assert!(
            table
                .rows
                .iter()
                .filter(|r| r.indicator != Indicator::GreenhouseGas)
                .all(|r| r.value == 0.0)
        );
    }
}
