use crate::indicators::{Indicator, IndicatorValues};

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Per-indicator mean over a group of value sets.
pub fn mean_values(group: &[&IndicatorValues]) -> IndicatorValues {
    let mut out = IndicatorValues::default();
    for indicator in Indicator::ALL {
        let series: Vec<f64> = group.iter().map(|v| v.get(indicator)).collect();
        out.set(indicator, mean(&series));
    }
    out
}

/// Rescales `value` into `[0, 1]` against `(min, max)`. A zero-width range maps to 0.0.
pub fn min_max_scale(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range > 0.0 { (value - min) / range } else { 0.0 }
}
