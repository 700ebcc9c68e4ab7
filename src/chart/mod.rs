//! Radar-chart series and filter metadata derived from the chart table.
//!
//! [`ChartMetadata`] lists the options offered by the sex and age dropdowns.
//! [`build_series`] turns every `(sex, age, diet)` combination into one closed
//! radar polygon; combinations without a value for every indicator are
//! reported in [`SeriesSet::incomplete`] instead of being drawn.

pub mod palette;

use crate::indicators::{INDICATOR_COUNT, Indicator};
use crate::pipeline::{ALL_AGES, ChartTable, TOTAL_SEX};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Dropdown options and default selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartMetadata {
    pub sex_options: Vec<String>,
    pub age_options: Vec<String>,
    pub diet_groups: Vec<String>,
    pub default_sex: String,
    pub default_age: String,
}

impl ChartMetadata {
    pub fn from_table(table: &ChartTable) -> Self {
        let sexes: BTreeSet<&str> = table.rows.iter().map(|r| r.sex.as_str()).collect();
        let ages: BTreeSet<&str> = table.rows.iter().map(|r| r.age_group.as_str()).collect();
        let diets: BTreeSet<&str> = table.rows.iter().map(|r| r.diet_group.as_str()).collect();

        let mut age_options: Vec<String> = ages.into_iter().map(String::from).collect();
        age_options.sort_by_key(|a| age_sort_key(a));

        Self {
            sex_options: sexes.into_iter().map(String::from).collect(),
            age_options,
            diet_groups: diets.into_iter().map(String::from).collect(),
            default_sex: TOTAL_SEX.to_string(),
            default_age: ALL_AGES.to_string(),
        }
    }

    pub fn is_default(&self, sex: &str, age_group: &str) -> bool {
        sex == self.default_sex && age_group == self.default_age
    }
}

/// `"All Ages"` first, then by starting decade.
fn age_sort_key(age_group: &str) -> (u32, String) {
    if age_group == ALL_AGES {
        return (0, String::new());
    }
    let start = age_group
        .split('-')
        .next()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(u32::MAX);
    (start, age_group.to_string())
}

/// One closed radar polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarSeries {
    pub diet_group: String,
    pub sex: String,
    pub age_group: String,
    pub style: palette::SeriesStyle,
    /// Radii in [`Indicator::ALL`] order, first point repeated at the end.
    pub r: Vec<f64>,
    /// Axis labels matching `r`.
    pub theta: Vec<&'static str>,
    pub visible: bool,
}

/// A combination left out of the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompleteGroup {
    pub diet_group: String,
    pub sex: String,
    pub age_group: String,
    /// Indicators that had a value.
    pub found: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesSet {
    pub series: Vec<RadarSeries>,
    pub incomplete: Vec<IncompleteGroup>,
}

type Slot<'a> = (&'a str, &'a str, &'a str);

/// Builds a series for every sex option × age option × diet group.
pub fn build_series(table: &ChartTable, metadata: &ChartMetadata) -> SeriesSet {
    let mut slots: BTreeMap<Slot<'_>, [Option<f64>; INDICATOR_COUNT]> = BTreeMap::new();
    for row in &table.rows {
        let slot = slots
            .entry((row.diet_group.as_str(), row.sex.as_str(), row.age_group.as_str()))
            .or_insert([None; INDICATOR_COUNT]);
        let cell = &mut slot[row.indicator.index()];
        if cell.is_none() {
            *cell = Some(row.value);
        }
    }

    let mut set = SeriesSet::default();

    for sex in &metadata.sex_options {
        for age in &metadata.age_options {
            for diet in &metadata.diet_groups {
                let values = slots
                    .get(&(diet.as_str(), sex.as_str(), age.as_str()))
                    .copied()
                    .unwrap_or([None; INDICATOR_COUNT]);

                let found = values.iter().filter(|v| v.is_some()).count();
                if found < INDICATOR_COUNT {
                    warn!(diet = %diet, sex = %sex, age = %age, found, "Incomplete data, series skipped");
                    set.incomplete.push(IncompleteGroup {
                        diet_group: diet.clone(),
                        sex: sex.clone(),
                        age_group: age.clone(),
                        found,
                    });
                    continue;
                }

                let mut r: Vec<f64> = values.iter().map(|v| v.unwrap_or(0.0)).collect();
                let mut theta: Vec<&'static str> = Indicator::ALL.iter().map(|i| i.label()).collect();
                r.push(r[0]);
                theta.push(theta[0]);

                set.series.push(RadarSeries {
                    diet_group: diet.clone(),
                    sex: sex.clone(),
                    age_group: age.clone(),
                    style: palette::resolve(diet),
                    r,
                    theta,
                    visible: metadata.is_default(sex, age),
                });
            }
        }
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Respondent;
    use crate::indicators::IndicatorValues;
    use crate::pipeline;

    fn respondent(diet: &str, sex: &str, age: &str, ghg: f64) -> Respondent {
        let mut values = IndicatorValues::default();
        values.set(Indicator::GreenhouseGas, ghg);
        Respondent::new(diet, sex, age, values)
    }

    #[test]
    fn test_age_options_order() {
        let rs = vec![
            respondent("vegan", "female", "70-79", 1.0),
            respondent("vegan", "female", "20-29", 1.0),
            respondent("vegan", "male", "40-49", 1.0),
        ];
        let meta = ChartMetadata::from_table(&pipeline::run(&rs));
        assert_eq!(meta.age_options, vec![ALL_AGES, "20-29", "40-49", "70-79"]);
        assert_eq!(meta.sex_options, vec![TOTAL_SEX, "female", "male"]);
        assert_eq!(meta.default_sex, TOTAL_SEX);
        assert_eq!(meta.default_age, ALL_AGES);
    }

    #[test]
    fn test_series_are_closed_and_ordered() {
        let rs = vec![
            respondent("vegan", "female", "20-29", 1.0),
            respondent("fish", "female", "20-29", 3.0),
        ];
        let table = pipeline::run(&rs);
        let meta = ChartMetadata::from_table(&table);
        let set = build_series(&table, &meta);

        let s = &set.series[0];
        assert_eq!(s.r.len(), INDICATOR_COUNT + 1);
        assert_eq!(s.r.first(), s.r.last());
        assert_eq!(s.theta[0], Indicator::GreenhouseGas.label());
        assert_eq!(s.theta[INDICATOR_COUNT], Indicator::GreenhouseGas.label());
        assert_eq!(s.theta[1], Indicator::LandUse.label());
    }

    #[test]
    fn test_only_default_selection_is_visible() {
        let rs = vec![
            respondent("vegan", "female", "20-29", 1.0),
            respondent("fish", "male", "30-39", 3.0),
        ];
        let table = pipeline::run(&rs);
        let meta = ChartMetadata::from_table(&table);
        let set = build_series(&table, &meta);

        let visible: Vec<_> = set.series.iter().filter(|s| s.visible).collect();
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|s| s.sex == TOTAL_SEX && s.age_group == ALL_AGES));
    }

    #[test]
    fn test_absent_combination_is_reported_not_drawn() {
        let rs = vec![
            respondent("vegan", "female", "20-29", 1.0),
            respondent("fish", "male", "20-29", 3.0),
        ];
        let table = pipeline::run(&rs);
        let meta = ChartMetadata::from_table(&table);
        let set = build_series(&table, &meta);

        let missing = IncompleteGroup {
            diet_group: "fish".to_string(),
            sex: "female".to_string(),
            age_group: "20-29".to_string(),
            found: 0,
        };
        assert!(set.incomplete.contains(&missing));
        assert!(
            !set.series
                .iter()
                .any(|s| s.diet_group == "fish" && s.sex == "female")
        );
    }

    #[test]
    fn test_partial_indicators_are_reported() {
        let mut table = pipeline::run(&[respondent("vegan", "female", "20-29", 1.0)]);
        table.rows.retain(|r| {
            !(r.sex == "female" && r.age_group == "20-29" && r.indicator == Indicator::Methane)
        });
        let meta = ChartMetadata::from_table(&table);
        let set = build_series(&table, &meta);

        let partial = set
            .incomplete
            .iter()
            .find(|g| g.sex == "female" && g.age_group == "20-29")
            .expect("partial group reported");
        assert_eq!(partial.found, INDICATOR_COUNT - 1);
    }

    #[test]
    fn test_blank_sex_never_becomes_an_option() {
        let rs = vec![
            respondent("vegan", "female", "20-29", 1.0),
            respondent("vegan", "", "20-29", 3.0),
        ];
        let table = pipeline::run(&rs);
        let meta = ChartMetadata::from_table(&table);
        let set = build_series(&table, &meta);

        assert_eq!(meta.sex_options, vec![TOTAL_SEX, "female"]);
        assert!(set.series.iter().all(|s| !s.sex.is_empty()));
    }

    #[test]
    fn test_unknown_diet_uses_fallback_style() {
        let table = pipeline::run(&[respondent("keto", "male", "30-39", 2.0)]);
        let meta = ChartMetadata::from_table(&table);
        let set = build_series(&table, &meta);
        assert!(set.series.iter().all(|s| s.style.display_name == "keto"));
        assert!(set.series.iter().all(|s| s.style.line_color == palette::FALLBACK_LINE_COLOR));
    }
}
