use crate::dataset::Respondent;
use crate::indicators::IndicatorValues;
use crate::pipeline::types::{ALL_AGES, AggregateRow, AggregateTable, GroupKey, TOTAL_SEX};
use crate::pipeline::utility::mean_values;
use std::collections::BTreeMap;
use tracing::debug;

/// Grouping granularities, in the order their blocks appear in the aggregate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// `(diet_group, sex, age_group)`.
    SexAndAge,
    /// `(diet_group, sex)`, age collapsed to [`ALL_AGES`].
    SexOnly,
    /// `(diet_group)`, sex collapsed to [`TOTAL_SEX`] and age to [`ALL_AGES`].
    DietOnly,
    /// `(diet_group, age_group)`, sex collapsed to [`TOTAL_SEX`].
    AgeOnly,
}

impl Granularity {
    pub const ALL: [Granularity; 4] = [
        Granularity::SexAndAge,
        Granularity::SexOnly,
        Granularity::DietOnly,
        Granularity::AgeOnly,
    ];

    /// The key a respondent contributes to at this granularity, or `None` when
    /// a label the key uses is blank.
    ///
    /// A blank `sex` still counts toward [`Granularity::DietOnly`] and
    /// [`Granularity::AgeOnly`]; a blank `diet_group` counts toward nothing.
    pub fn key_for(self, r: &Respondent) -> Option<GroupKey> {
        if is_blank(&r.diet_group) {
            return None;
        }
        match self {
            Granularity::SexAndAge | Granularity::SexOnly if is_blank(&r.sex) => None,
            Granularity::SexAndAge => Some(GroupKey::new(&r.diet_group, &r.sex, &r.age_group)),
            Granularity::SexOnly => Some(GroupKey::new(&r.diet_group, &r.sex, ALL_AGES)),
            Granularity::DietOnly => Some(GroupKey::new(&r.diet_group, TOTAL_SEX, ALL_AGES)),
            Granularity::AgeOnly => Some(GroupKey::new(&r.diet_group, TOTAL_SEX, &r.age_group)),
        }
    }
}

fn is_blank(label: &str) -> bool {
    label.trim().is_empty()
}

/// Means of every indicator at one granularity, ordered by key.
pub fn aggregate_by(respondents: &[Respondent], granularity: Granularity) -> AggregateTable {
    let mut groups: BTreeMap<GroupKey, Vec<&IndicatorValues>> = BTreeMap::new();

    for r in respondents {
        if let Some(key) = granularity.key_for(r) {
            groups.entry(key).or_default().push(&r.values);
        }
    }

    let rows = groups
        .into_iter()
        .map(|(key, members)| AggregateRow {
            key,
            values: mean_values(&members),
        })
        .collect();

    AggregateTable { rows }
}

/// Concatenates the aggregate blocks of every [`Granularity`].
pub fn aggregate(respondents: &[Respondent]) -> AggregateTable {
    let mut rows = Vec::new();

    for granularity in Granularity::ALL {
        let block = aggregate_by(respondents, granularity);
        debug!(?granularity, groups = block.len(), "Aggregated block");
        rows.extend(block.rows);
    }

    AggregateTable { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::Indicator;

    fn respondent(diet: &str, sex: &str, age: &str, ghg: f64) -> Respondent {
        let mut values = IndicatorValues::default();
        values.set(Indicator::GreenhouseGas, ghg);
        Respondent::new(diet, sex, age, values)
    }

    fn ghg(table: &AggregateTable, diet: &str, sex: &str, age: &str) -> f64 {
        table
            .get(&GroupKey::new(diet, sex, age))
            .expect("row present")
            .values
            .get(Indicator::GreenhouseGas)
    }

    #[test]
    fn test_finest_granularity_mean() {
        let rs = vec![
            respondent("vegan", "female", "20-29", 1.0),
            respondent("vegan", "female", "20-29", 3.0),
        ];
        let table = aggregate(&rs);
        assert_eq!(ghg(&table, "vegan", "female", "20-29"), 2.0);
    }

    #[test]
    fn test_all_four_blocks_are_present() {
        let rs = vec![
            respondent("fish", "female", "20-29", 1.0),
            respondent("fish", "male", "30-39", 5.0),
        ];
        let table = aggregate(&rs);

        // 2 finest + 2 sex-only + 1 diet-only + 2 age-only
        assert_eq!(table.len(), 7);
        assert_eq!(ghg(&table, "fish", "female", ALL_AGES), 1.0);
        assert_eq!(ghg(&table, "fish", "male", ALL_AGES), 5.0);
        assert_eq!(ghg(&table, "fish", TOTAL_SEX, ALL_AGES), 3.0);
        assert_eq!(ghg(&table, "fish", TOTAL_SEX, "20-29"), 1.0);
        assert_eq!(ghg(&table, "fish", TOTAL_SEX, "30-39"), 5.0);
    }

    #[test]
    fn test_total_is_mean_over_respondents_not_groups() {
        // Unbalanced groups: mean of means would be (1 + 4) / 2 = 2.5.
        let rs = vec![
            respondent("meat50", "female", "20-29", 1.0),
            respondent("meat50", "male", "20-29", 3.0),
            respondent("meat50", "male", "20-29", 5.0),
        ];
        let table = aggregate(&rs);
        assert_eq!(ghg(&table, "meat50", TOTAL_SEX, ALL_AGES), 3.0);
    }

    #[test]
    fn test_blocks_keep_granularity_order() {
        let rs = vec![
            respondent("veggie", "male", "40-49", 1.0),
            respondent("fish", "male", "40-49", 1.0),
        ];
        let table = aggregate(&rs);
        let keys: Vec<_> = table
            .rows
            .iter()
            .map(|r| (r.key.diet_group.as_str(), r.key.sex.as_str(), r.key.age_group.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("fish", "male", "40-49"),
                ("veggie", "male", "40-49"),
                ("fish", "male", ALL_AGES),
                ("veggie", "male", ALL_AGES),
                ("fish", TOTAL_SEX, ALL_AGES),
                ("veggie", TOTAL_SEX, ALL_AGES),
                ("fish", TOTAL_SEX, "40-49"),
                ("veggie", TOTAL_SEX, "40-49"),
            ]
        );
    }

    #[test]
    fn test_blank_sex_only_counts_toward_total_blocks() {
        let rs = vec![
            respondent("vegan", "female", "20-29", 1.0),
            respondent("vegan", "", "20-29", 3.0),
        ];
        let table = aggregate(&rs);

        assert!(table.rows.iter().all(|r| !r.key.sex.is_empty()));
        assert_eq!(ghg(&table, "vegan", "female", "20-29"), 1.0);
        assert_eq!(ghg(&table, "vegan", "female", ALL_AGES), 1.0);
        assert_eq!(ghg(&table, "vegan", TOTAL_SEX, ALL_AGES), 2.0);
        assert_eq!(ghg(&table, "vegan", TOTAL_SEX, "20-29"), 2.0);
        // 1 finest + 1 sex-only + 1 diet-only + 1 age-only
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_blank_diet_counts_toward_nothing() {
        let rs = vec![
            respondent("fish", "male", "30-39", 4.0),
            respondent("", "male", "30-39", 8.0),
            respondent("  ", "", "30-39", 8.0),
        ];
        let table = aggregate(&rs);

        assert!(table.rows.iter().all(|r| r.key.diet_group == "fish"));
        assert_eq!(ghg(&table, "fish", TOTAL_SEX, ALL_AGES), 4.0);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_empty_input_gives_empty_table() {
        assert!(aggregate(&[]).is_empty());
    }
}
