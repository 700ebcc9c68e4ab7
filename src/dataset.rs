//! Ingestion of the per-respondent results file.
//!
//! Rows are matched to columns by header name. Only respondents in one of the
//! [`AGE_GROUPS`] decade bands are kept; indicator cells that do not parse as a
//! finite number are read as `0.0`.

use crate::error::DatasetError;
use crate::indicators::{Indicator, IndicatorValues};
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Age bands retained by ingestion, in ascending order.
pub const AGE_GROUPS: &[&str] = &["20-29", "30-39", "40-49", "50-59", "60-69", "70-79"];

const LABEL_COLUMNS: &[&str] = &["diet_group", "sex", "age_group"];

/// One survey respondent after coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct Respondent {
    pub diet_group: String,
    pub sex: String,
    pub age_group: String,
    pub values: IndicatorValues,
}

impl Respondent {
    pub fn new(diet_group: &str, sex: &str, age_group: &str, values: IndicatorValues) -> Self {
        Self {
            diet_group: diet_group.to_string(),
            sex: sex.to_string(),
            age_group: age_group.to_string(),
            values,
        }
    }
}

/// Result of reading a results file.
#[derive(Debug, Default)]
pub struct Ingested {
    pub respondents: Vec<Respondent>,
    pub rows_read: usize,
    pub rows_dropped: usize,
}

/// A single row deserialized from the results file.
#[derive(Debug, Deserialize)]
struct RawRespondent {
    diet_group: String,
    sex: String,
    age_group: String,

    #[serde(deserialize_with = "lenient_f64")]
    mean_ghgs: f64,
    #[serde(deserialize_with = "lenient_f64")]
    mean_land: f64,
    #[serde(deserialize_with = "lenient_f64")]
    mean_watscar: f64,
    #[serde(deserialize_with = "lenient_f64")]
    mean_eut: f64,
    #[serde(deserialize_with = "lenient_f64")]
    mean_ghgs_ch4: f64,
    #[serde(deserialize_with = "lenient_f64")]
    mean_ghgs_n2o: f64,
    #[serde(deserialize_with = "lenient_f64")]
    mean_bio: f64,
    #[serde(deserialize_with = "lenient_f64")]
    mean_watuse: f64,
    #[serde(deserialize_with = "lenient_f64")]
    mean_acid: f64,
}

impl RawRespondent {
    fn into_respondent(self) -> Respondent {
        let mut values = IndicatorValues::default();

        macro_rules! take {
            ($indicator:expr, $field:ident) => {
                values.set($indicator, self.$field);
            };
        }

        take!(Indicator::GreenhouseGas, mean_ghgs);
        take!(Indicator::LandUse, mean_land);
        take!(Indicator::WaterScarcity, mean_watscar);
        take!(Indicator::Eutrophication, mean_eut);
        take!(Indicator::Methane, mean_ghgs_ch4);
        take!(Indicator::NitrousOxide, mean_ghgs_n2o);
        take!(Indicator::Biodiversity, mean_bio);
        take!(Indicator::WaterUse, mean_watuse);
        take!(Indicator::Acidification, mean_acid);

        Respondent {
            diet_group: self.diet_group,
            sex: self.sex,
            age_group: self.age_group,
            values,
        }
    }
}

/// Parses a cell as a finite number, falling back to `0.0`.
pub fn coerce_number(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(coerce_number(&raw))
}

/// Returns `true` if `age_group` is one of the retained decade bands.
pub fn is_tracked_age_group(age_group: &str) -> bool {
    AGE_GROUPS.contains(&age_group)
}

/// Reads respondents from any CSV source with a header row.
///
/// # Errors
///
/// Returns [`DatasetError::MissingColumn`] if a label or indicator column is
/// absent from the header, or [`DatasetError::Csv`] if the source is not
/// readable CSV. Rows with fewer cells than the header are padded with blanks,
/// so their missing indicators read as `0.0`.
pub fn read_respondents<R: Read>(reader: R) -> Result<Ingested, DatasetError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let required = LABEL_COLUMNS
        .iter()
        .copied()
        .chain(Indicator::ALL.iter().map(|i| i.column()));
    for column in required {
        if !headers.iter().any(|h| h == column) {
            return Err(DatasetError::MissingColumn(column.to_string()));
        }
    }

    let mut ingested = Ingested::default();

    let mut record = csv::StringRecord::new();

    while rdr.read_record(&mut record)? {
        // Short rows read as blank cells in the trailing columns.
        while record.len() < headers.len() {
            record.push_field("");
        }
        let raw: RawRespondent = record.deserialize(Some(&headers))?;
        ingested.rows_read += 1;

        if !is_tracked_age_group(&raw.age_group) {
            ingested.rows_dropped += 1;
            continue;
        }

        ingested.respondents.push(raw.into_respondent());
    }

    debug!(
        rows_read = ingested.rows_read,
        rows_dropped = ingested.rows_dropped,
        "Dropped rows outside tracked age bands"
    );

    Ok(ingested)
}

/// Opens `path` and reads it with [`read_respondents`].
pub fn load_respondents(path: impl AsRef<Path>) -> Result<Ingested, DatasetError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let ingested = read_respondents(file)?;
    info!(
        path = %path.display(),
        kept = ingested.respondents.len(),
        dropped = ingested.rows_dropped,
        "Results file loaded"
    );
    Ok(ingested)
}
