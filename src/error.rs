use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading the respondent results file. All of them abort the run.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("cannot open results file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
