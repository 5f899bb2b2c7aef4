use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("WebDriver session error: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),

    #[error("WebDriver command failed: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no parseable {field} values in genre '{genre}', nothing to impute from")]
    EmptyField { genre: String, field: &'static str },

    #[error("no genre tables found under '{0}'")]
    NothingToMerge(String),

    #[error("Other error: {0}")]
    Other(String),
}
