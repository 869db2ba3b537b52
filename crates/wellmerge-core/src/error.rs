use thiserror::Error;

/// Canonical result for wellmerge.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("cannot reach reference store: {0}")]
    Connection(String),

    #[error("object not found: {location}")]
    NotFound { location: String },

    #[error("malformed CSV input: {0}")]
    Parse(String),

    #[error("required column '{0}' is missing")]
    MissingColumn(String),

    #[error("column '{0}' has no values")]
    EmptyColumn(String),

    #[error("column '{0}' has a blank value")]
    BlankValue(String),

    #[error("column '{column}' holds more than one distinct value: {values:?}")]
    AmbiguousValue { column: String, values: Vec<String> },

    #[error("job_date '{0}' is not in MM/DD/YYYY form")]
    DateFormat(String),

    #[error("reference query failed: {0}")]
    Query(String),

    #[error("reference store returned conflicting well names: {candidates:?}")]
    AmbiguousWell { candidates: Vec<String> },

    #[error("failed to write output: {0}")]
    Write(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("malformed trigger event: {0}")]
    Event(String),
}

impl Error {
    /// True for errors caused by the input object itself rather than by
    /// infrastructure. Retrying these will fail the same way.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::NotFound { .. }
                | Error::Parse(_)
                | Error::MissingColumn(_)
                | Error::EmptyColumn(_)
                | Error::BlankValue(_)
                | Error::AmbiguousValue { .. }
                | Error::DateFormat(_)
                | Error::Event(_)
        )
    }
}
