use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MortgageError {
    #[error("missing parameters")]
    MissingArguments,

    #[error("parameter '{field}' is invalid: {value:?}")]
    Parse { field: &'static str, value: String },

    #[error("parameter is out of range {min} <= '{field}' <= {max}")]
    Range {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("parameter 'months' must be greater than 0 to compute a payment")]
    InvalidTerm,

    #[error("unable to allocate amortization table of {rows} rows")]
    ResourceExhausted { rows: usize },

    #[error("unable to format amortization table")]
    Format(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, MortgageError>;
