//! Crate-level error type and `Result` alias.
//! Every operation validates its inputs up front and reports the first violation
//! through one of these variants; no partial results are produced.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Shape error: {arg} must be {expected}, got {found}")]
    Shape {
        arg: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("Empty aperture: no element satisfies f-number {fnum} at depth {depth}")]
    EmptyAperture { fnum: f64, depth: f64 },

    #[error("Degenerate geometry: {reason}")]
    Domain { reason: String },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Invalid transmit configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn shape(arg: &'static str, expected: &'static str, found: &[usize]) -> Self {
        Error::Shape {
            arg,
            expected,
            found: format!("shape {:?}", found),
        }
    }

    pub fn invalid<V: std::fmt::Display>(arg: &'static str, value: V) -> Self {
        Error::InvalidArgument {
            arg,
            value: value.to_string(),
        }
    }

    pub fn domain<S: Into<String>>(reason: S) -> Self {
        Error::Domain {
            reason: reason.into(),
        }
    }
}
