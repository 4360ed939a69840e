//! # Errors
//! Errors emitted by ptools_core

// Errors raised by this crate, with an optional conversion into pyo3 error types so
// they surface as Python exceptions.
use std::{error, fmt};

/// ptools specific result.
pub type PtoolsResult<T> = Result<T, Error>;

/// Possible Errors which may be raised by this crate.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The composition enumerator was asked for an impossible shape, such as zero bins.
    InvalidDimension(String),

    /// Observed bin counts and null probabilities are not the same length.
    DimensionMismatch {
        /// Number of observed bins.
        bin_counts: usize,
        /// Number of null probabilities.
        null_probs: usize,
    },

    /// Null probabilities contain a non-positive value or do not sum to one.
    InvalidProbability(String),

    /// The support set is larger than the configured safety threshold.
    ///
    /// A support size of `None` means the count does not fit in a `u128`.
    ResourceExceeded {
        /// Analytic size of the support set.
        support_size: Option<u128>,
        /// Configured threshold which was exceeded.
        threshold: u64,
    },

    /// Input or variable exceeded expected or allowed bounds.
    ValueError(String),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidDimension(s) => {
                write!(f, "{}", s)
            }
            Error::DimensionMismatch {
                bin_counts,
                null_probs,
            } => {
                write!(
                    f,
                    "Bin counts have length {} but null probabilities have length {}.",
                    bin_counts, null_probs
                )
            }
            Error::InvalidProbability(s) => {
                write!(f, "{}", s)
            }
            Error::ResourceExceeded {
                support_size: Some(size),
                threshold,
            } => {
                write!(
                    f,
                    "Support set contains {} compositions, exceeding the safety threshold of {}.",
                    size, threshold
                )
            }
            Error::ResourceExceeded {
                support_size: None,
                threshold,
            } => {
                write!(
                    f,
                    "Support set size overflows u128, exceeding the safety threshold of {}.",
                    threshold
                )
            }
            Error::ValueError(s) => {
                write!(f, "{}", s)
            }
        }
    }
}

#[cfg(feature = "pyo3")]
use pyo3::{exceptions, PyErr};

#[cfg(feature = "pyo3")]
impl From<Error> for PyErr {
    fn from(err: Error) -> PyErr {
        match err {
            Error::ResourceExceeded { .. } => {
                PyErr::new::<exceptions::PyMemoryError, _>(err.to_string())
            }
            _ => PyErr::new::<exceptions::PyValueError, _>(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_display_names_values() {
        let err = Error::DimensionMismatch {
            bin_counts: 5,
            null_probs: 4,
        };
        assert_eq!(
            err.to_string(),
            "Bin counts have length 5 but null probabilities have length 4."
        );

        let err = Error::ResourceExceeded {
            support_size: Some(6),
            threshold: 5,
        };
        assert!(err.to_string().contains("6 compositions"));

        let err = Error::ResourceExceeded {
            support_size: None,
            threshold: 5,
        };
        assert!(err.to_string().contains("overflows"));
    }
}
