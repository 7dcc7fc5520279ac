//! Errors raised while fetching a distance matrix.
//!
//! The optimizer itself never fails; only the matrix providers do.

use std::fmt;

#[derive(Debug)]
pub enum MatrixError {
    Http(reqwest::Error),
    /// The routing service answered but reported a failure code.
    Service(String),
    /// The returned matrix does not match the number of requested points.
    Dimension { expected: usize, actual: usize },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::Http(err) => write!(f, "matrix request failed: {}", err),
            MatrixError::Service(code) => write!(f, "routing service returned {}", code),
            MatrixError::Dimension { expected, actual } => write!(
                f,
                "matrix has {} rows, expected {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for MatrixError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatrixError::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for MatrixError {
    fn from(err: reqwest::Error) -> Self {
        MatrixError::Http(err)
    }
}
