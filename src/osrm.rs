//! OSRM HTTP adapter for distance/duration matrices.

use serde::Deserialize;
use tracing::debug;

use crate::error::MatrixError;
use crate::matrix::{DistanceMatrix, MatrixEntry};
use crate::models::Coordinates;
use crate::traits::DistanceMatrixProvider;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

impl OsrmConfig {
    /// Reads `OSRM_BASE_URL`, `OSRM_PROFILE` and `OSRM_TIMEOUT_SECS`, keeping
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            base_url: lookup("OSRM_BASE_URL").unwrap_or(defaults.base_url),
            profile: lookup("OSRM_PROFILE").unwrap_or(defaults.profile),
            timeout_secs: lookup("OSRM_TIMEOUT_SECS")
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, MatrixError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn table_url(&self, locations: &[Coordinates]) -> String {
        let coords = locations
            .iter()
            .map(|point| format!("{:.6},{:.6}", point.lng, point.lat))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/table/v1/{}/{}?annotations=duration,distance",
            self.config.base_url, self.config.profile, coords
        )
    }
}

impl DistanceMatrixProvider for OsrmClient {
    fn matrix_for(&self, locations: &[Coordinates]) -> Result<DistanceMatrix, MatrixError> {
        if locations.is_empty() {
            return Ok(DistanceMatrix::default());
        }

        let url = self.table_url(locations);
        debug!(points = locations.len(), %url, "requesting OSRM table");

        let body = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .json::<OsrmTableResponse>()?;

        body.into_matrix(locations.len())
    }
}

#[derive(Debug, Deserialize)]
struct OsrmTableResponse {
    code: String,
    durations: Option<Vec<Vec<Option<f64>>>>,
    distances: Option<Vec<Vec<Option<f64>>>>,
}

impl OsrmTableResponse {
    fn into_matrix(self, expected: usize) -> Result<DistanceMatrix, MatrixError> {
        if self.code != "Ok" {
            return Err(MatrixError::Service(self.code));
        }

        let (Some(durations), Some(distances)) = (self.durations, self.distances) else {
            return Err(MatrixError::Service("missing annotations".to_string()));
        };

        if durations.len() != expected || distances.len() != expected {
            return Err(MatrixError::Dimension {
                expected,
                actual: durations.len().min(distances.len()),
            });
        }

        // Null cells mean OSRM found no route; they stay in place as
        // not-found entries so indexes keep lining up.
        let rows = distances
            .into_iter()
            .zip(durations)
            .map(|(distance_row, duration_row)| {
                distance_row
                    .into_iter()
                    .zip(duration_row)
                    .map(|cell| match cell {
                        (Some(meters), Some(seconds)) => MatrixEntry::ok(meters, seconds),
                        _ => MatrixEntry::unreachable(),
                    })
                    .collect()
            })
            .collect();

        Ok(DistanceMatrix::from_rows(rows))
    }
}
