//! Primary/fallback matrix provider chain.

use tracing::warn;

use crate::error::MatrixError;
use crate::matrix::DistanceMatrix;
use crate::models::Coordinates;
use crate::traits::DistanceMatrixProvider;

/// Asks `primary` first and falls back to `fallback` when it fails.
///
/// Typical use is a road-network service backed by [`crate::haversine::HaversineMatrix`].
/// `primary` may be `None` when no routing service is configured.
#[derive(Debug, Clone)]
pub struct FallbackMatrix<P, F> {
    primary: Option<P>,
    fallback: F,
}

impl<P, F> FallbackMatrix<P, F> {
    pub fn new(primary: Option<P>, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P, F> DistanceMatrixProvider for FallbackMatrix<P, F>
where
    P: DistanceMatrixProvider,
    F: DistanceMatrixProvider,
{
    fn matrix_for(&self, locations: &[Coordinates]) -> Result<DistanceMatrix, MatrixError> {
        let Some(primary) = &self.primary else {
            warn!("no routing service configured, using fallback matrix");
            return self.fallback.matrix_for(locations);
        };

        match primary.matrix_for(locations) {
            Ok(matrix) if matrix.dimension() == locations.len() => Ok(matrix),
            Ok(matrix) => {
                warn!(
                    expected = locations.len(),
                    actual = matrix.dimension(),
                    "primary matrix has wrong dimension, using fallback"
                );
                self.fallback.matrix_for(locations)
            }
            Err(err) => {
                warn!(error = %err, "primary matrix provider failed, using fallback");
                self.fallback.matrix_for(locations)
            }
        }
    }
}
