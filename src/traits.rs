//! Core domain traits for the delivery planner.
//!
//! The optimizer only needs a location and a priority from each stop, and
//! only an id from each driver. Callers implement these for their own models
//! or use the ready-made types in [`crate::models`].

use std::hash::Hash;

use crate::error::MatrixError;
use crate::matrix::DistanceMatrix;
use crate::models::{Coordinates, Priority};

/// Unique identifier for planner entities.
pub trait Id: Clone + Eq + Hash {}

impl<T> Id for T where T: Clone + Eq + Hash {}

/// A delivery stop to be sequenced.
pub trait Stop {
    type Id: Id;

    fn id(&self) -> &Self::Id;

    /// Location coordinates (lat, lng).
    fn location(&self) -> Coordinates;

    fn priority(&self) -> Priority;
}

/// A driver. Used only to label the route it receives.
pub trait Driver {
    type Id: Id;

    fn id(&self) -> &Self::Id;
}

/// Provides a distance/duration matrix for a set of locations.
///
/// The matrix is indexed by the provided location order, so a depot-first
/// location list yields a depot-first matrix.
pub trait DistanceMatrixProvider {
    fn matrix_for(&self, locations: &[Coordinates]) -> Result<DistanceMatrix, MatrixError>;
}
