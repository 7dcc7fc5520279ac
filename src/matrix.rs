//! Precomputed distance/duration matrix with a non-failing leg lookup.
//!
//! Index 0 is always the depot; index `i + 1` is the `i`-th stop in the order
//! the stops were originally supplied. Reordering a route never changes this
//! mapping.

use serde::{Deserialize, Serialize};

/// Distance charged for a leg that is missing, out of range or not OK.
pub const UNREACHABLE_METERS: f64 = 1.0e9;

/// Duration charged for a leg that is missing, out of range or not OK.
pub const UNREACHABLE_SECONDS: f64 = 1.0e9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    Ok,
    NotFound,
    ZeroResults,
}

/// One directed origin/destination cell as supplied by a matrix provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixEntry {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub distance_text: String,
    pub duration_text: String,
    pub status: EntryStatus,
}

impl MatrixEntry {
    pub fn ok(distance_meters: f64, duration_seconds: f64) -> Self {
        Self {
            distance_meters,
            duration_seconds,
            distance_text: format_distance(distance_meters),
            duration_text: format_duration(duration_seconds),
            status: EntryStatus::Ok,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            distance_meters: 0.0,
            duration_seconds: 0.0,
            distance_text: String::new(),
            duration_text: String::new(),
            status: EntryStatus::NotFound,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == EntryStatus::Ok
    }
}

/// The cost of travelling one leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegCost {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl LegCost {
    pub const ZERO: LegCost = LegCost {
        distance_meters: 0.0,
        duration_seconds: 0.0,
    };

    pub const UNREACHABLE: LegCost = LegCost {
        distance_meters: UNREACHABLE_METERS,
        duration_seconds: UNREACHABLE_SECONDS,
    };

    pub fn is_unreachable(&self) -> bool {
        self.distance_meters >= UNREACHABLE_METERS || self.duration_seconds >= UNREACHABLE_SECONDS
    }
}

/// Square, directed distance/duration matrix. Not assumed symmetric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    rows: Vec<Vec<MatrixEntry>>,
}

impl DistanceMatrix {
    /// Wraps provider rows as-is. Ragged or short rows are tolerated and
    /// resolve to [`LegCost::UNREACHABLE`] on lookup.
    pub fn from_rows(rows: Vec<Vec<MatrixEntry>>) -> Self {
        Self { rows }
    }

    pub fn from_fn<F>(size: usize, mut entry: F) -> Self
    where
        F: FnMut(usize, usize) -> MatrixEntry,
    {
        let rows = (0..size)
            .map(|from| (0..size).map(|to| entry(from, to)).collect())
            .collect();
        Self { rows }
    }

    /// Number of rows, i.e. points including the depot.
    pub fn dimension(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<MatrixEntry>] {
        &self.rows
    }

    pub fn entry(&self, from: usize, to: usize) -> Option<&MatrixEntry> {
        self.rows.get(from).and_then(|row| row.get(to))
    }

    /// Cost of the leg `from -> to`.
    ///
    /// Never panics: out-of-range indices, non-OK entries and entries with
    /// non-finite or negative values all yield [`LegCost::UNREACHABLE`], so
    /// one bad cell penalises a route instead of aborting planning.
    pub fn lookup(&self, from: usize, to: usize) -> LegCost {
        match self.entry(from, to) {
            Some(entry) if is_usable(entry) => LegCost {
                distance_meters: entry.distance_meters,
                duration_seconds: entry.duration_seconds,
            },
            _ => LegCost::UNREACHABLE,
        }
    }

    /// Distance-only shorthand for [`DistanceMatrix::lookup`].
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.lookup(from, to).distance_meters
    }

    /// Restricts the matrix to the depot plus the given stops.
    ///
    /// `stop_indexes` are 0-based stop positions in this matrix's stop order;
    /// row/column 0 of the result is the depot and row `i + 1` is
    /// `stop_indexes[i]`.
    pub fn submatrix(&self, stop_indexes: &[usize]) -> DistanceMatrix {
        let points: Vec<usize> = std::iter::once(0)
            .chain(stop_indexes.iter().map(|index| index + 1))
            .collect();

        let rows = points
            .iter()
            .map(|&from| {
                points
                    .iter()
                    .map(|&to| {
                        self.entry(from, to)
                            .cloned()
                            .unwrap_or_else(MatrixEntry::unreachable)
                    })
                    .collect()
            })
            .collect();

        DistanceMatrix { rows }
    }
}

fn is_usable(entry: &MatrixEntry) -> bool {
    let valid = |value: f64| value.is_finite() && value >= 0.0;
    entry.is_ok() && valid(entry.distance_meters) && valid(entry.duration_seconds)
}

/// Human-readable distance, e.g. `"850m"` or `"12.3km"`.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{}m", meters.round() as i64)
    } else {
        format!("{:.1}km", meters / 1000.0)
    }
}

/// Human-readable duration, e.g. `"25min"` or `"1h 5min"`.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0);
    let hours = (total / 3600.0).floor() as u64;
    let minutes = ((total % 3600.0) / 60.0).floor() as u64;

    if hours > 0 {
        format!("{}h {}min", hours, minutes)
    } else {
        format!("{}min", minutes)
    }
}
