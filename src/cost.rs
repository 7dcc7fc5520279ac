//! Linear route cost estimation.

use serde::{Deserialize, Serialize};

use crate::solver::OptimizedRoute;

/// Per-business cost rates. `currency` is carried for display only and is
/// never applied here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSettings {
    pub cost_per_km: f64,
    pub cost_per_hour: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "BRL".to_string()
}

impl Default for CostSettings {
    fn default() -> Self {
        Self {
            cost_per_km: 0.0,
            cost_per_hour: 0.0,
            currency: default_currency(),
        }
    }
}

impl CostSettings {
    pub fn new(cost_per_km: f64, cost_per_hour: f64) -> Self {
        Self {
            cost_per_km,
            cost_per_hour,
            ..Self::default()
        }
    }

    /// `distance_km * cost_per_km + (duration_minutes / 60) * cost_per_hour`.
    /// Unrounded.
    pub fn estimate(&self, distance_km: f64, duration_minutes: f64) -> f64 {
        distance_km * self.cost_per_km + (duration_minutes / 60.0) * self.cost_per_hour
    }
}

/// Fleet-wide totals for one planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    /// Cost of each route, in route order.
    pub route_costs: Vec<f64>,
    pub total_distance_km: f64,
    pub total_duration_minutes: f64,
    /// Cost of the aggregate distance and duration.
    pub total_cost: f64,
}

impl FleetSummary {
    pub fn from_routes<D, S>(routes: &[OptimizedRoute<D, S>], settings: &CostSettings) -> Self {
        let route_costs = routes.iter().map(|route| route.cost(settings)).collect();
        let total_distance_km: f64 = routes.iter().map(|route| route.distance_km).sum();
        let total_duration_minutes: f64 = routes.iter().map(|route| route.duration_minutes).sum();

        Self {
            route_costs,
            total_distance_km,
            total_duration_minutes,
            total_cost: settings.estimate(total_distance_km, total_duration_minutes),
        }
    }
}
