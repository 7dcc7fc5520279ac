//! São Paulo locations for realistic test fixtures.
//!
//! Coordinates are approximate neighbourhood centres, good enough for
//! straight-line matrices.

#![allow(dead_code)]

use delivery_planner::haversine::HaversineMatrix;
use delivery_planner::matrix::DistanceMatrix;
use delivery_planner::models::{Coordinates, DeliveryStop, Priority};
use delivery_planner::solver::matrix_for_stops;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }

    pub fn stop(&self) -> DeliveryStop {
        DeliveryStop::new(self.name, self.coords()).with_client(self.name, format!("{}, São Paulo", self.name))
    }

    pub fn high_priority_stop(&self) -> DeliveryStop {
        self.stop().with_priority(Priority::High)
    }
}

// ============================================================================
// Depot
// ============================================================================

pub const DEPOT: Location = Location::new("Barra Funda", -23.5254, -46.6671);

// ============================================================================
// West Zone
// ============================================================================

pub const WEST_ZONE: &[Location] = &[
    Location::new("Pinheiros", -23.5670, -46.6930),
    Location::new("Vila Madalena", -23.5536, -46.6910),
    Location::new("Lapa", -23.5206, -46.7035),
    Location::new("Butantã", -23.5716, -46.7085),
];

// ============================================================================
// East Zone
// ============================================================================

pub const EAST_ZONE: &[Location] = &[
    Location::new("Mooca", -23.5587, -46.5993),
    Location::new("Tatuapé", -23.5400, -46.5760),
    Location::new("Penha", -23.5256, -46.5445),
    Location::new("Belém", -23.5433, -46.5890),
];

// ============================================================================
// Central / South Zone
// ============================================================================

pub const CENTRAL_ZONE: &[Location] = &[
    Location::new("Sé", -23.5503, -46.6339),
    Location::new("Paulista", -23.5614, -46.6559),
    Location::new("Ibirapuera", -23.5874, -46.6576),
    Location::new("Moema", -23.6007, -46.6647),
    Location::new("Brooklin", -23.6125, -46.6880),
    Location::new("Ipiranga", -23.5855, -46.6094),
    Location::new("Santana", -23.5029, -46.6253),
    Location::new("Liberdade", -23.5587, -46.6345),
    Location::new("Aclimação", -23.5713, -46.6297),
    Location::new("Bela Vista", -23.5576, -46.6455),
];

/// Six stops alternating west/east, seeds first.
pub fn west_east_stops() -> Vec<DeliveryStop> {
    vec![
        WEST_ZONE[0].stop(),
        EAST_ZONE[0].stop(),
        WEST_ZONE[1].stop(),
        EAST_ZONE[1].stop(),
        WEST_ZONE[2].stop(),
        EAST_ZONE[2].stop(),
    ]
}

pub fn city_stops() -> Vec<DeliveryStop> {
    CENTRAL_ZONE
        .iter()
        .chain(WEST_ZONE)
        .chain(EAST_ZONE)
        .map(Location::stop)
        .collect()
}

/// Depot-first straight-line matrix for `stops`.
pub fn haversine_matrix(stops: &[DeliveryStop]) -> DistanceMatrix {
    matrix_for_stops(&HaversineMatrix::default(), DEPOT.coords(), stops).expect("haversine matrix")
}
