//! Concrete stop and driver models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::traits::{Driver, Stop};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Planar distance on raw degrees. Only meaningful at local scale.
    pub fn planar_distance(&self, other: &Coordinates) -> f64 {
        let d_lat = self.lat - other.lat;
        let d_lng = self.lng - other.lng;
        (d_lat * d_lat + d_lng * d_lng).sqrt()
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Delivery priority.
///
/// Deserializes leniently: any casing is accepted and unknown text or `null`
/// becomes `Normal`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
    #[default]
    Normal,
}

impl Priority {
    pub fn is_high(self) -> bool {
        matches!(self, Priority::High)
    }

    /// Lenient parse: anything unrecognised is `Normal`.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        value
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for Priority {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Ok(Priority::High),
            "MEDIUM" => Ok(Priority::Medium),
            "LOW" => Ok(Priority::Low),
            "NORMAL" => Ok(Priority::Normal),
            _ => Err(UnknownPriority(s.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
            Priority::Normal => "NORMAL",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Priority::parse_lenient(raw.as_deref()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPriority(pub String);

impl fmt::Display for UnknownPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown priority: {}", self.0)
    }
}

impl std::error::Error for UnknownPriority {}

/// A geocoded delivery stop as handed over by the calling layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryStop {
    pub id: String,
    pub address: String,
    pub client_name: String,
    #[serde(default)]
    pub priority: Priority,
    pub location: Coordinates,
}

impl DeliveryStop {
    pub fn new(id: impl Into<String>, location: Coordinates) -> Self {
        Self {
            id: id.into(),
            address: String::new(),
            client_name: String::new(),
            priority: Priority::Normal,
            location,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_client(mut self, client_name: impl Into<String>, address: impl Into<String>) -> Self {
        self.client_name = client_name.into();
        self.address = address.into();
        self
    }
}

impl Stop for DeliveryStop {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn location(&self) -> Coordinates {
        self.location
    }

    fn priority(&self) -> Priority {
        self.priority
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverInfo {
    pub id: String,
    pub name: String,
}

impl DriverInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Driver for DriverInfo {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
