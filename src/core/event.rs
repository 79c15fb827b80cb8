//! Point events and geographic coordinates shared by every pipeline stage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::SwarmError;
use crate::swarm::distance::distance_km;

/// A (latitude, longitude) pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another point in kilometers
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        distance_km(*self, *other)
    }
}

/// A single seismic event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Longitude in degrees
    pub longitude: f64,

    /// Latitude in degrees
    pub latitude: f64,

    /// Depth in kilometers (negative above sea level)
    pub depth: f64,

    /// Magnitude on whatever scale the feed reports
    pub magnitude: f64,

    /// Feed identifier, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Human-readable location description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,

    /// Origin time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

impl Event {
    /// Create an event with no descriptive metadata
    pub fn new(longitude: f64, latitude: f64, depth: f64, magnitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            depth,
            magnitude,
            id: None,
            place: None,
            time: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = Some(place.into());
        self
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }

    /// Epicenter of the event
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Check that every numeric field is finite
    pub fn validate(&self, index: usize) -> Result<(), SwarmError> {
        let fields = [
            ("longitude", self.longitude),
            ("latitude", self.latitude),
            ("depth", self.depth),
            ("magnitude", self.magnitude),
        ];

        for (name, value) in fields {
            if !value.is_finite() {
                return Err(SwarmError::malformed(
                    index,
                    format!("{} is not finite ({})", name, value),
                ));
            }
        }

        Ok(())
    }
}
