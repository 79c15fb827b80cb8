//! Decoding of GeoJSON point-feature collections (USGS summary feed layout).
//!
//! Each feature carries `geometry.coordinates = [longitude, latitude, depth]`
//! and `properties.mag`. Features with a missing or non-finite value are
//! skipped and counted rather than failing the whole document.

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::Value as JsonValue;

use crate::core::error::{FeedError, SwarmError};
use crate::core::event::Event;

/// Top-level GeoJSON document
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub metadata: Option<FeedMetadata>,

    /// Kept unparsed so one bad feature cannot fail the whole document
    #[serde(default)]
    pub features: Vec<Box<RawValue>>,
}

/// USGS feed metadata block
#[derive(Debug, Clone, Deserialize)]
pub struct FeedMetadata {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    /// GeoJSON allows string or numeric ids
    #[serde(default)]
    pub id: Option<JsonValue>,

    #[serde(default)]
    pub properties: Option<Properties>,

    #[serde(default)]
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Properties {
    #[serde(default)]
    pub mag: Option<f64>,

    #[serde(default)]
    pub place: Option<String>,

    /// Origin time in milliseconds since the Unix epoch
    #[serde(default)]
    pub time: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub coordinates: Vec<Option<f64>>,
}

/// Result of decoding a feed document
#[derive(Debug, Clone, Default)]
pub struct DecodedFeed {
    /// Feed title, when the document has one
    pub title: Option<String>,

    /// Accepted events, in document order
    pub events: Vec<Event>,

    /// Features rejected as malformed
    pub skipped: usize,
}

/// Parse and decode a GeoJSON document
pub fn decode(text: &str) -> Result<DecodedFeed, FeedError> {
    let collection: FeatureCollection = serde_json::from_str(text)?;
    decode_collection(collection)
}

/// Turn a parsed collection into events, skipping malformed features
pub fn decode_collection(collection: FeatureCollection) -> Result<DecodedFeed, FeedError> {
    if collection.kind != "FeatureCollection" {
        return Err(FeedError::InvalidDocument(format!(
            "expected a FeatureCollection, found {}",
            collection.kind
        )));
    }

    let mut decoded = DecodedFeed {
        title: collection.metadata.and_then(|m| m.title),
        ..DecodedFeed::default()
    };

    for (index, raw) in collection.features.iter().enumerate() {
        let feature = match serde_json::from_str::<Feature>(raw.get()) {
            Ok(feature) => feature,
            Err(e) => {
                warn!("Skipping feature {}: {}", index, e);
                decoded.skipped += 1;
                continue;
            }
        };
        match feature_to_event(index, &feature) {
            Ok(event) => decoded.events.push(event),
            Err(e) => {
                warn!("Skipping feature {}: {}", index, e);
                decoded.skipped += 1;
            }
        }
    }

    info!(
        "Decoded {} events ({} malformed features skipped)",
        decoded.events.len(),
        decoded.skipped
    );
    Ok(decoded)
}

fn feature_to_event(index: usize, feature: &Feature) -> Result<Event, SwarmError> {
    let geometry = feature
        .geometry
        .as_ref()
        .ok_or_else(|| SwarmError::malformed(index, "missing geometry"))?;
    if geometry.kind != "Point" {
        return Err(SwarmError::malformed(
            index,
            format!("unsupported geometry type {}", geometry.kind),
        ));
    }

    let coordinate = |position: usize, name: &str| {
        geometry
            .coordinates
            .get(position)
            .copied()
            .flatten()
            .ok_or_else(|| SwarmError::malformed(index, format!("missing {}", name)))
    };
    let longitude = coordinate(0, "longitude")?;
    let latitude = coordinate(1, "latitude")?;
    let depth = coordinate(2, "depth")?;

    let properties = feature
        .properties
        .as_ref()
        .ok_or_else(|| SwarmError::malformed(index, "missing properties"))?;
    let magnitude = properties
        .mag
        .ok_or_else(|| SwarmError::malformed(index, "missing magnitude"))?;

    let mut event = Event::new(longitude, latitude, depth, magnitude);
    event.validate(index)?;

    event.id = feature.id.as_ref().map(|id| match id {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    });
    event.place = properties.place.clone();
    event.time = properties.time.and_then(DateTime::<Utc>::from_timestamp_millis);

    Ok(event)
}
