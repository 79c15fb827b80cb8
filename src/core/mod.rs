//! Shared configuration, error types, and the event data model.

pub mod config;
pub mod error;
pub mod event;

pub use config::{ClusteringConfig, Config, FeedConfig, OutputConfig};
pub use error::{FeedError, SwarmError};
pub use event::{Event, GeoPoint};
