//! Swarm detection: proximity filtering, centroid relaxation, culling and statistics.

pub mod builder;
pub mod cull;
pub mod distance;
pub mod filter;
pub mod pipeline;
pub mod statistics;

pub use builder::{build_swarms, Partition, Swarm, SwarmBuilder};
pub use cull::cull;
pub use distance::{distance_km, EARTH_RADIUS_KM};
pub use filter::{filter_isolated, relevant_indices};
pub use pipeline::{detect_swarms, PipelineOutput, SwarmPipeline};
pub use statistics::{annotate, AnnotatedSwarm, Statistics, Summary};
