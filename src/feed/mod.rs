//! Event ingestion
//!
//! Sources produce an ordered list of well-formed events. Records that cannot
//! be turned into an [`Event`] are skipped at this boundary, so the clustering
//! core only ever sees complete, finite data.

pub mod file;
pub mod geojson;
pub mod usgs;

pub use file::FileSource;
pub use geojson::{decode, DecodedFeed};
pub use usgs::{FeedLevel, FeedPeriod, HttpFeed};

use crate::core::error::FeedError;
use crate::core::event::Event;

/// Anything that can supply a batch of events
#[cfg_attr(test, mockall::automock)]
pub trait EventSource {
    /// Load the complete batch, in feed order
    fn load_events(&self) -> Result<Vec<Event>, FeedError>;

    /// Short description for logs and error messages
    fn describe(&self) -> String;
}
