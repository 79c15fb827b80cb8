use thiserror::Error;

/// Errors raised by the clustering core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SwarmError {
    /// Clustering parameters that cannot produce a meaningful result
    #[error("Invalid clustering configuration: {0}")]
    InvalidConfig(String),

    /// An event handed to the core violates its input contract
    #[error("Malformed event at index {index}: {reason}")]
    MalformedEvent { index: usize, reason: String },

    /// Centroid relaxation hit the iteration cap without stabilizing
    #[error("Swarm did not converge for seed at index {seed_index} after {iterations} iterations")]
    NonConvergence { seed_index: usize, iterations: usize },
}

/// Errors raised while fetching or decoding an event feed
#[derive(Error, Debug)]
pub enum FeedError {
    /// Transport-level HTTP failures
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed answered with a non-success status
    #[error("Feed request to {url} failed with status {status}")]
    Status { status: u16, url: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON
    #[error("Failed to parse feed: {0}")]
    Parse(#[from] serde_json::Error),

    /// Valid JSON that is not a point-feature collection
    #[error("Invalid feed document: {0}")]
    InvalidDocument(String),
}

impl SwarmError {
    /// Convenience to construct a MalformedEvent error
    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        SwarmError::MalformedEvent {
            index,
            reason: reason.into(),
        }
    }
}
