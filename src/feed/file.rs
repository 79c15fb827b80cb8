use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::FeedError;
use crate::core::event::Event;

use super::geojson::decode;
use super::EventSource;

/// Reads a GeoJSON feed saved to disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl EventSource for FileSource {
    fn load_events(&self) -> Result<Vec<Event>, FeedError> {
        info!("Reading dataset from {:?}", self.path);
        let text = fs::read_to_string(&self.path)?;
        Ok(decode(&text)?.events)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
