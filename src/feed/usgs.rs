//! USGS real-time summary feeds over HTTP.

use log::{debug, info};
use reqwest::blocking::Client;
use std::time::Duration;

use crate::core::config::FeedConfig;
use crate::core::error::FeedError;
use crate::core::event::Event;

use super::geojson::decode;
use super::EventSource;

/// Base URL of the USGS GeoJSON summary feeds
pub const USGS_SUMMARY_BASE: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

/// Time window covered by a summary feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FeedPeriod {
    Hour,
    #[default]
    Day,
    Week,
    Month,
}

/// Minimum magnitude of a summary feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FeedLevel {
    #[default]
    #[value(name = "all")]
    All,
    #[value(name = "1.0")]
    M1,
    #[value(name = "2.5")]
    M2_5,
    #[value(name = "4.5")]
    M4_5,
    #[value(name = "significant")]
    Significant,
}

impl FeedPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedPeriod::Hour => "hour",
            FeedPeriod::Day => "day",
            FeedPeriod::Week => "week",
            FeedPeriod::Month => "month",
        }
    }
}

impl FeedLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedLevel::All => "all",
            FeedLevel::M1 => "1.0",
            FeedLevel::M2_5 => "2.5",
            FeedLevel::M4_5 => "4.5",
            FeedLevel::Significant => "significant",
        }
    }

    /// Summary feed URL for this level over `period`
    pub fn url(&self, period: FeedPeriod) -> String {
        format!(
            "{}/{}_{}.geojson",
            USGS_SUMMARY_BASE,
            self.as_str(),
            period.as_str()
        )
    }
}

/// Blocking HTTP client for a GeoJSON feed
pub struct HttpFeed {
    client: Client,
    url: String,
}

impl HttpFeed {
    /// Create a client for `url` with a request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quakeswarm/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &FeedConfig) -> Result<Self, FeedError> {
        Self::new(
            config.url.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download the raw document
    pub fn fetch(&self) -> Result<String, FeedError> {
        info!("Downloading dataset from {}", self.url);

        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.text()?;
        debug!("Received {} bytes", body.len());
        Ok(body)
    }
}

impl EventSource for HttpFeed {
    fn load_events(&self) -> Result<Vec<Event>, FeedError> {
        let body = self.fetch()?;
        Ok(decode(&body)?.events)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_feed_is_all_day() {
        assert_eq!(
            FeedLevel::default().url(FeedPeriod::default()),
            "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_day.geojson"
        );
    }

    #[test]
    fn test_magnitude_levels() {
        assert_eq!(
            FeedLevel::M2_5.url(FeedPeriod::Week),
            "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/2.5_week.geojson"
        );
        assert!(FeedLevel::Significant
            .url(FeedPeriod::Month)
            .ends_with("/significant_month.geojson"));
        assert!(FeedLevel::M1.url(FeedPeriod::Hour).ends_with("/1.0_hour.geojson"));
    }

    #[test]
    fn test_from_config_keeps_url() {
        let config = FeedConfig {
            url: "http://localhost:9/feed.geojson".to_string(),
            timeout_seconds: 5,
        };
        let feed = HttpFeed::from_config(&config).unwrap();
        assert_eq!(feed.url(), "http://localhost:9/feed.geojson");
        assert_eq!(feed.describe(), "http://localhost:9/feed.geojson");
    }
}
