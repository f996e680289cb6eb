//! Loading the events feed.
//!
//! The feed is a JSON array of events, either on disk or behind an
//! http(s) URL. Callers that only display events use
//! [`load_feed_or_empty`], which turns every failure into an empty set.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::{CommCalError, CommCalResult};
use crate::event::Event;

/// Where the feed comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Url(String),
    File(PathBuf),
}

impl FeedSource {
    /// `http://` and `https://` sources are URLs, anything else is a path.
    /// A leading `~` in paths is expanded.
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            FeedSource::Url(source.to_string())
        } else {
            FeedSource::File(PathBuf::from(shellexpand::tilde(source).into_owned()))
        }
    }

    fn name(&self) -> String {
        match self {
            FeedSource::Url(url) => url.clone(),
            FeedSource::File(path) => path.display().to_string(),
        }
    }
}

/// Parse feed JSON into events
pub fn parse_feed(json: &str) -> CommCalResult<Vec<Event>> {
    Ok(serde_json::from_str(json)?)
}

/// Load and parse the feed, propagating any failure.
pub async fn load_feed(source: &FeedSource) -> CommCalResult<Vec<Event>> {
    let feed_error = |message: String| CommCalError::Feed {
        source_name: source.name(),
        message,
    };

    let json = match source {
        FeedSource::Url(url) => {
            let response = reqwest::get(url)
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| feed_error(e.to_string()))?;
            response.text().await.map_err(|e| feed_error(e.to_string()))?
        }
        FeedSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| feed_error(e.to_string()))?,
    };

    let events = parse_feed(&json)?;
    debug!(source = %source.name(), count = events.len(), "Loaded event feed");

    Ok(events)
}

/// Load the feed, degrading to an empty event set on failure.
pub async fn load_feed_or_empty(source: &FeedSource) -> Vec<Event> {
    match load_feed(source).await {
        Ok(events) => events,
        Err(e) => {
            warn!("{e}; showing no events");
            Vec::new()
        }
    }
}
