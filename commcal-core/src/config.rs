//! Site configuration.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::{CommCalError, CommCalResult};
use crate::feed::FeedSource;
use crate::ics::IcsOptions;
use crate::timezone::{DEFAULT_UTC_OFFSET_MINUTES, FixedOffsetResolver};

static DEFAULT_SITE_NAME: &str = "community";
static DEFAULT_DOMAIN: &str = "community.local";
static DEFAULT_FEED: &str = "events/events.json";

fn default_site_name() -> String {
    DEFAULT_SITE_NAME.to_string()
}

fn default_domain() -> String {
    DEFAULT_DOMAIN.to_string()
}

fn default_feed() -> String {
    DEFAULT_FEED.to_string()
}

fn default_utc_offset_minutes() -> i32 {
    DEFAULT_UTC_OFFSET_MINUTES
}

/// Configuration at ~/.config/commcal/config.toml
///
/// Every key can be overridden with a `COMMCAL_` environment variable,
/// e.g. `COMMCAL_FEED=https://example.org/events.json`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Prefix of exported file names and calendar name
    #[serde(default = "default_site_name")]
    pub site_name: String,

    /// Suffix appended to event UIDs in calendar files
    #[serde(default = "default_domain")]
    pub domain: String,

    /// Events feed, a path or an http(s) URL
    #[serde(default = "default_feed")]
    pub feed: String,

    /// Offset used for every event in the UTC calendar export
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            site_name: default_site_name(),
            domain: default_domain(),
            feed: default_feed(),
            utc_offset_minutes: default_utc_offset_minutes(),
        }
    }
}

impl SiteConfig {
    pub fn config_path() -> CommCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CommCalError::Config("Could not determine config directory".into()))?
            .join("commcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location. A missing file means defaults.
    pub fn load() -> CommCalResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> CommCalResult<Self> {
        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("COMMCAL").try_parsing(true))
            .build()
            .map_err(|e| CommCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CommCalError::Config(e.to_string()))
    }

    pub fn feed_source(&self) -> FeedSource {
        FeedSource::parse(&self.feed)
    }

    pub fn fixed_offset(&self) -> CommCalResult<FixedOffsetResolver> {
        FixedOffsetResolver::from_minutes(self.utc_offset_minutes)
    }

    pub fn ics_options(&self, generated_at: DateTime<Utc>) -> IcsOptions {
        IcsOptions {
            site_name: self.site_name.clone(),
            domain: self.domain.clone(),
            generated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "site_name = \"rustaceans\"\n\
             domain = \"rustaceans.example.org\"\n\
             utc_offset_minutes = -360\n",
        )
        .unwrap();

        let config = SiteConfig::load_from(&path).unwrap();

        assert_eq!(config.site_name, "rustaceans");
        assert_eq!(config.domain, "rustaceans.example.org");
        assert_eq!(config.feed, DEFAULT_FEED);
        assert_eq!(config.fixed_offset().unwrap().offset().local_minus_utc(), -360 * 60);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "utc_offset_minutes = \"soon\"\n").unwrap();

        assert!(matches!(
            SiteConfig::load_from(&path),
            Err(CommCalError::Config(_))
        ));
    }
}
