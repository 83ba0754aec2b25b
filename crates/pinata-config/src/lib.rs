use std::env;

use pinata_core::TargetLanguage;
use serde::{Deserialize, Serialize};

use self::fetcher::FetcherConfig;
use self::layout::LayoutConfig;
use self::quota::QuotaConfig;
use self::ui::UiConfig;

pub mod fetcher;
pub mod layout;
pub mod quota;
pub mod ui;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub fetcher: FetcherConfig,
    pub layout: LayoutConfig,
    pub quota: QuotaConfig,
    pub ui: UiConfig,

    /// Language the vocabulary is extracted in
    pub language: TargetLanguage,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetcher: FetcherConfig::default(),
            layout: LayoutConfig::default(),
            quota: QuotaConfig::default(),
            ui: UiConfig::default(),
            language: TargetLanguage::default(),
        }
    }
}

impl Config {
    /// Defaults overridden by the process environment
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env(|key| env::var(key).ok());
        config
    }

    /// Override fields from `lookup`, ignoring values that do not parse
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.fetcher.api_key = key;
        }

        if let Some(url) = lookup("PINATA_API_URL") {
            self.fetcher.api_url = url;
        }

        if let Some(model) = lookup("PINATA_MODEL") {
            self.fetcher.model = model;
        }

        if let Some(timeout) = lookup("PINATA_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
            self.fetcher.timeout_seconds = timeout;
        }

        if let Some(limit) = lookup("PINATA_DAILY_LIMIT").and_then(|v| v.parse().ok()) {
            self.quota.daily_limit = limit;
        }

        if let Some(language) = lookup("PINATA_LANGUAGE").and_then(|v| v.parse().ok()) {
            self.language = language;
        }

        if let Some(width) = lookup("PINATA_DISPLAY_WIDTH").and_then(|v| v.parse().ok()) {
            self.ui.display_width = width;
        }
    }
}
