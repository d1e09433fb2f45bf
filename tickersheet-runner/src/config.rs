//! Pipeline configuration, loaded from TOML.
//!
//! One file describes the symbols, the date range, the sheet store backend,
//! the price source and the news scraper. CLI flags may override the symbol
//! list and the dates after loading.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tickersheet_core::data::news::{
    ArticleSelectors, DEFAULT_DESCRIPTION_SELECTOR, DEFAULT_ITEM_SELECTOR, DEFAULT_TITLE_SELECTOR,
};

use crate::pipeline::{PriceRun, SentimentRun};

pub const DEFAULT_PRICE_SPREADSHEET: &str = "Stock Price Data";
pub const DEFAULT_URL_TEMPLATE: &str = "https://example.com/search?q={query}&from={from}&to={to}";

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineConfig {
    #[serde(default)]
    pub symbols: Vec<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub prices: PricesConfig,
    #[serde(default)]
    pub sentiment: SentimentConfig,
}

/// Which sheet store backend to use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Directory of CSV files per spreadsheet.
    Csv {
        root: PathBuf,
        #[serde(default)]
        create: bool,
    },
    /// Google Sheets. A configured or `GOOGLE_SHEETS_TOKEN` bearer token
    /// takes precedence over the service-account key file.
    Google {
        #[serde(default)]
        access_token: Option<String>,
        #[serde(default)]
        service_account_file: Option<PathBuf>,
    },
    /// In-process store; nothing is persisted.
    Memory,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Csv {
            root: PathBuf::from("sheets"),
            create: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PriceSourceKind {
    #[default]
    Yahoo,
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricesConfig {
    #[serde(default)]
    pub source: PriceSourceKind,
    #[serde(default = "default_price_spreadsheet")]
    pub spreadsheet: String,
    #[serde(default)]
    pub csv_dir: Option<PathBuf>,
    /// Alternate Yahoo host, e.g. a local mirror.
    #[serde(default)]
    pub yahoo_base_url: Option<String>,
}

impl Default for PricesConfig {
    fn default() -> Self {
        Self {
            source: PriceSourceKind::default(),
            spreadsheet: default_price_spreadsheet(),
            csv_dir: None,
            yahoo_base_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SentimentConfig {
    /// Spreadsheet whose sheets are scored.
    #[serde(default = "default_price_spreadsheet")]
    pub spreadsheet: String,
    /// When set, scored tables are written here instead of back in place.
    #[serde(default)]
    pub output_spreadsheet: Option<String>,
    /// Restrict scoring to these sheets; all sheets when absent.
    #[serde(default)]
    pub sheets: Option<Vec<String>>,
    #[serde(default = "default_url_template")]
    pub url_template: String,
    #[serde(default = "default_item_selector")]
    pub item_selector: String,
    #[serde(default = "default_title_selector")]
    pub title_selector: String,
    #[serde(default = "default_description_selector")]
    pub description_selector: String,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            spreadsheet: default_price_spreadsheet(),
            output_spreadsheet: None,
            sheets: None,
            url_template: default_url_template(),
            item_selector: default_item_selector(),
            title_selector: default_title_selector(),
            description_selector: default_description_selector(),
        }
    }
}

impl SentimentConfig {
    pub fn selectors(&self) -> Result<ArticleSelectors, ConfigError> {
        ArticleSelectors::new(
            &self.item_selector,
            &self.title_selector,
            &self.description_selector,
        )
        .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

fn default_price_spreadsheet() -> String {
    DEFAULT_PRICE_SPREADSHEET.to_string()
}

fn default_url_template() -> String {
    DEFAULT_URL_TEMPLATE.to_string()
}

fn default_item_selector() -> String {
    DEFAULT_ITEM_SELECTOR.to_string()
}

fn default_title_selector() -> String {
    DEFAULT_TITLE_SELECTOR.to_string()
}

fn default_description_selector() -> String {
    DEFAULT_DESCRIPTION_SELECTOR.to_string()
}

/// Parse a `YYYY-MM-DD` date given on the command line.
pub fn parse_date(s: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| ConfigError::InvalidDate(s.into()))
}

impl PipelineConfig {
    /// Load and validate a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides. A non-empty `symbols` replaces the list.
    pub fn apply_overrides(
        &mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        symbols: &[String],
    ) -> Result<(), ConfigError> {
        if start.is_some() {
            self.start_date = start;
        }
        if end.is_some() {
            self.end_date = end;
        }
        if !symbols.is_empty() {
            self.symbols = symbols.to_vec();
        }
        self.validate()
    }

    /// Checks that hold for every command.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(blank) = self.symbols.iter().find(|s| s.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "symbols must not be blank (got '{blank}')"
            )));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(ConfigError::Invalid(format!(
                    "end_date {end} is before start_date {start}"
                )));
            }
        }
        if self.prices.source == PriceSourceKind::Csv && self.prices.csv_dir.is_none() {
            return Err(ConfigError::Invalid(
                "prices.csv_dir is required when prices.source = \"csv\"".into(),
            ));
        }
        if self.prices.spreadsheet.trim().is_empty() || self.sentiment.spreadsheet.trim().is_empty()
        {
            return Err(ConfigError::Invalid("spreadsheet names must not be empty".into()));
        }
        if !self.sentiment.url_template.contains("{query}") {
            return Err(ConfigError::Invalid(
                "sentiment.url_template must contain {query}".into(),
            ));
        }
        self.sentiment.selectors()?;
        Ok(())
    }

    /// Resolve the parameters of a price run.
    pub fn price_run(&self) -> Result<PriceRun, ConfigError> {
        if self.symbols.is_empty() {
            return Err(ConfigError::Invalid("no symbols configured".into()));
        }
        let start = self
            .start_date
            .ok_or_else(|| ConfigError::Invalid("start_date is required for prices".into()))?;
        let end = self
            .end_date
            .ok_or_else(|| ConfigError::Invalid("end_date is required for prices".into()))?;
        Ok(PriceRun {
            spreadsheet: self.prices.spreadsheet.clone(),
            symbols: self.symbols.clone(),
            start,
            end,
        })
    }

    /// Resolve the parameters of a sentiment run.
    ///
    /// `sentiment.sheets` wins; otherwise the symbol list restricts the
    /// sheets when non-empty; otherwise every sheet is scored.
    pub fn sentiment_run(&self) -> SentimentRun {
        let sheets = match &self.sentiment.sheets {
            Some(sheets) => Some(sheets.clone()),
            None if !self.symbols.is_empty() => Some(self.symbols.clone()),
            None => None,
        };
        SentimentRun {
            spreadsheet: self.sentiment.spreadsheet.clone(),
            output_spreadsheet: self.sentiment.output_spreadsheet.clone(),
            sheets,
        }
    }
}
