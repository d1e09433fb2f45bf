//! News sources: article title/description pairs for a symbol and date range.
//!
//! `HtmlNewsSource` scrapes a search-results page whose URL is built from a
//! template and whose items are located with CSS selectors.

use super::provider::DataError;
use crate::domain::Article;
use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::debug;

/// Trait for news sources.
///
/// An empty result means "no sentiment signal" for the range, not an error.
pub trait NewsSource: Send + Sync {
    fn name(&self) -> &str;

    /// Articles published in `[from, to)`.
    fn fetch_articles(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Article>, DataError>;
}

/// Default selectors for a `div.news-item` / `h2` / `p` results page.
pub const DEFAULT_ITEM_SELECTOR: &str = "div.news-item";
pub const DEFAULT_TITLE_SELECTOR: &str = "h2";
pub const DEFAULT_DESCRIPTION_SELECTOR: &str = "p";

/// Compiled CSS selectors for one results-page layout.
#[derive(Debug, Clone)]
pub struct ArticleSelectors {
    item: Selector,
    title: Selector,
    description: Selector,
}

impl ArticleSelectors {
    pub fn new(item: &str, title: &str, description: &str) -> Result<Self, DataError> {
        Ok(Self {
            item: compile(item)?,
            title: compile(title)?,
            description: compile(description)?,
        })
    }
}

impl Default for ArticleSelectors {
    fn default() -> Self {
        Self::new(
            DEFAULT_ITEM_SELECTOR,
            DEFAULT_TITLE_SELECTOR,
            DEFAULT_DESCRIPTION_SELECTOR,
        )
        .expect("default selectors are valid CSS")
    }
}

fn compile(selector: &str) -> Result<Selector, DataError> {
    Selector::parse(selector).map_err(|e| DataError::InvalidSelector {
        selector: selector.to_string(),
        reason: format!("{e:?}"),
    })
}

/// Whitespace-collapsed text content of an element.
fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract articles from a results page.
///
/// Items without a (non-empty) title are skipped; a missing description
/// becomes an empty string.
pub fn parse_articles(html: &str, selectors: &ArticleSelectors) -> Vec<Article> {
    let doc = Html::parse_document(html);
    doc.select(&selectors.item)
        .filter_map(|item| {
            let title = item
                .select(&selectors.title)
                .next()
                .map(element_text)
                .filter(|t| !t.is_empty())?;
            let description = item
                .select(&selectors.description)
                .next()
                .map(element_text)
                .unwrap_or_default();
            Some(Article { title, description })
        })
        .collect()
}

/// Fill `{query}`, `{from}` and `{to}` in a URL template.
pub fn render_url(template: &str, symbol: &str, from: NaiveDate, to: NaiveDate) -> String {
    template
        .replace("{query}", symbol)
        .replace("{from}", &from.format("%Y-%m-%d").to_string())
        .replace("{to}", &to.format("%Y-%m-%d").to_string())
}

/// Scrapes articles from an HTML search page.
pub struct HtmlNewsSource {
    client: reqwest::blocking::Client,
    url_template: String,
    selectors: ArticleSelectors,
}

impl HtmlNewsSource {
    pub fn new(
        url_template: impl Into<String>,
        selectors: ArticleSelectors,
    ) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            url_template: url_template.into(),
            selectors,
        })
    }
}

impl NewsSource for HtmlNewsSource {
    fn name(&self) -> &str {
        "html_scraper"
    }

    fn fetch_articles(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Article>, DataError> {
        let raw = render_url(&self.url_template, symbol, from, to);
        let url = reqwest::Url::parse(&raw)
            .map_err(|e| DataError::SourceUnavailable(format!("bad news URL '{raw}': {e}")))?;

        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DataError::SourceUnavailable(format!(
                "HTTP {status} fetching news for {symbol}"
            )));
        }
        let body = resp.text()?;
        let articles = parse_articles(&body, &self.selectors);
        debug!(%symbol, %from, %to, count = articles.len(), "fetched articles");
        Ok(articles)
    }
}
