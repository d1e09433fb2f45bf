//! Upstream data: daily price bars and news articles.

pub mod canonicalize;
pub mod csv_source;
pub mod news;
pub mod provider;
pub mod yahoo;

pub use canonicalize::canonicalize;
pub use csv_source::CsvPriceSource;
pub use news::{parse_articles, ArticleSelectors, HtmlNewsSource, NewsSource};
pub use provider::{DataError, PriceSource};
pub use yahoo::YahooPriceSource;
