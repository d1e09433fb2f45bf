//! Domain types for tickersheet

pub mod article;
pub mod bar;
pub mod enriched;

pub use article::Article;
pub use bar::Bar;
pub use enriched::{EnrichedBar, INDICATOR_COLUMNS};
