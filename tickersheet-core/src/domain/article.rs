//! News article: ephemeral input to the sentiment scorer.

use serde::{Deserialize, Serialize};

/// A scraped news item. Only its derived sentiment score is ever stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: String,
}

impl Article {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Text that gets scored: title and description joined by a space.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_joins_title_and_description() {
        let a = Article::new("Shares rally", "Strong quarter.");
        assert_eq!(a.text(), "Shares rally Strong quarter.");
    }
}
