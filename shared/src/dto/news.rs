//! # News Records

use serde::{Deserialize, Serialize};

/// Category tag of a news article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NewsCategory {
    Scheme,
    Market,
    Tech,
    Weather,
}

impl NewsCategory {
    pub fn label(&self) -> &'static str {
        match self {
            NewsCategory::Scheme => "Scheme",
            NewsCategory::Market => "Market",
            NewsCategory::Tech => "Tech",
            NewsCategory::Weather => "Weather",
        }
    }
}

/// Dashboard feed filter. `All` shows every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NewsFilter {
    #[default]
    All,
    Only(NewsCategory),
}

impl NewsFilter {
    /// Filter chips in display order
    pub fn all() -> &'static [NewsFilter] {
        &[
            NewsFilter::All,
            NewsFilter::Only(NewsCategory::Scheme),
            NewsFilter::Only(NewsCategory::Market),
            NewsFilter::Only(NewsCategory::Tech),
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            NewsFilter::All => "All",
            NewsFilter::Only(category) => category.label(),
        }
    }

    pub fn matches(&self, article: &NewsArticle) -> bool {
        match self {
            NewsFilter::All => true,
            NewsFilter::Only(category) => article.category == *category,
        }
    }
}

/// One entry of the agriculture news feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub source: String,
    /// Relative label such as `2 hours ago`
    pub published_at: String,
    /// External link; `#` when the article has none
    pub url: String,
    pub category: NewsCategory,
}

impl NewsArticle {
    pub fn has_link(&self) -> bool {
        !self.url.is_empty() && self.url != "#"
    }
}
