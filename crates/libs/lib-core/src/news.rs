//! # Agriculture News
//!
//! Dashboard news feed. There is no news backend yet: [`MockNewsFeed`] serves a
//! fixed list per locale after a short simulated latency.

use std::time::Duration;

use async_trait::async_trait;
use shared::{Locale, NewsArticle, NewsCategory};

use crate::error::Result;

pub const NEWS_LATENCY: Duration = Duration::from_millis(800);

#[async_trait]
pub trait NewsFeed: Send + Sync {
    async fn fetch(&self, locale: Locale) -> Result<Vec<NewsArticle>>;
}

pub struct MockNewsFeed {
    latency: Duration,
}

impl MockNewsFeed {
    pub fn new() -> Self {
        Self {
            latency: NEWS_LATENCY,
        }
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for MockNewsFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NewsFeed for MockNewsFeed {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, locale: Locale) -> Result<Vec<NewsArticle>> {
        tokio::time::sleep(self.latency).await;
        let articles = articles(locale);
        tracing::debug!(count = articles.len(), "News loaded");
        Ok(articles)
    }
}

const PM_KISAN_IMAGE: &str =
    "https://images.unsplash.com/photo-1595113316349-9fa4ee24f884?auto=format&fit=crop&q=80&w=400";
const SOYBEAN_IMAGE: &str =
    "https://images.unsplash.com/photo-1550989460-0adf9ea622e2?auto=format&fit=crop&q=80&w=400";
const DRONE_IMAGE: &str =
    "https://images.unsplash.com/photo-1508614589041-895b88991e3e?auto=format&fit=crop&q=80&w=400";

fn article(
    id: &str,
    title: &str,
    description: &str,
    image_url: &str,
    source: &str,
    published_at: &str,
    url: &str,
    category: NewsCategory,
) -> NewsArticle {
    NewsArticle {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        image_url: image_url.to_string(),
        source: source.to_string(),
        published_at: published_at.to_string(),
        url: url.to_string(),
        category,
    }
}

/// Feed contents for `locale`.
pub fn articles(locale: Locale) -> Vec<NewsArticle> {
    match locale {
        Locale::En => vec![
            article(
                "1",
                "PM-Kisan 17th Installment Released: Check Your Status",
                "The government has released the latest installment of PM-Kisan Samman Nidhi. Over 9 crore farmers to benefit.",
                PM_KISAN_IMAGE,
                "AgriNews India",
                "2 hours ago",
                "https://pmkisan.gov.in/",
                NewsCategory::Scheme,
            ),
            article(
                "2",
                "Soybean Prices Surge in MP Mandis as Demand Increases",
                "Market experts predict a 15% rise in soybean prices over the next month due to export demands.",
                SOYBEAN_IMAGE,
                "Market Pulse",
                "5 hours ago",
                "#",
                NewsCategory::Market,
            ),
            article(
                "3",
                "New Drone Technology for Precision Fertilizer Spraying",
                "How Indian startups are helping farmers reduce fertilizer waste using AI-powered drones.",
                DRONE_IMAGE,
                "Tech Farmer",
                "1 day ago",
                "#",
                NewsCategory::Tech,
            ),
        ],
        Locale::Hi => vec![
            article(
                "1",
                "पीएम-किसान 17वीं किस्त जारी: अपना स्टेटस चेक करें",
                "सरकार ने पीएम-किसान सम्मान निधि की ताजा किस्त जारी कर दी है। 9 करोड़ से अधिक किसानों को लाभ होगा।",
                PM_KISAN_IMAGE,
                "एग्रीन्यूज इंडिया",
                "2 घंटे पहले",
                "https://pmkisan.gov.in/",
                NewsCategory::Scheme,
            ),
            article(
                "2",
                "मांग बढ़ने से एमपी की मंडियों में सोयाबीन की कीमतों में उछाल",
                "बाजार विशेषज्ञों का अनुमान है कि निर्यात मांग के कारण अगले महीने सोयाबीन की कीमतों में 15% की वृद्धि होगी।",
                SOYBEAN_IMAGE,
                "मार्केट पल्स",
                "5 घंटे पहले",
                "#",
                NewsCategory::Market,
            ),
            article(
                "3",
                "सटीक उर्वरक छिड़काव के लिए नई ड्रोन तकनीक",
                "भारतीय स्टार्टअप एआई-संचालित ड्रोन का उपयोग करके किसानों को उर्वरक बर्बादी कम करने में कैसे मदद कर रहे हैं।",
                DRONE_IMAGE,
                "टेक फार्मर",
                "1 दिन पहले",
                "#",
                NewsCategory::Tech,
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::NewsFilter;

    #[tokio::test(start_paused = true)]
    async fn test_feed_waits_then_serves_locale() {
        let feed = MockNewsFeed::new();
        let start = tokio::time::Instant::now();
        let articles = feed.fetch(Locale::Hi).await.unwrap();

        assert!(start.elapsed() >= NEWS_LATENCY);
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].source, "एग्रीन्यूज इंडिया");
    }

    #[test]
    fn test_locales_share_ids_and_categories() {
        let en = articles(Locale::En);
        let hi = articles(Locale::Hi);
        for (a, b) in en.iter().zip(hi.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.category, b.category);
            assert_eq!(a.image_url, b.image_url);
        }
    }

    #[test]
    fn test_filter_and_links() {
        let en = articles(Locale::En);
        let market: Vec<_> = en
            .iter()
            .filter(|a| NewsFilter::Only(NewsCategory::Market).matches(a))
            .collect();
        assert_eq!(market.len(), 1);
        assert!(!market[0].has_link());
        assert!(en[0].has_link());
    }
}
