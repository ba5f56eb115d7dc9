//! Trait and types for a store that serves app reviews.

use anyhow::Result;
use chrono::{DateTime, Utc};

/// Review ordering supported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    MostRelevant,
    Newest,
    Rating,
}

impl SortOrder {
    /// Numeric code the store's RPC expects.
    pub fn code(self) -> u8 {
        match self {
            SortOrder::MostRelevant => 1,
            SortOrder::Newest => 2,
            SortOrder::Rating => 3,
        }
    }
}

/// Parameters for a single review request against one regional store.
#[derive(Debug, Clone)]
pub struct ReviewQuery {
    pub app_id: String,
    pub lang: String,
    pub country: String,
    pub sort: SortOrder,
    pub count: usize,
}

/// One review as returned by the store, before any tagging.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreReview {
    pub review_id: String,
    pub user_name: Option<String>,
    pub content: Option<String>,
    pub score: Option<u8>,
    pub thumbs_up_count: Option<u64>,
    pub review_created_version: Option<String>,
    pub at: Option<DateTime<Utc>>,
    pub reply_content: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
    pub app_version: Option<String>,
}

/// Abstraction over a review provider (e.g., Google Play).
#[async_trait::async_trait]
pub trait ReviewSource: Send + Sync {
    /// Returns up to `query.count` reviews for `query.app_id`.
    async fn fetch_reviews(&self, query: &ReviewQuery) -> Result<Vec<StoreReview>>;
}
