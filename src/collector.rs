//! Review collection across the configured store applications.
//!
//! Applications are fetched one after another. Each gets at most two
//! attempts: the primary region, then the fallback region when the first
//! attempt fails or comes back empty.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::config::{PipelineConfig, SourceApp};
use crate::output::write_records;
use crate::services::review_source::{ReviewQuery, ReviewSource, SortOrder, StoreReview};
use crate::stage::StageOutcome;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A collected review tagged with its source application, as written to the
/// raw CSV. Field names follow the store's own naming.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReview {
    pub review_id: String,
    pub user_name: Option<String>,
    pub content: Option<String>,
    pub score: Option<u8>,
    pub thumbs_up_count: Option<u64>,
    pub review_created_version: Option<String>,
    pub at: Option<String>,
    pub reply_content: Option<String>,
    pub replied_at: Option<String>,
    pub app_version: Option<String>,
    #[serde(rename = "bank_name")]
    pub bank_name: String,
    #[serde(rename = "source")]
    pub source: String,
}

fn format_timestamp(ts: Option<DateTime<Utc>>) -> Option<String> {
    ts.map(|t| t.format(TIMESTAMP_FORMAT).to_string())
}

impl RawReview {
    pub fn from_store(review: StoreReview, bank_name: &str, source: &str) -> Self {
        Self {
            review_id: review.review_id,
            user_name: review.user_name,
            content: review.content,
            score: review.score,
            thumbs_up_count: review.thumbs_up_count,
            review_created_version: review.review_created_version,
            at: format_timestamp(review.at),
            reply_content: review.reply_content,
            replied_at: format_timestamp(review.replied_at),
            app_version: review.app_version,
            bank_name: bank_name.to_string(),
            source: source.to_string(),
        }
    }
}

/// Fetches one region, logging and swallowing any error.
async fn attempt<S: ReviewSource + ?Sized>(
    source: &S,
    query: &ReviewQuery,
) -> Vec<StoreReview> {
    match source.fetch_reviews(query).await {
        Ok(reviews) => reviews,
        Err(e) => {
            error!(country = %query.country, error = %e, "Review fetch failed");
            Vec::new()
        }
    }
}

/// Collects reviews for a single application with the two-attempt regional
/// policy. Never fails: errors yield an empty result.
#[tracing::instrument(skip(source, config), fields(bank = %app.label, app_id = %app.app_id))]
pub async fn collect_app<S: ReviewSource + ?Sized>(
    source: &S,
    app: &SourceApp,
    config: &PipelineConfig,
) -> Vec<RawReview> {
    let settings = &config.collection;
    let mut query = ReviewQuery {
        app_id: app.app_id.clone(),
        lang: settings.lang.clone(),
        country: settings.primary_country.clone(),
        sort: SortOrder::Newest,
        count: settings.target_count,
    };

    let mut reviews = attempt(source, &query).await;

    if reviews.is_empty() {
        info!(
            primary = %settings.primary_country,
            fallback = %settings.fallback_country,
            "Primary store returned 0 reviews, retrying fallback region"
        );
        query.country = settings.fallback_country.clone();
        reviews = attempt(source, &query).await;
    }

    if reviews.is_empty() {
        warn!("Could not find any reviews");
    } else {
        info!(count = reviews.len(), "Fetched reviews");
    }

    reviews
        .into_iter()
        .map(|r| RawReview::from_store(r, &app.label, &settings.platform))
        .collect()
}

/// Runs collection for every registered application and writes the raw CSV.
///
/// Returns [`StageOutcome::Skipped`] when no application produced a review.
#[tracing::instrument(skip_all, fields(apps = config.apps.len()))]
pub async fn collect<S: ReviewSource + ?Sized>(
    source: &S,
    config: &PipelineConfig,
) -> Result<StageOutcome> {
    let mut all_reviews = Vec::new();

    for app in &config.apps {
        let reviews = collect_app(source, app, config).await;
        all_reviews.extend(reviews);
    }

    if all_reviews.is_empty() {
        warn!("No reviews collected");
        return Ok(StageOutcome::skipped("No reviews collected."));
    }

    let path = config.raw_path();
    let rows = write_records(&path, &all_reviews)?;
    info!(rows, path = %path.display(), "Saved raw reviews");

    Ok(StageOutcome::Written { path, rows })
}
