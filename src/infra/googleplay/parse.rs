use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::services::review_source::StoreReview;

static ENVELOPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\)\]\}'\n\n([\s\S]+)").expect("envelope regex"));

/// Decodes one `batchexecute` reviews response into its reviews and the
/// continuation token for the next page, if any.
///
/// A `null` payload means the store has no reviews for the request.
pub fn parse_reviews_page(body: &str) -> Result<(Vec<StoreReview>, Option<String>)> {
    let caps = ENVELOPE
        .captures(body)
        .ok_or_else(|| anyhow!("response is missing the batchexecute envelope"))?;
    let outer: Value =
        serde_json::from_str(caps[1].trim()).context("failed to parse response envelope")?;

    let Some(inner) = outer[0][2].as_str() else {
        return Ok((Vec::new(), None));
    };
    let inner: Value = serde_json::from_str(inner).context("failed to parse reviews payload")?;

    let reviews = inner[0]
        .as_array()
        .map(|items| items.iter().filter_map(parse_review).collect())
        .unwrap_or_default();

    let token = inner
        .as_array()
        .and_then(|parts| parts.len().checked_sub(2).map(|i| &parts[i]))
        .and_then(Value::as_array)
        .and_then(|page| page.last())
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok((reviews, token))
}

fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    value.as_i64().and_then(|secs| DateTime::from_timestamp(secs, 0))
}

fn text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn parse_review(item: &Value) -> Option<StoreReview> {
    let review_id = item[0].as_str()?.to_string();

    Some(StoreReview {
        review_id,
        user_name: text(&item[1][0]),
        content: text(&item[4]),
        score: item[2].as_u64().and_then(|s| u8::try_from(s).ok()),
        thumbs_up_count: item[6].as_u64(),
        review_created_version: text(&item[10]),
        at: timestamp(&item[5][0]),
        reply_content: text(&item[7][1]),
        replied_at: timestamp(&item[7][2][0]),
        app_version: text(&item[10]),
    })
}
