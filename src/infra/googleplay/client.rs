use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::parse::parse_reviews_page;
use crate::fetch::{BasicClient, HttpClient, post_form};
use crate::services::review_source::{ReviewQuery, ReviewSource, SortOrder, StoreReview};

/// The store rejects larger pages.
const MAX_COUNT_EACH_FETCH: usize = 199;

pub struct GooglePlayClient<C = BasicClient> {
    http: C,
    base_url: String,
}

impl GooglePlayClient<BasicClient> {
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(BasicClient::new()?))
    }
}

impl<C: HttpClient> GooglePlayClient<C> {
    pub fn with_client(http: C) -> Self {
        Self {
            http,
            base_url: "https://play.google.com".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, query: &ReviewQuery) -> String {
        format!(
            "{}/_/PlayStoreUi/data/batchexecute?hl={}&gl={}",
            self.base_url, query.lang, query.country
        )
    }
}

/// Builds the `f.req` form value for one page of reviews.
pub(crate) fn reviews_payload(
    app_id: &str,
    sort: SortOrder,
    count: usize,
    token: Option<&str>,
) -> String {
    let sort = sort.code();
    let page = match token {
        Some(token) => format!(r#"[{count},null,\"{token}\"]"#),
        None => format!("[{count},null,null]"),
    };
    format!(
        r#"[[["UsvDTd","[null,null,[2,{sort},{page},null,[]],[\"{app_id}\",7]]",null,"generic"]]]"#
    )
}

#[async_trait]
impl<C: HttpClient> ReviewSource for GooglePlayClient<C> {
    #[tracing::instrument(skip(self), fields(app_id = %query.app_id, country = %query.country))]
    async fn fetch_reviews(&self, query: &ReviewQuery) -> Result<Vec<StoreReview>> {
        let url = self.endpoint(query);
        let mut collected: Vec<StoreReview> = Vec::new();
        let mut token: Option<String> = None;

        while collected.len() < query.count {
            let page_size = (query.count - collected.len()).min(MAX_COUNT_EACH_FETCH);
            let payload = reviews_payload(&query.app_id, query.sort, page_size, token.as_deref());

            let body = post_form(&self.http, &url, &[("f.req", payload.as_str())]).await?;
            let (page, next) = parse_reviews_page(&body)?;
            debug!(page_len = page.len(), has_next = next.is_some(), "Review page received");

            let exhausted = page.is_empty();
            collected.extend(page);

            match next {
                Some(next) if !exhausted => token = Some(next),
                _ => break,
            }
        }

        collected.truncate(query.count);
        Ok(collected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page_payload() {
        let payload = reviews_payload("com.example", SortOrder::Newest, 199, None);
        assert_eq!(
            payload,
            r#"[[["UsvDTd","[null,null,[2,2,[199,null,null],null,[]],[\"com.example\",7]]",null,"generic"]]]"#
        );
    }

    #[test]
    fn test_continuation_payload_carries_token() {
        let payload = reviews_payload("com.example", SortOrder::Newest, 50, Some("abc"));
        assert!(payload.contains(r#"[50,null,\"abc\"]"#));
    }

    #[test]
    fn test_endpoint_includes_region() {
        let client = GooglePlayClient::new()
            .unwrap()
            .with_base_url("http://localhost:9999/");
        let query = ReviewQuery {
            app_id: "com.example".into(),
            lang: "en".into(),
            country: "et".into(),
            sort: SortOrder::Newest,
            count: 10,
        };
        assert_eq!(
            client.endpoint(&query),
            "http://localhost:9999/_/PlayStoreUi/data/batchexecute?hl=en&gl=et"
        );
    }
}
