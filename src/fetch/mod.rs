mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Result, anyhow};
use reqwest::header::{CONTENT_TYPE, HeaderValue};

/// `application/x-www-form-urlencoded` body for `form`.
pub fn encode_form(form: &[(&str, &str)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in form {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// POSTs `form` url-encoded to `url` and returns the response body.
///
/// Non-2xx statuses are errors carrying the response body.
pub async fn post_form<C: HttpClient>(
    client: &C,
    url: &str,
    form: &[(&str, &str)],
) -> Result<String> {
    // The serializer is not Send, so it must not live across an await.
    let body = encode_form(form);

    let mut req = reqwest::Request::new(reqwest::Method::POST, url.parse()?);
    req.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded;charset=UTF-8"),
    );
    *req.body_mut() = Some(body.into());

    let resp = client.execute(req).await?;
    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        return Err(anyhow!("request failed with status {}: {}", status, text));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send<T: Send>(_: &T) {}

    #[test]
    fn test_encode_form() {
        assert_eq!(
            encode_form(&[("f.req", r#"[["a b",1]]"#), ("hl", "en")]),
            "f.req=%5B%5B%22a+b%22%2C1%5D%5D&hl=en"
        );
        assert_eq!(encode_form(&[]), "");
    }

    #[test]
    fn test_post_form_future_is_send() {
        let client = BasicClient::new().unwrap();
        let fut = post_form(&client, "http://localhost:9/", &[("f.req", "[]")]);
        assert_send(&fut);
    }
}
