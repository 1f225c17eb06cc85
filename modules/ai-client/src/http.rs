use anyhow::{anyhow, Result};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// POST `body` as JSON and decode the JSON reply. Non-2xx statuses become
/// errors carrying the provider name, status and response body.
pub(crate) async fn post_json<B, R>(
    provider: &str,
    url: &str,
    headers: HeaderMap,
    body: &B,
) -> Result<R>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    // No pooling across calls
    let response = reqwest::Client::new()
        .post(url)
        .headers(headers)
        .json(body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(anyhow!("{} API error ({}): {}", provider, status, error_text));
    }

    Ok(response.json().await?)
}
