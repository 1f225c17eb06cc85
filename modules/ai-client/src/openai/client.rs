use anyhow::{anyhow, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use super::types::*;
use crate::http::post_json;

pub(crate) const OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// Borrowed view of an [`super::OpenAi`] used for one request.
pub(crate) struct OpenAiClient<'a> {
    api_key: &'a str,
    base_url: &'a str,
}

impl<'a> OpenAiClient<'a> {
    pub fn new(api_key: &'a str, base_url: &'a str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/'),
        }
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Text of the first choice.
    pub async fn chat_text(&self, request: &ChatRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        debug!(
            model = %request.model,
            structured = request.response_format.is_some(),
            "OpenAI chat request"
        );

        let response: ChatResponse = post_json("OpenAI", &url, self.headers()?, request).await?;
        response
            .into_text()
            .ok_or_else(|| anyhow!("No response from OpenAI"))
    }
}
