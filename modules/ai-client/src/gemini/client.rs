use anyhow::{anyhow, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use tracing::debug;

use super::types::*;
use crate::http::post_json;

pub(crate) const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Borrowed view of a [`super::Gemini`] used for one request.
pub(crate) struct GeminiClient<'a> {
    api_key: &'a str,
    base_url: &'a str,
    model: &'a str,
}

impl<'a> GeminiClient<'a> {
    pub fn new(api_key: &'a str, base_url: &'a str, model: &'a str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/'),
            model,
        }
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", HeaderValue::from_str(self.api_key)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Concatenated text of the first candidate.
    pub async fn generate_text(&self, request: &GenerateRequest) -> Result<String> {
        debug!(
            model = %self.model,
            json_output = request
                .generation_config
                .as_ref()
                .is_some_and(|c| c.response_mime_type.is_some()),
            "Gemini generate request"
        );

        let response: GenerateResponse =
            post_json("Gemini", &self.url(), self.headers()?, request).await?;
        response
            .into_text()
            .ok_or_else(|| anyhow!("No response from Gemini"))
    }
}
