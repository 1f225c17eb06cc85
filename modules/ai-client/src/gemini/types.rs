use serde::{Deserialize, Serialize};

// =============================================================================
// Content
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// One turn of the conversation. Replies may omit the role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::text(text)],
        }
    }
}

// =============================================================================
// Generate Request
// =============================================================================

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: Content) -> Self {
        self.contents.push(content);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.generation_config
            .get_or_insert_with(GenerationConfig::default)
            .temperature = Some(temperature);
        self
    }

    pub fn json_output(mut self) -> Self {
        self.generation_config
            .get_or_insert_with(GenerationConfig::default)
            .response_mime_type = Some("application/json".to_string());
        self
    }
}

// =============================================================================
// Generate Response
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    pub fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let texts: Vec<String> = content.parts.into_iter().filter_map(|p| p.text).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case_keys() {
        let request = GenerateRequest::new()
            .content(Content::user("hi"))
            .temperature(0.0)
            .json_output();
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(value["generationConfig"]["temperature"], 0.0);
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn test_request_without_config_omits_it() {
        let value = serde_json::to_value(GenerateRequest::new().content(Content::user("hi"))).unwrap();
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn test_response_concatenates_parts() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"a\":"}, {"text": " 1}"}]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        assert_eq!(response.into_text().as_deref(), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: GenerateResponse =
            serde_json::from_value(serde_json::json!({"promptFeedback": {"blockReason": "SAFETY"}}))
                .unwrap();
        assert!(response.into_text().is_none());
    }
}
