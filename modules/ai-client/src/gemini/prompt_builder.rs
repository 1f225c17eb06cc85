use anyhow::Result;
use async_trait::async_trait;

use crate::traits::PromptBuilder;

use super::types::*;
use super::Gemini;

pub struct GeminiPromptBuilder {
    agent: Gemini,
    input: String,
    temperature: Option<f32>,
    json_output: bool,
}

impl GeminiPromptBuilder {
    pub(crate) fn new(agent: Gemini, input: String) -> Self {
        Self {
            agent,
            input,
            temperature: None,
            json_output: false,
        }
    }

    fn build_request(&self) -> GenerateRequest {
        let mut request = GenerateRequest::new().content(Content::user(&self.input));
        if let Some(temp) = self.temperature {
            request = request.temperature(temp);
        }
        if self.json_output {
            request = request.json_output();
        }

        request
    }
}

#[async_trait]
impl PromptBuilder for GeminiPromptBuilder {
    fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Gemini gets `responseMimeType: application/json`; the schema itself is
    /// not forwarded.
    fn json_schema(mut self, _schema: serde_json::Value) -> Self {
        self.json_output = true;
        self
    }

    async fn send(self) -> Result<String> {
        let request = self.build_request();
        self.agent.client().generate_text(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Agent;

    #[test]
    fn input_is_single_user_turn() {
        let builder = Gemini::new("key", "gemini-1.5-flash").prompt("question");

        let value = serde_json::to_value(builder.build_request()).unwrap();
        assert_eq!(value["contents"].as_array().unwrap().len(), 1);
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "question");
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn json_schema_requests_json_mime_type() {
        let builder = Gemini::new("key", "gemini-1.5-flash")
            .prompt("question")
            .temperature(0.0)
            .json_schema(serde_json::json!({"type": "object"}));

        let value = serde_json::to_value(builder.build_request()).unwrap();
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["generationConfig"]["temperature"], 0.0);
        assert!(value["generationConfig"].get("responseSchema").is_none());
    }
}
