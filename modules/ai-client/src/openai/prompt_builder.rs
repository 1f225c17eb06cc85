use anyhow::Result;
use async_trait::async_trait;

use crate::traits::PromptBuilder;

use super::types::*;
use super::OpenAi;

pub struct OpenAiPromptBuilder {
    agent: OpenAi,
    input: String,
    temperature: Option<f32>,
    schema: Option<serde_json::Value>,
}

impl OpenAiPromptBuilder {
    pub(crate) fn new(agent: OpenAi, input: String) -> Self {
        Self {
            agent,
            input,
            temperature: None,
            schema: None,
        }
    }

    fn build_request(&self) -> ChatRequest {
        let mut request =
            ChatRequest::new(self.agent.model()).message(WireMessage::user(&self.input));

        if let Some(temp) = self.temperature {
            if !is_reasoning_model(self.agent.model()) {
                request = request.temperature(temp);
            }
        }

        if let Some(ref schema) = self.schema {
            request = request.response_format(ResponseFormat::json_schema(schema.clone()));
        }

        request
    }
}

#[async_trait]
impl PromptBuilder for OpenAiPromptBuilder {
    fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn json_schema(mut self, schema: serde_json::Value) -> Self {
        self.schema = Some(schema);
        self
    }

    async fn send(self) -> Result<String> {
        let request = self.build_request();
        self.agent.client().chat_text(&request).await
    }
}
