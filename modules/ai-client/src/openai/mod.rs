mod client;
pub mod prompt_builder;
pub(crate) mod schema;
pub(crate) mod types;

pub use prompt_builder::OpenAiPromptBuilder;
pub use schema::StructuredOutput;

use crate::traits::Agent;

use client::{OpenAiClient, OPENAI_API_URL};

/// OpenAI-compatible chat completions provider. `with_base_url` points it at
/// any server speaking the same wire format.
#[derive(Clone)]
pub struct OpenAi {
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAi {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: OPENAI_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn client(&self) -> OpenAiClient<'_> {
        OpenAiClient::new(&self.api_key, &self.base_url)
    }
}

impl Agent for OpenAi {
    type PromptBuilder = OpenAiPromptBuilder;

    fn prompt(&self, input: impl Into<String>) -> OpenAiPromptBuilder {
        OpenAiPromptBuilder::new(self.clone(), input.into())
    }
}
