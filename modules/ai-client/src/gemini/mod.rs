mod client;
pub mod prompt_builder;
pub(crate) mod types;

pub use prompt_builder::GeminiPromptBuilder;

use crate::traits::Agent;

use client::{GeminiClient, GEMINI_API_URL};

/// Google Gemini `generateContent` provider.
#[derive(Clone)]
pub struct Gemini {
    api_key: String,
    model: String,
    base_url: String,
}

impl Gemini {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: GEMINI_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn client(&self) -> GeminiClient<'_> {
        GeminiClient::new(&self.api_key, &self.base_url, &self.model)
    }
}

impl Agent for Gemini {
    type PromptBuilder = GeminiPromptBuilder;

    fn prompt(&self, input: impl Into<String>) -> GeminiPromptBuilder {
        GeminiPromptBuilder::new(self.clone(), input.into())
    }
}
