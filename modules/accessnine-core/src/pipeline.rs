use std::sync::Arc;

use ai_client::{truncate_to_char_boundary, StructuredOutput};
use tracing::{info, warn};

use crate::error::SalesAgentError;
use crate::model::{CompletionRequest, LanguageModel, MissingApiKey};
use crate::parser::parse_response;
use crate::prompt::PromptTemplate;
use crate::types::{Query, SalesResponse};

/// Bytes of raw model output kept in parse-failure logs.
const RAW_PREVIEW_BYTES: usize = 500;

/// Render → model call → parse. One model call per invocation, no retries.
pub struct SalesAgent {
    model: Arc<dyn LanguageModel>,
    template: PromptTemplate,
    temperature: f32,
    json_mode: bool,
}

impl SalesAgent {
    pub fn new(model: Arc<dyn LanguageModel>, template: PromptTemplate) -> Self {
        Self {
            model,
            template,
            temperature: 0.0,
            json_mode: false,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Ask the provider for JSON-only output using the response schema.
    pub fn with_json_mode(mut self, enabled: bool) -> Self {
        self.json_mode = enabled;
        self
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub async fn invoke(&self, query: &Query) -> Result<SalesResponse, SalesAgentError> {
        info!(
            model = self.model.name(),
            question_len = query.question.chars().count(),
            context_len = query.context.chars().count(),
            "Invoking sales agent"
        );

        let prompt = self.template.render(&query.context, &query.question);
        let request = CompletionRequest {
            prompt,
            temperature: self.temperature,
            response_schema: self.json_mode.then(SalesResponse::openai_schema),
        };

        let raw = self
            .model
            .complete(request)
            .await
            .map_err(|e| match e.downcast::<MissingApiKey>() {
                Ok(missing) => SalesAgentError::Config(missing.to_string()),
                Err(e) => SalesAgentError::Model(e),
            })?;

        parse_response(&raw).inspect_err(|e| {
            warn!(
                error = %e,
                raw = truncate_to_char_boundary(&raw, RAW_PREVIEW_BYTES),
                "Model output did not match the response schema"
            );
        })
    }

    pub async fn invoke_parts(
        &self,
        question: &str,
        context: &str,
    ) -> Result<SalesResponse, SalesAgentError> {
        self.invoke(&Query::new(question, context)).await
    }
}
