pub mod config;
pub mod corpus;
pub mod error;
pub mod file_config;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod prompt;
pub mod template;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod types;

pub use config::AppConfig;
pub use corpus::{DefaultContext, MOCK_PRODUCT_DB};
pub use error::{SalesAgentError, SalesResult};
pub use file_config::{FileConfig, ModelConfig, ModelProvider, ServerConfig};
pub use model::{build_model, CompletionRequest, LanguageModel, MissingApiKey, ProviderModel};
pub use parser::parse_response;
pub use pipeline::SalesAgent;
pub use prompt::{PromptTemplate, REFUSAL_ANSWER, SALES_PROMPT};
pub use types::{Query, SalesResponse};

/// Assemble the agent and default context from file config and secrets.
pub fn build_agent(
    file_config: &FileConfig,
    secrets: &AppConfig,
) -> SalesResult<(SalesAgent, DefaultContext)> {
    let template = PromptTemplate::from_config(&file_config.prompts)?;
    let default_context = DefaultContext::from_config(&file_config.context)?;
    let model = build_model(&file_config.model, secrets);

    let agent = SalesAgent::new(model, template)
        .with_temperature(file_config.model.temperature)
        .with_json_mode(file_config.model.json_mode);

    Ok((agent, default_context))
}
