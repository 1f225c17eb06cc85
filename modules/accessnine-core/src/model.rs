use std::sync::Arc;

use ai_client::{Agent, Gemini, OpenAi, PromptBuilder};
use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::file_config::{ModelConfig, ModelProvider};

/// The selected provider has no API key. Raised per call, not at startup.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0} environment variable not set")]
pub struct MissingApiKey(pub &'static str);

/// One text-completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub temperature: f32,
    /// Request JSON-only output shaped by this schema, where the provider supports it.
    pub response_schema: Option<serde_json::Value>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: 0.0,
            response_schema: None,
        }
    }
}

/// Dyn-compatible text completion trait (wraps the ai_client agents).
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String>;

    /// Model identifier, for logs.
    fn name(&self) -> &str;
}

/// Hosted provider behind [`LanguageModel`].
#[derive(Clone)]
pub enum ProviderModel {
    Gemini(Gemini),
    OpenAi(OpenAi),
    /// Provider selected but its key is absent; every call fails.
    MissingKey {
        model: String,
        env_var: &'static str,
    },
}

#[async_trait]
impl LanguageModel for ProviderModel {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        match self {
            Self::Gemini(agent) => send(agent, request).await,
            Self::OpenAi(agent) => send(agent, request).await,
            Self::MissingKey { env_var, .. } => Err(MissingApiKey(*env_var).into()),
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Gemini(agent) => agent.model(),
            Self::OpenAi(agent) => agent.model(),
            Self::MissingKey { model, .. } => model.as_str(),
        }
    }
}

async fn send<A: Agent>(agent: &A, request: CompletionRequest) -> Result<String> {
    let mut builder = agent.prompt(request.prompt).temperature(request.temperature);
    if let Some(schema) = request.response_schema {
        builder = builder.json_schema(schema);
    }
    builder.send().await
}

/// Build the configured provider. A missing API key does not fail here; it
/// surfaces as [`MissingApiKey`] on each call.
pub fn build_model(model: &ModelConfig, secrets: &AppConfig) -> Arc<dyn LanguageModel> {
    let provider = match model.provider {
        ModelProvider::Gemini => match secrets.google_api_key.as_deref() {
            Some(key) => {
                let mut agent = Gemini::new(key, &model.name);
                if let Some(ref url) = model.base_url {
                    agent = agent.with_base_url(url);
                }
                ProviderModel::Gemini(agent)
            }
            None => ProviderModel::missing_key(&model.name, "GOOGLE_API_KEY"),
        },
        ModelProvider::OpenAi => match secrets.openai_api_key.as_deref() {
            Some(key) => {
                let mut agent = OpenAi::new(key, &model.name);
                if let Some(ref url) = model.base_url {
                    agent = agent.with_base_url(url);
                }
                ProviderModel::OpenAi(agent)
            }
            None => ProviderModel::missing_key(&model.name, "OPENAI_API_KEY"),
        },
    };

    info!(provider = ?model.provider, model = %model.name, "Language model configured");
    Arc::new(provider)
}

impl ProviderModel {
    fn missing_key(model: &str, env_var: &'static str) -> Self {
        warn!(env_var, "API key not set; model calls will fail");
        Self::MissingKey {
            model: model.to_string(),
            env_var,
        }
    }
}
