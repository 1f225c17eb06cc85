use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// Agent Trait
// =============================================================================

/// A configured provider + model that can start prompt requests.
pub trait Agent: Clone + Send + Sync {
    type PromptBuilder: PromptBuilder;

    fn prompt(&self, input: impl Into<String>) -> Self::PromptBuilder;
}

// =============================================================================
// PromptBuilder Trait
// =============================================================================

/// Single-turn request builder. Every `send` performs exactly one HTTP round
/// trip on a freshly created client.
#[async_trait]
pub trait PromptBuilder: Send + Sized {
    fn temperature(self, temperature: f32) -> Self;
    /// Ask the provider for JSON-only output. The schema is honored where the
    /// provider supports one.
    fn json_schema(self, schema: serde_json::Value) -> Self;
    async fn send(self) -> Result<String>;
}
