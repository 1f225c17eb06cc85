use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// TOML-backed configuration loaded from disk.
/// Secrets (API keys) stay as env vars. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub model: ModelConfig,
    pub server: ServerConfig,
    pub context: ContextConfig,
    pub prompts: PromptsConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    #[default]
    Gemini,
    OpenAi,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    pub provider: ModelProvider,
    pub name: String,
    pub temperature: f32,
    /// Ask the provider for JSON-only output.
    pub json_mode: bool,
    pub base_url: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: ModelProvider::Gemini,
            name: "gemini-1.5-flash".to_string(),
            temperature: 0.0,
            json_mode: false,
            base_url: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContextConfig {
    pub corpus: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PromptsConfig {
    pub sales: Option<PathBuf>,
}

impl FileConfig {
    /// Load `path` if given, otherwise all defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => load_config(path),
            None => Ok(Self::default()),
        }
    }

    fn resolve_paths(&mut self, config_dir: &Path) {
        for path in [&mut self.context.corpus, &mut self.prompts.sales]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = config_dir.join(&*path);
            }
        }
    }
}

/// Load and parse a TOML config file. Relative file paths inside it are
/// resolved against the file's directory.
pub fn load_config(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let mut config: FileConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    let config_dir = path.parent().unwrap_or_else(|| Path::new("."));
    config.resolve_paths(config_dir);
    Ok(config)
}
