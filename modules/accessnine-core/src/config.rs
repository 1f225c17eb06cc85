use ai_client::truncate_to_char_boundary;

/// Secrets loaded from environment variables (and `.env`).
/// Model choice, server binding and prompts live in the TOML FileConfig.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub google_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let config = Self {
            google_api_key: non_empty_var("GOOGLE_API_KEY"),
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
        };

        config.log_keys();
        config
    }

    fn log_keys(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  GOOGLE_API_KEY: {}", preview_opt(&self.google_api_key));
        tracing::info!("  OPENAI_API_KEY: {}", preview_opt(&self.openai_api_key));
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn preview(val: &str) -> String {
    format!(
        "{}...({} chars)",
        truncate_to_char_boundary(val, 5),
        val.chars().count()
    )
}

fn preview_opt(val: &Option<String>) -> String {
    match val {
        Some(v) if !v.is_empty() => preview(v),
        _ => "<not set>".to_string(),
    }
}
