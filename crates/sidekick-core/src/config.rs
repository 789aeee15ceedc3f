//! Startup configuration for the bot.
//!
//! All configuration comes from environment variables, read once at process
//! start. The resulting [`BotConfig`] is immutable for the lifetime of the
//! process; nothing is persisted.

use crate::error::ConfigError;

/// Environment variable for the Telegram bot token (required).
pub const TELEGRAM_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Environment variable for the OpenAI API key (optional).
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable for the model identifier (optional).
pub const OPENAI_MODEL_ENV: &str = "OPENAI_MODEL";

/// Environment variable overriding the built-in system instruction (optional).
pub const SYSTEM_PROMPT_ENV: &str = "SIDEKICK_SYSTEM_PROMPT";

/// Model used when `OPENAI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Process-wide configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram bot token.
    pub telegram_token: String,
    /// OpenAI API key. `None` disables the completion backend; the bot still
    /// serves the menu and reports the backend as unavailable per request.
    pub openai_api_key: Option<String>,
    /// Model identifier sent with every completion request.
    pub model: String,
    /// Optional override of the built-in system instruction.
    pub system_prompt: Option<String>,
}

impl BotConfig {
    /// Read configuration from the environment.
    ///
    /// A missing Telegram token is fatal; a missing OpenAI key is not.
    pub fn from_env() -> Result<Self, ConfigError> {
        let telegram_token =
            std::env::var(TELEGRAM_TOKEN_ENV).map_err(|_| ConfigError::MissingToken)?;

        let openai_api_key = std::env::var(OPENAI_API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty());

        let model = std::env::var(OPENAI_MODEL_ENV)
            .ok()
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let system_prompt = std::env::var(SYSTEM_PROMPT_ENV)
            .ok()
            .filter(|prompt| !prompt.is_empty());

        Ok(Self {
            telegram_token,
            openai_api_key,
            model,
            system_prompt,
        })
    }

    /// Whether a completion backend can be constructed.
    pub fn has_backend(&self) -> bool {
        self.openai_api_key.is_some()
    }
}
