//! Core building blocks for the Sidekick bot.
//!
//! This crate holds everything the Telegram front-end needs that is not
//! Telegram-specific:
//!
//! - Startup configuration read from the environment ([`config`])
//! - The chat-completion gateway to the OpenAI API ([`completion`])
//! - The error taxonomy for both ([`error`])
//!
//! # Environment Variables
//!
//! Required:
//! - `TELEGRAM_BOT_TOKEN`: Bot token from @BotFather
//!
//! Optional:
//! - `OPENAI_API_KEY`: Enables the completion backend
//! - `OPENAI_MODEL`: Model to use (default: gpt-3.5-turbo)
//! - `SIDEKICK_SYSTEM_PROMPT`: Overrides the built-in system instruction

pub mod completion;
pub mod config;
pub mod error;

pub use completion::{ChatMessage, CompletionBackend, OpenAiClient, DEFAULT_SYSTEM_PROMPT};
pub use config::BotConfig;
pub use error::{CompletionError, ConfigError, Result};
