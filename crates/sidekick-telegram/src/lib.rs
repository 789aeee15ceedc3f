//! Telegram front-end for Sidekick.
//!
//! The bot serves a fixed menu of actions and a hint mode in which a chat's
//! next message is relayed to the completion backend and answered with the
//! model's reply.
//!
//! Each chat is in one of two modes: menu mode (the default) where text is
//! matched against the command/button table, and prompt mode where the next
//! message is forwarded to the model. The mode lives in an in-memory map
//! keyed by chat id; nothing survives a restart.
//!
//! # Environment Variables
//!
//! Required:
//! - `TELEGRAM_BOT_TOKEN`: Bot token from @BotFather
//!
//! Optional:
//! - `OPENAI_API_KEY`: Enables hint mode's completion backend
//! - `OPENAI_MODEL`: Model to use (default: gpt-3.5-turbo)
//! - `SIDEKICK_SYSTEM_PROMPT`: Overrides the built-in system instruction
//!
//! # Commands and buttons
//!
//! - `/start` - Welcome message and the menu keyboard
//! - `/menu` - Show the menu; leaves hint mode when active
//! - Menu buttons: Analytics, Create post, Settings, Hint, Help

pub mod bot;
pub mod handlers;
pub mod keyboard;
pub mod router;
pub mod session;
pub mod state;

pub use bot::SidekickBot;
pub use router::{classify, Action};
pub use session::SessionMode;
pub use state::{create_shared_state, BotState};
