//! The per-message handler: session routing and reply production.
//!
//! Every inbound message goes through [`handle_message`], the single
//! dispatch endpoint. Menu replies always re-attach the keyboard so the menu
//! stays visible; the "working" acknowledgement is the one reply sent
//! without it.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::ChatId;
use tracing::{debug, error, info};

use sidekick_core::CompletionError;

use crate::keyboard;
use crate::router::{classify, Action, MenuItem};
use crate::state::BotState;

/// Immediate acknowledgement sent before the backend call.
const WORKING_ACK: &str = "Sending your question to the model... this may take a few seconds.";

const WELCOME_REPLY: &str = "Hi! I'm your assistant bot. The main menu is below - pick an action.";

const MENU_REPLY: &str = "Main menu:";

const ANALYTICS_REPLY: &str = "Community analytics will appear here.";

const CREATE_POST_REPLY: &str = "Here you will be able to draft posts for your channels.";

const SETTINGS_REPLY: &str = "Settings section.";

const HELP_REPLY: &str = "How to use this bot:\n\
    - The \"💡 Hint\" button starts a dialog with the model.\n\
    - In hint mode, just send your question and the bot replies with the model's answer.\n\
    - /menu returns to the main menu.\n\
    - /start shows the welcome message.";

const ACTIVATED_REPLY: &str = "Hint mode is on. Send your question.\nTo leave, send /menu.";

const CANCELLED_REPLY: &str = "Hint mode cancelled. Back to the main menu.";

const FALLBACK_REPLY: &str = "I did not understand that. Use the menu buttons or ℹ️ Help.";

const NOT_CONFIGURED_REPLY: &str = "The model backend is not configured (OPENAI_API_KEY not set).";

/// Handle one inbound message.
///
/// The mode check runs before any command matching, so a chat in prompt mode
/// never has its text intercepted by the menu table. Only transport send
/// errors propagate; a backend failure resolves to a reply instead.
pub async fn handle_message(bot: Bot, msg: Message, state: Arc<BotState>) -> ResponseResult<()> {
    let chat_id = msg.chat.id;
    let text = msg.text().unwrap_or("");

    let action = classify(state.mode(chat_id).await, text);
    debug!(chat_id = %chat_id, ?action, "message classified");

    match action {
        Action::ForwardPrompt => {
            bot.send_message(chat_id, WORKING_ACK).await?;
            let reply = forward_prompt(&state, chat_id, text).await;
            send_menu_reply(&bot, chat_id, &reply).await?;
        }
        Action::CancelPromptMode => {
            state.clear_prompt_mode(chat_id).await;
            info!(chat_id = %chat_id, "prompt mode cancelled");
            send_menu_reply(&bot, chat_id, CANCELLED_REPLY).await?;
        }
        Action::ActivatePromptMode => {
            state.enter_prompt_mode(chat_id).await;
            info!(chat_id = %chat_id, "prompt mode activated");
            send_menu_reply(&bot, chat_id, ACTIVATED_REPLY).await?;
        }
        Action::Welcome => send_menu_reply(&bot, chat_id, WELCOME_REPLY).await?,
        Action::ShowMenu => send_menu_reply(&bot, chat_id, MENU_REPLY).await?,
        Action::Placeholder(item) => send_menu_reply(&bot, chat_id, placeholder_reply(item)).await?,
        Action::Fallback => send_menu_reply(&bot, chat_id, FALLBACK_REPLY).await?,
    }

    Ok(())
}

/// Forward one prompt to the completion backend and produce the reply text.
///
/// The chat's activation is consumed exactly once: the mode is cleared before
/// the reply is produced, on success and on failure alike. A missing backend
/// is reported without any network attempt.
pub async fn forward_prompt(state: &BotState, chat_id: ChatId, text: &str) -> String {
    let outcome = match state.backend() {
        None => Err(CompletionError::NotConfigured),
        Some(backend) => backend.complete(&state.prompt_messages(text)).await,
    };

    state.clear_prompt_mode(chat_id).await;

    match outcome {
        Ok(answer) => answer,
        Err(CompletionError::NotConfigured) => {
            info!(chat_id = %chat_id, "prompt received with no backend configured");
            NOT_CONFIGURED_REPLY.to_string()
        }
        Err(e) => {
            error!(chat_id = %chat_id, error = %e, "completion request failed");
            format!("Could not get a response from the model: {e}")
        }
    }
}

/// Static copy for one placeholder menu button.
fn placeholder_reply(item: MenuItem) -> &'static str {
    match item {
        MenuItem::Analytics => ANALYTICS_REPLY,
        MenuItem::CreatePost => CREATE_POST_REPLY,
        MenuItem::Settings => SETTINGS_REPLY,
        MenuItem::Help => HELP_REPLY,
    }
}

async fn send_menu_reply(bot: &Bot, chat_id: ChatId, text: &str) -> ResponseResult<()> {
    bot.send_message(chat_id, text)
        .reply_markup(keyboard::main_menu())
        .await?;
    Ok(())
}
