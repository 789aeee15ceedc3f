//! Bot construction and dispatcher wiring.

use std::sync::Arc;

use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use tracing::{info, warn};

use crate::handlers::handle_message;
use crate::state::BotState;

/// The Sidekick Telegram bot.
pub struct SidekickBot {
    /// The teloxide bot instance.
    bot: Bot,
    /// Shared state across handlers.
    state: Arc<BotState>,
}

impl SidekickBot {
    /// Create a bot around an already-validated token and shared state.
    pub fn new(token: impl Into<String>, state: Arc<BotState>) -> Self {
        Self {
            bot: Bot::new(token.into()),
            state,
        }
    }

    /// Get the bot's username.
    pub async fn get_me(&self) -> Result<String, teloxide::RequestError> {
        let me = self.bot.get_me().await?;
        Ok(me.username().to_string())
    }

    /// Start the bot in long-polling mode. Runs until the process stops.
    ///
    /// All messages flow through one endpoint; routing happens inside it,
    /// after the mode lookup. The dispatcher handles updates for the same
    /// chat sequentially, so a chat's second message is only processed once
    /// the first one's handler - including an outstanding completion call -
    /// has resolved. Distinct chats interleave freely.
    pub async fn start_polling(&self) {
        let state = Arc::clone(&self.state);

        let handler = dptree::entry().branch(Update::filter_message().endpoint(
            move |bot: Bot, msg: Message| {
                let state = Arc::clone(&state);
                async move { handle_message(bot, msg, state).await }
            },
        ));

        info!("Bot is running! Send /start to begin.");

        Dispatcher::builder(self.bot.clone(), handler)
            .default_handler(|upd| async move {
                warn!("Unhandled update: {:?}", upd);
            })
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}
