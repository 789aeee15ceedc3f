//! Shared state for the bot, accessible across all handlers.

use std::collections::HashMap;
use std::sync::Arc;

use sidekick_core::{BotConfig, ChatMessage, CompletionBackend, OpenAiClient, DEFAULT_SYSTEM_PROMPT};
use teloxide::types::ChatId;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::session::SessionMode;

/// Shared state: the session map plus the (optional) completion backend.
///
/// The session map is initialized empty at process start, entries are removed
/// whenever a chat's mode is cleared, and the whole map is discarded on
/// shutdown. The map is the only shared mutable resource; the dispatcher
/// handles one chat's messages sequentially, so an entry is never mutated by
/// two handlers at once.
pub struct BotState {
    /// Chats currently in prompt mode (absent entry = menu mode).
    sessions: RwLock<HashMap<ChatId, SessionMode>>,
    /// Completion backend; `None` when no API key was configured.
    backend: Option<Arc<dyn CompletionBackend>>,
    /// System instruction prepended to every forwarded prompt.
    system_prompt: String,
}

impl BotState {
    /// Create state from startup configuration.
    pub fn new(config: &BotConfig) -> Self {
        let backend: Option<Arc<dyn CompletionBackend>> = match &config.openai_api_key {
            Some(key) => Some(Arc::new(OpenAiClient::new(key, &config.model))),
            None => {
                warn!("OPENAI_API_KEY not set; hint mode will report the backend as unavailable");
                None
            }
        };

        Self {
            sessions: RwLock::new(HashMap::new()),
            backend,
            system_prompt: config
                .system_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        }
    }

    /// Create state around an explicit backend (used by tests).
    pub fn with_backend(
        backend: Option<Arc<dyn CompletionBackend>>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            backend,
            system_prompt: system_prompt.into(),
        }
    }

    /// The chat's current mode. Unseen chats are in menu mode.
    pub async fn mode(&self, chat_id: ChatId) -> SessionMode {
        self.sessions
            .read()
            .await
            .get(&chat_id)
            .copied()
            .unwrap_or_default()
    }

    /// Switch a chat into prompt mode.
    pub async fn enter_prompt_mode(&self, chat_id: ChatId) {
        self.sessions
            .write()
            .await
            .insert(chat_id, SessionMode::AwaitingPrompt);
        debug!(chat_id = %chat_id, "entered prompt mode");
    }

    /// Drop a chat back to menu mode by removing its entry. Idempotent.
    pub async fn clear_prompt_mode(&self, chat_id: ChatId) {
        self.sessions.write().await.remove(&chat_id);
        debug!(chat_id = %chat_id, "returned to menu mode");
    }

    /// The completion backend, when one is configured.
    pub fn backend(&self) -> Option<&Arc<dyn CompletionBackend>> {
        self.backend.as_ref()
    }

    /// The system instruction for forwarded prompts.
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Message sequence for one forwarded prompt: the system instruction,
    /// then the user's text as the single user turn.
    pub fn prompt_messages(&self, text: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(&self.system_prompt),
            ChatMessage::user(text),
        ]
    }
}

/// Create a shared state wrapped in Arc for use across handlers.
pub fn create_shared_state(config: &BotConfig) -> Arc<BotState> {
    Arc::new(BotState::new(config))
}
