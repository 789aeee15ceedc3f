//! End-to-end routing flows over the session state machine, with fake
//! completion backends standing in for the OpenAI API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use teloxide::types::ChatId;

use sidekick_core::completion::{ChatMessage, CompletionBackend};
use sidekick_core::CompletionError;
use sidekick_telegram::handlers::forward_prompt;
use sidekick_telegram::router::{classify, Action};
use sidekick_telegram::state::BotState;
use sidekick_telegram::SessionMode;

const USER_A: ChatId = ChatId(1001);
const USER_B: ChatId = ChatId(1002);

const HINT_LABEL: &str = "💡 Hint";

/// Backend that records calls and answers with a fixed string.
struct FixedBackend {
    calls: AtomicUsize,
    reply: &'static str,
}

impl FixedBackend {
    fn new(reply: &'static str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            reply,
        }
    }
}

#[async_trait]
impl CompletionBackend for FixedBackend {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.to_string())
    }
}

/// Backend that always fails.
struct FailingBackend;

#[async_trait]
impl CompletionBackend for FailingBackend {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, CompletionError> {
        Err(CompletionError::RequestFailed("connection refused".into()))
    }
}

/// Backend that sleeps before answering, to simulate an in-flight call.
struct SlowBackend {
    delay: Duration,
}

#[async_trait]
impl CompletionBackend for SlowBackend {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, CompletionError> {
        tokio::time::sleep(self.delay).await;
        Ok("slow answer".to_string())
    }
}

fn state_with(backend: Arc<dyn CompletionBackend>) -> BotState {
    BotState::with_backend(Some(backend), "test system prompt")
}

#[tokio::test]
async fn start_from_unseen_chat_stays_in_menu_mode() {
    let state = BotState::with_backend(None, "sp");

    assert_eq!(classify(state.mode(USER_A).await, "/start"), Action::Welcome);
    assert_eq!(state.mode(USER_A).await, SessionMode::Menu);
}

#[tokio::test]
async fn activation_enters_prompt_mode_and_text_is_forwarded() {
    let backend = Arc::new(FixedBackend::new("model answer"));
    let state = state_with(backend.clone());

    assert_eq!(
        classify(state.mode(USER_A).await, HINT_LABEL),
        Action::ActivatePromptMode
    );
    state.enter_prompt_mode(USER_A).await;
    assert_eq!(state.mode(USER_A).await, SessionMode::AwaitingPrompt);

    // While awaiting, even the activation label is prompt content, not a
    // re-activation.
    assert_eq!(
        classify(state.mode(USER_A).await, HINT_LABEL),
        Action::ForwardPrompt
    );
    assert_eq!(
        classify(state.mode(USER_A).await, "what is 2+2?"),
        Action::ForwardPrompt
    );

    let reply = forward_prompt(&state, USER_A, "what is 2+2?").await;
    assert_eq!(reply, "model answer");
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    assert_eq!(state.mode(USER_A).await, SessionMode::Menu);
}

#[tokio::test]
async fn cancel_clears_mode_without_reaching_the_backend() {
    let backend = Arc::new(FixedBackend::new("unused"));
    let state = state_with(backend.clone());

    state.enter_prompt_mode(USER_A).await;
    assert_eq!(
        classify(state.mode(USER_A).await, "/menu"),
        Action::CancelPromptMode
    );
    state.clear_prompt_mode(USER_A).await;

    assert_eq!(state.mode(USER_A).await, SessionMode::Menu);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);

    // From menu mode the same command is the plain menu reply, never an
    // error.
    assert_eq!(classify(state.mode(USER_A).await, "/menu"), Action::ShowMenu);
}

#[tokio::test]
async fn backend_failure_yields_one_error_reply_and_clears_mode() {
    let state = state_with(Arc::new(FailingBackend));
    state.enter_prompt_mode(USER_A).await;

    let reply = forward_prompt(&state, USER_A, "boom").await;

    assert!(reply.starts_with("Could not get a response from the model:"));
    assert!(reply.contains("connection refused"));
    assert_eq!(state.mode(USER_A).await, SessionMode::Menu);
}

#[tokio::test]
async fn missing_backend_reports_not_configured_and_clears_mode() {
    let state = BotState::with_backend(None, "sp");
    state.enter_prompt_mode(USER_A).await;

    let reply = forward_prompt(&state, USER_A, "anything").await;

    assert!(reply.contains("not configured"));
    assert_eq!(state.mode(USER_A).await, SessionMode::Menu);
}

#[tokio::test]
async fn in_flight_completion_does_not_block_other_chats() {
    let state = Arc::new(BotState::with_backend(
        Some(Arc::new(SlowBackend {
            delay: Duration::from_millis(200),
        })),
        "sp",
    ));
    state.enter_prompt_mode(USER_A).await;

    let slow_state = Arc::clone(&state);
    let slow =
        tokio::spawn(async move { forward_prompt(&slow_state, USER_A, "slow question").await });

    // B's menu handling proceeds while A's completion is outstanding, and
    // B's mode is untouched by A's session.
    let started = Instant::now();
    assert_eq!(classify(state.mode(USER_B).await, "/start"), Action::Welcome);
    assert_eq!(state.mode(USER_B).await, SessionMode::Menu);
    assert!(started.elapsed() < Duration::from_millis(100));

    let reply = slow.await.expect("completion task panicked");
    assert_eq!(reply, "slow answer");
    assert_eq!(state.mode(USER_A).await, SessionMode::Menu);
    assert_eq!(state.mode(USER_B).await, SessionMode::Menu);
}

#[tokio::test]
async fn second_message_sees_the_cleared_mode() {
    let state = state_with(Arc::new(FixedBackend::new("first answer")));
    state.enter_prompt_mode(USER_A).await;

    // The dispatcher handles one chat's messages sequentially, so a second
    // message runs only after the first resolved and cleared the mode; it
    // must classify against the fresh mode, not the stale one.
    let _ = forward_prompt(&state, USER_A, "first").await;
    assert_eq!(
        classify(state.mode(USER_A).await, "second"),
        Action::Fallback
    );
}
