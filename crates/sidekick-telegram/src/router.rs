//! Message classification for the session router.
//!
//! The router is consulted for every inbound message: the chat's mode is
//! checked first, then the static menu table. The two tables are deliberately
//! separate - text in prompt mode is never matched against menu commands, so
//! sending a button label while awaiting a prompt forwards it as a question.
//! The table is fixed at compile time; nothing registers handlers at runtime.

use crate::keyboard;
use crate::session::SessionMode;

/// Command that greets the user.
pub const START_COMMAND: &str = "/start";

/// Command that shows the menu; in prompt mode it cancels the activation.
pub const MENU_COMMAND: &str = "/menu";

/// What the router decided to do with one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Reply with the welcome text.
    Welcome,
    /// Reply with the menu label.
    ShowMenu,
    /// Reply with the static placeholder for one menu button.
    Placeholder(MenuItem),
    /// Switch the chat into prompt mode and send the instructions.
    ActivatePromptMode,
    /// Leave prompt mode and confirm the cancellation.
    CancelPromptMode,
    /// Forward the text to the completion backend.
    ForwardPrompt,
    /// Reply that the message was not understood.
    Fallback,
}

/// Menu buttons answered with a static placeholder reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    /// Community analytics.
    Analytics,
    /// Post drafting.
    CreatePost,
    /// Settings section.
    Settings,
    /// Usage help.
    Help,
}

/// Classify one message given the chat's current mode.
pub fn classify(mode: SessionMode, text: &str) -> Action {
    let text = text.trim();

    if mode == SessionMode::AwaitingPrompt {
        // Prompt mode recognizes exactly one thing: the cancel command.
        // Everything else is prompt content, including the activation label.
        if text.eq_ignore_ascii_case(MENU_COMMAND) {
            return Action::CancelPromptMode;
        }
        return Action::ForwardPrompt;
    }

    match text {
        START_COMMAND => Action::Welcome,
        MENU_COMMAND => Action::ShowMenu,
        keyboard::BTN_ANALYTICS => Action::Placeholder(MenuItem::Analytics),
        keyboard::BTN_CREATE_POST => Action::Placeholder(MenuItem::CreatePost),
        keyboard::BTN_SETTINGS => Action::Placeholder(MenuItem::Settings),
        keyboard::BTN_HELP => Action::Placeholder(MenuItem::Help),
        keyboard::BTN_HINT => Action::ActivatePromptMode,
        _ => Action::Fallback,
    }
}
