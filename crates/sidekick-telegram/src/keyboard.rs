//! The fixed reply keyboard shown with every menu reply.

use teloxide::types::{KeyboardButton, KeyboardMarkup};

/// Button labels are product copy and double as routing patterns in the
/// menu table, so they must stay stable.
pub const BTN_ANALYTICS: &str = "📊 Analytics";
/// "Create post" button label.
pub const BTN_CREATE_POST: &str = "📝 Create post";
/// "Settings" button label.
pub const BTN_SETTINGS: &str = "⚙️ Settings";
/// The activation label: pressing it switches the chat into prompt mode.
pub const BTN_HINT: &str = "💡 Hint";
/// "Help" button label.
pub const BTN_HELP: &str = "ℹ️ Help";

/// Build the main menu keyboard: three rows, at most two buttons per row.
pub fn main_menu() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![
            KeyboardButton::new(BTN_ANALYTICS),
            KeyboardButton::new(BTN_CREATE_POST),
        ],
        vec![
            KeyboardButton::new(BTN_SETTINGS),
            KeyboardButton::new(BTN_HINT),
        ],
        vec![KeyboardButton::new(BTN_HELP)],
    ])
    .resize_keyboard()
    .input_field_placeholder("Choose an action...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_three_rows() {
        let keyboard = main_menu();
        let rows: Vec<usize> = keyboard.keyboard.iter().map(|row| row.len()).collect();
        assert_eq!(rows, vec![2, 2, 1]);
    }

    #[test]
    fn test_every_label_is_on_the_keyboard() {
        let keyboard = main_menu();
        let labels: Vec<&str> = keyboard
            .keyboard
            .iter()
            .flatten()
            .map(|button| button.text.as_str())
            .collect();

        for label in [BTN_ANALYTICS, BTN_CREATE_POST, BTN_SETTINGS, BTN_HINT, BTN_HELP] {
            assert!(labels.contains(&label), "missing label: {label}");
        }
    }
}
