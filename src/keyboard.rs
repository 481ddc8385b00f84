use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::bank::Language;
use crate::texts::{play_again_label, CHOICE_LABELS};

pub(crate) fn language_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("🇬🇧 English", "lang:en"),
        InlineKeyboardButton::callback("🇺🇦 Українська", "lang:uk"),
    ]])
}

/// One row, A through D. The callback data carries the index of the question
/// the buttons were rendered for, so late presses can be told apart.
pub(crate) fn options_keyboard(question_index: usize) -> InlineKeyboardMarkup {
    let row: Vec<InlineKeyboardButton> = CHOICE_LABELS
        .iter()
        .enumerate()
        .map(|(choice, label)| {
            InlineKeyboardButton::callback(*label, format!("ans:{question_index}:{choice}"))
        })
        .collect();

    InlineKeyboardMarkup::new(vec![row])
}

pub(crate) fn play_again_keyboard(language: Language) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        play_again_label(language),
        format!("again:{language}"),
    )]])
}
