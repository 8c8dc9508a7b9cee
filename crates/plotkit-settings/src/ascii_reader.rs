//! ASCII reader configuration panel model.
//!
//! Backs the form that configures ASCII-text serial data parsing: a field
//! delimiter (comma, space, tab, or a single custom character) and a channel
//! count where 0 means "detect from incoming data". The model holds the
//! form-control state, notifies listeners on changes, and persists itself to
//! a [`SettingsStore`] group; the widget toolkit binds to it from the host
//! application.

use crate::constants::{
    CHANNELS_AUTO, DELIMITER_OTHER, DELIMITER_TAB, KEY_CUSTOM_DELIMITER, KEY_DELIMITER,
    KEY_NUM_OF_CHANNELS, SETTINGS_GROUP_ASCII,
};
use crate::store::SettingsStore;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use tracing::warn;

/// The custom delimiter field accepts at most one character, and never a
/// digit (a digit would be indistinguishable from channel data).
static CUSTOM_DELIMITER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\d]?$").expect("invalid delimiter validator regex"));

/// Which delimiter selector is active in the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelimiterChoice {
    #[default]
    Comma,
    Space,
    Tab,
    /// Single free-form character taken from the custom text field.
    Custom,
}

impl DelimiterChoice {
    /// Token written to the settings store for this selector.
    fn storage_token(self) -> &'static str {
        match self {
            Self::Comma => ",",
            Self::Space => " ",
            Self::Tab => DELIMITER_TAB,
            Self::Custom => DELIMITER_OTHER,
        }
    }

    /// Selector for a stored token; anything unrecognized falls back to the
    /// custom selector.
    fn from_storage_token(token: &str) -> Self {
        match token {
            "," => Self::Comma,
            " " => Self::Space,
            DELIMITER_TAB => Self::Tab,
            _ => Self::Custom,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct PanelState {
    delimiter_choice: DelimiterChoice,
    custom_delimiter: String,
    num_of_channels: u32,
}

/// Settings panel model for the ASCII reader.
///
/// All operations run synchronously on the caller's thread; listeners are
/// invoked inline from the setter that caused the change. Applying values
/// during [`load`](Self::load) goes through the same setters, so a restore
/// raises the same notifications as a user edit.
pub struct AsciiReaderSettings {
    state: RefCell<PanelState>,
    delimiter_listeners: RefCell<Vec<Box<dyn Fn(char)>>>,
    channel_count_listeners: RefCell<Vec<Box<dyn Fn(u32)>>>,
}

impl AsciiReaderSettings {
    /// Create a panel with default state: comma delimiter, auto channel count.
    pub fn new() -> Self {
        Self {
            state: RefCell::new(PanelState::default()),
            delimiter_listeners: RefCell::new(Vec::new()),
            channel_count_listeners: RefCell::new(Vec::new()),
        }
    }

    /// Register a callback invoked with the resolved delimiter character
    /// whenever the effective delimiter changes.
    pub fn on_delimiter_changed<F>(&self, callback: F)
    where
        F: Fn(char) + 'static,
    {
        self.delimiter_listeners.borrow_mut().push(Box::new(callback));
    }

    /// Register a callback invoked whenever the channel count changes.
    pub fn on_num_of_channels_changed<F>(&self, callback: F)
    where
        F: Fn(u32) + 'static,
    {
        self.channel_count_listeners
            .borrow_mut()
            .push(Box::new(callback));
    }

    /// Channel count; 0 means auto-detect.
    pub fn num_of_channels(&self) -> u32 {
        self.state.borrow().num_of_channels
    }

    /// Active delimiter selector.
    pub fn delimiter_choice(&self) -> DelimiterChoice {
        self.state.borrow().delimiter_choice
    }

    /// Raw text of the custom delimiter field.
    pub fn custom_delimiter_text(&self) -> String {
        self.state.borrow().custom_delimiter.clone()
    }

    /// Resolved delimiter character, or `None` when the custom selector is
    /// active with an empty field.
    pub fn delimiter(&self) -> Option<char> {
        let state = self.state.borrow();
        match state.delimiter_choice {
            DelimiterChoice::Comma => Some(','),
            DelimiterChoice::Space => Some(' '),
            DelimiterChoice::Tab => Some('\t'),
            DelimiterChoice::Custom => state.custom_delimiter.chars().next(),
        }
    }

    /// Set the channel count field, notifying listeners if the value changed.
    pub fn set_num_of_channels(&self, count: u32) {
        let changed = {
            let mut state = self.state.borrow_mut();
            if state.num_of_channels == count {
                false
            } else {
                state.num_of_channels = count;
                true
            }
        };
        if changed {
            self.emit_num_of_channels_changed(count);
        }
    }

    /// Activate a delimiter selector.
    ///
    /// Re-selecting the active choice is a no-op. On an actual transition the
    /// resolved delimiter is announced, unless it resolves to `None`.
    pub fn set_delimiter_choice(&self, choice: DelimiterChoice) {
        let changed = {
            let mut state = self.state.borrow_mut();
            if state.delimiter_choice == choice {
                false
            } else {
                state.delimiter_choice = choice;
                true
            }
        };
        if changed {
            if let Some(delimiter) = self.delimiter() {
                self.emit_delimiter_changed(delimiter);
            }
        }
    }

    /// Edit the custom delimiter field.
    ///
    /// Text longer than one character or consisting of a digit is rejected
    /// and the field keeps its prior value. On an accepted edit, the first
    /// character is announced if the custom selector is currently active.
    pub fn set_custom_delimiter_text(&self, text: &str) {
        if !CUSTOM_DELIMITER_RE.is_match(text) {
            return;
        }
        let announce = {
            let mut state = self.state.borrow_mut();
            if state.custom_delimiter == text {
                false
            } else {
                state.custom_delimiter = text.to_string();
                state.delimiter_choice == DelimiterChoice::Custom
            }
        };
        if announce {
            if let Some(delimiter) = text.chars().next() {
                self.emit_delimiter_changed(delimiter);
            }
        }
    }

    /// Write the panel state under the "ASCII" group of `store`.
    pub fn save(&self, store: &mut SettingsStore) {
        store.begin_group(SETTINGS_GROUP_ASCII);

        // Channel count 0 is stored as the auto token.
        let channels = self.num_of_channels();
        let channels_value = if channels == 0 {
            CHANNELS_AUTO.to_string()
        } else {
            channels.to_string()
        };
        store.set_value(KEY_NUM_OF_CHANNELS, channels_value);

        let state = self.state.borrow();
        store.set_value(KEY_DELIMITER, state.delimiter_choice.storage_token());
        store.set_value(KEY_CUSTOM_DELIMITER, state.custom_delimiter.clone());

        store.end_group();
    }

    /// Restore the panel state from the "ASCII" group of `store`.
    ///
    /// Missing keys leave the corresponding field untouched; malformed
    /// values are ignored. Restores are best-effort and never fail.
    pub fn load(&self, store: &mut SettingsStore) {
        store.begin_group(SETTINGS_GROUP_ASCII);

        if let Some(value) = store.value(KEY_NUM_OF_CHANNELS) {
            if value == CHANNELS_AUTO {
                self.set_num_of_channels(0);
            } else {
                match value.parse::<u32>() {
                    Ok(count) => self.set_num_of_channels(count),
                    Err(_) => warn!(value = %value, "ignoring unparseable channel count"),
                }
            }
        }

        // Custom text is applied before the selector so that switching to
        // the custom selector announces the restored character.
        if let Some(text) = store.value(KEY_CUSTOM_DELIMITER) {
            if !text.is_empty() {
                self.set_custom_delimiter_text(&text);
            }
        }

        let token = store
            .value(KEY_DELIMITER)
            .unwrap_or_else(|| self.delimiter_choice().storage_token().to_string());
        self.set_delimiter_choice(DelimiterChoice::from_storage_token(&token));

        store.end_group();
    }

    fn emit_delimiter_changed(&self, delimiter: char) {
        for listener in self.delimiter_listeners.borrow().iter() {
            listener(delimiter);
        }
    }

    fn emit_num_of_channels_changed(&self, count: u32) {
        for listener in self.channel_count_listeners.borrow().iter() {
            listener(count);
        }
    }
}

impl Default for AsciiReaderSettings {
    fn default() -> Self {
        Self::new()
    }
}
