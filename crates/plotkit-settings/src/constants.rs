//! Settings group and key names.
//!
//! Every name that appears in a persisted settings file is defined here so
//! the panel and its tests never spell a literal key twice.

/// Settings group holding the ASCII reader configuration.
pub const SETTINGS_GROUP_ASCII: &str = "ASCII";

/// Channel count key: "auto" or decimal text.
pub const KEY_NUM_OF_CHANNELS: &str = "NumOfChannels";

/// Delimiter selector key: "," " " "TAB" or "other".
pub const KEY_DELIMITER: &str = "Delimiter";

/// Raw text of the custom delimiter field.
pub const KEY_CUSTOM_DELIMITER: &str = "CustomDelimiter";

/// Stored channel count meaning "detect from incoming data".
pub const CHANNELS_AUTO: &str = "auto";

/// Delimiter token for the tab selector. A raw '\t' does not survive a
/// settings file round trip, so tab is stored symbolically.
pub const DELIMITER_TAB: &str = "TAB";

/// Delimiter token for the custom selector; the character itself is stored
/// under [`KEY_CUSTOM_DELIMITER`].
pub const DELIMITER_OTHER: &str = "other";
