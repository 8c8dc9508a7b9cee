//! PlotKit Settings Crate
//!
//! Settings models for the PlotKit serial plotter: the ASCII reader
//! configuration panel and the grouped key-value store it persists to.

pub mod ascii_reader;
pub mod constants;
pub mod error;
pub mod store;

pub use ascii_reader::{AsciiReaderSettings, DelimiterChoice};
pub use error::{SettingsError, SettingsResult};
pub use store::SettingsStore;
