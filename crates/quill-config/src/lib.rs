//! Live settings and token table loading.
//!
//! Two configuration surfaces feed the gateway: the daily-note settings
//! (date format and folder, re-read on every resolution so live edits apply
//! without restart) and the token table mapping bearer secrets to
//! capability tokens.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

/// Configuration error types.
pub mod error;
/// Daily-note settings providers.
pub mod provider;
/// Bearer token table.
pub mod tokens;

pub use error::{ConfigError, ConfigResult};
pub use provider::{
    CompositeDailySettings, DailyNoteSettings, DailySettingsProvider, FileDailySettings,
    StaticDailySettings,
};
pub use tokens::TokenTable;
