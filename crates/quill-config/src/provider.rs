//! Daily-note settings providers.
//!
//! The resolver asks for a settings snapshot on every daily-alias
//! resolution. File-backed providers re-read their file per call, so edits
//! to the settings apply without a restart; nothing is cached beyond the
//! call.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Daily-note configuration: how filenames are rendered and where they live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyNoteSettings {
    /// Moment-style date format, e.g. `YYYY-MM-DD`.
    pub date_format: String,
    /// Vault folder holding daily notes, canonical form.
    pub folder: String,
}

impl DailyNoteSettings {
    /// Create settings, normalizing the folder to canonical form.
    #[must_use]
    pub fn new(date_format: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
            folder: folder.into().trim_matches('/').to_string(),
        }
    }
}

/// Source of live daily-note settings.
///
/// `snapshot` is called on every resolution and must reflect the current
/// state of the underlying source.
pub trait DailySettingsProvider: Send + Sync {
    /// Whether this provider is currently able to serve settings.
    fn is_enabled(&self) -> bool;

    /// Current settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Disabled`] when the provider is disabled, or
    /// a load error when the backing source is unreadable.
    fn snapshot(&self) -> ConfigResult<DailyNoteSettings>;
}

/// Fixed settings, for tests and embedding.
#[derive(Debug, Clone)]
pub struct StaticDailySettings {
    settings: Option<DailyNoteSettings>,
}

impl StaticDailySettings {
    /// Provider that always serves the given settings.
    #[must_use]
    pub fn enabled(settings: DailyNoteSettings) -> Self {
        Self {
            settings: Some(settings),
        }
    }

    /// Provider that is never enabled.
    #[must_use]
    pub fn disabled() -> Self {
        Self { settings: None }
    }
}

impl DailySettingsProvider for StaticDailySettings {
    fn is_enabled(&self) -> bool {
        self.settings.is_some()
    }

    fn snapshot(&self) -> ConfigResult<DailyNoteSettings> {
        self.settings.clone().ok_or(ConfigError::Disabled)
    }
}

/// TOML file on disk holding a `[daily_notes]` table:
///
/// ```toml
/// [daily_notes]
/// date_format = "YYYY-MM-DD"
/// folder = "daily"
/// ```
///
/// The file is re-parsed on every snapshot. A missing file means the
/// provider is disabled, not an error.
#[derive(Debug, Clone)]
pub struct FileDailySettings {
    path: PathBuf,
}

#[derive(Deserialize)]
struct SettingsFile {
    daily_notes: Option<DailyNotesSection>,
}

#[derive(Deserialize)]
struct DailyNotesSection {
    date_format: String,
    folder: String,
}

impl FileDailySettings {
    /// Provider backed by the TOML file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> ConfigResult<Option<DailyNoteSettings>> {
        let path_text = self.path.display().to_string();
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ConfigError::Io {
                    path: path_text,
                    source: e,
                })
            }
        };
        let parsed: SettingsFile = toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path_text.clone(),
            source: e,
        })?;
        debug!(path = %path_text, "loaded daily note settings");
        Ok(parsed
            .daily_notes
            .map(|s| DailyNoteSettings::new(s.date_format, s.folder)))
    }
}

impl DailySettingsProvider for FileDailySettings {
    fn is_enabled(&self) -> bool {
        matches!(self.load(), Ok(Some(_)))
    }

    fn snapshot(&self) -> ConfigResult<DailyNoteSettings> {
        self.load()?.ok_or(ConfigError::Disabled)
    }
}

/// Ordered list of providers; the first enabled one wins.
///
/// More than one underlying source can supply daily-note settings (e.g. a
/// dedicated daily-notes extension and a periodic-notes extension); the
/// composite hides that from the resolver.
#[derive(Default)]
pub struct CompositeDailySettings {
    providers: Vec<Box<dyn DailySettingsProvider>>,
}

impl CompositeDailySettings {
    /// Create an empty composite (always disabled).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider; earlier providers take precedence.
    #[must_use]
    pub fn with(mut self, provider: impl DailySettingsProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }
}

impl DailySettingsProvider for CompositeDailySettings {
    fn is_enabled(&self) -> bool {
        self.providers.iter().any(|p| p.is_enabled())
    }

    fn snapshot(&self) -> ConfigResult<DailyNoteSettings> {
        self.providers
            .iter()
            .find(|p| p.is_enabled())
            .ok_or(ConfigError::Disabled)?
            .snapshot()
    }
}

impl std::fmt::Debug for CompositeDailySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeDailySettings")
            .field("providers", &self.providers.len())
            .finish()
    }
}
