//! The URI resolver.
//!
//! Owns the `direct` and `daily` schemes. Extension schemes are returned
//! tagged for the registry entry that claims them; the resolver never
//! guesses on behalf of an extension.

use std::sync::Arc;

use tracing::{debug, info};

use quill_core::ResolvedAddress;
use quill_config::DailySettingsProvider;
use quill_vault::{Vault, VaultError};

use crate::alias::alias_date;
use crate::canonical::canonicalize;
use crate::clock::Clock;
use crate::datefmt;
use crate::error::{ResolveError, ResolveResult};
use crate::{SCHEME_DAILY, SCHEME_DIRECT};

/// Per-call resolution options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Create a missing daily note instead of failing.
    pub create_if_missing: bool,
}

/// Resolves raw address strings into [`ResolvedAddress`] values.
pub struct UriResolver {
    vault: Arc<dyn Vault>,
    settings: Arc<dyn DailySettingsProvider>,
    clock: Arc<dyn Clock>,
}

impl UriResolver {
    /// Create a resolver over the given vault, settings source and clock.
    #[must_use]
    pub fn new(
        vault: Arc<dyn Vault>,
        settings: Arc<dyn DailySettingsProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            vault,
            settings,
            clock,
        }
    }

    /// Resolve a raw address.
    ///
    /// Daily-note creation is not exclusivity-guarded: two concurrent
    /// `create_if_missing` resolutions of the same alias may race, the last
    /// create wins, and the first subsequent read observes it. A create
    /// that loses the race to an existing note is treated as success.
    ///
    /// # Errors
    ///
    /// Any [`ResolveError`]; see the variants for the full taxonomy. The
    /// function is total for well-formed addresses — it returns a canonical
    /// path or a typed error, never a partial one.
    pub async fn resolve(&self, raw: &str, opts: ResolveOptions) -> ResolveResult<ResolvedAddress> {
        let addr = canonicalize(raw)?;
        match addr.scheme.as_deref() {
            Some(SCHEME_DAILY) => self.resolve_daily(&addr.path, opts).await,
            Some(SCHEME_DIRECT) | None => {
                // Existence is the handler's concern: not-found means
                // different things for a directory listing and a leaf read.
                let mut resolved = ResolvedAddress::direct(addr.path);
                if addr.directory_hint {
                    resolved = resolved.as_directory();
                }
                Ok(resolved)
            }
            Some(extension) => {
                debug!(scheme = extension, path = %addr.path, "deferring to extension scheme");
                Ok(ResolvedAddress::extension(extension, addr.path))
            }
        }
    }

    async fn resolve_daily(
        &self,
        alias: &str,
        opts: ResolveOptions,
    ) -> ResolveResult<ResolvedAddress> {
        if !self.settings.is_enabled() {
            return Err(ResolveError::DailyProviderUnavailable);
        }
        let settings = self.settings.snapshot()?;

        // An empty remaining path is the "today" alias.
        let alias = if alias.is_empty() { "today" } else { alias };
        let (date, label) = alias_date(alias, self.clock.today(), &settings.date_format)?;

        let filename = format!("{}.md", datefmt::render(date, &settings.date_format));
        let path = if settings.folder.is_empty() {
            filename
        } else {
            format!("{}/{filename}", settings.folder)
        };

        if self.vault.exists(&path).await? {
            return Ok(ResolvedAddress::daily(path, label));
        }

        if !opts.create_if_missing {
            return Err(ResolveError::DailyNoteMissing {
                alias: label,
                path,
            });
        }

        if !settings.folder.is_empty() {
            self.vault.create_dir(&settings.folder).await?;
        }
        match self.vault.create(&path, "").await {
            Ok(()) => info!(path = %path, alias = %label, "created daily note"),
            // Lost a concurrent creation race; the note exists, which is
            // what we wanted.
            Err(VaultError::AlreadyExists { .. }) => {}
            Err(e) => return Err(e.into()),
        }
        Ok(ResolvedAddress::daily(path, label))
    }
}

impl std::fmt::Debug for UriResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UriResolver")
            .field("daily_enabled", &self.settings.is_enabled())
            .finish_non_exhaustive()
    }
}
