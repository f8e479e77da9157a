//! Ordered descriptor registry.
//!
//! Insertion order is the advertise order, so a plain `Vec` with a name
//! index. Registration happens only at startup; after that the registry is
//! read-only and `visible()` is a pure function of (contents, tier).

use std::collections::HashMap;

use quill_core::CapabilityTier;

/// Anything registrable: has a key and a minimum tier.
pub trait Registrable {
    /// The registry key (tool name or resource scheme).
    fn key(&self) -> &str;
    /// Minimum tier required to see this entry.
    fn min_tier(&self) -> CapabilityTier;
}

impl Registrable for crate::descriptor::ToolDescriptor {
    fn key(&self) -> &str {
        &self.name
    }
    fn min_tier(&self) -> CapabilityTier {
        self.min_tier
    }
}

impl Registrable for crate::descriptor::ResourceDescriptor {
    fn key(&self) -> &str {
        &self.scheme
    }
    fn min_tier(&self) -> CapabilityTier {
        self.min_tier
    }
}

/// Insertion-ordered registry keyed by name.
#[derive(Debug)]
pub struct Registry<T> {
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Registrable> Registry<T> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entry. Returns `false` (and keeps the original) if the
    /// key is already taken.
    pub fn register(&mut self, entry: T) -> bool {
        let key = entry.key().to_string();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(entry);
        true
    }

    /// Look up an entry by key, ignoring tier.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).and_then(|&i| self.entries.get(i))
    }

    /// Entries visible at the given tier, in registration order.
    pub fn visible(&self, tier: CapabilityTier) -> impl Iterator<Item = &T> {
        self.entries.iter().filter(move |e| e.min_tier() <= tier)
    }

    /// All entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}
