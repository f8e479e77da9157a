//! Shared vocabulary for the Quill vault gateway.
//!
//! Defines the capability model (tiers, bearer tokens, directory rules) and
//! the addressing model (schemes, resolved addresses) that every other crate
//! speaks. Nothing here touches storage or the network.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

/// Addressing schemes and resolved addresses.
pub mod address;
/// Capability tiers.
pub mod tier;
/// Bearer tokens and directory rules.
pub mod token;

pub use address::{AddressScheme, ResolvedAddress};
pub use tier::CapabilityTier;
pub use token::{CapabilityToken, DirectoryRule, RuleEffect};
