//! Address canonicalization and daily-alias resolution.
//!
//! Turns opaque address strings (`direct://notes/x.md`, `daily://today`,
//! bare paths, extension URIs) into validated [`ResolvedAddress`] values.
//! Resolution is total for well-formed addresses: it returns a canonical
//! path or a typed error, never a partially-decoded path.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

/// Date alias evaluation.
pub mod alias;
/// Path/URI canonicalization.
pub mod canonical;
/// Injected time source.
pub mod clock;
/// Moment-style date format rendering and parsing.
pub mod datefmt;
/// Resolution error types.
pub mod error;
/// The URI resolver.
pub mod resolver;

pub use alias::alias_date;
pub use canonical::{canonicalize, CanonicalAddress};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ResolveError, ResolveResult};
pub use resolver::{ResolveOptions, UriResolver};

/// Scheme name for plain vault paths.
pub const SCHEME_DIRECT: &str = "direct";
/// Scheme name for date-alias addresses.
pub const SCHEME_DAILY: &str = "daily";
