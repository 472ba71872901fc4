#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Exponential backoff with jitter for retry loops.
//!
//! This crate provides a small state machine that computes successive retry
//! delays: the nominal delay doubles on every round up to a configurable
//! limit, and each returned delay is randomly jittered around the nominal so
//! that many callers retrying the same failed dependency do not wake up in
//! lockstep.
//!
//! Configuration is assembled from independent optional settings layered
//! onto defaults, with two construction modes: strict (fails with a
//! [`ConfigError`](error::ConfigError) listing every violated constraint)
//! and coercing (never fails, invalid settings fall back to documented
//! values).
//!
//! ## Quick Start
//!
//! ```rust
//! use holdoff::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), ConfigError> {
//! let mut backoff = Backoff::builder()
//!     .initial_delay(Duration::ZERO)
//!     .base_delay(Duration::from_millis(500))
//!     .exponential_limit(Duration::from_secs(60))
//!     .build()?;
//!
//! backoff.sleep().await; // immediate: the initial delay is zero
//! backoff.sleep().await; // 425..=575ms, 500ms ±15% (default jitter)
//! backoff.sleep().await; // ~1s
//! backoff.sleep().await; // ~2s, doubling until the 60s limit
//! # Ok(())
//! # }
//! ```
//!
//! Retrying loops that cannot fail construction (e.g. when the settings come
//! from an untrusted config file) use the coercing mode instead:
//!
//! ```rust
//! use holdoff::prelude::*;
//!
//! let backoff = Backoff::builder()
//!     .jitter_factor(7.5) // invalid, silently falls back to 0.3
//!     .coerce();
//! ```

// Re-export commonly used types
pub use backoff::{Backoff, BackoffBuilder};
pub use error::{ConfigError, Violation};

// Module declarations
pub mod backoff;
pub mod error;

/// Convenient re-exports of commonly used items.
///
/// Import all core types with:
///
/// ```rust
/// use holdoff::prelude::*;
/// ```
pub mod prelude {
    pub use crate::backoff::{Backoff, BackoffBuilder};
    pub use crate::error::{ConfigError, Violation};
}
