//! Backoff state machine and its configuration builder.
//!
//! # Key Types
//!
//! - [`Backoff`] - Exponential backoff with jitter
//! - [`BackoffBuilder`] - Optional-setting configuration with strict and
//!   coercing construction
//!
//! # Examples
//!
//! ```rust
//! use holdoff::backoff::Backoff;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), holdoff::error::ConfigError> {
//! let mut backoff = Backoff::builder()
//!     .base_delay(Duration::from_millis(500))
//!     .build()?;
//!
//! backoff.sleep().await;
//! # Ok(())
//! # }
//! ```

mod builder;
mod state;

pub use builder::{
    BackoffBuilder, DEFAULT_BASE_DELAY, DEFAULT_EXPONENTIAL_LIMIT, DEFAULT_INITIAL_DELAY,
    DEFAULT_JITTER_FACTOR,
};
pub use state::Backoff;
