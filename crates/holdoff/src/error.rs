//! Error types for backoff configuration.
//!
//! Strict construction is the only fallible operation in this crate. When it
//! fails, every violated constraint is reported at once instead of only the
//! first one encountered, so a caller fixing a bad configuration sees the
//! whole picture in a single round trip.

use thiserror::Error;

/// A single violated configuration constraint.
///
/// Each variant names the setting that failed validation in
/// [`BackoffBuilder::build`](crate::backoff::BackoffBuilder::build).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Violation {
    /// The base delay must be greater than zero.
    #[error("the base delay must be > 0")]
    ZeroBaseDelay,

    /// The jitter factor must lie in the range `[0, 1)`.
    #[error("the jitter factor must be in the range [0, 1), got {value}")]
    JitterFactorOutOfRange {
        /// The rejected value.
        value: f64,
    },
}

/// Error returned by strict construction when the configuration is invalid.
///
/// Violations accumulate across settings — validation does not short-circuit
/// on the first failure.
///
/// # Examples
///
/// ```rust
/// use holdoff::backoff::Backoff;
/// use std::time::Duration;
///
/// let err = Backoff::builder()
///     .base_delay(Duration::ZERO)
///     .jitter_factor(1.5)
///     .build()
///     .unwrap_err();
///
/// assert_eq!(err.violations().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid backoff configuration: {}", join_violations(.violations))]
pub struct ConfigError {
    violations: Vec<Violation>,
}

impl ConfigError {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// The individual constraint violations, in the order the settings were
    /// validated.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
