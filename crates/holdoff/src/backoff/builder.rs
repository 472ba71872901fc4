//! Configuration builder for [`Backoff`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::backoff::Backoff;
use crate::error::{ConfigError, Violation};

/// Default delay for the first round (100ms).
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(100);

/// Default delay that growth resumes from after a zero-delay round (100ms).
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(100);

/// Default ceiling beyond which the delay stops doubling (3 minutes).
pub const DEFAULT_EXPONENTIAL_LIMIT: Duration = Duration::from_secs(180);

/// Default jitter factor (0.3, so ±15% around the nominal delay).
pub const DEFAULT_JITTER_FACTOR: f64 = 0.3;

/// Builder for configuring [`Backoff`].
///
/// Every setting is independently optional; anything left unset falls back to
/// the documented default. The builder is plain data and derives serde, so a
/// backoff policy can be embedded in a host application's configuration file
/// and fed through either construction mode.
///
/// Two construction modes are available:
///
/// - [`build`](Self::build) validates every supplied setting and fails with a
///   [`ConfigError`] listing all violations.
/// - [`coerce`](Self::coerce) never fails; invalid values are silently
///   replaced with a documented fallback.
///
/// # Examples
///
/// ```rust
/// use holdoff::backoff::Backoff;
/// use std::time::Duration;
///
/// let backoff = Backoff::builder()
///     .initial_delay(Duration::ZERO)
///     .base_delay(Duration::from_millis(500))
///     .exponential_limit(Duration::from_secs(60))
///     .build()?;
/// # Ok::<(), holdoff::error::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackoffBuilder {
    initial_delay: Option<Duration>,
    base_delay: Option<Duration>,
    exponential_limit: Option<Duration>,
    jitter_factor: Option<f64>,
}

impl BackoffBuilder {
    /// Set the delay used (before jitter) on the first round.
    ///
    /// It is safe to set this to zero: the first round then returns an
    /// immediate retry, and growth resumes from the base delay afterwards.
    ///
    /// Default: 100ms
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = Some(delay);
        self
    }

    /// Set the delay that growth resumes from after a zero-delay round.
    ///
    /// Must be greater than zero; it is only consulted when the current
    /// delay is zero (so, on the second round when the initial delay is
    /// zero).
    ///
    /// Default: 100ms
    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = Some(delay);
        self
    }

    /// Set the delay beyond which exponential growth stops.
    ///
    /// A limit of zero means the delay never grows beyond the base delay,
    /// though jitter is still applied every round.
    ///
    /// Default: 3 minutes
    pub fn exponential_limit(mut self, limit: Duration) -> Self {
        self.exponential_limit = Some(limit);
        self
    }

    /// Set the jitter factor.
    ///
    /// Must be in the range `[0, 1)`. Jitter is applied uniformly around the
    /// nominal delay, so a factor of 0.3 adjusts each returned delay by up
    /// to ±15%.
    ///
    /// Default: 0.3
    ///
    /// # Examples
    ///
    /// ```rust
    /// use holdoff::backoff::Backoff;
    ///
    /// // Deterministic delays, e.g. for tests
    /// let backoff = Backoff::builder().jitter_factor(0.0).build()?;
    /// # Ok::<(), holdoff::error::ConfigError>(())
    /// ```
    pub fn jitter_factor(mut self, factor: f64) -> Self {
        self.jitter_factor = Some(factor);
        self
    }

    /// Build the [`Backoff`], validating every supplied setting.
    ///
    /// Validation does not short-circuit: the returned [`ConfigError`]
    /// reports every violated constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the base delay is zero or the jitter
    /// factor is outside `[0, 1)`.
    pub fn build(self) -> Result<Backoff, ConfigError> {
        let mut violations = Vec::new();

        if let Some(base) = self.base_delay {
            if base.is_zero() {
                violations.push(Violation::ZeroBaseDelay);
            }
        }

        if let Some(factor) = self.jitter_factor {
            if !(factor >= 0.0 && factor < 1.0) {
                violations.push(Violation::JitterFactorOutOfRange { value: factor });
            }
        }

        if !violations.is_empty() {
            return Err(ConfigError::new(violations));
        }

        Ok(Backoff {
            delay: self.initial_delay.unwrap_or(DEFAULT_INITIAL_DELAY),
            base_delay: self.base_delay.unwrap_or(DEFAULT_BASE_DELAY),
            exponential_limit: self.exponential_limit.unwrap_or(DEFAULT_EXPONENTIAL_LIMIT),
            jitter_factor: self.jitter_factor.unwrap_or(DEFAULT_JITTER_FACTOR),
        })
    }

    /// Build the [`Backoff`], coercing invalid settings to valid fallbacks.
    ///
    /// Never fails. A zero base delay and a jitter factor `>= 1` (or NaN)
    /// keep their defaults; a negative jitter factor becomes zero, reading
    /// the input as intent to disable jitter.
    pub fn coerce(self) -> Backoff {
        let base_delay = match self.base_delay {
            Some(base) if base.is_zero() => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    fallback = ?DEFAULT_BASE_DELAY,
                    "coercing zero base delay to the default"
                );
                DEFAULT_BASE_DELAY
            }
            Some(base) => base,
            None => DEFAULT_BASE_DELAY,
        };

        let jitter_factor = match self.jitter_factor {
            // negative input reads as intent to disable jitter
            Some(factor) if factor < 0.0 => {
                #[cfg(feature = "tracing")]
                tracing::debug!(factor, "coercing negative jitter factor to zero");
                0.0
            }
            // covers factor >= 1 and NaN, neither of which carries a usable intent
            Some(factor) if !(factor < 1.0) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    factor,
                    fallback = DEFAULT_JITTER_FACTOR,
                    "coercing jitter factor to the default"
                );
                DEFAULT_JITTER_FACTOR
            }
            Some(factor) => factor,
            None => DEFAULT_JITTER_FACTOR,
        };

        Backoff {
            delay: self.initial_delay.unwrap_or(DEFAULT_INITIAL_DELAY),
            base_delay,
            exponential_limit: self.exponential_limit.unwrap_or(DEFAULT_EXPONENTIAL_LIMIT),
            jitter_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_defaults() {
        let backoff = BackoffBuilder::default().build().unwrap();

        assert_eq!(
            backoff,
            Backoff {
                delay: DEFAULT_INITIAL_DELAY,
                base_delay: DEFAULT_BASE_DELAY,
                exponential_limit: DEFAULT_EXPONENTIAL_LIMIT,
                jitter_factor: DEFAULT_JITTER_FACTOR,
            }
        );
    }

    #[test]
    fn test_build_custom_values() {
        let backoff = Backoff::builder()
            .initial_delay(Duration::ZERO)
            .base_delay(Duration::from_millis(500))
            .exponential_limit(Duration::from_secs(60))
            .jitter_factor(0.2)
            .build()
            .unwrap();

        assert_eq!(
            backoff,
            Backoff {
                delay: Duration::ZERO,
                base_delay: Duration::from_millis(500),
                exponential_limit: Duration::from_secs(60),
                jitter_factor: 0.2,
            }
        );
    }

    #[test]
    fn test_build_accepts_boundary_values() {
        // Zero initial delay, zero limit, and zero jitter are all meaningful
        let backoff = Backoff::builder()
            .initial_delay(Duration::ZERO)
            .exponential_limit(Duration::ZERO)
            .jitter_factor(0.0)
            .build()
            .unwrap();

        assert_eq!(backoff.peek_delay(), Duration::ZERO);
    }

    #[test]
    fn test_build_rejects_zero_base_delay() {
        let err = Backoff::builder()
            .base_delay(Duration::ZERO)
            .build()
            .unwrap_err();

        assert_eq!(err.violations(), &[Violation::ZeroBaseDelay]);
        assert!(err.to_string().contains("base delay"));
    }

    #[test]
    fn test_build_rejects_out_of_range_jitter() {
        for factor in [1.0, 1.3, -0.1, f64::NAN] {
            let err = Backoff::builder()
                .jitter_factor(factor)
                .build()
                .unwrap_err();

            assert_eq!(err.violations().len(), 1, "factor {factor} should fail");
            assert!(matches!(
                err.violations()[0],
                Violation::JitterFactorOutOfRange { .. }
            ));
            assert!(err.to_string().contains("jitter factor"));
        }
    }

    #[test]
    fn test_build_accumulates_violations() {
        let err = Backoff::builder()
            .base_delay(Duration::ZERO)
            .jitter_factor(1.0)
            .build()
            .unwrap_err();

        assert_eq!(err.violations().len(), 2);
        assert_eq!(err.violations()[0], Violation::ZeroBaseDelay);
        assert!(matches!(
            err.violations()[1],
            Violation::JitterFactorOutOfRange { value } if value == 1.0
        ));
    }

    #[test]
    fn test_coerce_equals_build_for_valid_input() {
        let builder = Backoff::builder()
            .initial_delay(Duration::from_millis(250))
            .base_delay(Duration::from_millis(125))
            .exponential_limit(Duration::from_secs(30))
            .jitter_factor(0.5);

        assert_eq!(builder.clone().build().unwrap(), builder.coerce());
    }

    #[test]
    fn test_coerce_zero_base_delay_to_default() {
        let backoff = Backoff::builder().base_delay(Duration::ZERO).coerce();

        assert_eq!(backoff.base_delay, DEFAULT_BASE_DELAY);
    }

    #[test]
    fn test_coerce_negative_jitter_to_zero() {
        let backoff = Backoff::builder().jitter_factor(-1.0).coerce();

        assert_eq!(backoff.jitter_factor, 0.0);
    }

    #[test]
    fn test_coerce_high_jitter_to_default() {
        // The default, not zero: no usable intent can be read from these
        for factor in [1.0, 1.3, f64::NAN] {
            let backoff = Backoff::builder().jitter_factor(factor).coerce();

            assert_eq!(
                backoff.jitter_factor, DEFAULT_JITTER_FACTOR,
                "factor {factor} should coerce to the default"
            );
        }
    }

    #[test]
    fn test_coerce_keeps_valid_settings() {
        let backoff = Backoff::builder()
            .base_delay(Duration::ZERO) // coerced
            .exponential_limit(Duration::from_secs(10)) // kept
            .coerce();

        assert_eq!(
            backoff,
            Backoff {
                delay: DEFAULT_INITIAL_DELAY,
                base_delay: DEFAULT_BASE_DELAY,
                exponential_limit: Duration::from_secs(10),
                jitter_factor: DEFAULT_JITTER_FACTOR,
            }
        );
    }

    #[test]
    fn test_deserializes_with_absent_fields_as_unset() {
        let builder: BackoffBuilder = serde_json::from_str("{}").unwrap();
        assert_eq!(builder, BackoffBuilder::default());

        let builder: BackoffBuilder =
            serde_json::from_str(r#"{"jitter_factor": 0.5}"#).unwrap();
        let backoff = builder.build().unwrap();

        assert_eq!(backoff.jitter_factor, 0.5);
        assert_eq!(backoff.base_delay, DEFAULT_BASE_DELAY);
    }

    #[test]
    fn test_serde_round_trip() {
        let builder = Backoff::builder()
            .initial_delay(Duration::from_millis(250))
            .jitter_factor(0.25);

        let json = serde_json::to_string(&builder).unwrap();
        let restored: BackoffBuilder = serde_json::from_str(&json).unwrap();

        assert_eq!(builder, restored);
    }
}
