//! The backoff state machine.

use std::time::Duration;

use crate::backoff::builder::{
    BackoffBuilder, DEFAULT_BASE_DELAY, DEFAULT_EXPONENTIAL_LIMIT, DEFAULT_INITIAL_DELAY,
    DEFAULT_JITTER_FACTOR,
};

/// Exponential backoff with jitter.
///
/// Tracks a nominal delay that doubles on every round up to a configured
/// limit, and returns a jittered copy of it to the caller. The jittered
/// value never feeds back into growth, so the nominal sequence is
/// deterministic for a given configuration while the emitted delays vary
/// randomly — jitter never compounds.
///
/// By default the initial delay is 100ms, the jitter factor is 0.3 (so
/// ±15%), and growth stops once the delay reaches 3 minutes.
///
/// # Delay sequence
///
/// For round `n` with nominal delay `d`:
///
/// ```text
/// returned  = round(d * (1 + (rand[0,1) - 0.5) * jitter_factor))
/// next d    = base_delay              if d == 0
///           = min(d * 2, limit)      if d < limit
///           = d                       otherwise (saturated)
/// ```
///
/// # Examples
///
/// ```rust
/// use holdoff::backoff::Backoff;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), holdoff::error::ConfigError> {
/// let mut backoff = Backoff::builder()
///     .initial_delay(Duration::ZERO)
///     .base_delay(Duration::from_millis(500))
///     .exponential_limit(Duration::from_secs(60))
///     .build()?;
///
/// backoff.sleep().await; // immediate: the initial delay is zero
/// backoff.sleep().await; // 425..=575ms, 500ms ±15% (default jitter)
/// backoff.sleep().await; // ~1s
/// backoff.sleep().await; // ~2s
/// # Ok(())
/// # }
/// ```
///
/// A `Backoff` is owned by a single retry loop; [`advance`](Self::advance)
/// takes `&mut self`, so sharing one instance across tasks requires external
/// synchronization.
#[derive(Debug, Clone, PartialEq)]
pub struct Backoff {
    pub(crate) delay: Duration,
    pub(crate) base_delay: Duration,
    pub(crate) exponential_limit: Duration,
    pub(crate) jitter_factor: f64,
}

impl Default for Backoff {
    /// Create a backoff with the documented defaults.
    ///
    /// Defaults:
    /// - initial delay: 100ms
    /// - base delay: 100ms
    /// - exponential limit: 3 minutes
    /// - jitter factor: 0.3
    fn default() -> Self {
        Self {
            delay: DEFAULT_INITIAL_DELAY,
            base_delay: DEFAULT_BASE_DELAY,
            exponential_limit: DEFAULT_EXPONENTIAL_LIMIT,
            jitter_factor: DEFAULT_JITTER_FACTOR,
        }
    }
}

impl Backoff {
    /// Create a new builder for configuring a backoff.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use holdoff::backoff::Backoff;
    /// use std::time::Duration;
    ///
    /// let backoff = Backoff::builder()
    ///     .base_delay(Duration::from_millis(500))
    ///     .build();
    /// ```
    pub fn builder() -> BackoffBuilder {
        BackoffBuilder::default()
    }

    /// Produce the delay for this round and grow the nominal for the next.
    ///
    /// Returns the current nominal delay with jitter applied, rounded to the
    /// nearest nanosecond. The nominal is then updated: a zero delay resumes
    /// from the base delay, a delay below the limit doubles (clamped at the
    /// limit), and a delay at or above the limit stays put.
    ///
    /// Never fails; a zero duration is a legal result meaning "retry now".
    pub fn advance(&mut self) -> Duration {
        let nominal = self.delay;

        // jitter multiplier, uniform in [1 - factor/2, 1 + factor/2)
        let multiplier = 1.0 + (rand::random::<f64>() - 0.5) * self.jitter_factor;
        let jittered =
            Duration::from_nanos((nominal.as_nanos() as f64 * multiplier).round() as u64);

        // grow the nominal from the pre-jitter value only
        if nominal.is_zero() {
            self.delay = self.base_delay;
        } else if nominal < self.exponential_limit {
            self.delay = nominal.saturating_mul(2).min(self.exponential_limit);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(?nominal, delay = ?jittered, next = ?self.delay, "advanced backoff");

        jittered
    }

    /// Pause the current task for one backoff round.
    ///
    /// Calls [`advance`](Self::advance) and sleeps for the returned
    /// duration via `tokio::time::sleep`. A zero delay returns promptly.
    pub async fn sleep(&mut self) {
        tokio::time::sleep(self.advance()).await;
    }

    /// Pause the current thread for one backoff round.
    ///
    /// Blocking counterpart of [`sleep`](Self::sleep) for callers outside an
    /// async runtime.
    pub fn sleep_blocking(&mut self) {
        std::thread::sleep(self.advance());
    }

    /// The nominal (pre-jitter) delay of the next round.
    ///
    /// Does not mutate state or consume randomness, so repeated calls return
    /// the same value until the next [`advance`](Self::advance).
    pub fn peek_delay(&self) -> Duration {
        self.delay
    }
}
