//! Bounded retry with fixed backoff.
//!
//! Model loads and transcription calls are blocking operations against an
//! external engine, retried a fixed number of times with a fixed sleep between
//! attempts. We keep the schedule explicit — an attempt counter, one backoff
//! duration, and a terminal success/exhausted outcome — and route all sleeping
//! through the [`Sleeper`] trait so tests can observe the schedule without
//! real delays.

use std::time::Duration;

use anyhow::{Result, anyhow};
use tracing::warn;

/// Sleeping abstraction used between retry attempts.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// Production sleeper: blocks the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// A fixed-backoff retry bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Treated as at least 1.
    pub max_attempts: u32,

    /// Fixed pause between consecutive attempts.
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }

    /// Run `op` until it succeeds or the attempt bound is exhausted.
    ///
    /// Each intermediate failure is logged and followed by one backoff sleep;
    /// the final failure is returned with the bound attached as context. `op`
    /// receives the 1-based attempt number.
    pub fn run<T, F>(&self, sleeper: &mut dyn Sleeper, label: &str, mut op: F) -> Result<T>
    where
        F: FnMut(u32) -> Result<T>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut last_err = None;

        for attempt in 1..=max_attempts {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if attempt < max_attempts {
                        warn!(
                            label,
                            attempt,
                            max_attempts,
                            error = %err,
                            "attempt failed, backing off"
                        );
                        sleeper.sleep(self.backoff);
                    }
                    last_err = Some(err);
                }
            }
        }

        let err = last_err.unwrap_or_else(|| anyhow!("{label} produced no attempts"));
        Err(err.context(format!("{label} failed after {max_attempts} attempt(s)")))
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingSleeper;
    use super::*;

    #[test]
    fn first_success_sleeps_zero_times() -> Result<()> {
        let policy = RetryPolicy::new(3, Duration::from_secs(2));
        let mut sleeper = RecordingSleeper::new();

        let value = policy.run(&mut sleeper, "op", |_| Ok(7))?;
        assert_eq!(value, 7);
        assert!(sleeper.slept().is_empty());
        Ok(())
    }

    #[test]
    fn succeeds_on_third_attempt_after_two_backoffs() -> Result<()> {
        let policy = RetryPolicy::new(3, Duration::from_secs(2));
        let mut sleeper = RecordingSleeper::new();
        let mut calls = 0;

        let value = policy.run(&mut sleeper, "op", |attempt| {
            calls += 1;
            if attempt < 3 {
                Err(anyhow!("transient"))
            } else {
                Ok(attempt)
            }
        })?;

        assert_eq!(value, 3);
        assert_eq!(calls, 3);
        assert_eq!(
            sleeper.slept(),
            vec![Duration::from_secs(2), Duration::from_secs(2)]
        );
        Ok(())
    }

    #[test]
    fn exhausted_attempts_return_last_error_with_bound() {
        let policy = RetryPolicy::new(2, Duration::from_secs(3));
        let mut sleeper = RecordingSleeper::new();

        let err = policy
            .run::<(), _>(&mut sleeper, "transcription", |attempt| {
                Err(anyhow!("boom {attempt}"))
            })
            .unwrap_err();

        assert!(format!("{err:#}").contains("transcription failed after 2 attempt(s)"));
        assert!(format!("{err:#}").contains("boom 2"));
        // No sleep after the final attempt.
        assert_eq!(sleeper.slept(), vec![Duration::from_secs(3)]);
    }

    #[test]
    fn zero_max_attempts_still_runs_once() {
        let policy = RetryPolicy::new(0, Duration::ZERO);
        let mut sleeper = RecordingSleeper::new();
        let mut calls = 0;

        let _ = policy.run::<(), _>(&mut sleeper, "op", |_| {
            calls += 1;
            Err(anyhow!("nope"))
        });
        assert_eq!(calls, 1);
    }
}
