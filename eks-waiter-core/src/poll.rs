//! Poll results and polling cadence.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ProbeError;

/// One observation returned by a status probe.
///
/// The engine never looks inside `object`; only `state` drives the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollResult<T> {
    pub object: T,
    pub state: String,
}

impl<T> PollResult<T> {
    pub fn new(object: T, state: impl Into<String>) -> Self {
        Self {
            object,
            state: state.into(),
        }
    }

    /// Build a result by extracting the discriminator from the object itself.
    pub fn observe<F>(object: T, extract: F) -> Self
    where
        F: FnOnce(&T) -> String,
    {
        let state = extract(&object);
        Self { object, state }
    }
}

/// What a probe returns on each cycle.
pub type ProbeResult<T> = Result<PollResult<T>, ProbeError>;

/// Timing knobs for a wait.
///
/// The interval between polls starts at `poll_interval` and grows by
/// `backoff_multiplier` after every pending observation, up to `max_interval`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollSettings {
    /// Delay before the first probe
    pub initial_delay: Duration,
    /// First interval between probes
    pub poll_interval: Duration,
    /// Upper bound for the interval between probes
    pub max_interval: Duration,
    /// Growth factor applied after each pending observation
    pub backoff_multiplier: f64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            initial_delay: Duration::ZERO,
            poll_interval: Duration::from_millis(100),
            max_interval: Duration::from_secs(10),
            backoff_multiplier: 2.0,
        }
    }
}

impl PollSettings {
    /// Poll at a constant cadence.
    pub fn fixed(interval: Duration) -> Self {
        Self {
            initial_delay: Duration::ZERO,
            poll_interval: interval,
            max_interval: interval,
            backoff_multiplier: 1.0,
        }
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub(crate) fn backoff(&self) -> Backoff {
        Backoff {
            next: self.poll_interval.min(self.max_interval),
            max: self.max_interval,
            multiplier: self.backoff_multiplier.max(1.0),
        }
    }
}

/// Sequence of inter-poll delays derived from [`PollSettings`].
#[derive(Debug, Clone)]
pub(crate) struct Backoff {
    next: Duration,
    max: Duration,
    multiplier: f64,
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let current = self.next;
        self.next = Duration::try_from_secs_f64(
            (current.as_secs_f64() * self.multiplier).min(self.max.as_secs_f64()),
        )
        .unwrap_or(self.max);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_extracts_state() {
        let result = PollResult::observe(("my-cluster", "ACTIVE"), |(_, s)| s.to_string());
        assert_eq!(result.state, "ACTIVE");
        assert_eq!(result.object.0, "my-cluster");
    }

    #[test]
    fn test_default_backoff_doubles_and_caps() {
        let delays: Vec<Duration> = PollSettings::default().backoff().take(10).collect();
        assert_eq!(delays[0], Duration::from_millis(100));
        assert_eq!(delays[1], Duration::from_millis(200));
        assert_eq!(delays[2], Duration::from_millis(400));
        assert_eq!(delays[7], Duration::from_secs(10));
        assert_eq!(delays[9], Duration::from_secs(10));
    }

    #[test]
    fn test_fixed_backoff_is_constant() {
        let delays: Vec<Duration> = PollSettings::fixed(Duration::from_secs(3))
            .backoff()
            .take(4)
            .collect();
        assert!(delays.iter().all(|d| *d == Duration::from_secs(3)));
    }

    #[test]
    fn test_multiplier_below_one_does_not_shrink() {
        let settings = PollSettings {
            backoff_multiplier: 0.5,
            ..PollSettings::fixed(Duration::from_secs(1))
        };
        let delays: Vec<Duration> = settings.backoff().take(3).collect();
        assert_eq!(delays, vec![Duration::from_secs(1); 3]);
    }

    #[test]
    fn test_backoff_saturates_at_unbounded_max() {
        let settings = PollSettings {
            initial_delay: Duration::ZERO,
            poll_interval: Duration::from_secs(1),
            max_interval: Duration::MAX,
            backoff_multiplier: f64::MAX,
        };
        let delays: Vec<Duration> = settings.backoff().take(3).collect();
        assert_eq!(delays[0], Duration::from_secs(1));
        assert_eq!(delays[1], Duration::MAX);
        assert_eq!(delays[2], Duration::MAX);
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: PollSettings =
            serde_json::from_str(r#"{"initial_delay": {"secs": 2, "nanos": 0}}"#).unwrap();
        assert_eq!(settings.initial_delay, Duration::from_secs(2));
        assert_eq!(settings.poll_interval, Duration::from_millis(100));
    }
}
