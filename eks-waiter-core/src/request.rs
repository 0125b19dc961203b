//! Per-invocation wait configuration.

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use crate::error::{WaitError, WaitResult};
use crate::poll::PollSettings;

/// Default upper bound for a wait when the caller does not set one.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(20 * 60);

/// Everything the engine needs for one wait: which states keep it polling,
/// which states end it, how long to try, and the probe to call.
///
/// An empty target set means the resource disappearing is the success
/// condition (delete completion).
pub struct WaitRequest<P> {
    pub(crate) description: String,
    pub(crate) pending: BTreeSet<String>,
    pub(crate) target: BTreeSet<String>,
    pub(crate) timeout: Duration,
    pub(crate) settings: PollSettings,
    pub(crate) probe: P,
}

impl<P> WaitRequest<P> {
    /// Create a request with no states, the default timeout and default polling.
    ///
    /// `description` only shows up in log output.
    pub fn new(description: impl Into<String>, probe: P) -> Self {
        Self {
            description: description.into(),
            pending: BTreeSet::new(),
            target: BTreeSet::new(),
            timeout: DEFAULT_WAIT_TIMEOUT,
            settings: PollSettings::default(),
            probe,
        }
    }

    pub fn pending<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pending = states.into_iter().map(Into::into).collect();
        self
    }

    pub fn target<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target = states.into_iter().map(Into::into).collect();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn poll_settings(mut self, settings: PollSettings) -> Self {
        self.settings = settings;
        self
    }

    /// True when the wait succeeds on disappearance rather than on a state.
    pub fn is_delete_wait(&self) -> bool {
        self.target.is_empty()
    }

    /// Reject requests whose pending and target sets overlap.
    pub fn validate(&self) -> WaitResult<()> {
        let overlap: Vec<&str> = self
            .pending
            .intersection(&self.target)
            .map(String::as_str)
            .collect();
        if !overlap.is_empty() {
            return Err(WaitError::InvalidRequest(format!(
                "states {} are both pending and target for {}",
                overlap.join(", "),
                self.description
            )));
        }
        Ok(())
    }

    pub(crate) fn expected(&self) -> Vec<String> {
        self.target.iter().cloned().collect()
    }
}

impl<P> fmt::Debug for WaitRequest<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitRequest")
            .field("description", &self.description)
            .field("pending", &self.pending)
            .field("target", &self.target)
            .field("timeout", &self.timeout)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
