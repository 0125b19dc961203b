//! Error types for state waits.

use std::time::Duration;
use thiserror::Error;

use crate::classifier::AggregatedFailure;

/// Failure reported by a status probe.
///
/// The probe owner decides which remote responses count as "not found";
/// the engine only treats that variant specially for delete-style waits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The resource does not exist (anymore).
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The status request itself failed (network, auth, malformed response).
    #[error("status request failed: {0}")]
    Request(String),
}

impl ProbeError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Errors that end a wait.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WaitError {
    /// The probe failed; never retried by the engine.
    #[error("status probe failed: {0}")]
    Probe(#[from] ProbeError),

    /// The deadline passed while the resource was still pending.
    #[error(
        "timeout while waiting for state to become settled (last state: {}, timeout: {timeout:?})",
        display_state(.last_state)
    )]
    Timeout {
        last_state: Option<String>,
        timeout: Duration,
    },

    /// The probe reported a state that is neither pending nor target.
    #[error("unexpected state '{state}', wanted target '{}'", .expected.join(", "))]
    UnexpectedState {
        state: String,
        expected: Vec<String>,
    },

    /// A terminal state was reached, but it is a failure state.
    #[error("{0}")]
    Failed(AggregatedFailure),

    /// The caller cancelled the wait.
    #[error("wait cancelled (last state: {})", display_state(.last_state))]
    Cancelled { last_state: Option<String> },

    /// The wait request is malformed and was rejected before polling.
    #[error("invalid wait request: {0}")]
    InvalidRequest(String),
}

impl WaitError {
    /// Last state observed before the wait ended, when one is known.
    pub fn last_state(&self) -> Option<&str> {
        match self {
            Self::Timeout { last_state, .. } | Self::Cancelled { last_state } => {
                last_state.as_deref()
            }
            Self::UnexpectedState { state, .. } => Some(state),
            Self::Failed(failure) => Some(&failure.status),
            Self::Probe(_) | Self::InvalidRequest(_) => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

fn display_state(state: &Option<String>) -> &str {
    state.as_deref().unwrap_or("<none>")
}

/// Result type alias for wait operations.
pub type WaitResult<T> = Result<T, WaitError>;
