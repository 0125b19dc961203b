//! Error types for EKS waiters.

use eks_waiter_core::{AggregatedFailure, WaitError, WaitFailure};
use thiserror::Error;

use crate::types::{Addon, Update};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EksWaiterError {
    #[error(transparent)]
    Wait(#[from] WaitError),

    /// The add-on settled in a failure state; `addon` is the snapshot that reported it.
    #[error("{failure}")]
    AddonFailed {
        addon: Box<Addon>,
        failure: AggregatedFailure,
    },

    /// The update was cancelled or failed; `update` carries its error entries.
    #[error("{failure}")]
    UpdateFailed {
        update: Box<Update>,
        failure: AggregatedFailure,
    },

    /// A non-delete wait settled without returning the resource.
    #[error("wait for {0} settled without a resource snapshot")]
    MissingSnapshot(String),
}

impl EksWaiterError {
    /// The engine error behind this failure. Classified failures are not
    /// engine errors; see [`EksWaiterError::failure`].
    pub fn wait_error(&self) -> Option<&WaitError> {
        match self {
            Self::Wait(err) => Some(err),
            Self::AddonFailed { .. } | Self::UpdateFailed { .. } | Self::MissingSnapshot(_) => {
                None
            }
        }
    }

    pub fn failure(&self) -> Option<&AggregatedFailure> {
        match self {
            Self::AddonFailed { failure, .. } | Self::UpdateFailed { failure, .. } => {
                Some(failure)
            }
            Self::Wait(WaitError::Failed(failure)) => Some(failure),
            Self::Wait(_) | Self::MissingSnapshot(_) => None,
        }
    }
}

impl From<WaitFailure<Addon>> for EksWaiterError {
    fn from(failure: WaitFailure<Addon>) -> Self {
        match failure.into_parts() {
            (Some(addon), WaitError::Failed(failure)) => Self::AddonFailed {
                addon: Box::new(addon),
                failure,
            },
            (_, err) => Self::Wait(err),
        }
    }
}

impl From<WaitFailure<Update>> for EksWaiterError {
    fn from(failure: WaitFailure<Update>) -> Self {
        match failure.into_parts() {
            (Some(update), WaitError::Failed(failure)) => Self::UpdateFailed {
                update: Box::new(update),
                failure,
            },
            (_, err) => Self::Wait(err),
        }
    }
}

pub type EksWaiterResult<T> = Result<T, EksWaiterError>;
