//! Commands module - resource waiters built on the EKS waiter service

mod addon;
mod cluster;
mod fargate_profile;
mod nodegroup;
pub(crate) mod service;

pub use service::EksWaiterService;

use eks_waiter_core::{Operation, OutcomeClassifier, Settled};
use log::info;

use crate::error::{EksWaiterError, EksWaiterResult};
use crate::types::update_status;

pub(crate) const UPDATE_PENDING: [&str; 1] = [update_status::IN_PROGRESS];

/// Updates settle on any of these; the classifier sorts out which ones failed.
pub(crate) const UPDATE_TERMINAL: [&str; 3] = [
    update_status::CANCELLED,
    update_status::FAILED,
    update_status::SUCCESSFUL,
];

pub(crate) fn update_classifier(kind: &str, name: &str, update_id: &str) -> OutcomeClassifier {
    OutcomeClassifier::new(
        kind,
        name,
        Operation::Update {
            id: update_id.to_string(),
        },
    )
    .success(update_status::SUCCESSFUL)
    .failures([update_status::CANCELLED, update_status::FAILED])
}

/// Unwrap the snapshot of a wait whose target set is not empty.
pub(crate) fn expect_snapshot<T>(settled: Settled<T>, what: &str) -> EksWaiterResult<T> {
    settled
        .into_object()
        .ok_or_else(|| EksWaiterError::MissingSnapshot(what.to_string()))
}

/// Snapshot left by a delete wait that settled instead of seeing the resource disappear.
pub(crate) fn remaining_snapshot<T>(settled: Settled<T>, what: &str) -> Option<T> {
    if let Some(state) = settled.state() {
        info!("{} stopped in state {} instead of disappearing", what, state);
    }
    settled.into_object()
}
