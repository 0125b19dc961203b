//! Cluster waiters

use eks_waiter_core::wait;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::{
    expect_snapshot, remaining_snapshot, update_classifier, UPDATE_PENDING, UPDATE_TERMINAL,
};
use crate::aws::{StatusSource, UpdateScope};
use crate::error::EksWaiterResult;
use crate::probe::{cluster_status, update_status};
use crate::types::{cluster_status as status, Cluster, Update};

impl<S: StatusSource> super::service::EksWaiterService<S> {
    /// Wait for a cluster to go from CREATING to ACTIVE
    pub async fn cluster_created(
        &self,
        name: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> EksWaiterResult<Cluster> {
        let what = format!("EKS cluster ({name}) creation");
        let request = self
            .request(&what, cluster_status(&self.source, name))
            .pending([status::CREATING])
            .target([status::ACTIVE])
            .timeout(timeout);

        let settled = wait(request, cancel).await?;
        expect_snapshot(settled, &what)
    }

    /// Wait for a cluster to disappear
    ///
    /// Returns `None` once the cluster is gone, or the last snapshot if it
    /// settled in a state other than ACTIVE/DELETING.
    pub async fn cluster_deleted(
        &self,
        name: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> EksWaiterResult<Option<Cluster>> {
        let what = format!("EKS cluster ({name}) deletion");
        let request = self
            .request(&what, cluster_status(&self.source, name))
            .pending([status::ACTIVE, status::DELETING])
            .timeout(timeout);

        Ok(remaining_snapshot(wait(request, cancel).await?, &what))
    }

    /// Wait for a cluster update to finish successfully
    ///
    /// Cancelled and failed updates are reported with every error the update carries.
    pub async fn cluster_update_successful(
        &self,
        name: &str,
        update_id: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> EksWaiterResult<Update> {
        let scope = UpdateScope::Cluster {
            name: name.to_string(),
        };
        let what = format!("EKS cluster ({name}) update ({update_id})");
        let request = self
            .request(&what, update_status(&self.source, &scope, update_id))
            .pending(UPDATE_PENDING)
            .target(UPDATE_TERMINAL)
            .timeout(timeout);

        let outcome = wait(request, cancel).await;
        let settled = update_classifier("EKS cluster", name, update_id).classify(outcome)?;
        expect_snapshot(settled, &what)
    }
}
