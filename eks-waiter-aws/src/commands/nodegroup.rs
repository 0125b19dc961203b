//! Managed node group waiters

use eks_waiter_core::wait;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::{
    expect_snapshot, remaining_snapshot, update_classifier, UPDATE_PENDING, UPDATE_TERMINAL,
};
use crate::aws::{StatusSource, UpdateScope};
use crate::error::EksWaiterResult;
use crate::probe::{nodegroup_status, update_status};
use crate::types::{nodegroup_status as status, Nodegroup, Update};

impl<S: StatusSource> super::service::EksWaiterService<S> {
    pub async fn nodegroup_created(
        &self,
        cluster_name: &str,
        nodegroup_name: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> EksWaiterResult<Nodegroup> {
        let what = format!("EKS node group ({cluster_name}:{nodegroup_name}) creation");
        let request = self
            .request(
                &what,
                nodegroup_status(&self.source, cluster_name, nodegroup_name),
            )
            .pending([status::CREATING])
            .target([status::ACTIVE])
            .timeout(timeout);

        let settled = wait(request, cancel).await?;
        expect_snapshot(settled, &what)
    }

    pub async fn nodegroup_deleted(
        &self,
        cluster_name: &str,
        nodegroup_name: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> EksWaiterResult<Option<Nodegroup>> {
        let what = format!("EKS node group ({cluster_name}:{nodegroup_name}) deletion");
        let request = self
            .request(
                &what,
                nodegroup_status(&self.source, cluster_name, nodegroup_name),
            )
            .pending([status::ACTIVE, status::DELETING])
            .timeout(timeout);

        Ok(remaining_snapshot(wait(request, cancel).await?, &what))
    }

    pub async fn nodegroup_update_successful(
        &self,
        cluster_name: &str,
        nodegroup_name: &str,
        update_id: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> EksWaiterResult<Update> {
        let scope = UpdateScope::Nodegroup {
            cluster_name: cluster_name.to_string(),
            nodegroup_name: nodegroup_name.to_string(),
        };
        let name = format!("{cluster_name}:{nodegroup_name}");
        let what = format!("EKS node group ({name}) update ({update_id})");
        let request = self
            .request(&what, update_status(&self.source, &scope, update_id))
            .pending(UPDATE_PENDING)
            .target(UPDATE_TERMINAL)
            .timeout(timeout);

        let outcome = wait(request, cancel).await;
        let settled = update_classifier("EKS node group", &name, update_id).classify(outcome)?;
        expect_snapshot(settled, &what)
    }
}
