//! Fargate profile waiters

use eks_waiter_core::wait;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::{expect_snapshot, remaining_snapshot};
use crate::aws::StatusSource;
use crate::error::EksWaiterResult;
use crate::probe::fargate_profile_status;
use crate::types::{fargate_profile_status as status, FargateProfile};

impl<S: StatusSource> super::service::EksWaiterService<S> {
    pub async fn fargate_profile_created(
        &self,
        cluster_name: &str,
        fargate_profile_name: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> EksWaiterResult<FargateProfile> {
        let what = format!("EKS Fargate profile ({cluster_name}:{fargate_profile_name}) creation");
        let request = self
            .request(
                &what,
                fargate_profile_status(&self.source, cluster_name, fargate_profile_name),
            )
            .pending([status::CREATING])
            .target([status::ACTIVE])
            .timeout(timeout);

        let settled = wait(request, cancel).await?;
        expect_snapshot(settled, &what)
    }

    pub async fn fargate_profile_deleted(
        &self,
        cluster_name: &str,
        fargate_profile_name: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> EksWaiterResult<Option<FargateProfile>> {
        let what = format!("EKS Fargate profile ({cluster_name}:{fargate_profile_name}) deletion");
        let request = self
            .request(
                &what,
                fargate_profile_status(&self.source, cluster_name, fargate_profile_name),
            )
            .pending([status::ACTIVE, status::DELETING])
            .timeout(timeout);

        Ok(remaining_snapshot(wait(request, cancel).await?, &what))
    }
}
