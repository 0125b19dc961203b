//! Status probes for EKS resources.
//!
//! Each function returns a closure that performs one describe call per
//! invocation and reports the resource's status as the poll discriminator.

use eks_waiter_core::{PollResult, ProbeResult};
use futures::future::BoxFuture;

use crate::aws::{StatusSource, UpdateScope};
use crate::types::{Addon, Cluster, FargateProfile, Nodegroup, Update};

pub fn cluster_status<'a, S>(
    source: &'a S,
    name: &'a str,
) -> impl FnMut() -> BoxFuture<'a, ProbeResult<Cluster>> + 'a
where
    S: StatusSource + ?Sized,
{
    move || {
        Box::pin(async move {
            let cluster = source.describe_cluster(name).await?;
            Ok(PollResult::observe(cluster, |c| c.status.clone()))
        })
    }
}

pub fn nodegroup_status<'a, S>(
    source: &'a S,
    cluster_name: &'a str,
    nodegroup_name: &'a str,
) -> impl FnMut() -> BoxFuture<'a, ProbeResult<Nodegroup>> + 'a
where
    S: StatusSource + ?Sized,
{
    move || {
        Box::pin(async move {
            let nodegroup = source
                .describe_nodegroup(cluster_name, nodegroup_name)
                .await?;
            Ok(PollResult::observe(nodegroup, |n| n.status.clone()))
        })
    }
}

pub fn fargate_profile_status<'a, S>(
    source: &'a S,
    cluster_name: &'a str,
    fargate_profile_name: &'a str,
) -> impl FnMut() -> BoxFuture<'a, ProbeResult<FargateProfile>> + 'a
where
    S: StatusSource + ?Sized,
{
    move || {
        Box::pin(async move {
            let profile = source
                .describe_fargate_profile(cluster_name, fargate_profile_name)
                .await?;
            Ok(PollResult::observe(profile, |p| p.status.clone()))
        })
    }
}

pub fn addon_status<'a, S>(
    source: &'a S,
    cluster_name: &'a str,
    addon_name: &'a str,
) -> impl FnMut() -> BoxFuture<'a, ProbeResult<Addon>> + 'a
where
    S: StatusSource + ?Sized,
{
    move || {
        Box::pin(async move {
            let addon = source.describe_addon(cluster_name, addon_name).await?;
            Ok(PollResult::observe(addon, |a| a.status.clone()))
        })
    }
}

pub fn update_status<'a, S>(
    source: &'a S,
    scope: &'a UpdateScope,
    update_id: &'a str,
) -> impl FnMut() -> BoxFuture<'a, ProbeResult<Update>> + 'a
where
    S: StatusSource + ?Sized,
{
    move || {
        Box::pin(async move {
            let update = source.describe_update(scope, update_id).await?;
            Ok(PollResult::observe(update, |u| u.status.clone()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::AwsError;
    use crate::test_utils::ScriptedSource;
    use crate::types::cluster_status;
    use eks_waiter_core::ProbeError;

    #[tokio::test]
    async fn test_cluster_probe_reports_status() {
        let source = ScriptedSource::new().with_clusters(vec![Ok(Cluster {
            name: "demo".into(),
            status: cluster_status::CREATING.into(),
            ..Default::default()
        })]);

        let mut probe = cluster_status(&source, "demo");
        let observed = probe().await.unwrap();
        assert_eq!(observed.state, "CREATING");
        assert_eq!(observed.object.name, "demo");
    }

    #[tokio::test]
    async fn test_probe_maps_not_found() {
        let source = ScriptedSource::new()
            .with_addons(vec![Err(AwsError::NotFound("EKS add-on (demo:vpc-cni)".into()))]);

        let mut probe = addon_status(&source, "demo", "vpc-cni");
        let err = probe().await.unwrap_err();
        assert_eq!(err, ProbeError::NotFound("EKS add-on (demo:vpc-cni)".into()));
    }

    #[tokio::test]
    async fn test_update_probe_passes_scope() {
        let source = ScriptedSource::new().with_updates(vec![Ok(Update {
            id: "u-1".into(),
            status: "InProgress".into(),
            ..Default::default()
        })]);
        let scope = UpdateScope::Nodegroup {
            cluster_name: "demo".into(),
            nodegroup_name: "workers".into(),
        };

        let mut probe = update_status(&source, &scope, "u-1");
        assert_eq!(probe().await.unwrap().state, "InProgress");
        assert_eq!(source.update_requests(), vec![(scope.clone(), "u-1".to_string())]);
    }
}
