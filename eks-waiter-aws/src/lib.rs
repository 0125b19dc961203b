//! This crate provides waiters for Amazon EKS resources built on `eks-waiter-core`:
//! - cluster, managed node group, Fargate profile and add-on lifecycle waits
//! - update waits that report every error attached to a failed or cancelled update
//! - a [`StatusSource`] seam so waiters can run against a scripted source in tests
//!

mod aws;
pub mod commands;
mod config;
mod error;
pub mod probe;
pub mod test_utils;
pub mod types;

// Re-exports for a small, focused public API
pub use aws::eks_client::AwsEksClient;
pub use aws::{AwsError, AwsResult, StatusSource, UpdateScope};
pub use commands::EksWaiterService;
pub use config::{
    WaiterTimeouts, ADDON_CREATED_TIMEOUT, ADDON_DELETED_TIMEOUT, ADDON_UPDATED_TIMEOUT,
};
pub use error::{EksWaiterError, EksWaiterResult};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{cluster_status, Cluster};
    use eks_waiter_core::PollSettings;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    #[tokio::test(start_paused = true)]
    async fn test_cluster_created_through_public_api() {
        let source = test_utils::ScriptedSource::new().with_clusters(vec![
            Ok(Cluster {
                name: "demo".into(),
                status: cluster_status::CREATING.into(),
                ..Default::default()
            }),
            Ok(Cluster {
                name: "demo".into(),
                status: cluster_status::ACTIVE.into(),
                endpoint: Some("https://example.eks.amazonaws.com".into()),
                ..Default::default()
            }),
        ]);
        let svc = EksWaiterService::with_source(source)
            .with_poll_settings(PollSettings::fixed(Duration::from_secs(30)));

        let cluster = svc
            .cluster_created("demo", Duration::from_secs(1800), &CancellationToken::new())
            .await
            .expect("cluster should become active");
        assert_eq!(
            cluster.endpoint.as_deref(),
            Some("https://example.eks.amazonaws.com")
        );
    }
}
