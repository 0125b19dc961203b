//! AWS SDK integration: EKS client wrapper and the status source abstraction.

pub mod eks_client;

use async_trait::async_trait;
use eks_waiter_core::ProbeError;
use thiserror::Error;

use crate::types::{Addon, Cluster, FargateProfile, Nodegroup, Update};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AwsError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("AWS SDK error: {0}")]
    SdkError(String),
}

pub type AwsResult<T> = Result<T, AwsError>;

/// Maps describe failures onto what the engine understands: only a missing
/// resource is special, everything else is a plain request failure.
impl From<AwsError> for ProbeError {
    fn from(err: AwsError) -> Self {
        match err {
            AwsError::NotFound(what) => ProbeError::NotFound(what),
            AwsError::SdkError(msg) => ProbeError::Request(msg),
        }
    }
}

/// Which resource an update belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateScope {
    Cluster {
        name: String,
    },
    Nodegroup {
        cluster_name: String,
        nodegroup_name: String,
    },
    Addon {
        cluster_name: String,
        addon_name: String,
    },
}

impl UpdateScope {
    pub fn cluster_name(&self) -> &str {
        match self {
            Self::Cluster { name } => name,
            Self::Nodegroup { cluster_name, .. } | Self::Addon { cluster_name, .. } => {
                cluster_name
            }
        }
    }
}

/// Read-only view of EKS resource state.
///
/// Implementations return [`AwsError::NotFound`] when the resource does not
/// exist, so delete waits can tell "gone" apart from a failed request.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn describe_cluster(&self, name: &str) -> AwsResult<Cluster>;

    async fn describe_nodegroup(
        &self,
        cluster_name: &str,
        nodegroup_name: &str,
    ) -> AwsResult<Nodegroup>;

    async fn describe_fargate_profile(
        &self,
        cluster_name: &str,
        fargate_profile_name: &str,
    ) -> AwsResult<FargateProfile>;

    async fn describe_addon(&self, cluster_name: &str, addon_name: &str) -> AwsResult<Addon>;

    async fn describe_update(&self, scope: &UpdateScope, update_id: &str) -> AwsResult<Update>;
}
