//! AWS EKS client wrapper for status lookups

use async_trait::async_trait;
use aws_sdk_eks::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_eks::types as sdk;
use aws_sdk_eks::Client as EksClient;

use crate::aws::{AwsError, AwsResult, StatusSource, UpdateScope};
use crate::types::{
    Addon, AddonHealth, AddonIssue, Cluster, FargateProfile, Nodegroup, Update, UpdateError,
};

const RESOURCE_NOT_FOUND: &str = "ResourceNotFoundException";

pub struct AwsEksClient {
    client: EksClient,
}

impl AwsEksClient {
    pub fn new(client: EksClient) -> Self {
        Self { client }
    }

    pub fn from_conf(config: &aws_config::SdkConfig) -> Self {
        Self::new(EksClient::new(config))
    }
}

#[async_trait]
impl StatusSource for AwsEksClient {
    async fn describe_cluster(&self, name: &str) -> AwsResult<Cluster> {
        let what = format!("EKS cluster ({name})");
        let output = self
            .client
            .describe_cluster()
            .name(name)
            .send()
            .await
            .map_err(|e| describe_error(&e, &what))?;

        require(output.cluster(), what, cluster_from_sdk)
    }

    async fn describe_nodegroup(
        &self,
        cluster_name: &str,
        nodegroup_name: &str,
    ) -> AwsResult<Nodegroup> {
        let what = format!("EKS node group ({cluster_name}:{nodegroup_name})");
        let output = self
            .client
            .describe_nodegroup()
            .cluster_name(cluster_name)
            .nodegroup_name(nodegroup_name)
            .send()
            .await
            .map_err(|e| describe_error(&e, &what))?;

        require(output.nodegroup(), what, nodegroup_from_sdk)
    }

    async fn describe_fargate_profile(
        &self,
        cluster_name: &str,
        fargate_profile_name: &str,
    ) -> AwsResult<FargateProfile> {
        let what = format!("EKS Fargate profile ({cluster_name}:{fargate_profile_name})");
        let output = self
            .client
            .describe_fargate_profile()
            .cluster_name(cluster_name)
            .fargate_profile_name(fargate_profile_name)
            .send()
            .await
            .map_err(|e| describe_error(&e, &what))?;

        require(output.fargate_profile(), what, fargate_profile_from_sdk)
    }

    async fn describe_addon(&self, cluster_name: &str, addon_name: &str) -> AwsResult<Addon> {
        let what = format!("EKS add-on ({cluster_name}:{addon_name})");
        let output = self
            .client
            .describe_addon()
            .cluster_name(cluster_name)
            .addon_name(addon_name)
            .send()
            .await
            .map_err(|e| describe_error(&e, &what))?;

        require(output.addon(), what, addon_from_sdk)
    }

    async fn describe_update(&self, scope: &UpdateScope, update_id: &str) -> AwsResult<Update> {
        let what = format!("EKS update ({update_id})");
        let mut request = self
            .client
            .describe_update()
            .name(scope.cluster_name())
            .update_id(update_id);
        match scope {
            UpdateScope::Cluster { .. } => {}
            UpdateScope::Nodegroup { nodegroup_name, .. } => {
                request = request.nodegroup_name(nodegroup_name);
            }
            UpdateScope::Addon { addon_name, .. } => {
                request = request.addon_name(addon_name);
            }
        }

        let output = request
            .send()
            .await
            .map_err(|e| describe_error(&e, &what))?;

        require(output.update(), what, update_from_sdk)
    }
}

/// Map a failed describe call. A `ResourceNotFoundException` means the
/// resource is gone; anything else is reported with its full error chain.
fn describe_error<E, R>(err: &SdkError<E, R>, what: &str) -> AwsError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    if is_not_found(err.as_service_error()) {
        AwsError::NotFound(what.to_string())
    } else {
        AwsError::SdkError(format!(
            "Failed to describe {what}: {}",
            DisplayErrorContext(err)
        ))
    }
}

fn is_not_found<E: ProvideErrorMetadata>(service_error: Option<&E>) -> bool {
    service_error.and_then(ProvideErrorMetadata::code) == Some(RESOURCE_NOT_FOUND)
}

/// A successful describe response without the resource body counts as not found.
fn require<S, T>(
    resource: Option<&S>,
    what: String,
    convert: impl FnOnce(&S) -> T,
) -> AwsResult<T> {
    resource.map(convert).ok_or(AwsError::NotFound(what))
}

fn cluster_from_sdk(cluster: &sdk::Cluster) -> Cluster {
    Cluster {
        name: cluster.name().unwrap_or_default().to_string(),
        arn: cluster.arn().map(str::to_string),
        status: cluster
            .status()
            .map(|s| s.as_str().to_string())
            .unwrap_or_default(),
        version: cluster.version().map(str::to_string),
        endpoint: cluster.endpoint().map(str::to_string),
    }
}

fn nodegroup_from_sdk(nodegroup: &sdk::Nodegroup) -> Nodegroup {
    Nodegroup {
        cluster_name: nodegroup.cluster_name().unwrap_or_default().to_string(),
        nodegroup_name: nodegroup.nodegroup_name().unwrap_or_default().to_string(),
        arn: nodegroup.nodegroup_arn().map(str::to_string),
        status: nodegroup
            .status()
            .map(|s| s.as_str().to_string())
            .unwrap_or_default(),
    }
}

fn fargate_profile_from_sdk(profile: &sdk::FargateProfile) -> FargateProfile {
    FargateProfile {
        cluster_name: profile.cluster_name().unwrap_or_default().to_string(),
        fargate_profile_name: profile.fargate_profile_name().unwrap_or_default().to_string(),
        arn: profile.fargate_profile_arn().map(str::to_string),
        status: profile
            .status()
            .map(|s| s.as_str().to_string())
            .unwrap_or_default(),
    }
}

fn addon_from_sdk(addon: &sdk::Addon) -> Addon {
    let issues = addon
        .health()
        .map(|health| {
            health
                .issues()
                .iter()
                .map(|issue| AddonIssue {
                    code: issue.code().map(|c| c.as_str().to_string()),
                    message: issue.message().map(str::to_string),
                    resource_ids: issue.resource_ids().to_vec(),
                })
                .collect()
        })
        .unwrap_or_default();

    Addon {
        cluster_name: addon.cluster_name().unwrap_or_default().to_string(),
        addon_name: addon.addon_name().unwrap_or_default().to_string(),
        addon_version: addon.addon_version().map(str::to_string),
        status: addon
            .status()
            .map(|s| s.as_str().to_string())
            .unwrap_or_default(),
        health: AddonHealth { issues },
    }
}

fn update_from_sdk(update: &sdk::Update) -> Update {
    Update {
        id: update.id().unwrap_or_default().to_string(),
        status: update
            .status()
            .map(|s| s.as_str().to_string())
            .unwrap_or_default(),
        update_type: update.r#type().map(|t| t.as_str().to_string()),
        errors: update
            .errors()
            .iter()
            .map(|e| UpdateError {
                error_code: e.error_code().map(|c| c.as_str().to_string()),
                error_message: e.error_message().map(str::to_string),
                resource_ids: e.resource_ids().to_vec(),
            })
            .collect(),
    }
}
