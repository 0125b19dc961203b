//! Snapshots of the EKS resources the waiters observe, plus their status values.

use eks_waiter_core::{FailureDetails, SubError};
use serde::{Deserialize, Serialize};

/// Status values reported for clusters.
pub mod cluster_status {
    pub const CREATING: &str = "CREATING";
    pub const ACTIVE: &str = "ACTIVE";
    pub const DELETING: &str = "DELETING";
    pub const FAILED: &str = "FAILED";
    pub const UPDATING: &str = "UPDATING";
    pub const PENDING: &str = "PENDING";
}

/// Status values reported for managed node groups.
pub mod nodegroup_status {
    pub const CREATING: &str = "CREATING";
    pub const ACTIVE: &str = "ACTIVE";
    pub const UPDATING: &str = "UPDATING";
    pub const DELETING: &str = "DELETING";
    pub const CREATE_FAILED: &str = "CREATE_FAILED";
    pub const DELETE_FAILED: &str = "DELETE_FAILED";
    pub const DEGRADED: &str = "DEGRADED";
}

/// Status values reported for Fargate profiles.
pub mod fargate_profile_status {
    pub const CREATING: &str = "CREATING";
    pub const ACTIVE: &str = "ACTIVE";
    pub const DELETING: &str = "DELETING";
    pub const CREATE_FAILED: &str = "CREATE_FAILED";
    pub const DELETE_FAILED: &str = "DELETE_FAILED";
}

/// Status values reported for add-ons.
pub mod addon_status {
    pub const CREATING: &str = "CREATING";
    pub const ACTIVE: &str = "ACTIVE";
    pub const CREATE_FAILED: &str = "CREATE_FAILED";
    pub const UPDATING: &str = "UPDATING";
    pub const DELETING: &str = "DELETING";
    pub const DELETE_FAILED: &str = "DELETE_FAILED";
    pub const DEGRADED: &str = "DEGRADED";
}

/// Status values reported for updates (cluster, node group, or add-on).
pub mod update_status {
    pub const IN_PROGRESS: &str = "InProgress";
    pub const FAILED: &str = "Failed";
    pub const CANCELLED: &str = "Cancelled";
    pub const SUCCESSFUL: &str = "Successful";
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub name: String,
    pub arn: Option<String>,
    pub status: String,
    pub version: Option<String>,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nodegroup {
    pub cluster_name: String,
    pub nodegroup_name: String,
    pub arn: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FargateProfile {
    pub cluster_name: String,
    pub fargate_profile_name: String,
    pub arn: Option<String>,
    pub status: String,
}

/// One health problem reported by an add-on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonIssue {
    pub code: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub resource_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonHealth {
    #[serde(default)]
    pub issues: Vec<AddonIssue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Addon {
    pub cluster_name: String,
    pub addon_name: String,
    pub addon_version: Option<String>,
    pub status: String,
    #[serde(default)]
    pub health: AddonHealth,
}

/// One error entry attached to a failed or cancelled update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateError {
    pub error_code: Option<String>,
    pub error_message: Option<String>,
    #[serde(default)]
    pub resource_ids: Vec<String>,
}

/// An asynchronous update against a cluster, node group, or add-on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Update {
    pub id: String,
    pub status: String,
    pub update_type: Option<String>,
    #[serde(default)]
    pub errors: Vec<UpdateError>,
}

impl FailureDetails for Update {
    fn failure_details(&self) -> Vec<SubError> {
        self.errors
            .iter()
            .map(|e| {
                SubError::new(
                    e.error_code.clone().unwrap_or_default(),
                    e.error_message.clone().unwrap_or_default(),
                )
            })
            .collect()
    }
}

impl FailureDetails for Addon {
    fn failure_details(&self) -> Vec<SubError> {
        self.health
            .issues
            .iter()
            .map(|issue| {
                SubError::new(
                    issue.code.clone().unwrap_or_default(),
                    issue.message.clone().unwrap_or_default(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_failure_details_keep_order_and_blank_missing_fields() {
        let update = Update {
            id: "u-1".into(),
            status: update_status::FAILED.into(),
            update_type: Some("VersionUpdate".into()),
            errors: vec![
                UpdateError {
                    error_code: Some("SubnetNotFound".into()),
                    error_message: Some("subnet-123 is gone".into()),
                    resource_ids: vec!["subnet-123".into()],
                },
                UpdateError {
                    error_code: None,
                    error_message: Some("unknown".into()),
                    resource_ids: vec![],
                },
            ],
        };

        let details = update.failure_details();
        assert_eq!(
            details,
            vec![
                SubError::new("SubnetNotFound", "subnet-123 is gone"),
                SubError::new("", "unknown"),
            ]
        );
    }

    #[test]
    fn test_addon_failure_details_come_from_health_issues() {
        let addon = Addon {
            cluster_name: "demo".into(),
            addon_name: "vpc-cni".into(),
            status: addon_status::CREATE_FAILED.into(),
            health: AddonHealth {
                issues: vec![AddonIssue {
                    code: Some("AccessDenied".into()),
                    message: Some("missing iam:PassRole".into()),
                    resource_ids: vec![],
                }],
            },
            ..Default::default()
        };

        assert_eq!(
            addon.failure_details(),
            vec![SubError::new("AccessDenied", "missing iam:PassRole")]
        );
    }

    #[test]
    fn test_addon_deserializes_without_health() {
        let addon: Addon = serde_json::from_str(
            r#"{"clusterName":"demo","addonName":"coredns","addonVersion":null,"status":"ACTIVE"}"#,
        )
        .unwrap();
        assert!(addon.health.issues.is_empty());
        assert!(addon.failure_details().is_empty());
    }
}
