//! Add-on waiters
//!
//! Unlike the other resource kinds, add-on timeouts come from the service's
//! [`WaiterTimeouts`](crate::WaiterTimeouts) rather than from the caller.

use eks_waiter_core::{wait, Operation, OutcomeClassifier};
use tokio_util::sync::CancellationToken;

use super::{
    expect_snapshot, remaining_snapshot, update_classifier, UPDATE_PENDING, UPDATE_TERMINAL,
};
use crate::aws::{StatusSource, UpdateScope};
use crate::error::EksWaiterResult;
use crate::probe::{addon_status, update_status};
use crate::types::{addon_status as status, Addon};

const ADDON_KIND: &str = "EKS add-on";

impl<S: StatusSource> super::service::EksWaiterService<S> {
    /// Wait for an add-on to become ACTIVE
    ///
    /// CREATE_FAILED ends the wait with the add-on's health issues.
    pub async fn addon_created(
        &self,
        cluster_name: &str,
        addon_name: &str,
        cancel: &CancellationToken,
    ) -> EksWaiterResult<Addon> {
        let name = format!("{cluster_name}:{addon_name}");
        let what = format!("{ADDON_KIND} ({name}) creation");
        let request = self
            .request(&what, addon_status(&self.source, cluster_name, addon_name))
            .pending([status::CREATING])
            .target([status::ACTIVE, status::CREATE_FAILED])
            .timeout(self.timeouts().addon_created);

        let outcome = wait(request, cancel).await;
        let settled = OutcomeClassifier::new(ADDON_KIND, &name, Operation::Creation)
            .success(status::ACTIVE)
            .failures([status::CREATE_FAILED])
            .classify(outcome)?;
        expect_snapshot(settled, &what)
    }

    pub async fn addon_deleted(
        &self,
        cluster_name: &str,
        addon_name: &str,
        cancel: &CancellationToken,
    ) -> EksWaiterResult<Option<Addon>> {
        let what = format!("{ADDON_KIND} ({cluster_name}:{addon_name}) deletion");
        let request = self
            .request(&what, addon_status(&self.source, cluster_name, addon_name))
            .pending([status::ACTIVE, status::DELETING])
            .timeout(self.timeouts().addon_deleted);

        Ok(remaining_snapshot(wait(request, cancel).await?, &what))
    }

    /// Wait for an add-on update to succeed. The update snapshot is not returned.
    pub async fn addon_update_successful(
        &self,
        cluster_name: &str,
        addon_name: &str,
        update_id: &str,
        cancel: &CancellationToken,
    ) -> EksWaiterResult<()> {
        let scope = UpdateScope::Addon {
            cluster_name: cluster_name.to_string(),
            addon_name: addon_name.to_string(),
        };
        let name = format!("{cluster_name}:{addon_name}");
        let request = self
            .request(
                format!("{ADDON_KIND} ({name}) update ({update_id})"),
                update_status(&self.source, &scope, update_id),
            )
            .pending(UPDATE_PENDING)
            .target(UPDATE_TERMINAL)
            .timeout(self.timeouts().addon_updated);

        let outcome = wait(request, cancel).await;
        update_classifier(ADDON_KIND, &name, update_id)
            .discard_on_success()
            .classify(outcome)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::aws::AwsError;
    use crate::commands::EksWaiterService;
    use crate::config::WaiterTimeouts;
    use crate::error::EksWaiterError;
    use crate::test_utils::ScriptedSource;
    use crate::types::{addon_status, Addon, AddonHealth, AddonIssue, Update, UpdateError};
    use eks_waiter_core::{AggregatedFailure, Operation, PollSettings, SubError, WaitError};
    use std::time::Duration;
    use tokio::time::Instant;
    use tokio_util::sync::CancellationToken;

    fn addon(status: &str) -> Result<Addon, AwsError> {
        Ok(Addon {
            cluster_name: "demo".into(),
            addon_name: "vpc-cni".into(),
            status: status.into(),
            ..Default::default()
        })
    }

    fn service(source: ScriptedSource) -> EksWaiterService<ScriptedSource> {
        EksWaiterService::with_source(source)
            .with_poll_settings(PollSettings::fixed(Duration::from_secs(10)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_addon_created() {
        let svc = service(ScriptedSource::new().with_addons(vec![
            addon(addon_status::CREATING),
            addon(addon_status::CREATING),
            addon(addon_status::ACTIVE),
        ]));

        let created = svc
            .addon_created("demo", "vpc-cni", &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(created.status, "ACTIVE");
        assert_eq!(svc.source().calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_addon_create_failed_aggregates_health_issues() {
        let failed = Addon {
            cluster_name: "demo".into(),
            addon_name: "vpc-cni".into(),
            status: addon_status::CREATE_FAILED.into(),
            health: AddonHealth {
                issues: vec![
                    AddonIssue {
                        code: Some("AccessDenied".into()),
                        message: Some("missing iam:PassRole".into()),
                        resource_ids: vec![],
                    },
                    AddonIssue {
                        code: Some("ConfigurationConflict".into()),
                        message: Some("aws-node already exists".into()),
                        resource_ids: vec!["aws-node".into()],
                    },
                ],
            },
            ..Default::default()
        };
        let svc = service(
            ScriptedSource::new().with_addons(vec![
                addon(addon_status::CREATING),
                Ok(failed.clone()),
            ]),
        );

        let err = svc
            .addon_created("demo", "vpc-cni", &CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            EksWaiterError::AddonFailed {
                addon: Box::new(failed),
                failure: AggregatedFailure {
                    kind: "EKS add-on".into(),
                    name: "demo:vpc-cni".into(),
                    operation: Operation::Creation,
                    status: "CREATE_FAILED".into(),
                    errors: vec![
                        SubError::new("AccessDenied", "missing iam:PassRole"),
                        SubError::new("ConfigurationConflict", "aws-node already exists"),
                    ],
                },
            }
        );
        assert_eq!(
            err.to_string(),
            "EKS add-on (demo:vpc-cni) creation not successful (CREATE_FAILED): Errors:\n\
             Error 1: Code: AccessDenied / Message: missing iam:PassRole\n\
             Error 2: Code: ConfigurationConflict / Message: aws-node already exists"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_addon_created_uses_configured_timeout() {
        let svc = service(ScriptedSource::new().with_addons(vec![addon(addon_status::CREATING)]))
            .with_timeouts(WaiterTimeouts {
                addon_created: Duration::from_secs(60),
                ..Default::default()
            });
        let started = Instant::now();

        let err = svc
            .addon_created("demo", "vpc-cni", &CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(
            err.wait_error(),
            Some(&WaitError::Timeout {
                last_state: Some("CREATING".into()),
                timeout: Duration::from_secs(60),
            })
        );
        assert_eq!(started.elapsed(), Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_addon_deleted_when_gone() {
        let svc = service(ScriptedSource::new().with_addons(vec![
            addon(addon_status::DELETING),
            Err(AwsError::NotFound("EKS add-on (demo:vpc-cni)".into())),
        ]));

        let last = svc
            .addon_deleted("demo", "vpc-cni", &CancellationToken::new())
            .await
            .unwrap();
        assert!(last.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_addon_update_successful_discards_snapshot() {
        let svc = service(ScriptedSource::new().with_updates(vec![
            Ok(Update {
                id: "u-7".into(),
                status: "InProgress".into(),
                ..Default::default()
            }),
            Ok(Update {
                id: "u-7".into(),
                status: "Successful".into(),
                ..Default::default()
            }),
        ]));

        svc.addon_update_successful("demo", "vpc-cni", "u-7", &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(svc.source().update_requests().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_addon_update_failed_lists_errors() {
        let svc = service(ScriptedSource::new().with_updates(vec![Ok(Update {
            id: "u-8".into(),
            status: "Failed".into(),
            errors: vec![UpdateError {
                error_code: Some("InsufficientNumberOfReplicas".into()),
                error_message: Some("rollout stalled".into()),
                resource_ids: vec![],
            }],
            ..Default::default()
        })]));

        let err = svc
            .addon_update_successful("demo", "vpc-cni", "u-8", &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "EKS add-on (demo:vpc-cni) update (u-8) not successful (Failed): Errors:\n\
             Error 1: Code: InsufficientNumberOfReplicas / Message: rollout stalled"
        );
        let EksWaiterError::UpdateFailed { update, .. } = err else {
            panic!("expected the failed update snapshot, got {err:?}");
        };
        assert_eq!(update.id, "u-8");
        assert_eq!(update.errors.len(), 1);
    }
}
