//! EKS Waiter Service Layer
//!
//! This module provides the service interface that holds the status source and
//! the polling configuration shared by every resource waiter. The waiters
//! themselves live in the sibling modules, one per resource kind.

use eks_waiter_core::{PollSettings, WaitRequest};

use crate::aws::eks_client::AwsEksClient;
use crate::aws::StatusSource;
use crate::config::WaiterTimeouts;
use crate::error::EksWaiterResult;

/// Main service struct that holds the status source and provides the waiters
pub struct EksWaiterService<S = AwsEksClient> {
    pub(crate) source: S,
    pub(crate) poll_settings: PollSettings,
    pub(crate) timeouts: WaiterTimeouts,
}

impl EksWaiterService<AwsEksClient> {
    /// Create a new service instance backed by the EKS API
    ///
    /// The configuration is loaded using the default credential provider chain.
    ///
    /// # Errors
    ///
    /// Returns an error if AWS SDK configuration fails to load.
    pub async fn new() -> EksWaiterResult<Self> {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;

        Ok(Self::with_source(AwsEksClient::from_conf(&config)))
    }
}

impl<S: StatusSource> EksWaiterService<S> {
    /// Create a service around any status source (e.g. a test double)
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            poll_settings: PollSettings::default(),
            timeouts: WaiterTimeouts::default(),
        }
    }

    pub fn with_poll_settings(mut self, poll_settings: PollSettings) -> Self {
        self.poll_settings = poll_settings;
        self
    }

    pub fn with_timeouts(mut self, timeouts: WaiterTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn timeouts(&self) -> &WaiterTimeouts {
        &self.timeouts
    }

    /// Start a wait request that uses this service's polling cadence
    pub(crate) fn request<P>(&self, description: impl Into<String>, probe: P) -> WaitRequest<P> {
        WaitRequest::new(description, probe).poll_settings(self.poll_settings.clone())
    }
}
