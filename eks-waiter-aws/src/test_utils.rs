//! Test utilities for exercising waiters without an AWS account.
//!
//! [`ScriptedSource`] replays prepared describe responses in order. Once a
//! script is down to its last entry, that entry is returned for every
//! further call, which makes "stays pending forever" easy to express.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::aws::{AwsError, AwsResult, StatusSource, UpdateScope};
use crate::types::{Addon, Cluster, FargateProfile, Nodegroup, Update};

#[derive(Debug)]
struct Script<T> {
    responses: Mutex<VecDeque<AwsResult<T>>>,
    calls: Mutex<usize>,
}

impl<T: Clone> Script<T> {
    fn new(responses: Vec<AwsResult<T>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(0),
        }
    }

    fn next(&self, what: &str) -> AwsResult<T> {
        if let Ok(mut calls) = self.calls.lock() {
            *calls += 1;
        }
        let Ok(mut responses) = self.responses.lock() else {
            return Err(AwsError::SdkError(format!("script for {what} is poisoned")));
        };
        match responses.len() {
            0 => Err(AwsError::SdkError(format!("no scripted response for {what}"))),
            1 => responses[0].clone(),
            _ => responses
                .pop_front()
                .unwrap_or_else(|| Err(AwsError::SdkError(format!("script for {what} ran dry")))),
        }
    }

    fn calls(&self) -> usize {
        self.calls.lock().map(|c| *c).unwrap_or_default()
    }
}

/// In-memory [`StatusSource`] driven by per-resource response scripts.
#[derive(Debug)]
pub struct ScriptedSource {
    clusters: Script<Cluster>,
    nodegroups: Script<Nodegroup>,
    fargate_profiles: Script<FargateProfile>,
    addons: Script<Addon>,
    updates: Script<Update>,
    update_requests: Mutex<Vec<(UpdateScope, String)>>,
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            clusters: Script::new(vec![]),
            nodegroups: Script::new(vec![]),
            fargate_profiles: Script::new(vec![]),
            addons: Script::new(vec![]),
            updates: Script::new(vec![]),
            update_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_clusters(mut self, responses: Vec<AwsResult<Cluster>>) -> Self {
        self.clusters = Script::new(responses);
        self
    }

    pub fn with_nodegroups(mut self, responses: Vec<AwsResult<Nodegroup>>) -> Self {
        self.nodegroups = Script::new(responses);
        self
    }

    pub fn with_fargate_profiles(mut self, responses: Vec<AwsResult<FargateProfile>>) -> Self {
        self.fargate_profiles = Script::new(responses);
        self
    }

    pub fn with_addons(mut self, responses: Vec<AwsResult<Addon>>) -> Self {
        self.addons = Script::new(responses);
        self
    }

    pub fn with_updates(mut self, responses: Vec<AwsResult<Update>>) -> Self {
        self.updates = Script::new(responses);
        self
    }

    /// Total describe calls made against this source.
    pub fn calls(&self) -> usize {
        self.clusters.calls()
            + self.nodegroups.calls()
            + self.fargate_profiles.calls()
            + self.addons.calls()
            + self.updates.calls()
    }

    /// Scope and update id of every `describe_update` call, in order.
    pub fn update_requests(&self) -> Vec<(UpdateScope, String)> {
        self.update_requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl StatusSource for ScriptedSource {
    async fn describe_cluster(&self, name: &str) -> AwsResult<Cluster> {
        self.clusters.next(&format!("cluster {name}"))
    }

    async fn describe_nodegroup(
        &self,
        cluster_name: &str,
        nodegroup_name: &str,
    ) -> AwsResult<Nodegroup> {
        self.nodegroups
            .next(&format!("node group {cluster_name}:{nodegroup_name}"))
    }

    async fn describe_fargate_profile(
        &self,
        cluster_name: &str,
        fargate_profile_name: &str,
    ) -> AwsResult<FargateProfile> {
        self.fargate_profiles
            .next(&format!("Fargate profile {cluster_name}:{fargate_profile_name}"))
    }

    async fn describe_addon(&self, cluster_name: &str, addon_name: &str) -> AwsResult<Addon> {
        self.addons
            .next(&format!("add-on {cluster_name}:{addon_name}"))
    }

    async fn describe_update(&self, scope: &UpdateScope, update_id: &str) -> AwsResult<Update> {
        if let Ok(mut requests) = self.update_requests.lock() {
            requests.push((scope.clone(), update_id.to_string()));
        }
        self.updates.next(&format!("update {update_id}"))
    }
}
