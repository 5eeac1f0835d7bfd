use anyhow::bail;
use async_trait::async_trait;

use crate::{
    config::client_profile::ClientProfile,
    error::Error,
    meta::{
        dr_enums::LifecycleState,
        drpg::{DrPlan, DrPlanExecution, DrProtectionGroup, PlanListing},
        precheck_options::PrecheckOptions,
    },
    utils::time_util::TimeUtil,
};

// vendor-default polling, no custom backoff
pub const WAIT_INTERVAL_SECS: u64 = 30;
pub const MAX_WAIT_SECS: u64 = 1200;

/// Narrow facade over the vendor DR control plane. The orchestrator only
/// ever talks to this trait, so tests substitute canned implementations.
#[async_trait]
pub trait DrClient: Send + Sync {
    /// Transport and service errors are logged and absorbed into None;
    /// the caller decides whether that is fatal.
    async fn get_protection_group(&self, drpg_ocid: &str) -> Option<DrProtectionGroup>;

    /// Short-circuits on the first plan in a transitional state, otherwise
    /// returns the ACTIVE plans in service order.
    async fn list_plans(&self, group_ocid: &str) -> anyhow::Result<PlanListing>;

    async fn create_execution(
        &self,
        plan_ocid: &str,
        options: PrecheckOptions,
    ) -> anyhow::Result<DrPlanExecution>;

    async fn get_execution(&self, execution_ocid: &str) -> anyhow::Result<DrPlanExecution>;

    /// Blocks until the execution reaches the target state or a terminal
    /// state, polling at the vendor-default interval.
    async fn wait_for_execution_state(
        &self,
        execution_ocid: &str,
        target: LifecycleState,
    ) -> anyhow::Result<DrPlanExecution> {
        let mut waited_secs = 0;
        loop {
            let execution = self.get_execution(execution_ocid).await?;
            let state = execution.lifecycle_state.clone();
            if target.matches(&state)
                || LifecycleState::Succeeded.matches(&state)
                || LifecycleState::Failed.matches(&state)
            {
                return Ok(execution);
            }
            if waited_secs >= MAX_WAIT_SECS {
                bail!(Error::ServiceError(format!(
                    "timed out waiting for execution [{}] to reach [{}], last state: [{}]",
                    execution_ocid, target, state
                )));
            }
            TimeUtil::sleep_millis(WAIT_INTERVAL_SECS * 1000).await;
            waited_secs += WAIT_INTERVAL_SECS;
        }
    }

    /// Blocks until the protection group reports the target state again.
    async fn wait_for_group_state(
        &self,
        drpg_ocid: &str,
        target: LifecycleState,
    ) -> anyhow::Result<DrProtectionGroup> {
        let mut waited_secs = 0;
        loop {
            let Some(group) = self.get_protection_group(drpg_ocid).await else {
                bail!(Error::ServiceError(format!(
                    "failed to fetch protection group [{}] while waiting for [{}]",
                    drpg_ocid, target
                )));
            };
            if target.matches(&group.lifecycle_state) {
                return Ok(group);
            }
            if waited_secs >= MAX_WAIT_SECS {
                bail!(Error::ServiceError(format!(
                    "timed out waiting for protection group [{}] to reach [{}], last state: [{}]",
                    drpg_ocid, target, group.lifecycle_state
                )));
            }
            TimeUtil::sleep_millis(WAIT_INTERVAL_SECS * 1000).await;
            waited_secs += WAIT_INTERVAL_SECS;
        }
    }
}

/// Notification data plane, one operation.
#[async_trait]
pub trait OnsClient: Send + Sync {
    async fn publish_message(
        &self,
        topic_ocid: &str,
        title: &str,
        body: &str,
    ) -> anyhow::Result<()>;
}

/// Builds region-scoped clients from an ephemeral profile. The orchestrator
/// rebuilds its DR client when it switches from the primary to the peer.
pub trait ClientFactory: Send + Sync {
    fn build_dr_client(&self, profile: &ClientProfile) -> anyhow::Result<Box<dyn DrClient>>;

    fn build_ons_client(&self, profile: &ClientProfile) -> anyhow::Result<Box<dyn OnsClient>>;
}

/// First plan found in a transitional state, if any. Checked against the
/// unfiltered listing before narrowing to ACTIVE.
pub fn find_transitional_plan(plans: &[DrPlan]) -> Option<PlanListing> {
    plans
        .iter()
        .find(|plan| LifecycleState::is_transitional(&plan.lifecycle_state))
        .map(|plan| PlanListing::Transitional {
            plan_name: plan.display_name.clone(),
            state: plan.lifecycle_state.clone(),
        })
}
