use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::bail;

use crate::{
    client::traits::{ClientFactory, DrClient},
    config::{client_profile::ClientProfile, region_file::RegionFile},
    error::Error,
    log_error, log_info, log_warn,
    meta::{
        dr_enums::{DrPlanType, DrpgRole, LifecycleState},
        drpg::{DrPlan, DrPlanExecution, PlanListing},
        precheck_options::PrecheckOptions,
        precheck_result::PrecheckResult,
    },
    utils::{ocid_util::OcidUtil, region_util::RegionUtil},
};

use super::notifier::Notifier;

/// Drives one precheck run end to end: resolve the standby view of the
/// protection group, enumerate its active plans, run one precheck execution
/// per plan, and notify on failure when a topic was supplied.
pub struct PrecheckConnector<'a> {
    drpg_ocid: String,
    topic_ocid: Option<String>,
    base_dir: PathBuf,
    error_log: PathBuf,
    factory: &'a dyn ClientFactory,
}

impl<'a> PrecheckConnector<'a> {
    pub fn build(
        drpg_ocid: &str,
        topic_ocid: Option<&str>,
        base_dir: &Path,
        error_log: &Path,
        factory: &'a dyn ClientFactory,
    ) -> Self {
        Self {
            drpg_ocid: drpg_ocid.to_string(),
            topic_ocid: topic_ocid.map(str::to_string),
            base_dir: base_dir.to_path_buf(),
            error_log: error_log.to_path_buf(),
            factory,
        }
    }

    pub async fn check(&self) -> anyhow::Result<Vec<PrecheckResult>> {
        // 1. identifier shapes, before any network call
        if !OcidUtil::is_valid_drpg_ocid(&self.drpg_ocid) {
            log_error!("invalid DRPG ocid format: {}", self.drpg_ocid);
            bail!(Error::ConfigError(format!(
                "invalid DRPG ocid format: {}",
                self.drpg_ocid
            )));
        }
        if let Some(topic_ocid) = &self.topic_ocid {
            if !OcidUtil::is_valid_topic_ocid(topic_ocid) {
                log_error!("invalid notification topic ocid format: {}", topic_ocid);
                bail!(Error::ConfigError(format!(
                    "invalid notification topic ocid format: {}",
                    topic_ocid
                )));
            }
        }

        // 2. region scope for the group's own region
        let region_code = OcidUtil::region_segment(&self.drpg_ocid).unwrap_or("");
        let Some(region) = RegionUtil::normalize_region(region_code) else {
            log_error!("unable to determine region for DRPG.");
            bail!(Error::ConfigError(format!(
                "unable to determine region for DRPG [{}]",
                self.drpg_ocid
            )));
        };

        let file = RegionFile::create(&region, &self.base_dir, &self.drpg_ocid)?;
        let profile = ClientProfile::from_region_file(file.path())?;
        let mut region_file = Some(file);
        let mut dr_client = self.factory.build_dr_client(&profile)?;

        // 3. fetch the group; errors were already absorbed and logged
        let Some(mut drpg) = dr_client.get_protection_group(&self.drpg_ocid).await else {
            self.notify_on_failure(&mut region_file, "", &self.drpg_ocid)
                .await;
            bail!(Error::PreCheckError(format!(
                "failed to get DRPG details for [{}]",
                self.drpg_ocid
            )));
        };

        // 4. role switching
        let role = DrpgRole::from_str(&drpg.role).ok();
        if role == Some(DrpgRole::Unconfigured) {
            log_error!("DRPG is unconfigured.");
            self.notify_on_failure(&mut region_file, &drpg.display_name, &self.drpg_ocid)
                .await;
            bail!(Error::PreCheckError(format!(
                "DRPG [{}] is unconfigured",
                self.drpg_ocid
            )));
        }

        if role == Some(DrpgRole::Primary) {
            log_warn!("DRPG is PRIMARY, switching to PEER.");
            let peer_ocid = drpg.peer_id.clone();
            let peer_region_token = drpg.peer_region.clone();

            // the primary's region file must be gone before the peer's exists
            region_file.take();

            let Some(peer_region) = RegionUtil::normalize_region(&peer_region_token) else {
                log_error!("unknown peer region: {}", peer_region_token);
                bail!(Error::ConfigError(format!(
                    "unknown peer region [{}]",
                    peer_region_token
                )));
            };

            let peer_file = RegionFile::create(&peer_region, &self.base_dir, &peer_ocid)?;
            let peer_profile = ClientProfile::from_region_file(peer_file.path())?;
            region_file = Some(peer_file);
            dr_client = self.factory.build_dr_client(&peer_profile)?;

            let Some(peer_drpg) = dr_client.get_protection_group(&peer_ocid).await else {
                log_error!("failed to get peer DRPG details.");
                self.notify_on_failure(&mut region_file, "", &peer_ocid).await;
                bail!(Error::PreCheckError(format!(
                    "failed to get peer DRPG details for [{}]",
                    peer_ocid
                )));
            };
            drpg = peer_drpg;
        }

        // from here on the snapshot is the standby view
        let standby_ocid = drpg.id.clone();
        let standby_name = drpg.display_name.clone();
        let standby_state = drpg.lifecycle_state.clone();
        log_info!(
            "Standby DRPG: {} ({}) is {}",
            standby_name,
            standby_ocid,
            standby_state
        );

        // 5. standby must be ACTIVE
        if !LifecycleState::Active.matches(&standby_state) {
            log_error!("standby DRPG is not active.");
            self.notify_on_failure(&mut region_file, &standby_name, &standby_ocid)
                .await;
            bail!(Error::PreCheckError(format!(
                "standby DRPG [{}] is in state [{}], expected ACTIVE",
                standby_ocid, standby_state
            )));
        }

        // 6. plan enumeration
        let plans = match dr_client.list_plans(&standby_ocid).await {
            Ok(PlanListing::Active(plans)) if !plans.is_empty() => plans,
            Ok(PlanListing::Active(_)) => {
                log_error!("no active DR plans found in {}.", standby_name);
                self.notify_on_failure(&mut region_file, &standby_name, &standby_ocid)
                    .await;
                bail!(Error::PreCheckError(format!(
                    "no active DR plans found in [{}]",
                    standby_name
                )));
            }
            Ok(PlanListing::Transitional { plan_name, state }) => {
                log_error!("found transitional plan: {} in state {}", plan_name, state);
                self.notify_on_failure(&mut region_file, &standby_name, &standby_ocid)
                    .await;
                bail!(Error::PreCheckError(format!(
                    "plan [{}] is not ready, state: [{}]",
                    plan_name, state
                )));
            }
            Err(err) => {
                log_error!("failed to list DR plans: {}", err);
                self.notify_on_failure(&mut region_file, &standby_name, &standby_ocid)
                    .await;
                bail!(Error::PreCheckError(format!(
                    "failed to list DR plans for [{}]",
                    standby_ocid
                )));
            }
        };
        log_info!("found {} active DR plans.", plans.len());

        // 7. one precheck execution per plan, in listing order, no retries;
        //    a failed plan never aborts the remaining ones
        let mut results = Vec::with_capacity(plans.len());
        for plan in &plans {
            let Ok(plan_type) = DrPlanType::from_str(&plan.plan_type) else {
                log_error!("unknown plan type: {}", plan.plan_type);
                self.notify_on_failure(&mut region_file, &standby_name, &standby_ocid)
                    .await;
                bail!(Error::PreCheckError(format!(
                    "unknown plan type: [{}]",
                    plan.plan_type
                )));
            };
            log_info!(
                "running precheck for {} plan: {}",
                plan_type,
                plan.display_name
            );

            match self
                .run_plan_precheck(dr_client.as_ref(), &standby_ocid, plan, plan_type)
                .await
            {
                Ok(final_status)
                    if LifecycleState::Succeeded.matches(&final_status.lifecycle_state) =>
                {
                    log_info!("precheck passed: {}", plan.display_name);
                    results.push(PrecheckResult::build(plan, plan_type));
                }
                Ok(final_status) => {
                    log_error!("precheck failed: {}", plan.display_name);
                    results.push(PrecheckResult::build_failed(
                        plan,
                        plan_type,
                        &final_status.lifecycle_state,
                    ));
                }
                Err(err) => {
                    log_error!("precheck error for {}: {}", plan.display_name, err);
                    results.push(PrecheckResult::build_with_err(plan, plan_type, err));
                }
            }
        }

        // 8. finalize: summary notification, then release the run's artifacts
        if let Some(topic_ocid) = &self.topic_ocid {
            let error_log_size = fs::metadata(&self.error_log).map(|m| m.len()).unwrap_or(0);
            if error_log_size > 0 {
                Notifier::new(self.factory, &self.base_dir)
                    .send(&standby_name, &standby_ocid, topic_ocid, &self.error_log)
                    .await?;
            }
        }

        region_file.take();
        if self.error_log.exists() {
            fs::remove_file(&self.error_log)?;
        }
        Ok(results)
    }

    async fn run_plan_precheck(
        &self,
        dr_client: &dyn DrClient,
        standby_ocid: &str,
        plan: &DrPlan,
        plan_type: DrPlanType,
    ) -> anyhow::Result<DrPlanExecution> {
        let options = PrecheckOptions::for_plan_type(plan_type);
        let execution = dr_client.create_execution(&plan.id, options).await?;
        dr_client
            .wait_for_execution_state(&execution.id, LifecycleState::InProgress)
            .await?;
        dr_client
            .wait_for_group_state(standby_ocid, LifecycleState::Active)
            .await?;
        dr_client.get_execution(&execution.id).await
    }

    /// Error-exit edge: release the live region file, then best-effort
    /// notify when a topic was supplied. The caller bails right after.
    async fn notify_on_failure(
        &self,
        region_file: &mut Option<RegionFile>,
        display_name: &str,
        subject_ocid: &str,
    ) {
        region_file.take();
        if let Some(topic_ocid) = &self.topic_ocid {
            let notifier = Notifier::new(self.factory, &self.base_dir);
            if let Err(err) = notifier
                .send(display_name, subject_ocid, topic_ocid, &self.error_log)
                .await
            {
                log_error!("failed to send notification: {}", err);
            }
        }
    }
}
