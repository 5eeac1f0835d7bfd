use crate::{log_error, log_info};

use super::{dr_enums::DrPlanType, drpg::DrPlan};

/// Per-plan precheck outcome. One result is recorded for every active plan,
/// pass or fail, so a failing plan never hides the others.
#[derive(Debug, Clone)]
pub struct PrecheckResult {
    pub plan_name: String,
    pub plan_type: String,
    pub is_validate: bool,
    pub error_msg: String,
}

impl PrecheckResult {
    pub fn build(plan: &DrPlan, plan_type: DrPlanType) -> Self {
        Self {
            plan_name: plan.display_name.clone(),
            plan_type: plan_type.to_string(),
            is_validate: true,
            error_msg: String::new(),
        }
    }

    pub fn build_failed(plan: &DrPlan, plan_type: DrPlanType, final_state: &str) -> Self {
        Self {
            plan_name: plan.display_name.clone(),
            plan_type: plan_type.to_string(),
            is_validate: false,
            error_msg: format!("execution finished in state [{}]", final_state),
        }
    }

    pub fn build_with_err(plan: &DrPlan, plan_type: DrPlanType, err: anyhow::Error) -> Self {
        Self {
            plan_name: plan.display_name.clone(),
            plan_type: plan_type.to_string(),
            is_validate: false,
            error_msg: err.to_string(),
        }
    }

    pub fn log(&self) {
        if self.is_validate {
            log_info!("[{}] plan [{}]: precheck passed", self.plan_type, self.plan_name);
        } else {
            log_error!(
                "[{}] plan [{}]: precheck failed, {}",
                self.plan_type,
                self.plan_name,
                self.error_msg
            );
        }
    }
}
