use serde::Serialize;

use super::dr_enums::DrPlanType;

/// Execution options payload sent on create-execution, tagged by the plan
/// execution type the vendor expects for a precheck of each plan type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "planExecutionType")]
pub enum PrecheckOptions {
    #[serde(rename = "SWITCHOVER_PRECHECK")]
    SwitchoverPrecheck,
    #[serde(rename = "FAILOVER_PRECHECK")]
    FailoverPrecheck,
    #[serde(rename = "START_DRILL_PRECHECK")]
    StartDrillPrecheck,
    #[serde(rename = "STOP_DRILL_PRECHECK")]
    StopDrillPrecheck,
}

impl PrecheckOptions {
    /// The mapping is exhaustive over the closed plan-type enumeration;
    /// unknown wire values never reach this point.
    pub fn for_plan_type(plan_type: DrPlanType) -> Self {
        match plan_type {
            DrPlanType::Switchover => Self::SwitchoverPrecheck,
            DrPlanType::Failover => Self::FailoverPrecheck,
            DrPlanType::StartDrill => Self::StartDrillPrecheck,
            DrPlanType::StopDrill => Self::StopDrillPrecheck,
        }
    }
}
