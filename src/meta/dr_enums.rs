use std::str::FromStr;

use strum::{Display, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
pub enum DrPlanType {
    #[strum(serialize = "SWITCHOVER")]
    Switchover,
    #[strum(serialize = "FAILOVER")]
    Failover,
    #[strum(serialize = "START_DRILL")]
    StartDrill,
    #[strum(serialize = "STOP_DRILL")]
    StopDrill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
pub enum DrpgRole {
    #[strum(serialize = "UNCONFIGURED")]
    Unconfigured,
    #[strum(serialize = "PRIMARY")]
    Primary,
    #[strum(serialize = "STANDBY")]
    Standby,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
pub enum LifecycleState {
    #[strum(serialize = "CREATING")]
    Creating,
    #[strum(serialize = "UPDATING")]
    Updating,
    #[strum(serialize = "DELETING")]
    Deleting,
    #[strum(serialize = "ACTIVE")]
    Active,
    #[strum(serialize = "QUEUED")]
    Queued,
    #[strum(serialize = "IN_PROGRESS")]
    InProgress,
    #[strum(serialize = "SUCCEEDED")]
    Succeeded,
    #[strum(serialize = "FAILED")]
    Failed,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    pub fn matches(&self, value: &str) -> bool {
        value == self.as_str()
    }

    /// A plan in a transitional state is not safe to precheck yet.
    pub fn is_transitional(value: &str) -> bool {
        matches!(
            LifecycleState::from_str(value),
            Ok(Self::Creating | Self::Updating | Self::Deleting)
        )
    }
}
