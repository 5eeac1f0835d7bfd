use serde::Deserialize;

/// Immutable snapshot of a protection group, fetched per call and never
/// cached. Role and lifecycle state stay as wire strings until the
/// orchestrator interprets them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrProtectionGroup {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub lifecycle_state: String,
    #[serde(default)]
    pub peer_id: String,
    #[serde(default)]
    pub peer_region: String,
}

/// The plan type is kept as the wire string so an unknown vendor value is
/// still observable at dispatch time, where it is fatal.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrPlan {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(rename = "type", default)]
    pub plan_type: String,
    #[serde(default)]
    pub lifecycle_state: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrPlanExecution {
    pub id: String,
    #[serde(default)]
    pub lifecycle_state: String,
}

/// Outcome of plan enumeration. A transitional plan and an empty active list
/// are structurally distinct so the orchestrator cannot confuse the two.
#[derive(Debug, Clone)]
pub enum PlanListing {
    /// The first plan found in CREATING / UPDATING / DELETING.
    Transitional { plan_name: String, state: String },
    /// All plans in ACTIVE state, in the order the service returned them.
    Active(Vec<DrPlan>),
}
