use std::{collections::HashSet, fs, path::PathBuf};

use tempfile::TempDir;

use crate::{
    connector::precheck_connector::PrecheckConnector,
    meta::{drpg::PlanListing, precheck_options::PrecheckOptions},
};

use super::mock_clients::{drpg, plan, MockClientFactory};

const DRPG_OCID: &str = "ocid1.drprotectiongroup.oc1.iad.group1111";
const PEER_OCID: &str = "ocid1.drprotectiongroup.oc1.phx.group2222";
const TOPIC_OCID: &str = "ocid1.onstopic.oc1.iad.topic1111";

const SWITCHOVER_PLAN_OCID: &str = "ocid1.drplan.oc1.phx.plan1111";
const FAILOVER_PLAN_OCID: &str = "ocid1.drplan.oc1.phx.plan2222";

fn run_dirs() -> (TempDir, PathBuf) {
    let base_dir = tempfile::tempdir().unwrap();
    let logs_dir = base_dir.path().join("logs");
    fs::create_dir_all(&logs_dir).unwrap();
    let error_log = logs_dir.join(format!("{}_error.log", DRPG_OCID));
    (base_dir, error_log)
}

fn base_dir_entries(base_dir: &TempDir) -> Vec<String> {
    fs::read_dir(base_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect()
}

#[tokio::test]
async fn standby_run_executes_each_plan_in_listing_order() {
    let (base_dir, error_log) = run_dirs();

    let mut factory = MockClientFactory::default();
    factory.dr_client.groups.insert(
        DRPG_OCID.to_string(),
        drpg(DRPG_OCID, "standby-group", "STANDBY", "ACTIVE", "", ""),
    );
    factory.dr_client.plan_listings.insert(
        DRPG_OCID.to_string(),
        PlanListing::Active(vec![
            plan(SWITCHOVER_PLAN_OCID, "plan-switchover", "SWITCHOVER", "ACTIVE"),
            plan(FAILOVER_PLAN_OCID, "plan-failover", "FAILOVER", "ACTIVE"),
        ]),
    );
    // second plan's precheck execution ends FAILED
    factory.dr_client.failed_plan_ids =
        HashSet::from([FAILOVER_PLAN_OCID.to_string()]);

    let connector =
        PrecheckConnector::build(DRPG_OCID, None, base_dir.path(), &error_log, &factory);
    let results = connector.check().await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].plan_name, "plan-switchover");
    assert!(results[0].is_validate);
    assert_eq!(results[1].plan_name, "plan-failover");
    assert!(!results[1].is_validate);

    // executions created strictly in listing order, one per plan
    let created = factory.dr_client.created_executions.lock().unwrap().clone();
    assert_eq!(
        created,
        vec![
            (
                SWITCHOVER_PLAN_OCID.to_string(),
                PrecheckOptions::SwitchoverPrecheck
            ),
            (
                FAILOVER_PLAN_OCID.to_string(),
                PrecheckOptions::FailoverPrecheck
            ),
        ]
    );

    // region file released, only the logs dir remains
    assert_eq!(base_dir_entries(&base_dir), vec!["logs".to_string()]);
}

#[tokio::test]
async fn primary_group_switches_to_peer_before_plan_enumeration() {
    let (base_dir, error_log) = run_dirs();

    let mut factory = MockClientFactory::default();
    factory.dr_client.groups.insert(
        DRPG_OCID.to_string(),
        drpg(DRPG_OCID, "primary-group", "PRIMARY", "ACTIVE", PEER_OCID, "phx"),
    );
    factory.dr_client.groups.insert(
        PEER_OCID.to_string(),
        drpg(PEER_OCID, "peer-group", "STANDBY", "ACTIVE", DRPG_OCID, "iad"),
    );
    // plans only exist under the peer: passing proves the peer snapshot
    // became the standby view
    factory.dr_client.plan_listings.insert(
        PEER_OCID.to_string(),
        PlanListing::Active(vec![plan(
            SWITCHOVER_PLAN_OCID,
            "plan-switchover",
            "SWITCHOVER",
            "ACTIVE",
        )]),
    );

    let connector =
        PrecheckConnector::build(DRPG_OCID, None, base_dir.path(), &error_log, &factory);
    let results = connector.check().await.unwrap();

    assert_eq!(results.len(), 1);
    assert!(results[0].is_validate);

    // one client per region, in switch order
    let regions = factory.dr_client_regions.lock().unwrap().clone();
    assert_eq!(regions, vec!["us-ashburn-1", "us-phoenix-1"]);

    assert_eq!(base_dir_entries(&base_dir), vec!["logs".to_string()]);
}

#[tokio::test]
async fn transitional_plan_aborts_without_executions_and_notifies() {
    let (base_dir, error_log) = run_dirs();
    fs::write(&error_log, "found transitional plan: plan-x in state UPDATING\n").unwrap();

    let mut factory = MockClientFactory::default();
    factory.dr_client.groups.insert(
        DRPG_OCID.to_string(),
        drpg(DRPG_OCID, "standby-group", "STANDBY", "ACTIVE", "", ""),
    );
    factory.dr_client.plan_listings.insert(
        DRPG_OCID.to_string(),
        PlanListing::Transitional {
            plan_name: "plan-x".to_string(),
            state: "UPDATING".to_string(),
        },
    );

    let connector = PrecheckConnector::build(
        DRPG_OCID,
        Some(TOPIC_OCID),
        base_dir.path(),
        &error_log,
        &factory,
    );
    let err = connector.check().await.unwrap_err();
    assert!(err.to_string().contains("UPDATING"));

    // no precheck executions were sent
    assert!(factory.dr_client.created_executions.lock().unwrap().is_empty());

    // notification carries the run's error log
    let messages = factory.ons_client.messages.lock().unwrap().clone();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].topic_ocid, TOPIC_OCID);
    assert_eq!(
        messages[0].title,
        format!("Precheck Failed for standby-group - {}", DRPG_OCID)
    );
    assert!(messages[0].body.starts_with(&format!("standby-group: {}\n\n", DRPG_OCID)));
    assert!(messages[0].body.contains("state UPDATING"));

    // region files are gone, the error log survives failed runs
    assert_eq!(base_dir_entries(&base_dir), vec!["logs".to_string()]);
    assert!(error_log.exists());
}

#[tokio::test]
async fn empty_active_plan_list_aborts_without_executions() {
    let (base_dir, error_log) = run_dirs();

    let mut factory = MockClientFactory::default();
    factory.dr_client.groups.insert(
        DRPG_OCID.to_string(),
        drpg(DRPG_OCID, "standby-group", "STANDBY", "ACTIVE", "", ""),
    );
    factory
        .dr_client
        .plan_listings
        .insert(DRPG_OCID.to_string(), PlanListing::Active(vec![]));

    let connector = PrecheckConnector::build(
        DRPG_OCID,
        Some(TOPIC_OCID),
        base_dir.path(),
        &error_log,
        &factory,
    );
    let err = connector.check().await.unwrap_err();
    assert!(err.to_string().contains("no active DR plans"));

    assert!(factory.dr_client.created_executions.lock().unwrap().is_empty());
    assert_eq!(factory.ons_client.messages.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_plan_type_stops_before_remaining_plans() {
    let (base_dir, error_log) = run_dirs();

    let mut factory = MockClientFactory::default();
    factory.dr_client.groups.insert(
        DRPG_OCID.to_string(),
        drpg(DRPG_OCID, "standby-group", "STANDBY", "ACTIVE", "", ""),
    );
    factory.dr_client.plan_listings.insert(
        DRPG_OCID.to_string(),
        PlanListing::Active(vec![
            plan(SWITCHOVER_PLAN_OCID, "plan-switchover", "SWITCHOVER", "ACTIVE"),
            plan(FAILOVER_PLAN_OCID, "plan-mystery", "PLANNED_MIGRATION", "ACTIVE"),
        ]),
    );

    let connector =
        PrecheckConnector::build(DRPG_OCID, None, base_dir.path(), &error_log, &factory);
    let err = connector.check().await.unwrap_err();
    assert!(err.to_string().contains("unknown plan type"));

    // the valid first plan ran, nothing was created past the unknown one
    let created = factory.dr_client.created_executions.lock().unwrap().clone();
    assert_eq!(
        created,
        vec![(
            SWITCHOVER_PLAN_OCID.to_string(),
            PrecheckOptions::SwitchoverPrecheck
        )]
    );

    assert_eq!(base_dir_entries(&base_dir), vec!["logs".to_string()]);
}

#[tokio::test]
async fn unconfigured_role_aborts() {
    let (base_dir, error_log) = run_dirs();

    let mut factory = MockClientFactory::default();
    factory.dr_client.groups.insert(
        DRPG_OCID.to_string(),
        drpg(DRPG_OCID, "unset-group", "UNCONFIGURED", "ACTIVE", "", ""),
    );

    let connector = PrecheckConnector::build(
        DRPG_OCID,
        Some(TOPIC_OCID),
        base_dir.path(),
        &error_log,
        &factory,
    );
    let err = connector.check().await.unwrap_err();
    assert!(err.to_string().contains("unconfigured"));

    let messages = factory.ons_client.messages.lock().unwrap().clone();
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages[0].title,
        format!("Precheck Failed for unset-group - {}", DRPG_OCID)
    );
}

#[tokio::test]
async fn missing_group_aborts_and_notifies_with_empty_name() {
    let (base_dir, error_log) = run_dirs();

    let factory = MockClientFactory::default();

    let connector = PrecheckConnector::build(
        DRPG_OCID,
        Some(TOPIC_OCID),
        base_dir.path(),
        &error_log,
        &factory,
    );
    let err = connector.check().await.unwrap_err();
    assert!(err.to_string().contains("failed to get DRPG details"));

    let messages = factory.ons_client.messages.lock().unwrap().clone();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].body.starts_with(&format!(": {}\n\n", DRPG_OCID)));
}

#[tokio::test]
async fn non_active_standby_aborts() {
    let (base_dir, error_log) = run_dirs();

    let mut factory = MockClientFactory::default();
    factory.dr_client.groups.insert(
        DRPG_OCID.to_string(),
        drpg(DRPG_OCID, "standby-group", "STANDBY", "UPDATING", "", ""),
    );

    let connector =
        PrecheckConnector::build(DRPG_OCID, None, base_dir.path(), &error_log, &factory);
    let err = connector.check().await.unwrap_err();
    assert!(err.to_string().contains("expected ACTIVE"));

    assert!(factory.dr_client.created_executions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_ocids_rejected_before_any_call() {
    let (base_dir, error_log) = run_dirs();
    let factory = MockClientFactory::default();

    let connector = PrecheckConnector::build(
        "ocid1.drprotectiongroup.oc1.iad",
        None,
        base_dir.path(),
        &error_log,
        &factory,
    );
    let err = connector.check().await.unwrap_err();
    assert!(err.to_string().contains("invalid DRPG ocid"));
    assert!(factory.dr_client_regions.lock().unwrap().is_empty());

    let connector = PrecheckConnector::build(
        DRPG_OCID,
        Some("ocid1.drprotectiongroup.oc1.iad.notatopic"),
        base_dir.path(),
        &error_log,
        &factory,
    );
    let err = connector.check().await.unwrap_err();
    assert!(err.to_string().contains("invalid notification topic ocid"));
    assert!(factory.dr_client_regions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn finalize_notifies_and_removes_error_log() {
    let (base_dir, error_log) = run_dirs();
    fs::write(&error_log, "precheck failed: plan-failover\n").unwrap();

    let mut factory = MockClientFactory::default();
    factory.dr_client.groups.insert(
        DRPG_OCID.to_string(),
        drpg(DRPG_OCID, "standby-group", "STANDBY", "ACTIVE", "", ""),
    );
    factory.dr_client.plan_listings.insert(
        DRPG_OCID.to_string(),
        PlanListing::Active(vec![plan(
            FAILOVER_PLAN_OCID,
            "plan-failover",
            "FAILOVER",
            "ACTIVE",
        )]),
    );
    factory.dr_client.failed_plan_ids =
        HashSet::from([FAILOVER_PLAN_OCID.to_string()]);

    let connector = PrecheckConnector::build(
        DRPG_OCID,
        Some(TOPIC_OCID),
        base_dir.path(),
        &error_log,
        &factory,
    );
    let results = connector.check().await.unwrap();

    // a failed plan is a recorded result, not a run failure
    assert_eq!(results.len(), 1);
    assert!(!results[0].is_validate);

    let messages = factory.ons_client.messages.lock().unwrap().clone();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].body.contains("precheck failed: plan-failover"));

    // handled run: error log removed, no region files left
    assert!(!error_log.exists());
    assert_eq!(base_dir_entries(&base_dir), vec!["logs".to_string()]);
}
