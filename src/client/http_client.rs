use std::{env, time::Duration};

use anyhow::{bail, Context};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;

use crate::{
    config::client_profile::ClientProfile,
    error::Error,
    log_error,
    meta::{
        dr_enums::LifecycleState,
        drpg::{DrPlan, DrPlanExecution, DrProtectionGroup, PlanListing},
        precheck_options::PrecheckOptions,
    },
};

use super::traits::{find_transitional_plan, ClientFactory, DrClient, OnsClient};

const DR_SERVICE_API_VERSION: &str = "20220125";
const ONS_SERVICE_API_VERSION: &str = "20181201";
const REQUEST_TIMEOUT_SECS: u64 = 60;

pub const AUTH_TOKEN_ENV: &str = "DR_PRECHECK_AUTH_TOKEN";

/// Opaque request signer. The vendor's auth scheme is a black box here, the
/// token comes from the environment and is attached to every request.
#[derive(Clone)]
pub struct Signer {
    auth_token: String,
}

impl Signer {
    pub fn from_env() -> anyhow::Result<Self> {
        let auth_token = env::var(AUTH_TOKEN_ENV).with_context(|| {
            format!("[{}] is not set, cannot sign control-plane requests", AUTH_TOKEN_ENV)
        })?;
        Ok(Self { auth_token })
    }

    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.auth_token)
    }
}

#[derive(Deserialize)]
struct ServiceErrorBody {
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct DrPlanCollection {
    #[serde(default)]
    items: Vec<DrPlan>,
}

async fn check_status(response: Response) -> anyhow::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<ServiceErrorBody>().await {
        Ok(body) if !body.message.is_empty() => body.message,
        _ => String::from("no error details returned"),
    };
    bail!(Error::ServiceError(format!(
        "status: {}, message: {}",
        status, message
    )))
}

pub struct HttpDrClient {
    http_client: Client,
    base_url: String,
    signer: Signer,
}

impl HttpDrClient {
    pub fn new(profile: &ClientProfile, signer: Signer) -> anyhow::Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http_client,
            base_url: format!(
                "https://disaster-recovery.{}.oci.oraclecloud.com/{}",
                profile.region, DR_SERVICE_API_VERSION
            ),
            signer,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> anyhow::Result<T> {
        let response = self.signer.apply(self.http_client.get(url)).send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn list_plans_in_state(
        &self,
        group_ocid: &str,
        lifecycle_state: Option<&str>,
    ) -> anyhow::Result<Vec<DrPlan>> {
        let mut url = format!(
            "{}/drPlans?drProtectionGroupId={}",
            self.base_url, group_ocid
        );
        if let Some(state) = lifecycle_state {
            url.push_str(&format!("&lifecycleState={}", state));
        }
        let collection: DrPlanCollection = self.get_json(&url).await?;
        Ok(collection.items)
    }
}

#[async_trait]
impl DrClient for HttpDrClient {
    async fn get_protection_group(&self, drpg_ocid: &str) -> Option<DrProtectionGroup> {
        let url = format!("{}/drProtectionGroups/{}", self.base_url, drpg_ocid);
        match self.get_json::<DrProtectionGroup>(&url).await {
            Ok(group) => Some(group),
            Err(err) => {
                log_error!("service error: {}", err);
                None
            }
        }
    }

    async fn list_plans(&self, group_ocid: &str) -> anyhow::Result<PlanListing> {
        let all_plans = self.list_plans_in_state(group_ocid, None).await?;
        if let Some(transitional) = find_transitional_plan(&all_plans) {
            return Ok(transitional);
        }
        let active_plans = self
            .list_plans_in_state(group_ocid, Some(LifecycleState::Active.as_str()))
            .await?;
        Ok(PlanListing::Active(active_plans))
    }

    async fn create_execution(
        &self,
        plan_ocid: &str,
        options: PrecheckOptions,
    ) -> anyhow::Result<DrPlanExecution> {
        let url = format!("{}/drPlanExecutions", self.base_url);
        let body = json!({
            "planId": plan_ocid,
            "executionOptions": options,
        });
        let response = self
            .signer
            .apply(self.http_client.post(&url).json(&body))
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json::<DrPlanExecution>().await?)
    }

    async fn get_execution(&self, execution_ocid: &str) -> anyhow::Result<DrPlanExecution> {
        let url = format!("{}/drPlanExecutions/{}", self.base_url, execution_ocid);
        self.get_json(&url).await
    }
}

pub struct HttpOnsClient {
    http_client: Client,
    base_url: String,
    signer: Signer,
}

impl HttpOnsClient {
    pub fn new(profile: &ClientProfile, signer: Signer) -> anyhow::Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http_client,
            base_url: format!(
                "https://notification.{}.oci.oraclecloud.com/{}",
                profile.region, ONS_SERVICE_API_VERSION
            ),
            signer,
        })
    }
}

#[async_trait]
impl OnsClient for HttpOnsClient {
    async fn publish_message(
        &self,
        topic_ocid: &str,
        title: &str,
        body: &str,
    ) -> anyhow::Result<()> {
        let url = format!("{}/topics/{}/messages", self.base_url, topic_ocid);
        let message = json!({
            "title": title,
            "body": body,
        });
        let response = self
            .signer
            .apply(self.http_client.post(&url).json(&message))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

pub struct HttpClientFactory {
    signer: Signer,
}

impl HttpClientFactory {
    pub fn new(signer: Signer) -> Self {
        Self { signer }
    }
}

impl ClientFactory for HttpClientFactory {
    fn build_dr_client(&self, profile: &ClientProfile) -> anyhow::Result<Box<dyn DrClient>> {
        Ok(Box::new(HttpDrClient::new(profile, self.signer.clone())?))
    }

    fn build_ons_client(&self, profile: &ClientProfile) -> anyhow::Result<Box<dyn OnsClient>> {
        Ok(Box::new(HttpOnsClient::new(profile, self.signer.clone())?))
    }
}
