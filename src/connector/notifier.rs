use std::{fs, path::Path};

use anyhow::bail;

use crate::{
    client::traits::ClientFactory,
    config::{client_profile::ClientProfile, region_file::RegionFile},
    error::Error,
    log_error,
    utils::{ocid_util::OcidUtil, region_util::RegionUtil},
};

/// Publishes a failure message to a notification topic. The message body is
/// the error log of the current run prefixed with the subject identity.
pub struct Notifier<'a> {
    factory: &'a dyn ClientFactory,
    base_dir: &'a Path,
}

impl<'a> Notifier<'a> {
    pub fn new(factory: &'a dyn ClientFactory, base_dir: &'a Path) -> Self {
        Self { factory, base_dir }
    }

    /// An unresolvable topic region is the only error surfaced to the
    /// caller; every failure past that point is logged and swallowed, a
    /// broken notification channel never escalates a precheck run.
    pub async fn send(
        &self,
        display_name: &str,
        subject_ocid: &str,
        topic_ocid: &str,
        error_log: &Path,
    ) -> anyhow::Result<()> {
        let topic_region_code = OcidUtil::region_segment(topic_ocid).unwrap_or("");
        let Some(region) = RegionUtil::normalize_region(topic_region_code) else {
            log_error!("unable to determine valid region for the topic");
            bail!(Error::ConfigError(format!(
                "unable to determine valid region for topic [{}]",
                topic_ocid
            )));
        };

        if let Err(err) = self
            .publish(&region, display_name, subject_ocid, topic_ocid, error_log)
            .await
        {
            log_error!("failed to send notification: {}", err);
        }
        Ok(())
    }

    async fn publish(
        &self,
        region: &str,
        display_name: &str,
        subject_ocid: &str,
        topic_ocid: &str,
        error_log: &Path,
    ) -> anyhow::Result<()> {
        let content = format!(
            "{}: {}\n\n{}",
            display_name,
            subject_ocid,
            fs::read_to_string(error_log).unwrap_or_default()
        );
        let subject = format!("Precheck Failed for {} - {}", display_name, subject_ocid);

        // the topic's region file lives only for this one publish
        let region_file = RegionFile::create(region, self.base_dir, topic_ocid)?;
        let profile = ClientProfile::from_region_file(region_file.path())?;
        let ons_client = self.factory.build_ons_client(&profile)?;
        ons_client
            .publish_message(topic_ocid, &subject, &content)
            .await?;
        Ok(())
    }
}
