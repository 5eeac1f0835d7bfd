use std::{panic, path::Path};

pub mod client;
pub mod config;
pub mod connector;
pub mod error;
pub mod logger;
pub mod meta;
pub mod utils;

#[cfg(test)]
mod test;

use client::http_client::{HttpClientFactory, Signer};
use connector::precheck_connector::PrecheckConnector;
use utils::log_util::LogUtil;

/// Runs the full precheck flow for one protection group. Every error branch
/// has already logged its context and cleaned up its region file by the time
/// the error reaches the caller, which maps it to a non-zero exit.
pub async fn do_precheck(
    drpg_ocid: &str,
    topic_ocid: Option<&str>,
    base_dir: &Path,
) -> anyhow::Result<()> {
    let error_log = LogUtil::init_log4rs(drpg_ocid, base_dir)?;

    panic::set_hook(Box::new(|panic_info| {
        let backtrace = std::backtrace::Backtrace::capture();
        crate::log_error!("panic: {}\nbacktrace:\n{}", panic_info, backtrace);
    }));

    let signer = Signer::from_env()?;
    let factory = HttpClientFactory::new(signer);
    let connector = PrecheckConnector::build(drpg_ocid, topic_ocid, base_dir, &error_log, &factory);

    let results = connector.check().await?;
    for result in &results {
        result.log();
    }
    Ok(())
}
