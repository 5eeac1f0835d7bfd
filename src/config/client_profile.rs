use std::path::Path;

use anyhow::{bail, Context};

use crate::error::Error;

use super::{ini_loader::IniLoader, region_file::REGION_PROFILE};

/// Region scope for one API client, loaded back from the ephemeral region
/// file the same way the vendor SDK's config loader consumes it.
#[derive(Debug, Clone)]
pub struct ClientProfile {
    pub region: String,
}

impl ClientProfile {
    pub fn from_region_file(region_file: &Path) -> anyhow::Result<Self> {
        let Some(path) = region_file.to_str() else {
            bail!(Error::ConfigError(format!(
                "region file path [{}] is not valid utf-8",
                region_file.display()
            )));
        };
        let loader = IniLoader::new(path)?;
        let region = loader
            .get_required(REGION_PROFILE, "region")
            .with_context(|| format!("invalid region file [{}]", path))?;
        Ok(Self { region })
    }
}
