use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::utils::time_util::TimeUtil;

pub const REGION_PROFILE: &str = "REGION";

/// Ephemeral per-call config file scoping an API client to one region.
///
/// The file is written on create and removed when the guard drops, so it
/// cannot outlive the scope that created it, early returns included. At most
/// one file exists per identifier context; the orchestrator drops the current
/// guard before creating the peer's.
pub struct RegionFile {
    path: PathBuf,
}

impl RegionFile {
    pub fn create(region: &str, base_dir: &Path, ocid: &str) -> anyhow::Result<Self> {
        let path = base_dir.join(format!("{}.{}", ocid, TimeUtil::now_timestamp_str()));
        let content = format!("[{}]\nregion = {}\n", REGION_PROFILE, region);
        fs::write(&path, content)
            .with_context(|| format!("failed to write region file [{}]", path.display()))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RegionFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
