use std::{fs::File, io::Read};

use anyhow::{bail, Context};
use configparser::ini::Ini;

use crate::error::Error;

pub struct IniLoader {
    pub ini: Ini,
}

impl IniLoader {
    pub fn new(ini_file: &str) -> anyhow::Result<Self> {
        let mut config_str = String::new();
        File::open(ini_file)
            .with_context(|| format!("failed to open config file [{}]", ini_file))?
            .read_to_string(&mut config_str)?;

        let mut ini = Ini::new();
        ini.read(config_str).map_err(Error::ConfigError)?;
        Ok(Self { ini })
    }

    pub fn get_required(&self, section: &str, key: &str) -> anyhow::Result<String> {
        match self.ini.get(section, key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => bail!(Error::ConfigError(format!(
                "config [{}].{} does not exist or is empty",
                section, key
            ))),
        }
    }
}
