use crate::types::EpochSeparators;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per deployment settings, usually read from a TOML file
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Characters that may separate the epoch from the rest of a version.
    /// Arch uses ':', MSYS2 uses '~'.
    pub epoch_separators: Vec<char>,
    /// Print debug messages
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            epoch_separators: EpochSeparators::default().as_slice().to_vec(),
            verbose: false,
        }
    }
}

impl Config {
    pub fn from_toml(data: &str) -> Result<Self> {
        let config: Config = toml::from_str(data).context("Failed to parse config file")?;
        config.check_sanity()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&data)
    }

    pub fn check_sanity(&self) -> Result<()> {
        if self.epoch_separators.is_empty() {
            bail!("At least one epoch separator is required");
        }
        for c in &self.epoch_separators {
            if c.is_ascii_digit() || *c == '-' {
                bail!("Invalid epoch separator '{}'", c);
            }
        }
        Ok(())
    }

    pub fn separators(&self) -> EpochSeparators {
        EpochSeparators::new(self.epoch_separators.iter().copied())
    }

    /// Turn on debug messages if the config asks for them.
    ///
    /// A quiet config leaves verbosity alone, it may have been switched on
    /// by another loader.
    pub fn apply_verbosity(&self) {
        if self.verbose {
            crate::msg::set_verbose(true);
        }
    }
}
