// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::load_config::find_in_parent;
use crate::load_config::resolve_config_path;
use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use ssa_shares::{SearchStrategy, DEFAULT_BATCH_SIZE, DEFAULT_WARN_CANDIDATES};
use std::fmt;
use std::str::FromStr;
use std::{env, path::PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = "ssa.config.yaml";
pub const ENV_PREFIX: &str = "SSA_";

/// Either "sequential" or "parallel"
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Sequential,
    Parallel,
}

/// How results are printed
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            other => bail!("Unknown output format '{}'. Expected 'json' or 'text'", other),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

/// Subset search settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Traversal strategy for the subset space
    pub strategy: StrategyKind,
    /// Worker threads for the parallel strategy, defaults to the number of CPUs
    pub threads: Option<usize>,
    /// Subsets evaluated per parallel batch
    pub batch_size: usize,
    /// Log a warning when the number of candidate subsets exceeds this
    pub warn_candidates: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Sequential,
            threads: None,
            batch_size: DEFAULT_BATCH_SIZE,
            warn_candidates: DEFAULT_WARN_CANDIDATES as u64,
        }
    }
}

impl SearchConfig {
    pub fn strategy(&self) -> SearchStrategy {
        match self.strategy {
            StrategyKind::Sequential => SearchStrategy::Sequential,
            StrategyKind::Parallel => SearchStrategy::Parallel {
                threads: self.threads,
                batch_size: self.batch_size,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// The application configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub output: OutputConfig,
    /// The file the configuration was read from, if any
    #[serde(skip)]
    config_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn search(&self) -> &SearchConfig {
        &self.search
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    pub fn config_file(&self) -> Option<&PathBuf> {
        self.config_file.as_ref()
    }
}

/// Load the config at the config_file or the default location if not provided
///
/// Values are layered: built-in defaults, then the YAML file, then `SSA_`
/// environment variables with `__` separating nested keys
/// (eg. `SSA_SEARCH__STRATEGY=parallel`). A missing default file is not an
/// error, an explicitly requested one is.
pub fn load_config(cli_file: Option<PathBuf>) -> Result<AppConfig> {
    let cwd = env::current_dir()?;
    let explicit = cli_file.is_some();

    let resolved_config_path = resolve_config_path(
        find_in_parent,                                     // finding strategy
        cwd.clone(),                                        // cwd
        OsDirs::config_dir().unwrap_or_else(|| cwd.clone()), // default config folder
        DEFAULT_CONFIG_NAME,                                // hardcoded now to ssa.config.yaml
        cli_file,                                           // config file passed on the cli
    );

    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
    let found_config_file = if resolved_config_path.exists() {
        figment = figment.merge(Yaml::file(&resolved_config_path));
        Some(resolved_config_path)
    } else if explicit {
        bail!(
            "Configuration file not found: {}",
            resolved_config_path.display()
        );
    } else {
        debug!("No configuration file found, using defaults");
        None
    };

    let mut config: AppConfig = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .context("Could not parse configuration")?;
    config.config_file = found_config_file;

    Ok(config)
}

pub struct OsDirs;
impl OsDirs {
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ssa"))
    }
}
