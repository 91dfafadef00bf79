use anyhow::{Context, Result};
use serde::Deserialize;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::toolchain::{
    DEFAULT_CONFIG_FILE, DEFAULT_NODE, DEFAULT_PREBUILD_PATH, DEFAULT_SWIG,
    DEFAULT_V8_VERSION_DEFINE, ENV_PREBUILD_PATH, ENV_SKIP_RUN, MIN_SWIG_MAJOR,
};

/// Contents of blst-wrap.toml
///
/// Every section is optional, an empty file is a valid config.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub prebuild: PrebuildConfig,
    #[serde(default)]
    pub swig: SwigConfig,
    #[serde(default)]
    pub node: NodeConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct PrebuildConfig {
    pub path: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for PrebuildConfig {
    fn default() -> Self {
        Self {
            path: None,
            enabled: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SwigConfig {
    #[serde(default = "default_swig_bin")]
    pub bin: PathBuf,
    #[serde(default = "default_defines")]
    pub defines: Vec<String>,
    #[serde(default = "default_min_major")]
    pub min_major: u32,
}

impl Default for SwigConfig {
    fn default() -> Self {
        Self {
            bin: default_swig_bin(),
            defines: default_defines(),
            min_major: default_min_major(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NodeConfig {
    #[serde(default = "default_node_bin")]
    pub bin: PathBuf,
    #[serde(default = "default_true")]
    pub check: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bin: default_node_bin(),
            check: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_swig_bin() -> PathBuf {
    PathBuf::from(DEFAULT_SWIG)
}

fn default_node_bin() -> PathBuf {
    PathBuf::from(DEFAULT_NODE)
}

fn default_defines() -> Vec<String> {
    vec![DEFAULT_V8_VERSION_DEFINE.to_string()]
}

fn default_min_major() -> u32 {
    MIN_SWIG_MAJOR
}

/// Load and parse a config file
pub fn load_config(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load an explicit config file, or blst-wrap.toml when it exists
///
/// An explicitly named file must exist. Without one, a missing
/// blst-wrap.toml just means defaults.
pub fn load_optional(explicit: Option<&Path>) -> Result<FileConfig> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if path.is_file() {
                load_config(path)
            } else {
                Ok(FileConfig::default())
            }
        }
    }
}

/// Snapshot of the environment variables the driver reads
#[derive(Debug, Clone, Default)]
pub struct EnvVars {
    pub prebuild_path: Option<OsString>,
    pub skip_run: Option<OsString>,
}

impl EnvVars {
    pub fn from_process() -> Self {
        Self {
            prebuild_path: std::env::var_os(ENV_PREBUILD_PATH),
            skip_run: std::env::var_os(ENV_SKIP_RUN),
        }
    }
}

/// Command-line overrides, highest precedence
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub prebuild_path: Option<PathBuf>,
    pub no_prebuild: bool,
    pub skip_run: bool,
    pub swig: Option<PathBuf>,
    pub node: Option<PathBuf>,
    pub skip_node_check: bool,
}

/// Fully resolved driver settings
#[derive(Debug, Clone, PartialEq)]
pub struct DriverConfig {
    /// Prebuild cache file; None disables restore and copy-back
    pub prebuild_path: Option<PathBuf>,
    /// Refuse to run SWIG when the prebuild is missing
    pub skip_run: bool,
    pub swig: SwigConfig,
    pub node: NodeConfig,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            prebuild_path: Some(PathBuf::from(DEFAULT_PREBUILD_PATH)),
            skip_run: false,
            swig: SwigConfig::default(),
            node: NodeConfig::default(),
        }
    }
}

impl DriverConfig {
    /// Merge defaults < config file < environment < command line
    ///
    /// Empty environment values count as unset, so `SWIG_SKIP_RUN=` does
    /// not skip and `PREBUILD_BLST_WRAP_PATH=` keeps the default path. Any
    /// other value of SWIG_SKIP_RUN, "false" included, skips.
    ///
    /// A non-empty PREBUILD_BLST_WRAP_PATH re-enables a cache that the
    /// config file turned off; only `--no-prebuild` disables it outright.
    pub fn resolve(file: FileConfig, env: &EnvVars, overrides: &Overrides) -> Self {
        let env_prebuild = env
            .prebuild_path
            .as_ref()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let prebuild_path = if let Some(path) = &overrides.prebuild_path {
            Some(path.clone())
        } else if overrides.no_prebuild {
            None
        } else if env_prebuild.is_some() {
            env_prebuild
        } else if !file.prebuild.enabled {
            None
        } else {
            Some(
                file.prebuild
                    .path
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_PREBUILD_PATH)),
            )
        };

        let skip_run = overrides.skip_run || env.skip_run.as_ref().is_some_and(|v| !v.is_empty());

        let mut swig = file.swig;
        if let Some(bin) = &overrides.swig {
            swig.bin = bin.clone();
        }

        let mut node = file.node;
        if let Some(bin) = &overrides.node {
            node.bin = bin.clone();
        }
        if overrides.skip_node_check {
            node.check = false;
        }

        Self {
            prebuild_path,
            skip_run,
            swig,
            node,
        }
    }

    /// Resolve from the process environment and an optional config file
    pub fn load(config_file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let file = load_optional(config_file)?;
        Ok(Self::resolve(file, &EnvVars::from_process(), overrides))
    }
}
