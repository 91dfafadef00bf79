//! Error types for the binding generator driver
//!
//! Every variant maps to the process exit code the calling build system
//! (node-gyp) interprets.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code when the prebuilt wrapper is expected but absent
pub const EXIT_PREBUILD_MISSING: i32 = 201;

/// Exit code when SWIG is too old or its version can't be read
pub const EXIT_UNSUPPORTED_SWIG: i32 = 202;

/// Exit code when `node --version` can't be parsed
pub const EXIT_NODE_VERSION: i32 = 203;

/// Result type alias for driver operations
pub type DriverResult<T> = Result<T, DriverError>;

#[derive(Error, Debug)]
pub enum DriverError {
    /// No prebuild cache file and SWIG_SKIP_RUN is set
    #[error("{} and SWIG_SKIP_RUN is set", describe_prebuild(.path))]
    PrebuildMissing { path: Option<PathBuf> },

    /// SWIG version missing from output or below the required major
    #[error("{}", unsupported_swig_message(.found, .required))]
    UnsupportedSwig { found: Option<u32>, required: u32 },

    #[error("error checking NodeJS version: unexpected output '{output}'")]
    NodeVersionUnparseable { output: String },

    /// Tool binary does not exist (ENOENT)
    #[error("{tool} not installed: {source}")]
    ToolNotInstalled {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// Any other OS error while spawning a tool
    #[error("error running {tool}: {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// Tool ran but exited unsuccessfully
    #[error("{tool} exited with {}", describe_code(.code))]
    ToolFailed { tool: String, code: Option<i32> },

    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Config(#[from] anyhow::Error),
}

impl DriverError {
    /// Classify a spawn failure: ENOENT means the tool is not installed
    pub fn spawn(tool: &str, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            DriverError::ToolNotInstalled {
                tool: tool.to_string(),
                source,
            }
        } else {
            DriverError::ToolSpawn {
                tool: tool.to_string(),
                source,
            }
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            DriverError::PrebuildMissing { .. } => EXIT_PREBUILD_MISSING,
            DriverError::UnsupportedSwig { .. } => EXIT_UNSUPPORTED_SWIG,
            DriverError::NodeVersionUnparseable { .. } => EXIT_NODE_VERSION,
            DriverError::ToolNotInstalled { source, .. } => source.raw_os_error().unwrap_or(2),
            DriverError::ToolSpawn { source, .. } | DriverError::Io { source, .. } => {
                errno_or_one(source)
            }
            DriverError::ToolFailed { code, .. } => code.filter(|c| *c != 0).unwrap_or(1),
            DriverError::Config(_) => 1,
        }
    }
}

fn errno_or_one(err: &io::Error) -> i32 {
    match err.raw_os_error() {
        Some(code) if code != 0 => code,
        _ => 1,
    }
}

fn unsupported_swig_message(found: &Option<u32>, required: &u32) -> String {
    match found {
        Some(major) => format!(
            "unsupported SWIG version {}, must be >= {}",
            major, required
        ),
        None => format!("unsupported SWIG version (unrecognized), must be >= {}", required),
    }
}

fn describe_prebuild(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!("prebuilt wrapper not found at {}", path.display()),
        None => "prebuild cache disabled".to_string(),
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}
