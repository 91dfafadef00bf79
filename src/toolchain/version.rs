use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::error::{DriverError, DriverResult};

/// Parse the SWIG major version from `swig -version` output
///
/// The banner looks like:
///
/// ```text
/// SWIG Version 4.1.1
///
/// Compiled with g++ [x86_64-pc-linux-gnu]
/// ```
///
/// The match may appear anywhere in the text. Returns None when the
/// banner is missing.
pub fn parse_swig_major(output: &str) -> Option<u32> {
    static SWIG_VERSION: OnceLock<Regex> = OnceLock::new();
    let re = SWIG_VERSION.get_or_init(|| Regex::new(r"SWIG Version ([0-9]+)").expect("valid regex"));

    re.captures(output)
        .and_then(|cap| cap.get(1))
        .map(|m| parse_major(m.as_str()))
}

/// Parse the Node.js major version from `node --version` output (e.g. "v18.17.0" -> 18)
pub fn parse_node_major(output: &str) -> Option<u32> {
    static NODE_VERSION: OnceLock<Regex> = OnceLock::new();
    let re = NODE_VERSION.get_or_init(|| Regex::new(r"^v([0-9]+)").expect("valid regex"));

    re.captures(output.trim())
        .and_then(|cap| cap.get(1))
        .map(|m| parse_major(m.as_str()))
}

/// Digits matched by the version regexes; too many to fit saturate
fn parse_major(digits: &str) -> u32 {
    digits.parse::<u32>().unwrap_or(u32::MAX)
}

/// Gate SWIG on its major version
///
/// A banner without a version is treated the same as a too-old SWIG.
pub fn check_swig_version(output: &str, min_major: u32) -> DriverResult<u32> {
    match parse_swig_major(output) {
        Some(major) if major >= min_major => Ok(major),
        found => Err(DriverError::UnsupportedSwig {
            found,
            required: min_major,
        }),
    }
}

/// Pre-generated wrapper matching an older Node.js ABI
///
/// | Node major | Fallback            |
/// |------------|---------------------|
/// | >= 16      | none                |
/// | 12 - 15    | `blst_wrap.v12.cpp` |
/// | 8 - 11     | `blst_wrap.v8.cpp`  |
/// | < 8        | none                |
///
/// Selected and reported, never copied anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeFallback {
    V12,
    V8,
}

impl NodeFallback {
    pub fn select(node_major: u32) -> Option<Self> {
        match node_major {
            16.. => None,
            12..=15 => Some(NodeFallback::V12),
            8..=11 => Some(NodeFallback::V8),
            _ => None,
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            NodeFallback::V12 => "blst_wrap.v12.cpp",
            NodeFallback::V8 => "blst_wrap.v8.cpp",
        }
    }
}

impl fmt::Display for NodeFallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}
