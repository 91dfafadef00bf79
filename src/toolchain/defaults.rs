/// Default tool and cache settings
///
/// Each value can be overridden by blst-wrap.toml, the environment, or a
/// command-line flag, in increasing order of precedence.

/// SWIG binary looked up on PATH
pub const DEFAULT_SWIG: &str = "swig";

/// Node.js binary looked up on PATH
pub const DEFAULT_NODE: &str = "node";

/// Prebuild cache file, relative to the working directory
pub const DEFAULT_PREBUILD_PATH: &str = "blst_wrap.cpp";

/// Minimum SWIG major version with a working `-javascript -node` backend
pub const MIN_SWIG_MAJOR: u32 = 4;

/// V8 API level the generated wrapper targets
///
/// Passed to SWIG as `-DV8_VERSION=0x060000`.
pub const DEFAULT_V8_VERSION_DEFINE: &str = "V8_VERSION=0x060000";

/// Environment variable overriding the prebuild cache path
pub const ENV_PREBUILD_PATH: &str = "PREBUILD_BLST_WRAP_PATH";

/// Environment variable that forbids running SWIG
pub const ENV_SKIP_RUN: &str = "SWIG_SKIP_RUN";

/// Config file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "blst-wrap.toml";
