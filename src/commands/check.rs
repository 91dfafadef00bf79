use colored::Colorize;

use crate::config::DriverConfig;
use crate::error::DriverResult;
use crate::toolchain::{check_swig_version, Toolchain};

/// Fail unless a supported SWIG is installed
///
/// Exit codes follow the driver: errno when SWIG is missing, 202 when it
/// is too old or prints no recognizable version.
pub fn execute(config: &DriverConfig) -> DriverResult<u32> {
    let toolchain = Toolchain::from_config(config);
    let banner = toolchain.swig_version()?;
    let major = check_swig_version(&banner, config.swig.min_major)?;

    println!(
        "{} SWIG {} ({}) supported",
        "✓".green(),
        major,
        toolchain.swig().display()
    );
    Ok(major)
}
