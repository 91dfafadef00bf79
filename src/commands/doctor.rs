use anyhow::Result;
use colored::Colorize;

use crate::config::DriverConfig;
use crate::prebuild;
use crate::toolchain::{check_swig_version, parse_node_major, NodeFallback, Toolchain};

/// Report toolchain and prebuild cache health
///
/// Returns Ok(false) when SWIG is unusable, which is the only condition
/// that stops the driver from producing a wrapper without a prebuild.
pub fn execute(config: &DriverConfig) -> Result<bool> {
    println!("{}", "blst-wrap Health Check".cyan().bold());
    println!("{}", "=".repeat(50));
    println!();

    let mut all_ok = true;
    let toolchain = Toolchain::from_config(config);

    print_check("blst-wrap installation");
    println!("  {} Version: {}", "✓".green(), env!("CARGO_PKG_VERSION"));
    println!();

    print_check("Configuration");
    match &config.prebuild_path {
        Some(path) => println!("  - Prebuild path: {}", path.display()),
        None => println!("  - Prebuild path: {}", "disabled".dimmed()),
    }
    println!("  - SWIG_SKIP_RUN: {}", config.skip_run);
    println!("  - SWIG: {}", config.swig.bin.display());
    println!("  - SWIG defines: {}", config.swig.defines.join(" "));
    println!("  - Node.js: {}", config.node.bin.display());
    println!();

    print_check("SWIG");
    match toolchain.swig_version() {
        Ok(banner) => match check_swig_version(&banner, config.swig.min_major) {
            Ok(major) => println!("  {} SWIG {} installed", "✓".green(), major),
            Err(e) => {
                println!("  {} {}", "✗".red(), e);
                all_ok = false;
            }
        },
        Err(e) => {
            println!("  {} {}", "✗".red(), e);
            all_ok = false;
        }
    }
    println!();

    print_check("Node.js");
    if config.node.check {
        match toolchain.node_version() {
            Ok(output) => match parse_node_major(&output) {
                Some(major) => {
                    println!("  {} Node.js {} ({})", "✓".green(), major, output.trim());
                    if let Some(fallback) = NodeFallback::select(major) {
                        println!("  {} Legacy prebuild name: {}", "ℹ".yellow(), fallback);
                    }
                }
                None => println!("  {} Unrecognized version output '{}'", "⚠".yellow(), output),
            },
            Err(e) => println!("  {} {}", "⚠".yellow(), e),
        }
    } else {
        println!("  {}", "(version check disabled)".dimmed());
    }
    println!();

    print_check("Prebuild cache");
    match &config.prebuild_path {
        Some(path) if path.is_file() => {
            let size = std::fs::metadata(path)?.len();
            println!("  {} Found at {}", "✓".green(), path.display());
            println!("  {} Size: {}", "✓".green(), human_size(size));
            println!("  {} sha256: {}", "✓".green(), prebuild::digest(path)?);
        }
        Some(path) => {
            println!("  {} Not found at {}", "ℹ".yellow(), path.display());
            if config.skip_run {
                println!("  {} SWIG_SKIP_RUN is set, generation will fail", "⚠".yellow());
                all_ok = false;
            }
        }
        None => println!("  {}", "(disabled)".dimmed()),
    }
    println!();

    println!("{}", "=".repeat(50));
    if all_ok {
        println!("{} All checks passed!", "✓".green().bold());
    } else {
        println!("{} Some issues detected", "⚠".yellow().bold());
        println!();
        println!("Install SWIG 4 or newer, or provide a prebuilt blst_wrap.cpp");
    }

    Ok(all_ok)
}

fn print_check(name: &str) {
    println!("{} {}...", "Checking".cyan().bold(), name);
}

fn human_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    format!("{:.1} {}", size, UNITS[unit_index])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(512), "512.0 B");
        assert_eq!(human_size(2048), "2.0 KB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.0 MB");
    }
}
