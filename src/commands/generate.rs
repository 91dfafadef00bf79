use colored::Colorize;
use std::env;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use crate::config::DriverConfig;
use crate::error::{DriverError, DriverResult};
use crate::prebuild;
use crate::toolchain::{check_swig_version, parse_node_major, NodeFallback, Toolchain, ENV_SKIP_RUN};

/// How the target wrapper came to exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Copied from the prebuild cache, SWIG never ran
    Restored,
    /// Generated by SWIG
    Generated {
        swig_major: u32,
        node_major: Option<u32>,
        fallback: Option<NodeFallback>,
    },
}

/// Produce `target` from `source`, reusing the prebuild cache when possible
///
/// 1. Prebuild cache present: copy it to `target` and stop.
/// 2. Otherwise, with SWIG_SKIP_RUN set, fail with exit code 201.
/// 3. Gate on `swig -version` (202 when too old or unrecognized).
/// 4. Run SWIG.
/// 5. Check `node --version` (203 when unparseable) and pick the legacy
///    fallback wrapper name, which is only reported.
/// 6. Copy the generated wrapper back to the prebuild cache.
pub fn execute(source: &Path, target: &Path, config: &DriverConfig) -> DriverResult<Outcome> {
    let toolchain = Toolchain::from_config(config);
    print_inputs(source, target, config);

    if let Some(cache) = &config.prebuild_path {
        if prebuild::restore(cache, target)? {
            println!(
                "{} Prebuild found at {}, skipping SWIG",
                "✓".green(),
                cache.display()
            );
            print_digest(target);
            return Ok(Outcome::Restored);
        }
    }

    if config.skip_run {
        println!(
            "{} Prebuild not found and SWIG_SKIP_RUN is set",
            "✗".red()
        );
        list_working_dir();
        return Err(DriverError::PrebuildMissing {
            path: config.prebuild_path.clone(),
        });
    }

    println!("{} Prebuild not found, building", "info:".blue().bold());

    let banner = toolchain.swig_version()?;
    println!("{}", banner);
    let swig_major = check_swig_version(&banner, config.swig.min_major)?;

    println!("Running SWIG...");
    toolchain.run_swig(source, target, &config.swig.defines)?;

    let (node_major, fallback) = if config.node.check {
        let (major, fallback) = check_node(&toolchain)?;
        (Some(major), fallback)
    } else {
        (None, None)
    };

    if let Some(cache) = &config.prebuild_path {
        println!("Copying target cpp file to {}", cache.display());
        prebuild::persist(target, cache)?;
    }
    print_digest(target);

    println!("{} Done", "✓".green());
    Ok(Outcome::Generated {
        swig_major,
        node_major,
        fallback,
    })
}

/// Parse the Node.js major version and select the legacy fallback name
fn check_node(toolchain: &Toolchain) -> DriverResult<(u32, Option<NodeFallback>)> {
    let output = toolchain.node_version()?;
    let major = parse_node_major(&output)
        .ok_or_else(|| DriverError::NodeVersionUnparseable { output: output.clone() })?;

    let fallback = NodeFallback::select(major);
    match fallback {
        Some(name) => println!("Node.js {} (legacy prebuild: {})", major, name),
        None => println!("Node.js {}", major),
    }

    Ok((major, fallback))
}

fn print_inputs(source: &Path, target: &Path, config: &DriverConfig) {
    println!("SOURCE_SWIG_FILE {}", source.display());
    println!("TARGET_CPP_FILE {}", target.display());
    match &config.prebuild_path {
        Some(path) => println!("PREBUILD_BLST_WRAP_PATH {}", path.display()),
        None => println!("PREBUILD_BLST_WRAP_PATH {}", "(disabled)".dimmed()),
    }
    let raw_skip = env::var_os(ENV_SKIP_RUN);
    let raw_skip = describe_env(raw_skip.as_deref());
    if config.skip_run && raw_skip == "None" {
        println!("SWIG_SKIP_RUN {} (--skip-run)", raw_skip);
    } else {
        println!("SWIG_SKIP_RUN {}", raw_skip);
    }
    match env::current_dir() {
        Ok(cwd) => println!("CWD {}", cwd.display()),
        Err(e) => println!("CWD {} ({})", "unknown".dimmed(), e),
    }
}

/// Raw environment value as logged, `None` when unset
fn describe_env(value: Option<&OsStr>) -> String {
    match value {
        Some(value) => value.to_string_lossy().to_string(),
        None => "None".to_string(),
    }
}

fn print_digest(path: &Path) {
    if let Ok(digest) = prebuild::digest(path) {
        println!("  sha256 {}", digest.as_str().dimmed());
    }
}

/// Show what is in the working directory, for CI logs
fn list_working_dir() {
    let Ok(entries) = fs::read_dir(".") else {
        return;
    };

    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    println!("{:?}", names);
}
