mod defaults;
pub mod version;

pub use defaults::*;
pub use version::{check_swig_version, parse_node_major, parse_swig_major, NodeFallback};

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::DriverConfig;
use crate::error::{DriverError, DriverResult};

const SWIG_LABEL: &str = "SWIG";
const NODE_LABEL: &str = "NodeJS";

/// External tools the driver shells out to
///
/// Both binaries are resolved through PATH unless configured with an
/// explicit path. Every invocation blocks until the tool exits.
#[derive(Debug, Clone)]
pub struct Toolchain {
    swig: PathBuf,
    node: PathBuf,
}

impl Toolchain {
    pub fn new(swig: impl Into<PathBuf>, node: impl Into<PathBuf>) -> Self {
        Self {
            swig: swig.into(),
            node: node.into(),
        }
    }

    pub fn from_config(config: &DriverConfig) -> Self {
        Self::new(&config.swig.bin, &config.node.bin)
    }

    pub fn swig(&self) -> &Path {
        &self.swig
    }

    pub fn node(&self) -> &Path {
        &self.node
    }

    /// Run `swig -version` and return its banner
    pub fn swig_version(&self) -> DriverResult<String> {
        let mut cmd = Command::new(&self.swig);
        cmd.arg("-version");
        capture(cmd, SWIG_LABEL)
    }

    /// Generate the C++ wrapper for the Node.js JavaScript backend
    ///
    /// SWIG's own output is streamed to the terminal. A non-zero exit is
    /// reported as [`DriverError::ToolFailed`] carrying SWIG's status.
    pub fn run_swig(&self, source: &Path, target: &Path, defines: &[String]) -> DriverResult<()> {
        let status = Command::new(&self.swig)
            .args(swig_args(source, target, defines))
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| DriverError::spawn(SWIG_LABEL, e))?;

        if !status.success() {
            return Err(DriverError::ToolFailed {
                tool: SWIG_LABEL.to_string(),
                code: status.code(),
            });
        }

        Ok(())
    }

    /// Run `node --version` and return its output (e.g. "v18.17.0")
    pub fn node_version(&self) -> DriverResult<String> {
        let mut cmd = Command::new(&self.node);
        cmd.arg("--version");
        capture(cmd, NODE_LABEL)
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::new(DEFAULT_SWIG, DEFAULT_NODE)
    }
}

/// Argument list for the SWIG invocation
///
/// `-c++ -javascript -node -D<define>... -o <target> <source>`
pub fn swig_args(source: &Path, target: &Path, defines: &[String]) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-c++".into(), "-javascript".into(), "-node".into()];
    args.extend(defines.iter().map(|d| OsString::from(format!("-D{}", d))));
    args.push("-o".into());
    args.push(target.as_os_str().to_owned());
    args.push(source.as_os_str().to_owned());
    args
}

/// Run a command to completion and return its trimmed stdout
///
/// Falls back to stderr when stdout is empty, some builds print the
/// version banner there.
fn capture(mut cmd: Command, tool: &str) -> DriverResult<String> {
    let output = cmd
        .stdin(Stdio::null())
        .output()
        .map_err(|e| DriverError::spawn(tool, e))?;

    if !output.status.success() {
        return Err(DriverError::ToolFailed {
            tool: tool.to_string(),
            code: output.status.code(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if stdout.is_empty() {
        Ok(String::from_utf8_lossy(&output.stderr).trim().to_string())
    } else {
        Ok(stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swig_args_shape() {
        let args = swig_args(
            Path::new("../blst.swg"),
            Path::new("out/blst_wrap.cpp"),
            &[DEFAULT_V8_VERSION_DEFINE.to_string()],
        );
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect();

        assert_eq!(
            args,
            vec![
                "-c++",
                "-javascript",
                "-node",
                "-DV8_VERSION=0x060000",
                "-o",
                "out/blst_wrap.cpp",
                "../blst.swg",
            ]
        );
    }

    #[test]
    fn test_swig_args_multiple_defines() {
        let defines = vec!["A=1".to_string(), "B".to_string()];
        let args = swig_args(Path::new("in.swg"), Path::new("out.cpp"), &defines);
        assert_eq!(args[3], OsString::from("-DA=1"));
        assert_eq!(args[4], OsString::from("-DB"));
        assert_eq!(args.len(), 8);
        assert_eq!(
            &args[5..],
            &[
                OsString::from("-o"),
                OsString::from("out.cpp"),
                OsString::from("in.swg"),
            ]
        );
    }

    #[test]
    fn test_missing_binary_is_not_installed() {
        let toolchain = Toolchain::new("/nonexistent/blst-wrap/swig", DEFAULT_NODE);
        let err = toolchain.swig_version().unwrap_err();
        assert!(matches!(err, DriverError::ToolNotInstalled { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_default_toolchain_uses_path_lookup() {
        let toolchain = Toolchain::default();
        assert_eq!(toolchain.swig(), Path::new("swig"));
        assert_eq!(toolchain.node(), Path::new("node"));
    }
}
