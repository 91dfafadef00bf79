#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use blst_wrap::config::{DriverConfig, NodeConfig, SwigConfig};

/// Content the mock SWIG writes to its `-o` target
pub const GENERATED: &str = "// blst_wrap.cpp generated by mock swig\n";

/// Sandbox with mock swig/node binaries and input/output paths
pub struct Sandbox {
    pub dir: TempDir,
    pub source: PathBuf,
    pub target: PathBuf,
    pub cache: PathBuf,
    pub swig: PathBuf,
    pub node: PathBuf,
    /// Appended to by the mock SWIG on every invocation
    pub swig_log: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_path_buf();

        let source = root.join("blst.swg");
        fs::write(&source, "%module blst\n").unwrap();

        let sandbox = Self {
            source,
            target: root.join("build/Release/obj.target/blst/geni/blst_wrap.cpp"),
            cache: root.join("prebuild/blst_wrap.cpp"),
            swig: root.join("bin/swig"),
            node: root.join("bin/node"),
            swig_log: root.join("swig.log"),
            dir,
        };
        fs::create_dir_all(sandbox.target.parent().unwrap()).unwrap();
        sandbox
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Mock SWIG reporting `version` and exiting with `status` when generating
    pub fn mock_swig(&self, version: &str, status: i32) {
        let script = format!(
            r#"#!/bin/sh
echo "$@" >> "{log}"
if [ "$1" = "-version" ]; then
  echo ""
  echo "SWIG Version {version}"
  echo ""
  echo "Compiled with g++ [x86_64-pc-linux-gnu]"
  exit 0
fi
out=""
while [ $# -gt 0 ]; do
  if [ "$1" = "-o" ]; then
    out="$2"
    shift
  fi
  shift
done
if [ {status} -ne 0 ]; then
  echo "mock swig failure" >&2
  exit {status}
fi
printf '%s\n' "// blst_wrap.cpp generated by mock swig" > "$out"
"#,
            log = self.swig_log.display(),
            version = version,
            status = status,
        );
        write_executable(&self.swig, &script);
    }

    /// Mock SWIG whose version banner is `banner` verbatim
    pub fn mock_swig_banner(&self, banner: &str) {
        let script = format!(
            "#!/bin/sh\necho \"$@\" >> \"{}\"\necho \"{}\"\n",
            self.swig_log.display(),
            banner
        );
        write_executable(&self.swig, &script);
    }

    /// SWIG file without any execute bit, spawning it fails with EACCES
    pub fn non_executable_swig(&self) {
        fs::create_dir_all(self.swig.parent().unwrap()).unwrap();
        fs::write(&self.swig, "#!/bin/sh\necho 'SWIG Version 4.1.1'\n").unwrap();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.swig, fs::Permissions::from_mode(0o644)).unwrap();
        }
    }

    /// Mock Node.js printing `version` for `--version`
    pub fn mock_node(&self, version: &str) {
        write_executable(&self.node, &format!("#!/bin/sh\necho \"{}\"\n", version));
    }

    pub fn swig_invocations(&self) -> Vec<String> {
        fs::read_to_string(&self.swig_log)
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn write_cache(&self, content: &[u8]) {
        fs::create_dir_all(self.cache.parent().unwrap()).unwrap();
        fs::write(&self.cache, content).unwrap();
    }

    /// Driver config pointing at this sandbox's mocks and cache
    pub fn config(&self) -> DriverConfig {
        DriverConfig {
            prebuild_path: Some(self.cache.clone()),
            skip_run: false,
            swig: SwigConfig {
                bin: self.swig.clone(),
                ..Default::default()
            },
            node: NodeConfig {
                bin: self.node.clone(),
                check: true,
            },
        }
    }
}

pub fn write_executable(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms).unwrap();
    }
}
