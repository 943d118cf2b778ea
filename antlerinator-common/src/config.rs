// antlerinator-common/src/config.rs
use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use directories::UserDirs;
use tracing::debug;

use super::error::{AntlrError, Result};

const CACHE_DIR_NAME: &str = ".antlerinator";
const HOME_ENV_VAR: &str = "ANTLERINATOR_HOME";
const RUNTIME_VERSION_ENV_VAR: &str = "ANTLERINATOR_ANTLR_VERSION";
/// Distribution name of the companion runtime whose version selects the default jar.
pub const RUNTIME_PACKAGE: &str = "antlr4-python3-runtime";

/// Environment-derived settings shared by every antlerinator operation.
///
/// The companion runtime version is looked up once, when the value is
/// constructed, and carried explicitly from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub home_dir: PathBuf,
    pub runtime_version: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        debug!("Loading antlerinator configuration");

        let home_dir = match env::var(HOME_ENV_VAR).ok().filter(|s| !s.is_empty()) {
            Some(dir) => {
                debug!("Using home directory from {}: {}", HOME_ENV_VAR, dir);
                PathBuf::from(dir)
            }
            None => UserDirs::new()
                .map(|ud| ud.home_dir().to_path_buf())
                .ok_or_else(|| {
                    AntlrError::Config("could not determine the home directory".to_string())
                })?,
        };
        debug!("Effective home directory: {}", home_dir.display());

        let runtime_version = env::var(RUNTIME_VERSION_ENV_VAR)
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(probe_runtime_version);
        debug!("Companion runtime version: {:?}", runtime_version);

        Ok(Self {
            home_dir,
            runtime_version,
        })
    }

    pub fn new(home_dir: impl Into<PathBuf>, runtime_version: Option<String>) -> Self {
        Self {
            home_dir: home_dir.into(),
            runtime_version,
        }
    }

    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    pub fn runtime_version(&self) -> Option<&str> {
        self.runtime_version.as_deref()
    }

    /// Directory holding the downloaded tool jars.
    pub fn cache_dir(&self) -> PathBuf {
        self.home_dir.join(CACHE_DIR_NAME)
    }
}

/// Asks the installed Python runtime for the version of the ANTLR runtime
/// package. Any failure means the package is not installed.
fn probe_runtime_version() -> Option<String> {
    let script = format!(
        "from importlib import metadata; print(metadata.version('{RUNTIME_PACKAGE}'))"
    );
    for python in ["python3", "python"] {
        debug!("Probing {} for {}", python, RUNTIME_PACKAGE);
        let output = Command::new(python)
            .arg("-c")
            .arg(&script)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output();

        match output {
            Ok(out) if out.status.success() => {
                let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
                if !version.is_empty() {
                    return Some(version);
                }
                debug!("{} reported an empty version for {}", python, RUNTIME_PACKAGE);
            }
            Ok(out) => {
                debug!(
                    "{} is not installed for {} (status {})",
                    RUNTIME_PACKAGE, python, out.status
                );
                // The interpreter ran, so a second one won't know better.
                return None;
            }
            Err(e) => {
                debug!("Failed to execute {}: {}", python, e);
            }
        }
    }
    None
}
