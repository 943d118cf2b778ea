// antlerinator-core/src/locate.rs
//! Maps a tool version to its jar file name, default cache path and
//! download URL. Nothing here touches the filesystem or the network.

use std::path::PathBuf;

use antlerinator_common::config::Config;
use antlerinator_common::error::{AntlrError, Result};

pub const DOWNLOAD_BASE_URL: &str = "https://www.antlr.org/download";

/// Picks the requested version, falling back to the companion runtime's.
///
/// An empty string counts as "not given".
pub fn resolve_version<'a>(config: &'a Config, version: Option<&'a str>) -> Result<&'a str> {
    version
        .filter(|v| !v.is_empty())
        .or_else(|| config.runtime_version())
        .ok_or_else(|| {
            AntlrError::Config(
                "version must be specified if antlr4 runtime is not installed".to_string(),
            )
        })
}

pub fn jar_file_name(version: &str) -> String {
    format!("antlr-{version}-complete.jar")
}

/// Default path to download the tool jar of `version` to.
pub fn resolve_path(config: &Config, version: Option<&str>) -> Result<PathBuf> {
    let version = resolve_version(config, version)?;
    Ok(config.cache_dir().join(jar_file_name(version)))
}

pub fn download_url(file_name: &str) -> String {
    format!("{DOWNLOAD_BASE_URL}/{file_name}")
}
