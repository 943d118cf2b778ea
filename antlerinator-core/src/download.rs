// antlerinator-core/src/download.rs
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use antlerinator_common::config::Config;
use antlerinator_common::error::{AntlrError, Result};
use antlerinator_net::Transport;
use tempfile::NamedTempFile;
use tracing::{debug, error};

use crate::locate::{download_url, jar_file_name, resolve_version};

/// What to do when the destination already holds a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadMode {
    /// Refuse with [`AntlrError::AlreadyExists`].
    #[default]
    Strict,
    /// Download again and replace the file.
    Force,
    /// Keep the file and skip the download.
    Lazy,
}

impl DownloadMode {
    /// Maps a pair of mutually exclusive `--force` / `--lazy` flags.
    pub fn from_flags(force: bool, lazy: bool) -> Result<Self> {
        match (force, lazy) {
            (false, false) => Ok(Self::Strict),
            (true, false) => Ok(Self::Force),
            (false, true) => Ok(Self::Lazy),
            (true, true) => Err(AntlrError::Config(
                "force and lazy cannot be used together".to_string(),
            )),
        }
    }
}

/// Downloads the ANTLR v4 tool jar.
///
/// `version` defaults to the companion runtime version and `path` to the
/// version's cache path. The remote file is always the versioned
/// `antlr-<version>-complete.jar`, whatever the destination is called.
/// The body is fully read before anything is written, so a transport
/// failure never leaves a file behind.
pub fn download(
    config: &Config,
    transport: &dyn Transport,
    version: Option<&str>,
    path: Option<&Path>,
    mode: DownloadMode,
) -> Result<PathBuf> {
    let version = resolve_version(config, version)?;
    let file_name = jar_file_name(version);
    let tool_path = match path {
        Some(p) => p.to_path_buf(),
        None => config.cache_dir().join(&file_name),
    };
    debug!(
        "Preparing ANTLR {} jar at {} ({:?})",
        version,
        tool_path.display(),
        mode
    );

    if tool_path.exists() {
        match mode {
            DownloadMode::Lazy => {
                debug!("Jar already present, skipping download: {}", tool_path.display());
                return Ok(tool_path);
            }
            DownloadMode::Strict => {
                return Err(AntlrError::AlreadyExists { path: tool_path });
            }
            DownloadMode::Force => {
                debug!("Jar already present, overwriting: {}", tool_path.display());
            }
        }
    }

    let url = download_url(&file_name);
    let content = transport.get(&url)?;
    write_atomically(&tool_path, &content)?;

    debug!("Saved {} bytes to {}", content.len(), tool_path.display());
    Ok(tool_path)
}

/// Writes `content` next to `path` and renames it into place.
fn write_atomically(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    // create_dir_all succeeds when a concurrent caller created the directory first.
    fs::create_dir_all(dir).map_err(|e| {
        error!("Failed to create directory {}: {}", dir.display(), e);
        AntlrError::from(e)
    })?;

    // A replaced jar keeps its mode; a fresh one gets the umask default of a plain create.
    let original_perms = fs::metadata(path).map(|m| m.permissions()).ok();

    let mut temp_file = new_temp_file(dir)?;
    if let Some(perms) = original_perms {
        temp_file.as_file().set_permissions(perms)?;
    }
    temp_file.write_all(content)?;
    temp_file.flush()?;
    temp_file.as_file().sync_all()?;

    temp_file.persist(path).map_err(|e| {
        error!(
            "Failed to move downloaded jar into place at {}: {}",
            path.display(),
            e.error
        );
        AntlrError::Io(Arc::new(e.error))
    })?;
    Ok(())
}

#[cfg(unix)]
fn new_temp_file(dir: &Path) -> Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    // The requested mode is filtered through the process umask on creation.
    Ok(tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)?)
}

#[cfg(not(unix))]
fn new_temp_file(dir: &Path) -> Result<NamedTempFile> {
    Ok(NamedTempFile::new_in(dir)?)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    struct RecordingTransport {
        body: Vec<u8>,
        requests: RefCell<Vec<String>>,
    }

    impl RecordingTransport {
        fn new(body: &[u8]) -> Self {
            Self {
                body: body.to_vec(),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for RecordingTransport {
        fn get(&self, url: &str) -> Result<Vec<u8>> {
            self.requests.borrow_mut().push(url.to_string());
            Ok(self.body.clone())
        }
    }

    struct FailingTransport;

    impl Transport for FailingTransport {
        fn get(&self, url: &str) -> Result<Vec<u8>> {
            Err(AntlrError::DownloadError(
                "antlr-4.13.2-complete.jar".to_string(),
                url.to_string(),
                "Resource not found (404)".to_string(),
            ))
        }
    }

    #[test]
    fn mode_from_flags() {
        assert_eq!(DownloadMode::from_flags(false, false).unwrap(), DownloadMode::Strict);
        assert_eq!(DownloadMode::from_flags(true, false).unwrap(), DownloadMode::Force);
        assert_eq!(DownloadMode::from_flags(false, true).unwrap(), DownloadMode::Lazy);
        assert!(DownloadMode::from_flags(true, true).is_err());
        assert_eq!(DownloadMode::default(), DownloadMode::Strict);
    }

    #[test]
    fn custom_path_still_requests_the_versioned_jar() {
        let home = tempfile::tempdir().unwrap();
        let config = Config::new(home.path(), None);
        let transport = RecordingTransport::new(b"jar");
        let out = home.path().join("tools").join("antlr4.jar");

        let path = download(
            &config,
            &transport,
            Some("4.9.2"),
            Some(out.as_path()),
            DownloadMode::Strict,
        )
        .unwrap();

        assert_eq!(path, out);
        assert_eq!(fs::read(&out).unwrap(), b"jar");
        assert_eq!(
            transport.requests.borrow().as_slice(),
            ["https://www.antlr.org/download/antlr-4.9.2-complete.jar"]
        );
    }

    #[test]
    fn missing_version_fails_before_any_request() {
        let home = tempfile::tempdir().unwrap();
        let config = Config::new(home.path(), None);
        let transport = RecordingTransport::new(b"jar");

        let err = download(&config, &transport, None, None, DownloadMode::Force).unwrap_err();

        assert!(matches!(err, AntlrError::Config(_)));
        assert!(transport.requests.borrow().is_empty());
        assert!(!config.cache_dir().exists());
    }

    #[test]
    fn transport_failure_leaves_no_file() {
        let home = tempfile::tempdir().unwrap();
        let config = Config::new(home.path(), None);

        let err = download(&config, &FailingTransport, Some("4.13.2"), None, DownloadMode::Strict)
            .unwrap_err();

        assert!(err.is_transport());
        assert!(!config.cache_dir().join("antlr-4.13.2-complete.jar").exists());
    }

    #[test]
    fn transport_failure_keeps_the_old_file_on_force() {
        let home = tempfile::tempdir().unwrap();
        let config = Config::new(home.path(), None);
        let target = config.cache_dir().join("antlr-4.13.2-complete.jar");
        fs::create_dir_all(config.cache_dir()).unwrap();
        fs::write(&target, b"old").unwrap();

        download(&config, &FailingTransport, Some("4.13.2"), None, DownloadMode::Force)
            .unwrap_err();

        assert_eq!(fs::read(&target).unwrap(), b"old");
    }

    #[test]
    fn write_failure_is_a_filesystem_error() {
        let home = tempfile::tempdir().unwrap();
        let config = Config::new(home.path(), None);
        // A regular file where the parent directory should be.
        let blocker = home.path().join("not-a-dir");
        fs::write(&blocker, b"").unwrap();
        let out = blocker.join("antlr.jar");

        let err = download(
            &config,
            &RecordingTransport::new(b"jar"),
            Some("4.13.2"),
            Some(out.as_path()),
            DownloadMode::Strict,
        )
        .unwrap_err();

        assert!(err.is_filesystem());
    }

    #[cfg(unix)]
    #[test]
    fn fresh_jar_gets_the_default_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let home = tempfile::tempdir().unwrap();
        let config = Config::new(home.path(), None);
        let reference = home.path().join("plain");
        fs::write(&reference, b"").unwrap();

        let path = download(
            &config,
            &RecordingTransport::new(b"jar"),
            Some("4.13.2"),
            None,
            DownloadMode::Strict,
        )
        .unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), mode(&reference));
    }

    #[cfg(unix)]
    #[test]
    fn force_keeps_the_mode_of_the_replaced_jar() {
        use std::os::unix::fs::PermissionsExt;

        let home = tempfile::tempdir().unwrap();
        let config = Config::new(home.path(), None);
        let target = config.cache_dir().join("antlr-4.13.2-complete.jar");
        fs::create_dir_all(config.cache_dir()).unwrap();
        fs::write(&target, b"old").unwrap();
        fs::set_permissions(&target, fs::Permissions::from_mode(0o644)).unwrap();

        download(
            &config,
            &RecordingTransport::new(b"new"),
            Some("4.13.2"),
            None,
            DownloadMode::Force,
        )
        .unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"new");
        let mode = fs::metadata(&target).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }
}
