// antlerinator-core/src/build/clean.rs
use std::fs;
use std::path::PathBuf;

use antlerinator_common::error::{AntlrError, Result};
use tracing::debug;

use super::settings::BuildSettings;

/// Deletes every file matching the `output` patterns and returns what was
/// removed.
pub fn clean_antlr(settings: &BuildSettings) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for pattern in &settings.output {
        let entries = glob::glob(pattern).map_err(|e| {
            AntlrError::BuildConfig(format!("invalid output pattern '{pattern}': {e}"))
        })?;
        for entry in entries {
            let path = entry.map_err(|e| AntlrError::from(e.into_error()))?;
            if !path.is_file() {
                continue;
            }
            debug!("Removing generated file: {}", path.display());
            fs::remove_file(&path)?;
            removed.push(path);
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_for(dir: &std::path::Path, patterns: &[&str]) -> BuildSettings {
        BuildSettings {
            output: patterns
                .iter()
                .map(|p| dir.join(p).to_string_lossy().into_owned())
                .collect(),
            ..BuildSettings::default()
        }
    }

    #[test]
    fn removes_matching_files_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["HelloLexer.py", "HelloParser.py", "Hello.g4"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }

        let removed =
            clean_antlr(&settings_for(dir.path(), &["*Lexer.py", "HelloParser.py"])).unwrap();

        assert_eq!(removed.len(), 2);
        assert!(!dir.path().join("HelloLexer.py").exists());
        assert!(!dir.path().join("HelloParser.py").exists());
        assert!(dir.path().join("Hello.g4").exists());
    }

    #[test]
    fn nothing_to_clean_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let removed = clean_antlr(&settings_for(dir.path(), &["*.py"])).unwrap();
        assert!(removed.is_empty());
    }

    #[test]
    fn directories_are_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("gen")).unwrap();
        let removed = clean_antlr(&settings_for(dir.path(), &["gen"])).unwrap();
        assert!(removed.is_empty());
        assert!(dir.path().join("gen").is_dir());
    }

    #[test]
    fn bad_pattern_is_a_config_error() {
        let settings = BuildSettings {
            output: vec!["gen/[".to_string()],
            ..BuildSettings::default()
        };
        let err = clean_antlr(&settings).unwrap_err();
        assert!(matches!(err, AntlrError::BuildConfig(_)));
    }
}
