// antlerinator-core/src/build/settings.rs
//! The `[build_antlr]` table of the project's build file.
use std::fs;
use std::path::Path;

use antlerinator_common::error::{AntlrError, Result};
use serde::Deserialize;
use tracing::debug;

use super::command::{AntlrCommand, Provider};

pub const DEFAULT_SETTINGS_FILE: &str = "antlerinator.toml";
pub const DEFAULT_JAVA: &str = "java";

/// Validated settings of the build and clean steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    pub commands: Vec<AntlrCommand>,
    /// File names or glob patterns produced by `commands`.
    pub output: Vec<String>,
    pub java: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            output: Vec::new(),
            java: DEFAULT_JAVA.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    build_antlr: RawSettings,
}

#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    commands: Option<RawCommands>,
    output: Option<StringList>,
    java: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCommands {
    Text(String),
    List(Vec<RawCommand>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCommand {
    Text(String),
    Triple(String, String, Vec<String>),
    Table {
        provider: String,
        #[serde(default)]
        arg: String,
        #[serde(default)]
        args: Vec<String>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringList {
    Text(String),
    List(Vec<String>),
}

impl BuildSettings {
    /// Reads settings from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No build settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        debug!("Loading build settings from {}", path.display());
        let text = fs::read_to_string(path).map_err(|e| {
            AntlrError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let file: SettingsFile = toml::from_str(text)?;
        let raw = file.build_antlr;

        let commands: Vec<AntlrCommand> = match raw.commands {
            None => Vec::new(),
            Some(RawCommands::Text(text)) => split_command_text(&text)
                .map(AntlrCommand::parse)
                .collect::<Result<_>>()?,
            Some(RawCommands::List(list)) => list
                .into_iter()
                .filter_map(|cmd| match cmd {
                    RawCommand::Text(text) => {
                        let text = text.trim().to_string();
                        (!text.is_empty()).then(|| AntlrCommand::parse(&text))
                    }
                    RawCommand::Triple(provider, arg, args)
                    | RawCommand::Table {
                        provider,
                        arg,
                        args,
                    } => Some(
                        provider
                            .parse::<Provider>()
                            .map(|provider| AntlrCommand::new(provider, arg, args)),
                    ),
                })
                .collect::<Result<_>>()?,
        };

        let output: Vec<String> = match raw.output {
            None => Vec::new(),
            Some(StringList::Text(text)) => text
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            Some(StringList::List(list)) => list,
        };

        let java = raw
            .java
            .filter(|j| !j.is_empty())
            .unwrap_or_else(|| DEFAULT_JAVA.to_string());

        Ok(Self {
            commands,
            output,
            java,
        })
    }
}

/// Multi-line text holds one command per line, otherwise commands are
/// comma separated.
fn split_command_text(text: &str) -> impl Iterator<Item = &str> {
    let parts: Vec<&str> = if text.contains('\n') {
        text.lines().collect()
    } else {
        text.split(',').collect()
    };
    parts.into_iter().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = BuildSettings::from_toml("").unwrap();
        assert_eq!(settings, BuildSettings::default());
        assert_eq!(settings.java, "java");
    }

    #[test]
    fn multiline_commands() {
        let settings = BuildSettings::from_toml(
            r#"
[build_antlr]
commands = """
    antlerinator:4.13.2 Hello.g4 -Dlanguage=Python3 -o gen
    file:/opt/antlr.jar Bello.g4 -o gen
"""
output = "gen/*Lexer.py, gen/*Parser.py"
java = "/usr/lib/jvm/bin/java"
"#,
        )
        .unwrap();

        assert_eq!(settings.commands.len(), 2);
        assert_eq!(settings.commands[0].provider, Provider::Antlerinator);
        assert_eq!(settings.commands[1].provider, Provider::File);
        assert_eq!(settings.commands[1].provider_arg, "/opt/antlr.jar");
        assert_eq!(settings.output, ["gen/*Lexer.py", "gen/*Parser.py"]);
        assert_eq!(settings.java, "/usr/lib/jvm/bin/java");
    }

    #[test]
    fn comma_separated_commands() {
        let settings = BuildSettings::from_toml(
            r#"
[build_antlr]
commands = "file:a.jar A.g4, file:b.jar B.g4"
"#,
        )
        .unwrap();
        assert_eq!(settings.commands.len(), 2);
        assert_eq!(settings.commands[1].antlr_args, ["B.g4"]);
    }

    #[test]
    fn list_of_mixed_commands() {
        let settings = BuildSettings::from_toml(
            r#"
[build_antlr]
commands = [
    "antlerinator: Hello.g4",
    ["file", "antlr.jar", ["Bello.g4", "-o", "out dir"]],
    { provider = "antlerinator", arg = "4.9.2", args = ["Cello.g4"] },
]
output = ["HelloLexer.py", "*Parser.py"]
"#,
        )
        .unwrap();

        assert_eq!(
            settings.commands,
            [
                AntlrCommand::new(Provider::Antlerinator, "", vec!["Hello.g4".to_string()]),
                AntlrCommand::new(
                    Provider::File,
                    "antlr.jar",
                    vec!["Bello.g4".to_string(), "-o".to_string(), "out dir".to_string()]
                ),
                AntlrCommand::new(Provider::Antlerinator, "4.9.2", vec!["Cello.g4".to_string()]),
            ]
        );
        assert_eq!(settings.output, ["HelloLexer.py", "*Parser.py"]);
    }

    #[test]
    fn unknown_provider_in_table_is_rejected() {
        let err = BuildSettings::from_toml(
            r#"
[build_antlr]
commands = [{ provider = "maven", arg = "4.13.2" }]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, AntlrError::BuildConfig(_)));
    }

    #[test]
    fn malformed_toml_is_reported() {
        let err = BuildSettings::from_toml("[build_antlr\n").unwrap_err();
        assert!(matches!(err, AntlrError::Toml(_)));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = BuildSettings::load(&dir.path().join(DEFAULT_SETTINGS_FILE)).unwrap();
        assert!(settings.commands.is_empty());
    }
}
