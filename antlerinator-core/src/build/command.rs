// antlerinator-core/src/build/command.rs
//! One ANTLR tool invocation of the `build_antlr` step.
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;

use antlerinator_common::config::Config;
use antlerinator_common::error::{AntlrError, Result};
use antlerinator_net::Transport;
use regex::Regex;
use tracing::debug;

use crate::download::{download, DownloadMode};

/// Where the tool jar of a command comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// The provider argument is the path of the jar.
    File,
    /// The provider argument is a version; the jar is downloaded lazily.
    Antlerinator,
}

impl Provider {
    pub const NAMES: [&'static str; 2] = ["file", "antlerinator"];

    pub fn name(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Antlerinator => "antlerinator",
        }
    }
}

impl FromStr for Provider {
    type Err = AntlrError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "file" => Ok(Self::File),
            "antlerinator" => Ok(Self::Antlerinator),
            _ => Err(AntlrError::BuildConfig(format!(
                "unknown provider in 'commands' (options: {}; got: {})",
                Self::NAMES.join(", "),
                s
            ))),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AntlrCommand {
    pub provider: Provider,
    pub provider_arg: String,
    pub antlr_args: Vec<String>,
}

impl AntlrCommand {
    pub fn new(provider: Provider, provider_arg: impl Into<String>, antlr_args: Vec<String>) -> Self {
        Self {
            provider,
            provider_arg: provider_arg.into(),
            antlr_args,
        }
    }

    /// Parses `provider:arg <antlr args...>`.
    pub fn parse(line: &str) -> Result<Self> {
        let caps = command_regex().captures(line).ok_or_else(|| {
            AntlrError::BuildConfig(format!(
                "strings in 'commands' must start with a 'provider:arg' pattern (got {line:?})"
            ))
        })?;
        let provider = caps["provider"].parse()?;
        let antlr_args = split_args(&caps["antlr_args"], cfg!(not(windows)))?;
        Ok(Self::new(provider, &caps["provider_arg"], antlr_args))
    }

    /// Returns the jar this command runs, downloading it if the provider
    /// says so.
    pub fn resolve_jar(&self, config: &Config, transport: &dyn Transport) -> Result<PathBuf> {
        match self.provider {
            Provider::File => Ok(PathBuf::from(&self.provider_arg)),
            Provider::Antlerinator => {
                debug!("Providing ANTLR jar for version {:?}", self.provider_arg);
                download(
                    config,
                    transport,
                    Some(self.provider_arg.as_str()),
                    None,
                    DownloadMode::Lazy,
                )
            }
        }
    }
}

fn command_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<provider>[^\d\W]\w*):(?P<provider_arg>\S*)\s+(?P<antlr_args>.*)$")
            .expect("command pattern is valid")
    })
}

/// Splits a command line into words with Python `shlex.split` rules.
///
/// POSIX mode: quotes are removed and adjacent quoted parts join one word.
/// Outside quotes a backslash escapes any character; inside double quotes
/// it only escapes `"` and `\`. Otherwise quotes are kept, there are no
/// escapes, and a closing quote ends the word.
pub fn split_args(input: &str, posix: bool) -> Result<Vec<String>> {
    if posix {
        split_posix(input)
    } else {
        split_non_posix(input)
    }
}

fn split_posix(input: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            '\\' => {
                in_word = true;
                word.push(chars.next().ok_or_else(|| no_escaped_character(input))?);
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(q) => word.push(q),
                        None => return Err(no_closing_quotation(input)),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(e @ ('"' | '\\')) => word.push(e),
                            Some(e) => {
                                word.push('\\');
                                word.push(e);
                            }
                            None => return Err(no_escaped_character(input)),
                        },
                        Some(q) => word.push(q),
                        None => return Err(no_closing_quotation(input)),
                    }
                }
            }
            _ => {
                in_word = true;
                word.push(c);
            }
        }
    }

    if in_word {
        words.push(word);
    }
    Ok(words)
}

fn split_non_posix(input: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            if !word.is_empty() {
                words.push(std::mem::take(&mut word));
            }
        } else if word.is_empty() && (c == '\'' || c == '"') {
            // A word opened by a quote ends at the matching quote.
            word.push(c);
            loop {
                match chars.next() {
                    Some(q) if q == c => {
                        word.push(q);
                        break;
                    }
                    Some(q) => word.push(q),
                    None => return Err(no_closing_quotation(input)),
                }
            }
            words.push(std::mem::take(&mut word));
        } else {
            word.push(c);
        }
    }

    if !word.is_empty() {
        words.push(word);
    }
    Ok(words)
}

fn no_closing_quotation(input: &str) -> AntlrError {
    AntlrError::ParseError("commands", format!("no closing quotation in {input:?}"))
}

fn no_escaped_character(input: &str) -> AntlrError {
    AntlrError::ParseError("commands", format!("no escaped character in {input:?}"))
}
