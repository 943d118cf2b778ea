//! Contains the logic for the `download` command.
use std::path::PathBuf;

use antlerinator_common::config::Config;
use antlerinator_common::error::Result;
use antlerinator_core::{download, DownloadMode};
use antlerinator_net::Transport;
use clap::Args;
use tracing::instrument;

#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// Version of ANTLR v4 tool jar to download (default: version of the installed antlr4 runtime)
    #[arg(long, value_name = "VERSION")]
    pub antlr_version: Option<String>,

    /// Path to save the downloaded jar to (default: ~/.antlerinator/antlr-VERSION-complete.jar)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Force download even if jar already exists at the output path
    #[arg(long, conflicts_with = "lazy")]
    pub force: bool,

    /// Don't report an error if jar already exists at the output path and don't try to download it either
    #[arg(long, conflicts_with = "force")]
    pub lazy: bool,
}

impl DownloadArgs {
    #[instrument(skip(self, config, transport), fields(version = ?self.antlr_version))]
    pub fn run(&self, config: &Config, transport: &dyn Transport) -> Result<()> {
        let mode = DownloadMode::from_flags(self.force, self.lazy)?;
        let path = download(
            config,
            transport,
            self.antlr_version.as_deref(),
            self.output.as_deref(),
            mode,
        )?;
        tracing::info!("ANTLR tool jar available at {}", path.display());
        Ok(())
    }
}
