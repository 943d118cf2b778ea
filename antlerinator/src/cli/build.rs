//! Contains the logic for the `build` and `clean` commands.
use std::path::PathBuf;

use antlerinator_common::config::Config;
use antlerinator_common::error::Result;
use antlerinator_core::build::DEFAULT_SETTINGS_FILE;
use antlerinator_core::{build_antlr, clean_antlr, BuildContext, BuildSettings};
use antlerinator_net::Transport;
use clap::Args;
use tracing::instrument;

#[derive(Debug, Args)]
pub struct SettingsArg {
    /// Build settings file with a [build_antlr] table
    #[arg(long, value_name = "FILE", default_value = DEFAULT_SETTINGS_FILE)]
    pub config: PathBuf,
}

impl SettingsArg {
    pub fn load(&self) -> Result<BuildSettings> {
        BuildSettings::load(&self.config)
    }
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub settings: SettingsArg,

    /// Path to java (overrides the settings file)
    #[arg(long, value_name = "PATH")]
    pub java: Option<String>,
}

impl BuildArgs {
    #[instrument(skip(self, config, transport), fields(settings = %self.settings.config.display()))]
    pub fn run(&self, config: &Config, transport: &dyn Transport) -> Result<()> {
        let mut settings = self.settings.load()?;
        if let Some(java) = &self.java {
            settings.java = java.clone();
        }
        let ctx = BuildContext {
            settings: &settings,
            config,
            transport,
            cwd: None,
        };
        build_antlr(&ctx)?;
        tracing::info!("Ran {} ANTLR command(s)", settings.commands.len());
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct CleanArgs {
    #[command(flatten)]
    pub settings: SettingsArg,
}

impl CleanArgs {
    #[instrument(skip(self, _config, _transport), fields(settings = %self.settings.config.display()))]
    pub fn run(&self, _config: &Config, _transport: &dyn Transport) -> Result<()> {
        let settings = self.settings.load()?;
        let removed = clean_antlr(&settings)?;
        for path in &removed {
            tracing::info!("removed {}", path.display());
        }
        Ok(())
    }
}
