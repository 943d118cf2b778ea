//! Contains the logic for the `hook` command.
use antlerinator_common::config::Config;
use antlerinator_common::error::Result;
use antlerinator_core::{BuildContext, Lifecycle, Phase};
use antlerinator_net::Transport;
use clap::Args;
use tracing::instrument;

use super::build::SettingsArg;

/// Meant to be called by a build orchestrator right before it runs its own
/// phase of the same name.
#[derive(Debug, Args)]
pub struct HookArgs {
    #[arg(value_enum)]
    pub phase: Phase,

    #[command(flatten)]
    pub settings: SettingsArg,
}

impl HookArgs {
    #[instrument(skip(self, config, transport), fields(phase = %self.phase))]
    pub fn run(&self, config: &Config, transport: &dyn Transport) -> Result<()> {
        let settings = self.settings.load()?;
        let ctx = BuildContext {
            settings: &settings,
            config,
            transport,
            cwd: None,
        };
        Lifecycle::with_antlr_steps().run(self.phase, &ctx)
    }
}
