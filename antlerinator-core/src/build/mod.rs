// antlerinator-core/src/build/mod.rs
// Generating parsers/lexers from grammar files with the ANTLR tool jar.

use std::ffi::OsStr;
use std::path::Path;

use antlerinator_common::config::Config;
use antlerinator_common::error::Result;
use antlerinator_net::Transport;
use tracing::debug;

pub mod clean;
pub mod command;
pub mod settings;

pub use clean::clean_antlr;
pub use command::{AntlrCommand, Provider};
pub use settings::{BuildSettings, DEFAULT_JAVA, DEFAULT_SETTINGS_FILE};

use crate::process;

/// Everything a build or clean step needs.
#[derive(Clone, Copy)]
pub struct BuildContext<'a> {
    pub settings: &'a BuildSettings,
    pub config: &'a Config,
    pub transport: &'a dyn Transport,
    /// Working directory of the spawned tool; the current one if `None`.
    pub cwd: Option<&'a Path>,
}

/// Runs every configured ANTLR command in order, stopping at the first
/// failure.
pub fn build_antlr(ctx: &BuildContext<'_>) -> Result<()> {
    for command in &ctx.settings.commands {
        let jar = command.resolve_jar(ctx.config, ctx.transport)?;
        debug!(
            "Running {} with {} ({})",
            ctx.settings.java,
            jar.display(),
            command.provider
        );

        let mut args = vec![OsStr::new("-jar"), jar.as_os_str()];
        args.extend(command.antlr_args.iter().map(OsStr::new));
        process::spawn(&ctx.settings.java, &args, ctx.cwd)?;
    }
    Ok(())
}
