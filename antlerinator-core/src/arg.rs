// antlerinator-core/src/arg.rs
//! A reusable `--antlr FILE` argument for tools that run the ANTLR jar.
use std::path::PathBuf;

use antlerinator_common::config::Config;
use antlerinator_common::error::Result;
use antlerinator_net::Transport;
use clap::Args;

use crate::download::{download, DownloadMode};

/// Flatten into a clap parser with `#[command(flatten)]`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct AntlrJarArg {
    /// Path of the ANTLR v4 tool jar file (default: ~/.antlerinator/antlr-VERSION-complete.jar)
    #[arg(long = "antlr", value_name = "FILE")]
    pub antlr: Option<PathBuf>,
}

impl AntlrJarArg {
    /// The given path, or the runtime version's default jar, downloaded
    /// first if it is not there yet.
    pub fn resolve(&self, config: &Config, transport: &dyn Transport) -> Result<PathBuf> {
        match &self.antlr {
            Some(path) => Ok(path.clone()),
            None => download(config, transport, None, None, DownloadMode::Lazy),
        }
    }
}
