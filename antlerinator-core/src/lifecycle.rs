// antlerinator-core/src/lifecycle.rs
//! Ordered callbacks that a build orchestrator runs before its own phases.
use std::fmt;

use antlerinator_common::error::Result;
use tracing::debug;

use crate::build::{build_antlr, clean_antlr, BuildContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Phase {
    /// Regular build.
    Build,
    /// Development-mode install.
    Develop,
    Clean,
    /// Source distribution packaging.
    Sdist,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Build => "build",
            Self::Develop => "develop",
            Self::Clean => "clean",
            Self::Sdist => "sdist",
        })
    }
}

type Callback = Box<dyn Fn(&BuildContext<'_>) -> Result<()>>;

struct Hook {
    phase: Phase,
    name: String,
    callback: Callback,
}

/// Registered hooks, run in registration order.
#[derive(Default)]
pub struct Lifecycle {
    hooks: Vec<Hook>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// `build_antlr` before build/develop, `clean_antlr` before clean/sdist.
    pub fn with_antlr_steps() -> Self {
        let mut lifecycle = Self::new();
        for phase in [Phase::Build, Phase::Develop] {
            lifecycle.register(phase, "build_antlr", build_antlr);
        }
        for phase in [Phase::Clean, Phase::Sdist] {
            lifecycle.register(phase, "clean_antlr", |ctx: &BuildContext<'_>| {
                clean_antlr(ctx.settings).map(|_| ())
            });
        }
        lifecycle
    }

    pub fn register<F>(&mut self, phase: Phase, name: impl Into<String>, callback: F)
    where
        F: Fn(&BuildContext<'_>) -> Result<()> + 'static,
    {
        self.hooks.push(Hook {
            phase,
            name: name.into(),
            callback: Box::new(callback),
        });
    }

    /// Names of the hooks of `phase`, in run order.
    pub fn steps(&self, phase: Phase) -> Vec<&str> {
        self.hooks
            .iter()
            .filter(|h| h.phase == phase)
            .map(|h| h.name.as_str())
            .collect()
    }

    pub fn run(&self, phase: Phase, ctx: &BuildContext<'_>) -> Result<()> {
        for hook in self.hooks.iter().filter(|h| h.phase == phase) {
            debug!("Running {} hook '{}'", phase, hook.name);
            (hook.callback)(ctx)?;
        }
        Ok(())
    }
}
