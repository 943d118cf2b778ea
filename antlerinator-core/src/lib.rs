// antlerinator-core/src/lib.rs

// Declare the top-level modules within the library crate
pub mod arg;
pub mod build;
pub mod download;
pub mod lifecycle;
pub mod locate;
pub mod process;

// Re-export key types for easier use by the CLI crate
pub use arg::AntlrJarArg;
pub use build::{build_antlr, clean_antlr, BuildContext, BuildSettings};
pub use download::{download, DownloadMode};
pub use lifecycle::{Lifecycle, Phase};
pub use locate::{resolve_path, resolve_version};
pub use process::{run_command, spawn};
