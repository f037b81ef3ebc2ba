#[cfg(feature = "cli")]
pub mod commands;
pub mod output;

#[cfg(feature = "cli")]
pub use commands::{CommandOutcome, CommandRunner};
pub use output::OutputFormat;
