//! Keypad calculator CLI library
//!
//! Argument parsing, configuration resolution and the command runners behind
//! the `calc` binary.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod logging;
pub mod runner;

pub use commands::{Cli, ColorArg, Commands, LogFormatArg, PressArgs, ReplArgs};
pub use config::{CliConfig, ColorChoice, LogFormat, Verbosity};
pub use error::{CliError, CliResult};
