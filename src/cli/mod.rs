//! Command-line interface for GastroLog.
//!
//! - [`args`] - command-line flags
//! - [`commands`] - the line-oriented command language
//! - [`render`] - plain-text rendering of the active view
//! - [`driver`] - the read-dispatch-settle-render loop
//!
//! # Usage
//!
//! ```ignore
//! use gastrolog::cli::{parse_args, run_cli_command, CliCommand};
//!
//! let command = parse_args(std::env::args());
//! if let Some(text) = run_cli_command(&command) {
//!     println!("{}", text);
//!     return Ok(());
//! }
//! // No informational command; start the interactive client
//! ```

pub mod args;
pub mod commands;
pub mod driver;
pub mod render;
pub mod version;

pub use args::{parse_args, CliCommand};
pub use driver::run;
pub use version::VERSION;

/// Text for the informational commands.
///
/// Returns `None` for [`CliCommand::Run`], which needs the interactive client.
pub fn run_cli_command(command: &CliCommand) -> Option<String> {
    match command {
        CliCommand::Version => Some(version::version_line()),
        CliCommand::Help => Some(version::usage()),
        CliCommand::Run { .. } => None,
    }
}
