//! Command-line argument parsing for GastroLog.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the interactive client (default)
    Run {
        /// Link the client was opened from, e.g. a password-reset e-mail link
        startup_url: Option<String>,
    },
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Examples
///
/// ```
/// use gastrolog::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["gastrolog".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut startup_url = None;
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--open" => startup_url = args.next(),
            other => {
                if let Some(url) = other.strip_prefix("--open=") {
                    startup_url = Some(url.to_string());
                }
            }
        }
    }
    CliCommand::Run { startup_url }
}
