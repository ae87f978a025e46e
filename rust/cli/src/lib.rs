//! # fourline CLI Library
//!
//! Command-line front end for the fourline engine and arena.
//!
//! The entry point is [`run`], which parses arguments and dispatches to a
//! subcommand handler. Output streams are injected so tests can capture them.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["fourline", "eval", "--tier-a", "hard", "--tier-b", "random"];
//! let code = fourline_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `eval`: Compare two adversary tiers over many games
//! - `cfg`: Display the resolved arena configuration

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
mod error;
pub mod exit_code;
pub mod ui;

use cli::{Commands, FourlineCli, COMMANDS};
use commands::{handle_cfg_command, handle_eval_command};

pub use error::CliError;

/// Parse `args` and run the selected command.
///
/// Returns the process exit code: [`exit_code::SUCCESS`] or
/// [`exit_code::ERROR`]. `--help` and `--version` print to `out` and
/// succeed; any other parse failure prints usage to `err`.
///
/// ```
/// use std::io;
/// let args = vec!["fourline", "eval", "--tier-a", "medium", "--tier-b", "random",
///                 "--games", "2", "--seed", "7", "--rows", "6", "--cols", "7"];
/// let code = fourline_cli::run(args, &mut io::sink(), &mut io::sink());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match FourlineCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(&e, out, err),
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Eval {
            tier_a,
            tier_b,
            games,
            seed,
            rows,
            cols,
        } => handle_eval_command(tier_a, tier_b, games, seed, rows, cols, out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn report_parse_error(e: &clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version go to stdout and count as success.
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let _ = write_usage(e, err);
    exit_code::ERROR
}

fn write_usage(e: &clap::Error, err: &mut dyn Write) -> std::io::Result<()> {
    writeln!(err, "{}", e)?;
    writeln!(err)?;
    writeln!(err, "fourline connect-four CLI")?;
    writeln!(err, "Usage: fourline <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in COMMANDS {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: fourline --help")
}
