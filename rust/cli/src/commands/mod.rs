//! One module per subcommand. Handlers take their output streams as
//! `&mut dyn Write` and report failures through [`CliError`](crate::CliError).

mod cfg;
mod eval;

pub use cfg::handle_cfg_command;
pub use eval::handle_eval_command;
