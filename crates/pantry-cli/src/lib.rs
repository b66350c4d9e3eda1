pub mod cli;
pub mod commands;
pub mod logging;
pub mod server;

#[cfg(test)]
pub mod test_util;

use std::io::{Read, Write};

use clap::Parser;

use pantry_lib::context::PantryContext;
use pantry_lib::output::ConsoleIO;
use pantry_lib::runtime::Runtime;

use cli::{Cli, Command};

/// Parse `args` and run the selected command against `context`.
pub fn try_run<IN, OUT, ERR>(
    args: &[&str],
    context: &PantryContext,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    IN: Read,
    OUT: Write,
    ERR: Write,
{
    let cli = Cli::try_parse_from(args)?;
    execute(cli, context, io)
}

/// Run an already-parsed command line.
///
/// Global `--dataset`/`--index` flags are layered over `context`, then the
/// runtime is loaded once before dispatching.
pub fn execute<IN, OUT, ERR>(
    cli: Cli,
    context: &PantryContext,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    IN: Read,
    OUT: Write,
    ERR: Write,
{
    let context = cli.apply_overrides(context.clone());
    let runtime = Runtime::load(context)?;

    match cli.command {
        Command::Recommend { file, top_k } => {
            commands::recommend::run_recommend(file.as_deref(), top_k, &runtime, io)
        }
        Command::Serve { bind, top_k } => commands::serve::run_serve(&bind, top_k, &runtime, io),
        Command::Categories => commands::categories::run_categories(&runtime, io),
        Command::Info => commands::info::run_info(&runtime, io),
    }
}
