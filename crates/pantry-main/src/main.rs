use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

use pantry_cli::cli::Cli;
use pantry_lib::context::PantryContext;
use pantry_lib::output::StdIO;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(std::io::stderr(), "pantry: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    pantry_cli::logging::init(cli.log_format)?;
    let context = PantryContext::from_env()?;
    let mut io = StdIO::new();
    pantry_cli::execute(cli, &context, &mut io)
}
