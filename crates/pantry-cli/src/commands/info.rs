use std::io::{Read, Write};

use pantry_lib::output::ConsoleIO;
use pantry_lib::runtime::Runtime;

/// Run the `pantry info` command.
pub fn run_info<IN, OUT, ERR>(
    runtime: &Runtime,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    IN: Read,
    OUT: Write,
    ERR: Write,
{
    let out = io.stdout();
    writeln!(out, "dataset: {}", runtime.context.dataset_path().display())?;
    writeln!(out, "  recipes: {}", runtime.recipes.len())?;
    writeln!(out, "  categories: {}", runtime.categories.len())?;
    writeln!(out, "  sha256: {}", runtime.dataset_sha256)?;
    writeln!(out, "index: {}", runtime.context.index_path().display())?;
    writeln!(out, "  metric: {}", runtime.index.metric().name())?;
    writeln!(out, "  dimension: {}", runtime.index.dimension())?;
    writeln!(out, "  rows: {}", runtime.index.len())?;
    writeln!(out, "  sha256: {}", runtime.index_sha256)?;
    Ok(())
}
