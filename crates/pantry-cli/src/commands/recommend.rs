use std::io::{Read, Write};
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use pantry_lib::output::{ConsoleIO, write_json};
use pantry_lib::runtime::Runtime;

/// Run the `pantry recommend` command.
///
/// The response JSON is always printed; validation and internal failures
/// additionally return an error so the process exits non-zero.
pub fn run_recommend<IN, OUT, ERR>(
    file: Option<&Path>,
    top_k: usize,
    runtime: &Runtime,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    IN: Read,
    OUT: Write,
    ERR: Write,
{
    let body = match file {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("Failed to read request file {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            io.stdin()
                .read_to_end(&mut buf)
                .context("Failed to read request from stdin")?;
            buf
        }
    };
    debug!(body_len = body.len(), top_k, "Recommend request received");

    let recommender = runtime.recommender().with_top_k(top_k.max(1));
    let outcome = recommender.recommend_json(&body);
    let status = outcome.status_code();
    let success = outcome.is_success();

    write_json(io.stdout(), &outcome.into_response())?;

    if !success {
        anyhow::bail!("Recommendation request failed with status {status}");
    }
    Ok(())
}
