use std::io::{Read, Write};

use anyhow::Context;

use pantry_lib::output::ConsoleIO;
use pantry_lib::runtime::Runtime;

use crate::server::{self, AppState};

/// Run the `pantry serve` command. Blocks until the server shuts down.
pub fn run_serve<IN, OUT, ERR>(
    bind: &str,
    top_k: usize,
    runtime: &Runtime,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    IN: Read,
    OUT: Write,
    ERR: Write,
{
    let state = AppState::from_runtime(runtime, top_k);
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    rt.block_on(async {
        let listener = server::bind(bind).await?;
        let addr = listener.local_addr().context("Listener has no local address")?;
        writeln!(io.stdout(), "pantry listening on http://{addr}")?;
        io.stdout().flush()?;
        server::serve(listener, state).await
    })
}

#[cfg(test)]
mod tests {
    use pantry_lib::output::BufferedIO;

    use crate::test_util::sample_context;

    #[test]
    fn try_run_serve_reports_bind_failure() {
        let (_tmp, ctx) = sample_context();
        let mut io = BufferedIO::new();

        let result = crate::try_run(
            &["pantry", "serve", "--bind", "not-an-address"],
            &ctx,
            &mut io,
        );

        assert_eq!(
            result.unwrap_err().to_string(),
            "Failed to bind not-an-address"
        );
        assert_eq!(io.stdout_to_string(), "");
    }
}
