use std::io::{Cursor, Read, Stderr, Stdin, Stdout, Write};

use anyhow::Context;
use serde::Serialize;

/// Console streams, injected so commands can be driven from tests.
pub trait ConsoleIO<IN: Read, OUT: Write, ERR: Write> {
    fn stdin(&mut self) -> &mut IN;
    fn stdout(&mut self) -> &mut OUT;
    fn stderr(&mut self) -> &mut ERR;
}

/// Process stdin/stdout/stderr.
pub struct StdIO {
    stdin: Stdin,
    stdout: Stdout,
    stderr: Stderr,
}

impl StdIO {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stdin: std::io::stdin(),
            stdout: std::io::stdout(),
            stderr: std::io::stderr(),
        }
    }
}

impl Default for StdIO {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleIO<Stdin, Stdout, Stderr> for StdIO {
    fn stdin(&mut self) -> &mut Stdin {
        &mut self.stdin
    }

    fn stdout(&mut self) -> &mut Stdout {
        &mut self.stdout
    }

    fn stderr(&mut self) -> &mut Stderr {
        &mut self.stderr
    }
}

/// In-memory streams: canned stdin, captured stdout/stderr.
#[derive(Default)]
pub struct BufferedIO {
    stdin: Cursor<Vec<u8>>,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl BufferedIO {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Streams whose stdin yields `data`.
    #[must_use]
    pub fn with_stdin(data: &[u8]) -> Self {
        Self {
            stdin: Cursor::new(data.to_vec()),
            ..Self::default()
        }
    }

    pub fn stdout_to_string(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_to_string(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

impl ConsoleIO<Cursor<Vec<u8>>, Vec<u8>, Vec<u8>> for BufferedIO {
    fn stdin(&mut self) -> &mut Cursor<Vec<u8>> {
        &mut self.stdin
    }

    fn stdout(&mut self) -> &mut Vec<u8> {
        &mut self.stdout
    }

    fn stderr(&mut self) -> &mut Vec<u8> {
        &mut self.stderr
    }
}

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<W, T>(out: &mut W, value: &T) -> anyhow::Result<()>
where
    W: Write + ?Sized,
    T: Serialize + ?Sized,
{
    serde_json::to_writer_pretty(&mut *out, value).context("Failed to serialize JSON output")?;
    writeln!(out)?;
    Ok(())
}
