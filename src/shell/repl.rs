//! Interactive read-eval-print loop.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use super::dispatcher::Dispatch;
use super::Shell;
use crate::error::{ShellError, EXIT_OK};

impl Shell {
    /// Prompt, read a line, run it, repeat until `exit` or end of input.
    ///
    /// Command failures are reported on `err` and never end the loop. A line
    /// that is not valid UTF-8 is reported the same way. On end of input a
    /// newline is written so the terminal is left on a fresh line.
    pub async fn run_repl<R, W, E>(&mut self, mut input: R, out: &mut W, err: &mut E) -> std::io::Result<i32>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
        E: Write,
    {
        let mut buf = Vec::new();
        loop {
            write!(out, "{}", self.session.prompt())?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf).await? == 0 {
                writeln!(out)?;
                out.flush()?;
                debug!("end of input");
                return Ok(EXIT_OK);
            }

            let result = match std::str::from_utf8(&buf) {
                Ok(line) => self.exec(line.trim_end_matches(&['\n', '\r'][..])).await,
                Err(_) => Err(ShellError::Parse { message: "input is not valid UTF-8".into() }),
            };
            match result {
                Ok(Dispatch::Output(text)) => out.write_all(text.as_bytes())?,
                Ok(Dispatch::Skipped) => {}
                Ok(Dispatch::Exit) => {
                    out.flush()?;
                    return Ok(EXIT_OK);
                }
                Err(e) => {
                    writeln!(err, "{}", e)?;
                    err.flush()?;
                }
            }
        }
    }
}
