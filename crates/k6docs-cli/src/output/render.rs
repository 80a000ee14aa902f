//! Stdout sink with optional external renderer.
//!
//! When a renderer is configured and stdout is a terminal, output is buffered
//! and piped through the renderer once the command finishes. If the renderer
//! cannot be started or exits unsuccessfully, the raw markdown is written to
//! stdout instead.

use std::io::{self, Write};
use std::process::{Command, ExitStatus, Stdio};

use is_terminal::IsTerminal;
use tracing::{debug, warn};

/// Destination for documentation output.
pub enum OutputSink {
    /// Write straight to stdout.
    Direct(io::Stdout),
    /// Collect output for an external renderer.
    Rendered {
        command: Vec<String>,
        buffer: Vec<u8>,
    },
}

impl OutputSink {
    /// Pick a sink for the configured `renderer` command.
    ///
    /// Rendering only happens when stdout is a terminal; pipes and files
    /// always receive raw markdown.
    pub fn new(renderer: Option<Vec<&str>>) -> Self {
        let is_tty = io::stdout().is_terminal();
        if is_tty {
            debug!("interactive mode (stdout is a TTY)");
        } else {
            debug!("agent mode (stdout is not a TTY)");
        }
        Self::select(renderer, is_tty)
    }

    fn select(renderer: Option<Vec<&str>>, is_tty: bool) -> Self {
        match renderer {
            Some(command) if is_tty => Self::Rendered {
                command: command.into_iter().map(str::to_string).collect(),
                buffer: Vec::new(),
            },
            _ => Self::Direct(io::stdout()),
        }
    }

    /// Flush buffered output, piping it through the renderer when one is set.
    pub fn finish(self) -> io::Result<()> {
        match self {
            Self::Direct(mut stdout) => stdout.flush(),
            Self::Rendered { command, buffer } => {
                if buffer.is_empty() {
                    return Ok(());
                }
                match run_renderer(&command, &buffer, Stdio::inherit()) {
                    Ok(status) if status.success() => Ok(()),
                    Ok(status) => {
                        warn!("renderer `{}` exited with {status}, printing raw output", command.join(" "));
                        write_raw(&buffer)
                    },
                    Err(e) => {
                        warn!("renderer `{}` failed to run: {e}, printing raw output", command.join(" "));
                        write_raw(&buffer)
                    },
                }
            },
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Direct(stdout) => stdout.write(buf),
            Self::Rendered { buffer, .. } => buffer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Direct(stdout) => stdout.flush(),
            Self::Rendered { .. } => Ok(()),
        }
    }
}

/// Run `command` with `input` on stdin.
///
/// # Errors
///
/// Fails when the command is empty or cannot be spawned.
pub fn run_renderer(command: &[String], input: &[u8], stdout: Stdio) -> io::Result<ExitStatus> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty renderer command"))?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(stdout)
        .stderr(Stdio::inherit())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        // A renderer may exit before reading everything; its status decides.
        if let Err(e) = stdin.write_all(input) {
            debug!("renderer stdin closed early: {e}");
        }
    }
    child.wait()
}

fn write_raw(buffer: &[u8]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(buffer)?;
    stdout.flush()
}
