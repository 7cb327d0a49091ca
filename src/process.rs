//! Subprocess harness.
//!
//! Runs an executable with captured output, optional stdin content and a
//! timeout. Used to drive the `lockfmt` binary from integration tests.
//!
//! # Usage
//!
//! ```no_run
//! use std::time::Duration;
//! use lockfile_codec::process::ProcessRunner;
//!
//! let output = ProcessRunner::new("lockfmt")
//!     .arg("check")
//!     .arg("obj/project.assets.json")
//!     .timeout(Duration::from_secs(10))
//!     .run()?;
//! assert_eq!(output.exit_code, Some(0));
//! # Ok::<(), lockfile_codec::process::ProcessError>(())
//! ```

use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use thiserror::Error;

/// How often a running child is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How long to wait for a killed child to be reaped.
const KILL_WAIT: Duration = Duration::from_secs(5);

type InputFn = Box<dyn FnOnce(&mut dyn Write) -> io::Result<()> + Send>;

/// Errors from running a subprocess.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The executable could not be started.
    #[error("failed to start {program}: {source}")]
    Start {
        /// Program that failed to start
        program: String,
        /// Underlying spawn error
        #[source]
        source: io::Error,
    },

    /// The child did not exit in time and was killed.
    #[error("process timed out after {timeout:?} (killed: {killed})")]
    Timeout {
        /// Configured timeout
        timeout: Duration,
        /// Output captured before the kill
        stdout: String,
        /// Error output captured before the kill
        stderr: String,
        /// Whether the child was reaped within the kill wait
        killed: bool,
    },

    /// Waiting on the child failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Output of a completed process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code; `None` when the process was ended by a signal
    pub exit_code: Option<i32>,
    /// Captured standard output, lossily decoded
    pub stdout: String,
    /// Captured standard error, lossily decoded
    pub stderr: String,
}

/// Builder for one subprocess invocation.
pub struct ProcessRunner {
    program: PathBuf,
    working_directory: Option<PathBuf>,
    args: Vec<OsString>,
    env: Vec<(OsString, OsString)>,
    timeout: Option<Duration>,
    input: Option<InputFn>,
}

impl ProcessRunner {
    /// Create a runner for the executable at `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            working_directory: None,
            args: Vec::new(),
            env: Vec::new(),
            timeout: None,
            input: None,
        }
    }

    /// Run the child in `dir`.
    pub fn working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the child.
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Kill the child if it runs longer than `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Feed the child's stdin with `input`. Stdin is closed when it returns.
    ///
    /// Without input the child's stdin is empty.
    pub fn input<F>(mut self, input: F) -> Self
    where
        F: FnOnce(&mut dyn Write) -> io::Result<()> + Send + 'static,
    {
        self.input = Some(Box::new(input));
        self
    }

    /// Start the process and wait for it to exit.
    pub fn run(self) -> Result<ProcessOutput, ProcessError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if self.input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            });
        if let Some(dir) = &self.working_directory {
            command.current_dir(dir);
        }
        for (key, value) in &self.env {
            command.env(key, value);
        }

        let program = self.program.display().to_string();
        tracing::debug!(program = %program, args = ?self.args, "starting process");
        let mut child = command.spawn().map_err(|source| ProcessError::Start {
            program: program.clone(),
            source,
        })?;

        // Stdin gets its own thread: the child may fill its output pipes
        // before it drains stdin.
        let writer = match (self.input, child.stdin.take()) {
            (Some(input), Some(mut stdin)) => Some(thread::spawn(move || {
                if let Err(err) = input(&mut stdin) {
                    tracing::debug!(error = %err, "stdin writer stopped early");
                }
            })),
            _ => None,
        };
        let stdout = Capture::spawn(child.stdout.take());
        let stderr = Capture::spawn(child.stderr.take());

        let started = Instant::now();
        let status = match wait(&mut child, started, self.timeout)? {
            Some(status) => status,
            None => {
                let timeout = self.timeout.unwrap_or_default();
                tracing::warn!(program = %program, ?timeout, "process timed out, killing");
                let killed = kill(&mut child);
                return Err(ProcessError::Timeout {
                    timeout,
                    stdout: stdout.snapshot(),
                    stderr: stderr.snapshot(),
                    killed,
                });
            }
        };

        if let Some(writer) = writer {
            let _ = writer.join();
        }
        let output = ProcessOutput {
            exit_code: status.code(),
            stdout: stdout.finish(),
            stderr: stderr.finish(),
        };
        tracing::debug!(
            program = %program,
            exit_code = ?output.exit_code,
            elapsed = ?started.elapsed(),
            "process exited"
        );
        Ok(output)
    }
}

/// Poll until the child exits or `timeout` elapses. `None` means timed out.
fn wait(
    child: &mut Child,
    started: Instant,
    timeout: Option<Duration>,
) -> io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if timeout.is_some_and(|timeout| started.elapsed() > timeout) {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Kill the child and wait a bounded time for it to be reaped.
fn kill(child: &mut Child) -> bool {
    if let Err(err) = child.kill() {
        tracing::debug!(error = %err, "kill failed");
    }
    let deadline = Instant::now() + KILL_WAIT;
    while Instant::now() < deadline {
        match child.try_wait() {
            Ok(Some(_)) => return true,
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(_) => return false,
        }
    }
    false
}

/// Background reader accumulating one output pipe.
struct Capture {
    buffer: Arc<Mutex<Vec<u8>>>,
    handle: Option<JoinHandle<()>>,
}

impl Capture {
    fn spawn<R: Read + Send + 'static>(pipe: Option<R>) -> Self {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let handle = pipe.map(|mut pipe| {
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || {
                let mut chunk = [0u8; 4096];
                loop {
                    match pipe.read(&mut chunk) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => buffer
                            .lock()
                            .unwrap_or_else(|poisoned| poisoned.into_inner())
                            .extend_from_slice(&chunk[..n]),
                    }
                }
            })
        });
        Self { buffer, handle }
    }

    /// Whatever has been read so far.
    fn snapshot(&self) -> String {
        let buffer = self
            .buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Wait for the pipe to close and return everything read.
    fn finish(mut self) -> String {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        self.snapshot()
    }
}
