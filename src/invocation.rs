// ==============================================================================
// `Invocation`: a Built, Runnable drafter Process
// ==============================================================================
//
// An `Invocation` is the frozen form of a `Drafter` builder: program, argument
// vector, working directory and an optional stdin payload. Building one runs
// nothing, so callers can inspect or tweak the command before handing it back
// to `Drafter::run_invocation` (or calling `execute` directly).
//
// Execution is a single synchronous spawn, wait and capture. The child, its
// pipes and the scoped stdin writer live only inside `execute`, so they are
// released on every exit path.

use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::thread;

use crate::error::DrafterError;

/// A fully rendered drafter command, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<String>,
    current_dir: PathBuf,
    stdin: Option<Vec<u8>>,
}

impl Invocation {
    pub(crate) fn new(program: PathBuf, args: Vec<String>, current_dir: PathBuf) -> Self {
        Invocation {
            program,
            args,
            current_dir,
            stdin: None,
        }
    }

    /// The executable that will be spawned.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments passed after the program name.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The complete argument vector, program first.
    #[must_use]
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Directory the process will run in.
    #[must_use]
    pub fn get_current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Run the process in `dir` instead of the directory captured at build
    /// time. Relative input and output paths resolve against it.
    pub fn current_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.current_dir = dir.into();
        self
    }

    /// Feed `bytes` to the process on standard input. Pair with an input
    /// argument of `-`.
    pub fn stdin(&mut self, bytes: impl Into<Vec<u8>>) -> &mut Self {
        self.stdin = Some(bytes.into());
        self
    }

    /// Spawn the process, wait for it to exit and return its stdout.
    ///
    /// # Errors
    ///
    /// - [`DrafterError::Launch`] if the program cannot be spawned.
    /// - [`DrafterError::ExternalTool`] if it exits unsuccessfully.
    /// - [`DrafterError::Io`] if stdin cannot be written or output collected.
    pub fn execute(&self) -> Result<String, DrafterError> {
        let output = self.spawn_and_wait()?;
        classify(output)
    }

    fn spawn_and_wait(&self) -> Result<Output, DrafterError> {
        tracing::debug!(argv = ?self.argv(), dir = %self.current_dir.display(), "spawning drafter");

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .current_dir(&self.current_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if self.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            });

        let mut child = command.spawn().map_err(|source| DrafterError::Launch {
            program: self.program.clone(),
            source,
        })?;

        // stdin is fed from a scoped thread while this one drains stdout and
        // stderr; either side may fill its pipe before the other is read.
        let pipe = child.stdin.take();
        let (output, written) = thread::scope(|scope| {
            let writer = match (&self.stdin, pipe) {
                // Dropping the pipe at the end of the write closes it, so
                // drafter sees EOF.
                (Some(bytes), Some(mut pipe)) => {
                    Some(scope.spawn(move || pipe.write_all(bytes)))
                }
                _ => None,
            };
            let output = child.wait_with_output();
            let written = writer.map_or(Ok(()), |writer| {
                writer
                    .join()
                    .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")))
            });
            (output, written)
        });

        let output = output.map_err(|source| DrafterError::Io {
            context: "collect drafter output",
            source,
        })?;

        match written {
            // A tool that exits before reading all of stdin is judged by its
            // exit status, not by the broken pipe.
            Err(source) if source.kind() != io::ErrorKind::BrokenPipe => Err(DrafterError::Io {
                context: "write drafter stdin",
                source,
            }),
            _ => Ok(output),
        }
    }
}

/// Turn a finished process into its stdout or a classified failure.
fn classify(output: Output) -> Result<String, DrafterError> {
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        tracing::debug!(status = ?output.status.code(), %stderr, "drafter failed");
        return Err(DrafterError::ExternalTool {
            status: output.status.code(),
            stderr,
        });
    }

    if !stderr.is_empty() {
        // drafter prints parser warnings on stderr even when it succeeds.
        tracing::info!(%stderr, "drafter reported warnings");
    }
    tracing::trace!(bytes = output.stdout.len(), "drafter succeeded");

    Ok(match String::from_utf8(output.stdout) {
        Ok(stdout) => stdout,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}
