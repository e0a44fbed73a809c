//! Dependency check supervision.
//!
//! Runs the bundled dependency-check script in the resolved interpreter.
//! The script reports missing modules on stderr; every chunk it writes is
//! shown to the user as its own acknowledge-only message box.
//!
//! # Example
//!
//! ```no_run
//! use companion::check::DependencyChecker;
//! use companion::interpreter::PathResolver;
//! use companion::ui::MockUI;
//! use companion::Platform;
//! use std::path::Path;
//!
//! let resolved = PathResolver::system().resolve(Platform::current()).unwrap();
//! let mut dialog = MockUI::new();
//! let outcome = DependencyChecker::new()
//!     .run(&resolved, Path::new("/opt/app/python"), &mut dialog)
//!     .unwrap();
//! println!("check exited with {:?}", outcome.exit_code);
//! ```

use std::ffi::OsString;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStderr, ChildStdout, Command, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use serde::Serialize;

use crate::decode::{decode_utf8, StreamDecoder};
use crate::error::{CompanionError, Result};
use crate::host::{HostDialog, MessageBox};
use crate::interpreter::runner::configure_command_no_window;
use crate::interpreter::ResolvedInterpreter;

/// Script run by default, relative to the script directory.
pub const DEFAULT_CHECK_SCRIPT: &str = "check_depends.py";

/// Title of diagnostic message boxes.
pub const DEFAULT_DIALOG_TITLE: &str = "Python Modules?";

const READ_CHUNK: usize = 8192;

/// One diagnostic message produced by a check run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticReport {
    /// Exit code of the run that produced the message.
    pub exit_code: Option<i32>,
    pub message: String,
}

/// Result of a completed dependency check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// Messages shown to the user, in arrival order.
    pub diagnostics: Vec<DiagnosticReport>,
}

impl CheckOutcome {
    /// Whether the script reported nothing missing.
    pub fn is_clean(&self) -> bool {
        self.exit_code == Some(0) && self.diagnostics.is_empty()
    }
}

/// Launches the dependency-check script.
#[derive(Debug, Clone)]
pub struct DependencyChecker {
    script_name: String,
    dialog_title: String,
    inherited_path: Option<OsString>,
}

impl Default for DependencyChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyChecker {
    pub fn new() -> Self {
        Self {
            script_name: DEFAULT_CHECK_SCRIPT.to_string(),
            dialog_title: DEFAULT_DIALOG_TITLE.to_string(),
            inherited_path: std::env::var_os("PATH"),
        }
    }

    pub fn with_script_name(mut self, name: impl Into<String>) -> Self {
        self.script_name = name.into();
        self
    }

    pub fn with_dialog_title(mut self, title: impl Into<String>) -> Self {
        self.dialog_title = title.into();
        self
    }

    /// Override the `PATH` appended after the interpreter's directory.
    pub fn with_inherited_path(mut self, path: Option<OsString>) -> Self {
        self.inherited_path = path;
        self
    }

    pub fn script_path(&self, script_dir: &Path) -> PathBuf {
        script_dir.join(&self.script_name)
    }

    /// Build the isolated command for a check run.
    ///
    /// The child gets exactly two environment variables: `PATH`, with the
    /// interpreter's directory first, and `PYTHONIOENCODING=utf-8`.
    pub fn command(&self, resolved: &ResolvedInterpreter, script_dir: &Path) -> Command {
        let mut cmd = Command::new(&resolved.binary_path);
        cmd.arg(self.script_path(script_dir))
            .current_dir(script_dir)
            .env_clear()
            .env("PATH", resolved.child_path(self.inherited_path.as_ref()))
            .env("PYTHONIOENCODING", "utf-8")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        configure_command_no_window(&mut cmd);
        cmd
    }

    /// Start the check without waiting for it.
    pub fn spawn(&self, resolved: &ResolvedInterpreter, script_dir: &Path) -> Result<RunningCheck> {
        let mut cmd = self.command(resolved, script_dir);
        tracing::debug!(
            "Starting dependency check: {} {}",
            resolved.binary_path.display(),
            self.script_path(script_dir).display()
        );

        let mut child = cmd.spawn().map_err(|source| CompanionError::CheckSpawn {
            program: resolved.binary_path.clone(),
            source,
        })?;

        let (tx, chunks) = mpsc::channel();
        let stderr_reader = child.stderr.take().map(|stderr| {
            thread::spawn(move || {
                read_chunks(stderr, |chunk| {
                    let _ = tx.send(chunk);
                })
            })
        });
        let stdout_drain = child.stdout.take().map(|stdout| thread::spawn(move || drain(stdout)));

        Ok(RunningCheck {
            child,
            chunks,
            stderr_reader,
            stdout_drain,
            title: self.dialog_title.clone(),
            reaped: false,
        })
    }

    /// Run the check to completion, presenting diagnostics through `dialog`.
    pub fn run(
        &self,
        resolved: &ResolvedInterpreter,
        script_dir: &Path,
        dialog: &mut dyn HostDialog,
    ) -> Result<CheckOutcome> {
        self.spawn(resolved, script_dir)?.wait(dialog)
    }
}

/// A dependency check in flight.
///
/// There is no cancellation and no timeout: `wait` returns when the script
/// exits. Dropping a check without calling `wait` kills the script and
/// reaps it.
pub struct RunningCheck {
    child: Child,
    chunks: Receiver<Vec<u8>>,
    stderr_reader: Option<JoinHandle<()>>,
    stdout_drain: Option<JoinHandle<()>>,
    title: String,
    reaped: bool,
}

impl RunningCheck {
    /// Present diagnostics as they arrive, then wait for exit.
    pub fn wait(mut self, dialog: &mut dyn HostDialog) -> Result<CheckOutcome> {
        let mut decoder = StreamDecoder::new();
        let mut messages = Vec::new();

        for chunk in self.chunks.iter() {
            let text = decoder.push(&chunk);
            if !text.is_empty() {
                present(dialog, &self.title, &text);
                messages.push(text);
            }
        }
        let tail = decoder.finish();
        if !tail.is_empty() {
            present(dialog, &self.title, &tail);
            messages.push(tail);
        }

        for handle in [self.stderr_reader.take(), self.stdout_drain.take()]
            .into_iter()
            .flatten()
        {
            if handle.join().is_err() {
                tracing::warn!("Dependency check output reader panicked");
            }
        }

        let status = self.child.wait()?;
        self.reaped = true;
        let exit_code = status.code();
        tracing::info!("Dependency check exited with code {:?}", exit_code);

        Ok(CheckOutcome {
            exit_code,
            diagnostics: messages
                .into_iter()
                .map(|message| DiagnosticReport { exit_code, message })
                .collect(),
        })
    }
}

impl Drop for RunningCheck {
    fn drop(&mut self) {
        if self.reaped {
            return;
        }
        tracing::debug!("Dependency check dropped before exit, killing it");
        if let Err(e) = self.child.kill() {
            tracing::debug!("Could not kill dependency check: {}", e);
        }
        if let Err(e) = self.child.wait() {
            tracing::warn!("Could not reap dependency check: {}", e);
        }
    }
}

/// Show one diagnostic, falling back to the document on dialog failure.
fn present(dialog: &mut dyn HostDialog, title: &str, text: &str) {
    let message = MessageBox::info(title, text);
    if let Err(e) = dialog.show_message_box(&message) {
        tracing::warn!("Message box unavailable, writing to document: {}", e);
        dialog.write_document(&e.to_string());
    }
}

/// Forward raw stderr reads until EOF.
fn read_chunks(mut stderr: ChildStderr, mut send: impl FnMut(Vec<u8>)) {
    let mut buf = [0u8; READ_CHUNK];
    loop {
        match stderr.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => send(buf[..n].to_vec()),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!("Error reading dependency check stderr: {}", e);
                break;
            }
        }
    }
}

fn drain(stdout: ChildStdout) {
    let mut reader = BufReader::new(stdout);
    let mut line = Vec::new();
    while let Ok(n) = reader.read_until(b'\n', &mut line) {
        if n == 0 {
            break;
        }
        tracing::debug!("check stdout: {}", decode_utf8(&line).trim_end());
        line.clear();
    }
}
