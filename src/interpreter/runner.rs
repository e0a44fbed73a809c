//! Blocking execution of lookup and version commands.

use std::collections::VecDeque;
use std::ffi::OsString;
use std::process::{Command, Stdio};
use std::sync::Mutex;

use thiserror::Error;

/// A single short-lived command issued during lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to run (looked up on `path` when set).
    pub program: String,
    /// Arguments passed verbatim.
    pub args: Vec<String>,
    /// Replacement `PATH` for the child, if any.
    pub path: Option<OsString>,
    /// Append stderr to stdout, like `2>&1`.
    pub merge_stderr: bool,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            path: None,
            merge_stderr: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_path(mut self, path: Option<OsString>) -> Self {
        self.path = path;
        self
    }

    pub fn merged(mut self) -> Self {
        self.merge_stderr = true;
        self
    }

    /// Shell-like rendering used in logs and error messages.
    pub fn display(&self) -> String {
        let program = if self.program.contains(' ') {
            format!("\"{}\"", self.program)
        } else {
            self.program.clone()
        };
        let mut parts = vec![program];
        parts.extend(self.args.iter().cloned());
        let mut line = parts.join(" ");
        if self.merge_stderr {
            line.push_str(" 2>&1");
        }
        line
    }
}

/// Why a lookup command produced no usable output.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with code {code:?}")]
    Status { command: String, code: Option<i32> },
}

/// Executes lookup commands and returns their raw output bytes.
///
/// Implementations block until the command exits. A non-zero exit status is
/// an error, mirroring how a failed `which` means "not found".
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<Vec<u8>, RunError>;
}

/// Runs commands on the host with `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<Vec<u8>, RunError> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        if let Some(path) = &invocation.path {
            cmd.env("PATH", path);
        }
        cmd.stdin(Stdio::null());
        configure_command_no_window(&mut cmd);

        tracing::debug!("Running lookup command: {}", invocation.display());

        let output = cmd.output().map_err(|source| RunError::Spawn {
            command: invocation.display(),
            source,
        })?;

        if !output.status.success() {
            return Err(RunError::Status {
                command: invocation.display(),
                code: output.status.code(),
            });
        }

        let mut bytes = output.stdout;
        if invocation.merge_stderr {
            bytes.extend_from_slice(&output.stderr);
        }
        Ok(bytes)
    }
}

/// Keep lookup commands from flashing a console window on Windows.
pub fn configure_command_no_window(cmd: &mut Command) {
    #[cfg(target_os = "windows")]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x08000000;
        cmd.creation_flags(CREATE_NO_WINDOW);
    }
    #[cfg(not(target_os = "windows"))]
    let _ = cmd;
}

/// Runner that replays canned responses, for exercising strategies on any host.
///
/// Responses are matched by the rendered command line. Every invocation is
/// recorded so tests can assert which commands were (not) issued.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: Mutex<Vec<(String, VecDeque<Option<Vec<u8>>>)>>,
    calls: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `command` with `output` and a zero exit status.
    pub fn succeed(self, command: &str, output: &str) -> Self {
        self.push(command, Some(output.as_bytes().to_vec()))
    }

    /// Respond to `command` with a non-zero exit status.
    pub fn fail(self, command: &str) -> Self {
        self.push(command, None)
    }

    fn push(self, command: &str, response: Option<Vec<u8>>) -> Self {
        if let Ok(mut responses) = self.responses.lock() {
            match responses.iter_mut().find(|(c, _)| c == command) {
                Some((_, queue)) => queue.push_back(response),
                None => responses.push((command.to_string(), VecDeque::from([response]))),
            }
        }
        self
    }

    /// Every invocation seen so far, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Rendered command lines seen so far.
    pub fn commands(&self) -> Vec<String> {
        self.calls().iter().map(Invocation::display).collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, invocation: &Invocation) -> Result<Vec<u8>, RunError> {
        let command = invocation.display();
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(invocation.clone());
        }

        let response = self.responses.lock().ok().and_then(|mut responses| {
            responses
                .iter_mut()
                .find(|(c, _)| *c == command)
                .and_then(|(_, queue)| {
                    if queue.len() > 1 {
                        queue.pop_front()
                    } else {
                        queue.front().cloned()
                    }
                })
        });

        match response {
            Some(Some(bytes)) => Ok(bytes),
            Some(None) => Err(RunError::Status {
                command,
                code: Some(1),
            }),
            None => Err(RunError::Spawn {
                command,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not scripted"),
            }),
        }
    }
}
