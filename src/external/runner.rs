//! External process execution
//!
//! `CommandRunner` is the seam every `pass`/`veracrypt` call goes through.
//! `SystemRunner` spawns real processes, `DryRunRunner` only prints what
//! would run.

use crate::cli::Output;
use crate::secret::{REDACTED, Secret};
use anyhow::{Context, Result};
use std::fmt;
use std::io::Write;
use std::process::{Command, Stdio};

/// One argument of an invocation
#[derive(Debug, Clone)]
pub enum InvocationArg {
    Plain(String),
    Secret(Secret),
}

impl InvocationArg {
    fn as_str(&self) -> &str {
        match self {
            InvocationArg::Plain(value) => value,
            InvocationArg::Secret(secret) => secret.expose(),
        }
    }
}

/// A program plus its ordered argument list
#[derive(Debug, Clone)]
pub struct Invocation {
    program: String,
    args: Vec<InvocationArg>,
    stdin: Option<Secret>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(InvocationArg::Plain(arg.into()));
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args
            .extend(args.into_iter().map(|a| InvocationArg::Plain(a.into())));
        self
    }

    /// Add an argument that is passed verbatim but redacted when displayed
    pub fn secret_arg(mut self, secret: &Secret) -> Self {
        self.args.push(InvocationArg::Secret(secret.clone()));
        self
    }

    /// Feed `input` to the child's stdin
    pub fn stdin(mut self, input: Secret) -> Self {
        self.stdin = Some(input);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// The real argument vector, secrets included
    pub fn argv(&self) -> Vec<&str> {
        self.args.iter().map(InvocationArg::as_str).collect()
    }

    pub fn stdin_data(&self) -> Option<&Secret> {
        self.stdin.as_ref()
    }
}

/// Shell-like rendering with secrets replaced
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            match arg {
                InvocationArg::Secret(_) => write!(f, " {REDACTED}")?,
                InvocationArg::Plain(value) if value.is_empty() || value.contains(' ') => {
                    write!(f, " '{value}'")?
                }
                InvocationArg::Plain(value) => write!(f, " {value}")?,
            }
        }
        Ok(())
    }
}

/// Exit status and captured streams of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    /// `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Trait for running one external process to completion
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<CapturedOutput>;
}

/// Production runner that spawns the program directly (no shell)
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<CapturedOutput> {
        let program = which::which(invocation.program()).with_context(|| {
            format!(
                "'{}' is not installed or not on PATH. Please install it and try again",
                invocation.program()
            )
        })?;

        tracing::info!(command = %invocation, "running external command");

        let mut cmd = Command::new(&program);
        cmd.args(invocation.argv())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if invocation.stdin_data().is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            });

        let mut child = cmd
            .spawn()
            .with_context(|| format!("Failed to execute {}", invocation.program()))?;

        if let Some(input) = invocation.stdin_data() {
            // Dropping the handle closes the pipe so the child sees EOF
            let mut stdin = child
                .stdin
                .take()
                .context("Child process stdin was not captured")?;
            match stdin.write_all(input.expose().as_bytes()) {
                Ok(()) => {}
                // The child exited without reading; its status and stderr say why
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                    tracing::debug!(program = invocation.program(), "child closed stdin early");
                }
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("Failed to write to {} stdin", invocation.program())
                    });
                }
            }
        }

        let output = child
            .wait_with_output()
            .with_context(|| format!("Failed to wait for {}", invocation.program()))?;

        tracing::debug!(program = invocation.program(), status = ?output.status.code(), "process exited");

        Ok(CapturedOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Prints each command instead of running it and reports an empty success
pub struct DryRunRunner {
    output: Output,
}

impl DryRunRunner {
    pub fn new(output: Output) -> Self {
        Self { output }
    }
}

impl CommandRunner for DryRunRunner {
    fn run(&self, invocation: &Invocation) -> Result<CapturedOutput> {
        self.output.step(&format!("would run: {invocation}"));
        Ok(CapturedOutput {
            code: Some(0),
            ..CapturedOutput::default()
        })
    }
}
