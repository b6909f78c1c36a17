use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// An external tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Directory the tool runs in
    pub current_dir: PathBuf,
    /// Redirect stdout to this file, relative to `current_dir`
    pub stdout: Option<PathBuf>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>, current_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: current_dir.into(),
            stdout: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<std::ffi::OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    pub fn stdout_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdout = Some(path.into());
        self
    }

    /// Absolute location of the stdout redirect, if any
    pub fn stdout_path(&self) -> Option<PathBuf> {
        self.stdout.as_ref().map(|p| self.current_dir.join(p))
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        if let Some(stdout) = &self.stdout {
            write!(f, " > {}", stdout.display())?;
        }
        Ok(())
    }
}

/// How a tool exited. `code` is `None` when it was killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    pub code: Option<i32>,
}

impl ToolStatus {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit status {code}"),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// Runs external tools. Tests substitute a recording implementation.
pub trait Executor {
    fn execute(&self, command: &ToolCommand) -> io::Result<ToolStatus>;
}

/// Spawns real processes and waits for them
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn execute(&self, command: &ToolCommand) -> io::Result<ToolStatus> {
        tracing::debug!("Running `{}` in {}", command, command.current_dir.display());

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args).current_dir(&command.current_dir);

        if let Some(path) = command.stdout_path() {
            cmd.stdout(Stdio::from(File::create(path)?));
        }

        let status = cmd.status()?;
        Ok(ToolStatus {
            code: status.code(),
        })
    }
}

/// `dir` joined onto `root` unless it is already absolute
pub fn resolve(root: &Path, dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        root.join(dir)
    }
}
