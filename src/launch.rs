//! Starting the program behind a tile.
//!
//! A tile's `command` and `args` become a [`LaunchRequest`], which
//! [`DetachedSpawner`] runs fire-and-forget: nothing is read from the child
//! and its exit status is never reported anywhere.

use crate::traits::Spawner;
use log::{debug, info};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

/// First argument meaning "the next token is the real program".
///
/// `{"cmd": "launch", "args": ["--exec", "opencpn", "-fullscreen"]}` runs
/// `opencpn -fullscreen` directly.
pub const EXEC_SENTINEL: &str = "--exec";

/// A resolved program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub program: String,
    pub args: Vec<String>,
}

impl LaunchRequest {
    /// Build a request from a tile's command and arguments.
    ///
    /// Returns `None` when there is nothing to run.
    pub fn resolve(command: &str, args: &[String]) -> Option<Self> {
        if args.first().map(String::as_str) == Some(EXEC_SENTINEL) {
            let program = args.get(1).filter(|p| !p.is_empty())?;
            return Some(Self {
                program: program.clone(),
                args: args[2..].to_vec(),
            });
        }
        if command.trim().is_empty() {
            return None;
        }
        Some(Self {
            program: command.to_string(),
            args: args.to_vec(),
        })
    }
}

/// Locate `program` on the search path `path_var` (a `PATH`-style list).
///
/// Programs containing a path separator are checked as given.
pub fn find_program(program: &str, path_var: &OsStr) -> Option<PathBuf> {
    if program.contains(std::path::MAIN_SEPARATOR) || program.contains('/') {
        let p = PathBuf::from(program);
        return is_executable(&p).then_some(p);
    }
    std::env::split_paths(path_var)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Spawns children detached from the launcher.
///
/// Children get `/dev/null` for stdio and, on Unix, their own process
/// group so terminal signals aimed at the launcher don't reach them.
/// Exited children are reaped on the next launch.
#[derive(Debug, Default)]
pub struct DetachedSpawner {
    children: Vec<Child>,
}

impl DetachedSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of children not yet known to have exited.
    pub fn pending(&self) -> usize {
        self.children.len()
    }

    /// Forget children that have exited.
    pub fn reap(&mut self) {
        self.children.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                debug!("child {} exited: {}", child.id(), status);
                false
            }
            Ok(None) => true,
            Err(_) => false,
        });
    }
}

impl Spawner for DetachedSpawner {
    type Error = LaunchError;

    fn spawn(&mut self, request: &LaunchRequest) -> Result<(), LaunchError> {
        self.reap();

        let path_var = std::env::var_os("PATH").unwrap_or_default();
        let program = find_program(&request.program, &path_var)
            .ok_or_else(|| LaunchError::NotFound(request.program.clone()))?;

        let mut cmd = Command::new(&program);
        cmd.args(&request.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        let child = cmd
            .spawn()
            .map_err(|e| LaunchError::Spawn(request.program.clone(), e))?;
        info!("launched {} (pid {})", program.display(), child.id());
        self.children.push(child);
        Ok(())
    }
}

/// Why a launch did not happen.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("{0}: not found on PATH")]
    NotFound(String),
    #[error("failed to spawn {0}: {1}")]
    Spawn(String, #[source] std::io::Error),
}
