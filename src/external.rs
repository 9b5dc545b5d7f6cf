use crate::error::ShellError;
use std::env;
use std::ffi::OsStr;
use std::os::unix::fs::PermissionsExt;
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Searches the system `PATH` for an executable with the given name.
///
/// A name containing `/` is taken as a path and checked directly.
pub fn find_executable(command: &str) -> Option<PathBuf> {
    if command.contains('/') {
        let path = PathBuf::from(command);
        return is_executable(&path).then_some(path);
    }
    let path_var = env::var_os("PATH")?;
    find_executable_in(command, &path_var)
}

/// Scans each directory of `path_var` in order; the first executable file
/// named `command` wins.
pub fn find_executable_in(command: &str, path_var: &OsStr) -> Option<PathBuf> {
    if command.is_empty() {
        return None;
    }
    env::split_paths(path_var)
        .map(|dir| dir.join(command))
        .find(|candidate| is_executable(candidate))
}

fn is_executable(path: &Path) -> bool {
    path.metadata()
        .map(|metadata| metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Gets executable names from `PATH` that start with `prefix`, sorted and deduplicated.
///
/// Directories that do not exist or cannot be read are skipped.
pub fn executables_with_prefix(prefix: &str) -> Vec<String> {
    let mut executables = Vec::new();

    if let Some(path_var) = env::var_os("PATH") {
        for dir in env::split_paths(&path_var) {
            let Ok(entries) = std::fs::read_dir(&dir) else {
                continue;
            };
            for entry in entries.flatten() {
                if let Some(name) = entry.file_name().to_str()
                    && name.starts_with(prefix)
                    && is_executable(&entry.path())
                {
                    executables.push(name.to_string());
                }
            }
        }
    }

    executables.sort();
    executables.dedup();
    executables
}

/// Runs the program at `path` with `name` as its `argv[0]` and waits for it to exit.
///
/// The child writes straight to the given streams; its exit status is logged
/// and otherwise ignored.
pub fn run_external(
    name: &str,
    path: &Path,
    args: &[String],
    stdout: Stdio,
    stderr: Stdio,
) -> Result<(), ShellError> {
    let launch_error = |source| ShellError::Launch {
        name: name.to_string(),
        source,
    };

    let mut child = Command::new(path)
        .arg0(name)
        .args(args)
        .stdout(stdout)
        .stderr(stderr)
        .spawn()
        .map_err(launch_error)?;

    let status = child.wait().map_err(launch_error)?;
    log::debug!("{} exited with {}", name, status);
    Ok(())
}
