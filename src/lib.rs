use std::fs::File;
use std::io::{self, Write};
use std::process::Stdio;

pub mod builtins;
pub mod command;
pub mod config;
pub mod error;
pub mod external;
pub mod input;
pub mod logging;
pub mod parser;

pub use builtins::Builtin;
pub use command::{Command, Invocation, assemble};
pub use error::ShellError;
pub use parser::tokenize;

/// Result of a command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellStatus {
    /// The shell should continue running.
    Continue,
    /// The shell should exit with the provided code.
    Exit(i32),
}

/// Destination of one output stream for a single invocation.
///
/// A redirected file is closed when the `Output` is dropped, at the end of
/// the command that opened it.
#[derive(Debug)]
pub enum Output {
    Inherit,
    File(File),
}

impl Output {
    fn into_stdio(self) -> Stdio {
        match self {
            Output::Inherit => Stdio::inherit(),
            Output::File(file) => Stdio::from(file),
        }
    }

    fn into_writer(self, inherited: impl Write + 'static) -> Box<dyn Write> {
        match self {
            Output::Inherit => Box::new(inherited),
            Output::File(file) => Box::new(file),
        }
    }
}

fn open_output(redirect: Option<&command::Redirect>) -> Result<Output, ShellError> {
    match redirect {
        None => Ok(Output::Inherit),
        Some(redirect) => redirect
            .open()
            .map(Output::File)
            .map_err(|source| ShellError::Redirect {
                path: redirect.path.clone(),
                source,
            }),
    }
}

/// Orchestrates command execution.
///
/// Redirect targets are opened first; a builtin runs in-process, anything else
/// is looked up in the `PATH` and run as a child process.
pub fn execute(invocation: &Invocation) -> Result<ShellStatus, ShellError> {
    let stdout = open_output(invocation.stdout.as_ref())?;
    let stderr = open_output(invocation.stderr.as_ref())?;

    match invocation.command() {
        Command::Builtin(builtin) => {
            let mut stdout = stdout.into_writer(io::stdout());
            let mut stderr = stderr.into_writer(io::stderr());
            let status = builtin.execute(&mut *stdout, &mut *stderr);
            let _ = stdout.flush();
            let _ = stderr.flush();
            status
        }
        Command::External { name, args } => {
            match external::find_executable(&name) {
                Some(path) => {
                    log::debug!("resolved {} to {}", name, path.display());
                    external::run_external(
                        &name,
                        &path,
                        &args,
                        stdout.into_stdio(),
                        stderr.into_stdio(),
                    )?;
                }
                None => {
                    let mut stderr = stderr.into_writer(io::stderr());
                    let _ = writeln!(stderr, "{}: command not found", name);
                }
            }
            Ok(ShellStatus::Continue)
        }
    }
}

/// Tokenizes, assembles and executes one input line.
///
/// A line without tokens does nothing.
pub fn run_line(line: &str) -> Result<ShellStatus, ShellError> {
    let tokens = tokenize(line);
    log::debug!("tokens {:?}", tokens);
    if tokens.is_empty() {
        return Ok(ShellStatus::Continue);
    }
    let invocation = assemble(tokens)?;
    execute(&invocation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_file(label: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("lineshell-lib-{}-{}", label, std::process::id()));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn blank_line_continues() {
        assert!(matches!(run_line("   "), Ok(ShellStatus::Continue)));
    }

    #[test]
    fn exit_line_returns_status() {
        assert!(matches!(run_line("exit 7"), Ok(ShellStatus::Exit(7))));
    }

    #[test]
    fn echo_redirects_into_file() {
        let path = scratch_file("echo");
        let line = format!("echo 'hello  world' > {}", path.display());
        assert!(matches!(run_line(&line), Ok(ShellStatus::Continue)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello  world\n");
    }

    #[test]
    fn append_redirect_accumulates() {
        let path = scratch_file("append");
        let line = format!("echo hello >> {}", path.display());
        run_line(&line).unwrap();
        run_line(&line).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\nhello\n");
    }

    #[test]
    fn external_stdout_is_redirected() {
        let path = scratch_file("external");
        let line = format!("sh -c 'echo from child' 1> {}", path.display());
        run_line(&line).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "from child\n");
    }

    #[test]
    fn unknown_command_is_reported_on_redirected_stderr() {
        let path = scratch_file("unknown");
        let line = format!("nonexistentcmd123 x 2> {}", path.display());
        assert!(matches!(run_line(&line), Ok(ShellStatus::Continue)));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "nonexistentcmd123: command not found\n"
        );
    }

    #[test]
    fn unopenable_redirect_is_recoverable() {
        let err = run_line("echo hi > /nonexistent/dir/out.txt").unwrap_err();
        assert!(matches!(err, ShellError::Redirect { .. }));
        assert!(!err.is_fatal());
    }
}
