use crate::ShellStatus;
use crate::error::ShellError;
use crate::external::find_executable;
use std::env;
use std::io::Write;
use std::path::PathBuf;

/// Enumeration of all supported builtin commands, each with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Builtin {
    Exit(Option<String>),
    Echo(Vec<String>),
    Type(Vec<String>),
    Pwd,
    Cd(Option<String>),
}

impl Builtin {
    pub const NAMES: [&'static str; 5] = ["exit", "echo", "type", "pwd", "cd"];

    /// Builds the builtin named `name`, or `None` if `name` is not a builtin.
    pub fn from_parts(name: &str, args: Vec<String>) -> Option<Self> {
        let builtin = match name {
            "exit" => Builtin::Exit(args.into_iter().next()),
            "echo" => Builtin::Echo(args),
            "type" => Builtin::Type(args),
            "pwd" => Builtin::Pwd,
            "cd" => Builtin::Cd(args.into_iter().next()),
            _ => return None,
        };
        Some(builtin)
    }

    /// Executes the builtin command.
    ///
    /// Returns a `ShellStatus` indicating whether the shell should continue
    /// or exit with a specific code. Only `exit` with a non-numeric argument fails.
    pub fn execute<W: Write, E: Write>(
        &self,
        mut stdout: W,
        mut stderr: E,
    ) -> Result<ShellStatus, ShellError> {
        match self {
            Builtin::Exit(code) => exit_cmd(code.as_deref()),
            Builtin::Echo(args) => {
                echo_cmd(args, &mut stdout);
                Ok(ShellStatus::Continue)
            }
            Builtin::Type(args) => {
                type_cmd(args, &mut stdout);
                Ok(ShellStatus::Continue)
            }
            Builtin::Pwd => {
                match env::current_dir() {
                    Ok(path) => {
                        let _ = writeln!(stdout, "{}", path.display());
                    }
                    Err(e) => {
                        let _ = writeln!(stderr, "pwd: error retrieving current directory: {}", e);
                    }
                }
                Ok(ShellStatus::Continue)
            }
            Builtin::Cd(path) => {
                cd_cmd(path.as_deref(), &mut stderr);
                Ok(ShellStatus::Continue)
            }
        }
    }
}

/// Returns true if `name` is handled in-process.
pub fn is_builtin(name: &str) -> bool {
    Builtin::NAMES.contains(&name)
}

fn exit_cmd(code: Option<&str>) -> Result<ShellStatus, ShellError> {
    match code {
        None => Ok(ShellStatus::Exit(0)),
        Some(arg) => arg
            .parse::<i32>()
            .map(ShellStatus::Exit)
            .map_err(|_| ShellError::InvalidExitCode(arg.to_string())),
    }
}

/// Implementation of the `echo` command.
///
/// Prints the arguments to stdout, separated by spaces.
pub fn echo_cmd<W: Write>(args: &[String], writer: &mut W) {
    let _ = writeln!(writer, "{}", args.join(" "));
}

/// Implementation of the `type` command.
///
/// Identifies whether each name is a builtin or an executable in the PATH.
pub fn type_cmd<W: Write>(args: &[String], stdout: &mut W) {
    for command in args {
        if is_builtin(command) {
            let _ = writeln!(stdout, "{} is a shell builtin", command);
            continue;
        }

        match find_executable(command) {
            Some(path) => {
                let _ = writeln!(stdout, "{} is {}", command, path.display());
            }
            None => {
                let _ = writeln!(stdout, "{}: not found", command);
            }
        }
    }
}

/// Implementation of the `cd` command.
///
/// No argument or `~` means `$HOME`; a failed change leaves the directory as it was.
pub fn cd_cmd<E: Write>(path: Option<&str>, stderr: &mut E) {
    let target = match path {
        None | Some("~") => match env::var("HOME") {
            Ok(home) => PathBuf::from(home),
            Err(_) => {
                let _ = writeln!(stderr, "cd: HOME not set");
                return;
            }
        },
        Some(path) => match path.strip_prefix("~/") {
            Some(rest) => match env::var("HOME") {
                Ok(home) => PathBuf::from(home).join(rest),
                Err(_) => PathBuf::from(path),
            },
            None => PathBuf::from(path),
        },
    };
    let shown = path.unwrap_or("~");

    match target.metadata() {
        Err(_) => {
            let _ = writeln!(stderr, "cd: {}: No such file or directory", shown);
        }
        Ok(metadata) if !metadata.is_dir() => {
            let _ = writeln!(stderr, "cd: {}: Not a directory", shown);
        }
        Ok(_) => {
            if let Err(e) = env::set_current_dir(&target) {
                let _ = writeln!(stderr, "cd: {}: {}", shown, e);
            } else {
                log::debug!("cd {}", target.display());
            }
        }
    }
}
