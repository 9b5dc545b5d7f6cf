use crate::builtins::Builtin;
use crate::error::ShellError;
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::path::PathBuf;

/// How a redirection target is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    Truncate,
    Append,
}

/// Which stream a redirection operator applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// A file that one stream of a command is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub path: PathBuf,
    pub mode: RedirectMode,
}

impl Redirect {
    /// Opens the target, creating it with mode `0o666` (less the umask) if missing.
    pub fn open(&self) -> io::Result<File> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).mode(0o666);
        match self.mode {
            RedirectMode::Truncate => options.truncate(true),
            RedirectMode::Append => options.append(true),
        };
        options.open(&self.path)
    }
}

/// Maps a redirection operator to the stream and mode it selects.
pub fn redirect_operator(token: &str) -> Option<(Stream, RedirectMode)> {
    match token {
        ">" | "1>" => Some((Stream::Stdout, RedirectMode::Truncate)),
        ">>" | "1>>" => Some((Stream::Stdout, RedirectMode::Append)),
        "2>" => Some((Stream::Stderr, RedirectMode::Truncate)),
        "2>>" => Some((Stream::Stderr, RedirectMode::Append)),
        _ => None,
    }
}

/// One parsed input line, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub verb: String,
    pub args: Vec<String>,
    /// `None` means the shell's own standard output.
    pub stdout: Option<Redirect>,
    /// `None` means the shell's own standard error.
    pub stderr: Option<Redirect>,
}

/// What an invocation's verb resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Builtin(Builtin),
    External { name: String, args: Vec<String> },
}

impl Invocation {
    /// Classifies the verb as a builtin or an external program.
    pub fn command(&self) -> Command {
        match Builtin::from_parts(&self.verb, self.args.clone()) {
            Some(builtin) => Command::Builtin(builtin),
            None => Command::External {
                name: self.verb.clone(),
                args: self.args.clone(),
            },
        }
    }
}

/// Turns a token sequence into an `Invocation`.
///
/// Only a redirection in the last two tokens is recognized, and only when there
/// are at least three tokens. An operator anywhere else is an ordinary argument.
pub fn assemble(mut tokens: Vec<String>) -> Result<Invocation, ShellError> {
    if tokens.is_empty() {
        return Err(ShellError::EmptyCommand);
    }

    let mut stdout = None;
    let mut stderr = None;

    let len = tokens.len();
    if len >= 3
        && let Some((stream, mode)) = redirect_operator(&tokens[len - 2])
    {
        let path = tokens.pop().map(PathBuf::from).unwrap_or_default();
        tokens.pop();
        let redirect = Some(Redirect { path, mode });
        match stream {
            Stream::Stdout => stdout = redirect,
            Stream::Stderr => stderr = redirect,
        }
    }

    let mut tokens = tokens.into_iter();
    let verb = tokens.next().unwrap_or_default();
    let invocation = Invocation {
        verb,
        args: tokens.collect(),
        stdout,
        stderr,
    };
    log::debug!("assembled {:?}", invocation);
    Ok(invocation)
}
