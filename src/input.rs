use crate::builtins::Builtin;
use crate::error::ShellError;
use crate::external::executables_with_prefix;
use std::io::{self, BufRead, Write};
use termion::event::Key;
use termion::input::TermRead;
use termion::raw::IntoRawMode;

/// Prints `prompt` and reads one line without its trailing newline.
///
/// A terminal gets a raw-mode editor with tab completion; anything else is
/// read line by line. End of input is an error.
pub fn read_line(prompt: &str) -> Result<String, ShellError> {
    print!("{}", prompt);
    io::stdout().flush().map_err(ShellError::Input)?;

    if termion::is_tty(&io::stdin()) {
        read_interactive()
    } else {
        read_buffered(&mut io::stdin().lock())
    }
}

fn end_of_input() -> ShellError {
    ShellError::Input(io::Error::new(io::ErrorKind::UnexpectedEof, "EOF"))
}

fn read_buffered<R: BufRead>(reader: &mut R) -> Result<String, ShellError> {
    let mut line = String::new();
    let read = reader.read_line(&mut line).map_err(ShellError::Input)?;
    if read == 0 {
        return Err(end_of_input());
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

fn read_interactive() -> Result<String, ShellError> {
    // Enter raw mode to handle input character by character
    let mut stdout = io::stdout().into_raw_mode().map_err(ShellError::Input)?;
    let mut buffer = String::new();

    for key in io::stdin().keys() {
        match key.map_err(ShellError::Input)? {
            Key::Ctrl('c') => {
                buffer.clear();
                write!(stdout, "\r\n").map_err(ShellError::Input)?;
                return Ok(buffer);
            }
            Key::Ctrl('d') if buffer.is_empty() => {
                write!(stdout, "\r\n").map_err(ShellError::Input)?;
                return Err(end_of_input());
            }
            Key::Char('\n') | Key::Char('\r') => {
                write!(stdout, "\r\n").map_err(ShellError::Input)?;
                return Ok(buffer);
            }
            Key::Char('\t') => {
                match complete(&buffer, executables_with_prefix) {
                    Some(remainder) => {
                        write!(stdout, "{}", remainder).map_err(ShellError::Input)?;
                        buffer.push_str(&remainder);
                    }
                    None => write!(stdout, "\x07").map_err(ShellError::Input)?,
                }
            }
            Key::Backspace => {
                if buffer.pop().is_some() {
                    // Move cursor back, erase char with space, move back again
                    write!(stdout, "\x08 \x08").map_err(ShellError::Input)?;
                }
            }
            Key::Char(c) => {
                buffer.push(c);
                write!(stdout, "{}", c).map_err(ShellError::Input)?;
            }
            _ => continue,
        }
        stdout.flush().map_err(ShellError::Input)?;
    }

    Err(end_of_input())
}

/// Completes the command word in `buffer` against builtins and the names
/// `executables` returns for that prefix.
///
/// Returns the text to append (including a trailing space) when exactly one
/// name matches. Arguments are never completed, and `executables` is not
/// called for an empty buffer or one that already has arguments.
pub fn complete<F>(buffer: &str, executables: F) -> Option<String>
where
    F: FnOnce(&str) -> Vec<String>,
{
    if buffer.is_empty() || buffer.contains(' ') {
        return None;
    }

    let mut candidates: Vec<String> = Builtin::NAMES
        .iter()
        .map(|name| name.to_string())
        .chain(executables(buffer))
        .filter(|name| name.starts_with(buffer))
        .collect();
    candidates.sort();
    candidates.dedup();

    match candidates.as_slice() {
        [only] => Some(format!("{} ", &only[buffer.len()..])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn none(_: &str) -> Vec<String> {
        Vec::new()
    }

    #[test]
    fn buffered_lines_lose_their_newline() {
        let mut input = Cursor::new("echo a\r\nls\n");
        assert_eq!(read_buffered(&mut input).unwrap(), "echo a");
        assert_eq!(read_buffered(&mut input).unwrap(), "ls");
    }

    #[test]
    fn last_line_without_newline_is_kept() {
        let mut input = Cursor::new("pwd");
        assert_eq!(read_buffered(&mut input).unwrap(), "pwd");
    }

    #[test]
    fn end_of_input_is_fatal() {
        let mut input = Cursor::new("");
        let err = read_buffered(&mut input).unwrap_err();
        assert!(matches!(err, ShellError::Input(ref e) if e.kind() == io::ErrorKind::UnexpectedEof));
        assert!(err.is_fatal());
    }

    #[test]
    fn completes_unique_builtin() {
        assert_eq!(complete("ec", none), Some("ho ".to_string()));
        assert_eq!(complete("ex", none), Some("it ".to_string()));
    }

    #[test]
    fn completes_unique_executable() {
        let executables = vec!["custom_tool".to_string()];
        assert_eq!(complete("cust", |_| executables), Some("om_tool ".to_string()));
    }

    #[test]
    fn ambiguous_or_missing_prefix_does_not_complete() {
        let executables = vec!["echo".to_string(), "ecology".to_string()];
        assert_eq!(complete("ec", |_| executables), None);
        assert_eq!(complete("zzz", none), None);
    }

    #[test]
    fn duplicate_names_count_once() {
        let executables = vec!["pwd".to_string()];
        assert_eq!(complete("pw", |_| executables), Some("d ".to_string()));
    }

    #[test]
    fn arguments_and_empty_buffer_skip_the_path_scan() {
        let no_scan = |_: &str| -> Vec<String> { panic!("PATH scanned") };
        assert_eq!(complete("echo ec", no_scan), None);
        assert_eq!(complete("", no_scan), None);
    }
}
