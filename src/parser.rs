/// Quoting context the tokenizer is currently in.
///
/// Escape handling is tracked separately: a pending backslash can coexist
/// with `Normal` or `InDoubleQuote`, never with `InSingleQuote`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Normal,
    InSingleQuote,
    InDoubleQuote,
}

/// Splits an input line into shell words.
///
/// This tokenizer handles:
/// - Single quotes (`'...'`): Preserves literal contents, backslashes included.
/// - Double quotes (`"..."`): Preserves contents; a backslash only escapes `\`, `$` and `"`.
/// - Unquoted text: Split on spaces; a backslash escapes any following character.
///
/// Adjacent quoted and unquoted segments join into one word, and a quoted empty
/// string (`''`) is a word of its own. Unterminated quotes are not an error: the
/// rest of the line is read as quoted and the partial word is kept.
///
/// # Example
/// ```
/// use lineshell::tokenize;
///
/// let args = tokenize("echo 'hello world'");
/// assert_eq!(args, vec!["echo", "hello world"]);
/// ```
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut state = LexState::Normal;
    let mut escape_pending = false;

    for c in input.chars() {
        if escape_pending {
            escape_pending = false;
            if state == LexState::InDoubleQuote && !matches!(c, '\\' | '$' | '"') {
                current.push('\\');
            }
            current.push(c);
            in_word = true;
            continue;
        }

        match (state, c) {
            (LexState::InSingleQuote, '\'') => state = LexState::Normal,
            (LexState::InSingleQuote, _) => current.push(c),
            (LexState::InDoubleQuote, '"') => state = LexState::Normal,
            (LexState::InDoubleQuote, '\\') => escape_pending = true,
            (LexState::InDoubleQuote, _) => current.push(c),
            (LexState::Normal, '\'') => {
                state = LexState::InSingleQuote;
                in_word = true;
            }
            (LexState::Normal, '"') => {
                state = LexState::InDoubleQuote;
                in_word = true;
            }
            (LexState::Normal, '\\') => escape_pending = true,
            (LexState::Normal, ' ') => {
                if in_word {
                    tokens.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (LexState::Normal, _) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if in_word {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_plain_words() {
        assert_eq!(tokenize("echo a b c"), vec!["echo", "a", "b", "c"]);
    }

    #[test]
    fn collapses_repeated_spaces() {
        assert_eq!(tokenize("  echo   a    b  "), vec!["echo", "a", "b"]);
    }

    #[test]
    fn empty_and_blank_lines_have_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("    ").is_empty());
    }

    #[test]
    fn single_quotes_join_with_trailing_text() {
        assert_eq!(tokenize("echo 'a b'c"), vec!["echo", "a bc"]);
    }

    #[test]
    fn mixed_quotes_concatenate() {
        assert_eq!(tokenize(r#"echo 'a'"b"c"#), vec!["echo", "abc"]);
        assert_eq!(tokenize("echo a''b"), vec!["echo", "ab"]);
    }

    #[test]
    fn single_quotes_keep_backslashes() {
        assert_eq!(tokenize(r"echo 'a\b'"), vec!["echo", r"a\b"]);
        assert_eq!(tokenize(r"echo 'a\'"), vec!["echo", r"a\"]);
    }

    #[test]
    fn single_quotes_keep_double_quotes() {
        assert_eq!(tokenize(r#"echo 'say "hi"'"#), vec!["echo", r#"say "hi""#]);
    }

    #[test]
    fn double_quotes_keep_single_quotes() {
        assert_eq!(tokenize(r#"echo "it's""#), vec!["echo", "it's"]);
    }

    #[test]
    fn double_quotes_escape_dollar_quote_and_backslash() {
        assert_eq!(tokenize(r#"echo "a\$b""#), vec!["echo", "a$b"]);
        assert_eq!(tokenize(r#"echo "a\"b""#), vec!["echo", r#"a"b"#]);
        assert_eq!(tokenize(r#"echo "a\\b""#), vec!["echo", r"a\b"]);
    }

    #[test]
    fn double_quotes_preserve_other_backslashes() {
        assert_eq!(tokenize(r#"echo "a\nb""#), vec!["echo", r"a\nb"]);
        assert_eq!(tokenize(r#"echo "a\'b""#), vec!["echo", r"a\'b"]);
    }

    #[test]
    fn double_quotes_keep_spaces() {
        assert_eq!(tokenize(r#"echo "a   b""#), vec!["echo", "a   b"]);
    }

    #[test]
    fn unquoted_backslash_escapes_anything() {
        assert_eq!(tokenize(r"echo a\ b"), vec!["echo", "a b"]);
        assert_eq!(tokenize(r"echo \n\'\\"), vec!["echo", r"n'\"]);
        assert_eq!(tokenize(r#"echo \"x\""#), vec!["echo", r#""x""#]);
    }

    #[test]
    fn trailing_backslash_is_dropped() {
        assert_eq!(tokenize(r"echo a\"), vec!["echo", "a"]);
        assert_eq!(tokenize(r"echo \"), vec!["echo"]);
    }

    #[test]
    fn unterminated_quotes_keep_partial_word() {
        assert_eq!(tokenize("echo 'a b"), vec!["echo", "a b"]);
        assert_eq!(tokenize(r#"echo "a 'b"#), vec!["echo", "a 'b"]);
    }

    #[test]
    fn empty_quotes_form_a_word() {
        assert_eq!(tokenize("echo '' x"), vec!["echo", "", "x"]);
        assert_eq!(tokenize(r#"echo """#), vec!["echo", ""]);
    }

    #[test]
    fn tabs_are_not_separators() {
        assert_eq!(tokenize("echo a\tb"), vec!["echo", "a\tb"]);
    }

    #[test]
    fn rejoined_tokens_tokenize_to_themselves() {
        let tokens = tokenize(r#"cat "/tmp/a"  'b'c   d\e"#);
        assert_eq!(tokens, vec!["cat", "/tmp/a", "bc", "de"]);
        assert_eq!(tokenize(&tokens.join(" ")), tokens);
    }
}
