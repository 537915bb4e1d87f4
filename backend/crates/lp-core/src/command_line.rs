//! Command line tokenizer.
//!
//! Grammar, deliberately narrow:
//! - tokens are separated by whitespace outside quotes;
//! - `'` or `"` opens a span that only the same character closes, so the
//!   other quote character is literal inside it (`"it's"` -> `it's`);
//! - quote characters themselves are dropped, a span may join adjacent text
//!   (`--name="a b"` -> `--name=a b`);
//! - an unterminated span runs to the end of the input;
//! - there are no escapes, and empty tokens (`""`) are discarded.
//!
//! Anything richer (escapes, variables, globs, pipes) is not supported; wrap
//! the command in `sh -c '...'` for shell semantics.

/// Split `command` into program and arguments.
pub fn tokenize(command: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut open_quote: Option<char> = None;

    for ch in command.chars() {
        match open_quote {
            Some(quote) if ch == quote => open_quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => open_quote = Some(ch),
            None if ch.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            None => current.push(ch),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
