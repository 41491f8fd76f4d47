//! Tokenizer for rollvm listing text.

use crate::error::AsmError;

/// A single token from a listing line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// A bare run of non-space characters (mnemonic, literal, name).
    Word(String),
    /// The unescaped contents of a double-quoted string.
    Quoted(String),
}

impl Token {
    /// The token as it would appear in an error message.
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::Word(s) => s.clone(),
            Token::Quoted(s) => format!("\"{s}\""),
        }
    }
}

/// Tokenize a single line of listing text.
///
/// Returns an empty Vec for blank lines and comment-only lines.
/// Comments start with `;` outside a quoted string and extend to end of line.
pub(crate) fn tokenize_line(line: &str, line_num: usize) -> Result<Vec<Token>, AsmError> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == ';' {
            break;
        } else if c == '"' {
            chars.next();
            let mut text = String::new();
            let mut closed = false;
            while let Some(c) = chars.next() {
                match c {
                    '"' => {
                        closed = true;
                        break;
                    }
                    '\\' => match chars.next() {
                        Some('n') => text.push('\n'),
                        Some('r') => text.push('\r'),
                        Some(other) => {
                            if other != '"' && other != '\\' {
                                text.push('\\');
                            }
                            text.push(other);
                        }
                        None => break,
                    },
                    _ => text.push(c),
                }
            }
            if !closed {
                return Err(AsmError::UnterminatedString { line: line_num });
            }
            tokens.push(Token::Quoted(text));
        } else {
            let mut word = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() || c == ';' || c == '"' {
                    break;
                }
                word.push(c);
                chars.next();
            }
            tokens.push(Token::Word(word));
        }
    }

    Ok(tokens)
}
