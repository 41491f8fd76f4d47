//! Parser for rollvm listing tokens into builder calls.
//!
//! Each non-blank line is exactly one builder call. `NUM` takes a bare
//! literal, `LDV` a bare or quoted name, `FMT` a quoted template, and every
//! other opcode stands alone.

use crate::error::AsmError;
use crate::lexer::Token;
use rollvm_common::{Opcode, ProgramBuilder};

/// Parse the tokens of one line and append the instruction to `builder`.
///
/// Blank lines (empty token list) append nothing. A builder error raised by
/// this line is reported with the line number.
pub(crate) fn parse_line(
    tokens: &[Token],
    line_num: usize,
    builder: &mut ProgramBuilder,
) -> Result<(), AsmError> {
    let Some(first) = tokens.first() else {
        return Ok(());
    };

    let mnemonic = match first {
        Token::Word(s) => s.as_str(),
        Token::Quoted(_) => {
            return Err(AsmError::UnexpectedToken {
                line: line_num,
                token: first.describe(),
            })
        }
    };

    let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| AsmError::UnknownOpcode {
        line: line_num,
        token: mnemonic.to_string(),
    })?;

    let args = &tokens[1..];

    match opcode {
        Opcode::Number => {
            let literal = expect_word(args, line_num, opcode)?;
            expect_end(&args[1..], line_num)?;
            builder.append_number(literal);
        }
        Opcode::LoadVariable => {
            let name = expect_text(args, line_num, opcode)?;
            expect_end(&args[1..], line_num)?;
            builder.append_variable_load(name);
        }
        Opcode::LoadFormatText => {
            let template = expect_quoted(args, line_num, opcode)?;
            expect_end(&args[1..], line_num)?;
            builder.append_format_text(template);
        }
        _ => {
            expect_end(args, line_num)?;
            builder.append_operator(opcode);
        }
    }

    match builder.error() {
        Some(err) => Err(AsmError::Build {
            line: line_num,
            source: err.clone(),
        }),
        None => Ok(()),
    }
}

/// A bare word argument.
fn expect_word<'t>(args: &'t [Token], line: usize, opcode: Opcode) -> Result<&'t str, AsmError> {
    match args.first() {
        Some(Token::Word(s)) => Ok(s),
        Some(tok) => Err(AsmError::UnexpectedToken {
            line,
            token: tok.describe(),
        }),
        None => Err(missing(line, opcode)),
    }
}

/// A double-quoted argument.
fn expect_quoted<'t>(args: &'t [Token], line: usize, opcode: Opcode) -> Result<&'t str, AsmError> {
    match args.first() {
        Some(Token::Quoted(s)) => Ok(s),
        Some(tok) => Err(AsmError::UnexpectedToken {
            line,
            token: tok.describe(),
        }),
        None => Err(missing(line, opcode)),
    }
}

/// A bare or quoted argument.
fn expect_text<'t>(args: &'t [Token], line: usize, opcode: Opcode) -> Result<&'t str, AsmError> {
    match args.first() {
        Some(Token::Word(s)) | Some(Token::Quoted(s)) => Ok(s),
        None => Err(missing(line, opcode)),
    }
}

fn missing(line: usize, opcode: Opcode) -> AsmError {
    AsmError::MissingArgument {
        line,
        opcode: opcode.mnemonic(),
    }
}

/// Check that there are no extra tokens.
fn expect_end(remaining: &[Token], line: usize) -> Result<(), AsmError> {
    if let Some(tok) = remaining.first() {
        return Err(AsmError::UnexpectedToken {
            line,
            token: tok.describe(),
        });
    }
    Ok(())
}
