//! Disassembler: program to canonical listing text.
//!
//! Output format is flat text, one instruction per line. No indentation,
//! no comments, no blank lines. Literals print in decimal, `FMT` templates
//! are always quoted, and `LDV` names are quoted only when a bare word
//! would not read back the same.

use rollvm_common::{Opcode, Program};

/// Disassemble a program into canonical listing text.
pub fn disassemble(program: &Program) -> String {
    let mut result = String::new();

    for instr in program.instructions() {
        let mnemonic = instr.opcode().mnemonic();
        let line = match instr.opcode() {
            Opcode::Number => format!("{mnemonic} {}", instr.literal()),
            Opcode::LoadVariable => {
                let name = instr.text();
                if needs_quotes(name) {
                    format!("{mnemonic} {}", quote(name))
                } else {
                    format!("{mnemonic} {name}")
                }
            }
            Opcode::LoadFormatText => format!("{mnemonic} {}", quote(instr.text())),
            _ => mnemonic.to_string(),
        };

        result.push_str(&line);
        result.push('\n');
    }

    result
}

fn needs_quotes(name: &str) -> bool {
    name.is_empty()
        || name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, ';' | '"' | '\\'))
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
