//! Instructions and format-template placeholders.
//!
//! An instruction is an opcode plus whichever immediate it needs:
//! ```text
//! NUM   literal       integer immediate
//! LDV   name          text immediate
//! FMT   template      text immediate + placeholder list
//! other               no immediate
//! ```
//! Instructions are built once by the builder and never mutated.

use crate::opcode::Opcode;

/// One brace-delimited scan hit inside a format template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The matched text, braces included (e.g. `{str}`).
    pub text: String,
    /// Byte offset of the opening brace.
    pub start: usize,
    /// Byte offset one past the closing brace.
    pub end: usize,
}

/// Scan a template for placeholders, left to right.
///
/// A placeholder runs from a `{` to the next `}`. Hits never overlap and
/// duplicates are kept as separate entries.
pub fn scan_placeholders(template: &str) -> Vec<Placeholder> {
    let mut found = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = template[cursor..].find('{') {
        let start = cursor + offset;
        let Some(close) = template[start + 1..].find('}') else {
            break;
        };
        let end = start + 1 + close + 1;
        found.push(Placeholder {
            text: template[start..end].to_string(),
            start,
            end,
        });
        cursor = end;
    }

    found
}

/// A single rollvm instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    opcode: Opcode,
    literal: i64,
    text: String,
    placeholders: Vec<Placeholder>,
}

impl Instruction {
    /// An instruction with no immediate.
    pub fn operator(opcode: Opcode) -> Self {
        Self {
            opcode,
            literal: 0,
            text: String::new(),
            placeholders: Vec::new(),
        }
    }

    /// `NUM literal`.
    pub fn number(literal: i64) -> Self {
        Self {
            literal,
            ..Self::operator(Opcode::Number)
        }
    }

    /// `LDV name`.
    pub fn load_variable(name: impl Into<String>) -> Self {
        Self {
            text: name.into(),
            ..Self::operator(Opcode::LoadVariable)
        }
    }

    /// `FMT template`, with its placeholders scanned up front.
    pub fn format_text(template: impl Into<String>) -> Self {
        let text = template.into();
        let placeholders = scan_placeholders(&text);
        Self {
            text,
            placeholders,
            ..Self::operator(Opcode::LoadFormatText)
        }
    }

    /// The operation to perform.
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Integer immediate. Zero for everything except `NUM`.
    pub fn literal(&self) -> i64 {
        self.literal
    }

    /// Text immediate: the variable name or the template. Empty otherwise.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Placeholders recorded for a `FMT` template.
    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    /// Substitute `values` into the template, the k-th value at the k-th
    /// placeholder. Placeholders without a value are left untouched.
    pub fn fill_template(&self, values: &[i64]) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut cursor = 0;

        for (placeholder, value) in self.placeholders.iter().zip(values) {
            out.push_str(&self.text[cursor..placeholder.start]);
            out.push_str(&value.to_string());
            cursor = placeholder.end;
        }

        out.push_str(&self.text[cursor..]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits(template: &str) -> Vec<String> {
        scan_placeholders(template)
            .into_iter()
            .map(|p| p.text)
            .collect()
    }

    #[test]
    fn scan_no_placeholders() {
        assert!(scan_placeholders("plain text").is_empty());
        assert!(scan_placeholders("").is_empty());
    }

    #[test]
    fn scan_keeps_duplicates_in_order() {
        assert_eq!(hits("{a}+{a}=?"), vec!["{a}", "{a}"]);
    }

    #[test]
    fn scan_records_byte_offsets() {
        let found = scan_placeholders("x{b}y");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start, 1);
        assert_eq!(found[0].end, 4);
    }

    #[test]
    fn scan_stops_at_first_closing_brace() {
        assert_eq!(hits("{{a}}"), vec!["{{a}"]);
        assert_eq!(hits("{a{b}c}"), vec!["{a{b}"]);
    }

    #[test]
    fn scan_ignores_unterminated_brace() {
        assert_eq!(hits("{a} and {b"), vec!["{a}"]);
    }

    #[test]
    fn scan_empty_braces() {
        assert_eq!(hits("{}-{}"), vec!["{}", "{}"]);
    }

    #[test]
    fn scan_handles_multibyte_text() {
        assert_eq!(hits("力量{str}，敏捷{dex}"), vec!["{str}", "{dex}"]);
    }

    #[test]
    fn fill_substitutes_each_occurrence_once() {
        let instr = Instruction::format_text("{a}+{a}=?");
        assert_eq!(instr.fill_template(&[3, 4]), "3+4=?");
    }

    #[test]
    fn fill_distinct_placeholders() {
        let instr = Instruction::format_text("hp {hp}/{max}");
        assert_eq!(instr.fill_template(&[7, -2]), "hp 7/-2");
    }

    #[test]
    fn fill_multibyte_template() {
        let instr = Instruction::format_text("力量{str}，敏捷{dex}");
        assert_eq!(instr.fill_template(&[60, 55]), "力量60，敏捷55");
    }

    #[test]
    fn fill_without_placeholders_returns_template() {
        let instr = Instruction::format_text("nothing to do");
        assert_eq!(instr.fill_template(&[]), "nothing to do");
    }

    #[test]
    fn constructors_set_immediates() {
        let num = Instruction::number(-5);
        assert_eq!(num.opcode(), Opcode::Number);
        assert_eq!(num.literal(), -5);

        let ldv = Instruction::load_variable("str");
        assert_eq!(ldv.opcode(), Opcode::LoadVariable);
        assert_eq!(ldv.text(), "str");
        assert!(ldv.placeholders().is_empty());

        let add = Instruction::operator(Opcode::Add);
        assert_eq!(add.literal(), 0);
        assert_eq!(add.text(), "");
    }
}
