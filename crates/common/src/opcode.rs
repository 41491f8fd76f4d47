//! Opcode definitions for the rollvm instruction set.

/// Identifies the operation to perform.
///
/// `#[repr(u8)]` keeps the byte values stable so listings and logs can
/// refer to an opcode by number.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Loads
    /// Push the instruction's integer literal.
    Number = 0x01,
    /// Replace the top integer with its negation.
    Negate = 0x02,

    // Arithmetic
    /// Pop two integers, push their sum.
    Add = 0x10,
    /// Pop two integers, push (left - right).
    Subtract = 0x11,
    /// Pop two integers, push their product.
    Multiply = 0x12,
    /// Pop two integers, push the truncated quotient. Zero divisor is an error.
    Divide = 0x13,
    /// Pop two integers, push the remainder. Zero divisor is an error.
    Modulus = 0x14,
    /// Pop two integers, push left raised to right.
    Power = 0x15,

    // Dice
    /// Replace the top integer (a side count) with one die roll.
    DiceUnary = 0x20,
    /// Pop count and sides, push the sum of `count` rolls.
    Dice = 0x21,

    // Named and templated loads
    /// Push the value of a named variable, or 0 when it is unknown.
    LoadVariable = 0x30,
    /// Consume one value per placeholder, push the filled-in template.
    LoadFormatText = 0x31,

    // Control
    /// Marker with no effect.
    Halt = 0xFE,
    /// Exchange the two top stack values.
    Swap = 0xFF,
}

/// All opcodes, in definition order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 14] = [
    Opcode::Number,
    Opcode::Negate,
    Opcode::Add,
    Opcode::Subtract,
    Opcode::Multiply,
    Opcode::Divide,
    Opcode::Modulus,
    Opcode::Power,
    Opcode::DiceUnary,
    Opcode::Dice,
    Opcode::LoadVariable,
    Opcode::LoadFormatText,
    Opcode::Halt,
    Opcode::Swap,
];

impl Opcode {
    /// Returns the listing mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Number => "NUM",
            Opcode::Negate => "NEG",
            Opcode::Add => "ADD",
            Opcode::Subtract => "SUB",
            Opcode::Multiply => "MUL",
            Opcode::Divide => "DIV",
            Opcode::Modulus => "MOD",
            Opcode::Power => "POW",
            Opcode::DiceUnary => "DICE1",
            Opcode::Dice => "DICE",
            Opcode::LoadVariable => "LDV",
            Opcode::LoadFormatText => "FMT",
            Opcode::Halt => "HALT",
            Opcode::Swap => "SWAP",
        }
    }

    /// Look up an opcode by mnemonic (case-insensitive).
    pub fn from_mnemonic(mnemonic: &str) -> Option<Opcode> {
        ALL_OPCODES
            .iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(mnemonic))
            .copied()
    }

    /// The operator symbol used in traces, if the opcode has one.
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            Opcode::Add => Some("+"),
            Opcode::Negate | Opcode::Subtract => Some("-"),
            Opcode::Multiply => Some("*"),
            Opcode::Divide => Some("/"),
            Opcode::Modulus => Some("%"),
            Opcode::Power => Some("^"),
            Opcode::Dice | Opcode::DiceUnary => Some("d"),
            Opcode::Number
            | Opcode::LoadVariable
            | Opcode::LoadFormatText
            | Opcode::Halt
            | Opcode::Swap => None,
        }
    }

    /// True for opcodes whose instruction carries a literal, name or template.
    pub fn takes_immediate(&self) -> bool {
        matches!(
            self,
            Opcode::Number | Opcode::LoadVariable | Opcode::LoadFormatText
        )
    }
}
