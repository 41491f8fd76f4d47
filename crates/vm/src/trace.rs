//! Explanatory trace for the outermost fold of an expression.
//!
//! Only binary operators whose left operand sits at the bottom of the stack
//! write trace text. Everything nested deeper shows up as details
//! (`3d100=214`, `str=60`) that wait in a queue, tagged with the stack
//! slot whose value they explain, until a trace segment for that slot is
//! written.

use rollvm_common::Opcode;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Detail {
    slot: usize,
    text: String,
}

/// Per-evaluation trace state.
#[derive(Debug, Clone, Default)]
pub struct TraceBuilder {
    text: String,
    operations: usize,
    provisional: bool,
    pending: Vec<Detail>,
}

impl TraceBuilder {
    /// An empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a detail explaining the value in `slot`.
    pub(crate) fn note(&mut self, slot: usize, text: impl Into<String>) {
        self.pending.push(Detail {
            slot,
            text: text.into(),
        });
    }

    /// Record a binary operator about to combine `left` (in `slot`) with
    /// `right` (in `slot + 1`).
    pub(crate) fn record(&mut self, opcode: Opcode, slot: usize, left: i64, right: i64) {
        self.operations += 1;
        if slot != 0 {
            return;
        }

        let symbol = opcode.symbol().unwrap_or("?");
        if self.operations == 1 {
            self.text = format!("{left} {symbol} {right}");
        } else if self.text.is_empty() || self.provisional {
            let left_details = self.drain(0);
            let right_details = self.drain(1);
            self.text = format!("{left}{left_details} {symbol} {right}{right_details}");
        } else {
            let right_details = self.drain(1);
            let _ = write!(self.text, " {symbol} {right}{right_details}");
        }

        // A bare `3 d 100` is replaced once its sum feeds another operator.
        self.provisional = self.operations == 1 && opcode == Opcode::Dice;
    }

    /// Move details of slots above `slot` onto `slot`, after the values in
    /// those slots were consumed into it.
    pub(crate) fn fold_into(&mut self, slot: usize) {
        for detail in &mut self.pending {
            if detail.slot > slot {
                detail.slot = slot;
            }
        }
    }

    /// Exchange the details of two slots.
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        for detail in &mut self.pending {
            if detail.slot == a {
                detail.slot = b;
            } else if detail.slot == b {
                detail.slot = a;
            }
        }
    }

    /// The trace written so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Details not yet attached to the trace, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(|d| d.text.as_str())
    }

    /// Split into the trace text and the leftover details.
    pub fn into_parts(self) -> (String, Vec<String>) {
        let details = self.pending.into_iter().map(|d| d.text).collect();
        (self.text, details)
    }

    fn drain(&mut self, slot: usize) -> String {
        let mut taken = Vec::new();
        self.pending.retain(|detail| {
            if detail.slot == slot {
                taken.push(detail.text.clone());
                false
            } else {
                true
            }
        });

        if taken.is_empty() {
            String::new()
        } else {
            format!("[{}]", taken.join(","))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_operator_writes_bare_segment() {
        let mut trace = TraceBuilder::new();
        trace.note(0, "str=60");
        trace.record(Opcode::Add, 0, 60, 5);
        assert_eq!(trace.text(), "60 + 5");
        assert_eq!(trace.pending().collect::<Vec<_>>(), vec!["str=60"]);
    }

    #[test]
    fn later_operators_append_right_side() {
        let mut trace = TraceBuilder::new();
        trace.record(Opcode::Add, 0, 3, 4);
        trace.note(1, "d6=2");
        trace.record(Opcode::Multiply, 0, 7, 2);
        assert_eq!(trace.text(), "3 + 4 * 2[d6=2]");
        assert_eq!(trace.pending().count(), 0);
    }

    #[test]
    fn nested_operators_leave_no_text() {
        let mut trace = TraceBuilder::new();
        trace.record(Opcode::Multiply, 1, 2, 3);
        assert_eq!(trace.text(), "");
    }

    #[test]
    fn first_qualifying_after_nested_includes_details_on_both_sides() {
        let mut trace = TraceBuilder::new();
        trace.note(0, "str=60");
        trace.record(Opcode::Dice, 1, 1, 6);
        trace.fold_into(1);
        trace.note(1, "1d6=4");
        trace.record(Opcode::Add, 0, 60, 4);
        assert_eq!(trace.text(), "60[str=60] + 4[1d6=4]");
    }

    #[test]
    fn provisional_dice_segment_is_rewritten() {
        let mut trace = TraceBuilder::new();
        trace.record(Opcode::Dice, 0, 1, 20);
        assert_eq!(trace.text(), "1 d 20");
        trace.fold_into(0);
        trace.note(0, "1d20=13");
        trace.record(Opcode::Add, 0, 13, 5);
        assert_eq!(trace.text(), "13[1d20=13] + 5");
    }

    #[test]
    fn provisional_segment_survives_without_follow_up() {
        let mut trace = TraceBuilder::new();
        trace.record(Opcode::Dice, 0, 3, 100);
        trace.note(0, "3d100=300");
        let (text, details) = trace.into_parts();
        assert_eq!(text, "3 d 100");
        assert_eq!(details, vec!["3d100=300"]);
    }

    #[test]
    fn multiple_details_are_comma_joined() {
        let mut trace = TraceBuilder::new();
        trace.record(Opcode::Add, 1, 0, 0);
        trace.note(0, "a=1");
        trace.note(0, "b=2");
        trace.record(Opcode::Subtract, 0, 3, 1);
        assert_eq!(trace.text(), "3[a=1,b=2] - 1");
    }

    #[test]
    fn fold_moves_details_down() {
        let mut trace = TraceBuilder::new();
        trace.note(2, "x=1");
        trace.note(3, "y=2");
        trace.note(0, "z=3");
        trace.fold_into(1);
        let (_, details) = trace.clone().into_parts();
        assert_eq!(details, vec!["x=1", "y=2", "z=3"]);
        assert_eq!(trace.drain(1), "[x=1,y=2]");
        assert_eq!(trace.drain(0), "[z=3]");
    }

    #[test]
    fn swap_exchanges_slots() {
        let mut trace = TraceBuilder::new();
        trace.note(0, "a=1");
        trace.note(1, "b=2");
        trace.swap(0, 1);
        assert_eq!(trace.drain(0), "[b=2]");
        assert_eq!(trace.drain(1), "[a=1]");
    }
}
