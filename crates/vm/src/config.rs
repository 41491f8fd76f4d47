//! Evaluation settings.

/// Default upper bound on the dice count of a single DICE instruction.
pub const DEFAULT_MAX_DICE_COUNT: i64 = 10_000;

/// Per-evaluation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalConfig {
    /// Fixed-value mode: every die shows its maximum and the dice source
    /// is never called.
    pub fixed_dice: bool,
    /// Largest dice count a DICE instruction may request.
    pub max_dice_count: i64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            fixed_dice: false,
            max_dice_count: DEFAULT_MAX_DICE_COUNT,
        }
    }
}

impl EvalConfig {
    /// Enable or disable fixed-value mode.
    pub fn with_fixed_dice(mut self, fixed: bool) -> Self {
        self.fixed_dice = fixed;
        self
    }

    /// Override the dice count limit.
    pub fn with_max_dice_count(mut self, limit: i64) -> Self {
        self.max_dice_count = limit;
        self
    }
}
