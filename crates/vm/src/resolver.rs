//! Variable lookup for LDV instructions.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Resolves a variable name to an integer.
///
/// Whatever context the lookup needs (the player, the group, a character
/// sheet) is captured by the implementing value. `None` means the name is
/// unknown; the evaluator then uses 0.
pub trait VariableResolver {
    /// Look up `name`.
    fn resolve(&self, name: &str) -> Option<i64>;
}

/// A resolver that knows no variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVariables;

impl VariableResolver for NoVariables {
    fn resolve(&self, _name: &str) -> Option<i64> {
        None
    }
}

impl<S: BuildHasher> VariableResolver for HashMap<String, i64, S> {
    fn resolve(&self, name: &str) -> Option<i64> {
        self.get(name).copied()
    }
}

impl VariableResolver for BTreeMap<String, i64> {
    fn resolve(&self, name: &str) -> Option<i64> {
        self.get(name).copied()
    }
}
