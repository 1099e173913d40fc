//! A single lexical scope.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::func::FuncId;

/// One lexical block's local namespace.
///
/// Holds the names declared directly in this block and the functions
/// declared directly in this block, keyed by resolved real name. Function
/// records themselves are owned by the registry; scopes only hold ids.
///
/// Scopes are stored in a `Vec` with the innermost scope last; the bottom
/// (entry/global) scope is created with the engine and never popped.
#[derive(Debug, Default)]
pub struct Scope {
    symbols: FxHashSet<String>,
    funcs: FxHashMap<String, FuncId>,
}

impl Scope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Scope::default()
    }

    /// Declare a name directly in this scope. Idempotent.
    pub fn declare(&mut self, name: &str) {
        if !self.symbols.contains(name) {
            self.symbols.insert(name.to_owned());
        }
    }

    /// Whether `name` was declared directly in this scope.
    #[inline]
    pub fn declares(&self, name: &str) -> bool {
        self.symbols.contains(name)
    }

    /// Record a function declared directly in this scope.
    pub fn add_func(&mut self, real_name: &str, id: FuncId) {
        self.funcs.insert(real_name.to_owned(), id);
    }

    /// Exact-key lookup in this scope's function map.
    #[inline]
    pub fn func(&self, real_name: &str) -> Option<FuncId> {
        self.funcs.get(real_name).copied()
    }

    /// Iterate all function ids stored in this scope, in no defined order.
    ///
    /// Used only as the fallback path of name lookup, where every candidate
    /// is compared by its resolved real name anyway.
    pub fn func_ids(&self) -> impl Iterator<Item = FuncId> + '_ {
        self.funcs.values().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_is_idempotent() {
        let mut scope = Scope::new();
        scope.declare("x");
        scope.declare("x");
        assert!(scope.declares("x"));
        assert!(!scope.declares("y"));
    }

    #[test]
    fn func_map_overwrites_on_same_key() {
        let mut scope = Scope::new();
        scope.add_func("f", FuncId::from_raw(0));
        scope.add_func("f", FuncId::from_raw(1));
        assert_eq!(scope.func("f"), Some(FuncId::from_raw(1)));
        assert_eq!(scope.func_ids().count(), 1);
    }
}
