//! Deduplicated, insertion-ordered symbol table.
//!
//! Every distinct name declared anywhere in a translation unit lands here
//! exactly once, addressable by index in first-insertion order. Scopes
//! reference names by value; this table is the unit-wide registry behind
//! them.

use rustc_hash::FxHashMap;

/// Insertion-ordered registry of distinct names.
///
/// O(1) membership and index lookup via a reverse map, O(1) indexed access
/// via the backing vector. Re-inserting an existing name is a no-op.
#[derive(Debug, Default)]
pub struct SymbolTable {
    /// Names in first-insertion order.
    names: Vec<String>,
    /// Reverse map from name to its index in `names`.
    index: FxHashMap<String, u32>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// Insert a name, returning `true` if it was not already present.
    ///
    /// Duplicates are ignored; the first-seen index is kept.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.index.contains_key(name) {
            return false;
        }
        let idx = self.names.len() as u32;
        self.names.push(name.to_owned());
        self.index.insert(name.to_owned(), idx);
        true
    }

    /// Whether the table contains `name`.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Index assigned to `name` at first insertion, if present.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<u32> {
        self.index.get(name).copied()
    }

    /// Name stored at `index`, if in range.
    #[inline]
    pub fn get(&self, index: u32) -> Option<&str> {
        self.names.get(index as usize).map(String::as_str)
    }

    /// Number of distinct names.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate names in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
