//! Function records and the unit-wide function registry.
//!
//! The registry owns every function record for the lifetime of the
//! compilation unit. Scopes and the lambda-recovery path hold only
//! [`FuncId`]s or resolved real names into it.

use std::fmt;

use rill_diagnostic::SemanticRecorder;
use rill_ir::Token;
use rustc_hash::FxHashMap;

/// Index of a function record in the registry's owning arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct FuncId(u32);

impl FuncId {
    /// Create from a raw arena index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        FuncId(raw)
    }

    /// Raw arena index.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Semantic analysis entry point for function bodies.
///
/// Implemented by the semantic-analysis pass on whatever body type the
/// parser produces; the scope engine only forwards each body to it during
/// [`check`](crate::ScopeManager::check), together with the shared
/// recorder.
pub trait Analyze {
    fn analyze(&self, recorder: &mut SemanticRecorder);
}

/// A function declaration.
///
/// `name` is the token written in the source: a real identifier, or an
/// anonymous marker for lambdas. `real_name` is the resolved lookup key —
/// the identifier's text, or a generated lambda name — set by the engine
/// at registration and used for every lookup afterwards.
#[derive(Debug)]
pub struct Function<B> {
    name: Token,
    real_name: Option<String>,
    body: B,
}

impl<B> Function<B> {
    /// Create an unregistered function from its name token and body.
    pub fn new(name: Token, body: B) -> Self {
        Function {
            name,
            real_name: None,
            body,
        }
    }

    /// The name token as written in the source.
    #[inline]
    pub fn name(&self) -> &Token {
        &self.name
    }

    pub(crate) fn name_mut(&mut self) -> &mut Token {
        &mut self.name
    }

    /// The resolved lookup key, once registered.
    #[inline]
    pub fn real_name(&self) -> Option<&str> {
        self.real_name.as_deref()
    }

    pub(crate) fn set_real_name(&mut self, real_name: String) {
        self.real_name = Some(real_name);
    }

    /// Line the declaration appeared on.
    #[inline]
    pub fn decl_line(&self) -> u32 {
        self.name.pos.line
    }

    /// The function body, analyzed later by the semantic pass.
    #[inline]
    pub fn body(&self) -> &B {
        &self.body
    }
}

impl<B: fmt::Display> fmt::Display for Function<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.real_name {
            Some(real_name) => writeln!(f, "func {}", real_name)?,
            None => writeln!(f, "func <unregistered>")?,
        }
        write!(f, "{}", self.body)
    }
}

/// Unit-wide function registry: an owning arena plus an insertion-ordered
/// map from real name to the ordered list of definitions under that name.
///
/// Multiple definitions may accumulate under one key; each list keeps
/// registration order and is never reordered, so iteration (and therefore
/// `check`'s diagnostic output) is deterministic across runs.
#[derive(Debug)]
pub struct FuncRegistry<B> {
    /// All function records, owned here for the lifetime of the unit.
    arena: Vec<Function<B>>,
    /// Real name and its definitions, in first-registration order.
    entries: Vec<(String, Vec<FuncId>)>,
    /// Reverse map from real name to index in `entries`.
    index: FxHashMap<String, usize>,
}

impl<B> FuncRegistry<B> {
    /// Create an empty registry.
    pub fn new() -> Self {
        FuncRegistry {
            arena: Vec::new(),
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Take ownership of `func` and append it under `key`.
    ///
    /// A new key gets a fresh one-element list; an existing key's list
    /// grows at the tail. Existing definitions are never replaced.
    pub fn append(&mut self, key: &str, func: Function<B>) -> FuncId {
        let id = FuncId::from_raw(self.arena.len() as u32);
        self.arena.push(func);
        match self.index.get(key) {
            Some(&slot) => self.entries[slot].1.push(id),
            None => {
                self.index.insert(key.to_owned(), self.entries.len());
                self.entries.push((key.to_owned(), vec![id]));
            }
        }
        id
    }

    /// The ordered definition list under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&[FuncId]> {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1.as_slice())
    }

    /// First-registered definition under `key`, if any.
    pub fn first(&self, key: &str) -> Option<FuncId> {
        self.get(key).and_then(|ids| ids.first().copied())
    }

    /// Whether at least one definition is registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some_and(|ids| !ids.is_empty())
    }

    /// The record behind `id`, if the id is valid.
    #[inline]
    pub fn func(&self, id: FuncId) -> Option<&Function<B>> {
        self.arena.get(id.raw() as usize)
    }

    /// Iterate `(key, definitions)` in first-registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FuncId])> {
        self.entries
            .iter()
            .map(|(key, ids)| (key.as_str(), ids.as_slice()))
    }

    /// Total number of registered function records.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether no function has been registered.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }
}

impl<B> Default for FuncRegistry<B> {
    fn default() -> Self {
        FuncRegistry::new()
    }
}
