//! The scope-and-symbol engine driven by the parser's semantic actions.
//!
//! One [`ScopeManager`] is created per translation unit and owned
//! exclusively by it. The parser calls scope enter/leave at every lexical
//! block boundary, the register operations at every declaration, the find
//! operations at every name reference, and the block operations around
//! loop/function/generator constructs. After parsing, [`check`] walks the
//! function registry and forwards every body to the semantic pass.
//!
//! Everything here is synchronous and single-threaded; no call suspends
//! or blocks.
//!
//! [`check`]: ScopeManager::check

use std::fmt;

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use rill_diagnostic::SemanticRecorder;
use rill_ir::{Token, TokenKind};

use crate::block::BlockContext;
use crate::func::{Analyze, FuncId, FuncRegistry, Function};
use crate::lambda::{is_lambda_name, lambda_name, LambdaAllocator, PendingLambda};
use crate::scope::Scope;
use crate::symbols::SymbolTable;
use crate::{BlockKind, ScopeError};

/// Name of the synthetic entry function every unit starts with.
pub const ENTRY_NAME: &str = "main";

/// External name-classification predicate.
///
/// Decides whether a bare, otherwise-undeclared name should be treated as
/// an implicitly available external/builtin symbol. The engine consults it
/// at most once per name: a successful probe auto-registers the name, so
/// later lookups hit the scope stack directly.
pub trait NameClassifier {
    fn is_external_name(&self, name: &str) -> bool;
}

impl<F> NameClassifier for F
where
    F: Fn(&str) -> bool,
{
    fn is_external_name(&self, name: &str) -> bool {
        self(name)
    }
}

/// Classifier that recognizes no external names.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoExternalNames;

impl NameClassifier for NoExternalNames {
    fn is_external_name(&self, _name: &str) -> bool {
        false
    }
}

/// Scope, symbol, function, and block-context state for one translation
/// unit.
///
/// `B` is the function-body type produced by the parser; the engine never
/// looks inside it except to forward it to [`Analyze`] during `check`.
pub struct ScopeManager<B> {
    /// Unit-wide deduplicated name registry, in first-insertion order.
    symbols: SymbolTable,
    /// Lexical scope stack; last element is the innermost scope. The
    /// bottom (entry) scope is created in `new` and never popped.
    scopes: Vec<Scope>,
    /// Names referenced before the scope that will own them exists.
    /// Flushed into the next pushed scope.
    future: FxHashSet<String>,
    /// Owner of every function record in the unit.
    registry: FuncRegistry<B>,
    lambdas: LambdaAllocator,
    blocks: BlockContext,
    classifier: Box<dyn NameClassifier>,
}

impl<B: Default> ScopeManager<B> {
    /// Create the engine for one translation unit.
    ///
    /// Pushes the entry scope and pre-registers the synthetic `main`
    /// function (registry only; it belongs to no scope's function map).
    pub fn new(classifier: impl NameClassifier + 'static) -> Self {
        let mut manager = ScopeManager {
            symbols: SymbolTable::new(),
            scopes: Vec::new(),
            future: FxHashSet::default(),
            registry: FuncRegistry::new(),
            lambdas: LambdaAllocator::new(),
            blocks: BlockContext::new(),
            classifier: Box::new(classifier),
        };
        manager.enter_scope();
        let mut entry = Function::new(Self::entry_token(), B::default());
        entry.set_real_name(ENTRY_NAME.to_owned());
        manager.registry.append(ENTRY_NAME, entry);
        manager
    }
}

impl<B: Default> Default for ScopeManager<B> {
    fn default() -> Self {
        ScopeManager::new(NoExternalNames)
    }
}

impl<B> ScopeManager<B> {
    // === Scope lifecycle ===

    /// Enter a new lexical scope.
    ///
    /// Every name buffered as a forward declaration becomes a direct
    /// member of the new scope; the buffer is empty afterwards.
    pub fn enter_scope(&mut self) {
        self.scopes.push(Scope::new());
        trace!(depth = self.scopes.len(), "enter scope");
        let buffered: Vec<String> = self.future.drain().collect();
        for name in &buffered {
            self.register_symbol(name);
        }
    }

    /// Leave the innermost lexical scope.
    ///
    /// The bottom (entry) scope is never popped. The forward-declaration
    /// buffer is cleared so stale forward references cannot leak into an
    /// unrelated block.
    pub fn leave_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
        self.clear_future_symbols();
        trace!(depth = self.scopes.len(), "leave scope");
    }

    /// Current scope-stack depth. At least 1.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    // === Declaration ===

    /// Declare `name` in the innermost scope and the unit-wide symbol
    /// table. Idempotent; returns `true` if the name was new to the unit.
    pub fn register_symbol(&mut self, name: &str) -> bool {
        if let Some(scope) = self.scopes.last_mut() {
            scope.declare(name);
        }
        let newly_added = self.symbols.insert(name);
        if newly_added {
            trace!(name, "register symbol");
        }
        newly_added
    }

    /// Buffer `name` as a forward declaration for the next scope pushed.
    ///
    /// Returns `true` if the name was not already buffered, so callers can
    /// detect repeated forward references to the same name.
    pub fn register_future_symbol(&mut self, name: &str) -> bool {
        self.future.insert(name.to_owned())
    }

    /// Drop every buffered forward declaration.
    pub fn clear_future_symbols(&mut self) {
        self.future.clear();
    }

    /// Register a function declaration.
    ///
    /// A genuine identifier name becomes the real name and is added to the
    /// unit-wide symbol table; an anonymous marker gets a generated
    /// `~lambda#<id>` name from the shared id counter. The record is
    /// appended to the registry and keyed into the innermost scope's
    /// function map.
    pub fn register_func(&mut self, mut func: Function<B>) -> FuncId {
        let real_name = if func.name().is_identifier() {
            let text = func.name().text.clone();
            self.symbols.insert(&text);
            text
        } else {
            lambda_name(self.lambdas.alloc_id())
        };
        func.set_real_name(real_name.clone());
        debug!(name = %real_name, "register function");
        let id = self.registry.append(&real_name, func);
        if let Some(scope) = self.scopes.last_mut() {
            scope.add_func(&real_name, id);
        }
        id
    }

    /// Register a lambda that will be recovered later by a different
    /// grammar action.
    ///
    /// Pushes the allocated id and the declaration line onto the pending
    /// stack, resolves the name token to an identifier so downstream code
    /// treats named and anonymous functions uniformly, and stores the
    /// record under the line-aware generated name.
    pub fn register_lambda(&mut self, mut func: Function<B>) -> FuncId {
        let pending = PendingLambda {
            id: self.lambdas.alloc_id(),
            line: func.decl_line(),
        };
        self.lambdas.push_pending(pending);
        func.name_mut().kind = TokenKind::Identifier;
        let real_name = pending.key();
        func.set_real_name(real_name.clone());
        debug!(name = %real_name, line = pending.line, "register lambda");
        let id = self.registry.append(&real_name, func);
        if let Some(scope) = self.scopes.last_mut() {
            scope.add_func(&real_name, id);
        }
        id
    }

    // === Lookup / query ===

    /// Whether `name` is visible here: buffered as a forward declaration,
    /// declared in any scope from innermost to outermost, or recognized by
    /// the external classifier.
    ///
    /// A classifier hit registers the name as a side effect, so the
    /// classifier is consulted at most once per name.
    pub fn find_declared_symbol(&mut self, name: &str) -> bool {
        if self.future.contains(name) {
            return true;
        }
        if self.scopes.iter().any(|scope| scope.declares(name)) {
            return true;
        }
        if self.classifier.is_external_name(name) {
            debug!(name, "auto-register external name");
            self.register_symbol(name);
            return true;
        }
        false
    }

    /// Whether `name` is buffered or declared directly in the innermost
    /// scope. No outward search.
    pub fn find_declared_symbol_direct(&self, name: &str) -> bool {
        self.future.contains(name) || self.innermost_declares(name)
    }

    /// Whether `name` is already declared directly in the innermost
    /// scope. Used by duplicate-declaration diagnostics.
    pub fn is_unique_symbol_of_block(&self, name: &str) -> bool {
        self.innermost_declares(name)
    }

    fn innermost_declares(&self, name: &str) -> bool {
        self.scopes.last().is_some_and(|scope| scope.declares(name))
    }

    /// Find a function by real name, scanning scopes innermost to
    /// outermost.
    ///
    /// Within each scope: exact key match in the scope's function map
    /// first, then a linear pass comparing every stored record's resolved
    /// real name, covering keys that diverged from their record's name.
    pub fn func_by_name(&self, name: &str) -> Option<&Function<B>> {
        for scope in self.scopes.iter().rev() {
            if let Some(id) = scope.func(name) {
                if let Some(func) = self.registry.func(id) {
                    return Some(func);
                }
            }
            for id in scope.func_ids() {
                if let Some(func) = self.registry.func(id) {
                    if func.real_name() == Some(name) {
                        return Some(func);
                    }
                }
            }
        }
        None
    }

    /// Recover the most recently registered unresolved lambda.
    ///
    /// Registration and recovery must nest; calling this with nothing
    /// pending means the grammar drove the engine out of stack order, and
    /// the compilation must abort.
    pub fn take_lambda(&mut self) -> Result<&Function<B>, ScopeError> {
        let pending = self
            .lambdas
            .pop_pending()
            .ok_or(ScopeError::LambdaUnderflow)?;
        let key = pending.key();
        trace!(key = %key, "recover lambda");
        let id = self
            .registry
            .first(&key)
            .ok_or_else(|| ScopeError::MissingLambda(key.clone()))?;
        self.registry.func(id).ok_or(ScopeError::MissingLambda(key))
    }

    /// Whether at least one function is registered under `name`.
    pub fn is_registered_func(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    // === Block context ===

    /// Enter a block of `kind`.
    pub fn enter_block(&mut self, kind: BlockKind) {
        self.blocks.enter(kind);
    }

    /// Leave a block of `kind`. Mismatched exclusive leaves are silently
    /// ignored; see [`crate::block`].
    pub fn leave_block(&mut self, kind: BlockKind) {
        self.blocks.leave(kind);
    }

    /// Whether the current parse position is lexically inside a block of
    /// `kind`.
    pub fn is_in_block(&self, kind: BlockKind) -> bool {
        self.blocks.is_in(kind)
    }

    // === Entry function ===

    /// Name of the synthetic entry function.
    pub fn entry_name() -> &'static str {
        ENTRY_NAME
    }

    /// Synthesized identifier token for the entry function.
    pub fn entry_token() -> Token {
        Token::synthesized(TokenKind::Identifier, ENTRY_NAME)
    }

    // === Tables ===

    /// The unit-wide symbol table.
    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbols
    }

    /// The unit-wide function registry.
    pub fn func_registry(&self) -> &FuncRegistry<B> {
        &self.registry
    }

    // === Semantic check ===

    /// Run the semantic pass over every registered function body.
    ///
    /// Visits registry keys in first-registration order and each key's
    /// definitions in registration order, so diagnostic output is
    /// reproducible across runs on identical input.
    pub fn check(&self, recorder: &mut SemanticRecorder)
    where
        B: Analyze,
    {
        debug!(functions = self.registry.len(), "semantic check pass");
        for (_, ids) in self.registry.iter() {
            for &id in ids {
                if let Some(func) = self.registry.func(id) {
                    func.body().analyze(recorder);
                }
            }
        }
    }

    // === Dump ===

    /// Indexed, kind-classified listing of the symbol table.
    pub fn symbol_string(&self) -> String {
        let mut out = String::from("#### symbol table ####\n");
        for (i, name) in self.symbols.iter().enumerate() {
            let kind = if is_lambda_name(name) { "lambda" } else { "id" };
            out.push_str(&format!("{i}: [{kind}] {name}\n"));
        }
        out
    }

    /// Numbered listing of every function record, in registry order.
    pub fn func_string(&self) -> String
    where
        B: fmt::Display,
    {
        let mut out = String::from("#### function table ####\n");
        let mut i = 0usize;
        for (_, ids) in self.registry.iter() {
            for &id in ids {
                if let Some(func) = self.registry.func(id) {
                    out.push_str(&format!("----==== #{i} ====----\n{func}\n\n"));
                    i += 1;
                }
            }
        }
        out
    }
}

impl<B: fmt::Display> fmt::Display for ScopeManager<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.symbol_string(), self.func_string())
    }
}

impl<B> fmt::Debug for ScopeManager<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeManager")
            .field("symbols", &self.symbols.len())
            .field("depth", &self.scopes.len())
            .field("future", &self.future.len())
            .field("functions", &self.registry.len())
            .field("pending_lambdas", &self.lambdas.pending_len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
