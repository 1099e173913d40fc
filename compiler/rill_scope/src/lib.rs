//! Rill Scope - scope and symbol resolution for the Rill compiler.
//!
//! This crate is the engine behind the parser's semantic actions. It
//! answers three questions while a translation unit is parsed top-down:
//!
//! - *Is this name visible here?* — a lexical scope stack with shadowing,
//!   plus a forward-declaration buffer for names used before their
//!   owning scope exists, plus an external-name classifier for builtins.
//! - *Which function does this call resolve to?* — a unit-wide owning
//!   function registry with ordered per-name definition lists, and a
//!   stack-discipline identity scheme that lets anonymous functions be
//!   registered by one grammar action and recovered by another.
//! - *Am I inside a loop / function / generator body?* — counted loop
//!   nesting and a nearest-encloser exclusivity stack for function and
//!   generator bodies.
//!
//! Everything is instantiated once per compiled unit ([`ScopeManager`])
//! and driven synchronously by the parser; after parsing,
//! [`ScopeManager::check`] forwards every function body to the semantic
//! pass with a shared [`SemanticRecorder`](rill_diagnostic::SemanticRecorder).

mod block;
mod error;
mod func;
mod lambda;
mod manager;
mod scope;
mod symbols;

pub use block::BlockKind;
pub use error::ScopeError;
pub use func::{Analyze, FuncId, FuncRegistry, Function};
pub use lambda::{is_lambda_name, LAMBDA_PREFIX};
pub use manager::{NameClassifier, NoExternalNames, ScopeManager, ENTRY_NAME};
pub use symbols::SymbolTable;
