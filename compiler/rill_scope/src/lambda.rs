//! Lambda identity allocation and stack-discipline recovery.
//!
//! Anonymous functions are registered by one grammar action and recovered
//! by a different one later. The allocator hands out strictly increasing
//! ids and keeps a LIFO stack of `(id, declaration line)` records so the
//! most recently registered unresolved lambda is always the one recovered
//! next. The pairing is positional, not keyed: registration and recovery
//! must nest.

use smallvec::SmallVec;

/// Reserved prefix of every generated lambda name.
pub const LAMBDA_PREFIX: &str = "~lambda#";

/// Separator between the allocated id and the declaration line in a
/// line-aware lambda name.
const LINE_SEPARATOR: char = '!';

/// Identity of a registered-but-not-yet-recovered lambda.
///
/// One record per pending lambda; keeping id and line in a single stack
/// element rules out the two parallel stacks drifting apart.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) struct PendingLambda {
    pub id: u32,
    pub line: u32,
}

impl PendingLambda {
    /// The registry key this pending lambda was stored under.
    pub fn key(self) -> String {
        lambda_line_name(self.id, self.line)
    }
}

/// Monotonic id generator plus the pending-lambda stack.
#[derive(Debug, Default)]
pub(crate) struct LambdaAllocator {
    /// Next id to hand out. Strictly increasing, never reused.
    next_id: u32,
    pending: SmallVec<[PendingLambda; 8]>,
}

impl LambdaAllocator {
    pub fn new() -> Self {
        LambdaAllocator::default()
    }

    /// Allocate the next id. Advances regardless of which registration
    /// path asked, so ids stay globally unique across named-path and
    /// lambda-path registration.
    pub fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Push a pending lambda identity for later recovery.
    pub fn push_pending(&mut self, pending: PendingLambda) {
        self.pending.push(pending);
    }

    /// Pop the most recently registered pending lambda, if any.
    pub fn pop_pending(&mut self) -> Option<PendingLambda> {
        self.pending.pop()
    }

    /// Number of registered-but-unrecovered lambdas.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

/// Generated name for an anonymous function on the non-line-aware path.
pub(crate) fn lambda_name(id: u32) -> String {
    format!("{LAMBDA_PREFIX}{id}")
}

/// Generated name for a line-aware lambda: prefix, id, separator, line.
pub(crate) fn lambda_line_name(id: u32, line: u32) -> String {
    format!("{LAMBDA_PREFIX}{id}{LINE_SEPARATOR}{line}")
}

/// Whether `name` is a generated lambda name.
pub fn is_lambda_name(name: &str) -> bool {
    name.starts_with(LAMBDA_PREFIX)
}
