//! Block-context tracking for contextual keywords.
//!
//! `break`/`continue` are valid inside any enclosing loop, so loop
//! membership is a nesting counter. `return` vs `yield` depend on the
//! *nearest* enclosing function or generator body, so those two kinds
//! share a single exclusivity stack: only the top entry is "current".

use smallvec::SmallVec;

/// Lexical block kinds the tracker recognizes.
///
/// Closed set, matched exhaustively everywhere: adding a kind is a
/// compile-time decision, not a silently-ignored default arm.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BlockKind {
    /// Loop body (`while`, `for`, ...). Counted nesting.
    Loop,
    /// Ordinary function body. Exclusive with `Generator`.
    Function,
    /// Generator (yield) body. Exclusive with `Function`.
    Generator,
}

/// Per-kind block-context state.
#[derive(Debug, Default)]
pub(crate) struct BlockContext {
    /// Loop nesting depth. Deliberately unguarded: an unbalanced leave
    /// drives it negative, matching the caller-must-balance contract.
    loop_depth: i32,
    /// Shared Function/Generator exclusivity stack; top = current.
    exclusive: SmallVec<[BlockKind; 8]>,
}

impl BlockContext {
    pub fn new() -> Self {
        BlockContext::default()
    }

    pub fn enter(&mut self, kind: BlockKind) {
        match kind {
            BlockKind::Loop => self.loop_depth += 1,
            BlockKind::Function | BlockKind::Generator => self.exclusive.push(kind),
        }
    }

    /// Leave a block of `kind`.
    ///
    /// For the exclusive kinds, the stack is popped only when its top
    /// matches `kind`; a mismatched (or empty-stack) leave is silently
    /// ignored. Long-standing observed behavior, kept as-is — see the
    /// `mismatched_exclusive_leave_is_ignored` test.
    pub fn leave(&mut self, kind: BlockKind) {
        match kind {
            BlockKind::Loop => self.loop_depth -= 1,
            BlockKind::Function | BlockKind::Generator => {
                if self.exclusive.last() == Some(&kind) {
                    self.exclusive.pop();
                }
            }
        }
    }

    pub fn is_in(&self, kind: BlockKind) -> bool {
        match kind {
            BlockKind::Loop => self.loop_depth > 0,
            BlockKind::Function | BlockKind::Generator => self.exclusive.last() == Some(&kind),
        }
    }
}
