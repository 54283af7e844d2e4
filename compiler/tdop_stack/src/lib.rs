//! Context stacks and stack safety for the tdop engines.
//!
//! Two unrelated kinds of "stack" live here:
//!
//! - [`Stack`]: the explicit LIFO used by the lexer and parser for their
//!   pushable contexts (classifiers, parse tables, token streams, pushed-back
//!   tokens and application state).
//! - [`ensure_sufficient_stack`]: native call-stack growth for the recursive
//!   Pratt evaluator, so deeply nested input cannot overflow.
//!
//! # Platform Support
//!
//! - **Native targets**: Uses the `stacker` crate to grow the stack on demand.
//! - **WASM targets**: No-op passthrough (WASM has its own stack management).

mod stack;

pub use stack::Stack;

/// Minimum stack space to keep available (100KB red zone).
///
/// If less than this amount remains, we'll grow the stack.
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
///
/// If the remaining stack is below the red zone threshold, this will
/// allocate additional stack space before calling `f`.
///
/// ```text
/// pub fn expression(&mut self, rbp: i32) -> Result<NodeRef> {
///     ensure_sufficient_stack(|| self.expression_inner(rbp))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
