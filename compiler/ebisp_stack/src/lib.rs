//! Stack growth for recursive walks over ebisp expressions.
//!
//! Printing and structural comparison recurse into the head of every pair.
//! A script can build arbitrarily nested lists (`((((...))))`), so those
//! walks grow the stack on demand instead of trusting the thread's default.
//!
//! - **Native targets**: `stacker` allocates a new segment when the red zone
//!   is reached.
//! - **WASM targets**: plain passthrough.

/// Remaining stack below which a new segment is allocated (64KB).
const RED_ZONE: usize = 64 * 1024;

/// Size of each newly allocated segment (1MB).
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn depth(expr: &Expr) -> usize {
///     ensure_sufficient_stack(|| match expr.head() {
///         Some(head) => 1 + depth(head),
///         None => 0,
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
