//! Ebisp Expr - expression values and the allocation service.
//!
//! Every ebisp value is an [`Expr`]: the empty list, an [`Atom`], or a
//! [`Pair`]. Pairs are the only compound value; lists, association lists and
//! the interpreter's scope chain are all built from them.
//!
//! # Allocation
//!
//! Compound values are created through an [`Allocator`] (the crate ships
//! [`Gc`]). Nodes are immutable once allocated and are reclaimed when the
//! last reference to them goes away, so any number of structures can share
//! a common tail.
//!
//! ```text
//! let gc = Gc::new();
//! let xs = gc.list([gc.symbol("hide"), gc.string("goal-1")]);
//! assert_eq!(xs.to_string(), r#"(hide "goal-1")"#);
//! ```

mod expr;
mod gc;
mod heap;
mod list;
mod matching;
mod print;

pub use expr::{Atom, Expr, Pair};
pub use gc::{Allocator, Gc, GcStats};
pub use heap::Heap;
pub use list::{assoc, find_binding, ListIter};
pub use matching::{match_list, MatchError, Matched};
