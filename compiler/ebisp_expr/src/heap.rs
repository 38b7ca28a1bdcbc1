//! Shared, immutable heap cell for expression nodes.

// Rc is the implementation of Heap<T>
#![expect(
    clippy::disallowed_types,
    reason = "Rc is the implementation of Heap<T>"
)]

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Reference-counted, immutable node storage.
///
/// The constructor is crate-private: nodes are only created through an
/// [`Allocator`](crate::Allocator), which keeps allocation accounting in one
/// place. Cloning a `Heap` shares the node, it never copies it.
///
/// Single-threaded by construction (`Rc`, not `Arc`); the interpreter owns
/// its values on one thread.
#[repr(transparent)]
pub struct Heap<T>(Rc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        Heap(Rc::new(value))
    }

    /// Returns `true` if both handles point at the same node.
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Rc::ptr_eq(&this.0, &other.0)
    }

    /// Number of live handles to this node.
    #[inline]
    pub fn strong_count(this: &Self) -> usize {
        Rc::strong_count(&this.0)
    }

    /// Take the node out if this is the last handle to it.
    #[inline]
    pub(crate) fn try_unwrap(this: Self) -> Result<T, Self> {
        Rc::try_unwrap(this.0).map_err(Heap)
    }
}

impl<T> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Rc::clone(&self.0))
    }
}

impl<T> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
