//! The allocation service.
//!
//! Anything that builds ebisp structure takes an [`Allocator`] rather than a
//! concrete heap, so hosts can wrap or replace the service. Nothing outside
//! the service frees nodes: a node lives exactly as long as something can
//! still reach it.

use std::cell::Cell;

use tracing::debug;

use crate::expr::{Atom, Expr, Pair};
use crate::heap::Heap;

/// Constructs ebisp values.
pub trait Allocator {
    /// Allocate a new immutable `(head . tail)` pair.
    fn cons(&self, head: Expr, tail: Expr) -> Expr;

    /// Allocate a new atom.
    fn atom(&self, atom: Atom) -> Expr;

    /// The canonical empty list.
    #[inline]
    fn nil(&self) -> Expr {
        Expr::Empty
    }

    fn symbol(&self, name: &str) -> Expr {
        self.atom(Atom::Symbol(name.into()))
    }

    fn string(&self, s: &str) -> Expr {
        self.atom(Atom::Str(s.into()))
    }

    fn number(&self, n: i64) -> Expr {
        self.atom(Atom::Number(n))
    }

    /// Build a proper list from `items`, in order.
    fn list<I>(&self, items: I) -> Expr
    where
        Self: Sized,
        I: IntoIterator<Item = Expr>,
        I::IntoIter: DoubleEndedIterator,
    {
        items
            .into_iter()
            .rev()
            .fold(self.nil(), |tail, head| self.cons(head, tail))
    }
}

/// Allocation counters reported by [`Gc::stats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GcStats {
    /// Pairs allocated since the service was created.
    pub pairs: usize,
    /// Atoms allocated since the service was created.
    pub atoms: usize,
}

/// Reference-counted allocation service.
///
/// Nodes are reclaimed as soon as they become unreachable. The service only
/// keeps counters; it holds no references to the nodes it hands out.
#[derive(Debug, Default)]
pub struct Gc {
    pairs: Cell<usize>,
    atoms: Cell<usize>,
}

impl Gc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> GcStats {
        GcStats {
            pairs: self.pairs.get(),
            atoms: self.atoms.get(),
        }
    }
}

impl Allocator for Gc {
    #[inline]
    fn cons(&self, head: Expr, tail: Expr) -> Expr {
        self.pairs.set(self.pairs.get().wrapping_add(1));
        Expr::Pair(Heap::new(Pair::new(head, tail)))
    }

    #[inline]
    fn atom(&self, atom: Atom) -> Expr {
        self.atoms.set(self.atoms.get().wrapping_add(1));
        Expr::Atom(Heap::new(atom))
    }
}

impl Drop for Gc {
    fn drop(&mut self) {
        let GcStats { pairs, atoms } = self.stats();
        debug!(pairs, atoms, "allocation service released");
    }
}
