//! The expression value type.

use std::fmt;
use std::mem;

use ebisp_stack::ensure_sufficient_stack;
use smallvec::SmallVec;

use crate::heap::Heap;
use crate::list::ListIter;

/// Immutable scalar payload.
///
/// Atoms compare by content: two separately allocated `Symbol("x")` atoms
/// name the same binding.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Atom {
    /// Symbol, used as a binding name.
    Symbol(Box<str>),
    /// String literal.
    Str(Box<str>),
    /// Integer.
    Number(i64),
}

impl Atom {
    /// Name of the atom's type as it appears in error values.
    pub fn type_name(&self) -> &'static str {
        match self {
            Atom::Symbol(_) => "symbol",
            Atom::Str(_) => "string",
            Atom::Number(_) => "number",
        }
    }
}

/// An ordered `(head . tail)` node.
///
/// Used both as a list cell `(element . rest)` and as a binding
/// `(name . value)`.
pub struct Pair {
    head: Expr,
    tail: Expr,
}

impl Pair {
    pub(crate) fn new(head: Expr, tail: Expr) -> Self {
        Pair { head, tail }
    }

    /// The first element (`car`).
    #[inline]
    pub fn head(&self) -> &Expr {
        &self.head
    }

    /// The rest (`cdr`).
    #[inline]
    pub fn tail(&self) -> &Expr {
        &self.tail
    }
}

// Release uniquely owned children from a worklist instead of through nested
// drop glue, which would overflow on a long tail chain or a deep head nest.
// Only pairs are queued and the head is popped first, so a long list keeps
// the worklist at a couple of entries.
impl Drop for Pair {
    fn drop(&mut self) {
        let mut pending: SmallVec<[Heap<Pair>; 8]> = SmallVec::new();
        push_children(self, &mut pending);
        while let Some(node) = pending.pop() {
            if let Ok(mut pair) = Heap::try_unwrap(node) {
                push_children(&mut pair, &mut pending);
            }
        }
    }
}

fn push_children(pair: &mut Pair, pending: &mut SmallVec<[Heap<Pair>; 8]>) {
    if let Expr::Pair(tail) = mem::take(&mut pair.tail) {
        pending.push(tail);
    }
    if let Expr::Pair(head) = mem::take(&mut pair.head) {
        pending.push(head);
    }
}

/// An ebisp value.
///
/// Cloning is cheap: compound values are shared, never copied.
#[derive(Clone, Default)]
pub enum Expr {
    /// The empty list. Also stands for "nothing" (e.g. an unbound name).
    #[default]
    Empty,
    /// A scalar.
    Atom(Heap<Atom>),
    /// A `(head . tail)` node.
    Pair(Heap<Pair>),
}

impl Expr {
    /// Returns `true` for the empty list.
    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Expr::Empty)
    }

    #[inline]
    pub fn is_pair(&self) -> bool {
        matches!(self, Expr::Pair(_))
    }

    #[inline]
    pub fn is_atom(&self) -> bool {
        matches!(self, Expr::Atom(_))
    }

    /// Returns `true` for a proper list: a chain of pairs ending in `Empty`.
    pub fn is_list(&self) -> bool {
        let mut items = self.iter();
        for _ in items.by_ref() {}
        items.rest().is_nil()
    }

    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Expr::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<&Pair> {
        match self {
            Expr::Pair(pair) => Some(pair),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self.as_atom()? {
            Atom::Symbol(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.as_atom()? {
            Atom::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self.as_atom()? {
            Atom::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// `car`, or `None` if this is not a pair.
    #[inline]
    pub fn head(&self) -> Option<&Expr> {
        self.as_pair().map(Pair::head)
    }

    /// `cdr`, or `None` if this is not a pair.
    #[inline]
    pub fn tail(&self) -> Option<&Expr> {
        self.as_pair().map(Pair::tail)
    }

    /// Iterate over the elements of a list.
    ///
    /// Stops at the first non-pair tail; see [`ListIter::rest`].
    #[inline]
    pub fn iter(&self) -> ListIter<'_> {
        ListIter::new(self)
    }

    /// Number of elements before the first non-pair tail.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns `true` if [`Expr::len`] is zero: `Empty`, an atom, or any
    /// other non-pair.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.is_pair()
    }

    /// Identity comparison: `true` if both refer to the same node.
    ///
    /// Two empty lists are always identical.
    pub fn ptr_eq(&self, other: &Expr) -> bool {
        match (self, other) {
            (Expr::Empty, Expr::Empty) => true,
            (Expr::Atom(a), Expr::Atom(b)) => Heap::ptr_eq(a, b),
            (Expr::Pair(a), Expr::Pair(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Name of the value's type as it appears in error values.
    pub fn type_name(&self) -> &'static str {
        match self {
            Expr::Empty => "nil",
            Expr::Atom(atom) => atom.type_name(),
            Expr::Pair(_) => "pair",
        }
    }
}

/// Structural equality. Atoms compare by content, pairs element-wise.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        let (mut a, mut b) = (self, other);
        loop {
            match (a, b) {
                (Expr::Empty, Expr::Empty) => return true,
                (Expr::Atom(x), Expr::Atom(y)) => return **x == **y,
                (Expr::Pair(x), Expr::Pair(y)) => {
                    if Heap::ptr_eq(x, y) {
                        return true;
                    }
                    if !ensure_sufficient_stack(|| x.head == y.head) {
                        return false;
                    }
                    a = &x.tail;
                    b = &y.tail;
                }
                _ => return false,
            }
        }
    }
}

impl Eq for Expr {}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
