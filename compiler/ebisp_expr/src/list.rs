//! List traversal and association-list lookup.

use crate::expr::Expr;

/// Iterator over the elements of a list.
///
/// Yields the head of each pair and stops at the first tail that is not a
/// pair. For a proper list that tail is `Empty`; for a dotted list it is the
/// final atom. Either way it is available through [`ListIter::rest`].
#[derive(Clone)]
pub struct ListIter<'a> {
    cursor: &'a Expr,
}

impl<'a> ListIter<'a> {
    pub(crate) fn new(list: &'a Expr) -> Self {
        ListIter { cursor: list }
    }

    /// The part of the list not yet yielded.
    #[inline]
    pub fn rest(&self) -> &'a Expr {
        self.cursor
    }
}

impl<'a> Iterator for ListIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<&'a Expr> {
        let pair = self.cursor.as_pair()?;
        self.cursor = pair.tail();
        Some(pair.head())
    }
}

/// Find the first `(name . value)` binding for `name` in `alist`.
///
/// Returns the binding pair itself, so a binding whose value is `Empty` is
/// still distinguishable from no binding at all. Elements that are not pairs
/// are skipped.
pub fn find_binding<'a>(name: &Expr, alist: &'a Expr) -> Option<&'a Expr> {
    alist
        .iter()
        .find(|binding| binding.head().is_some_and(|key| key == name))
}

/// Value of the first binding for `name` in `alist`, or `Empty` if there is
/// none.
pub fn assoc(name: &Expr, alist: &Expr) -> Expr {
    find_binding(name, alist)
        .and_then(Expr::tail)
        .cloned()
        .unwrap_or_default()
}
