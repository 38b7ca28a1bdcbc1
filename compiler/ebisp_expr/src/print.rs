//! S-expression printing.

use std::fmt;

use ebisp_stack::ensure_sufficient_stack;

use crate::expr::{Atom, Expr};

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Symbol(name) => f.write_str(name),
            Atom::Str(s) => write!(f, "{s:?}"),
            Atom::Number(n) => write!(f, "{n}"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Empty => f.write_str("()"),
            Expr::Atom(atom) => fmt::Display::fmt(&**atom, f),
            Expr::Pair(_) => {
                f.write_str("(")?;
                let mut items = self.iter();
                for (i, item) in items.by_ref().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    ensure_sufficient_stack(|| fmt::Display::fmt(item, f))?;
                }
                match items.rest() {
                    Expr::Empty => {}
                    dotted => write!(f, " . {dotted}")?,
                }
                f.write_str(")")
            }
        }
    }
}
