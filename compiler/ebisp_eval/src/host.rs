//! Host-side message receivers.
//!
//! The game registers objects under a name (`level`, `player`, ...). A
//! script sends `(player jump)` and the interpreter hands `(jump)` to the
//! object registered as `player`.

use ebisp_expr::{Expr, Gc};

use crate::EvalResult;

/// Receives messages addressed to it by name.
pub trait HostObject {
    /// Handle `message`: the sent list with the target name removed.
    fn send(&mut self, gc: &Gc, message: &Expr) -> EvalResult;
}

impl<F> HostObject for F
where
    F: FnMut(&Gc, &Expr) -> EvalResult,
{
    fn send(&mut self, gc: &Gc, message: &Expr) -> EvalResult {
        self(gc, message)
    }
}
