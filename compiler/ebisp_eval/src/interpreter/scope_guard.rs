//! RAII call frames.
//!
//! [`ScopedInterpreter`] holds `&mut Interpreter` and derefs to it, so code
//! running inside a call uses the interpreter as usual. Dropping the guard
//! pops the frame it pushed, also during unwinding.
//!
//! ```text
//! interpreter.call(&params, &args, |scoped| {
//!     let x = scoped.lookup_bound(&x_name)?;
//!     scoped.send(&message)
//! }) // frame popped here
//! ```

use std::ops::{Deref, DerefMut};

use ebisp_expr::Expr;
use ebisp_scope::Scope;
use tracing::trace;

use super::Interpreter;
use crate::EvalError;

/// Guard for one call frame.
pub struct ScopedInterpreter<'a> {
    interpreter: &'a mut Interpreter,
    /// Caller environment to reinstate on exit (closure calls).
    restore: Option<Scope>,
}

impl ScopedInterpreter<'_> {
    pub(super) fn restore_on_exit(&mut self, caller: Scope) {
        self.restore = Some(caller);
    }
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        let interpreter = &mut *self.interpreter;
        interpreter.scope.pop_frame();
        interpreter.call_depth = interpreter.call_depth.saturating_sub(1);
        if let Some(caller) = self.restore.take() {
            interpreter.scope = caller;
        }
        trace!(depth = interpreter.call_depth, "call frame left");
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Interpreter {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Interpreter {
        self.interpreter
    }
}

impl Interpreter {
    /// Push a frame binding `params` to `args` and return its guard.
    ///
    /// Fails with `stack-overflow` once the configured call depth is reached.
    pub fn scoped(
        &mut self,
        params: &Expr,
        args: &Expr,
    ) -> Result<ScopedInterpreter<'_>, EvalError> {
        self.check_call_depth()?;
        Ok(self.enter(params, args))
    }

    pub(super) fn enter(&mut self, params: &Expr, args: &Expr) -> ScopedInterpreter<'_> {
        self.scope.push_frame(&self.gc, params, args);
        self.call_depth += 1;
        trace!(depth = self.call_depth, "call frame entered");
        ScopedInterpreter {
            interpreter: self,
            restore: None,
        }
    }
}
