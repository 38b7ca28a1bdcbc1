//! The interpreter context.
//!
//! An [`Interpreter`] is the explicit state an evaluator threads through its
//! calls: the allocation service, the current [`Scope`], the registered host
//! objects and the call depth. Two interpreters share nothing, so nested or
//! parallel evaluations stay independent.

mod builder;
mod scope_guard;

use std::mem;

use ebisp_expr::{match_list, Expr, Gc};
use ebisp_scope::Scope;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::{EvalError, EvalResult, HostObject};

pub use builder::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use scope_guard::ScopedInterpreter;

/// Evaluation context: heap, environment and host bridge.
pub struct Interpreter {
    gc: Gc,
    scope: Scope,
    hosts: FxHashMap<Box<str>, Box<dyn HostObject>>,
    /// Name reported as the sender in `unknown-object` errors.
    name: Box<str>,
    max_call_depth: usize,
    call_depth: usize,
}

impl Interpreter {
    /// An interpreter with an empty base frame and default settings.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// The allocation service, for building values.
    #[inline]
    pub fn gc(&self) -> &Gc {
        &self.gc
    }

    /// The current environment.
    #[inline]
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Number of calls currently on the stack.
    #[inline]
    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    /// Value of `name`, or `Empty` if it is unbound.
    pub fn get(&self, name: &Expr) -> Expr {
        self.scope.get(name)
    }

    /// Value of `name`, failing with `unbound-variable` if no frame binds it.
    pub fn lookup_bound(&self, name: &Expr) -> EvalResult {
        self.scope
            .lookup(name)
            .ok_or_else(|| EvalError::UnboundVariable(name.clone()))
    }

    /// Rebind `name`, see [`Scope::set`] for which frame receives it.
    pub fn set(&mut self, name: Expr, value: Expr) {
        self.scope.assign(&self.gc, name, value);
    }

    /// Snapshot of the current environment for a closure to keep.
    pub fn capture(&self) -> Scope {
        self.scope.clone()
    }

    /// Register (or replace) the host object receiving messages for `name`.
    pub fn register(&mut self, name: &str, object: Box<dyn HostObject>) {
        if self.hosts.insert(name.into(), object).is_some() {
            debug!(name, "host object replaced");
        }
    }

    /// Route `(target . message)` to the host object registered as `target`.
    pub fn send(&mut self, path: &Expr) -> EvalResult {
        let matched = match_list("q*", path)?;
        let target = matched[0].as_symbol().unwrap_or_default();
        let message = &matched[1];

        let Some(object) = self.hosts.get_mut(target) else {
            debug!(object = target, "send to unknown object");
            return Err(EvalError::UnknownObject {
                sender: self.name.to_string(),
                target: target.to_string(),
            });
        };
        trace!(object = target, %message, "send");
        object.send(&self.gc, message)
    }

    /// Run `body` in a new frame binding `params` to `args`.
    ///
    /// The frame is popped when `body` returns, whatever it returns.
    pub fn call<F>(&mut self, params: &Expr, args: &Expr, body: F) -> EvalResult
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> EvalResult,
    {
        let mut scoped = self.scoped(params, args)?;
        body(&mut scoped)
    }

    /// Run `body` in a new frame on top of a captured environment.
    ///
    /// The caller's environment is restored afterwards, so nothing the body
    /// binds leaks back to the caller. That includes `set` on a name no frame
    /// binds: it lands in the snapshot's base frame, which is a separate
    /// persistent value from the caller's, and is discarded on exit. Return
    /// the value and `set` it in the caller to make it global.
    pub fn call_closure<F>(
        &mut self,
        captured: &Scope,
        params: &Expr,
        args: &Expr,
        body: F,
    ) -> EvalResult
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> EvalResult,
    {
        self.check_call_depth()?;
        let caller = mem::replace(&mut self.scope, captured.clone());
        let mut scoped = self.enter(params, args);
        scoped.restore_on_exit(caller);
        body(&mut scoped)
    }

    fn check_call_depth(&self) -> Result<(), EvalError> {
        if self.call_depth >= self.max_call_depth {
            return Err(EvalError::StackOverflow {
                depth: self.call_depth + 1,
                limit: self.max_call_depth,
            });
        }
        Ok(())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
