//! `InterpreterBuilder` for configuring Interpreter instances.

use ebisp_expr::{Allocator, Expr, Gc};
use ebisp_scope::Scope;
use rustc_hash::FxHashMap;
use tracing::debug;

use super::Interpreter;
use crate::HostObject;

/// Call depth allowed when none is configured.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

/// Builder for creating Interpreter instances.
///
/// The builder owns the allocation service from the start, so seed values
/// for globals are built with [`InterpreterBuilder::gc`] and end up in the
/// same heap the interpreter uses.
///
/// ```text
/// let builder = Interpreter::builder().name("level");
/// let speed = builder.gc().number(3);
/// let interpreter = builder
///     .global("player-speed", speed)
///     .host("player", Box::new(player_bridge))
///     .build();
/// ```
pub struct InterpreterBuilder {
    gc: Gc,
    globals: Vec<(Expr, Expr)>,
    hosts: FxHashMap<Box<str>, Box<dyn HostObject>>,
    name: Box<str>,
    max_call_depth: usize,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            gc: Gc::new(),
            globals: Vec::new(),
            hosts: FxHashMap::default(),
            name: "interpreter".into(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// The allocation service the interpreter will use.
    pub fn gc(&self) -> &Gc {
        &self.gc
    }

    /// Bind `name` in the base frame.
    #[must_use]
    pub fn global(mut self, name: &str, value: Expr) -> Self {
        let name = self.gc.symbol(name);
        self.globals.push((name, value));
        self
    }

    /// Register a host object under `name`.
    #[must_use]
    pub fn host(mut self, name: &str, object: Box<dyn HostObject>) -> Self {
        self.hosts.insert(name.into(), object);
        self
    }

    /// Name reported as the sender in `unknown-object` errors.
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.into();
        self
    }

    /// Maximum number of nested calls before `stack-overflow`.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn build(self) -> Interpreter {
        let mut scope = Scope::new(&self.gc);
        for (name, value) in self.globals.iter().cloned() {
            scope.assign(&self.gc, name, value);
        }
        debug!(
            globals = self.globals.len(),
            hosts = self.hosts.len(),
            max_call_depth = self.max_call_depth,
            "interpreter built"
        );

        Interpreter {
            gc: self.gc,
            scope,
            hosts: self.hosts,
            name: self.name,
            max_call_depth: self.max_call_depth,
            call_depth: 0,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
