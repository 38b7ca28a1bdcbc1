//! Ebisp Eval - the interpreter context the evaluator runs in.
//!
//! # Architecture
//!
//! - [`Interpreter`]: owns the allocation service and the current [`Scope`];
//!   one per evaluation context, passed explicitly, never global.
//! - [`ScopedInterpreter`]: RAII guard for a call frame. The frame is popped
//!   when the guard drops, even on early return or panic.
//! - [`HostObject`]: host-side receivers for `(target . message)` sends.
//! - [`EvalError`] / [`EvalResult`]: failures surfaced to the host, each
//!   convertible back into an ebisp value.
//!
//! # Re-exports
//!
//! Value types from `ebisp_expr` and the scope from `ebisp_scope`.

pub mod errors;
mod host;
mod interpreter;

use std::sync::Once;

pub use ebisp_expr::{match_list, Allocator, Atom, Expr, Gc, GcStats, MatchError};
pub use ebisp_scope::Scope;

pub use errors::{EvalError, EvalResult};
pub use host::HostObject;
pub use interpreter::{Interpreter, InterpreterBuilder, ScopedInterpreter, DEFAULT_MAX_CALL_DEPTH};

static TRACING_INIT: Once = Once::new();

/// Filter used when `RUST_LOG` is unset: warnings from the ebisp crates only.
const DEFAULT_FILTER: &str = "ebisp_expr=warn,ebisp_scope=warn,ebisp_eval=warn";

/// Install a `fmt` subscriber for the ebisp crates.
///
/// `RUST_LOG` overrides the default warn-level filter, e.g.
/// `RUST_LOG=ebisp_scope=trace` to watch frames being pushed and popped.
/// Only the first call does anything, and a subscriber the host already
/// installed is left in place.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let installed = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .try_init();
        if installed.is_err() {
            tracing::debug!("global subscriber already set, keeping it");
        }
    });
}
