//! Errors surfaced by the interpreter context.
//!
//! The scope itself never fails; these come from the layer above it:
//! argument shape checks, strict variable reads, host dispatch and the call
//! depth limit. Every error can be turned back into an ebisp list with
//! [`EvalError::to_expr`] so a script handler can inspect it.

use ebisp_expr::{Allocator, Expr, MatchError};
use thiserror::Error;

/// Result of evaluation.
pub type EvalResult = Result<Expr, EvalError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    /// An error value raised by a script or a host object.
    #[error("{0}")]
    Failure(Expr),
    /// A strict read of a name that no frame binds.
    #[error("unbound-variable: {0}")]
    UnboundVariable(Expr),
    /// Arguments did not fit the expected shape.
    #[error(transparent)]
    Match(#[from] MatchError),
    /// A message was sent to a target nobody registered.
    #[error("unknown-object: {sender} {target}")]
    UnknownObject { sender: String, target: String },
    /// Too many nested calls.
    #[error("stack-overflow: call depth {depth} exceeds {limit}")]
    StackOverflow { depth: usize, limit: usize },
}

impl EvalError {
    /// Wrap an arbitrary error value.
    pub fn failure(value: Expr) -> Self {
        EvalError::Failure(value)
    }

    /// The error as an ebisp value, e.g. `(unknown-object level goal)`.
    pub fn to_expr(&self, gc: &impl Allocator) -> Expr {
        let count = |n: usize| gc.number(i64::try_from(n).unwrap_or(i64::MAX));
        match self {
            EvalError::Failure(value) => value.clone(),
            EvalError::UnboundVariable(name) => {
                gc.list([gc.symbol("unbound-variable"), name.clone()])
            }
            EvalError::Match(MatchError::WrongArgumentType { expected, got }) => gc.list([
                gc.symbol("wrong-argument-type"),
                gc.symbol(expected),
                got.clone(),
            ]),
            EvalError::Match(MatchError::WrongNumberOfArguments { expected, got }) => gc.list([
                gc.symbol("wrong-number-of-arguments"),
                count(*expected),
                count(*got),
            ]),
            EvalError::Match(MatchError::UnknownFormat(code)) => gc.list([
                gc.symbol("unknown-format"),
                gc.string(code.encode_utf8(&mut [0; 4])),
            ]),
            EvalError::UnknownObject { sender, target } => gc.list([
                gc.symbol("unknown-object"),
                gc.symbol(sender),
                gc.symbol(target),
            ]),
            EvalError::StackOverflow { depth, limit } => {
                gc.list([gc.symbol("stack-overflow"), count(*depth), count(*limit)])
            }
        }
    }
}
