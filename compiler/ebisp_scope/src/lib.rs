//! Ebisp Scope - the interpreter's lexical environment.
//!
//! A [`Scope`] is a list of frames, innermost first, and every frame is an
//! association list of `(name . value)` bindings, most recent first. Both
//! levels are ordinary ebisp lists:
//!
//! ```text
//! (((x . 2) (x . 1))      ; innermost frame: x rebound, old binding shadowed
//!  ((print . <builtin>))) ; base (global) frame
//! ```
//!
//! # Persistence
//!
//! No operation mutates an existing node. [`Scope::set`] returns a new scope
//! that shares every frame it did not touch with the old one, and
//! [`Scope::push_frame`] / [`Scope::pop_frame`] only move the handle. A
//! cloned `Scope` is therefore a snapshot: closures capture one and keep
//! seeing exactly the bindings that existed at capture time.
//!
//! # Where `set` lands
//!
//! `set` rebinds a name in the nearest frame that already binds it. A name
//! bound nowhere falls through every frame and is installed in the base
//! frame, not the innermost one. Fresh locals are introduced with
//! [`Scope::push_frame`], never with `set`.
//!
//! # Totality
//!
//! Nothing here fails. An unbound name reads as `Empty`, popping past the
//! last frame is ignored, and mismatched parameter/argument lists are
//! truncated to the shorter one.

use std::fmt;
use std::mem;

use ebisp_expr::{assoc, find_binding, Allocator, Expr, ListIter};
use smallvec::SmallVec;
use tracing::trace;

/// A persistent chain of binding frames.
#[derive(Clone, Debug)]
pub struct Scope {
    /// List of frames, innermost first.
    expr: Expr,
}

impl Scope {
    /// Create a scope holding one empty base frame.
    pub fn new(gc: &impl Allocator) -> Self {
        Scope {
            expr: gc.cons(gc.nil(), gc.nil()),
        }
    }

    /// Wrap a frame chain, e.g. one previously captured with [`Scope::as_expr`].
    pub fn from_expr(expr: Expr) -> Self {
        Scope { expr }
    }

    /// The underlying frame chain.
    #[inline]
    pub fn as_expr(&self) -> &Expr {
        &self.expr
    }

    pub fn into_expr(self) -> Expr {
        self.expr
    }

    /// Frames from innermost to outermost.
    #[inline]
    pub fn frames(&self) -> ListIter<'_> {
        self.expr.iter()
    }

    /// Number of frames in the chain.
    pub fn depth(&self) -> usize {
        self.expr.len()
    }

    /// The outermost frame, or `None` once every frame has been popped.
    pub fn global_frame(&self) -> Option<&Expr> {
        self.frames().last()
    }

    /// Returns `true` once every frame has been popped.
    pub fn is_exhausted(&self) -> bool {
        !self.expr.is_pair()
    }

    /// Value bound to `name`, or `Empty` if it is unbound.
    ///
    /// Frames are searched innermost first and the first non-empty value
    /// wins. A binding whose value is `Empty` is indistinguishable from no
    /// binding here, so the search continues past it; use [`Scope::lookup`]
    /// when that difference matters.
    pub fn get(&self, name: &Expr) -> Expr {
        for frame in self.frames() {
            let value = assoc(name, frame);
            if !value.is_nil() {
                return value;
            }
        }
        Expr::Empty
    }

    /// The nearest binding for `name`, even if its value is `Empty`.
    pub fn lookup(&self, name: &Expr) -> Option<Expr> {
        self.frames()
            .find_map(|frame| find_binding(name, frame))
            .and_then(Expr::tail)
            .cloned()
    }

    /// Returns `true` if any frame binds `name`.
    pub fn has_binding(&self, name: &Expr) -> bool {
        self.frames()
            .any(|frame| find_binding(name, frame).is_some())
    }

    /// Rebind `name` to `value`, returning the updated scope.
    ///
    /// The binding is prepended to the innermost frame that already holds a
    /// non-empty value for `name`, or to the base frame if none does. Frames
    /// in front of the target are re-linked as-is; frames behind it are
    /// shared with `self`, which is left unchanged.
    #[must_use]
    pub fn set(&self, gc: &impl Allocator, name: Expr, value: Expr) -> Scope {
        let mut passed: SmallVec<[&Expr; 8]> = SmallVec::new();
        let mut cursor = &self.expr;
        let updated = loop {
            let Some(node) = cursor.as_pair() else {
                // Every frame was popped: start a new one.
                trace!("set on exhausted scope");
                let frame = gc.cons(gc.cons(name, value), gc.nil());
                break gc.cons(frame, cursor.clone());
            };
            let (frame, rest) = (node.head(), node.tail());
            if !assoc(&name, frame).is_nil() || rest.is_nil() {
                trace!(frame = passed.len(), "set: binding installed");
                let frame = gc.cons(gc.cons(name, value), frame.clone());
                break gc.cons(frame, rest.clone());
            }
            passed.push(frame);
            cursor = rest;
        };

        let expr = passed
            .into_iter()
            .rev()
            .fold(updated, |tail, frame| gc.cons(frame.clone(), tail));
        Scope { expr }
    }

    /// [`Scope::set`] in place: replace this handle with the updated scope.
    pub fn assign(&mut self, gc: &impl Allocator, name: Expr, value: Expr) {
        *self = self.set(gc, name, value);
    }

    /// Push a frame binding each of `names` to the matching element of `args`.
    ///
    /// Pairing stops at the end of the shorter list: extra names stay
    /// unbound, extra arguments are dropped. Bindings are prepended while
    /// walking, so when a name repeats the later argument is found first.
    pub fn push_frame(&mut self, gc: &impl Allocator, names: &Expr, args: &Expr) {
        let frame = names
            .iter()
            .zip(args.iter())
            .fold(gc.nil(), |frame, (name, arg)| {
                gc.cons(gc.cons(name.clone(), arg.clone()), frame)
            });
        self.expr = gc.cons(frame, mem::take(&mut self.expr));
        trace!(depth = self.depth(), "frame pushed");
    }

    /// Drop the innermost frame. Does nothing on an exhausted scope.
    pub fn pop_frame(&mut self) {
        if let Some(rest) = self.expr.tail().cloned() {
            self.expr = rest;
            trace!(depth = self.depth(), "frame popped");
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.expr, f)
    }
}
