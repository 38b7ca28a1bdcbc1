//! Model-based property tests: the persistent scope must agree with a plain
//! vector-of-frames model of the same binding policy, and a snapshot taken
//! before any operation must read exactly as it did when it was taken.

use ebisp_expr::{Allocator, Expr, Gc};
use ebisp_scope::Scope;
use proptest::prelude::*;

const NAMES: u8 = 6;

#[derive(Clone, Debug)]
enum Op {
    Push(Vec<u8>, Vec<i64>),
    Pop,
    Set(u8, i64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (
            proptest::collection::vec(0..NAMES, 0..4),
            proptest::collection::vec(any::<i64>(), 0..4),
        )
            .prop_map(|(names, args)| Op::Push(names, args)),
        Just(Op::Pop),
        (0..NAMES, any::<i64>()).prop_map(|(name, value)| Op::Set(name, value)),
    ]
}

/// Frames innermost first, bindings most recent first.
#[derive(Clone, Debug)]
struct Model {
    frames: Vec<Vec<(u8, i64)>>,
}

impl Model {
    fn new() -> Self {
        Model {
            frames: vec![Vec::new()],
        }
    }

    fn get(&self, name: u8) -> Option<i64> {
        self.frames
            .iter()
            .flatten()
            .find(|(key, _)| *key == name)
            .map(|&(_, value)| value)
    }

    fn apply(&mut self, op: &Op) {
        match op {
            Op::Push(names, args) => {
                let mut frame = Vec::new();
                for (&name, &arg) in names.iter().zip(args) {
                    frame.insert(0, (name, arg));
                }
                self.frames.insert(0, frame);
            }
            Op::Pop => {
                if !self.frames.is_empty() {
                    self.frames.remove(0);
                }
            }
            Op::Set(name, value) => {
                let last = self.frames.len().saturating_sub(1);
                let target = self
                    .frames
                    .iter()
                    .position(|frame| frame.iter().any(|(key, _)| key == name))
                    .unwrap_or(last);
                match self.frames.get_mut(target) {
                    Some(frame) => frame.insert(0, (*name, *value)),
                    None => self.frames.push(vec![(*name, *value)]),
                }
            }
        }
    }
}

fn symbol(gc: &Gc, name: u8) -> Expr {
    gc.symbol(&format!("v{name}"))
}

fn apply(gc: &Gc, scope: &mut Scope, op: &Op) {
    match op {
        Op::Push(names, args) => {
            let names = gc.list(names.iter().map(|&n| symbol(gc, n)));
            let args = gc.list(args.iter().map(|&a| gc.number(a)));
            scope.push_frame(gc, &names, &args);
        }
        Op::Pop => scope.pop_frame(),
        Op::Set(name, value) => scope.assign(gc, symbol(gc, *name), gc.number(*value)),
    }
}

fn read_all(gc: &Gc, scope: &Scope) -> Vec<Option<i64>> {
    (0..NAMES)
        .map(|name| scope.get(&symbol(gc, name)).as_number())
        .collect()
}

proptest! {
    #[test]
    fn scope_agrees_with_model(ops in proptest::collection::vec(op(), 0..48)) {
        let gc = Gc::new();
        let mut scope = Scope::new(&gc);
        let mut model = Model::new();

        for op in &ops {
            apply(&gc, &mut scope, op);
            model.apply(op);
            prop_assert_eq!(scope.depth(), model.frames.len());
            for name in 0..NAMES {
                prop_assert_eq!(
                    scope.get(&symbol(&gc, name)).as_number(),
                    model.get(name),
                    "after {:?}", op
                );
            }
        }
    }

    #[test]
    fn snapshots_are_immutable(ops in proptest::collection::vec(op(), 1..48)) {
        let gc = Gc::new();
        let mut scope = Scope::new(&gc);
        let mut snapshots = Vec::new();

        for op in &ops {
            snapshots.push((scope.clone(), read_all(&gc, &scope)));
            apply(&gc, &mut scope, op);
        }
        for (snapshot, seen) in &snapshots {
            prop_assert_eq!(&read_all(&gc, snapshot), seen);
        }
    }

    #[test]
    fn lookup_agrees_with_get_for_non_empty_values(ops in proptest::collection::vec(op(), 0..32)) {
        let gc = Gc::new();
        let mut scope = Scope::new(&gc);
        for op in &ops {
            apply(&gc, &mut scope, op);
        }
        for name in 0..NAMES {
            let name = symbol(&gc, name);
            let got = scope.get(&name);
            prop_assert_eq!(scope.lookup(&name).unwrap_or_default(), got.clone());
            prop_assert_eq!(scope.has_binding(&name), !got.is_nil());
        }
    }
}
