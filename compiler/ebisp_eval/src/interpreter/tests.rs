use super::*;
use ebisp_expr::{Allocator, MatchError};
use pretty_assertions::assert_eq;

fn params(interpreter: &Interpreter, names: &[&str]) -> Expr {
    let gc = interpreter.gc();
    gc.list(names.iter().map(|n| gc.symbol(n)))
}

fn args(interpreter: &Interpreter, values: &[i64]) -> Expr {
    let gc = interpreter.gc();
    gc.list(values.iter().map(|&v| gc.number(v)))
}

#[test]
fn test_new_interpreter_is_empty() {
    let interpreter = Interpreter::new();
    assert_eq!(interpreter.scope().depth(), 1);
    assert_eq!(interpreter.call_depth(), 0);
}

#[test]
fn test_builder_seeds_globals() {
    let builder = Interpreter::builder();
    let speed = builder.gc().number(3);
    let interpreter = builder.global("speed", speed).build();
    let name = interpreter.gc().symbol("speed");
    assert_eq!(interpreter.get(&name), interpreter.gc().number(3));
    assert_eq!(interpreter.scope().depth(), 1);
}

#[test]
fn test_lookup_bound_distinguishes_unbound() {
    let mut interpreter = Interpreter::new();
    let gc_nil = interpreter.gc().nil();
    let name = interpreter.gc().symbol("nothing");

    assert_eq!(
        interpreter.lookup_bound(&name),
        Err(EvalError::UnboundVariable(name.clone()))
    );

    interpreter.set(name.clone(), gc_nil);
    assert_eq!(interpreter.lookup_bound(&name), Ok(Expr::Empty));
    assert!(interpreter.get(&name).is_nil());
}

#[test]
fn test_call_binds_and_pops() {
    let mut interpreter = Interpreter::new();
    let x = interpreter.gc().symbol("x");
    let params = params(&interpreter, &["x"]);
    let args = args(&interpreter, &[42]);

    let result = interpreter.call(&params, &args, |scoped| {
        assert_eq!(scoped.call_depth(), 1);
        scoped.lookup_bound(&x)
    });

    assert_eq!(result, Ok(interpreter.gc().number(42)));
    assert_eq!(interpreter.call_depth(), 0);
    assert!(interpreter.get(&x).is_nil());
}

#[test]
fn test_set_inside_call_reaches_globals() {
    let mut interpreter = Interpreter::new();
    let score = interpreter.gc().symbol("score");
    let empty = interpreter.gc().nil();

    let result = interpreter.call(&empty, &empty, |scoped| {
        let value = scoped.gc().number(100);
        scoped.set(score.clone(), value);
        Ok(Expr::Empty)
    });

    assert!(result.is_ok());
    assert_eq!(interpreter.get(&score), interpreter.gc().number(100));
}

#[test]
fn test_call_pops_frame_on_error() {
    let mut interpreter = Interpreter::new();
    let x = interpreter.gc().symbol("x");
    let params = params(&interpreter, &["x"]);
    let args = args(&interpreter, &[1]);

    let result = interpreter.call(&params, &args, |scoped| {
        let missing = scoped.gc().symbol("missing");
        scoped.lookup_bound(&missing)
    });

    assert!(matches!(result, Err(EvalError::UnboundVariable(_))));
    assert_eq!(interpreter.scope().depth(), 1);
    assert!(interpreter.get(&x).is_nil());
}

#[test]
fn test_recursion_hits_call_depth_limit() {
    fn recurse(interpreter: &mut Interpreter, empty: &Expr) -> EvalResult {
        interpreter.call(empty, empty, |scoped| recurse(scoped, empty))
    }

    let mut interpreter = Interpreter::builder().max_call_depth(16).build();
    let empty = interpreter.gc().nil();
    let result = recurse(&mut interpreter, &empty);

    assert_eq!(
        result,
        Err(EvalError::StackOverflow {
            depth: 17,
            limit: 16
        })
    );
    assert_eq!(interpreter.call_depth(), 0);
    assert_eq!(interpreter.scope().depth(), 1);
}

#[test]
fn test_closure_sees_captured_bindings() {
    let mut interpreter = Interpreter::new();
    let counter = interpreter.gc().symbol("counter");
    let one = interpreter.gc().number(1);
    let two = interpreter.gc().number(2);
    let empty = interpreter.gc().nil();

    interpreter.set(counter.clone(), one.clone());
    let captured = interpreter.capture();
    interpreter.set(counter.clone(), two.clone());

    let seen = interpreter.call_closure(&captured, &empty, &empty, |scoped| {
        Ok(scoped.get(&counter))
    });
    assert_eq!(seen, Ok(one));
    // Caller environment is back in place.
    assert_eq!(interpreter.get(&counter), two);
    assert_eq!(interpreter.scope().depth(), 1);
}

#[test]
fn test_closure_bindings_do_not_leak() {
    let mut interpreter = Interpreter::new();
    let local = interpreter.gc().symbol("local");
    let empty = interpreter.gc().nil();
    let captured = interpreter.capture();

    let result = interpreter.call_closure(&captured, &empty, &empty, |scoped| {
        let value = scoped.gc().string("inside");
        scoped.set(local.clone(), value);
        Ok(scoped.get(&local))
    });

    assert_eq!(result, Ok(interpreter.gc().string("inside")));
    assert!(interpreter.get(&local).is_nil());
    assert!(captured.get(&local).is_nil());
}

#[test]
fn test_closure_global_set_stays_in_snapshot() {
    let mut interpreter = Interpreter::new();
    let score = interpreter.gc().symbol("score");
    let empty = interpreter.gc().nil();
    let captured = interpreter.capture();

    let result = interpreter.call_closure(&captured, &empty, &empty, |scoped| {
        let value = scoped.gc().number(10);
        scoped.set(score.clone(), value);
        // Visible for the rest of the body through the snapshot's base frame.
        Ok(scoped.get(&score))
    });
    assert_eq!(result, Ok(interpreter.gc().number(10)));
    assert!(interpreter.get(&score).is_nil());

    // Handing the value back is how a closure publishes a global.
    let value = result.unwrap_or_default();
    interpreter.set(score.clone(), value.clone());
    assert_eq!(interpreter.get(&score), value);
}

#[test]
fn test_send_routes_to_host() {
    let mut interpreter = Interpreter::builder()
        .host(
            "player",
            Box::new(|gc: &Gc, message: &Expr| -> EvalResult {
                Ok(gc.list([gc.symbol("done"), message.clone()]))
            }),
        )
        .build();
    let gc = interpreter.gc();
    let path = gc.list([gc.symbol("player"), gc.symbol("jump")]);

    let reply = interpreter.send(&path);
    assert_eq!(reply.map(|r| r.to_string()), Ok("(done (jump))".to_string()));
}

#[test]
fn test_send_to_unknown_object() {
    let mut interpreter = Interpreter::builder().name("level").build();
    let gc = interpreter.gc();
    let path = gc.list([gc.symbol("goal"), gc.string("goal-1")]);

    let err = interpreter.send(&path).unwrap_err();
    assert_eq!(
        err,
        EvalError::UnknownObject {
            sender: "level".to_string(),
            target: "goal".to_string(),
        }
    );
    assert_eq!(
        err.to_expr(interpreter.gc()).to_string(),
        "(unknown-object level goal)"
    );
}

#[test]
fn test_send_requires_symbol_target() {
    let mut interpreter = Interpreter::new();
    let gc = interpreter.gc();
    let path = gc.list([gc.number(1)]);
    assert!(matches!(
        interpreter.send(&path),
        Err(EvalError::Match(MatchError::WrongArgumentType { .. }))
    ));
    let nil = interpreter.gc().nil();
    assert!(matches!(
        interpreter.send(&nil),
        Err(EvalError::Match(MatchError::WrongNumberOfArguments { .. }))
    ));
}

#[test]
fn test_register_replaces_host() {
    let mut interpreter = Interpreter::new();
    interpreter.register("level", Box::new(|gc: &Gc, _: &Expr| -> EvalResult { Ok(gc.number(1)) }));
    interpreter.register("level", Box::new(|gc: &Gc, _: &Expr| -> EvalResult { Ok(gc.number(2)) }));
    let gc = interpreter.gc();
    let path = gc.list([gc.symbol("level")]);
    assert_eq!(interpreter.send(&path), Ok(interpreter.gc().number(2)));
}
