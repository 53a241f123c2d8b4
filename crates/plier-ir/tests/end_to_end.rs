// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Front end → inference → canonicalization, driven through the public API.

use plier_ir::transform::{canonicalize, CanonicalizeConfig};
use plier_ir::{
    parse_type, verify, Context, FoldErrorKind, FunctionBuilder, Literal, OpId, PyType, Type,
    Value, VerifyErrorKind,
};

fn op_id(v: Value) -> OpId {
    match v {
        Value::Op(id) => id,
        Value::Param(_) => panic!("expected an op result, got {:?}", v),
    }
}

#[test]
fn arg_projection_after_inference() {
    let ctx = Context::new();
    let int = Type::py(&ctx, "int64").unwrap();

    let mut b = FunctionBuilder::new(&ctx, "add");
    b.add_param("x", int);
    b.add_param("y", int);
    let x = b.arg_typed(0, "x", int);
    let y = b.arg_typed(5, "y", int);
    let sum = b.binop(x, y, "+");
    b.ret(sum);
    let mut f = b.finish();

    let result = canonicalize(&ctx, &mut f, &CanonicalizeConfig::default());

    // x was replaced by parameter 0
    assert_eq!(result.replaced, 1);
    assert!(!f.ops[0].is_live());
    assert_eq!(f.ops[op_id(sum).0 as usize].operands[0], Value::Param(0));

    // y stays and carries an InvalidArgs diagnostic
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].op, op_id(y));
    assert_eq!(
        result.errors[0].kind,
        FoldErrorKind::ArgIndexOutOfRange { index: 5, arity: 2 }
    );
    assert!(f.ops[op_id(y).0 as usize].is_live());
    assert_eq!(f.ops[op_id(sum).0 as usize].operands[1], y);

    // and later verification still catches it
    let errors = verify(&ctx, &f).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].kind, VerifyErrorKind::InvalidArgs(_)));
}

#[test]
fn folds_wait_for_inference() {
    let ctx = Context::new();
    let int = Type::py(&ctx, "int64").unwrap();

    let mut b = FunctionBuilder::new(&ctx, "f");
    b.add_param("x", int);
    let x = b.arg(0, "x");
    let c = b.cast(x, Type::undefined(&ctx));
    b.ret(c);
    let mut f = b.finish();

    let config = CanonicalizeConfig::default();
    let before = canonicalize(&ctx, &mut f, &config);
    assert_eq!(before.replaced, 0);
    assert!(before.is_ok());

    // what the inference pass does: name the placeholders in place
    f.set_result_type(op_id(x), int);
    f.set_result_type(op_id(c), int);

    let after = canonicalize(&ctx, &mut f, &config);
    assert_eq!(after.replaced, 2);
    assert_eq!(f.ret, Some(Value::Param(0)));
    assert_eq!(verify(&ctx, &f), Ok(()));
}

#[test]
fn loop_header_shape_is_left_alone() {
    let ctx = Context::new();
    let mut b = FunctionBuilder::new(&ctx, "sum");
    b.add_param("xs", Type::undefined(&ctx));
    let xs = b.arg(0, "xs");
    let zero = b.constant(Literal::Int(0));
    let it = b.getiter(xs);
    let next = b.iternext(it);
    let item = b.pair_first(next);
    b.pair_second(next);
    let acc = b.binop(zero, item, "+");
    b.ret(acc);
    let mut f = b.finish();
    let text_before = f.display(&ctx).to_string();

    let result = canonicalize(&ctx, &mut f, &CanonicalizeConfig::default());
    assert_eq!(result.replaced, 0);
    assert_eq!(f.display(&ctx).to_string(), text_before);
}

#[test]
fn placeholder_text_is_not_round_tripped() {
    let ctx = Context::new();
    let named = PyType::get(&ctx, "float64").unwrap();
    let printed = Type::Py(named).display(&ctx).to_string();
    assert_eq!(printed, "PyType<float64>");
    assert!(parse_type(&printed, 0).is_err());
}
