// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! FunctionBuilder - construction entry points used by the front end.
//!
//! Every constructor except `cast` gives its result the undefined
//! placeholder; concrete typing is left to the inference pass.

use crate::{Context, Function, Literal, Op, OpId, OpKind, Param, Span, Type, Value};

pub struct FunctionBuilder<'ctx> {
    ctx: &'ctx Context,
    function: Function,
    span: Option<Span>,
}

impl<'ctx> FunctionBuilder<'ctx> {
    pub fn new(ctx: &'ctx Context, name: impl Into<String>) -> Self {
        Self {
            ctx,
            function: Function::new(name),
            span: None,
        }
    }

    pub fn context(&self) -> &'ctx Context {
        self.ctx
    }

    pub fn add_param(&mut self, name: impl Into<String>, ty: Type) -> Value {
        let index = self.function.params.len() as u32;
        self.function.params.push(Param {
            name: name.into(),
            ty,
        });
        Value::Param(index)
    }

    /// Source location attached to subsequently emitted operations.
    pub fn set_span(&mut self, span: Option<Span>) {
        self.span = span;
    }

    /// Append an operation with an explicit result type.
    pub fn push_op(&mut self, kind: OpKind, operands: Vec<Value>, result_ty: Type) -> Value {
        let id = OpId(self.function.ops.len() as u32);
        let mut op = Op::new(kind, operands, result_ty);
        op.span = self.span;
        self.function.ops.push(op);
        Value::Op(id)
    }

    fn push_untyped(&mut self, kind: OpKind, operands: Vec<Value>) -> Value {
        let ty = Type::undefined(self.ctx);
        self.push_op(kind, operands, ty)
    }

    pub fn arg(&mut self, index: u32, name: impl Into<String>) -> Value {
        self.push_untyped(
            OpKind::Arg {
                index,
                name: name.into(),
            },
            Vec::new(),
        )
    }

    pub fn arg_typed(&mut self, index: u32, name: impl Into<String>, ty: Type) -> Value {
        self.push_op(
            OpKind::Arg {
                index,
                name: name.into(),
            },
            Vec::new(),
            ty,
        )
    }

    pub fn constant(&mut self, value: Literal) -> Value {
        self.push_untyped(OpKind::Const { value }, Vec::new())
    }

    pub fn global(&mut self, name: impl Into<String>) -> Value {
        self.push_untyped(OpKind::Global { name: name.into() }, Vec::new())
    }

    pub fn binop(&mut self, lhs: Value, rhs: Value, op: impl Into<String>) -> Value {
        self.push_untyped(OpKind::Bin { op: op.into() }, vec![lhs, rhs])
    }

    pub fn cast(&mut self, value: Value, ty: Type) -> Value {
        self.push_op(OpKind::Cast, vec![value], ty)
    }

    /// Flattens `[callee, args..., kwarg values...]` and records the split.
    pub fn py_call<S: Into<String>>(
        &mut self,
        func: Value,
        args: &[Value],
        kwargs: Vec<(S, Value)>,
    ) -> Value {
        let mut operands = Vec::with_capacity(1 + args.len() + kwargs.len());
        operands.push(func);
        operands.extend_from_slice(args);
        let kw_start = args.len() as u32;
        let mut kw_names = Vec::with_capacity(kwargs.len());
        for (name, value) in kwargs {
            kw_names.push(name.into());
            operands.push(value);
        }
        self.push_untyped(OpKind::PyCall { kw_start, kw_names }, operands)
    }

    pub fn build_tuple(&mut self, elems: &[Value]) -> Value {
        self.push_untyped(OpKind::BuildTuple, elems.to_vec())
    }

    pub fn static_getitem(&mut self, value: Value, index_var: Value, index: u32) -> Value {
        self.push_untyped(OpKind::StaticGetItem { index }, vec![value, index_var])
    }

    pub fn getiter(&mut self, value: Value) -> Value {
        self.push_untyped(OpKind::GetIter, vec![value])
    }

    pub fn iternext(&mut self, iter: Value) -> Value {
        self.push_untyped(OpKind::IterNext, vec![iter])
    }

    pub fn pair_first(&mut self, pair: Value) -> Value {
        self.push_untyped(OpKind::PairFirst, vec![pair])
    }

    pub fn pair_second(&mut self, pair: Value) -> Value {
        self.push_untyped(OpKind::PairSecond, vec![pair])
    }

    pub fn ret(&mut self, value: Value) {
        self.function.ret = Some(value);
    }

    pub fn finish(self) -> Function {
        self.function
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op_of(f: &Function, v: Value) -> &Op {
        match v {
            Value::Op(id) => f.op(id).unwrap(),
            Value::Param(_) => panic!("expected an op result, got {:?}", v),
        }
    }

    #[test]
    fn constructors_default_to_undefined() {
        let ctx = Context::new();
        let mut b = FunctionBuilder::new(&ctx, "f");
        let x = b.arg(0, "x");
        let one = b.constant(Literal::Int(1));
        let g = b.global("len");
        let sum = b.binop(x, one, "+");
        let t = b.build_tuple(&[x, sum]);
        let it = b.getiter(t);
        let next = b.iternext(it);
        let first = b.pair_first(next);
        let second = b.pair_second(next);
        let item = b.static_getitem(t, one, 0);
        let call = b.py_call::<&str>(g, &[t], vec![]);
        let f = b.finish();

        for v in [x, one, g, sum, t, it, next, first, second, item, call] {
            assert!(op_of(&f, v).result_ty.is_undefined(&ctx), "{:?}", v);
        }
        assert_eq!(op_of(&f, sum).operands, vec![x, one]);
        assert_eq!(op_of(&f, item).operands, vec![t, one]);
        assert!(matches!(op_of(&f, item).kind, OpKind::StaticGetItem { index: 0 }));
    }

    #[test]
    fn py_call_flattens_arguments() {
        let ctx = Context::new();
        let mut b = FunctionBuilder::new(&ctx, "f");
        let g = b.global("g");
        let a0 = b.constant(Literal::Int(0));
        let a1 = b.constant(Literal::Int(1));
        let b0 = b.constant(Literal::Str("v".into()));
        let call = b.py_call(g, &[a0, a1], vec![("k", b0)]);
        let f = b.finish();

        let op = op_of(&f, call);
        assert_eq!(op.callee(), Some(g));
        assert_eq!(op.call_args(), &[a0, a1, b0]);
        match &op.kind {
            OpKind::PyCall { kw_start, kw_names } => {
                assert_eq!(*kw_start, 2);
                assert_eq!(kw_names, &vec!["k".to_string()]);
                assert_eq!(kw_names.len(), op.call_args().len() - *kw_start as usize);
            }
            other => panic!("expected PyCall, got {:?}", other),
        }
    }

    #[test]
    fn explicit_types_and_spans() {
        let ctx = Context::new();
        let int = Type::py(&ctx, "int64").unwrap();
        let mut b = FunctionBuilder::new(&ctx, "f");
        let p = b.add_param("x", int);
        b.set_span(Some(Span::new(4, 9)));
        let x = b.arg_typed(0, "x", int);
        let c = b.cast(x, Type::Float(64));
        b.set_span(None);
        let g = b.global("print");
        b.ret(c);
        let f = b.finish();

        assert_eq!(p, Value::Param(0));
        assert_eq!(op_of(&f, x).result_ty, int);
        assert_eq!(op_of(&f, c).result_ty, Type::Float(64));
        assert_eq!(op_of(&f, c).span, Some(Span::new(4, 9)));
        assert_eq!(op_of(&f, g).span, None);
        assert_eq!(f.ret, Some(c));
    }
}
