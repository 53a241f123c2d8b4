// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Plier operations and the values they produce.

use crate::Span;
use crate::Type;

/// Stable index of an operation in its function's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OpId(pub u32);

/// An SSA value: a function parameter or the single result of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    Param(u32),
    Op(OpId),
}

/// Literal materialized by `plier.const`.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    None,
}

/// Operation kind with its static attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum OpKind {
    /// N-th positional parameter of the enclosing function.
    Arg { index: u32, name: String },
    Const { value: Literal },
    /// Reference to an external symbol, resolved later.
    Global { name: String },
    /// Binary operator. The symbol is not interpreted here.
    Bin { op: String },
    Cast,
    /// Operands are `[callee, positional..., keyword values...]`.
    /// `kw_start` counts the positional arguments; `kw_names` parallels the
    /// keyword-value tail.
    PyCall { kw_start: u32, kw_names: Vec<String> },
    BuildTuple,
    /// Operands are `[container, index_var]`; `index` is the literal index.
    StaticGetItem { index: u32 },
    GetIter,
    /// Result is understood downstream as a (next element, still valid) pair.
    IterNext,
    PairFirst,
    PairSecond,
}

/// Number of operands an operation kind accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, n: usize) -> bool {
        match self {
            Arity::Exactly(k) => n == k,
            Arity::AtLeast(k) => n >= k,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::Exactly(k) => write!(f, "{}", k),
            Arity::AtLeast(k) => write!(f, "at least {}", k),
        }
    }
}

impl OpKind {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            OpKind::Arg { .. } => "plier.arg",
            OpKind::Const { .. } => "plier.const",
            OpKind::Global { .. } => "plier.global",
            OpKind::Bin { .. } => "plier.binop",
            OpKind::Cast => "plier.cast",
            OpKind::PyCall { .. } => "plier.call",
            OpKind::BuildTuple => "plier.build_tuple",
            OpKind::StaticGetItem { .. } => "plier.static_getitem",
            OpKind::GetIter => "plier.getiter",
            OpKind::IterNext => "plier.iternext",
            OpKind::PairFirst => "plier.pair_first",
            OpKind::PairSecond => "plier.pair_second",
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            OpKind::Arg { .. } | OpKind::Const { .. } | OpKind::Global { .. } => Arity::Exactly(0),
            OpKind::Cast
            | OpKind::GetIter
            | OpKind::IterNext
            | OpKind::PairFirst
            | OpKind::PairSecond => Arity::Exactly(1),
            OpKind::Bin { .. } | OpKind::StaticGetItem { .. } => Arity::Exactly(2),
            OpKind::PyCall { .. } => Arity::AtLeast(1),
            OpKind::BuildTuple => Arity::AtLeast(0),
        }
    }

    /// Kinds that may run user code once lowered (operator overloads,
    /// `__getitem__`, `__iter__`, calls). These are never swept as dead.
    pub fn has_side_effects(&self) -> bool {
        match self {
            OpKind::Bin { .. }
            | OpKind::PyCall { .. }
            | OpKind::StaticGetItem { .. }
            | OpKind::GetIter
            | OpKind::IterNext => true,
            OpKind::Arg { .. }
            | OpKind::Const { .. }
            | OpKind::Global { .. }
            | OpKind::Cast
            | OpKind::BuildTuple
            | OpKind::PairFirst
            | OpKind::PairSecond => false,
        }
    }
}

/// A single operation record in a function arena.
#[derive(Debug, Clone)]
pub struct Op {
    pub kind: OpKind,
    pub operands: Vec<Value>,
    /// Declared result type. Only the inference pass replaces the sentinel.
    pub result_ty: Type,
    pub span: Option<Span>,
    /// Set once the op has been replaced; removed by the dead sweep.
    pub erased: bool,
}

impl Op {
    pub fn new(kind: OpKind, operands: Vec<Value>, result_ty: Type) -> Self {
        Self {
            kind,
            operands,
            result_ty,
            span: None,
            erased: false,
        }
    }

    pub fn is_live(&self) -> bool {
        !self.erased
    }

    /// Callee of a `plier.call`.
    pub fn callee(&self) -> Option<Value> {
        match self.kind {
            OpKind::PyCall { .. } => self.operands.first().copied(),
            _ => None,
        }
    }

    /// Flattened positional-then-keyword argument list of a `plier.call`.
    pub fn call_args(&self) -> &[Value] {
        match self.kind {
            OpKind::PyCall { .. } => self.operands.get(1..).unwrap_or(&[]),
            _ => &[],
        }
    }

    pub fn positional_args(&self) -> &[Value] {
        match &self.kind {
            OpKind::PyCall { kw_start, .. } => {
                let args = self.call_args();
                &args[..(*kw_start as usize).min(args.len())]
            }
            _ => &[],
        }
    }

    /// `(name, value)` pairs of a `plier.call`, in call order.
    pub fn keyword_args(&self) -> Vec<(&str, Value)> {
        match &self.kind {
            OpKind::PyCall { kw_start, kw_names } => {
                let args = self.call_args();
                let tail = args.get(*kw_start as usize..).unwrap_or(&[]);
                kw_names
                    .iter()
                    .map(String::as_str)
                    .zip(tail.iter().copied())
                    .collect()
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Context;

    fn call(kw_start: u32, kw_names: &[&str], operands: Vec<Value>) -> Op {
        let ctx = Context::new();
        Op::new(
            OpKind::PyCall {
                kw_start,
                kw_names: kw_names.iter().map(|s| s.to_string()).collect(),
            },
            operands,
            Type::undefined(&ctx),
        )
    }

    #[test]
    fn call_accessors_split_operands() {
        let op = call(
            1,
            &["sep"],
            vec![Value::Op(OpId(0)), Value::Param(0), Value::Param(1)],
        );
        assert_eq!(op.callee(), Some(Value::Op(OpId(0))));
        assert_eq!(op.call_args(), &[Value::Param(0), Value::Param(1)]);
        assert_eq!(op.positional_args(), &[Value::Param(0)]);
        assert_eq!(op.keyword_args(), vec![("sep", Value::Param(1))]);
    }

    #[test]
    fn malformed_split_does_not_panic() {
        let op = call(5, &[], vec![Value::Op(OpId(0)), Value::Param(0)]);
        assert_eq!(op.positional_args(), &[Value::Param(0)]);
        assert!(op.keyword_args().is_empty());
    }

    #[test]
    fn non_call_has_no_call_parts() {
        let ctx = Context::new();
        let op = Op::new(OpKind::Cast, vec![Value::Param(0)], Type::undefined(&ctx));
        assert_eq!(op.callee(), None);
        assert!(op.call_args().is_empty());
        assert!(op.keyword_args().is_empty());
    }

    #[test]
    fn arity_table() {
        assert!(OpKind::Cast.arity().accepts(1));
        assert!(!OpKind::Bin { op: "+".into() }.arity().accepts(1));
        assert!(OpKind::BuildTuple.arity().accepts(0));
        assert!(!OpKind::PyCall { kw_start: 0, kw_names: vec![] }.arity().accepts(0));
        assert_eq!(Arity::AtLeast(1).to_string(), "at least 1");
    }

    #[test]
    fn side_effect_classification() {
        assert!(OpKind::IterNext.has_side_effects());
        assert!(OpKind::Bin { op: "<".into() }.has_side_effects());
        assert!(!OpKind::PairFirst.has_side_effects());
        assert!(!OpKind::Const { value: Literal::None }.has_side_effects());
    }
}
