// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Function bodies - an append-only arena of operations in program order.
//!
//! Operations refer to each other by `OpId` index, never by owning
//! reference, so the def-use graph cannot form ownership cycles.

use crate::{Op, OpId, Type, Value};

/// Function parameter with its declared type.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: Type,
}

/// A straight-line function body. Control flow belongs to the host framework.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub params: Vec<Param>,
    pub ops: Vec<Op>,
    pub ret: Option<Value>,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            ops: Vec::new(),
            ret: None,
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn param(&self, index: u32) -> Option<&Param> {
        self.params.get(index as usize)
    }

    pub fn op(&self, id: OpId) -> Option<&Op> {
        self.ops.get(id.0 as usize)
    }

    pub fn op_mut(&mut self, id: OpId) -> Option<&mut Op> {
        self.ops.get_mut(id.0 as usize)
    }

    /// Type of a value, or `None` if it names nothing in this function.
    pub fn value_type(&self, value: Value) -> Option<Type> {
        match value {
            Value::Param(i) => self.param(i).map(|p| p.ty),
            Value::Op(id) => self.op(id).map(|op| op.result_ty),
        }
    }

    pub fn live_ops(&self) -> impl Iterator<Item = (OpId, &Op)> {
        self.ops
            .iter()
            .enumerate()
            .filter(|(_, op)| op.is_live())
            .map(|(i, op)| (OpId(i as u32), op))
    }

    /// Live operations consuming `value`, in program order.
    pub fn users(&self, value: Value) -> Vec<OpId> {
        self.live_ops()
            .filter(|(_, op)| op.operands.contains(&value))
            .map(|(id, _)| id)
            .collect()
    }

    /// Used by inference to replace a sentinel result type in place.
    pub fn set_result_type(&mut self, id: OpId, ty: Type) -> bool {
        match self.op_mut(id) {
            Some(op) => {
                op.result_ty = ty;
                true
            }
            None => false,
        }
    }

    /// Point every consumer of `from`'s result at `to` instead.
    /// Returns the number of operand slots rewritten (the return value included).
    pub fn replace_all_uses(&mut self, from: OpId, to: Value) -> usize {
        let old = Value::Op(from);
        let mut rewritten = 0;
        for op in self.ops.iter_mut().filter(|op| op.is_live()) {
            for operand in op.operands.iter_mut().filter(|v| **v == old) {
                *operand = to;
                rewritten += 1;
            }
        }
        if self.ret == Some(old) {
            self.ret = Some(to);
            rewritten += 1;
        }
        rewritten
    }

    /// Mark an operation dead. The arena slot stays until the dead sweep.
    pub fn erase(&mut self, id: OpId) {
        if let Some(op) = self.op_mut(id) {
            op.erased = true;
        }
    }
}

/// All functions of one compilation unit.
#[derive(Debug, Clone, Default)]
pub struct Module {
    pub functions: Vec<Function>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, func: Function) {
        self.functions.push(func);
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }
}
