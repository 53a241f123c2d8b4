// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Textual form of Plier IR.
//!
//! Types print through the context that owns their names, so printing goes
//! through small wrappers: `ty.display(&ctx)`, `func.display(&ctx)`.

use crate::*;
use std::fmt;

pub struct TypeDisplay<'a> {
    ty: Type,
    ctx: &'a Context,
}

impl Type {
    pub fn display<'a>(&self, ctx: &'a Context) -> TypeDisplay<'a> {
        TypeDisplay { ty: *self, ctx }
    }
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ty {
            Type::Py(py) => write!(f, "PyType<{}>", py.name(self.ctx)),
            Type::Bool => write!(f, "i1"),
            Type::Int(width) => write!(f, "i{}", width),
            Type::Float(width) => write!(f, "f{}", width),
            Type::None => write!(f, "none"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Param(i) => write!(f, "%arg{}", i),
            Value::Op(id) => write!(f, "%{}", id.0),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{}", v),
            Literal::Float(v) => write!(f, "{:?}", v),
            Literal::Bool(v) => write!(f, "{}", v),
            Literal::Str(s) => write!(f, "\"{}\"", s.escape_debug()),
            Literal::None => write!(f, "none"),
        }
    }
}

fn write_attrs(f: &mut fmt::Formatter<'_>, kind: &OpKind) -> fmt::Result {
    match kind {
        OpKind::Arg { index, name } => write!(f, " {{index = {}, name = \"{}\"}}", index, name),
        OpKind::Const { value } => write!(f, " {{value = {}}}", value),
        OpKind::Global { name } => write!(f, " {{name = \"{}\"}}", name),
        OpKind::Bin { op } => write!(f, " {{op = \"{}\"}}", op),
        OpKind::PyCall { kw_start, kw_names } => {
            write!(f, " {{kw_start = {}, kw_names = [", kw_start)?;
            for (i, name) in kw_names.iter().enumerate() {
                if i > 0 { write!(f, ", ")?; }
                write!(f, "\"{}\"", name)?;
            }
            write!(f, "]}}")
        }
        OpKind::StaticGetItem { index } => write!(f, " {{index = {}}}", index),
        OpKind::Cast
        | OpKind::BuildTuple
        | OpKind::GetIter
        | OpKind::IterNext
        | OpKind::PairFirst
        | OpKind::PairSecond => Ok(()),
    }
}

pub struct FunctionDisplay<'a> {
    func: &'a Function,
    ctx: &'a Context,
}

impl Function {
    pub fn display<'a>(&'a self, ctx: &'a Context) -> FunctionDisplay<'a> {
        FunctionDisplay { func: self, ctx }
    }
}

impl fmt::Display for FunctionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let func = self.func;
        write!(f, "func @{}(", func.name)?;
        for (i, p) in func.params.iter().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            write!(f, "%arg{}: {}", i, p.ty.display(self.ctx))?;
        }
        writeln!(f, ") {{")?;

        for (id, op) in func.live_ops() {
            write!(f, "  %{} = {}(", id.0, op.kind.mnemonic())?;
            for (i, v) in op.operands.iter().enumerate() {
                if i > 0 { write!(f, ", ")?; }
                write!(f, "{}", v)?;
            }
            write!(f, ")")?;
            write_attrs(f, &op.kind)?;
            writeln!(f, " : {}", op.result_ty.display(self.ctx))?;
        }

        match func.ret {
            Some(v) => writeln!(f, "  return {}", v)?,
            None => writeln!(f, "  return")?,
        }
        write!(f, "}}")
    }
}

pub struct ModuleDisplay<'a> {
    module: &'a Module,
    ctx: &'a Context,
}

impl Module {
    pub fn display<'a>(&'a self, ctx: &'a Context) -> ModuleDisplay<'a> {
        ModuleDisplay { module: self, ctx }
    }
}

impl fmt::Display for ModuleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, func) in self.module.functions.iter().enumerate() {
            if i > 0 { writeln!(f)?; }
            writeln!(f, "{}", func.display(self.ctx))?;
        }
        Ok(())
    }
}
