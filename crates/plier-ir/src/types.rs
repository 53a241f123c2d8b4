// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! IR type system - placeholder types plus the host's concrete builtins.

use std::fmt;

use lasso::{Spur, ThreadedRodeo};

use crate::error::TypeError;

/// Compilation context owning the placeholder-name interning table.
///
/// Create one per compilation unit and pass it by reference to every
/// builder, fold and printer. Interning only needs `&Context`; the table
/// guarantees each distinct name is inserted at most once, even when the
/// context is shared between threads.
pub struct Context {
    names: ThreadedRodeo,
    undefined: Spur,
}

impl Context {
    pub fn new() -> Self {
        let names = ThreadedRodeo::new();
        let undefined = names.get_or_intern_static("");
        Self { names, undefined }
    }

    /// Distinct placeholder names interned so far, sentinel included.
    pub fn interned_count(&self) -> usize {
        self.names.len()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("interned", &self.names.len())
            .finish()
    }
}

/// Nominal placeholder type: "a value whose concrete type is not yet known".
///
/// A cheap handle into the owning `Context`. Equal names share one handle, so
/// equality is a key comparison. Handles from different contexts must not be
/// mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PyType(Spur);

impl PyType {
    /// Interned placeholder named `name`. The empty name is reserved for
    /// the undefined sentinel and is rejected.
    pub fn get(ctx: &Context, name: &str) -> Result<PyType, TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidArgument);
        }
        Ok(PyType(ctx.names.get_or_intern(name)))
    }

    /// The "not yet known" sentinel.
    pub fn undefined(ctx: &Context) -> PyType {
        PyType(ctx.undefined)
    }

    /// Stored name; empty for the sentinel.
    pub fn name(self, ctx: &Context) -> &str {
        ctx.names.resolve(&self.0)
    }

    pub fn is_undefined(self, ctx: &Context) -> bool {
        self.0 == ctx.undefined
    }
}

/// IR type - a closed set. Every printer and query matches exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// Placeholder (possibly the undefined sentinel).
    Py(PyType),
    /// Host builtins assigned by inference or declared on function signatures.
    Bool,
    Int(u32),
    Float(u32),
    None,
}

impl Type {
    pub fn undefined(ctx: &Context) -> Type {
        Type::Py(PyType::undefined(ctx))
    }

    /// Placeholder named `name`.
    pub fn py(ctx: &Context, name: &str) -> Result<Type, TypeError> {
        PyType::get(ctx, name).map(Type::Py)
    }

    /// True only for the undefined sentinel. Named placeholders and builtins
    /// count as concrete for fold purposes.
    pub fn is_undefined(&self, ctx: &Context) -> bool {
        match self {
            Type::Py(py) => py.is_undefined(ctx),
            Type::Bool | Type::Int(_) | Type::Float(_) | Type::None => false,
        }
    }
}
