// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Plier IR - the entry-level IR for a dynamically-typed front end.
//!
//! Operations are emitted over values whose concrete type is not yet known.
//! Every such value carries a placeholder `PyType` (the undefined sentinel
//! until inference names it). Local fold rules fire once types are known.

mod builder;
mod display;
mod error;
mod fold;
mod function;
mod op;
mod parse;
mod span;
mod types;
mod verify;

pub mod transform;

pub use builder::FunctionBuilder;
pub use display::{FunctionDisplay, ModuleDisplay, TypeDisplay};
pub use error::{
    FoldError, FoldErrorKind, ParseError, ParseErrorKind, TypeError, VerifyError,
    VerifyErrorKind,
};
pub use fold::{fold_op, FoldOutcome};
pub use function::{Function, Module, Param};
pub use op::{Arity, Literal, Op, OpId, OpKind, Value};
pub use parse::parse_type;
pub use span::{LineMap, Span};
pub use types::{Context, PyType, Type};
pub use verify::verify;
