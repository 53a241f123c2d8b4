// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error types for type construction, type parsing, folding and verification.

use thiserror::Error;

use crate::{OpId, Span};

/// Placeholder type construction failure. Fails at the call site.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// A named placeholder was requested with an empty name.
    #[error("placeholder type name must not be empty")]
    InvalidArgument,
}

/// Failure to read a type from text. Aborts only the local parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unsupported syntax: cannot parse type `{text}`")]
    UnsupportedSyntax { text: String },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for ParseError {}

/// A fold rule refused to fire because the operation is inconsistent.
///
/// Non-fatal: the operation stays in place for inference or verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldError {
    pub op: OpId,
    pub span: Option<Span>,
    pub kind: FoldErrorKind,
}

/// Both variants are the "invalid function args" condition of `plier.arg`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FoldErrorKind {
    #[error("invalid function args: index {index} is out of range for {arity} parameter(s)")]
    ArgIndexOutOfRange { index: u32, arity: usize },

    #[error("invalid function args: parameter {index} has type `{param_ty}`, but the argument is declared as `{declared_ty}`")]
    ArgTypeMismatch {
        index: u32,
        param_ty: String,
        declared_ty: String,
    },
}

impl std::fmt::Display for FoldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "%{}: {}", self.op.0, self.kind)
    }
}

impl std::error::Error for FoldError {}

/// Structural problem found by `verify`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyError {
    /// Offending operation; `None` for the function's return value.
    pub op: Option<OpId>,
    pub span: Option<Span>,
    pub kind: VerifyErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyErrorKind {
    #[error("`{mnemonic}` expects {expected} operand(s), found {found}")]
    OperandCount {
        mnemonic: &'static str,
        expected: String,
        found: usize,
    },

    #[error("call has {names} keyword name(s) but {values} keyword value(s)")]
    KeywordMismatch { names: usize, values: usize },

    #[error("%arg{index} does not exist, the function has {arity} parameter(s)")]
    ParamOutOfRange { index: u32, arity: usize },

    #[error("%{operand} is used before it is defined")]
    UseBeforeDef { operand: u32 },

    #[error("%{operand} refers to an erased operation")]
    UseOfErased { operand: u32 },

    #[error("{0}")]
    InvalidArgs(FoldErrorKind),
}

impl std::fmt::Display for VerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.op {
            Some(op) => write!(f, "%{}: {}", op.0, self.kind),
            None => write!(f, "return: {}", self.kind),
        }
    }
}

impl std::error::Error for VerifyError {}
