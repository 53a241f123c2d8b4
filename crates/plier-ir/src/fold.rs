// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Local fold rules.
//!
//! A fold looks only at one operation, its operands' types and the
//! enclosing function signature. It never mutates; the caller applies the
//! outcome. Identical state always yields the identical outcome.

use crate::{Context, FoldError, FoldErrorKind, Function, Op, OpId, OpKind, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoldOutcome {
    Unchanged,
    /// Replace every use of the op's result with this existing value.
    Replace(Value),
    /// The op is inconsistent; leave it in place and report.
    Rejected(FoldError),
}

pub fn fold_op(ctx: &Context, func: &Function, id: OpId) -> FoldOutcome {
    let op = match func.op(id) {
        Some(op) if op.is_live() => op,
        _ => return FoldOutcome::Unchanged,
    };

    match &op.kind {
        OpKind::Arg { index, .. } => fold_arg(ctx, func, id, op, *index),
        OpKind::Cast => fold_cast(ctx, func, op),
        // Tuple arity, static index and pair projection folds assume a
        // multi-result producer that this IR does not model.
        OpKind::BuildTuple
        | OpKind::StaticGetItem { .. }
        | OpKind::PairFirst
        | OpKind::PairSecond => FoldOutcome::Unchanged,
        OpKind::Const { .. }
        | OpKind::Global { .. }
        | OpKind::Bin { .. }
        | OpKind::PyCall { .. }
        | OpKind::GetIter
        | OpKind::IterNext => FoldOutcome::Unchanged,
    }
}

/// `plier.arg` becomes the function parameter once its type is concrete
/// and agrees with the signature.
fn fold_arg(ctx: &Context, func: &Function, id: OpId, op: &Op, index: u32) -> FoldOutcome {
    if op.result_ty.is_undefined(ctx) {
        return FoldOutcome::Unchanged;
    }

    let reject = |kind: FoldErrorKind| {
        FoldOutcome::Rejected(FoldError {
            op: id,
            span: op.span,
            kind,
        })
    };

    let param = match func.param(index) {
        Some(param) => param,
        None => {
            return reject(FoldErrorKind::ArgIndexOutOfRange {
                index,
                arity: func.arity(),
            })
        }
    };

    if param.ty != op.result_ty {
        return reject(FoldErrorKind::ArgTypeMismatch {
            index,
            param_ty: param.ty.display(ctx).to_string(),
            declared_ty: op.result_ty.display(ctx).to_string(),
        });
    }

    FoldOutcome::Replace(Value::Param(index))
}

/// A cast between two equal concrete types is a no-op. Casts between
/// undefined placeholders stay, inference may still tell them apart.
fn fold_cast(ctx: &Context, func: &Function, op: &Op) -> FoldOutcome {
    let operand = match op.operands.first() {
        Some(v) => *v,
        None => return FoldOutcome::Unchanged,
    };
    match func.value_type(operand) {
        Some(ty) if ty == op.result_ty && !ty.is_undefined(ctx) => FoldOutcome::Replace(operand),
        _ => FoldOutcome::Unchanged,
    }
}
