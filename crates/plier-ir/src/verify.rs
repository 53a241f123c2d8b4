// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Structural verification of a function body.
//!
//! Catches what construction and folding leave for later: malformed operand
//! lists, broken def-use order, uses of erased ops, and `plier.arg` ops whose
//! concrete type disagrees with the signature.

use crate::{
    fold_op, Context, FoldOutcome, Function, Op, OpId, OpKind, Value, VerifyError,
    VerifyErrorKind,
};

pub fn verify(ctx: &Context, func: &Function) -> Result<(), Vec<VerifyError>> {
    let mut errors = Vec::new();

    for (id, op) in func.live_ops() {
        let mut report = |kind: VerifyErrorKind| {
            errors.push(VerifyError {
                op: Some(id),
                span: op.span,
                kind,
            })
        };

        let arity = op.kind.arity();
        if !arity.accepts(op.operands.len()) {
            report(VerifyErrorKind::OperandCount {
                mnemonic: op.kind.mnemonic(),
                expected: arity.to_string(),
                found: op.operands.len(),
            });
        }

        if let OpKind::PyCall { kw_start, kw_names } = &op.kind {
            let values = op.call_args().len().saturating_sub(*kw_start as usize);
            if *kw_start as usize > op.call_args().len() || kw_names.len() != values {
                report(VerifyErrorKind::KeywordMismatch {
                    names: kw_names.len(),
                    values,
                });
            }
        }

        for operand in &op.operands {
            if let Some(kind) = check_operand(func, *operand, Some(id)) {
                report(kind);
            }
        }

        if let OpKind::Arg { .. } = op.kind {
            if let FoldOutcome::Rejected(err) = fold_op(ctx, func, id) {
                report(VerifyErrorKind::InvalidArgs(err.kind));
            }
        }
    }

    if let Some(ret) = func.ret {
        if let Some(kind) = check_operand(func, ret, None) {
            errors.push(VerifyError {
                op: None,
                span: None,
                kind,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `user` is `None` for the return value, which may use any op.
fn check_operand(func: &Function, value: Value, user: Option<OpId>) -> Option<VerifyErrorKind> {
    match value {
        Value::Param(index) if func.param(index).is_none() => {
            Some(VerifyErrorKind::ParamOutOfRange {
                index,
                arity: func.arity(),
            })
        }
        Value::Param(_) => None,
        Value::Op(def) => {
            let defined_before = user.map_or(true, |u| def < u);
            match func.op(def) {
                Some(_) if !defined_before => Some(VerifyErrorKind::UseBeforeDef { operand: def.0 }),
                None => Some(VerifyErrorKind::UseBeforeDef { operand: def.0 }),
                Some(Op { erased: true, .. }) => {
                    Some(VerifyErrorKind::UseOfErased { operand: def.0 })
                }
                Some(_) => None,
            }
        }
    }
}
