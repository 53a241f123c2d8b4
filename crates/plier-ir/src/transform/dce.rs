// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Dead-operation sweep.
//!
//! Erases pure operations whose result nobody uses, then compacts the arena.
//! Compaction renumbers `OpId`s; callers holding ids from before the sweep
//! translate them with `Sweep::remap`.

use tracing::trace;

use crate::{Function, Op, OpId, Value};

#[derive(Debug, Clone, Default)]
pub struct Sweep {
    pub removed: usize,
    remap: Vec<Option<OpId>>,
}

impl Sweep {
    /// New id of an operation that survived the sweep.
    pub fn remap(&self, old: OpId) -> Option<OpId> {
        self.remap.get(old.0 as usize).copied().flatten()
    }
}

pub fn sweep_dead(func: &mut Function) -> Sweep {
    sweep_dead_keeping(func, &[])
}

/// Like [`sweep_dead`], but the ops in `keep` are neither erased nor
/// removed, used or not.
pub fn sweep_dead_keeping(func: &mut Function, keep: &[OpId]) -> Sweep {
    erase_unused(func, keep);

    let retained = retained(func, keep);
    let mut remap = Vec::with_capacity(func.ops.len());
    let mut next = 0u32;
    for kept in &retained {
        if *kept {
            remap.push(Some(OpId(next)));
            next += 1;
        } else {
            remap.push(None);
        }
    }

    let before = func.ops.len();
    let old_ops = std::mem::take(&mut func.ops);
    func.ops = old_ops
        .into_iter()
        .zip(&remap)
        .filter(|(_, new)| new.is_some())
        .map(|(mut op, _)| {
            for operand in op.operands.iter_mut() {
                *operand = remap_value(&remap, *operand);
            }
            op
        })
        .collect();
    func.ret = func.ret.map(|v| remap_value(&remap, v));

    let removed = before - func.ops.len();
    trace!(function = %func.name, removed, kept = keep.len(), "swept dead operations");
    Sweep { removed, remap }
}

/// Erase unused pure ops. Walking backwards lets a chain of dead ops
/// disappear in one pass, since users always follow their operands.
fn erase_unused(func: &mut Function, keep: &[OpId]) {
    let mut uses = use_counts(func);
    for idx in (0..func.ops.len()).rev() {
        let op = &func.ops[idx];
        let pinned = keep.contains(&OpId(idx as u32));
        if !op.is_live() || op.kind.has_side_effects() || uses[idx] > 0 || pinned {
            continue;
        }
        for operand in &op.operands {
            if let Value::Op(def) = operand {
                if let Some(count) = uses.get_mut(def.0 as usize) {
                    *count = count.saturating_sub(1);
                }
            }
        }
        func.ops[idx].erased = true;
    }
}

/// Uses by live ops and the return value, per arena slot.
fn use_counts(func: &Function) -> Vec<usize> {
    let mut uses = vec![0usize; func.ops.len()];
    let live_operands = func
        .ops
        .iter()
        .filter(|op| op.is_live())
        .flat_map(|op: &Op| op.operands.iter().copied());
    for value in live_operands.chain(func.ret) {
        if let Value::Op(def) = value {
            if let Some(count) = uses.get_mut(def.0 as usize) {
                *count += 1;
            }
        }
    }
    uses
}

/// Slots that survive compaction: live ops, kept ops, the return value and
/// everything they reach through operands, erased or not. An erased op that
/// is still referenced stays so the verifier can report the stale use, and
/// so do its own operands, which keeps every in-range operand resolvable.
fn retained(func: &Function, keep: &[OpId]) -> Vec<bool> {
    let mut retained: Vec<bool> = func.ops.iter().map(Op::is_live).collect();
    let roots = keep.iter().map(|id| Value::Op(*id)).chain(func.ret);
    for value in roots {
        if let Value::Op(id) = value {
            if let Some(slot) = retained.get_mut(id.0 as usize) {
                *slot = true;
            }
        }
    }

    let mut work: Vec<usize> = (0..retained.len()).filter(|&idx| retained[idx]).collect();
    while let Some(idx) = work.pop() {
        for operand in &func.ops[idx].operands {
            if let Value::Op(def) = operand {
                let def = def.0 as usize;
                if def < retained.len() && !retained[def] {
                    retained[def] = true;
                    work.push(def);
                }
            }
        }
    }
    retained
}

fn remap_value(remap: &[Option<OpId>], value: Value) -> Value {
    match value {
        // Every in-range operand of a retained op is retained itself. An
        // out-of-range id stays out of range, since the arena only shrinks.
        Value::Op(old) => match remap.get(old.0 as usize).copied().flatten() {
            Some(new) => Value::Op(new),
            None => value,
        },
        Value::Param(_) => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{verify, Context, FunctionBuilder, Literal, OpKind, Type, VerifyErrorKind};

    #[test]
    fn unused_pure_chain_is_removed() {
        let ctx = Context::new();
        let mut b = FunctionBuilder::new(&ctx, "f");
        let c = b.constant(Literal::Int(1));
        let t = b.build_tuple(&[c]);
        b.pair_first(t);
        let kept = b.constant(Literal::Int(2));
        b.ret(kept);
        let mut f = b.finish();

        let sweep = sweep_dead(&mut f);
        assert_eq!(sweep.removed, 3);
        assert_eq!(f.ops.len(), 1);
        assert_eq!(f.ret, Some(Value::Op(OpId(0))));
        assert_eq!(sweep.remap(OpId(3)), Some(OpId(0)));
        assert_eq!(sweep.remap(OpId(0)), None);
    }

    #[test]
    fn side_effects_and_their_operands_survive() {
        let ctx = Context::new();
        let mut b = FunctionBuilder::new(&ctx, "f");
        let g = b.global("print");
        let s = b.constant(Literal::Str("hi".into()));
        b.py_call::<&str>(g, &[s], vec![]);
        let mut f = b.finish();

        let sweep = sweep_dead(&mut f);
        assert_eq!(sweep.removed, 0);
        assert_eq!(f.ops.len(), 3);
    }

    #[test]
    fn compaction_rewrites_operands() {
        let ctx = Context::new();
        let mut b = FunctionBuilder::new(&ctx, "f");
        let x = b.add_param("x", Type::Int(64));
        let dead = b.cast(x, Type::Int(64));
        let it = b.getiter(x);
        let next = b.iternext(it);
        b.ret(next);
        let mut f = b.finish();
        if let Value::Op(id) = dead {
            f.erase(id);
        }

        let sweep = sweep_dead(&mut f);
        assert_eq!(sweep.removed, 1);
        assert!(matches!(f.ops[0].kind, OpKind::GetIter));
        assert_eq!(f.ops[1].operands, vec![Value::Op(OpId(0))]);
        assert_eq!(f.ret, Some(Value::Op(OpId(1))));
    }

    #[test]
    fn referenced_erased_op_is_kept() {
        let ctx = Context::new();
        let mut b = FunctionBuilder::new(&ctx, "f");
        let c = b.constant(Literal::None);
        let it = b.getiter(c);
        b.ret(it);
        let mut f = b.finish();
        f.erase(OpId(0));

        let sweep = sweep_dead(&mut f);
        assert_eq!(sweep.removed, 0);
        assert_eq!(f.ops.len(), 2);
    }

    #[test]
    fn kept_ops_survive_unused() {
        let ctx = Context::new();
        let mut b = FunctionBuilder::new(&ctx, "f");
        let x = b.add_param("x", Type::Int(64));
        let stray = b.arg_typed(5, "y", Type::Int(64));
        b.constant(Literal::Int(1));
        let it = b.getiter(x);
        b.ret(it);
        let mut f = b.finish();
        let Value::Op(stray) = stray else { panic!("arg must be an op") };

        let sweep = sweep_dead_keeping(&mut f, &[stray]);
        assert_eq!(sweep.removed, 1);
        let new = sweep.remap(stray).unwrap();
        assert!(f.ops[new.0 as usize].is_live());
        match &f.ops[new.0 as usize].kind {
            OpKind::Arg { index, .. } => assert_eq!(*index, 5),
            other => panic!("expected plier.arg, got {other:?}"),
        }
        assert_eq!(f.ret, Some(Value::Op(OpId(1))));
    }

    #[test]
    fn operands_of_referenced_erased_op_are_kept() {
        let ctx = Context::new();
        let mut b = FunctionBuilder::new(&ctx, "f");
        b.constant(Literal::Int(7));
        let c = b.constant(Literal::None);
        let t = b.build_tuple(&[c]);
        let it = b.getiter(t);
        b.ret(it);
        let mut f = b.finish();
        // Malformed: the tuple is erased but still used by the live getiter.
        f.erase(OpId(2));

        let sweep = sweep_dead(&mut f);
        assert_eq!(sweep.removed, 1);
        assert_eq!(sweep.remap(OpId(0)), None);
        assert_eq!(f.ops.len(), 3);
        assert!(matches!(f.ops[0].kind, OpKind::Const { value: Literal::None }));
        assert!(matches!(f.ops[1].kind, OpKind::BuildTuple));
        assert_eq!(f.ops[1].operands, vec![Value::Op(OpId(0))]);
        assert_eq!(f.ops[2].operands, vec![Value::Op(OpId(1))]);

        let errors = verify(&ctx, &f).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0].kind, VerifyErrorKind::UseOfErased { .. }));
    }
}
