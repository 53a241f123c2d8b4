// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Canonicalization driver.
//!
//! Sweeps live ops in program order and applies each fold outcome:
//! `Replace` rewires every use and erases the op, `Rejected` is recorded
//! once per op and the op stays. Repeats until nothing changes or the
//! iteration cap is hit. Users follow their operands in the arena, so a
//! chain of foldable casts collapses within a single sweep.

use std::collections::HashSet;

use tracing::{debug, trace};

use super::dce::sweep_dead_keeping;
use crate::{fold_op, Context, FoldError, FoldOutcome, Function, Module, OpId};

#[derive(Debug, Clone)]
pub struct CanonicalizeConfig {
    pub max_iterations: usize,
    /// Run the dead sweep afterwards. Off by default: removing dead code is
    /// left to the host's own cleanup.
    pub sweep_dead: bool,
}

impl Default for CanonicalizeConfig {
    fn default() -> Self {
        Self {
            max_iterations: 8,
            sweep_dead: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct CanonicalizeResult {
    /// Ops replaced by an existing value.
    pub replaced: usize,
    /// Ops removed by the dead sweep (0 unless enabled).
    pub swept: usize,
    pub iterations: usize,
    /// Non-fatal fold diagnostics, in program order of first report.
    pub errors: Vec<FoldError>,
}

impl CanonicalizeResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn canonicalize(ctx: &Context, func: &mut Function, config: &CanonicalizeConfig) -> CanonicalizeResult {
    let mut result = CanonicalizeResult::default();
    let mut reported: HashSet<OpId> = HashSet::new();

    while result.iterations < config.max_iterations {
        result.iterations += 1;
        let mut changed = false;

        for idx in 0..func.ops.len() {
            let id = OpId(idx as u32);
            match fold_op(ctx, func, id) {
                FoldOutcome::Unchanged => {}
                FoldOutcome::Replace(value) => {
                    let uses = func.replace_all_uses(id, value);
                    func.erase(id);
                    trace!(op = id.0, %value, uses, "folded");
                    result.replaced += 1;
                    changed = true;
                }
                FoldOutcome::Rejected(err) => {
                    if reported.insert(id) {
                        debug!(function = %func.name, op = id.0, "{}", err.kind);
                        result.errors.push(err);
                    }
                }
            }
        }

        if !changed {
            break;
        }
    }

    if config.sweep_dead {
        // Rejected ops stay for the verifier, even when nothing uses them.
        let rejected: Vec<OpId> = result.errors.iter().map(|err| err.op).collect();
        let sweep = sweep_dead_keeping(func, &rejected);
        result.swept = sweep.removed;
        for err in &mut result.errors {
            match sweep.remap(err.op) {
                Some(new) => err.op = new,
                None => unreachable!("rejected op %{} was swept", err.op.0),
            }
        }
    }

    debug!(
        function = %func.name,
        replaced = result.replaced,
        swept = result.swept,
        iterations = result.iterations,
        "canonicalized"
    );
    result
}

/// Canonicalize every function; results are in module order.
pub fn canonicalize_module(
    ctx: &Context,
    module: &mut Module,
    config: &CanonicalizeConfig,
) -> Vec<CanonicalizeResult> {
    module
        .functions
        .iter_mut()
        .map(|func| canonicalize(ctx, func, config))
        .collect()
}
