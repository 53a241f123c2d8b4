// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Function-level passes built on the local fold rules.

mod canonicalize;
mod dce;

pub use canonicalize::{canonicalize, canonicalize_module, CanonicalizeConfig, CanonicalizeResult};
pub use dce::{sweep_dead, sweep_dead_keeping, Sweep};
