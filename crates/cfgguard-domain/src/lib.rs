//! Pure rule evaluation (no IO).
//!
//! Input: a schema loaded elsewhere plus the resolved configuration for one run.
//! Output: invariant results, contract results, findings, verdict and summary data.

#![forbid(unsafe_code)]

pub mod contract;
pub mod glob;
pub mod invariant;
pub mod model;
pub mod policy;
pub mod report;
pub mod rule;

mod checks;
mod engine;
mod fingerprint;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::evaluate;
pub use fingerprint::fingerprint_for;
