//! Stable DTOs and IDs used across the cfgguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report
//! - invariant and contract result records consumed by reporters
//! - stable string IDs and codes
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod receipt;
pub mod results;

pub use explain::{lookup_explanation, ExamplePair, Explanation};
pub use receipt::{
    CfgguardData, CfgguardReport, Finding, Location, ReportEnvelope, Severity, ToolMeta, Verdict,
    SCHEMA_REPORT_V1,
};
pub use results::{EvalResult, InvariantResult, RuleType, Violation};
