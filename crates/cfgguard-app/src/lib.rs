//! Use case orchestration for cfgguard.
//!
//! This crate provides the application layer: use cases that coordinate the schema, env,
//! domain, and render layers. It is thin and delegates heavy lifting to those layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod artifact;
mod check;
mod explain;
mod render;
mod report;
mod validate;

pub use artifact::{ConfigSnapshot, SCHEMA_SNAPSHOT_V1};
pub use check::{CheckInput, CheckOutput, run_check, verdict_exit_code};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use render::{render_annotations, render_markdown, render_text};
pub use report::{parse_report_json, runtime_error_report, serialize_report, to_renderable};
pub use validate::{ValidateOutput, run_fmt_rule, run_validate};
