//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_CONFIG_REQUIRED: &str = "config.required";
pub const CHECK_CONFIG_ENUM: &str = "config.enum";
pub const CHECK_INVARIANT_RULE: &str = "invariant.rule";
pub const CHECK_CONTRACT_ALLOW: &str = "contract.allow";
pub const CHECK_CONTRACT_DENY: &str = "contract.deny";

// Codes: config.required
pub const CODE_MISSING_REQUIRED_KEY: &str = "missing_required_key";

// Codes: config.enum
pub const CODE_VALUE_NOT_IN_ENUM: &str = "value_not_in_enum";

// Codes: invariant.rule
pub const CODE_INVARIANT_VIOLATED: &str = "invariant_violated";

// Codes: contract.allow
pub const CODE_VALUE_NOT_ALLOWED: &str = "value_not_allowed";

// Codes: contract.deny
pub const CODE_VALUE_DENIED: &str = "value_denied";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";

/// Every check the engine knows about, in evaluation order.
pub const ALL_CHECKS: &[&str] = &[
    CHECK_CONFIG_REQUIRED,
    CHECK_CONFIG_ENUM,
    CHECK_INVARIANT_RULE,
    CHECK_CONTRACT_ALLOW,
    CHECK_CONTRACT_DENY,
];
