//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after schema examples.
    pub examples: ExamplePair,
}

/// Before and after schema examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Schema or environment that would trigger a finding.
    pub before: &'static str,
    /// Schema or environment that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        ids::CHECK_CONFIG_REQUIRED | ids::CODE_MISSING_REQUIRED_KEY => Some(explain_required()),
        ids::CHECK_CONFIG_ENUM | ids::CODE_VALUE_NOT_IN_ENUM => Some(explain_enum()),
        ids::CHECK_INVARIANT_RULE | ids::CODE_INVARIANT_VIOLATED => Some(explain_invariant()),
        ids::CHECK_CONTRACT_ALLOW | ids::CODE_VALUE_NOT_ALLOWED => Some(explain_allow()),
        ids::CHECK_CONTRACT_DENY | ids::CODE_VALUE_DENIED => Some(explain_deny()),
        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    ids::ALL_CHECKS
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_MISSING_REQUIRED_KEY,
        ids::CODE_VALUE_NOT_IN_ENUM,
        ids::CODE_INVARIANT_VIOLATED,
        ids::CODE_VALUE_NOT_ALLOWED,
        ids::CODE_VALUE_DENIED,
    ]
}

fn explain_required() -> Explanation {
    Explanation {
        title: "Required Configuration Keys",
        description: "\
Detects configuration keys declared `required: true` in the schema that have no
value in the environment.

Keys are resolved from environment variables: `db.url` is read from `DB_URL`
(or `<PREFIX>_DB_URL` when an env prefix is configured). An empty value counts
as set; an unset variable does not.",
        remediation: "\
Export the variable in the deployment environment, or mark the key optional in
the schema if the application really tolerates its absence.",
        examples: ExamplePair {
            before: r#"config:
  db.url:
    required: true
# DB_URL is not set"#,
            after: r#"config:
  db.url:
    required: true
# export DB_URL=postgres://db.internal/app"#,
        },
    }
}

fn explain_enum() -> Explanation {
    Explanation {
        title: "Enumerated Configuration Values",
        description: "\
Detects keys declared `type: enum` whose resolved value is not one of the
declared `values`. Comparison is exact and case-sensitive.",
        remediation: "\
Set the variable to one of the declared values, or extend the `values` list in
the schema if the new value is legitimate.",
        examples: ExamplePair {
            before: r#"config:
  log.level:
    type: enum
    values: [debug, info, warn]
# LOG_LEVEL=verbose"#,
            after: r#"# LOG_LEVEL=debug"#,
        },
    }
}

fn explain_invariant() -> Explanation {
    Explanation {
        title: "Cross-Key Invariants",
        description: "\
Evaluates the schema's `invariants`: named rules relating config keys and the
execution environment.

Rules are written as `left == right`, `left != right`, or an implication
`A => B` which only fails when `A` holds and `B` does not. Operands are dotted
config keys, quoted string literals, or `execution.env`.",
        remediation: "\
Read the invariant message: it names the rule that failed and the values that
were compared. Fix whichever config value is wrong for this environment.",
        examples: ExamplePair {
            before: r#"invariants:
  - name: prod-db
    rule: 'execution.env == "prod" => db.env == "prod"'
# EXECUTION_ENV=prod DB_ENV=staging"#,
            after: r#"# EXECUTION_ENV=prod DB_ENV=prod"#,
        },
    }
}

fn explain_allow() -> Explanation {
    Explanation {
        title: "Contract Allow Lists",
        description: "\
Each environment contract may pin keys to an allow list. When a key has an
allow list, its value must equal one of the entries exactly. Allow entries are
never treated as patterns.",
        remediation: "\
Use one of the allowed values for this environment, or add the value to the
contract's `allow` list.",
        examples: ExamplePair {
            before: r#"environments:
  prod:
    allow:
      db.env: [prod]
# DB_ENV=staging"#,
            after: r#"# DB_ENV=prod"#,
        },
    }
}

fn explain_deny() -> Explanation {
    Explanation {
        title: "Contract Deny Lists",
        description: "\
Each environment contract may deny values for a key. Deny entries containing
`*` are glob patterns (`*localhost*`), other entries match exactly. A deny
match takes precedence over any allow list for the same key.",
        remediation: "\
Point the key at a value that is legitimate for this environment. Denied values
usually indicate a development setting leaking into a higher environment.",
        examples: ExamplePair {
            before: r#"environments:
  prod:
    deny:
      db.url: ["*localhost*"]
# DB_URL=postgres://localhost/app"#,
            after: r#"# DB_URL=postgres://db.internal/app"#,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_check_and_code_has_an_explanation() {
        for id in all_check_ids().iter().chain(all_codes()) {
            assert!(lookup_explanation(id).is_some(), "missing explanation for {id}");
        }
    }

    #[test]
    fn unknown_identifier_is_none() {
        assert!(lookup_explanation("deps.no_wildcards").is_none());
    }
}
