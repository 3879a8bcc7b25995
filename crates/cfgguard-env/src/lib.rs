//! Environment variable resolution for declared config keys.
//!
//! Keys map to variables by upper-casing and replacing `.` and `-` with `_`:
//! `db.url` is read from `DB_URL`, or `APP_DB_URL` with prefix `APP`.

#![forbid(unsafe_code)]

use cfgguard_domain::invariant::EvalContext;
use cfgguard_domain::model::Schema;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use tracing::debug;

pub const DEFAULT_EXECUTION_ENV_VAR: &str = "EXECUTION_ENV";

/// Source of environment variables.
pub trait EnvSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// The current process environment. Variables that are not valid Unicode read as unset.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<S: BuildHasher> EnvSource for HashMap<String, String, S> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverSettings {
    pub env_prefix: Option<String>,
    pub execution_env_var: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            env_prefix: None,
            execution_env_var: DEFAULT_EXECUTION_ENV_VAR.to_string(),
        }
    }
}

/// Values read for one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Declared keys that have a variable set (possibly empty).
    pub values: BTreeMap<String, String>,
    /// Execution environment tag; empty when unset.
    pub execution_env: String,
    /// Declared keys with no variable set, in key order.
    pub missing: Vec<String>,
}

impl Resolution {
    pub fn into_context(self) -> EvalContext {
        EvalContext::new(self.values, self.execution_env)
    }
}

/// Variable name for a config key.
pub fn env_var_name(path: &str, prefix: Option<&str>) -> String {
    let base: String = path
        .chars()
        .map(|c| match c {
            '.' | '-' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect();
    match prefix {
        Some(p) if !p.is_empty() => format!("{}_{base}", p.to_ascii_uppercase()),
        _ => base,
    }
}

/// Read every declared key plus the execution tag from `source`.
pub fn resolve<E: EnvSource + ?Sized>(
    schema: &Schema,
    source: &E,
    settings: &ResolverSettings,
) -> Resolution {
    let prefix = settings.env_prefix.as_deref();
    let mut resolution = Resolution::default();

    for key in schema.config.keys() {
        let name = env_var_name(key, prefix);
        match source.var(&name) {
            Some(value) => {
                resolution.values.insert(key.clone(), value);
            }
            None => resolution.missing.push(key.clone()),
        }
    }

    resolution.execution_env = source
        .var(&settings.execution_env_var)
        .unwrap_or_default();

    debug!(
        resolved = resolution.values.len(),
        missing = resolution.missing.len(),
        execution_env_var = %settings.execution_env_var,
        "resolved config from environment"
    );

    resolution
}
