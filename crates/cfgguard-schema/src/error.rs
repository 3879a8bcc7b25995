use cfgguard_domain::rule::RuleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read schema {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid schema YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config key '{key}': expected dot-separated identifiers")]
    InvalidKey { key: String },

    #[error("config key '{key}' is reserved for the execution environment")]
    ReservedKey { key: String },

    #[error("enum key '{key}' declares no values")]
    EmptyEnum { key: String },

    #[error("invalid invariant name '{name}': expected [A-Za-z0-9_-]+")]
    InvalidInvariantName { name: String },

    #[error("duplicate invariant name '{name}'")]
    DuplicateInvariant { name: String },

    #[error("invariant '{name}': {source}")]
    Rule {
        name: String,
        #[source]
        source: RuleError,
    },

    #[error("environment '{environment}' constrains undeclared key '{key}'")]
    UnknownContractKey { environment: String, key: String },
}
