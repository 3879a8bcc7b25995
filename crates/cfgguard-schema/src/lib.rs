//! Schema file support: YAML in, validated [`Schema`] out, and back again.
//!
//! Loading parses every invariant rule against the declared keys, so a
//! [`Schema`] returned from here only references keys it declares.

#![forbid(unsafe_code)]

mod doc;
mod error;

pub use error::SchemaError;

use camino::Utf8Path;
use cfgguard_domain::contract::{Contract, Rule};
use cfgguard_domain::invariant::Invariant;
use cfgguard_domain::model::{ConfigDecl, ConfigType, Schema};
use cfgguard_domain::rule::{EXECUTION_ENV_PATH, format_rule, parse_rule, validate_refs};
use doc::{ContractDoc, InvariantDoc, KeyDoc, SchemaDoc, TypeDoc, Values};
use std::collections::{BTreeMap, BTreeSet};

/// Read and parse a schema file.
pub fn load_schema(path: &Utf8Path) -> Result<Schema, SchemaError> {
    let text = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_schema_yaml(&text)
}

/// Parse and validate a schema document.
pub fn parse_schema_yaml(text: &str) -> Result<Schema, SchemaError> {
    let doc: SchemaDoc = serde_yaml::from_str(text)?;
    from_doc(doc)
}

/// Serialize a schema with every rule in canonical form.
///
/// Rules are checked against the declared keys first; a schema that would not
/// load back is an error rather than a file.
pub fn to_yaml(schema: &Schema) -> Result<String, SchemaError> {
    for inv in &schema.invariants {
        validate_refs(&inv.expr, &schema.config).map_err(|source| SchemaError::Rule {
            name: inv.name.clone(),
            source,
        })?;
    }
    Ok(serde_yaml::to_string(&to_doc(schema))?)
}

fn from_doc(doc: SchemaDoc) -> Result<Schema, SchemaError> {
    let mut config = BTreeMap::new();
    for (key, decl) in doc.config {
        if !is_valid_key(&key) {
            return Err(SchemaError::InvalidKey { key });
        }
        if key == EXECUTION_ENV_PATH {
            return Err(SchemaError::ReservedKey { key });
        }
        let config_type = match decl.config_type {
            TypeDoc::String => ConfigType::String,
            TypeDoc::Enum => ConfigType::Enum,
        };
        if config_type == ConfigType::Enum && decl.values.is_empty() {
            return Err(SchemaError::EmptyEnum { key });
        }
        config.insert(
            key,
            ConfigDecl {
                config_type,
                required: decl.required,
                values: decl.values,
            },
        );
    }

    let mut invariants = Vec::with_capacity(doc.invariants.len());
    let mut seen = BTreeSet::new();
    for InvariantDoc { name, rule } in doc.invariants {
        if !is_valid_invariant_name(&name) {
            return Err(SchemaError::InvalidInvariantName { name });
        }
        if !seen.insert(name.clone()) {
            return Err(SchemaError::DuplicateInvariant { name });
        }
        let expr = match parse_rule(&rule, Some(&config)) {
            Ok(expr) => expr,
            Err(source) => return Err(SchemaError::Rule { name, source }),
        };
        invariants.push(Invariant { name, rule, expr });
    }

    let mut environments = BTreeMap::new();
    for (name, contract_doc) in doc.environments {
        let mut contract = Contract::new(name.clone());
        for (key, values) in contract_doc.allow {
            contract.allow.insert(key, Rule::allow(values.into_vec()));
        }
        for (key, values) in contract_doc.deny {
            contract.deny.insert(key, Rule::deny(values.into_vec()));
        }
        check_contract_keys(&config, &contract)?;
        environments.insert(name, contract);
    }

    Ok(Schema {
        config,
        invariants,
        environments,
    })
}

fn to_doc(schema: &Schema) -> SchemaDoc {
    SchemaDoc {
        config: schema
            .config
            .iter()
            .map(|(key, decl)| {
                let config_type = match decl.config_type {
                    ConfigType::String => TypeDoc::String,
                    ConfigType::Enum => TypeDoc::Enum,
                };
                (
                    key.clone(),
                    KeyDoc {
                        config_type,
                        required: decl.required,
                        values: decl.values.clone(),
                    },
                )
            })
            .collect(),
        invariants: schema
            .invariants
            .iter()
            .map(|inv| InvariantDoc {
                name: inv.name.clone(),
                rule: format_rule(&inv.expr),
            })
            .collect(),
        environments: schema
            .environments
            .iter()
            .map(|(name, contract)| {
                let side = |rules: &BTreeMap<String, Rule>| {
                    rules
                        .iter()
                        .map(|(k, r)| (k.clone(), Values::Many(r.values.clone())))
                        .collect()
                };
                (
                    name.clone(),
                    ContractDoc {
                        allow: side(&contract.allow),
                        deny: side(&contract.deny),
                    },
                )
            })
            .collect(),
    }
}

fn check_contract_keys(
    config: &BTreeMap<String, ConfigDecl>,
    contract: &Contract,
) -> Result<(), SchemaError> {
    match contract.keys().find(|key| !config.contains_key(*key)) {
        Some(key) => Err(SchemaError::UnknownContractKey {
            environment: contract.name.clone(),
            key: key.to_string(),
        }),
        None => Ok(()),
    }
}

fn is_ident(segment: &str) -> bool {
    let mut chars = segment.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Keys must be expressible as rule references.
fn is_valid_key(key: &str) -> bool {
    key.split('.').all(is_ident)
}

fn is_valid_invariant_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests;
