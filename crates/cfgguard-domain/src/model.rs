use crate::contract::Contract;
use crate::invariant::Invariant;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfigType {
    #[default]
    String,
    Enum,
}

impl ConfigType {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigType::String => "string",
            ConfigType::Enum => "enum",
        }
    }
}

/// Declaration of one config key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigDecl {
    pub config_type: ConfigType,
    pub required: bool,
    /// Permitted values for `Enum` keys; empty for `String` keys.
    pub values: Vec<String>,
}

/// A loaded schema. Read-only once loading completes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schema {
    /// Declared config keys by dot-path.
    pub config: BTreeMap<String, ConfigDecl>,

    /// Parsed invariants, in declaration order.
    pub invariants: Vec<Invariant>,

    /// Contracts keyed by environment name.
    pub environments: BTreeMap<String, Contract>,
}

impl Schema {
    pub fn contract(&self, environment: &str) -> Option<&Contract> {
        self.environments.get(environment)
    }

    pub fn invariant(&self, name: &str) -> Option<&Invariant> {
        self.invariants.iter().find(|inv| inv.name == name)
    }
}
