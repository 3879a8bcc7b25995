//! Resolved-config snapshot written alongside the report.

use anyhow::Context;
use cfgguard_env::Resolution;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

pub const SCHEMA_SNAPSHOT_V1: &str = "cfgguard.snapshot.v1";

/// The values a check ran against. Keys serialize in sorted order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub schema: String,
    pub execution_env: String,
    pub values: BTreeMap<String, String>,
}

impl ConfigSnapshot {
    pub fn from_resolution(resolution: &Resolution) -> Self {
        Self {
            schema: SCHEMA_SNAPSHOT_V1.to_string(),
            execution_env: resolution.execution_env.clone(),
            values: resolution.values.clone(),
        }
    }

    /// Compact JSON; identical inputs always produce identical bytes.
    pub fn canonical_json(&self) -> anyhow::Result<Vec<u8>> {
        serde_json::to_vec(self).context("serialize config snapshot")
    }

    /// Hex SHA-256 of [`Self::canonical_json`].
    pub fn sha256(&self) -> anyhow::Result<String> {
        let bytes = self.canonical_json()?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}
