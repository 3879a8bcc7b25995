//! Fuzz target for schema loading.
//!
//! Goal: arbitrary YAML should produce a schema or a `SchemaError`, never a panic.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_schema_yaml
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 16 * 1024 {
        return;
    }
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = cfgguard_schema::parse_schema_yaml(text);
    }
});
