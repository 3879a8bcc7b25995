//! Fuzz target for the invariant rule parser.
//!
//! Goal: parsing should **never panic**, and any rule that parses must
//! format to a canonical form that parses back to the same expression.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_rule_parser
//! ```

#![no_main]

use cfgguard_domain::rule::{format_rule, parse};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 4096 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(expr) = parse(text) {
        let canonical = format_rule(&expr);
        match parse(&canonical) {
            Ok(reparsed) => assert_eq!(reparsed, expr, "canonical form changed meaning"),
            Err(err) => panic!("canonical form {canonical:?} failed to parse: {err}"),
        }
    }
});
