//! Fuzz target for deny-pattern glob matching.
//!
//! Goal: matching should **never panic** on any pattern/value pair, and the
//! exact-match and match-all cases must hold.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_glob_match
//! ```

#![no_main]

use arbitrary::Arbitrary;
use cfgguard_domain::glob::glob_match;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct GlobInput {
    pattern: String,
    value: String,
}

fuzz_target!(|input: GlobInput| {
    if input.pattern.len() > 256 || input.value.len() > 1024 {
        return;
    }

    let matched = glob_match(&input.pattern, &input.value);

    if !input.pattern.contains('*') {
        assert_eq!(matched, input.pattern == input.value);
    }
    if !input.pattern.is_empty() && input.pattern.chars().all(|c| c == '*') {
        assert!(matched);
    }
});
