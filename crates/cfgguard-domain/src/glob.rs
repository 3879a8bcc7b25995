//! `*`-wildcard matching for contract deny patterns.
//!
//! This is a greedy, forward-only matcher: each literal fragment is located at its
//! first occurrence after the previous one. It does not backtrack, so a few
//! multi-fragment patterns with overlapping fragments can reject values a
//! backtracking matcher would accept.

/// Match `value` against `pattern`, where `*` matches any run of characters.
///
/// A pattern without `*` matches only the identical string.
pub fn glob_match(pattern: &str, value: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == value;
    }

    let fragments: Vec<&str> = pattern.split('*').collect();
    let last = fragments.len() - 1;
    let mut rest = value;

    for (i, fragment) in fragments.iter().enumerate() {
        if fragment.is_empty() {
            continue;
        }
        if i == 0 {
            // Pattern does not start with `*`: anchor at the beginning.
            let Some(after) = rest.strip_prefix(fragment) else {
                return false;
            };
            rest = after;
        } else if i == last {
            // Pattern does not end with `*`: anchor at the end.
            return rest.ends_with(fragment);
        } else {
            let Some(idx) = rest.find(fragment) else {
                return false;
            };
            rest = &rest[idx + fragment.len()..];
        }
    }

    true
}
