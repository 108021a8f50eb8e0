/*!
 * Glob matching of walk entries against include/exclude lists
 */

use glob_match::glob_match;

/// Prefix the driver puts in front of relative paths
pub const SCOPE_PREFIX: &str = "./";

/// Check whether an entry matches any pattern.
///
/// Each pattern is tried against the basename first, then against the
/// relative path as given and with its leading `./` removed. The relative
/// path is empty for the walk root. A pattern the glob dialect cannot make
/// sense of simply does not match.
///
/// Patterns use the `glob-match` dialect: `*`, `?` and `[...]` as usual,
/// plus `{a,b}` alternation and `**` spanning directories.
pub fn matches_any(name: &str, rel_path: &str, patterns: &[String]) -> bool {
    patterns
        .iter()
        .any(|pattern| matches_pattern(pattern, name, rel_path))
}

fn matches_pattern(pattern: &str, name: &str, rel_path: &str) -> bool {
    if glob_match(pattern, name) {
        return true;
    }
    if rel_path.is_empty() {
        return false;
    }
    if glob_match(pattern, rel_path) {
        return true;
    }
    match rel_path.strip_prefix(SCOPE_PREFIX) {
        Some(trimmed) => glob_match(pattern, trimmed),
        None => false,
    }
}
