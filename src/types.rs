/*!
 * Records produced by a directory walk
 */

use std::path::PathBuf;

use strum::Display;

/// Why an entry did not make it into the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum SkipReason {
    /// Matched an exclude pattern and no include pattern rescued it
    #[strum(to_string = "excluded by pattern")]
    Excluded,
    /// Dot-prefixed and not matched by any include pattern
    #[strum(to_string = "hidden")]
    Hidden,
    /// Subdirectory pruned because recursion is disabled
    #[strum(to_string = "no-recursive")]
    NoRecursive,
    /// Larger than the per-file size ceiling
    #[strum(to_string = "too large")]
    TooLarge,
    /// Content does not look like text
    #[strum(to_string = "binary")]
    Binary,
    /// Metadata or content could not be read
    #[strum(to_string = "unreadable")]
    Unreadable,
}

/// A file whose content went into the output
#[derive(Debug, Clone)]
pub struct CollectedFile {
    /// Absolute path on disk
    pub path: PathBuf,
    /// Path relative to the walk root, `./` prefixed
    pub relative_path: String,
    /// Size of the content in bytes
    pub size: u64,
    /// Number of lines in the content
    pub lines: usize,
}

/// An entry left out of the output
#[derive(Debug, Clone)]
pub struct SkippedEntry {
    /// Path relative to the walk root, `./` prefixed
    pub relative_path: String,
    /// Whether the entry was a directory (its whole subtree was skipped)
    pub is_dir: bool,
    pub reason: SkipReason,
}
