/*!
 * Directory walking and file selection
 *
 * The scanner walks the tree depth first and keeps the configuration stack
 * in step with the walk: a directory's layer is pushed when the directory
 * is entered and popped once the walk leaves its subtree.
 */

use std::fs;
use std::path::PathBuf;

use walkdir::{DirEntry, WalkDir};

use crate::config::{EffectiveConfig, FilterSet, Overrides};
use crate::error::Result;
use crate::filetype::{SniffClassifier, TextClassifier};
use crate::patterns::matches_any;
use crate::stack::{ConfigStack, LayerSource};
use crate::types::{CollectedFile, SkipReason, SkippedEntry};
use crate::utils::{display_relative, format_file_size};
use crate::writer::{OutputWriter, MAX_TOTAL_SIZE};

/// Result of a completed walk
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    /// The assembled text, ready for the clipboard
    pub content: String,
    /// Files that went into `content`, in walk order
    pub files: Vec<CollectedFile>,
    /// Entries left out, with the reason
    pub skipped: Vec<SkippedEntry>,
}

impl ScanOutput {
    /// Relative paths of the collected files
    pub fn relative_paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.relative_path.as_str()).collect()
    }
}

/// Scanner for directory contents
pub struct Scanner {
    /// Walk root
    root: PathBuf,
    /// Explicit command-line values
    overrides: Overrides,
    /// Binary/text decision for candidate files
    classifier: Box<dyn TextClassifier>,
    /// Ceiling for the assembled output
    output_limit: usize,
}

impl Scanner {
    /// Create a scanner rooted at `root`
    pub fn new(root: impl Into<PathBuf>, overrides: Overrides) -> Result<Self> {
        let root = root.into();
        crate::ensure!(root.exists(), PathNotFound, "{}", root.display());
        crate::ensure!(
            root.is_dir(),
            InvalidArgument,
            "{} is not a directory",
            root.display()
        );

        Ok(Self {
            root,
            overrides,
            classifier: Box::new(SniffClassifier),
            output_limit: MAX_TOTAL_SIZE,
        })
    }

    /// Replace the text classifier
    pub fn with_classifier(mut self, classifier: impl TextClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    /// Replace the output ceiling
    pub fn with_output_limit(mut self, limit: usize) -> Self {
        self.output_limit = limit;
        self
    }

    /// Walk the root, consulting and updating `stack` along the way.
    ///
    /// Only an oversized output ends the walk early; unreadable entries are
    /// logged and skipped.
    pub fn scan<S: LayerSource>(&self, stack: &mut ConfigStack<S>) -> Result<ScanOutput> {
        let initial = self.overrides.apply(stack.effective_config());
        log_initial_config(&initial);

        let mut writer = OutputWriter::with_limit(self.output_limit);
        let mut output = ScanOutput::default();
        // Directories whose layer is on the stack, with their walk depth
        let mut scoped: Vec<(PathBuf, usize)> = Vec::new();

        let mut walker = WalkDir::new(&self.root).sort_by_file_name().into_iter();
        while let Some(result) = walker.next() {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    log::info!("Error walking entry: {}", e);
                    continue;
                }
            };

            let depth = entry.depth();
            while scoped.last().is_some_and(|(_, d)| *d >= depth) {
                if let Some((dir, _)) = scoped.pop() {
                    stack.pop(&dir);
                }
            }
            if depth == 0 {
                continue;
            }

            let path = entry.path();
            let name = entry.file_name().to_string_lossy();
            let relative_path = display_relative(&self.root, path);
            let is_dir = entry.file_type().is_dir();
            let filters = self.overrides.apply(stack.effective_config());

            if let Some(reason) = filter_reason(&name, &relative_path, &filters) {
                log::debug!("Skipping {} ({}): {}", kind(is_dir), reason, path.display());
                if is_dir {
                    walker.skip_current_dir();
                }
                output.skipped.push(SkippedEntry {
                    relative_path,
                    is_dir,
                    reason,
                });
                continue;
            }

            if is_dir {
                // Decided on the parent's settings, so the child's config is never probed
                if filters.config.no_recursive {
                    log::debug!(
                        "Skipping subdirectory (no-recursive enabled): {}",
                        path.display()
                    );
                    walker.skip_current_dir();
                    output.skipped.push(SkippedEntry {
                        relative_path,
                        is_dir,
                        reason: SkipReason::NoRecursive,
                    });
                    continue;
                }

                if stack.push_if_exists(path) {
                    scoped.push((path.to_path_buf(), depth));
                }
                log::debug!(
                    "Entering directory: {} ({} layers active)",
                    path.display(),
                    stack.layer_count()
                );
                continue;
            }

            let content = match self.read_candidate(&entry, &filters.config) {
                Ok(content) => content,
                Err(reason) => {
                    output.skipped.push(SkippedEntry {
                        relative_path,
                        is_dir,
                        reason,
                    });
                    continue;
                }
            };

            writer.write_file(&relative_path, &filters.config.delimiter, &content)?;
            output.files.push(CollectedFile {
                path: path.to_path_buf(),
                relative_path,
                size: content.len() as u64,
                lines: content.lines().count(),
            });
        }

        while let Some((dir, _)) = scoped.pop() {
            stack.pop(&dir);
        }

        output.content = writer.finish();
        Ok(output)
    }

    /// Apply the size and content checks to a file and read it
    fn read_candidate(
        &self,
        entry: &DirEntry,
        config: &EffectiveConfig,
    ) -> std::result::Result<String, SkipReason> {
        let path = entry.path();

        // Follows symlinks, so a link is sized by its target
        let metadata = fs::metadata(path).map_err(|e| {
            log::info!("Error getting file info for {}: {}", path.display(), e);
            SkipReason::Unreadable
        })?;

        if metadata.len() > config.max_size_bytes() {
            log::debug!(
                "Skipping large file ({}): {}",
                format_file_size(metadata.len()),
                path.display()
            );
            return Err(SkipReason::TooLarge);
        }

        match self.classifier.is_plain_text(path, config.max_size_kb) {
            Ok(true) => {}
            Ok(false) => {
                log::debug!("Skipping binary file: {}", path.display());
                return Err(SkipReason::Binary);
            }
            Err(e) => {
                log::info!("Error checking if file is binary: {}: {}", path.display(), e);
                return Err(SkipReason::Unreadable);
            }
        }

        fs::read_to_string(path).map_err(|e| {
            log::info!("Failed to read file {}: {}", path.display(), e);
            SkipReason::Unreadable
        })
    }
}

/// Decide whether patterns or hidden-entry policy keep an entry out.
///
/// An include match rescues an excluded or hidden entry, except that a
/// command-line exclude match is final.
pub fn filter_reason(name: &str, relative_path: &str, filters: &FilterSet) -> Option<SkipReason> {
    let included = || matches_any(name, relative_path, &filters.include);

    if matches_any(name, relative_path, &filters.exclude) {
        let cli_excluded = matches_any(name, relative_path, &filters.cli_exclude);
        if cli_excluded || !included() {
            return Some(SkipReason::Excluded);
        }
    }

    if name.starts_with('.') && !included() {
        return Some(SkipReason::Hidden);
    }

    None
}

fn kind(is_dir: bool) -> &'static str {
    if is_dir {
        "directory"
    } else {
        "file"
    }
}

fn log_initial_config(filters: &FilterSet) {
    log::debug!("Initial configuration:");
    log::debug!("\tDelimiter: {}", filters.config.delimiter);
    log::debug!("\tMax Size: {} KB", filters.config.max_size_kb);
    log::debug!("\tInclude Patterns: {:?}", filters.include);
    log::debug!("\tExclude Patterns: {:?}", filters.exclude);
    log::debug!("\tCLI Exclude Patterns: {:?}", filters.cli_exclude);
    log::debug!("\tNo Recursive: {}", filters.config.no_recursive);
}
