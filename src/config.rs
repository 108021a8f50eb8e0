/*!
 * Configuration handling for clip4llm
 *
 * A configuration is assembled from three kinds of sources: built-in
 * defaults, `.clip4llm` files found in the home directory, the traversal
 * root and nested directories, and command-line flags. Scalars are
 * last-writer-wins among set values, pattern lists concatenate.
 */

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::parser::parse_comma_separated;

/// Delimiter wrapped around every file's content unless configured otherwise
pub const DEFAULT_DELIMITER: &str = "```";

/// Per-file size ceiling in KB unless configured otherwise
pub const DEFAULT_MAX_SIZE_KB: u64 = 32;

/// Command-line arguments for clip4llm
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "clip4llm",
    version = env!("CARGO_PKG_VERSION"),
    about = "Copy the text files of a directory tree to the clipboard as LLM context",
    long_about = "Walks a directory tree, filters files by pattern, size and content type, and copies their contents, wrapped in delimiters with path headers, to the system clipboard. Settings can be placed in .clip4llm files in the home directory, the project root and any subdirectory."
)]
pub struct Args {
    /// Directory to aggregate
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Set the delimiter for file content (default: ```)
    #[clap(long)]
    pub delimiter: Option<String>,

    /// Maximum file size to include in KB (default: 32 KB)
    #[clap(long)]
    pub max_size: Option<u64>,

    /// Enable verbose logging
    #[clap(long)]
    pub verbose: bool,

    /// Comma-separated list of patterns to include, even if hidden (e.g., .github,*.env)
    #[clap(long)]
    pub include: Option<String>,

    /// Comma-separated list of patterns to exclude (e.g., LICENSE,*.md)
    #[clap(long)]
    pub exclude: Option<String>,

    /// Only process files in the root directory
    #[clap(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub no_recursive: Option<bool>,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

impl Args {
    /// Directory the walk starts from, as given on the command line
    pub fn target_dir(&self) -> PathBuf {
        PathBuf::from(&self.directory_path)
    }
}

/// One parsed configuration source.
///
/// Scalars are `None` when the source never set them (or set them to a
/// value that means "unset": an empty delimiter, a non-positive size).
/// `no_recursive` can only ever be switched on by a layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub delimiter: Option<String>,
    pub max_size_kb: Option<u64>,
    pub no_recursive: bool,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl Settings {
    /// True when merging this layer would change nothing
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fold `other` on top of `self` with the same rules used for the
    /// effective configuration.
    #[cfg(test)]
    pub fn merge(&mut self, other: &Settings) {
        if other.delimiter.is_some() {
            self.delimiter.clone_from(&other.delimiter);
        }
        if other.max_size_kb.is_some() {
            self.max_size_kb = other.max_size_kb;
        }
        self.no_recursive |= other.no_recursive;
        self.include.extend(other.include.iter().cloned());
        self.exclude.extend(other.exclude.iter().cloned());
    }
}

/// Settings in force at one point of the walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub delimiter: String,
    pub max_size_kb: u64,
    pub no_recursive: bool,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            max_size_kb: DEFAULT_MAX_SIZE_KB,
            no_recursive: false,
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl EffectiveConfig {
    /// Apply one layer on top of the accumulated value
    pub fn merge(&mut self, layer: &Settings) {
        if let Some(delimiter) = &layer.delimiter {
            self.delimiter.clone_from(delimiter);
        }
        if let Some(max_size_kb) = layer.max_size_kb {
            self.max_size_kb = max_size_kb;
        }
        if layer.no_recursive {
            self.no_recursive = true;
        }
        self.include.extend(layer.include.iter().cloned());
        self.exclude.extend(layer.exclude.iter().cloned());
    }

    /// Per-file size ceiling in bytes
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_kb.saturating_mul(1024)
    }
}

/// Values given explicitly on the command line.
///
/// Scalars replace whatever the configuration files say. An explicit
/// include list replaces the merged include list; the exclude list is
/// appended to the merged one and also beats any include rescue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub delimiter: Option<String>,
    pub max_size_kb: Option<u64>,
    pub no_recursive: Option<bool>,
    pub include: Option<Vec<String>>,
    pub exclude: Vec<String>,
}

impl Overrides {
    /// Collect the explicitly set flags from parsed arguments
    pub fn from_args(args: &Args) -> Self {
        Self {
            delimiter: args.delimiter.clone(),
            max_size_kb: args.max_size,
            no_recursive: args.no_recursive,
            include: args.include.as_deref().map(parse_comma_separated),
            exclude: args
                .exclude
                .as_deref()
                .map(parse_comma_separated)
                .unwrap_or_default(),
        }
    }

    /// Resolve the filters for one entry from the stack's effective config
    pub fn apply(&self, mut config: EffectiveConfig) -> FilterSet {
        if let Some(delimiter) = &self.delimiter {
            config.delimiter.clone_from(delimiter);
        }
        if let Some(max_size_kb) = self.max_size_kb {
            config.max_size_kb = max_size_kb;
        }
        if let Some(no_recursive) = self.no_recursive {
            config.no_recursive = no_recursive;
        }

        let include = match &self.include {
            Some(include) => include.clone(),
            None => config.include.clone(),
        };
        let mut exclude = config.exclude.clone();
        exclude.extend(self.exclude.iter().cloned());

        FilterSet {
            config,
            include,
            exclude,
            cli_exclude: self.exclude.clone(),
        }
    }
}

/// Everything the driver needs to judge one entry
#[derive(Debug, Clone)]
pub struct FilterSet {
    /// Effective configuration with command-line scalars applied
    pub config: EffectiveConfig,
    /// Include patterns that rescue excluded or hidden entries
    pub include: Vec<String>,
    /// Configuration excludes followed by command-line excludes
    pub exclude: Vec<String>,
    /// Command-line excludes alone; a match here cannot be rescued
    pub cli_exclude: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = EffectiveConfig::default();
        assert_eq!(config.delimiter, "```");
        assert_eq!(config.max_size_kb, 32);
        assert!(!config.no_recursive);
        assert!(config.include.is_empty());
        assert!(config.exclude.is_empty());
    }

    #[test]
    fn test_merge_empty_layer_changes_nothing() {
        let mut config = EffectiveConfig {
            delimiter: "---".to_string(),
            max_size_kb: 64,
            no_recursive: true,
            include: patterns(&[".github"]),
            exclude: patterns(&["*.md"]),
        };
        let before = config.clone();
        config.merge(&Settings::default());
        assert_eq!(config, before);
    }

    #[test]
    fn test_merge_scalars_last_set_wins() {
        let mut config = EffectiveConfig::default();
        config.merge(&Settings {
            delimiter: Some("~~~".to_string()),
            max_size_kb: Some(64),
            ..Default::default()
        });
        config.merge(&Settings {
            max_size_kb: Some(128),
            ..Default::default()
        });
        assert_eq!(config.delimiter, "~~~");
        assert_eq!(config.max_size_kb, 128);
    }

    #[test]
    fn test_no_recursive_is_sticky() {
        let mut config = EffectiveConfig::default();
        config.merge(&Settings {
            no_recursive: true,
            ..Default::default()
        });
        config.merge(&Settings::default());
        assert!(config.no_recursive);
    }

    #[test]
    fn test_merge_lists_are_additive() {
        let mut config = EffectiveConfig::default();
        config.merge(&Settings {
            include: patterns(&[".github", "*.env"]),
            ..Default::default()
        });
        config.merge(&Settings {
            include: patterns(&[".config", "*.env"]),
            ..Default::default()
        });
        assert_eq!(config.include, patterns(&[".github", "*.env", ".config", "*.env"]));
    }

    #[test]
    fn test_merge_in_order_equals_merged_layer() {
        let first = Settings {
            delimiter: Some("<<<".to_string()),
            max_size_kb: Some(10),
            no_recursive: false,
            include: patterns(&["a"]),
            exclude: patterns(&["x"]),
        };
        let second = Settings {
            delimiter: None,
            max_size_kb: Some(20),
            no_recursive: true,
            include: patterns(&["b"]),
            exclude: Vec::new(),
        };

        let mut stepwise = EffectiveConfig::default();
        stepwise.merge(&first);
        stepwise.merge(&second);

        let mut combined = first.clone();
        combined.merge(&second);
        let mut folded = EffectiveConfig::default();
        folded.merge(&combined);

        assert_eq!(stepwise, folded);
    }

    #[test]
    fn test_overrides_replace_scalars() {
        let overrides = Overrides {
            delimiter: Some("===".to_string()),
            max_size_kb: Some(0),
            no_recursive: Some(false),
            ..Default::default()
        };
        let config = EffectiveConfig {
            no_recursive: true,
            ..Default::default()
        };
        let filters = overrides.apply(config);
        assert_eq!(filters.config.delimiter, "===");
        assert_eq!(filters.config.max_size_kb, 0);
        assert!(!filters.config.no_recursive);
    }

    #[test]
    fn test_overrides_include_replaces_exclude_appends() {
        let overrides = Overrides {
            include: Some(patterns(&["*.rs"])),
            exclude: patterns(&["*.go"]),
            ..Default::default()
        };
        let config = EffectiveConfig {
            include: patterns(&["*.md"]),
            exclude: patterns(&["*.txt"]),
            ..Default::default()
        };
        let filters = overrides.apply(config);
        assert_eq!(filters.include, patterns(&["*.rs"]));
        assert_eq!(filters.exclude, patterns(&["*.txt", "*.go"]));
        assert_eq!(filters.cli_exclude, patterns(&["*.go"]));
    }

    #[test]
    fn test_overrides_from_args() {
        let args = Args::parse_from([
            "clip4llm",
            "--include",
            " .github , *.env ,",
            "--exclude=LICENSE",
            "--no-recursive",
            "--max-size",
            "8",
        ]);
        let overrides = Overrides::from_args(&args);
        assert_eq!(overrides.include, Some(patterns(&[".github", "*.env"])));
        assert_eq!(overrides.exclude, patterns(&["LICENSE"]));
        assert_eq!(overrides.no_recursive, Some(true));
        assert_eq!(overrides.max_size_kb, Some(8));
        assert_eq!(overrides.delimiter, None);
        assert_eq!(args.target_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_no_recursive_flag_accepts_explicit_value() {
        let args = Args::parse_from(["clip4llm", "--no-recursive=false", "src"]);
        assert_eq!(args.no_recursive, Some(false));
        assert_eq!(args.directory_path, "src");
    }

    #[test]
    fn test_empty_include_flag_clears_includes() {
        let args = Args::parse_from(["clip4llm", "--include="]);
        let filters = Overrides::from_args(&args).apply(EffectiveConfig {
            include: patterns(&["*.md"]),
            ..Default::default()
        });
        assert!(filters.include.is_empty());
    }
}
