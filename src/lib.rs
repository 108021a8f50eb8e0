/*!
 * clip4llm - Copy directory contents to the clipboard as LLM context
 *
 * This library walks a directory tree, filters the files it finds and
 * concatenates their contents under path headers. Filtering is driven by
 * `.clip4llm` files that may sit in the home directory, the walk root and
 * any subdirectory, each one scoped to its own subtree.
 */

pub mod clipboard;
pub mod config;
pub mod error;
pub mod filetype;
pub mod parser;
pub mod patterns;
pub mod report;
pub mod scanner;
pub mod stack;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::{Args, EffectiveConfig, FilterSet, Overrides, Settings};
pub use error::{Clip4llmError, Result};
pub use parser::CONFIG_FILE_NAME;
pub use patterns::matches_any;
pub use report::{Reporter, ScanReport};
pub use scanner::{ScanOutput, Scanner};
pub use stack::{ConfigStack, LayerSource, ProbeState};
pub use types::{CollectedFile, SkipReason, SkippedEntry};
pub use writer::{OutputWriter, MAX_TOTAL_SIZE};
