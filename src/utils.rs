/*!
 * Utility functions for clip4llm
 */

use std::path::{Component, Path};

use crate::patterns::SCOPE_PREFIX;

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Render `path` relative to `root` as `./a/b`, with `/` separators.
///
/// Paths that already start with a dot (`.github/ci.yml`) get no prefix.
/// The root itself, or a path outside it, renders as an empty string.
pub fn display_relative(root: &Path, path: &Path) -> String {
    let Ok(relative) = path.strip_prefix(root) else {
        return String::new();
    };

    let parts: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();

    let joined = parts.join("/");
    if joined.is_empty() || joined.starts_with('.') {
        joined
    } else {
        format!("{}{}", SCOPE_PREFIX, joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 bytes");
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3.00 GB");
    }

    #[test]
    fn test_display_relative() {
        let root = Path::new("/work/proj");
        assert_eq!(display_relative(root, root), "");
        assert_eq!(
            display_relative(root, Path::new("/work/proj/docs/README.md")),
            "./docs/README.md"
        );
        assert_eq!(
            display_relative(root, Path::new("/work/proj/.github/ci.yml")),
            ".github/ci.yml"
        );
        assert_eq!(
            display_relative(root, Path::new("/work/proj/src/.env")),
            "./src/.env"
        );
        assert_eq!(display_relative(root, Path::new("/elsewhere/file")), "");
    }
}
