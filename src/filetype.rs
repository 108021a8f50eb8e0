/*!
 * Plain text detection for candidate files
 */

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Largest prefix of a file looked at when sniffing its content
const SAMPLE_LIMIT: u64 = 8192;

/// Decides whether a file's content is worth copying as text
pub trait TextClassifier {
    /// Look at no more than `max_size_kb` KB of `path` and report whether it
    /// reads as plain text
    fn is_plain_text(&self, path: &Path, max_size_kb: u64) -> io::Result<bool>;
}

/// Content sniffing heuristic: valid UTF-8 with few control bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct SniffClassifier;

impl TextClassifier for SniffClassifier {
    fn is_plain_text(&self, path: &Path, max_size_kb: u64) -> io::Result<bool> {
        let limit = max_size_kb.saturating_mul(1024).min(SAMPLE_LIMIT);
        let mut buffer = Vec::with_capacity(limit as usize);
        File::open(path)?.take(limit).read_to_end(&mut buffer)?;
        Ok(looks_like_text(&buffer))
    }
}

/// Check a content sample for text
pub fn looks_like_text(sample: &[u8]) -> bool {
    if sample.is_empty() {
        return true;
    }

    // A multi-byte character cut off by the sample boundary is fine
    if let Err(e) = std::str::from_utf8(sample) {
        if e.error_len().is_some() {
            return false;
        }
    }

    // Count binary characters (0x00-0x08, 0x0E-0x1F)
    let binary_count = sample
        .iter()
        .filter(|&&b| (b < 9) || (b > 13 && b < 32))
        .count();
    let binary_ratio = binary_count as f32 / sample.len() as f32;

    binary_ratio < 0.1
}
