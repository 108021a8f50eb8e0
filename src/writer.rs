/*!
 * Output assembly for clip4llm
 *
 * Files are appended as blocks with a path header and the content wrapped
 * in the configured delimiter. The aggregate is capped; crossing the cap
 * fails the whole run rather than truncating.
 */

use crate::error::{Clip4llmError, Result};

/// Ceiling for the assembled output in bytes (1 MiB)
pub const MAX_TOTAL_SIZE: usize = 1024 * 1024;

/// Accumulates file blocks under a size ceiling
#[derive(Debug, Clone)]
pub struct OutputWriter {
    buffer: String,
    limit: usize,
}

impl OutputWriter {
    /// Create a writer with the given ceiling
    pub fn with_limit(limit: usize) -> Self {
        Self {
            buffer: String::new(),
            limit,
        }
    }

    /// Append one file block.
    ///
    /// Nothing is appended when the block would push the output past the
    /// ceiling; the error says by how much.
    pub fn write_file(&mut self, relative_path: &str, delimiter: &str, content: &str) -> Result<()> {
        let block = format_block(relative_path, delimiter, content);
        let attempted = self.buffer.len() + block.len();
        if attempted > self.limit {
            return Err(Clip4llmError::OutputTooLarge {
                limit: self.limit,
                attempted,
            });
        }
        self.buffer.push_str(&block);
        Ok(())
    }

    /// Hand over the assembled output
    pub fn finish(self) -> String {
        self.buffer
    }
}

/// Format a single file block
pub fn format_block(relative_path: &str, delimiter: &str, content: &str) -> String {
    format!(
        "\nFile: {}\n\n{}\n{}\n{}\n\n",
        relative_path, delimiter, content, delimiter
    )
}
