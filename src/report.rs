/*!
 * Reporting functionality for clip4llm
 *
 * Renders a summary of a finished walk with the tabled library: the files
 * that were copied and what was left out.
 */

use std::collections::BTreeMap;
use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::scanner::ScanOutput;
use crate::types::SkipReason;
use crate::utils::format_file_size;

/// Information about a copied file
#[derive(Debug, Clone, Default)]
pub struct FileReportInfo {
    /// Path relative to the walk root
    pub path: String,
    /// Size of the content in bytes
    pub size: u64,
    /// Number of lines in the file
    pub lines: usize,
}

/// Statistics for one run
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Root of the walk
    pub root: String,
    /// Time taken to walk and assemble
    pub duration: Duration,
    /// Size of the assembled output in bytes
    pub output_bytes: usize,
    /// Copied files, in walk order
    pub files: Vec<FileReportInfo>,
    /// Number of skipped entries per reason
    pub skipped: BTreeMap<SkipReason, usize>,
}

impl ScanReport {
    /// Summarize a completed walk
    pub fn from_output(root: impl Into<String>, output: &ScanOutput, duration: Duration) -> Self {
        let mut skipped = BTreeMap::new();
        for entry in &output.skipped {
            *skipped.entry(entry.reason).or_insert(0) += 1;
        }

        Self {
            root: root.into(),
            duration,
            output_bytes: output.content.len(),
            files: output
                .files
                .iter()
                .map(|f| FileReportInfo {
                    path: f.relative_path.clone(),
                    size: f.size,
                    lines: f.lines,
                })
                .collect(),
            skipped,
        }
    }

    /// Rough token estimate at four characters per token
    pub fn estimated_tokens(&self) -> usize {
        self.output_bytes / 4
    }
}

/// Report generator for scan results
#[derive(Debug, Default)]
pub struct Reporter;

impl Reporter {
    pub fn new() -> Self {
        Self
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Shorten a path to `max_len` characters, keeping its last segments
    fn format_path(&self, path: &str, max_len: usize) -> String {
        if path.chars().count() <= max_len {
            return path.to_string();
        }

        let mut segments = Vec::new();
        let mut current_len = 3; // "..."
        for part in path.rsplit('/') {
            let part_len = part.chars().count() + 1;
            if current_len + part_len > max_len {
                break;
            }
            segments.push(part);
            current_len += part_len;
        }

        if segments.is_empty() {
            let tail: String = path.chars().rev().take(max_len.saturating_sub(3)).collect();
            return format!("...{}", tail.chars().rev().collect::<String>());
        }

        segments.reverse();
        format!(".../{}", segments.join("/"))
    }

    /// Generate the report text
    pub fn generate_report(&self, report: &ScanReport) -> String {
        let files_title = if report.files.len() > 15 {
            "📋  TOP 10 LARGEST FILES"
        } else {
            "📋  COPIED FILES"
        };

        format!(
            "{}\n{}\n\n{}\n{}",
            files_title,
            self.create_files_table(report),
            "✅  COPY COMPLETE",
            self.create_summary_table(report)
        )
    }

    /// Print the report to stderr so stdout stays clean
    pub fn print_report(&self, report: &ScanReport) {
        eprintln!("\n{}", self.generate_report(report));
    }

    fn create_summary_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let mut rows = vec![
            SummaryRow {
                key: "📂 Root".to_string(),
                value: report.root.clone(),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📄 Files Copied".to_string(),
                value: self.format_number(report.files.len()),
            },
            SummaryRow {
                key: "📦 Output Size".to_string(),
                value: format_file_size(report.output_bytes as u64),
            },
            SummaryRow {
                key: "🔤 LLM Tokens".to_string(),
                value: format!(
                    "{} tokens (estimated)",
                    self.format_number(report.estimated_tokens())
                ),
            },
        ];

        for (reason, count) in &report.skipped {
            rows.push(SummaryRow {
                key: format!("⏭️ Skipped ({})", reason),
                value: self.format_number(*count),
            });
        }

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_files_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Size")]
            size: String,

            #[tabled(rename = "Lines")]
            lines: String,
        }

        let mut files: Vec<_> = report.files.iter().collect();
        if files.len() > 15 {
            files.sort_by(|a, b| b.size.cmp(&a.size));
            files.truncate(10);
        }

        let rows: Vec<FileRow> = files
            .iter()
            .map(|info| FileRow {
                path: self.format_path(&info.path, 60),
                size: format_file_size(info.size),
                lines: self.format_number(info.lines),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }
}
