/*!
 * Parser for `.clip4llm` configuration files
 *
 * The format is line oriented `key=value`. Blank lines and `#` comments are
 * skipped, unknown keys are ignored, malformed values leave the field unset.
 */

use std::fs;
use std::io;
use std::path::Path;

use crate::config::Settings;
use crate::error::{Clip4llmError, Result};

/// Name of the configuration file looked up in every directory
pub const CONFIG_FILE_NAME: &str = ".clip4llm";

/// Load the configuration file at `path`.
///
/// A missing file is `Ok(None)`. Any other I/O failure on an existing file
/// is an error; callers decide whether that matters.
pub fn load_settings(path: &Path) -> Result<Option<Settings>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(parse_settings(&String::from_utf8_lossy(&bytes)))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Clip4llmError::ConfigRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Parse the text of one configuration file
pub fn parse_settings(source: &str) -> Settings {
    let mut settings = Settings::default();

    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim();

        match key.trim() {
            "delimiter" => {
                settings.delimiter = (!value.is_empty()).then(|| value.to_string());
            }
            "max-size" => {
                if let Ok(size) = value.parse::<i64>() {
                    settings.max_size_kb = u64::try_from(size).ok().filter(|&kb| kb > 0);
                }
            }
            "no-recursive" => settings.no_recursive = value == "true",
            "include" => settings.include = parse_comma_separated(value),
            "exclude" => settings.exclude = parse_comma_separated(value),
            _ => {}
        }
    }

    settings
}

/// Split a comma-separated list, trimming entries and dropping empty ones
pub fn parse_comma_separated(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}
