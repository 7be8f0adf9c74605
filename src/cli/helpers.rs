//! Shared helper functions for CLI commands.

use std::io::Read;
use std::path::Path;

use anyhow::Context;

use ocr_aggregate::models::TextRegion;
use ocr_aggregate::services::aggregation::pages_from_str;

/// Read a whole input file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Read and decode a JSON page array.
pub fn read_pages(path: &Path) -> anyhow::Result<Vec<Vec<TextRegion>>> {
    let json = read_input(path)?;
    pages_from_str(&json).with_context(|| format!("Invalid input in {}", path.display()))
}

/// Write to a file, or stdout when no path is given.
pub fn write_output(output: Option<&Path>, contents: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => std::fs::write(path, contents)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            println!("{}", contents);
            Ok(())
        }
    }
}

/// Shorten a string to at most `max` characters for progress messages.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
