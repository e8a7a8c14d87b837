use anyhow::{Context, Result};
use regex::Regex;

/// Line-anchored label patterns, most specific first.
const TITLE_PATTERNS: [&str; 3] = [
    r"(?im)^\s*\[\s*선정\s*소구포인트\s*\]\s*:\s*(.+?)\s*$",
    r"(?im)^\s*-\s*소구포인트\s*:\s*(.+?)\s*$",
    r"(?im)^\s*소구포인트\s*:\s*(.+?)\s*$",
];

/// Extract a display title from a set's labelled appeal point.
///
/// Recognized labels, in priority order:
/// - `[선정 소구포인트]: value`
/// - `- 소구포인트: value`
/// - `소구포인트: value`
///
/// A trailing parenthetical such as a character count (`(12자)`) is removed.
/// Returns an empty string when no label is present; callers substitute a
/// positional label.
pub fn set_title(block: &str) -> Result<String> {
    if block.is_empty() {
        return Ok(String::new());
    }
    let s = block.replace("\r\n", "\n").replace('\r', "\n");

    let annotation_re =
        Regex::new(r"\s*\([^)]*\)\s*$").context("Failed to compile annotation regex pattern")?;

    for pattern in TITLE_PATTERNS {
        let label_re = Regex::new(pattern).context("Failed to compile title regex pattern")?;
        if let Some(cap) = label_re.captures(&s) {
            let value = cap.get(1).map_or("", |m| m.as_str()).trim();
            return Ok(annotation_re.replace(value, "").trim().to_string());
        }
    }

    Ok(String::new())
}
