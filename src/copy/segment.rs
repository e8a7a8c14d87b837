//! Splitting one response field into sets of copy.
//!
//! Rules are tried in a fixed order and the first one that applies decides
//! the result. A lower rule is never consulted once a higher one matched,
//! even if the higher rule yields a single set or none at all.
//!
//! 1. `---` anywhere in the text: split on the delimiter.
//! 2. Two or more lines starting with `소구포인트:` (optionally `- ` prefixed):
//!    one block per label, from label start to the next label start.
//! 3. Runs of two or more blank lines, when that produces several pieces.
//! 4. Otherwise the whole trimmed text is one set.

use anyhow::{Context, Result};
use regex::Regex;

/// Split `text` into ordered, trimmed, non-empty sets.
///
/// Empty or whitespace-only input yields no sets.
pub fn split_sets(text: &str) -> Result<Vec<String>> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let s = normalized.trim();
    if s.is_empty() {
        return Ok(Vec::new());
    }

    if s.contains("---") {
        let delimiter_re =
            Regex::new(r"\n?\s*---\s*\n?").context("Failed to compile delimiter regex pattern")?;
        return Ok(non_empty(delimiter_re.split(s)));
    }

    let label_re = Regex::new(r"(?m)^-?\s*소구포인트\s*:\s*")
        .context("Failed to compile label regex pattern")?;
    let starts: Vec<usize> = label_re.find_iter(s).map(|m| m.start()).collect();
    if starts.len() > 1 {
        let ends = starts.iter().skip(1).copied().chain(std::iter::once(s.len()));
        let blocks = starts.iter().zip(ends).map(|(&start, end)| &s[start..end]);
        return Ok(non_empty(blocks));
    }

    let blank_re =
        Regex::new(r"\n\s*\n\s*\n+").context("Failed to compile blank line regex pattern")?;
    let parts: Vec<&str> = blank_re.split(s).collect();
    if parts.len() > 1 {
        return Ok(non_empty(parts));
    }

    Ok(vec![s.to_string()])
}

fn non_empty<'a>(parts: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}
