//! Render model for one generation result.

use anyhow::Result;
use serde_json::Value;
use std::fmt::Write as _;

use crate::copy::extract::{extract_field, Category};
use crate::copy::segment::split_sets;
use crate::copy::title::set_title;

/// One unit of generated copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopySet {
    /// Extracted label, or the positional fallback (`세트 N`)
    pub title: String,
    /// The set text, exactly as segmented
    pub body: String,
}

impl CopySet {
    /// Build a set from its body, using the 1-based `position` when the body
    /// carries no label.
    pub fn from_body(position: usize, body: String) -> Result<Self> {
        let extracted = set_title(&body)?;
        let title = if extracted.is_empty() {
            fallback_title(position)
        } else {
            extracted
        };
        Ok(Self { title, body })
    }
}

/// Positional label for a set without an extracted title.
pub fn fallback_title(position: usize) -> String {
    format!("세트 {}", position)
}

/// Segmented copy for all four categories of one response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedCopy {
    sets: [Vec<CopySet>; 4],
}

impl GeneratedCopy {
    /// Extract, segment and title every category of a webhook response.
    ///
    /// A response with none of the fields yields four empty categories, not
    /// an error. A field holding a non-empty value that is not a string is an
    /// error.
    pub fn from_response(response: &Value) -> Result<Self> {
        let mut generated = Self::default();
        for category in Category::ALL {
            let text = extract_field(response, category.key())?;
            let sets = split_sets(&text)?
                .into_iter()
                .enumerate()
                .map(|(i, body)| CopySet::from_body(i + 1, body))
                .collect::<Result<Vec<_>>>()?;
            tracing::debug!(
                category = category.key(),
                chars = text.chars().count(),
                sets = sets.len(),
                "Segmented response field"
            );
            generated.sets[category.index()] = sets;
        }
        Ok(generated)
    }

    /// Sets of one category, in order.
    pub fn sets(&self, category: Category) -> &[CopySet] {
        &self.sets[category.index()]
    }

    /// The points category as a single block, sets joined by newlines.
    /// `None` when there are no points.
    pub fn points_block(&self) -> Option<String> {
        let points = self.sets(Category::Points);
        if points.is_empty() {
            return None;
        }
        let bodies: Vec<&str> = points.iter().map(|s| s.body.as_str()).collect();
        Some(bodies.join("\n"))
    }

    /// True when no category produced a set.
    pub fn is_empty(&self) -> bool {
        self.sets.iter().all(Vec::is_empty)
    }

    /// Plain-text report of all categories, used outside the TUI.
    pub fn to_report(&self) -> String {
        let mut report = String::new();

        let _ = writeln!(report, "== {} ==", Category::Points.label());
        match self.points_block() {
            Some(block) => {
                let _ = writeln!(report, "{}", block);
            }
            None => {
                let _ = writeln!(report, "{}", Category::Points.empty_message());
            }
        }

        for category in Category::BANNERS {
            let _ = writeln!(report, "\n== {} ==", category.label());
            let sets = self.sets(category);
            if sets.is_empty() {
                let _ = writeln!(report, "{}", category.empty_message());
                continue;
            }
            for (i, set) in sets.iter().enumerate() {
                if i > 0 {
                    report.push('\n');
                }
                let _ = writeln!(report, "[{}]", set.title);
                let _ = writeln!(report, "{}", set.body);
            }
        }

        report
    }
}
