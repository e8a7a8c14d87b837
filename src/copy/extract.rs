//! Field lookup inside the webhook response.
//!
//! The webhook is not consistent about where it puts its output fields. A
//! field may sit at the top level, under `render`, or under `data.render`,
//! and the whole object may arrive as a JSON-encoded string. The lookup is an
//! ordered list of container paths; the first container that holds the key
//! decides the result, even when the value there is empty.

use anyhow::{bail, Result};
use serde_json::Value;

/// Container paths searched for a field key, in priority order.
const LOOKUP_PATHS: &[&[&str]] = &[&[], &["render"], &["data", "render"]];

/// One output category of the generated copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Appeal points list (`c_points_cell`)
    Points,
    /// Big banner (`d_big_cell`)
    Big,
    /// Long banner (`e_long_cell`)
    Long,
    /// Two-column banner (`f_two_col_cell`)
    TwoColumn,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 4] = [
        Category::Points,
        Category::Big,
        Category::Long,
        Category::TwoColumn,
    ];

    /// The banner categories, one tab each.
    pub const BANNERS: [Category; 3] = [Category::Big, Category::Long, Category::TwoColumn];

    /// Response field key for this category.
    pub fn key(self) -> &'static str {
        match self {
            Category::Points => "c_points_cell",
            Category::Big => "d_big_cell",
            Category::Long => "e_long_cell",
            Category::TwoColumn => "f_two_col_cell",
        }
    }

    /// Panel or tab label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Points => "소구포인트",
            Category::Big => "빅배너",
            Category::Long => "롱배너",
            Category::TwoColumn => "2단 배너",
        }
    }

    /// Message shown when the category produced no sets.
    pub fn empty_message(self) -> &'static str {
        match self {
            Category::Points => "소구포인트가 없습니다.",
            Category::Big => "빅배너 문구가 없습니다.",
            Category::Long => "롱배너 문구가 없습니다.",
            Category::TwoColumn => "2단 배너 문구가 없습니다.",
        }
    }

    /// Position of this category in [`Category::ALL`].
    pub fn index(self) -> usize {
        match self {
            Category::Points => 0,
            Category::Big => 1,
            Category::Long => 2,
            Category::TwoColumn => 3,
        }
    }
}

/// Extract the text stored under `key` in a webhook response.
///
/// A string response is parsed as JSON first; if it does not parse, the
/// result is empty. Returns an empty string when no lookup path matches or
/// the matched value is null or otherwise empty. A non-empty value that is
/// not a string is an error.
pub fn extract_field(response: &Value, key: &str) -> Result<String> {
    let parsed;
    let root = match response {
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(value) => {
                parsed = value;
                &parsed
            }
            Err(_) => return Ok(String::new()),
        },
        other => other,
    };

    match LOOKUP_PATHS.iter().find_map(|path| lookup(root, path, key)) {
        Some(value) => field_text(value, key),
        None => Ok(String::new()),
    }
}

/// Walk `path` from `root` and return the value under `key` if the final
/// container is an object that holds it.
fn lookup<'a>(root: &'a Value, path: &[&str], key: &str) -> Option<&'a Value> {
    let container = path
        .iter()
        .try_fold(root, |node, segment| node.get(segment))?;
    container.as_object()?.get(key)
}

/// Text of a matched value. Empty-ish values (null, false, zero, empty
/// string, array or object) become `""`.
fn field_text(value: &Value, key: &str) -> Result<String> {
    match value {
        Value::Null | Value::Bool(false) => Ok(String::new()),
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => Ok(String::new()),
        Value::Array(items) if items.is_empty() => Ok(String::new()),
        Value::Object(map) if map.is_empty() => Ok(String::new()),
        other => bail!("field '{}' is not text: {}", key, other),
    }
}
