//! # Copy Module
//!
//! Post-processing for the text returned by the copy-generation webhook.
//!
//! ## Pipeline
//!
//! | Step | Function | Output |
//! |------|----------|--------|
//! | Locate a field in the response | [`extract::extract_field`] | raw text |
//! | Split the text into sets | [`segment::split_sets`] | ordered set bodies |
//! | Derive a display title per set | [`title::set_title`] | title or `""` |
//! | Assemble all four categories | [`output::GeneratedCopy::from_response`] | render model |
//!
//! The response carries up to four free-text fields, one per [`Category`].
//! Segmentation is a best-effort heuristic: the first rule that applies wins,
//! even when its result is degenerate.

pub mod extract;
pub mod output;
pub mod segment;
pub mod title;

pub use extract::{extract_field, Category};
pub use output::{CopySet, GeneratedCopy};
pub use segment::split_sets;
pub use title::set_title;
