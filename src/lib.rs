//! Bannergen - a terminal form for generating movie banner marketing copy
//!
//! This library provides the form state, the copy-generation webhook client,
//! and the text post-processing that turns the webhook's free-text fields
//! into titled sets of copy.

pub mod client;
pub mod copy;
pub mod form;
pub mod logging;
pub mod ui;
