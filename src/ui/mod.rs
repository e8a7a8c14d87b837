//! # UI Module
//!
//! This module provides the terminal user interface for the banner copy
//! generator.
//!
//! ## Components
//!
//! - [`App`] - Session state (form fields, focus, last result, notices)
//! - [`mod@render`] - Rendering functions for drawing the TUI
//! - [`theme`] - Built-in color themes
//! - [`config`] - Persisted settings
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                    Header                       │
//! ├─────────────────────────────────────────────────┤
//! │ 영화 제목                                        │
//! ├──────────────────┬──────────────────────────────┤
//! │ 진행 중인 이벤트    │ 이벤트 내용 (only when 있음)    │
//! ├──────────────────┴──────────────────────────────┤
//! │ [ 배너 문구 생성하기 ]   [ 다시 쓰기 ]                │
//! │ status notice                                   │
//! ├─────────────────────────────────────────────────┤
//! │ ▼ 소구포인트 (always expanded)                     │
//! ├─────────────────────────────────────────────────┤
//! │ 1 빅배너 │ 2 롱배너 │ 3 2단 배너                     │
//! │   one titled section per set                    │
//! ├─────────────────────────────────────────────────┤
//! │                    Footer                       │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod config;
pub mod render;
pub mod theme;

pub use app::App;
pub use render::render;
