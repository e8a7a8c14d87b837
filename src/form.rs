//! # Form State
//!
//! The three user-editable fields and the payload derived from them.
//!
//! Every change goes through [`FormState::apply`], which returns the next
//! state with the derivation rule already applied: while the event is
//! [`EventStatus::Absent`] the event content is always empty.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Whether a promotional event is running. Serialized as the labels the
/// webhook expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EventStatus {
    #[serde(rename = "있음")]
    Present,
    #[default]
    #[serde(rename = "없음")]
    Absent,
}

impl EventStatus {
    /// Display label (also the wire value).
    pub fn label(self) -> &'static str {
        match self {
            EventStatus::Present => "있음",
            EventStatus::Absent => "없음",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            EventStatus::Present => EventStatus::Absent,
            EventStatus::Absent => EventStatus::Present,
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Editable text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Title,
    EventContent,
}

/// A single state transition of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// Append a character to a text field
    Input(TextField, char),
    /// Remove the last character of a text field
    Backspace(TextField),
    /// Replace a text field's contents
    Set(TextField, String),
    SetEventStatus(EventStatus),
    ToggleEventStatus,
    /// Restore all fields to their defaults
    Reset,
}

/// Local validation failures. No request is sent when one occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("영화 제목을 입력해주세요!")]
    EmptyTitle,
}

/// Session-scoped form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub title: String,
    pub event_status: EventStatus,
    pub event_content: String,
}

impl FormState {
    /// Build a normalized state from raw field values.
    pub fn new(
        title: impl Into<String>,
        event_status: EventStatus,
        event_content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            event_status,
            event_content: event_content.into(),
        }
        .normalized()
    }

    /// Apply one transition and return the normalized next state.
    pub fn apply(&self, action: FormAction) -> Self {
        let mut next = self.clone();
        match action {
            FormAction::Input(field, c) => next.field_mut(field).push(c),
            FormAction::Backspace(field) => {
                next.field_mut(field).pop();
            }
            FormAction::Set(field, value) => *next.field_mut(field) = value,
            FormAction::SetEventStatus(status) => next.event_status = status,
            FormAction::ToggleEventStatus => next.event_status = next.event_status.toggled(),
            FormAction::Reset => next = Self::default(),
        }
        next.normalized()
    }

    /// Whether the event content field is shown.
    pub fn event_content_visible(&self) -> bool {
        self.event_status == EventStatus::Present
    }

    pub fn field(&self, field: TextField) -> &str {
        match field {
            TextField::Title => &self.title,
            TextField::EventContent => &self.event_content,
        }
    }

    /// Validate the form and derive the request payload.
    pub fn to_request(&self) -> Result<GenerateRequest, FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::EmptyTitle);
        }
        let state = self.clone().normalized();
        Ok(GenerateRequest {
            movie_title: state.title,
            event_status: state.event_status,
            event_content: state.event_content,
        })
    }

    fn field_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Title => &mut self.title,
            TextField::EventContent => &mut self.event_content,
        }
    }

    fn normalized(mut self) -> Self {
        if self.event_status == EventStatus::Absent {
            self.event_content.clear();
        }
        self
    }
}

/// JSON body posted to the copy-generation webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub movie_title: String,
    pub event_status: EventStatus,
    pub event_content: String,
}
