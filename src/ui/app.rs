use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::client::CopyGenerator;
use crate::copy::{Category, GeneratedCopy};
use crate::form::{FormAction, FormState, TextField};
use crate::ui::render;
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Title,
    EventStatus,
    EventContent,
    GenerateButton,
    ResetButton,
    /// The points block
    Points,
    /// The banner tabs
    Output,
}

const FOCUS_ORDER: [Focus; 7] = [
    Focus::Title,
    Focus::EventStatus,
    Focus::EventContent,
    Focus::GenerateButton,
    Focus::ResetButton,
    Focus::Points,
    Focus::Output,
];

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Generate,
    Quit,
}

/// Status line message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
    Error(String),
    Success(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(t) | Notice::Warning(t) | Notice::Error(t) | Notice::Success(t) => t,
        }
    }
}

pub struct App {
    pub form: FormState,
    pub focus: Focus,
    /// Result of the last successful generation
    pub output: Option<GeneratedCopy>,
    pub generated_at: Option<DateTime<Local>>,
    /// Index into [`Category::BANNERS`]
    pub active_tab: usize,
    pub output_scroll: u16,
    pub points_scroll: u16,
    /// Text width inside the output panes, used to count wrapped rows
    pub text_width: u16,
    pub notice: Option<Notice>,
    pub busy: bool,
    pub should_quit: bool,
    pub theme: Theme,
}

impl App {
    pub fn new(form: FormState, theme: Theme) -> Self {
        Self {
            form,
            focus: Focus::Title,
            output: None,
            generated_at: None,
            active_tab: 0,
            output_scroll: 0,
            points_scroll: 0,
            text_width: u16::MAX,
            notice: None,
            busy: false,
            should_quit: false,
            theme,
        }
    }

    /// Focus stops in display order. The event content field only takes
    /// focus while it is visible.
    fn focus_stops(&self) -> Vec<Focus> {
        FOCUS_ORDER
            .iter()
            .copied()
            .filter(|f| *f != Focus::EventContent || self.form.event_content_visible())
            .collect()
    }

    pub fn focus_next(&mut self) {
        let stops = self.focus_stops();
        let pos = stops.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = stops[(pos + 1) % stops.len()];
    }

    pub fn focus_previous(&mut self) {
        let stops = self.focus_stops();
        let pos = stops.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = stops[(pos + stops.len() - 1) % stops.len()];
    }

    /// Apply a form transition and keep focus on a visible field.
    pub fn update_form(&mut self, action: FormAction) {
        self.form = self.form.apply(action);
        if self.focus == Focus::EventContent && !self.form.event_content_visible() {
            self.focus = Focus::EventStatus;
        }
    }

    /// Clear every field and the displayed result.
    pub fn reset(&mut self) {
        self.update_form(FormAction::Reset);
        self.output = None;
        self.generated_at = None;
        self.active_tab = 0;
        self.output_scroll = 0;
        self.points_scroll = 0;
        self.notice = None;
        self.focus = Focus::Title;
    }

    pub fn active_category(&self) -> Category {
        Category::BANNERS[self.active_tab % Category::BANNERS.len()]
    }

    pub fn select_tab(&mut self, index: usize) {
        if index < Category::BANNERS.len() && index != self.active_tab {
            self.active_tab = index;
            self.output_scroll = 0;
        }
    }

    pub fn next_tab(&mut self) {
        self.select_tab((self.active_tab + 1) % Category::BANNERS.len());
    }

    pub fn previous_tab(&mut self) {
        let count = Category::BANNERS.len();
        self.select_tab((self.active_tab + count - 1) % count);
    }

    /// Record the terminal width; the output panes span it inside a border.
    pub fn set_terminal_width(&mut self, width: u16) {
        self.text_width = width.saturating_sub(2);
    }

    /// Rows the active tab renders after wrapping.
    pub fn active_tab_line_count(&self) -> usize {
        match &self.output {
            Some(output) => render::banner_paragraph(self, output, self.active_category())
                .line_count(self.text_width),
            None => 0,
        }
    }

    /// Rows the points block renders after wrapping.
    pub fn points_line_count(&self) -> usize {
        match &self.output {
            Some(output) => render::points_paragraph(self, output).line_count(self.text_width),
            None => 0,
        }
    }

    pub fn scroll_output_down(&mut self) {
        let max = self.active_tab_line_count().saturating_sub(1);
        if usize::from(self.output_scroll) < max {
            self.output_scroll += 1;
        }
    }

    pub fn scroll_output_up(&mut self) {
        self.output_scroll = self.output_scroll.saturating_sub(1);
    }

    pub fn scroll_points_down(&mut self) {
        let max = self.points_line_count().saturating_sub(1);
        if usize::from(self.points_scroll) < max {
            self.points_scroll += 1;
        }
    }

    pub fn scroll_points_up(&mut self) {
        self.points_scroll = self.points_scroll.saturating_sub(1);
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next().clone();
    }

    /// Map a key press to a state change, returning what the event loop
    /// should do next.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        if key.kind != KeyEventKind::Press || self.busy {
            return KeyAction::None;
        }

        let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if has_ctrl => return KeyAction::Quit,
            KeyCode::Char('g') if has_ctrl => return KeyAction::Generate,
            KeyCode::Char('r') if has_ctrl => {
                self.reset();
                return KeyAction::None;
            }
            KeyCode::Esc => return KeyAction::Quit,
            KeyCode::Tab => {
                self.focus_next();
                return KeyAction::None;
            }
            KeyCode::BackTab => {
                self.focus_previous();
                return KeyAction::None;
            }
            _ => {}
        }
        if has_ctrl {
            return KeyAction::None;
        }

        match self.focus {
            Focus::Title => self.handle_text_key(TextField::Title, key.code),
            Focus::EventContent => self.handle_text_key(TextField::EventContent, key.code),
            Focus::EventStatus => match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') | KeyCode::Enter => {
                    self.update_form(FormAction::ToggleEventStatus);
                    KeyAction::None
                }
                KeyCode::Down => {
                    self.focus_next();
                    KeyAction::None
                }
                KeyCode::Up => {
                    self.focus_previous();
                    KeyAction::None
                }
                _ => KeyAction::None,
            },
            Focus::GenerateButton => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Generate,
                KeyCode::Right => {
                    self.focus = Focus::ResetButton;
                    KeyAction::None
                }
                _ => KeyAction::None,
            },
            Focus::ResetButton => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.reset();
                    KeyAction::None
                }
                KeyCode::Left => {
                    self.focus = Focus::GenerateButton;
                    KeyAction::None
                }
                _ => KeyAction::None,
            },
            Focus::Points => match key.code {
                KeyCode::Char('q') => KeyAction::Quit,
                KeyCode::Down | KeyCode::Char('j') => {
                    self.scroll_points_down();
                    KeyAction::None
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.scroll_points_up();
                    KeyAction::None
                }
                KeyCode::Char('t') => {
                    self.cycle_theme();
                    KeyAction::None
                }
                _ => KeyAction::None,
            },
            Focus::Output => self.handle_output_key(key.code),
        }
    }

    fn handle_text_key(&mut self, field: TextField, code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Char(c) => self.update_form(FormAction::Input(field, c)),
            KeyCode::Backspace => self.update_form(FormAction::Backspace(field)),
            KeyCode::Enter | KeyCode::Down => self.focus_next(),
            KeyCode::Up => self.focus_previous(),
            _ => {}
        }
        KeyAction::None
    }

    fn handle_output_key(&mut self, code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Char('q') => return KeyAction::Quit,
            KeyCode::Left | KeyCode::Char('h') => self.previous_tab(),
            KeyCode::Right | KeyCode::Char('l') => self.next_tab(),
            KeyCode::Char(c @ '1'..='3') => {
                if let Some(digit) = c.to_digit(10) {
                    self.select_tab(digit as usize - 1);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.scroll_output_down(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_output_up(),
            KeyCode::Char('t') => self.cycle_theme(),
            _ => {}
        }
        KeyAction::None
    }

    /// Run one generate cycle: validate, call the generator, then replace the
    /// output on success. `on_busy` is called once before the request is
    /// sent so the caller can redraw; a failed redraw is logged and the
    /// cycle continues.
    ///
    /// A blank title only sets a warning; the generator is not called. On
    /// failure the previous output stays as it was.
    pub async fn generate<G, F>(&mut self, generator: &G, mut on_busy: F)
    where
        G: CopyGenerator + ?Sized,
        F: FnMut(&App) -> Result<()>,
    {
        let request = match self.form.to_request() {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Generate rejected: {}", e);
                self.notice = Some(Notice::Warning(e.to_string()));
                self.focus = Focus::Title;
                return;
            }
        };

        self.busy = true;
        self.notice = Some(Notice::Info(
            "AI가 영화 정보를 분석하고 문구를 생성 중입니다...".to_string(),
        ));
        if let Err(e) = on_busy(self) {
            tracing::warn!("Busy redraw failed: {:#}", e);
        }

        let result = generator.generate(&request).await;
        self.busy = false;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Generation failed: {}", e);
                self.notice = Some(Notice::Error(e.user_message()));
                return;
            }
        };

        match GeneratedCopy::from_response(&response) {
            Ok(generated) => {
                let now = Local::now();
                tracing::info!(
                    points = generated.sets(Category::Points).len(),
                    big = generated.sets(Category::Big).len(),
                    long = generated.sets(Category::Long).len(),
                    two_col = generated.sets(Category::TwoColumn).len(),
                    "Generated copy"
                );
                self.output = Some(generated);
                self.generated_at = Some(now);
                self.active_tab = 0;
                self.output_scroll = 0;
                self.points_scroll = 0;
                self.notice = Some(Notice::Success(format!(
                    "문구 생성이 완료되었습니다! ({})",
                    now.format("%H:%M:%S")
                )));
            }
            Err(e) => {
                tracing::error!("Failed to process response: {:#}", e);
                self.notice = Some(Notice::Error(format!(
                    "예상치 못한 오류가 발생했습니다: {}",
                    e
                )));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::EventStatus;

    fn test_app() -> App {
        App::new(FormState::default(), Theme::default_theme().clone())
    }

    #[test]
    fn test_focus_skips_hidden_event_content() {
        let mut app = test_app();
        app.focus_next();
        assert_eq!(app.focus, Focus::EventStatus);
        app.focus_next();
        assert_eq!(app.focus, Focus::GenerateButton);
    }

    #[test]
    fn test_focus_visits_event_content_when_present() {
        let mut app = test_app();
        app.update_form(FormAction::SetEventStatus(EventStatus::Present));
        app.focus = Focus::EventStatus;
        app.focus_next();
        assert_eq!(app.focus, Focus::EventContent);
    }

    #[test]
    fn test_focus_wraps_both_ways() {
        let mut app = test_app();
        app.focus_previous();
        assert_eq!(app.focus, Focus::Output);
        app.focus_next();
        assert_eq!(app.focus, Focus::Title);
    }

    #[test]
    fn test_hiding_event_content_moves_focus() {
        let mut app = test_app();
        app.update_form(FormAction::SetEventStatus(EventStatus::Present));
        app.focus = Focus::EventContent;
        app.update_form(FormAction::SetEventStatus(EventStatus::Absent));
        assert_eq!(app.focus, Focus::EventStatus);
    }

    #[test]
    fn test_tabs_wrap() {
        let mut app = test_app();
        assert_eq!(app.active_category(), Category::Big);
        app.previous_tab();
        assert_eq!(app.active_category(), Category::TwoColumn);
        app.next_tab();
        assert_eq!(app.active_category(), Category::Big);
        app.select_tab(7);
        assert_eq!(app.active_category(), Category::Big);
    }

    #[test]
    fn test_scroll_bounded_without_output() {
        let mut app = test_app();
        app.scroll_output_down();
        assert_eq!(app.output_scroll, 0);
        app.scroll_output_up();
        assert_eq!(app.output_scroll, 0);
    }

    #[test]
    fn test_notice_text() {
        assert_eq!(Notice::Warning("w".to_string()).text(), "w");
        assert_eq!(Notice::Success("s".to_string()).text(), "s");
    }
}
