use crate::copy::{Category, GeneratedCopy};
use crate::ui::app::{App, Focus, Notice};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.bg).fg(theme.fg)),
        frame.area(),
    );

    // Header + Form + Buttons + Notice + Output + Footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Title input
            Constraint::Length(3), // Event selector + content
            Constraint::Length(1), // Buttons
            Constraint::Length(1), // Notice
            Constraint::Min(0),    // Output
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_header(frame, app, main_chunks[0]);
    render_text_input(
        frame,
        app,
        main_chunks[1],
        "영화 제목",
        &app.form.title,
        "예: 범죄도시4",
        app.focus == Focus::Title,
    );
    render_event_row(frame, app, main_chunks[2]);
    render_buttons(frame, app, main_chunks[3]);
    render_notice(frame, app, main_chunks[4]);
    render_output(frame, app, main_chunks[5]);
    render_footer(frame, app, main_chunks[6]);
}

fn border_style(app: &App, focused: bool) -> Style {
    if focused {
        Style::default().fg(app.theme.accent)
    } else {
        Style::default().fg(app.theme.fg_dim)
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header_text = vec![Line::from(vec![
        Span::styled(
            "  🎬 영화 배너 문구 자동 생성기  ",
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "영화 제목과 이벤트 유무·내용을 입력하면 AI가 문구를 생성합니다",
            Style::default().fg(app.theme.fg_dim),
        ),
    ])];

    let header = Paragraph::new(header_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.accent)),
    );

    frame.render_widget(header, area);
}

fn render_text_input(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
) {
    let line = if value.is_empty() && !focused {
        Line::from(Span::styled(
            placeholder.to_string(),
            Style::default().fg(app.theme.fg_dim),
        ))
    } else if focused {
        Line::from(vec![
            Span::raw(value.to_string()),
            Span::styled("▏", Style::default().fg(app.theme.accent)),
        ])
    } else {
        Line::from(value.to_string())
    };

    let style = if focused {
        Style::default().bg(app.theme.surface)
    } else {
        Style::default()
    };

    let input = Paragraph::new(line).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(label.to_string())
            .border_style(border_style(app, focused)),
    );

    frame.render_widget(input, area);
}

fn render_event_row(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(0)])
        .split(area);

    let focused = app.focus == Focus::EventStatus;
    let status = app.form.event_status;
    let selector = Paragraph::new(Line::from(vec![
        Span::styled("◀ ", Style::default().fg(app.theme.fg_dim)),
        Span::styled(
            status.label(),
            Style::default()
                .fg(app.theme.secondary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", Style::default().fg(app.theme.fg_dim)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("진행 중인 이벤트")
            .border_style(border_style(app, focused)),
    );
    frame.render_widget(selector, chunks[0]);

    if app.form.event_content_visible() {
        render_text_input(
            frame,
            app,
            chunks[1],
            "이벤트 내용",
            &app.form.event_content,
            "예: 50% 할인쿠폰",
            app.focus == Focus::EventContent,
        );
    } else {
        let hint = Paragraph::new(Span::styled(
            "할인·쿠폰·경품 등 진행 중인 이벤트가 있으면 '있음'을 선택하세요",
            Style::default().fg(app.theme.fg_dim),
        ))
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: true });
        frame.render_widget(hint, chunks[1].inner(ratatui::layout::Margin::new(1, 1)));
    }
}

fn render_buttons(frame: &mut Frame, app: &App, area: Rect) {
    let button = |label: &'static str, focused: bool| {
        if focused {
            Span::styled(
                label,
                Style::default()
                    .fg(app.theme.bg)
                    .bg(app.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(label, Style::default().fg(app.theme.fg))
        }
    };

    let line = Line::from(vec![
        Span::raw(" "),
        button("[ 배너 문구 생성하기 ]", app.focus == Focus::GenerateButton),
        Span::raw("   "),
        button("[ 다시 쓰기 ]", app.focus == Focus::ResetButton),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_notice(frame: &mut Frame, app: &App, area: Rect) {
    let Some(notice) = &app.notice else {
        return;
    };
    let (icon, color) = match notice {
        Notice::Info(_) => ("⏳", app.theme.accent),
        Notice::Warning(_) => ("⚠", app.theme.secondary),
        Notice::Error(_) => ("✖", app.theme.error),
        Notice::Success(_) => ("✔", app.theme.success),
    };
    let line = Line::from(Span::styled(
        format!(" {} {}", icon, notice.text()),
        Style::default().fg(color),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_output(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Output;

    let Some(output) = &app.output else {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  영화 제목을 입력하고 [배너 문구 생성하기]를 누르세요 (Ctrl+G)",
                Style::default().fg(app.theme.fg_dim),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("생성된 배너 문구")
                .border_style(border_style(app, focused)),
        );
        frame.render_widget(placeholder, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    // Points: always expanded, one block
    let points = points_paragraph(app, output)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("▼ {}", Category::Points.label()))
                .border_style(border_style(app, app.focus == Focus::Points)),
        )
        .scroll((app.points_scroll, 0));
    frame.render_widget(points, chunks[0]);

    let banner_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(chunks[1]);

    let titles: Vec<String> = Category::BANNERS
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} {} ({})", i + 1, c.label(), output.sets(*c).len()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.active_tab)
        .style(Style::default().fg(app.theme.fg_dim))
        .highlight_style(
            Style::default()
                .fg(app.theme.accent)
                .bg(app.theme.surface)
                .add_modifier(Modifier::BOLD),
        )
        .divider("│");
    frame.render_widget(tabs, banner_chunks[0]);

    let category = app.active_category();
    let sets_panel = banner_paragraph(app, output, category)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(category.label())
                .border_style(border_style(app, focused)),
        )
        .scroll((app.output_scroll, 0));
    frame.render_widget(sets_panel, banner_chunks[1]);
}

/// The points block without its frame, wrapped to the pane width.
pub fn points_paragraph(app: &App, output: &GeneratedCopy) -> Paragraph<'static> {
    let lines: Vec<Line> = match output.points_block() {
        Some(block) => block.lines().map(|l| Line::from(l.to_string())).collect(),
        None => vec![Line::from(Span::styled(
            Category::Points.empty_message(),
            Style::default().fg(app.theme.fg_dim),
        ))],
    };
    Paragraph::new(lines).wrap(Wrap { trim: false })
}

/// One banner tab's sets without the frame, wrapped to the pane width.
pub fn banner_paragraph(
    app: &App,
    output: &GeneratedCopy,
    category: Category,
) -> Paragraph<'static> {
    let sets = output.sets(category);
    let mut lines: Vec<Line> = Vec::new();
    if sets.is_empty() {
        lines.push(Line::from(Span::styled(
            category.empty_message(),
            Style::default().fg(app.theme.fg_dim),
        )));
    }
    for set in sets {
        lines.push(Line::from(Span::styled(
            format!("■ {}", set.title),
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        )));
        lines.extend(set.body.lines().map(|l| Line::from(format!("  {}", l))));
        lines.push(Line::from(Span::styled(
            "────────────────────────────────────────",
            Style::default().fg(app.theme.fg_dim),
        )));
    }
    Paragraph::new(lines).wrap(Wrap { trim: false })
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.focus {
        Focus::Title | Focus::EventContent => {
            "[Tab] Next field  [Ctrl+G] Generate  [Ctrl+R] Reset  [Esc] Quit"
        }
        Focus::EventStatus => "[←→/Space] Toggle  [Tab] Next  [Ctrl+G] Generate  [Esc] Quit",
        Focus::GenerateButton | Focus::ResetButton => {
            "[Enter] Press  [←→] Switch button  [Tab] Next  [Esc] Quit"
        }
        Focus::Points => "[↑↓/jk] Scroll  [t] Theme  [Tab] Tabs  [q] Quit",
        Focus::Output => {
            "[←→/1-3] Tabs  [↑↓/jk] Scroll  [t] Theme  [Tab] Form  [q] Quit"
        }
    };

    let footer = Paragraph::new(help_text)
        .style(Style::default().fg(app.theme.fg_dim))
        .block(Block::default());

    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormState;
    use crate::ui::theme::Theme;
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).expect("terminal");
        terminal.draw(|f| render(f, app)).expect("draw");
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_footer_follows_focus() {
        let mut app = App::new(FormState::default(), Theme::default_theme().clone());
        assert!(draw(&app).contains("[Ctrl+G] Generate"));
        app.focus = Focus::Output;
        assert!(draw(&app).contains("[t] Theme"));
    }

    #[test]
    fn test_tabs_show_set_counts() {
        let mut app = App::new(FormState::default(), Theme::default_theme().clone());
        let response = json!({"e_long_cell": "A\n---\nB\n---\nC", "d_big_cell": "X"});
        app.output = Some(GeneratedCopy::from_response(&response).expect("build"));
        let screen = draw(&app);
        assert!(screen.contains("(1)"));
        assert!(screen.contains("(3)"));
        assert!(screen.contains("(0)"));
    }

    #[test]
    fn test_long_banner_line_wraps_into_view() {
        let mut app = App::new(FormState::default(), Theme::default_theme().clone());
        let body = format!("{}END", "가".repeat(80));
        let response = json!({ "d_big_cell": body });
        app.output = Some(GeneratedCopy::from_response(&response).expect("build"));
        assert!(draw(&app).contains("END"));
    }

    #[test]
    fn test_points_scroll_reveals_later_lines() {
        let mut app = App::new(FormState::default(), Theme::default_theme().clone());
        let points: Vec<String> = (1..=30).map(|i| format!("point-{i:02}")).collect();
        let response = json!({ "c_points_cell": points.join("\n") });
        app.output = Some(GeneratedCopy::from_response(&response).expect("build"));
        app.set_terminal_width(100);
        assert!(!draw(&app).contains("point-30"));

        app.focus = Focus::Points;
        for _ in 0..40 {
            app.scroll_points_down();
        }
        assert!(draw(&app).contains("point-30"));
    }
}
