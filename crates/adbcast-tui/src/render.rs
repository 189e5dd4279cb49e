//! Screen rendering
//!
//! Pure functions of the session state, the view state and the current
//! notice. Nothing here mutates state.

use adbcast_app::state::{ErrorScreen, ReadyState};
use adbcast_app::{AddValueForm, Field, MruList, Screen, SessionState, ViewState};
use adbcast_core::{Notice, NoticeStyle};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::layout::{self, center_rect};
use crate::theme;

const TITLE: &str = " adbcast ";
const DESCRIPTION: &str = "Send a broadcast intent to a connected device.";

/// Render the complete UI
pub fn view(frame: &mut Frame, state: &SessionState, view: &ViewState, notice: Option<&Notice>) {
    let areas = layout::create(frame.area());

    match state {
        SessionState::Loading => render_loading(frame, areas.body),
        SessionState::Error(screen) => render_error(frame, areas.body, screen),
        SessionState::Ready(ready) => match &view.screen {
            Screen::Main => render_form(frame, areas.body, ready, view),
            Screen::AddValue { list, form } => render_add_value(frame, areas.body, *list, form),
        },
    }

    if let Some(notice) = notice {
        render_notice(frame, areas.notice, notice);
    }
    render_help(frame, areas.help, state, &view.screen);
}

fn outer_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_ACTIVE))
        .title(TITLE)
        .title_style(Style::default().fg(theme::ACCENT).bold())
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let block = outer_block();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = Paragraph::new(Line::from("# Searching for devices...").bold())
        .alignment(Alignment::Center);
    frame.render_widget(text, center_rect(inner.width, 1, inner));
}

fn render_error(frame: &mut Frame, area: Rect, screen: &ErrorScreen) {
    let block = outer_block().border_style(Style::default().fg(theme::STATUS_RED));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            format!("# {}", screen.title),
            Style::default()
                .fg(theme::STATUS_RED)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            screen.message.clone(),
            Style::default().fg(theme::TEXT_PRIMARY),
        )),
    ];
    let text = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(text, inner.inner(ratatui::layout::Margin::new(1, 1)));
}

fn field_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(theme::BORDER_ACTIVE)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme::TEXT_SECONDARY)
    }
}

fn dropdown_line(ready: &ReadyState, view: &ViewState, field: Field) -> Line<'static> {
    let focused = view.focus == field;
    let total = match field {
        Field::MessageHistory => ready.message_history.len(),
        Field::Action => ready.actions.len(),
        Field::ExtraParam => ready.extra_params.len(),
        Field::Device => ready.devices.len(),
        Field::NewMessage => 0,
    };

    let value = match (field, view.selection(field)) {
        (Field::Device, Some(index)) => ready.devices.get(index).map(|d| d.display_name()),
        _ => view.selected_value(ready, field).map(String::from),
    };

    let marker = if focused { "> " } else { "  " };
    let mut spans = vec![
        Span::styled(marker, field_style(focused)),
        Span::styled(format!("{:<24}", field.title()), field_style(focused)),
    ];

    match value {
        Some(value) => {
            spans.push(Span::styled("◀ ", Style::default().fg(theme::TEXT_MUTED)));
            spans.push(Span::styled(
                value,
                Style::default().fg(theme::TEXT_PRIMARY),
            ));
            spans.push(Span::styled(" ▶", Style::default().fg(theme::TEXT_MUTED)));
            let position = view.selection(field).map(|i| i + 1).unwrap_or(0);
            spans.push(Span::styled(
                format!("  ({}/{})", position, total),
                Style::default().fg(theme::TEXT_MUTED),
            ));
        }
        None => spans.push(Span::styled(
            "(none)",
            Style::default().fg(theme::TEXT_MUTED),
        )),
    }

    Line::from(spans)
}

fn text_line(view: &ViewState) -> Line<'static> {
    let focused = view.focus == Field::NewMessage;
    let marker = if focused { "> " } else { "  " };
    let cursor = if focused { "█" } else { "" };

    Line::from(vec![
        Span::styled(marker, field_style(focused)),
        Span::styled(
            format!("{:<24}", Field::NewMessage.title()),
            field_style(focused),
        ),
        Span::styled(
            view.new_message.clone(),
            Style::default().fg(theme::TEXT_PRIMARY),
        ),
        Span::styled(cursor, Style::default().fg(theme::ACCENT)),
    ])
}

fn render_form(frame: &mut Frame, area: Rect, ready: &ReadyState, view: &ViewState) {
    let block = outer_block();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let separator = "─".repeat(inner.width.saturating_sub(2) as usize);
    let lines = vec![
        Line::from(Span::styled(
            DESCRIPTION,
            Style::default().fg(theme::TEXT_SECONDARY),
        )),
        Line::from(""),
        dropdown_line(ready, view, Field::MessageHistory),
        text_line(view),
        Line::from(Span::styled(
            separator,
            Style::default().fg(theme::BORDER_DIM),
        )),
        dropdown_line(ready, view, Field::Action),
        dropdown_line(ready, view, Field::ExtraParam),
        dropdown_line(ready, view, Field::Device),
    ];

    let [content] = Layout::vertical([Constraint::Min(0)])
        .margin(1)
        .areas(inner);
    frame.render_widget(Paragraph::new(lines), content);
}

fn add_value_labels(list: MruList) -> (&'static str, &'static str) {
    match list {
        MruList::ExtraParams => ("ADB Extra String Param", "EAN"),
        _ => ("ADB Action", "android.intent.action.VIEW"),
    }
}

fn render_add_value(frame: &mut Frame, area: Rect, list: MruList, form: &AddValueForm) {
    let (title, placeholder) = add_value_labels(list);

    let block = outer_block().title(format!(" {} ", title));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let value = if form.value().is_empty() {
        Span::styled(placeholder, Style::default().fg(theme::TEXT_MUTED))
    } else {
        Span::styled(
            form.value().to_string(),
            Style::default().fg(theme::TEXT_PRIMARY),
        )
    };

    let mut lines = vec![Line::from(vec![
        Span::styled("> ", field_style(true)),
        Span::styled(format!("{:<24}", title), field_style(true)),
        value,
        Span::styled("█", Style::default().fg(theme::ACCENT)),
    ])];

    if let Some(error) = form.error() {
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(theme::STATUS_RED),
        )));
    }

    let [content] = Layout::vertical([Constraint::Min(0)])
        .margin(1)
        .areas(inner);
    frame.render_widget(Paragraph::new(lines), content);
}

fn render_notice(frame: &mut Frame, area: Rect, notice: &Notice) {
    let (icon, color) = match notice.style {
        NoticeStyle::Progress => ("… ", theme::STATUS_YELLOW),
        NoticeStyle::Success => ("✓ ", theme::STATUS_GREEN),
        NoticeStyle::Failure => ("✗ ", theme::STATUS_RED),
    };

    let line = Line::from(vec![
        Span::styled(icon, Style::default().fg(color)),
        Span::styled(notice.display_line(), Style::default().fg(color)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn hint(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(theme::KEY_HINT)),
        Span::raw(label),
    ]
}

fn render_help(frame: &mut Frame, area: Rect, state: &SessionState, screen: &Screen) {
    let hints: Vec<[Span<'static>; 2]> = match (state, screen) {
        (SessionState::Ready(_), Screen::Main) => vec![
            hint("Enter", " Send  "),
            hint("Tab", " Next  "),
            hint("←/→", " Choose  "),
            hint("^A", " Add action  "),
            hint("^E", " Add extra param  "),
            hint("^L", " Clear storage  "),
            hint("Esc", " Quit"),
        ],
        (SessionState::Ready(_), Screen::AddValue { .. }) => {
            vec![hint("Enter", " Save  "), hint("Esc", " Back")]
        }
        _ => vec![hint("Esc", " Quit")],
    };

    let line = Line::from(hints.into_iter().flatten().collect::<Vec<_>>());
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use adbcast_bridge::Device;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(state: &SessionState, view: &ViewState, notice: Option<&Notice>) -> String {
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| super::view(f, state, view, notice))
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|c| c.symbol()).collect()
    }

    fn ready() -> SessionState {
        SessionState::Ready(ReadyState {
            devices: vec![Device::new("EMU001")],
            actions: vec!["android.intent.action.VIEW".to_string()],
            extra_params: vec!["EAN".to_string()],
            message_history: vec!["4006381333931".to_string()],
        })
    }

    fn ready_view(state: &SessionState) -> ViewState {
        let mut view = ViewState::default();
        view.reset_selections(state.ready().unwrap());
        view
    }

    #[test]
    fn test_loading_screen() {
        let content = render(&SessionState::Loading, &ViewState::default(), None);
        assert!(content.contains("Searching for devices..."));
    }

    #[test]
    fn test_error_screen() {
        let state = SessionState::Error(ErrorScreen::no_devices());
        let content = render(&state, &ViewState::default(), None);

        assert!(content.contains("# No devices found!"));
        assert!(content.contains("Please connect device and re-run."));
    }

    #[test]
    fn test_form_shows_fields_and_values() {
        let state = ready();
        let view = ready_view(&state);
        let content = render(&state, &view, None);

        assert!(content.contains("New message"));
        assert!(content.contains("Extra string param key"));
        assert!(content.contains("android.intent.action.VIEW"));
        assert!(content.contains("4006381333931"));
        assert!(content.contains("EMU001"));
    }

    #[test]
    fn test_form_shows_typed_message() {
        let state = ready();
        let mut view = ready_view(&state);
        view.new_message = "hello world".to_string();

        let content = render(&state, &view, None);

        assert!(content.contains("hello world"));
    }

    #[test]
    fn test_empty_list_shows_none() {
        let state = SessionState::Ready(ReadyState {
            devices: vec![Device::new("EMU001")],
            ..Default::default()
        });
        let view = ready_view(&state);

        let content = render(&state, &view, None);

        assert!(content.contains("(none)"));
    }

    #[test]
    fn test_notice_line() {
        let state = ready();
        let view = ready_view(&state);
        let notice = Notice::progress("Sending...");

        let content = render(&state, &view, Some(&notice));

        assert!(content.contains("Sending..."));
    }

    #[test]
    fn test_add_value_screen_validation() {
        let state = ready();
        let mut view = ready_view(&state);
        view.screen = Screen::add_value(MruList::ExtraParams);

        let content = render(&state, &view, None);

        assert!(content.contains("ADB Extra String Param"));
        assert!(content.contains("Input can't be empty"));
    }

    #[test]
    fn test_add_value_screen_after_edit_to_empty() {
        let state = ready();
        let mut view = ready_view(&state);
        let mut form = AddValueForm::new();
        form.push_char('x');
        form.pop_char();
        view.screen = Screen::AddValue {
            list: MruList::Actions,
            form,
        };

        let content = render(&state, &view, None);

        assert!(content.contains("ADB Action"));
        assert!(content.contains("Value can't be empty"));
    }
}
