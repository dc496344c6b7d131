pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, ItemsMode, ParticipantsMode, Section, SummaryMode};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, app: &App) {
    let theme = Theme::default();
    let area = frame.area();

    // Main layout: info bar, tabs, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], app, &theme);
    components::tabs::render_tabs(frame, layout[1], app.state.section, &theme);

    match app.state.section {
        Section::Participants => screens::participants::render(frame, layout[2], app, &theme),
        Section::Items => screens::items::render(frame, layout[2], app, &theme),
        Section::Summary => screens::summary::render(frame, layout[2], app, &theme),
    }

    render_bottom_bar(frame, layout[3], app, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    let people = app.session.participants().len();
    let items = app.session.items().len();
    let grand_total = components::money::usd(app.state.totals.grand_total());

    let mut line = vec![
        Span::styled("divvy", Style::default().fg(theme.accent)),
        Span::raw("  "),
        Span::styled("People", Style::default().fg(theme.dim)),
        Span::raw(format!(": {people}  ")),
        Span::styled("Items", Style::default().fg(theme.dim)),
        Span::raw(format!(": {items}  ")),
        Span::styled("Total", Style::default().fg(theme.dim)),
        Span::raw(format!(": {grand_total}")),
    ];

    if let Some(notice) = &app.state.notice {
        line.push(Span::raw("   "));
        line.push(Span::styled(
            notice.as_str(),
            Style::default().fg(theme.accent),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(line)), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    let mut parts = components::tabs::tab_shortcuts(theme);

    let context_hints = get_context_hints(app, theme);
    if !context_hints.is_empty() {
        parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        parts.extend(context_hints);
    }

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("q", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" quit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

/// Returns context-specific keyboard hints based on current section and mode.
fn get_context_hints(app: &App, theme: &Theme) -> Vec<Span<'static>> {
    let accent = Style::default().fg(theme.accent);
    match app.state.section {
        Section::Participants => match app.state.participants.mode {
            ParticipantsMode::List => vec![
                Span::styled("a", accent),
                Span::raw(" add  "),
                Span::styled("e", accent),
                Span::raw(" rename  "),
                Span::styled("d", accent),
                Span::raw(" delete"),
            ],
            ParticipantsMode::Rename => vec![
                Span::styled("Enter", accent),
                Span::raw(" save  "),
                Span::styled("Esc", accent),
                Span::raw(" cancel"),
            ],
        },
        Section::Items => match app.state.items.mode {
            ItemsMode::List => vec![
                Span::styled("a", accent),
                Span::raw(" add  "),
                Span::styled("e", accent),
                Span::raw(" edit  "),
                Span::styled("d", accent),
                Span::raw(" delete"),
            ],
            ItemsMode::Edit => vec![
                Span::styled("Tab", accent),
                Span::raw(" next field  "),
                Span::styled("↑/↓", accent),
                Span::raw(" change  "),
                Span::styled("Enter", accent),
                Span::raw(" save  "),
                Span::styled("Esc", accent),
                Span::raw(" cancel"),
            ],
        },
        Section::Summary => match app.state.summary.mode {
            SummaryMode::View => vec![
                Span::styled("t", accent),
                Span::raw(" tax  "),
                Span::styled("i", accent),
                Span::raw(" tip  "),
                Span::styled("x", accent),
                Span::raw(" export"),
            ],
            SummaryMode::EditTax | SummaryMode::EditTip => vec![
                Span::styled("Enter", accent),
                Span::raw(" apply  "),
                Span::styled("Esc", accent),
                Span::raw(" cancel"),
            ],
        },
    }
}
