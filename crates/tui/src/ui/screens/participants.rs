use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{App, ParticipantsMode},
    ui::theme::Theme,
};

pub fn render(frame: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    let renaming = app.state.participants.mode == ParticipantsMode::Rename;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(if renaming {
            [Constraint::Min(0), Constraint::Length(3)]
        } else {
            [Constraint::Min(0), Constraint::Length(0)]
        })
        .split(area);

    render_list(frame, layout[0], app, theme);
    if renaming {
        render_rename(frame, layout[1], app, theme);
    }
}

fn render_list(frame: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    let items = app
        .session
        .participants()
        .iter()
        .enumerate()
        .map(|(index, participant)| {
            let text = format!("{}. {}", index + 1, participant.name);
            ListItem::new(Line::from(text))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(app.state.participants.selected));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("People"))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_rename(frame: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled("New name", Style::default().fg(theme.dim)),
        Span::raw(": "),
        Span::raw(app.state.participants.input.as_str()),
        Span::styled("_", Style::default().fg(theme.accent)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Rename")
        .border_style(Style::default().fg(theme.accent));
    frame.render_widget(Paragraph::new(line).block(block), area);
}
