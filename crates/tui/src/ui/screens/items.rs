use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{App, EditorField, ItemEditor, ItemsMode, SplitUnit},
    input,
    ui::{components::money::usd, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    match app.state.items.mode {
        ItemsMode::List => render_list(frame, area, app, theme),
        ItemsMode::Edit => match &app.state.items.editor {
            Some(editor) => render_editor(frame, area, app, editor, theme),
            None => render_list(frame, area, app, theme),
        },
    }
}

fn render_list(frame: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    let items = app
        .state
        .rows
        .iter()
        .map(|row| {
            let mut spans = vec![
                Span::raw(format!("{:<24}", row.name)),
                Span::raw(format!("{:>10}  ", usd(row.cost))),
                Span::styled(row.payer.clone(), Style::default().fg(theme.dim)),
            ];
            if !row.valid {
                spans.push(Span::styled(
                    "  ✗ not allocated",
                    Style::default().fg(theme.error),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(app.state.items.selected));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Items"))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_editor(
    frame: &mut Frame<'_>,
    area: Rect,
    app: &App,
    editor: &ItemEditor,
    theme: &Theme,
) {
    let participants = app.session.participants();
    let count = participants.len();

    let mut lines = vec![
        field_line("Name", &editor.name, editor.field == EditorField::Name, theme),
        field_line("Cost", &editor.cost, editor.field == EditorField::Cost, theme),
        choice_line(
            "Expense to",
            &editor.payer_label(participants),
            editor.field == EditorField::Payer,
            theme,
        ),
    ];

    if editor.is_custom(count) {
        let unit_label = match editor.unit {
            SplitUnit::Percent => "% of cost",
            SplitUnit::Dollar => "$ amounts",
        };
        lines.push(choice_line(
            "Unit",
            unit_label,
            editor.field == EditorField::Unit,
            theme,
        ));

        for (index, participant) in participants.iter().enumerate() {
            let buffer = editor.shares.get(index).map(String::as_str).unwrap_or("");
            lines.push(field_line(
                &participant.name,
                buffer,
                editor.field == EditorField::Share(index),
                theme,
            ));
        }

        lines.push(Line::from(""));
        lines.push(split_status_line(editor, app, theme));
    }

    let title = if editor.item_id.is_some() {
        "Edit Item"
    } else {
        "New Item"
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(theme.accent));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn field_line(label: &str, value: &str, active: bool, theme: &Theme) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!("{label:<12}"),
            Style::default().fg(if active { theme.accent } else { theme.dim }),
        ),
        Span::raw(value.to_string()),
    ];
    if active {
        spans.push(Span::styled("_", Style::default().fg(theme.accent)));
    }
    Line::from(spans)
}

fn choice_line(label: &str, value: &str, active: bool, theme: &Theme) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!("{label:<12}"),
            Style::default().fg(if active { theme.accent } else { theme.dim }),
        ),
        Span::raw(value.to_string()),
    ];
    if active {
        spans.push(Span::styled(
            "  (↑/↓ to change)",
            Style::default().fg(theme.dim),
        ));
    }
    Line::from(spans)
}

/// Live feedback while the user types share values: the same predicate
/// that gates aggregation, re-checked on every keystroke.
fn split_status_line(editor: &ItemEditor, app: &App, theme: &Theme) -> Line<'static> {
    if editor.custom_is_valid(app.session.participants()) {
        return Line::from(Span::styled(
            "Shares balance.",
            Style::default().fg(theme.positive),
        ));
    }

    let target = match editor.unit {
        SplitUnit::Percent => "100%".to_string(),
        SplitUnit::Dollar => usd(input::money_or_zero(&editor.cost)),
    };
    Line::from(Span::styled(
        format!("Shares must sum to {target}; this item is not allocated."),
        Style::default().fg(theme.error),
    ))
}
