use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use engine::{Money, RATIO_LABEL};

use crate::{
    app::{App, SummaryMode},
    ui::{components::money::usd, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(area);

    render_per_person(frame, layout[0], app, theme);
    render_running_total(frame, layout[1], app, theme);
}

fn render_per_person(frame: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    let totals = &app.state.totals;
    let mut lines = Vec::new();

    for (index, participant) in app.session.participants().iter().enumerate() {
        lines.push(Line::from(Span::styled(
            participant.name.clone(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(amount_line("Subtotal", totals.subtotals[index], theme));
        lines.push(amount_line("Tax Share", totals.tax_shares[index], theme));
        lines.push(amount_line("Tip Share", totals.tip_shares[index], theme));
        lines.push(Line::from(vec![
            Span::styled("  Total: ", Style::default().fg(theme.dim)),
            Span::styled(
                usd(totals.totals[index]),
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("Tax", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", usd(app.session.tax()))),
        Span::styled("Tip", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", usd(app.session.tip()))),
    ]));

    match app.state.summary.mode {
        SummaryMode::EditTax => lines.push(input_line("Tax amount", app, theme)),
        SummaryMode::EditTip => lines.push(input_line("Tip amount", app, theme)),
        SummaryMode::View => {}
    }

    let block = Block::default().borders(Borders::ALL).title("Summary");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn amount_line(label: &str, amount: Money, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label}: "), Style::default().fg(theme.dim)),
        Span::raw(usd(amount)),
    ])
}

fn input_line(label: &str, app: &App, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(theme.accent)),
        Span::raw(app.state.summary.input.clone()),
        Span::styled("_", Style::default().fg(theme.accent)),
    ])
}

/// The running-total log: one row per priced item, then the Tax and Tip
/// pools when present, then the grand total.
fn render_running_total(frame: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    let participants = app.session.participants();
    let totals = &app.state.totals;
    let mut lines = Vec::new();
    let mut total_cost = Money::ZERO;

    for row in &app.state.rows {
        if row.cost.is_zero() {
            continue;
        }
        total_cost += row.cost;

        let shares = participants
            .iter()
            .zip(&row.shares)
            .map(|(p, share)| format!("{}: {}", p.name, usd(*share)))
            .collect::<Vec<_>>()
            .join("  ");

        let payer_style = if row.valid {
            Style::default().fg(theme.dim)
        } else {
            Style::default().fg(theme.error)
        };
        lines.push(Line::from(vec![
            Span::raw(format!("{:<20}{:>10}  ", row.name, usd(row.cost))),
            Span::styled(format!("{:<14}", row.payer), payer_style),
            Span::raw(shares),
        ]));
    }

    if !app.session.tax().is_zero() {
        lines.push(pool_line("Tax", app.session.tax(), &totals.tax_shares, app, theme));
    }
    if !app.session.tip().is_zero() {
        lines.push(pool_line("Tip", app.session.tip(), &totals.tip_shares, app, theme));
    }

    let grand_shares = participants
        .iter()
        .zip(&totals.totals)
        .map(|(p, total)| format!("{}: {}", p.name, usd(*total)))
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            format!("{:<20}{:>10}  ", "TOTAL", usd(totals.grand_total())),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("{:<14}", "")),
        Span::styled(grand_shares, Style::default().add_modifier(Modifier::BOLD)),
    ]));

    let title = format!("Running Total ({} items, {})", app.state.rows.len(), usd(total_cost));
    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn pool_line(
    label: &str,
    pool: Money,
    shares: &[Money],
    app: &App,
    theme: &Theme,
) -> Line<'static> {
    let breakdown = app
        .session
        .participants()
        .iter()
        .zip(shares)
        .map(|(p, share)| format!("{}: {}", p.name, usd(*share)))
        .collect::<Vec<_>>()
        .join("  ");

    Line::from(vec![
        Span::raw(format!("{label:<20}{:>10}  ", usd(pool))),
        Span::styled(format!("{RATIO_LABEL:<14}"), Style::default().fg(theme.dim)),
        Span::raw(breakdown),
    ])
}
