use engine::Money;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Formats an amount with the currency symbol, e.g. `$12.34`.
#[must_use]
pub fn usd(amount: Money) -> String {
    format!("${amount}")
}

/// Creates a styled span for a money amount.
#[must_use]
pub fn styled_amount(amount: Money, theme: &Theme) -> Span<'static> {
    let color = if amount.is_zero() { theme.dim } else { theme.text };
    Span::styled(usd(amount), Style::default().fg(color))
}

/// Creates a styled span with bold modifier for emphasis (e.g., totals).
#[must_use]
pub fn styled_amount_bold(amount: Money, theme: &Theme) -> Span<'static> {
    Span::styled(
        usd(amount),
        Style::default()
            .fg(theme.text)
            .add_modifier(Modifier::BOLD),
    )
}
