//! Key binding overlay, generated from the action registry and the keymap.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};
use dex_core::action::{ActionCategory, ActionDescriptor, ActionRegistry};
use dex_core::config::keymap::Keymap;
use dex_core::config::theme::Theme;

use crate::ui::popup::{centered_rect, render_popup_lines};

const CATEGORIES: [ActionCategory; 5] = [
    ActionCategory::Navigation,
    ActionCategory::Page,
    ActionCategory::Browse,
    ActionCategory::Favorites,
    ActionCategory::System,
];

/// Builds the help text: one block per category, one line per action.
pub fn help_lines(registry: &ActionRegistry, keymap: &Keymap) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for category in CATEGORIES {
        lines.push(Line::from(Span::styled(
            category.label().to_owned(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        lines.extend(registry.in_category(category).map(|d| action_line(d, keymap)));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Ctrl+c quits from anywhere. Esc or ? closes this help.",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn action_line(desc: &ActionDescriptor, keymap: &Keymap) -> Line<'static> {
    let keys = keymap
        .keys_for_action(desc.action)
        .map(|keys| keys.join(" "))
        .unwrap_or_else(|| "-".to_owned());
    Line::from(vec![
        Span::styled(format!("  {keys:<14}"), Style::default().fg(Color::Yellow)),
        Span::raw(desc.description.to_owned()),
    ])
}

/// Renders the help overlay scrolled by `scroll` lines.
pub fn render_help(
    f: &mut Frame,
    scroll: usize,
    registry: &ActionRegistry,
    keymap: &Keymap,
    theme: &Theme,
) {
    let area = centered_rect(60, 70, f.area());
    let lines = help_lines(registry, keymap);
    let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);
    render_popup_lines(f, area, "Help", lines, scroll, theme);
}
