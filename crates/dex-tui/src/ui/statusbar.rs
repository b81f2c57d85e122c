//! Status bar rendering.
//!
//! The status bar occupies a single row at the bottom of the terminal and
//! shows the page position, the item range, the search query and an optional
//! status message.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use dex_core::config::theme::{parse_color, Theme};

/// Data needed to render the status bar.
pub struct StatusBarProps<'a> {
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    /// Items left after search and filter.
    pub matched: usize,
    /// 1-based first and last item number shown on this page.
    pub range: Option<(usize, usize)>,
    /// Page numbers to display, current one included.
    pub window: &'a [usize],
    pub search: &'a str,
    /// The search being typed, when in search mode.
    pub editing_search: Option<&'a str>,
    pub status_message: Option<&'a str>,
}

/// Renders the bottom status bar.
pub fn render_statusbar(f: &mut Frame, area: Rect, props: &StatusBarProps<'_>, theme: &Theme) {
    let bg = parse_color(&theme.statusbar.bg);
    let fg = parse_color(&theme.statusbar.fg);
    let query_fg = parse_color(&theme.statusbar.query_fg);
    let message_fg = parse_color(&theme.statusbar.message_fg);

    let mut spans = vec![
        Span::styled(
            format!(" {}", page_label(props.page, props.total_pages)),
            Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", window_label(props.window, props.page)),
            Style::default().fg(fg).bg(bg),
        ),
        Span::styled(
            format!("  {}", range_label(props.range, props.matched)),
            Style::default().fg(fg).bg(bg),
        ),
        Span::styled(
            format!("  {}/page", props.page_size),
            Style::default().fg(fg).bg(bg),
        ),
    ];

    if let Some(query) = props.editing_search {
        spans.push(Span::styled(
            format!("  /{query}_"),
            Style::default()
                .fg(query_fg)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
    } else if !props.search.is_empty() {
        spans.push(Span::styled(
            format!("  search: {}", props.search),
            Style::default().fg(query_fg).bg(bg),
        ));
    }

    if let Some(msg) = props.status_message {
        spans.push(Span::styled(
            format!("  {msg}"),
            Style::default()
                .fg(message_fg)
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
        ));
    }

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    f.render_widget(bar, area);
}

fn page_label(page: usize, total_pages: usize) -> String {
    if total_pages == 0 {
        "page -/-".to_owned()
    } else {
        format!("page {page}/{total_pages}")
    }
}

/// `1 [2] 3 4 5`, with the current page bracketed.
fn window_label(window: &[usize], page: usize) -> String {
    window
        .iter()
        .map(|p| {
            if *p == page {
                format!("[{p}]")
            } else {
                p.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn range_label(range: Option<(usize, usize)>, matched: usize) -> String {
    match range {
        Some((first, last)) => format!("{first}-{last} of {matched}"),
        None => "no matches".to_owned(),
    }
}
