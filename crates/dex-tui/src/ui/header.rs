//! Header row: title, screen, load progress and active filter tags.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use dex_core::config::theme::{parse_color, Theme};
use dex_core::LoadStatus;

/// Data needed to render the header.
pub struct HeaderProps<'a> {
    pub screen_title: String,
    pub status: &'a LoadStatus,
    pub loaded: usize,
    pub total: usize,
    /// Labels of the active filter tags, in removal order.
    pub tags: Vec<String>,
}

pub fn render_header(f: &mut Frame, area: Rect, props: &HeaderProps<'_>, theme: &Theme) {
    let mut spans = vec![
        Span::styled(
            " dex ",
            Style::default()
                .fg(parse_color(&theme.header.title_fg))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} ", props.screen_title),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            progress_text(props.status, props.loaded, props.total),
            Style::default().fg(parse_color(&theme.header.progress_fg)),
        ),
    ];
    let tag_style = Style::default().fg(parse_color(&theme.header.tag_fg));
    for tag in &props.tags {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!("[{tag} ×]"), tag_style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Short description of the loader's state.
pub fn progress_text(status: &LoadStatus, loaded: usize, total: usize) -> String {
    match status {
        LoadStatus::LoadingIndex => "loading index...".to_owned(),
        LoadStatus::LoadingDetails => format!("loading {loaded}/{total}"),
        LoadStatus::Complete => format!("{loaded} entries"),
        LoadStatus::Halted => format!("{loaded}/{total} loaded (stopped, r to retry)"),
        LoadStatus::Failed(_) => "offline (r to retry)".to_owned(),
    }
}
