//! Detail screen rendering.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use dex_core::config::theme::{parse_color, Theme};
use dex_core::{DetailState, DetailView, EvolutionStage, Item, Stat};

use crate::ui::item_list::category_badges;

const STAT_BAR_WIDTH: usize = 24;
const STAT_MAX: usize = 255;

/// Data needed to render the detail screen.
pub struct DetailProps<'a> {
    pub view: &'a DetailView,
    pub is_favorite: bool,
    pub language: &'a str,
    pub neighbors: (Option<u32>, Option<u32>),
}

pub fn render_detail(f: &mut Frame, area: Rect, props: &DetailProps<'_>, theme: &Theme) {
    let border = Style::default().fg(parse_color(&theme.detail.border_fg));
    let title = format!(" #{:03} ", props.view.id());

    let item = match props.view.state() {
        DetailState::Loaded(item) => item,
        DetailState::Loading(_) => {
            let text = Paragraph::new("Loading...")
                .block(Block::default().borders(Borders::ALL).title(title).border_style(border));
            f.render_widget(text, area);
            return;
        }
        DetailState::Failed { reason, .. } => {
            let lines = failed_lines(reason, theme);
            let text = Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title(title).border_style(border));
            f.render_widget(text, area);
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left = Paragraph::new(profile_lines(item, props, theme))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title).border_style(border));
    f.render_widget(left, chunks[0]);

    let mut right_lines = vec![section("Base stats", theme)];
    right_lines.extend(
        item.stats
            .iter()
            .map(|s| stat_line(s, props.language, theme)),
    );
    right_lines.push(Line::from(format!("{:<10}{:>4}", "Total", item.stat_total())));
    right_lines.push(Line::from(""));
    right_lines.push(section("Evolution", theme));
    right_lines.push(lineage_line(
        &item.evolution,
        props.view.stage_cursor(),
        item.id,
        theme,
    ));
    right_lines.push(Line::from(""));
    right_lines.push(neighbor_line(props.neighbors));

    let right = Paragraph::new(right_lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).border_style(border));
    f.render_widget(right, chunks[1]);
}

fn section(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        title.to_owned(),
        Style::default()
            .fg(parse_color(&theme.detail.label_fg))
            .add_modifier(Modifier::BOLD),
    ))
}

fn profile_lines(item: &Item, props: &DetailProps<'_>, theme: &Theme) -> Vec<Line<'static>> {
    let label = Style::default().fg(parse_color(&theme.detail.label_fg));
    let star = if props.is_favorite { " ★" } else { "" };

    let mut name = vec![Span::styled(
        item.display_name.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if item.display_name != item.name {
        name.push(Span::styled(
            format!(" ({})", item.name),
            Style::default().fg(Color::Gray),
        ));
    }
    name.push(Span::styled(
        star.to_owned(),
        Style::default().fg(parse_color(&theme.list.favorite_fg)),
    ));

    let mut lines = vec![Line::from(name)];
    if !item.genus.is_empty() {
        lines.push(Line::from(Span::styled(
            item.genus.clone(),
            Style::default().fg(Color::Gray),
        )));
    }
    lines.push(Line::from(category_badges(item, props.language, theme)));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Height     ", label),
        Span::raw(format!("{:.1} m", item.height_units())),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Weight     ", label),
        Span::raw(format!("{:.1} kg", item.weight_units())),
    ]));
    if let Some(generation) = item.generation {
        lines.push(Line::from(vec![
            Span::styled("Generation ", label),
            Span::raw(generation.label()),
        ]));
    }
    if !item.abilities.is_empty() {
        let abilities: Vec<String> = item
            .abilities
            .iter()
            .map(|a| {
                if a.hidden {
                    format!("{} (hidden)", a.name)
                } else {
                    a.name.clone()
                }
            })
            .collect();
        lines.push(Line::from(vec![
            Span::styled("Abilities  ", label),
            Span::raw(abilities.join(", ")),
        ]));
    }
    if let Some(url) = &item.image_url {
        lines.push(Line::from(vec![
            Span::styled("Image      ", label),
            Span::styled(url.clone(), Style::default().fg(Color::DarkGray)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(item.description.clone()));
    lines
}

/// Text bar for a base stat, scaled against 255.
pub fn stat_bar(value: u8, width: usize) -> String {
    let filled = (usize::from(value) * width + STAT_MAX / 2) / STAT_MAX;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn stat_line(stat: &Stat, language: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{:<10}{:>4} ", stat.label(language), stat.value)),
        Span::styled(
            stat_bar(stat.value, STAT_BAR_WIDTH),
            Style::default().fg(parse_color(&theme.detail.stat_bar_fg)),
        ),
    ])
}

/// The lineage as `A → B → C`, with the selected stage highlighted and the
/// current item in bold.
pub fn lineage_line(
    stages: &[EvolutionStage],
    cursor: usize,
    current_id: u32,
    theme: &Theme,
) -> Line<'static> {
    if stages.is_empty() {
        return Line::from(Span::styled(
            "No evolution data",
            Style::default().fg(Color::DarkGray),
        ));
    }
    let selected = parse_color(&theme.detail.lineage_selected_fg);
    let mut spans = Vec::with_capacity(stages.len() * 2);
    for (i, stage) in stages.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" → "));
        }
        let mut style = Style::default();
        if i == cursor {
            style = style.fg(selected).add_modifier(Modifier::REVERSED);
        }
        if stage.id == current_id {
            style = style.add_modifier(Modifier::BOLD);
        }
        spans.push(Span::styled(
            format!("#{:03} {}", stage.id, stage.display_name),
            style,
        ));
    }
    Line::from(spans)
}

fn neighbor_line((prev, next): (Option<u32>, Option<u32>)) -> Line<'static> {
    let fmt = |id: Option<u32>| id.map(|i| format!("#{i:03}")).unwrap_or_else(|| "-".to_owned());
    Line::from(Span::styled(
        format!("[ {}   ] {}", fmt(prev), fmt(next)),
        Style::default().fg(Color::DarkGray),
    ))
}

/// Error pane content for a detail that could not be fetched.
fn failed_lines(reason: &str, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "Could not load this entry.",
            Style::default()
                .fg(parse_color(&theme.detail.error_fg))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(reason.to_owned()),
        Line::from(""),
        Line::from(Span::styled(
            "r: retry | Esc: back | ]/[: next/previous entry",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}
