//! Item list rendering for the catalog and favorites screens.
//!
//! Each row shows the favorite marker, the catalog number, the localized
//! name, optionally the primary name, and one colored badge per category.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use dex_core::config::theme::{parse_color, Theme};
use dex_core::nav::favorites::FavoritesStore;
use dex_core::Item;

/// Data needed to render one page of items.
pub struct ItemListProps<'a> {
    pub items: &'a [&'a Item],
    pub cursor: usize,
    pub favorites: &'a FavoritesStore,
    pub language: &'a str,
    pub show_primary_name: bool,
    pub title: String,
    /// Shown instead of the list when `items` is empty.
    pub empty_message: &'a str,
}

/// Renders the list with the row at `cursor` highlighted.
pub fn render_item_list(f: &mut Frame, area: Rect, props: &ItemListProps<'_>, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(props.title.clone())
        .border_style(Style::default().fg(Color::DarkGray));

    if props.items.is_empty() {
        let text = Paragraph::new(Line::from(Span::styled(
            props.empty_message.to_owned(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )))
        .block(block);
        f.render_widget(text, area);
        return;
    }

    let rows: Vec<ListItem> = props
        .items
        .iter()
        .map(|item| {
            ListItem::new(item_line(
                item,
                props.favorites.is_favorite(item.id),
                props.show_primary_name,
                props.language,
                theme,
            ))
        })
        .collect();

    let list = List::new(rows)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(parse_color(&theme.list.selected_bg))
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(props.cursor.min(props.items.len() - 1)));

    f.render_stateful_widget(list, area, &mut state);
}

/// Builds the display line for a single item.
pub fn item_line(
    item: &Item,
    is_favorite: bool,
    show_primary_name: bool,
    language: &str,
    theme: &Theme,
) -> Line<'static> {
    let star = if is_favorite { "★ " } else { "  " };
    let mut spans = vec![
        Span::styled(
            star.to_owned(),
            Style::default().fg(parse_color(&theme.list.favorite_fg)),
        ),
        Span::styled(
            format!("#{} ", item.number()),
            Style::default().fg(parse_color(&theme.list.number_fg)),
        ),
        Span::styled(
            item.display_name.clone(),
            Style::default().fg(parse_color(&theme.list.name_fg)),
        ),
    ];
    if show_primary_name && item.display_name != item.name {
        spans.push(Span::styled(
            format!(" ({})", item.name),
            Style::default().fg(parse_color(&theme.list.secondary_fg)),
        ));
    }
    spans.push(Span::raw("  "));
    spans.extend(category_badges(item, language, theme));
    Line::from(spans)
}

/// One colored badge per category, in the item's order.
pub fn category_badges(item: &Item, language: &str, theme: &Theme) -> Vec<Span<'static>> {
    item.categories
        .iter()
        .map(|c| {
            Span::styled(
                format!(" {} ", c.label_for(language)),
                Style::default()
                    .fg(Color::Black)
                    .bg(theme.category_color(*c)),
            )
        })
        .collect()
}
