use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use dex_core::view::neighbor_ids;
use dex_core::{LoadStatus, Pager, Screen};

use crate::app::{App, AppMode};
use crate::ui::detail::{render_detail, DetailProps};
use crate::ui::filter_form::render_filter_form;
use crate::ui::header::{render_header, HeaderProps};
use crate::ui::help::render_help;
use crate::ui::item_list::{render_item_list, ItemListProps};
use crate::ui::statusbar::{render_statusbar, StatusBarProps};

/// Page numbers shown around the current one in the status bar.
const PAGE_WINDOW: usize = 5;

/// Main render function: header, body, status bar, then any overlay.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    let theme = app.theme();
    let browse = app.browse();
    let filter = browse.filter();
    let (loaded, total) = app.catalog().progress();
    let header = HeaderProps {
        screen_title: app.screen().title(),
        status: app.catalog().status(),
        loaded,
        total,
        tags: filter
            .tags()
            .into_iter()
            .map(|tag| filter.describe(tag, app.language()))
            .collect(),
    };
    render_header(f, chunks[0], &header, theme);

    match (app.screen(), app.detail()) {
        (Screen::Detail(id), Some(view)) => {
            let props = DetailProps {
                view,
                is_favorite: app.favorites().is_favorite(id),
                language: app.language(),
                neighbors: neighbor_ids(id, app.config().api.catalog_size),
            };
            render_detail(f, chunks[1], &props, theme);
        }
        _ => {
            let page = app.page();
            let props = ItemListProps {
                items: &page.items,
                cursor: browse.cursor(),
                favorites: app.favorites(),
                language: app.language(),
                show_primary_name: app.config().ui.show_primary_name,
                title: list_title(app),
                empty_message: empty_message(app),
            };
            render_item_list(f, chunks[1], &props, theme);
        }
    }

    let page = app.page();
    let pager = Pager::new(page.page_size).with_page(page.page);
    let window = pager.page_window(page.total_pages, PAGE_WINDOW);
    let editing_search = match app.mode() {
        AppMode::Search(query) => Some(query.as_str()),
        _ => None,
    };
    let status = StatusBarProps {
        page: page.page,
        total_pages: page.total_pages,
        page_size: page.page_size,
        matched: page.matched,
        range: pager.item_range(page.matched),
        window: &window,
        search: browse.search(),
        editing_search,
        status_message: app.status_message(),
    };
    render_statusbar(f, chunks[2], &status, theme);

    match app.mode() {
        AppMode::Help { scroll } => {
            render_help(f, *scroll, app.action_registry(), app.keymap(), theme);
        }
        AppMode::Filter(form) => render_filter_form(f, form, app.language(), theme),
        AppMode::Normal | AppMode::Search(_) => {}
    }
}

/// Block title of the list body.
fn list_title(app: &App) -> String {
    match app.screen() {
        Screen::Favorites => format!(" Favorites ({}) ", app.favorites().len()),
        Screen::List | Screen::Detail(_) => " Catalog ".to_owned(),
    }
}

/// What an empty list body says, depending on why it is empty.
fn empty_message(app: &App) -> &'static str {
    let browse = app.browse();
    let filtered = !browse.search().is_empty() || !browse.filter().is_empty();
    match (app.screen(), app.catalog().status()) {
        (Screen::Favorites, _) if app.favorites().is_empty() => "No favorites yet (Space to add)",
        (_, LoadStatus::Failed(_)) if app.catalog().items().is_empty() => {
            "Catalog unavailable (r to retry)"
        }
        _ if filtered => "No matches",
        (_, LoadStatus::LoadingIndex | LoadStatus::LoadingDetails) => "Loading...",
        _ => "Nothing here",
    }
}
