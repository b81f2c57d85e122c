use dex_core::action::{Action, ActionRegistry};
use dex_core::config::keymap::Keymap;
use dex_core::config::settings::Config;
use dex_core::config::theme::Theme;
use dex_core::nav::favorites::FavoritesStore;
use dex_core::nav::history::History;
use dex_core::view::{favorite_items, missing_favorites, neighbor_ids};
use dex_core::{
    BrowseState, Catalog, DetailView, Item, ListQuery, LoadEvent, PageView, ReturnState, Screen,
};

use crate::input::InputAction;
use crate::ui::filter_form::FilterFormState;
use crate::ui::help::help_lines;

/// Application mode, determines how input is routed.
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    /// Typing a search; the string is the query so far.
    Search(String),
    /// Editing the filter form.
    Filter(FilterFormState),
    Help { scroll: usize },
}

/// Background work the main loop must start on the app's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Fetch the whole catalog from scratch.
    LoadCatalog,
    /// Fetch one item with its full detail.
    FetchDetail(u32),
    /// Fetch summaries for ids the catalog does not have yet.
    FetchItems(Vec<u32>),
}

pub struct App {
    mode: AppMode,
    screen: Screen,
    /// Where Back returns to from a detail screen.
    history: History<ReturnState>,
    catalog: Catalog,
    favorites: FavoritesStore,
    /// Browse state of the catalog screen.
    list: BrowseState,
    /// Browse state of the favorites screen.
    favorites_view: BrowseState,
    detail: Option<DetailView>,
    should_quit: bool,
    status_message: Option<String>,
    keymap: Keymap,
    action_registry: ActionRegistry,
    theme: Theme,
    config: Config,
}

impl App {
    /// Creates the app on the catalog screen, positioned by `query`.
    pub fn new(
        config: Config,
        keymap: Keymap,
        theme: Theme,
        favorites: FavoritesStore,
        query: &ListQuery,
    ) -> Self {
        let favorites_view = BrowseState::new(config.ui.page_size);
        Self {
            mode: AppMode::Normal,
            screen: Screen::List,
            history: History::new(),
            catalog: Catalog::new(),
            favorites,
            list: BrowseState::from_query(query),
            favorites_view,
            detail: None,
            should_quit: false,
            status_message: None,
            keymap,
            action_registry: ActionRegistry::new(),
            theme,
            config,
        }
    }

    pub fn mode(&self) -> &AppMode {
        &self.mode
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn action_registry(&self) -> &ActionRegistry {
        &self.action_registry
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn language(&self) -> &str {
        &self.config.api.language
    }

    /// The list screen's position as a shareable query.
    pub fn list_query(&self) -> ListQuery {
        self.list.query()
    }

    /// Browse state of the current (or last) browsing screen.
    pub fn browse(&self) -> &BrowseState {
        match self.screen {
            Screen::Favorites => &self.favorites_view,
            Screen::List | Screen::Detail(_) => &self.list,
        }
    }

    /// The visible page of the current browsing screen.
    pub fn page(&self) -> PageView<'_> {
        match self.screen {
            Screen::Favorites => self
                .favorites_view
                .page_of(favorite_items(&self.catalog, &self.favorites)),
            Screen::List | Screen::Detail(_) => self.list.page_of(self.catalog.items()),
        }
    }

    pub fn selected_item(&self) -> Option<&Item> {
        let page = self.page();
        let last = page.items.len().checked_sub(1)?;
        page.items.get(self.browse().cursor().min(last)).copied()
    }

    // --- builders ---

    pub fn with_mode(self, mode: AppMode) -> Self {
        Self { mode, ..self }
    }

    pub fn with_quit(self) -> Self {
        Self {
            should_quit: true,
            ..self
        }
    }

    pub fn with_status(self, msg: String) -> Self {
        Self {
            status_message: Some(msg),
            ..self
        }
    }

    pub fn with_clear_status(self) -> Self {
        Self {
            status_message: None,
            ..self
        }
    }

    fn with_browse(self, f: impl FnOnce(BrowseState) -> BrowseState) -> Self {
        match self.screen {
            Screen::Favorites => Self {
                favorites_view: f(self.favorites_view),
                ..self
            },
            Screen::List | Screen::Detail(_) => Self {
                list: f(self.list),
                ..self
            },
        }
    }

    fn clamp_cursor(self) -> Self {
        let len = self.page().items.len();
        let cursor = self.browse().cursor().min(len.saturating_sub(1));
        self.with_browse(|b| b.with_cursor(cursor))
    }

    // --- background results ---

    /// Applies one catalog loader event.
    pub fn apply_load_event(mut self, event: LoadEvent) -> Self {
        let message = match &event {
            LoadEvent::IndexFailed(reason) => Some(format!("Could not load the catalog: {reason}")),
            LoadEvent::BatchFailed { start, end, reason } => Some(format!(
                "Loading stopped at entries {}-{end}: {reason}",
                start + 1
            )),
            _ => None,
        };
        self.catalog.apply(event);
        let app = self.clamp_cursor();
        match message {
            Some(msg) => app.with_status(msg),
            None => app,
        }
    }

    /// Applies a detail fetch result. Results for an item no longer shown
    /// are dropped.
    pub fn apply_detail(self, id: u32, result: Result<Item, String>) -> Self {
        let detail = self.detail.map(|view| view.accept(id, result));
        Self { detail, ..self }
    }

    /// Merges summaries fetched for the favorites screen.
    pub fn apply_fetched_items(mut self, result: Result<Vec<Item>, String>) -> Self {
        match result {
            Ok(items) => {
                self.catalog.merge_items(items);
                self
            }
            Err(reason) => self.with_status(format!("Could not load favorites: {reason}")),
        }
    }

    // --- input ---

    /// Applies one input action and returns any background work to start.
    pub fn dispatch(self, input: InputAction) -> (Self, Option<Request>) {
        match input {
            InputAction::Action(action) => self.with_clear_status().handle_action(action),
            InputAction::Quit => (self.with_quit(), None),
            InputAction::SearchChar(c) => (self.edit_search(|q| q.push(c)), None),
            InputAction::SearchBackspace => (
                self.edit_search(|q| {
                    q.pop();
                }),
                None,
            ),
            InputAction::SearchConfirm => (self.with_mode(AppMode::Normal), None),
            InputAction::SearchCancel => (
                self.with_mode(AppMode::Normal)
                    .with_browse(|b| b.with_search(String::new())),
                None,
            ),
            InputAction::FilterUp => (self.with_filter_form(FilterFormState::with_cursor_up), None),
            InputAction::FilterDown => {
                (self.with_filter_form(FilterFormState::with_cursor_down), None)
            }
            InputAction::FilterNextSection => {
                (self.with_filter_form(FilterFormState::with_next_section), None)
            }
            InputAction::FilterToggle => (self.with_filter_form(FilterFormState::with_toggle), None),
            InputAction::FilterChar(c) => (self.with_filter_form(|f| f.with_char(c)), None),
            InputAction::FilterBackspace => {
                (self.with_filter_form(FilterFormState::with_backspace), None)
            }
            InputAction::FilterClear => (self.with_filter_form(FilterFormState::cleared), None),
            InputAction::FilterApply => (self.filter_apply(), None),
            InputAction::FilterCancel => (self.with_mode(AppMode::Normal), None),
            InputAction::HelpDown => (self.scroll_help(1), None),
            InputAction::HelpUp => (self.scroll_help(-1), None),
            InputAction::HelpClose => (self.with_mode(AppMode::Normal), None),
            InputAction::None => (self, None),
        }
    }

    fn handle_action(self, action: Action) -> (Self, Option<Request>) {
        match (self.screen, action) {
            (_, Action::Quit) => (self.with_quit(), None),
            (_, Action::Help) => (self.with_mode(AppMode::Help { scroll: 0 }), None),
            (Screen::Detail(id), Action::Reload) => self.show_detail(id),
            (_, Action::Reload) => self.reload(),
            (_, Action::ShowFavorites) => self.toggle_favorites_screen(),
            (_, Action::ToggleFavorite) => (self.toggle_favorite(), None),
            (Screen::Detail(id), action) => self.handle_detail_action(id, action),
            (Screen::List | Screen::Favorites, action) => self.handle_browse_action(action),
        }
    }

    fn handle_browse_action(self, action: Action) -> (Self, Option<Request>) {
        let len = self.page().items.len();
        let matched = self.page().matched;
        let cursor = self.browse().cursor();
        let app = match action {
            Action::CursorUp => self.with_browse(|b| b.with_cursor(cursor.saturating_sub(1))),
            Action::CursorDown => {
                self.with_browse(|b| b.with_cursor((cursor + 1).min(len.saturating_sub(1))))
            }
            Action::CursorTop => self.with_browse(|b| b.with_cursor(0)),
            Action::CursorBottom => self.with_browse(|b| b.with_cursor(len.saturating_sub(1))),
            Action::Open => {
                return match self.selected_item().map(|item| item.id) {
                    Some(id) => self.open_detail(id),
                    None => (self, None),
                };
            }
            Action::Back => match self.screen {
                Screen::Favorites => Self {
                    screen: Screen::List,
                    ..self
                },
                _ => self,
            },
            Action::NextPage => self.with_pager(|p| p.next(matched)),
            Action::PrevPage => self.with_pager(|p| p.prev(matched)),
            Action::FirstPage => self.with_pager(|p| p.first()),
            Action::LastPage => self.with_pager(|p| p.last(matched)),
            Action::PageSizeCycle => {
                let size = self.config.ui.next_page_size(self.browse().pager().page_size());
                self.with_browse(|b| b.with_page_size(size))
                    .with_status(format!("{size} per page"))
            }
            Action::Search => {
                let query = self.browse().search().to_owned();
                self.with_mode(AppMode::Search(query))
            }
            Action::Filter => {
                let form = FilterFormState::from_conditions(self.browse().filter());
                self.with_mode(AppMode::Filter(form))
            }
            Action::RemoveFilterTag => match self.browse().filter().tags().last().copied() {
                Some(tag) => {
                    let filter = self.browse().filter().clone().without_tag(tag);
                    self.with_browse(|b| b.with_filter(filter))
                }
                None => self,
            },
            Action::ClearFilters => self.with_browse(BrowseState::cleared),
            Action::NextItem | Action::PrevItem => self,
            Action::Quit
            | Action::Help
            | Action::Reload
            | Action::ShowFavorites
            | Action::ToggleFavorite => self,
        };
        (app, None)
    }

    fn handle_detail_action(self, id: u32, action: Action) -> (Self, Option<Request>) {
        let map_detail = |app: Self, f: fn(DetailView) -> DetailView| Self {
            detail: app.detail.map(f),
            ..app
        };
        match action {
            Action::CursorDown | Action::NextPage => (map_detail(self, DetailView::next_stage), None),
            Action::CursorUp | Action::PrevPage => (map_detail(self, DetailView::prev_stage), None),
            Action::Open => {
                let stage = self
                    .detail
                    .as_ref()
                    .and_then(|d| d.selected_stage())
                    .map(|s| s.id);
                match stage {
                    Some(stage_id) if stage_id != id => self.show_detail(stage_id),
                    _ => (self, None),
                }
            }
            Action::Back => (self.go_back(), None),
            Action::NextItem | Action::PrevItem => {
                let (prev, next) = neighbor_ids(id, self.config.api.catalog_size);
                let target = if action == Action::NextItem { next } else { prev };
                match target {
                    Some(target) => self.show_detail(target),
                    None => (self, None),
                }
            }
            _ => (self, None),
        }
    }

    fn with_pager(
        self,
        f: impl FnOnce(dex_core::Pager) -> dex_core::Pager,
    ) -> Self {
        let matched = self.page().matched;
        let pager = f(self.browse().pager().clamped(matched));
        self.with_browse(|b| b.with_pager(pager))
    }

    /// Opens the detail screen for `id`, remembering the current screen.
    fn open_detail(self, id: u32) -> (Self, Option<Request>) {
        let back = ReturnState::new(self.screen, self.browse().clone());
        let app = Self {
            history: self.history.push(back),
            ..self
        };
        app.show_detail(id)
    }

    /// Replaces the shown detail without touching the history.
    fn show_detail(self, id: u32) -> (Self, Option<Request>) {
        tracing::debug!(id, "opening detail");
        let app = Self {
            screen: Screen::Detail(id),
            detail: Some(DetailView::loading(id)),
            ..self
        };
        (app, Some(Request::FetchDetail(id)))
    }

    /// Returns to the screen saved by [`Self::open_detail`], exactly as it was.
    fn go_back(self) -> Self {
        let Some((history, back)) = self.history.go_back() else {
            return Self {
                screen: Screen::List,
                detail: None,
                ..self
            };
        };
        let app = Self {
            history,
            screen: back.screen,
            detail: None,
            ..self
        };
        match back.screen {
            Screen::Favorites => Self {
                favorites_view: back.browse,
                ..app
            },
            Screen::List | Screen::Detail(_) => Self {
                list: back.browse,
                ..app
            },
        }
    }

    fn toggle_favorites_screen(self) -> (Self, Option<Request>) {
        if self.screen == Screen::Favorites {
            return (
                Self {
                    screen: Screen::List,
                    ..self
                },
                None,
            );
        }
        let app = Self {
            screen: Screen::Favorites,
            history: History::new(),
            detail: None,
            ..self
        }
        .clamp_cursor();
        let missing = missing_favorites(&app.catalog, &app.favorites);
        if missing.is_empty() {
            return (app, None);
        }
        let count = missing.len();
        (
            app.with_status(format!("Loading {count} favorites...")),
            Some(Request::FetchItems(missing)),
        )
    }

    fn toggle_favorite(mut self) -> Self {
        let id = match self.screen {
            Screen::Detail(id) => Some(id),
            Screen::List | Screen::Favorites => self.selected_item().map(|item| item.id),
        };
        let Some(id) = id else {
            return self;
        };
        let msg = match self.favorites.toggle(id) {
            Ok(true) => format!("#{id:03} added to favorites"),
            Ok(false) => format!("#{id:03} removed from favorites"),
            Err(e) => {
                tracing::error!(id, error = %e, "saving favorites failed");
                format!("Could not save favorites: {e}")
            }
        };
        self.clamp_cursor().with_status(msg)
    }

    fn reload(mut self) -> (Self, Option<Request>) {
        if self.catalog.is_loading() {
            return (self.with_status("Already loading".to_owned()), None);
        }
        tracing::info!("reloading catalog");
        self.catalog.reset();
        (
            self.with_status("Reloading...".to_owned()),
            Some(Request::LoadCatalog),
        )
    }

    fn edit_search(self, f: impl FnOnce(&mut String)) -> Self {
        let AppMode::Search(query) = &self.mode else {
            return self;
        };
        let mut query = query.clone();
        f(&mut query);
        let search = query.clone();
        self.with_mode(AppMode::Search(query))
            .with_browse(|b| b.with_search(search))
    }

    fn with_filter_form(mut self, f: impl FnOnce(FilterFormState) -> FilterFormState) -> Self {
        self.mode = match std::mem::replace(&mut self.mode, AppMode::Normal) {
            AppMode::Filter(form) => AppMode::Filter(f(form)),
            other => other,
        };
        self
    }

    fn filter_apply(self) -> Self {
        let result = match &self.mode {
            AppMode::Filter(form) => form.to_conditions(),
            _ => return self,
        };
        match result {
            Ok(filter) => self
                .with_mode(AppMode::Normal)
                .with_browse(|b| b.with_filter(filter)),
            Err(e) => self.with_filter_form(|f| f.with_error(e)),
        }
    }

    fn scroll_help(self, delta: isize) -> Self {
        let AppMode::Help { scroll } = self.mode else {
            return self;
        };
        let max = help_lines(&self.action_registry, &self.keymap)
            .len()
            .saturating_sub(1);
        let scroll = scroll.saturating_add_signed(delta).min(max);
        self.with_mode(AppMode::Help { scroll })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dex_core::nav::filter::FilterConditions;
    use dex_core::{Category, IndexEntry, LoadStatus};
    use tempfile::TempDir;

    fn item(id: u32) -> Item {
        let category = if id % 2 == 0 {
            Category::Water
        } else {
            Category::Fire
        };
        Item::new(id, format!("mon-{id}"), vec![category]).with_display_name(format!("モン{id}"))
    }

    fn index(n: u32) -> Vec<IndexEntry> {
        (1..=n)
            .map(|id| IndexEntry {
                name: format!("mon-{id}"),
                detail_url: format!("https://dex.test/api/v2/pokemon/{id}/"),
            })
            .collect()
    }

    fn app_with(n: u32) -> App {
        let config = Config::default();
        let app = App::new(
            config,
            Keymap::default(),
            Theme::default(),
            FavoritesStore::ephemeral(),
            &ListQuery::default(),
        );
        app.apply_load_event(LoadEvent::IndexLoaded(index(n)))
            .apply_load_event(LoadEvent::BatchLoaded {
                start: 0,
                items: (1..=n).map(item).collect(),
            })
            .apply_load_event(LoadEvent::Finished)
    }

    fn act(app: App, action: Action) -> (App, Option<Request>) {
        app.dispatch(InputAction::Action(action))
    }

    fn run(app: App, actions: &[Action]) -> App {
        actions.iter().fold(app, |app, a| act(app, *a).0)
    }

    fn page_ids(app: &App) -> Vec<u32> {
        app.page().items.iter().map(|i| i.id).collect()
    }

    // --- creation ---

    #[test]
    fn new_app_starts_on_list() {
        let app = App::new(
            Config::default(),
            Keymap::default(),
            Theme::default(),
            FavoritesStore::ephemeral(),
            &ListQuery::parse("page=3&items=50&search=pika").unwrap(),
        );
        assert_eq!(app.screen(), Screen::List);
        assert_eq!(app.mode(), &AppMode::Normal);
        assert_eq!(app.catalog().status(), &LoadStatus::LoadingIndex);
        assert_eq!(app.browse().pager().page(), 3);
        assert_eq!(app.browse().search(), "pika");
        assert_eq!(app.list_query().to_query_string(), "page=3&items=50&search=pika");
    }

    // --- load events ---

    #[test]
    fn load_events_fill_the_page() {
        let app = app_with(45);
        assert_eq!(app.catalog().status(), &LoadStatus::Complete);
        assert_eq!(page_ids(&app), (1..=20).collect::<Vec<_>>());
        assert_eq!(app.page().total_pages, 3);
    }

    #[test]
    fn index_failure_sets_status() {
        let app = App::new(
            Config::default(),
            Keymap::default(),
            Theme::default(),
            FavoritesStore::ephemeral(),
            &ListQuery::default(),
        )
        .apply_load_event(LoadEvent::IndexFailed("HTTP 500".into()));
        assert!(app.status_message().unwrap().contains("HTTP 500"));
        assert!(page_ids(&app).is_empty());
    }

    #[test]
    fn batch_failure_keeps_loaded_items() {
        let app = App::new(
            Config::default(),
            Keymap::default(),
            Theme::default(),
            FavoritesStore::ephemeral(),
            &ListQuery::default(),
        )
        .apply_load_event(LoadEvent::IndexLoaded(index(30)))
        .apply_load_event(LoadEvent::BatchLoaded {
            start: 0,
            items: (1..=10).map(item).collect(),
        })
        .apply_load_event(LoadEvent::BatchFailed {
            start: 10,
            end: 20,
            reason: "down".into(),
        });
        assert_eq!(app.catalog().status(), &LoadStatus::Halted);
        assert_eq!(page_ids(&app).len(), 10);
        assert_eq!(
            app.status_message(),
            Some("Loading stopped at entries 11-20: down")
        );
    }

    // --- cursor and pages ---

    #[test]
    fn cursor_is_clamped_to_page() {
        let app = run(app_with(3), &[Action::CursorDown; 5]);
        assert_eq!(app.browse().cursor(), 2);
        let app = run(app, &[Action::CursorUp; 5]);
        assert_eq!(app.browse().cursor(), 0);
        let app = run(app, &[Action::CursorBottom]);
        assert_eq!(app.selected_item().map(|i| i.id), Some(3));
    }

    #[test]
    fn paging_moves_and_resets_cursor() {
        let app = run(app_with(45), &[Action::CursorDown, Action::NextPage]);
        assert_eq!(app.browse().pager().page(), 2);
        assert_eq!(app.browse().cursor(), 0);
        assert_eq!(page_ids(&app)[0], 21);

        let app = run(app, &[Action::LastPage, Action::NextPage]);
        assert_eq!(app.browse().pager().page(), 3);
        assert_eq!(page_ids(&app), (41..=45).collect::<Vec<_>>());

        let app = run(app, &[Action::FirstPage, Action::PrevPage]);
        assert_eq!(app.browse().pager().page(), 1);
    }

    #[test]
    fn page_size_cycles_and_resets_page() {
        let app = run(app_with(120), &[Action::NextPage, Action::PageSizeCycle]);
        assert_eq!(app.browse().pager().page_size(), 50);
        assert_eq!(app.browse().pager().page(), 1);
        assert_eq!(app.page().total_pages, 3);
    }

    // --- search ---

    #[test]
    fn search_filters_live_and_cancel_clears() {
        let app = run(app_with(45), &[Action::NextPage, Action::Search]);
        assert_eq!(app.mode(), &AppMode::Search(String::new()));

        let (app, _) = app.dispatch(InputAction::SearchChar('4'));
        let (app, _) = app.dispatch(InputAction::SearchChar('2'));
        assert_eq!(page_ids(&app), vec![42]);
        assert_eq!(app.browse().pager().page(), 1);

        let (app, _) = app.dispatch(InputAction::SearchBackspace);
        assert_eq!(app.browse().search(), "4");

        let (app, _) = app.dispatch(InputAction::SearchCancel);
        assert_eq!(app.mode(), &AppMode::Normal);
        assert_eq!(app.browse().search(), "");
    }

    #[test]
    fn search_confirm_keeps_query() {
        let app = run(app_with(10), &[Action::Search]);
        let (app, _) = app.dispatch(InputAction::SearchChar('モ'));
        let (app, _) = app.dispatch(InputAction::SearchConfirm);
        assert_eq!(app.mode(), &AppMode::Normal);
        assert_eq!(app.browse().search(), "モ");
    }

    // --- filter ---

    #[test]
    fn filter_form_applies_conditions() {
        let app = run(app_with(10), &[Action::Filter]);
        // First row of the form is the first category.
        let first = Category::ALL[0];
        let (app, _) = app.dispatch(InputAction::FilterToggle);
        let (app, _) = app.dispatch(InputAction::FilterApply);
        assert_eq!(app.mode(), &AppMode::Normal);
        assert_eq!(app.browse().filter().categories, vec![first]);
    }

    #[test]
    fn invalid_filter_form_stays_open() {
        let mut app = run(app_with(10), &[Action::Filter]);
        for _ in 0..3 {
            app = app.dispatch(InputAction::FilterNextSection).0;
            if matches!(app.mode(), AppMode::Filter(f) if f.focused() == crate::ui::filter_form::FilterField::HeightMin) {
                break;
            }
        }
        let (app, _) = app.dispatch(InputAction::FilterChar('.'));
        let (app, _) = app.dispatch(InputAction::FilterChar('.'));
        let (app, _) = app.dispatch(InputAction::FilterApply);
        match app.mode() {
            AppMode::Filter(form) => assert!(form.error().is_some()),
            other => panic!("expected filter mode, got {other:?}"),
        }
        assert!(app.browse().filter().is_empty());
    }

    #[test]
    fn remove_tag_and_clear_filters() {
        let app = app_with(10);
        let filter = FilterConditions::new().with_categories([Category::Fire, Category::Water]);
        let app = app.with_browse(|b| b.with_filter(filter).with_search("mon"));

        let app = run(app, &[Action::RemoveFilterTag]);
        assert_eq!(app.browse().filter().categories, vec![Category::Fire]);

        let app = run(app, &[Action::ClearFilters]);
        assert!(app.browse().filter().is_empty());
        assert_eq!(app.browse().search(), "");
    }

    // --- detail ---

    #[test]
    fn open_and_back_restore_list_state() {
        let app = app_with(45);
        let app = app.with_browse(|b| b.with_search("mon"));
        let app = run(app, &[Action::NextPage, Action::CursorDown, Action::CursorDown]);
        let before = app.browse().clone();

        let (app, request) = act(app, Action::Open);
        assert_eq!(app.screen(), Screen::Detail(23));
        assert_eq!(request, Some(Request::FetchDetail(23)));

        let app = run(app, &[Action::Back]);
        assert_eq!(app.screen(), Screen::List);
        assert_eq!(app.browse(), &before);
        assert!(app.detail().is_none());
    }

    #[test]
    fn detail_result_and_stale_result() {
        let (app, _) = act(app_with(5), Action::Open);
        let app = app.apply_detail(9, Ok(item(9)));
        assert!(app.detail().unwrap().item().is_none());
        let app = app.apply_detail(1, Ok(item(1)));
        assert_eq!(app.detail().unwrap().item().map(|i| i.id), Some(1));
    }

    #[test]
    fn reload_on_failed_detail_refetches_only_that_entry() {
        let (app, _) = act(app_with(5), Action::Open);
        let app = app.apply_detail(1, Err("HTTP 500".into()));
        assert!(matches!(
            app.detail().unwrap().state(),
            dex_core::DetailState::Failed { id: 1, .. }
        ));

        let (app, request) = act(app, Action::Reload);
        assert_eq!(request, Some(Request::FetchDetail(1)));
        assert_eq!(app.detail().unwrap().state(), &dex_core::DetailState::Loading(1));
        assert_eq!(app.catalog().items().len(), 5);

        let app = app.apply_detail(1, Ok(item(1)));
        assert_eq!(app.detail().unwrap().item().map(|i| i.id), Some(1));
        let app = run(app, &[Action::Back]);
        assert_eq!(app.screen(), Screen::List);
    }

    #[test]
    fn neighbor_moves_stop_at_first_entry() {
        let (app, _) = act(app_with(5), Action::Open);
        let (app, request) = act(app, Action::PrevItem);
        assert_eq!(request, None);
        assert_eq!(app.screen(), Screen::Detail(1));

        let (app, request) = act(app, Action::NextItem);
        assert_eq!(request, Some(Request::FetchDetail(2)));
        // Neighbor moves do not grow the history.
        let app = run(app, &[Action::Back]);
        assert_eq!(app.screen(), Screen::List);
    }

    #[test]
    fn open_selected_lineage_stage() {
        let (app, _) = act(app_with(5), Action::Open);
        let mut detailed = item(1);
        detailed.evolution = (1..=3)
            .map(|id| dex_core::EvolutionStage {
                id,
                name: format!("mon-{id}"),
                display_name: format!("モン{id}"),
            })
            .collect();
        let app = app.apply_detail(1, Ok(detailed));

        let (app, request) = act(app, Action::Open);
        assert_eq!(request, None);
        let (app, _) = act(app, Action::CursorDown);
        let (app, request) = act(app, Action::Open);
        assert_eq!(request, Some(Request::FetchDetail(2)));
        assert_eq!(app.screen(), Screen::Detail(2));
    }

    // --- favorites ---

    #[test]
    fn toggle_favorite_persists_and_lists_in_order() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("favorites.json");
        let app = App::new(
            Config::default(),
            Keymap::default(),
            Theme::default(),
            FavoritesStore::open(&path),
            &ListQuery::default(),
        )
        .apply_load_event(LoadEvent::IndexLoaded(index(10)))
        .apply_load_event(LoadEvent::BatchLoaded {
            start: 0,
            items: (1..=10).map(item).collect(),
        });

        let app = run(
            app,
            &[
                Action::CursorDown,
                Action::CursorDown,
                Action::ToggleFavorite,
                Action::CursorUp,
                Action::ToggleFavorite,
            ],
        );
        assert_eq!(app.favorites().ids(), &[3, 2]);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[3,2]");

        let (app, request) = act(app, Action::ShowFavorites);
        assert_eq!(request, None);
        assert_eq!(app.screen(), Screen::Favorites);
        assert_eq!(page_ids(&app), vec![3, 2]);

        let app = run(app, &[Action::CursorDown, Action::ToggleFavorite]);
        assert_eq!(page_ids(&app), vec![3]);
        assert_eq!(app.browse().cursor(), 0);
    }

    #[test]
    fn favorites_screen_requests_missing_items() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("favorites.json");
        std::fs::write(&path, "[7,500]").unwrap();
        let app = App::new(
            Config::default(),
            Keymap::default(),
            Theme::default(),
            FavoritesStore::open(&path),
            &ListQuery::default(),
        );

        let (app, request) = act(app, Action::ShowFavorites);
        assert_eq!(request, Some(Request::FetchItems(vec![7, 500])));

        let app = app.apply_fetched_items(Ok(vec![item(500), item(7)]));
        assert_eq!(page_ids(&app), vec![7, 500]);

        let (app, _) = act(app, Action::ShowFavorites);
        assert_eq!(app.screen(), Screen::List);
    }

    #[test]
    fn favorite_from_detail_and_back_to_favorites() {
        let (app, _) = act(app_with(5), Action::ShowFavorites);
        let (app, _) = act(app, Action::ShowFavorites);
        let (app, _) = act(app, Action::Open);
        let (app, _) = act(app, Action::ToggleFavorite);
        assert!(app.favorites().is_favorite(1));

        let (app, _) = act(app, Action::ShowFavorites);
        let (app, request) = act(app, Action::Open);
        assert_eq!(request, Some(Request::FetchDetail(1)));
        let app = run(app, &[Action::Back]);
        assert_eq!(app.screen(), Screen::Favorites);
    }

    // --- misc ---

    #[test]
    fn reload_only_when_idle() {
        let loading = App::new(
            Config::default(),
            Keymap::default(),
            Theme::default(),
            FavoritesStore::ephemeral(),
            &ListQuery::default(),
        );
        let (_, request) = act(loading, Action::Reload);
        assert_eq!(request, None);

        let (app, request) = act(app_with(5), Action::Reload);
        assert_eq!(request, Some(Request::LoadCatalog));
        assert!(app.catalog().items().is_empty());
        assert!(app.catalog().is_loading());
    }

    #[test]
    fn help_opens_scrolls_and_closes() {
        let (app, _) = act(app_with(1), Action::Help);
        let (app, _) = app.dispatch(InputAction::HelpUp);
        assert_eq!(app.mode(), &AppMode::Help { scroll: 0 });
        let (app, _) = app.dispatch(InputAction::HelpDown);
        assert_eq!(app.mode(), &AppMode::Help { scroll: 1 });
        let (app, _) = app.dispatch(InputAction::HelpClose);
        assert_eq!(app.mode(), &AppMode::Normal);
    }

    #[test]
    fn quit_sets_flag() {
        let (app, _) = act(app_with(1), Action::Quit);
        assert!(app.should_quit());
        let (app, _) = app_with(1).dispatch(InputAction::Quit);
        assert!(app.should_quit());
    }
}
