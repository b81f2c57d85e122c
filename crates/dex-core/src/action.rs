//! Unified action system for dex.
//!
//! Every user-triggerable action is represented by the [`Action`] enum.
//! [`ActionRegistry`] provides metadata (id, name, description, category)
//! used by the keymap loader and the help overlay.

/// Every user-triggerable action in dex.
///
/// Variants carry no parameters. The current screen decides what they do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Navigation
    CursorUp,
    CursorDown,
    CursorTop,
    CursorBottom,
    Open,
    Back,
    // Pages
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    PageSizeCycle,
    // Detail
    NextItem,
    PrevItem,
    // Browse
    Search,
    Filter,
    RemoveFilterTag,
    ClearFilters,
    // Favorites
    ToggleFavorite,
    ShowFavorites,
    // System
    Reload,
    Help,
    Quit,
}

/// Broad category for grouping actions in the help overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    Page,
    Browse,
    Favorites,
    System,
}

impl ActionCategory {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Page => "Pages",
            Self::Browse => "Search & Filter",
            Self::Favorites => "Favorites",
            Self::System => "System",
        }
    }
}

/// Metadata for a single action.
#[derive(Debug, Clone)]
pub struct ActionDescriptor {
    pub action: Action,
    /// Snake-case identifier used in `keymap.toml` (e.g. `"cursor_up"`).
    pub id: &'static str,
    /// Human-readable name (e.g. `"Cursor Up"`).
    pub name: &'static str,
    pub description: &'static str,
    pub category: ActionCategory,
}

const fn descriptor(
    action: Action,
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: ActionCategory,
) -> ActionDescriptor {
    ActionDescriptor {
        action,
        id,
        name,
        description,
        category,
    }
}

/// Registry of all available actions.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    descriptors: Vec<ActionDescriptor>,
}

impl ActionRegistry {
    /// Builds the registry containing every known action, in help order.
    pub fn new() -> Self {
        use Action as A;
        use ActionCategory as C;

        let descriptors = vec![
            descriptor(A::CursorUp, "cursor_up", "Cursor Up", "Move to the previous entry", C::Navigation),
            descriptor(A::CursorDown, "cursor_down", "Cursor Down", "Move to the next entry", C::Navigation),
            descriptor(A::CursorTop, "go_first", "Go to First", "Jump to the first entry on the page", C::Navigation),
            descriptor(A::CursorBottom, "go_last", "Go to Last", "Jump to the last entry on the page", C::Navigation),
            descriptor(A::Open, "open", "Open", "Open the selected entry or evolution stage", C::Navigation),
            descriptor(A::Back, "back", "Back", "Return to the previous screen", C::Navigation),
            descriptor(A::NextItem, "next_item", "Next Entry", "Show the entry with the next number", C::Navigation),
            descriptor(A::PrevItem, "prev_item", "Previous Entry", "Show the entry with the previous number", C::Navigation),
            descriptor(A::NextPage, "next_page", "Next Page", "Go to the next page", C::Page),
            descriptor(A::PrevPage, "prev_page", "Previous Page", "Go to the previous page", C::Page),
            descriptor(A::FirstPage, "first_page", "First Page", "Go to page 1", C::Page),
            descriptor(A::LastPage, "last_page", "Last Page", "Go to the last page", C::Page),
            descriptor(A::PageSizeCycle, "page_size", "Page Size", "Cycle entries per page", C::Page),
            descriptor(A::Search, "search", "Search", "Search by name or number", C::Browse),
            descriptor(A::Filter, "filter", "Filter", "Filter by type, generation, height and weight", C::Browse),
            descriptor(A::RemoveFilterTag, "remove_filter_tag", "Remove Filter", "Drop the last active filter", C::Browse),
            descriptor(A::ClearFilters, "clear_filters", "Clear Filters", "Clear search and every filter", C::Browse),
            descriptor(A::ToggleFavorite, "toggle_favorite", "Toggle Favorite", "Add or remove the entry from favorites", C::Favorites),
            descriptor(A::ShowFavorites, "favorites", "Favorites", "Switch between the catalog and favorites", C::Favorites),
            descriptor(A::Reload, "reload", "Reload", "Fetch the catalog again, or retry the open entry", C::System),
            descriptor(A::Help, "help", "Help", "Show key bindings", C::System),
            descriptor(A::Quit, "quit", "Quit", "Exit dex", C::System),
        ];
        Self { descriptors }
    }

    /// Returns all descriptors.
    pub fn all(&self) -> &[ActionDescriptor] {
        &self.descriptors
    }

    /// Finds an action by its string id (for keymap.toml parsing).
    pub fn find_by_id(&self, id: &str) -> Option<Action> {
        self.descriptors
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.action)
    }

    /// Returns the descriptor for a given action.
    pub fn descriptor_for(&self, action: Action) -> Option<&ActionDescriptor> {
        self.descriptors.iter().find(|d| d.action == action)
    }

    /// Descriptors of one category, in registry order.
    pub fn in_category(&self, category: ActionCategory) -> impl Iterator<Item = &ActionDescriptor> {
        self.descriptors
            .iter()
            .filter(move |d| d.category == category)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
