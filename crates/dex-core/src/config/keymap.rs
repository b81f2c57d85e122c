//! Key binding configuration.
//!
//! Key bindings map key names (e.g. `"j"`, `"gg"`, `"Enter"`) to [`Action`]
//! values. The defaults follow vim conventions with arrow-key equivalents.
//!
//! TOML files use string action identifiers (e.g. `"next_page"`); these are
//! resolved to [`Action`] via [`ActionRegistry::find_by_id`] at load time.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionRegistry};
use crate::error::{read_error, CoreError, CoreResult};

/// Raw TOML representation, resolved after deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawKeymap {
    #[serde(default)]
    bindings: HashMap<String, String>,
}

const DEFAULT_BINDINGS: &[(&str, Action)] = &[
    // Navigation
    ("j", Action::CursorDown),
    ("Down", Action::CursorDown),
    ("k", Action::CursorUp),
    ("Up", Action::CursorUp),
    ("gg", Action::CursorTop),
    ("G", Action::CursorBottom),
    ("Enter", Action::Open),
    ("l", Action::Open),
    ("Esc", Action::Back),
    ("h", Action::Back),
    ("Backspace", Action::Back),
    ("]", Action::NextItem),
    ("[", Action::PrevItem),
    // Pages
    ("n", Action::NextPage),
    ("Right", Action::NextPage),
    ("p", Action::PrevPage),
    ("Left", Action::PrevPage),
    ("<", Action::FirstPage),
    (">", Action::LastPage),
    ("s", Action::PageSizeCycle),
    // Search and filters
    ("/", Action::Search),
    ("f", Action::Filter),
    ("x", Action::RemoveFilterTag),
    ("c", Action::ClearFilters),
    // Favorites
    ("Space", Action::ToggleFavorite),
    ("*", Action::ToggleFavorite),
    ("F", Action::ShowFavorites),
    // Misc
    ("r", Action::Reload),
    ("?", Action::Help),
    ("q", Action::Quit),
];

/// Complete set of key bindings.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<String, Action>,
    /// Action → bound keys, for the help overlay.
    reverse: HashMap<Action, Vec<String>>,
}

impl Default for Keymap {
    fn default() -> Self {
        let bindings: HashMap<String, Action> = DEFAULT_BINDINGS
            .iter()
            .map(|(key, action)| ((*key).to_string(), *action))
            .collect();
        let reverse = build_reverse(&bindings);
        Self { bindings, reverse }
    }
}

fn build_reverse(bindings: &HashMap<String, Action>) -> HashMap<Action, Vec<String>> {
    let mut reverse: HashMap<Action, Vec<String>> = HashMap::new();
    for (key, action) in bindings {
        reverse.entry(*action).or_default().push(key.clone());
    }
    // Sort keys for deterministic display
    for keys in reverse.values_mut() {
        keys.sort();
    }
    reverse
}

impl Keymap {
    /// Loads key bindings from a TOML file at `path`.
    ///
    /// The file's bindings are layered over the defaults, so a keymap only
    /// needs to list what it changes. Unknown action ids are skipped with a
    /// warning.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;
        let raw: RawKeymap =
            toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))?;
        Ok(Self::default().with_overrides(raw))
    }

    fn with_overrides(self, raw: RawKeymap) -> Self {
        let registry = ActionRegistry::new();
        let mut bindings = self.bindings;
        for (key, action_id) in raw.bindings {
            match registry.find_by_id(&action_id) {
                Some(action) => {
                    bindings.insert(key, action);
                }
                None => tracing::warn!(key, action_id, "unknown action in keymap"),
            }
        }
        let reverse = build_reverse(&bindings);
        Self { bindings, reverse }
    }

    /// Returns the action mapped to `key`, or `None` if unbound.
    pub fn action_for_key(&self, key: &str) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// Returns the key(s) bound to a given action.
    pub fn keys_for_action(&self, action: Action) -> Option<&[String]> {
        self.reverse.get(&action).map(|v| v.as_slice())
    }

    pub fn bindings(&self) -> &HashMap<String, Action> {
        &self.bindings
    }
}
