use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dex_core::action::Action;
use dex_core::config::keymap::Keymap;

use crate::app::AppMode;

/// Actions that can result from a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    /// A keymap action, interpreted by the current screen.
    Action(Action),
    /// Quit the application (Ctrl+C).
    Quit,
    /// Append a character to the search query.
    SearchChar(char),
    /// Remove the last character from the search query.
    SearchBackspace,
    /// Keep the typed query and leave search mode.
    SearchConfirm,
    /// Clear the query and leave search mode.
    SearchCancel,
    FilterUp,
    FilterDown,
    /// Jump to the next section of the filter form.
    FilterNextSection,
    FilterToggle,
    FilterChar(char),
    FilterBackspace,
    /// Reset every field of the form.
    FilterClear,
    FilterApply,
    FilterCancel,
    HelpDown,
    HelpUp,
    HelpClose,
    /// No action for this key.
    None,
}

/// Tracks state for multi-key sequences like "gg".
#[derive(Debug, Default)]
pub struct InputState {
    pending_g: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self { pending_g: false }
    }
}

/// Maps a key event to an InputAction based on the current mode.
/// Returns the action and a new InputState (immutable pattern).
///
/// In Normal mode every key is resolved through the `Keymap` by name;
/// Ctrl+C and the `g` prefix are hardcoded. Modal modes are hardcoded.
pub fn handle_key(
    key: KeyEvent,
    mode: &AppMode,
    state: &InputState,
    keymap: &Keymap,
) -> (InputAction, InputState) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return (InputAction::Quit, InputState::new());
    }
    match mode {
        AppMode::Normal => handle_normal_key(key, state, keymap),
        AppMode::Search(_) => handle_search_key(key),
        AppMode::Filter(_) => handle_filter_key(key),
        AppMode::Help { .. } => handle_help_key(key),
    }
}

/// Keymap name of a key code (`"j"`, `"Space"`, `"Enter"`, …).
pub fn key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(' ') => "Space".to_owned(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_owned(),
        KeyCode::Esc => "Esc".to_owned(),
        KeyCode::Backspace => "Backspace".to_owned(),
        KeyCode::Tab => "Tab".to_owned(),
        KeyCode::Up => "Up".to_owned(),
        KeyCode::Down => "Down".to_owned(),
        KeyCode::Left => "Left".to_owned(),
        KeyCode::Right => "Right".to_owned(),
        KeyCode::Home => "Home".to_owned(),
        KeyCode::End => "End".to_owned(),
        KeyCode::PageUp => "PageUp".to_owned(),
        KeyCode::PageDown => "PageDown".to_owned(),
        _ => return None,
    };
    Some(name)
}

fn lookup(keymap: &Keymap, name: &str) -> InputAction {
    keymap
        .action_for_key(name)
        .map_or(InputAction::None, InputAction::Action)
}

fn handle_normal_key(
    key: KeyEvent,
    state: &InputState,
    keymap: &Keymap,
) -> (InputAction, InputState) {
    let new_state = InputState { pending_g: false };

    // Handle "gg" sequence
    if state.pending_g {
        let action = match key.code {
            KeyCode::Char('g') => lookup(keymap, "gg"),
            _ => InputAction::None,
        };
        return (action, new_state);
    }

    if key.code == KeyCode::Char('g') && key.modifiers.is_empty() {
        return (InputAction::None, InputState { pending_g: true });
    }

    let action = match key_name(key.code) {
        Some(name) => lookup(keymap, &name),
        None => InputAction::None,
    };
    (action, new_state)
}

fn handle_search_key(key: KeyEvent) -> (InputAction, InputState) {
    let new_state = InputState::new();
    let action = match key.code {
        KeyCode::Esc => InputAction::SearchCancel,
        KeyCode::Enter => InputAction::SearchConfirm,
        KeyCode::Backspace => InputAction::SearchBackspace,
        KeyCode::Char(c) => InputAction::SearchChar(c),
        _ => InputAction::None,
    };
    (action, new_state)
}

fn handle_filter_key(key: KeyEvent) -> (InputAction, InputState) {
    let new_state = InputState::new();
    let action = match key.code {
        KeyCode::Esc => InputAction::FilterCancel,
        KeyCode::Enter => InputAction::FilterApply,
        KeyCode::Tab => InputAction::FilterNextSection,
        KeyCode::Char('j') | KeyCode::Down => InputAction::FilterDown,
        KeyCode::Char('k') | KeyCode::Up => InputAction::FilterUp,
        KeyCode::Char(' ') => InputAction::FilterToggle,
        KeyCode::Char('c') => InputAction::FilterClear,
        KeyCode::Backspace => InputAction::FilterBackspace,
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => InputAction::FilterChar(c),
        _ => InputAction::None,
    };
    (action, new_state)
}

fn handle_help_key(key: KeyEvent) -> (InputAction, InputState) {
    let new_state = InputState::new();
    let action = match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => InputAction::HelpClose,
        KeyCode::Char('j') | KeyCode::Down => InputAction::HelpDown,
        KeyCode::Char('k') | KeyCode::Up => InputAction::HelpUp,
        _ => InputAction::None,
    };
    (action, new_state)
}
