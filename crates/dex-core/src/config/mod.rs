//! Configuration management for dex.
//!
//! Settings ([`settings::Config`]), key bindings ([`keymap::Keymap`]) and
//! colors ([`theme::Theme`]) are stored as TOML files and loaded at startup.
//! Each falls back to built-in defaults when its file is absent.

pub mod keymap;
pub mod settings;
pub mod theme;
