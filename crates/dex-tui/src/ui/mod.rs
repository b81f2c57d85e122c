//! UI widget modules for the TUI frontend.
//!
//! Each sub-module renders a single UI component using ratatui.

pub mod detail;
pub mod filter_form;
pub mod header;
pub mod help;
pub mod item_list;
pub mod popup;
pub mod statusbar;
