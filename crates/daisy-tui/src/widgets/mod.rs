//! Ratatui widgets for the daisy TUI.

pub mod command_bar;
pub mod detail_pane;
pub mod help;
pub mod plant_list;
pub mod query_bar;
pub mod status_bar;
pub mod tab_bar;
