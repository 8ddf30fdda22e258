//! Tab bar widget — one tab per catalog along the top of the screen.

use crate::app::TabState;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Tabs, Widget},
};

/// Renders the 1-line strip of catalog tabs.
///
/// A `●` suffix marks a tab with a fetch in flight; `!` marks one showing
/// an error. Keybinding hints are right-aligned in the same row.
pub struct TabBar<'a> {
    tabs: &'a [TabState],
    active: usize,
    theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    pub fn new(tabs: &'a [TabState], active: usize, theme: &'a Theme) -> Self {
        Self { tabs, active, theme }
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let labels: Vec<Line> = self
            .tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                let marker = match tab.session.as_ref().map(|s| s.state()) {
                    Some(state) if state.error.is_some() => " !",
                    Some(state) if state.loading => " ●",
                    _ => "",
                };
                Line::from(format!(" {}:{}{} ", i + 1, tab.catalog.title(), marker))
            })
            .collect();

        Tabs::new(labels)
            .select(self.active)
            .highlight_style(self.theme.border_focused.add_modifier(Modifier::REVERSED))
            .divider("")
            .render(area, buf);

        let hint = " [ ]:tabs  q:quit  ?:help ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(hint_x, area.y, hint, Style::default().add_modifier(Modifier::DIM));
    }
}
