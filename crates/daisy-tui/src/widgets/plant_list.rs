//! Plant list widget — the left pane.
//!
//! Shows reference suggestions while the keyboard is open and the loaded
//! plant records otherwise. One cursor is shared by both views and is
//! clamped whenever the underlying list changes length.

use daisy_core::{PlantRecord, ReferenceTerm};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct PlantListState {
    /// Index of the highlighted row.
    pub cursor: usize,
}

impl PlantListState {
    /// Move the cursor within a list of `len` rows.
    pub fn handle(&mut self, event: &AppEvent, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let last = len - 1;
        match event {
            AppEvent::Nav(Direction::Up) => self.cursor = self.cursor.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => self.cursor = (self.cursor + 1).min(last),
            AppEvent::ScrollUp => self.cursor = self.cursor.saturating_sub(PAGE_STEP),
            AppEvent::ScrollDown => self.cursor = (self.cursor + PAGE_STEP).min(last),
            _ => return,
        }
        tracing::debug!(cursor = self.cursor, len, "list: cursor moved");
    }

    /// Keep the cursor inside a list that may have shrunk.
    pub fn clamp(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// What the list is currently showing.
pub enum ListContent<'a> {
    Suggestions(&'a [ReferenceTerm]),
    Results(&'a [PlantRecord]),
}

impl ListContent<'_> {
    pub fn len(&self) -> usize {
        match self {
            ListContent::Suggestions(terms) => terms.len(),
            ListContent::Results(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct PlantList<'a> {
    state: &'a PlantListState,
    content: ListContent<'a>,
    title: &'a str,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> PlantList<'a> {
    pub fn new(
        state: &'a PlantListState,
        content: ListContent<'a>,
        title: &'a str,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, content, title, focused, theme }
    }
}

impl Widget for PlantList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };
        let block = Block::bordered().title(self.title).border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.content.is_empty() {
            let hint = match self.content {
                ListContent::Suggestions(_) => "no matching suggestions, press Enter to search",
                ListContent::Results(_) => "nothing loaded yet",
            };
            Paragraph::new(Line::from(Span::styled(
                hint,
                Style::default().add_modifier(Modifier::DIM),
            )))
            .render(inner, buf);
            return;
        }

        let height = inner.height.max(1) as usize;
        let total = self.content.len();
        let cursor = self.state.cursor.min(total - 1);
        let start = cursor.saturating_sub(height - 1);
        let end = (start + height).min(total);

        let lines: Vec<Line> = (start..end)
            .map(|i| {
                let line = match &self.content {
                    ListContent::Suggestions(terms) => Line::from(Span::styled(
                        terms[i].label.clone(),
                        self.theme.list_suggestion,
                    )),
                    ListContent::Results(records) => Line::from(vec![
                        Span::styled(records[i].name.clone(), self.theme.record_name),
                        Span::raw("  "),
                        Span::styled(
                            records[i].scientific_name.clone(),
                            self.theme.record_scientific_name,
                        ),
                    ]),
                };
                if i == cursor {
                    line.patch_style(self.theme.list_cursor)
                } else {
                    line
                }
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
