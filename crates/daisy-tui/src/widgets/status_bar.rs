//! Status line — the bottom row: the current error, or a short summary of
//! what is on screen.

use daisy_core::controller::{Phase, SearchState};
use ratatui::{buffer::Buffer, layout::Rect, text::{Line, Span}, widgets::Widget};

use crate::theme::Theme;

pub struct StatusBar<'a> {
    state: &'a SearchState,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a SearchState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn summary(&self) -> String {
        let n = self.state.results.len();
        match self.state.phase {
            Phase::Submitting => format!("searching for \"{}\"…", self.state.query.trim()),
            _ if self.state.loading => "loading common plants…".to_string(),
            Phase::Idle => "no plants loaded (r to retry)".to_string(),
            Phase::LocalSuggesting => {
                format!("{} suggestions, Enter to search", self.state.suggestions.len())
            }
            Phase::Loaded => format!("{n} plants"),
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = match &self.state.error {
            Some(err) => Line::from(vec![
                Span::styled(format!(" ✗ {err}"), self.theme.status_error),
                Span::styled("  (x to dismiss)", self.theme.status_idle),
            ]),
            None => Line::from(Span::styled(format!(" {}", self.summary()), self.theme.status_idle)),
        };
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
