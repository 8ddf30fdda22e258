//! Detail pane — the full text of the highlighted plant record.

use daisy_core::{Catalog, PlantRecord};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;

#[derive(Debug, Default)]
pub struct DetailPaneState {
    /// Rows scrolled off the top.
    pub scroll: u16,
}

impl DetailPaneState {
    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Nav(Direction::Up) => self.scroll = self.scroll.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => self.scroll = self.scroll.saturating_add(1),
            AppEvent::ScrollUp => self.scroll = self.scroll.saturating_sub(10),
            AppEvent::ScrollDown => self.scroll = self.scroll.saturating_add(10),
            _ => {}
        }
    }

    pub fn reset(&mut self) {
        self.scroll = 0;
    }
}

fn headings(catalog: Catalog) -> (&'static str, &'static str) {
    match catalog {
        Catalog::Remedies => ("Healing properties", "Uses"),
        Catalog::Care => ("Climate", "Care"),
    }
}

pub struct DetailPane<'a> {
    state: &'a DetailPaneState,
    record: Option<&'a PlantRecord>,
    catalog: Catalog,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> DetailPane<'a> {
    pub fn new(
        state: &'a DetailPaneState,
        record: Option<&'a PlantRecord>,
        catalog: Catalog,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, record, catalog, focused, theme }
    }
}

impl Widget for DetailPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };
        let block = Block::bordered().title("Details").border_style(border_style);

        let Some(record) = self.record else {
            Paragraph::new(Line::from(Span::styled(
                "select a plant to see its details",
                Style::default().add_modifier(Modifier::DIM),
            )))
            .block(block)
            .render(area, buf);
            return;
        };

        let (body_heading, usage_heading) = headings(self.catalog);
        let mut lines = vec![
            Line::from(Span::styled(record.name.clone(), self.theme.record_name)),
            Line::from(Span::styled(
                record.scientific_name.clone(),
                self.theme.record_scientific_name,
            )),
        ];
        if let Some(url) = &record.image_url {
            lines.push(Line::from(Span::styled(
                url.clone(),
                Style::default().add_modifier(Modifier::DIM | Modifier::UNDERLINED),
            )));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(body_heading, self.theme.record_heading)));
        lines.push(Line::from(record.body.clone()));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(usage_heading, self.theme.record_heading)));
        for step in record.usage.lines() {
            lines.push(Line::from(format!("  {step}")));
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.state.scroll, 0))
            .render(area, buf);
    }
}
