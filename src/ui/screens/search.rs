use crate::app::POPULAR_CITIES;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Widget},
};

/// Centered overlay for choosing a location, drawn on top of the
/// dashboard.
pub struct SearchScreen<'a> {
    pub query: &'a str,
    pub selected_city: usize,
    pub fetching: bool,
}

impl<'a> SearchScreen<'a> {
    pub fn new(query: &'a str) -> Self {
        Self {
            query,
            selected_city: 0,
            fetching: false,
        }
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_city = index;
        self
    }

    pub fn fetching(mut self, fetching: bool) -> Self {
        self.fetching = fetching;
        self
    }

    fn overlay_area(area: Rect) -> Rect {
        let width = area.width.min(44);
        let height = area.height.min((POPULAR_CITIES.len() + 8) as u16);
        Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        }
    }
}

impl Widget for SearchScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let overlay = Self::overlay_area(area);
        Clear.render(overlay, buf);

        let block = Block::default()
            .title(Span::styled("Choose Location", Theme::title()))
            .borders(Borders::ALL)
            .border_style(Theme::border_focused());

        let inner = block.inner(overlay);
        block.render(overlay, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Input
                Constraint::Length(1), // Section header
                Constraint::Min(1),    // Popular cities
                Constraint::Length(1), // Hints
            ])
            .split(inner);

        let input_block = Block::default()
            .title("Search for a city")
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let input_inner = input_block.inner(chunks[0]);
        input_block.render(chunks[0], buf);

        let input_line = if self.query.is_empty() {
            Line::from(Span::styled("Type a city name...", Theme::dim()))
        } else {
            Line::from(vec![
                Span::styled(self.query, Theme::normal()),
                Span::styled("█", Theme::highlight()),
            ])
        };
        Paragraph::new(input_line).render(input_inner, buf);

        Paragraph::new(Span::styled("Popular Cities", Theme::dim())).render(chunks[1], buf);

        let items: Vec<ListItem> = POPULAR_CITIES
            .iter()
            .enumerate()
            .map(|(i, city)| {
                let style = if i == self.selected_city && self.query.is_empty() {
                    Theme::selected()
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::styled("⌖ ", Theme::dim()),
                    Span::styled(*city, Theme::normal()),
                ]))
                .style(style)
            })
            .collect();
        List::new(items).render(chunks[2], buf);

        let hint = if self.fetching {
            Line::from(Span::styled("Searching...", Theme::warning()))
        } else {
            Line::from(vec![
                Span::styled("[Enter]", Theme::nav_key()),
                Span::styled("Search ", Theme::nav_label()),
                Span::styled("[↑↓]", Theme::nav_key()),
                Span::styled("Cities ", Theme::nav_label()),
                Span::styled("[Esc]", Theme::nav_key()),
                Span::styled("Close", Theme::nav_label()),
            ])
        };
        Paragraph::new(hint).render(chunks[3], buf);
    }
}
