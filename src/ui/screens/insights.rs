use crate::models::Insight;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

pub struct InsightsScreen<'a> {
    pub insight: Option<&'a Insight>,
    pub deriving: bool,
    pub selected_index: usize,
}

impl<'a> InsightsScreen<'a> {
    pub fn new(insight: Option<&'a Insight>) -> Self {
        Self {
            insight,
            deriving: false,
            selected_index: 0,
        }
    }

    pub fn deriving(mut self, deriving: bool) -> Self {
        self.deriving = deriving;
        self
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }
}

impl Widget for InsightsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(5), // Summary
                Constraint::Min(6),    // Recommendations
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let count = self
            .insight
            .map(|i| i.recommendations.len())
            .unwrap_or(0);
        let title = Line::from(vec![
            Span::styled("Weather Insights", Theme::title()),
            Span::styled(format!(" ({} recommendations)", count), Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        self.render_summary(chunks[1], buf);
        self.render_recommendations(chunks[2], buf);

        let nav = Line::from(vec![
            Span::styled("[↑↓]", Theme::nav_key()),
            Span::styled("Navigate ", Theme::nav_label()),
            Span::styled("[1]", Theme::nav_key()),
            Span::styled("Dashboard ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[3], buf);
    }
}

impl InsightsScreen<'_> {
    fn render_summary(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Summary", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let text = if self.deriving {
            Span::styled("Analyzing conditions...", Theme::dim())
        } else {
            match self.insight {
                Some(insight) => Span::styled(insight.summary.as_str(), Theme::normal()),
                None => Span::styled("No insight derived yet", Theme::dim()),
            }
        };

        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }

    fn render_recommendations(&self, area: Rect, buf: &mut Buffer) {
        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        self.render_list(content[0], buf);
        self.render_details(content[1], buf);
    }

    fn render_list(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Smart Recommendations", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let Some(insight) = self.insight else {
            Paragraph::new(Span::styled("Nothing to recommend yet", Theme::dim()))
                .render(inner, buf);
            return;
        };

        let items: Vec<ListItem> = insight
            .recommendations
            .iter()
            .enumerate()
            .map(|(i, rec)| {
                let style = if i == self.selected_index {
                    Theme::selected()
                } else {
                    Style::default()
                };
                let icon_style = Style::default().fg(rec.icon.color());
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", rec.icon.symbol()), icon_style),
                    Span::styled(&rec.text, Theme::normal()),
                ]))
                .style(style)
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_details(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Details", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let selected = self
            .insight
            .and_then(|i| i.recommendations.get(self.selected_index));

        let Some(rec) = selected else {
            Paragraph::new(Span::styled(
                "Select a recommendation to view details",
                Theme::dim(),
            ))
            .render(inner, buf);
            return;
        };

        let lines = vec![
            Line::from(Span::styled(&rec.text, Theme::header())),
            Line::from(vec![]),
            Line::from(vec![
                Span::styled("Category: ", Theme::dim()),
                Span::styled(
                    format!("{} {}", rec.icon.symbol(), rec.icon),
                    Style::default().fg(rec.icon.color()),
                ),
            ]),
        ];

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
