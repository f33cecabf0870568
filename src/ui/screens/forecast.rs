use crate::models::WeatherReport;
use crate::ui::Theme;
use chrono::Utc;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct ForecastScreen<'a> {
    pub report: Option<&'a WeatherReport>,
}

impl<'a> ForecastScreen<'a> {
    pub fn new(report: Option<&'a WeatherReport>) -> Self {
        Self { report }
    }
}

impl Widget for ForecastScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(8),    // Day columns
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = match self.report {
            Some(r) => Line::from(vec![
                Span::styled("7-Day Forecast", Theme::title()),
                Span::styled(format!(" - {}", r.location.name), Theme::dim()),
            ]),
            None => Line::from(Span::styled("7-Day Forecast", Theme::title())),
        };
        Paragraph::new(title).render(chunks[0], buf);

        self.render_days(chunks[1], buf);

        let nav = Line::from(vec![
            Span::styled("[1]", Theme::nav_key()),
            Span::styled("Dashboard ", Theme::nav_label()),
            Span::styled("[s]", Theme::nav_key()),
            Span::styled("Search ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[2], buf);
    }
}

impl ForecastScreen<'_> {
    fn render_days(&self, area: Rect, buf: &mut Buffer) {
        let Some(report) = self.report else {
            Paragraph::new(Span::styled("Waiting for weather data...", Theme::dim()))
                .render(area, buf);
            return;
        };

        if report.forecast.is_empty() {
            Paragraph::new(Span::styled("No forecast available", Theme::dim()))
                .render(area, buf);
            return;
        }

        let today = Utc::now().date_naive();
        let count = report.forecast.len().min(7);
        let constraints: Vec<Constraint> = (0..count)
            .map(|_| Constraint::Ratio(1, count as u32))
            .collect();
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (day, column) in report.forecast.iter().take(count).zip(columns.iter()) {
            let block = Block::default()
                .title(Span::styled(day.day_label(today), Theme::header()))
                .borders(Borders::ALL)
                .border_style(Theme::border());

            let inner = block.inner(*column);
            block.render(*column, buf);

            let max_style = Style::default().fg(Theme::temp_color(day.temp_max_c));
            let lines = vec![
                Line::from(Span::styled(day.condition.symbol(), Theme::normal())),
                Line::from(Span::styled(
                    format!("{:.0}°", day.temp_max_c.round()),
                    max_style,
                )),
                Line::from(Span::styled(
                    format!("{:.0}°", day.temp_min_c.round()),
                    Theme::dim(),
                )),
                Line::from(Span::styled(day.description.clone(), Theme::dim())),
                Line::from(Span::styled(
                    format!("{:.0}% hum", day.humidity_pct.round()),
                    Theme::dim(),
                )),
            ];

            Paragraph::new(lines).render(inner, buf);
        }
    }
}
