use crate::models::{Insight, WeatherReport};
use crate::ui::components::{humidity_stat, pressure_stat, visibility_stat, wind_stat};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

pub struct DashboardScreen<'a> {
    pub report: Option<&'a WeatherReport>,
    pub insight: Option<&'a Insight>,
    pub deriving: bool,
    pub status_message: Option<&'a str>,
}

impl<'a> DashboardScreen<'a> {
    pub fn new(report: Option<&'a WeatherReport>, insight: Option<&'a Insight>) -> Self {
        Self {
            report,
            insight,
            deriving: false,
            status_message: None,
        }
    }

    pub fn deriving(mut self, deriving: bool) -> Self {
        self.deriving = deriving;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

impl Widget for DashboardScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(10),   // Current conditions and insights
                Constraint::Length(3), // Stat card row
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);

        self.render_current(middle[0], buf);
        self.render_insight(middle[1], buf);

        self.render_stats(chunks[2], buf);
        self.render_status_message(chunks[3], buf);
        self.render_nav(chunks[4], buf);
    }
}

impl DashboardScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let title = match self.report {
            Some(r) => format!("skycast - {}, {}", r.location.name, r.location.country),
            None => "skycast - No location loaded".to_string(),
        };

        let block = Block::default()
            .title(Span::styled(title, Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let info = match self.report {
            Some(r) => format!(
                "{} · Updated {}",
                r.source,
                r.fetched_at.format("%Y-%m-%d %H:%M")
            ),
            None => "Press [s] to search for a city".to_string(),
        };

        let para = Paragraph::new(Span::styled(info, Theme::dim())).block(block);
        para.render(area, buf);
    }

    fn render_current(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Current Conditions", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let Some(report) = self.report else {
            Paragraph::new(Span::styled("Waiting for weather data...", Theme::dim()))
                .render(inner, buf);
            return;
        };

        let c = &report.current;
        let temp_style = Style::default().fg(Theme::temp_color(c.temperature_c));

        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{:.0}°C ", c.temperature_c.round()),
                    temp_style.add_modifier(ratatui::style::Modifier::BOLD),
                ),
                Span::styled(format!("{} ", c.condition.symbol()), Theme::normal()),
                Span::styled(&c.description, Theme::normal()),
            ]),
            Line::from(vec![Span::styled(
                format!("Feels like {:.0}°C", c.feels_like_c.round()),
                Theme::dim(),
            )]),
            Line::from(vec![]),
            Line::from(vec![
                Span::styled("High: ", Theme::dim()),
                Span::styled(format!("{:.0}°C", c.temp_max_c.round()), Theme::normal()),
                Span::styled("  Low: ", Theme::dim()),
                Span::styled(format!("{:.0}°C", c.temp_min_c.round()), Theme::normal()),
            ]),
            Line::from(vec![
                Span::styled("Sunrise: ", Theme::dim()),
                Span::styled(c.sunrise.format("%H:%M").to_string(), Theme::normal()),
                Span::styled("  Sunset: ", Theme::dim()),
                Span::styled(c.sunset.format("%H:%M").to_string(), Theme::normal()),
            ]),
        ];

        if let Some(uv) = c.uv_index {
            lines.push(Line::from(vec![
                Span::styled("UV Index: ", Theme::dim()),
                Span::styled(
                    format!("{:.0}", uv),
                    Style::default().fg(Theme::uv_color(uv)),
                ),
                Span::styled(
                    format!(" ({})", c.uv_label().unwrap_or("Low")),
                    Theme::dim(),
                ),
            ]));
        }

        Paragraph::new(lines).render(inner, buf);
    }

    fn render_insight(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Weather Insights", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.deriving {
            Paragraph::new(Span::styled("Analyzing conditions...", Theme::dim()))
                .render(inner, buf);
            return;
        }

        let Some(insight) = self.insight else {
            Paragraph::new(Span::styled("No insights yet", Theme::dim())).render(inner, buf);
            return;
        };

        let summary_height = inner.height.saturating_sub(5).max(2).min(4);
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(summary_height),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(inner);

        Paragraph::new(Span::styled(&insight.summary, Theme::normal()))
            .wrap(Wrap { trim: true })
            .render(parts[0], buf);

        Paragraph::new(Span::styled("Smart Recommendations", Theme::dim()))
            .render(parts[1], buf);

        let items: Vec<ListItem> = insight
            .recommendations
            .iter()
            .map(|rec| {
                let icon_style = Style::default().fg(rec.icon.color());
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", rec.icon.symbol()), icon_style),
                    Span::styled(&rec.text, Theme::normal()),
                ]))
            })
            .collect();

        List::new(items).render(parts[2], buf);
    }

    fn render_stats(&self, area: Rect, buf: &mut Buffer) {
        let stat_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(area);

        let current = self.report.map(|r| &r.current);

        humidity_stat(current.map(|c| c.humidity_pct)).render(stat_chunks[0], buf);
        wind_stat(current.map(|c| c.wind_speed_kmh)).render(stat_chunks[1], buf);
        pressure_stat(current.map(|c| c.pressure_hpa)).render(stat_chunks[2], buf);
        visibility_stat(current.map(|c| c.visibility_km)).render(stat_chunks[3], buf);
    }

    fn render_status_message(&self, area: Rect, buf: &mut Buffer) {
        if let Some(msg) = self.status_message {
            let style = if msg.contains("Unable") || msg.contains("failed") {
                Theme::warning()
            } else {
                Theme::success()
            };
            Paragraph::new(Span::styled(msg, style)).render(area, buf);
        }
    }

    fn render_nav(&self, area: Rect, buf: &mut Buffer) {
        let nav = Line::from(vec![
            Span::styled("[1]", Theme::nav_key()),
            Span::styled("Dashboard ", Theme::nav_label()),
            Span::styled("[2]", Theme::nav_key()),
            Span::styled("Forecast ", Theme::nav_label()),
            Span::styled("[3]", Theme::nav_key()),
            Span::styled("Insights ", Theme::nav_label()),
            Span::styled("[s]", Theme::nav_key()),
            Span::styled("Search ", Theme::nav_label()),
            Span::styled("[r]", Theme::nav_key()),
            Span::styled("Refresh ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);

        Paragraph::new(nav).render(area, buf);
    }
}
