use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Bordered stat tile: a rounded value with unit suffix, colored by
/// threshold. Mirrors the dashboard's bottom card row.
pub struct StatCard<'a> {
    title: &'a str,
    value: Option<f64>,
    unit: &'a str,
    thresholds: Vec<(f64, Color)>,
    precision: usize,
}

impl<'a> StatCard<'a> {
    pub fn new(title: &'a str, value: Option<f64>, unit: &'a str) -> Self {
        Self {
            title,
            value,
            unit,
            thresholds: Vec::new(),
            precision: 0,
        }
    }

    pub fn thresholds(mut self, thresholds: Vec<(f64, Color)>) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    fn get_color(&self, value: f64) -> Color {
        for (threshold, color) in self.thresholds.iter().rev() {
            if value >= *threshold {
                return *color;
            }
        }
        Theme::FG
    }
}

impl Widget for StatCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 8 {
            return;
        }

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        match self.value {
            Some(value) => {
                let color = self.get_color(value);
                let value_str =
                    format!("{:.prec$} {}", value, self.unit, prec = self.precision);
                let line = Line::from(vec![Span::styled(value_str, Style::default().fg(color))]);
                Paragraph::new(line).render(inner, buf);
            }
            None => {
                let line = Line::from(vec![Span::styled("N/A", Theme::dim())]);
                Paragraph::new(line).render(inner, buf);
            }
        }
    }
}

pub fn humidity_stat(value: Option<f64>) -> StatCard<'static> {
    StatCard::new("Humidity", value, "%").thresholds(vec![
        (0.0, Theme::WARNING),
        (30.0, Theme::SUCCESS),
        (80.0, Theme::WARNING),
    ])
}

pub fn wind_stat(value: Option<f64>) -> StatCard<'static> {
    StatCard::new("Wind", value, "km/h").thresholds(vec![
        (0.0, Theme::SUCCESS),
        (20.0, Theme::WARNING),
        (60.0, Theme::ERROR),
    ])
}

pub fn pressure_stat(value: Option<f64>) -> StatCard<'static> {
    StatCard::new("Pressure", value, "hPa")
}

pub fn visibility_stat(value: Option<f64>) -> StatCard<'static> {
    StatCard::new("Visibility", value, "km").precision(1)
}
