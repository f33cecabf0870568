use serde::{Deserialize, Serialize};

/// Presentation category for a recommendation line, chosen by keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconCategory {
    Umbrella,
    Sun,
    Wind,
    Warning,
    Generic,
}

/// Ordered (keywords -> category) table. Evaluated top to bottom, first
/// match wins; a line matching several rows resolves to the earliest one.
const ICON_RULES: &[(&[&str], IconCategory)] = &[
    (&["umbrella", "rain"], IconCategory::Umbrella),
    (&["sun", "hat"], IconCategory::Sun),
    (&["wind", "secure"], IconCategory::Wind),
    (&["caution", "careful"], IconCategory::Warning),
];

impl IconCategory {
    /// Classify a recommendation line by case-insensitive keyword match.
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();
        for (keywords, category) in ICON_RULES {
            if keywords.iter().any(|k| lower.contains(k)) {
                return *category;
            }
        }
        IconCategory::Generic
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IconCategory::Umbrella => "Umbrella",
            IconCategory::Sun => "Sun",
            IconCategory::Wind => "Wind",
            IconCategory::Warning => "Warning",
            IconCategory::Generic => "General",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            IconCategory::Umbrella => "☂",
            IconCategory::Sun => "☀",
            IconCategory::Wind => "🌬",
            IconCategory::Warning => "⚠",
            IconCategory::Generic => "✦",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            IconCategory::Umbrella => Color::LightBlue,
            IconCategory::Sun => Color::Yellow,
            IconCategory::Wind => Color::Cyan,
            IconCategory::Warning => Color::Red,
            IconCategory::Generic => Color::Gray,
        }
    }
}

impl std::fmt::Display for IconCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One advice line plus its presentation category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub text: String,
    pub icon: IconCategory,
}

impl Recommendation {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let icon = IconCategory::classify(&text);
        Self { text, icon }
    }
}

/// The insight engine's derived output: summary prose plus an ordered,
/// length-capped recommendation list (always 1..=4 entries).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub summary: String,
    pub recommendations: Vec<Recommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_classification() {
        assert_eq!(
            IconCategory::classify("Carry an umbrella or raincoat"),
            IconCategory::Umbrella
        );
        assert_eq!(
            IconCategory::classify("Wear sunglasses and a hat"),
            IconCategory::Sun
        );
        assert_eq!(
            IconCategory::classify("Secure loose items outdoors"),
            IconCategory::Wind
        );
        assert_eq!(
            IconCategory::classify("Be cautious when driving"),
            IconCategory::Warning
        );
        assert_eq!(
            IconCategory::classify("Enjoy the pleasant weather conditions"),
            IconCategory::Generic
        );
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(
            IconCategory::classify("APPLY SUNSCREEN (SPF 30+)"),
            IconCategory::Sun
        );
    }

    #[test]
    fn ambiguous_lines_resolve_to_first_match() {
        // A line naming both rain and wind lands on the umbrella row
        // because it is checked first.
        assert_eq!(
            IconCategory::classify("Rain and wind expected"),
            IconCategory::Umbrella
        );
    }

    #[test]
    fn recommendation_derives_icon_from_text() {
        let rec = Recommendation::new("Allow extra time for travel");
        assert_eq!(rec.icon, IconCategory::Generic);
        let rec = Recommendation::new("Apply sunscreen (SPF 30+)");
        assert_eq!(rec.icon, IconCategory::Sun);
    }
}
