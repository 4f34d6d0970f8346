// src/ui.rs
use once_cell::sync::Lazy;

use crate::chart::Margins;

pub struct SeriesStyle {
    pub column: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

pub struct ChartTheme {
    pub title: &'static str,
    pub x_column: &'static str,
    pub cost: SeriesStyle,
    pub clicks: SeriesStyle,
    pub impressions: SeriesStyle,
    pub secondary_position: f64,
    pub tertiary_position: f64,
    pub legend: (f64, f64),
    pub margins: Margins,
}

pub static DEFAULT_THEME: Lazy<ChartTheme> = Lazy::new(|| ChartTheme {
    title: "Cost, Clicks, and Impressions Over Days",
    x_column: "Day",
    cost: SeriesStyle {
        column: "Cost",
        label: "Cost",
        color: "blue",
    },
    clicks: SeriesStyle {
        column: "Clicks",
        label: "Clicks",
        color: "magenta",
    },
    impressions: SeriesStyle {
        column: "Impr.",
        label: "Impressions",
        color: "green",
    },
    secondary_position: 0.85,
    tertiary_position: 0.95,
    legend: (0.0, 1.0), // top-left
    margins: Margins {
        left: 40,
        bottom: 40,
        top: 40,
        right: 40,
    },
});

impl ChartTheme {
    /// Header names an upload must carry, in reporting order.
    pub fn required_columns(&self) -> [&'static str; 4] {
        [
            self.x_column,
            self.cost.column,
            self.clicks.column,
            self.impressions.column,
        ]
    }
}
