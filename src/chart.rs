// src/chart.rs
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{info, instrument};

use crate::csv_handler::CSVHandler;
use crate::error::{Result, ValidationError};
use crate::ui::{ChartTheme, SeriesStyle, DEFAULT_THEME};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisRef {
    Primary,
    Secondary,
    Tertiary,
}

impl AxisRef {
    /// Trace-side reference, `y`, `y2`, `y3`.
    pub fn trace_ref(self) -> &'static str {
        match self {
            AxisRef::Primary => "y",
            AxisRef::Secondary => "y2",
            AxisRef::Tertiary => "y3",
        }
    }

    /// Layout key holding the axis definition.
    pub fn layout_key(self) -> &'static str {
        match self {
            AxisRef::Primary => "yaxis",
            AxisRef::Secondary => "yaxis2",
            AxisRef::Tertiary => "yaxis3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    LinesMarkers,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceStyle {
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_style: Option<LineStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSpec {
    pub kind: SeriesKind,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub label: String,
    pub axis: AxisRef,
    pub style: TraceStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YAxisSpec {
    pub axis: AxisRef,
    pub title: String,
    pub color: String,
    pub side: Side,
    /// Horizontal position in paper coordinates, only set for overlay axes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlaying: Option<AxisRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegendPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Margins {
    pub left: u32,
    pub bottom: u32,
    pub top: u32,
    pub right: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverMode {
    /// Nearest point across all series.
    Closest,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSpec {
    pub title: String,
    pub x_axis_title: String,
    pub y_axes: Vec<YAxisSpec>,
    pub legend: LegendPosition,
    pub margins: Margins,
    pub hover_mode: HoverMode,
}

/// A renderable chart: traces plus layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub series: Vec<SeriesSpec>,
    pub layout: LayoutSpec,
}

impl ChartSpec {
    /// Figure document in plotly's `{data, layout}` schema.
    pub fn to_plotly_json(&self) -> Value {
        let data: Vec<Value> = self.series.iter().map(Self::trace_json).collect();

        let mut layout = Map::new();
        layout.insert("title".into(), json!(self.layout.title));
        layout.insert("xaxis".into(), json!({ "title": self.layout.x_axis_title }));
        for axis in &self.layout.y_axes {
            layout.insert(axis.axis.layout_key().into(), Self::axis_json(axis));
        }
        layout.insert(
            "legend".into(),
            json!({ "x": self.layout.legend.x, "y": self.layout.legend.y }),
        );
        let m = self.layout.margins;
        layout.insert(
            "margin".into(),
            json!({ "l": m.left, "b": m.bottom, "t": m.top, "r": m.right }),
        );
        layout.insert("hovermode".into(), json!(self.layout.hover_mode));

        json!({ "data": data, "layout": Value::Object(layout) })
    }

    fn trace_json(series: &SeriesSpec) -> Value {
        let mut trace = json!({
            "x": series.x,
            "y": series.y,
            "name": series.label,
            "yaxis": series.axis.trace_ref(),
        });
        match series.kind {
            SeriesKind::Bar => {
                trace["type"] = json!("bar");
                trace["marker"] = json!({ "color": series.style.color });
            }
            SeriesKind::Line => {
                let mode = match series.style.line_style {
                    Some(LineStyle::LinesMarkers) => "lines+markers",
                    None => "lines",
                };
                trace["type"] = json!("scatter");
                trace["mode"] = json!(mode);
                trace["line"] = json!({ "color": series.style.color });
            }
        }
        trace
    }

    fn axis_json(axis: &YAxisSpec) -> Value {
        let mut value = json!({
            "title": axis.title,
            "titlefont": { "color": axis.color },
            "tickfont": { "color": axis.color },
        });
        if let Some(overlaying) = axis.overlaying {
            value["overlaying"] = json!(overlaying.trace_ref());
        }
        if axis.side == Side::Right {
            value["side"] = json!("right");
        }
        if let Some(position) = axis.position {
            value["position"] = json!(position);
        }
        value
    }
}

/// Whether `filename` is accepted as a CSV upload.
///
/// Any name containing "csv" in any case passes, `csvthing.txt` included.
pub fn is_csv_filename(filename: &str) -> bool {
    filename.to_lowercase().contains("csv")
}

pub struct ChartSpecBuilder<'a> {
    theme: &'a ChartTheme,
    csv_handler: CSVHandler,
}

impl ChartSpecBuilder<'static> {
    pub fn new() -> Self {
        Self::with_theme(&DEFAULT_THEME)
    }
}

impl Default for ChartSpecBuilder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ChartSpecBuilder<'a> {
    pub fn with_theme(theme: &'a ChartTheme) -> Self {
        ChartSpecBuilder {
            theme,
            csv_handler: CSVHandler::new(),
        }
    }

    /// Turns decoded upload text into a chart, or says why it can't.
    #[instrument(skip(self, text), fields(bytes = text.len()))]
    pub fn build(&self, text: &str, filename: &str) -> Result<ChartSpec> {
        if !is_csv_filename(filename) {
            return Err(ValidationError::UnsupportedFormat {
                filename: filename.to_string(),
            });
        }

        let table = self.csv_handler.parse(text)?;

        let missing = table.missing_columns(&self.theme.required_columns());
        if !missing.is_empty() {
            return Err(ValidationError::MissingColumns(missing));
        }

        let days: Vec<String> = table
            .column(self.theme.x_column)?
            .into_iter()
            .map(String::from)
            .collect();

        let theme = self.theme;
        let series = vec![
            Self::series(
                SeriesKind::Bar,
                AxisRef::Primary,
                &theme.cost,
                &days,
                table.numeric_column(theme.cost.column)?,
            ),
            Self::series(
                SeriesKind::Line,
                AxisRef::Secondary,
                &theme.clicks,
                &days,
                table.numeric_column(theme.clicks.column)?,
            ),
            Self::series(
                SeriesKind::Line,
                AxisRef::Tertiary,
                &theme.impressions,
                &days,
                table.numeric_column(theme.impressions.column)?,
            ),
        ];

        info!(rows = days.len(), "built chart");

        Ok(ChartSpec {
            series,
            layout: self.layout(),
        })
    }

    fn series(
        kind: SeriesKind,
        axis: AxisRef,
        style: &SeriesStyle,
        days: &[String],
        values: Vec<f64>,
    ) -> SeriesSpec {
        SeriesSpec {
            kind,
            x: days.to_vec(),
            y: values,
            label: style.label.to_string(),
            axis,
            style: TraceStyle {
                color: style.color.to_string(),
                line_style: match kind {
                    SeriesKind::Bar => None,
                    SeriesKind::Line => Some(LineStyle::LinesMarkers),
                },
            },
        }
    }

    fn layout(&self) -> LayoutSpec {
        let theme = self.theme;
        let y_axis = |axis: AxisRef,
                      style: &SeriesStyle,
                      side: Side,
                      position: Option<f64>| YAxisSpec {
            axis,
            title: style.label.to_string(),
            color: style.color.to_string(),
            side,
            position,
            overlaying: match axis {
                AxisRef::Primary => None,
                _ => Some(AxisRef::Primary),
            },
        };

        LayoutSpec {
            title: theme.title.to_string(),
            x_axis_title: theme.x_column.to_string(),
            y_axes: vec![
                y_axis(AxisRef::Primary, &theme.cost, Side::Left, None),
                y_axis(
                    AxisRef::Secondary,
                    &theme.clicks,
                    Side::Right,
                    Some(theme.secondary_position),
                ),
                y_axis(
                    AxisRef::Tertiary,
                    &theme.impressions,
                    Side::Right,
                    Some(theme.tertiary_position),
                ),
            ],
            legend: LegendPosition {
                x: theme.legend.0,
                y: theme.legend.1,
            },
            margins: theme.margins,
            hover_mode: HoverMode::Closest,
        }
    }
}
