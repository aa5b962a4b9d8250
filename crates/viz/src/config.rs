//! User-selected chart settings.

use crate::error::ChartError;
use chartsheet_sheet::Table;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Title given to a chart before the user picks one.
pub const DEFAULT_TITLE: &str = "Data Visualization";

/// Chart type for visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
    Scatter,
}

impl ChartKind {
    /// All supported kinds, in menu order.
    pub const ALL: [ChartKind; 4] = [Self::Bar, Self::Line, Self::Pie, Self::Scatter];

    /// Renderer name of the chart type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Pie => "pie",
            Self::Scatter => "scatter",
        }
    }

    /// Short description of what the chart is good for.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Bar => "Compare categories",
            Self::Line => "Show trends over time",
            Self::Pie => "Show proportions",
            Self::Scatter => "Show relationships",
        }
    }

    /// Whether the chart draws one color per row rather than a single series color.
    #[must_use]
    pub fn is_categorical(self) -> bool {
        matches!(self, Self::Bar | Self::Pie)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ChartError::UnsupportedChartType(s.to_string()))
    }
}

/// Chart type, axis columns and title chosen by the user.
///
/// Column names are not checked when the config is built; they are validated
/// against the table every time a chart is generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub x_axis: String,
    pub y_axis: String,
    #[serde(default)]
    pub title: String,
}

impl ChartConfig {
    /// Create a config with the default title.
    pub fn new(kind: ChartKind, x_axis: impl Into<String>, y_axis: impl Into<String>) -> Self {
        Self {
            kind,
            x_axis: x_axis.into(),
            y_axis: y_axis.into(),
            title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Starting config for a freshly loaded table: a bar chart of the second
    /// column against the first.
    ///
    /// With a single column both axes use it; with none both are empty.
    #[must_use]
    pub fn defaults_for(table: &Table) -> Self {
        let x_axis = table.headers.first().cloned().unwrap_or_default();
        let y_axis = table.headers.get(1).cloned().unwrap_or_else(|| x_axis.clone());
        Self::new(ChartKind::Bar, x_axis, y_axis)
    }

    /// Set the chart title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the chart type
    #[must_use]
    pub fn with_kind(mut self, kind: ChartKind) -> Self {
        self.kind = kind;
        self
    }
}
