use crate::color::{colors_for, Color, ACCENT, ACCENT_DARK};
use crate::config::{ChartConfig, ChartKind};
use crate::error::{Axis, ChartError, ChartResult};
use crate::options::ChartOptions;
use chartsheet_sheet::{CellValue, Table};
use serde::{Deserialize, Serialize};

/// Chart specification for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub chart_type: ChartKind,
    pub title: String,
    pub data: ChartData,
    pub options: ChartOptions,
}

/// Chart data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// One label per row; absent for scatter charts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    pub datasets: Vec<Dataset>,
}

/// A dataset in a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: DataPoints,
    pub background_color: Paint,
    pub border_color: Paint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

/// Values of a dataset: a series aligned with the labels, or free x/y points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataPoints {
    Series(Vec<f64>),
    Points(Vec<Point>),
}

/// A scatter point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One color for the whole dataset, or one per row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Paint {
    Solid(Color),
    PerItem(Vec<Color>),
}

impl ChartSpec {
    /// Row labels of a bar, line or pie chart.
    #[must_use]
    pub fn labels(&self) -> Option<&[String]> {
        self.data.labels.as_deref()
    }

    /// Numeric series of a bar, line or pie chart.
    #[must_use]
    pub fn series(&self) -> Option<&[f64]> {
        match &self.data.datasets.first()?.data {
            DataPoints::Series(values) => Some(values),
            DataPoints::Points(_) => None,
        }
    }

    /// Points of a scatter chart.
    #[must_use]
    pub fn points(&self) -> Option<&[Point]> {
        match &self.data.datasets.first()?.data {
            DataPoints::Points(points) => Some(points),
            DataPoints::Series(_) => None,
        }
    }

    /// Convert to JSON string for IPC/frontend rendering.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> ChartResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Check `config` against `table` and return the `(x, y)` column indices.
///
/// Checks run in order and the first failure is returned: headers present,
/// rows present, x column present, y column present. Names must match a
/// header exactly; with duplicate headers the first match wins.
pub fn resolve_columns(table: &Table, config: &ChartConfig) -> ChartResult<(usize, usize)> {
    if table.headers.is_empty() {
        return Err(ChartError::NoHeaders);
    }
    if table.rows.is_empty() {
        return Err(ChartError::NoRows);
    }

    let find = |axis: Axis, column: &str| {
        table
            .column_index(column)
            .ok_or_else(|| ChartError::ColumnNotFound {
                axis,
                column: column.to_string(),
                available: table.headers.clone(),
            })
    };

    Ok((find(Axis::X, &config.x_axis)?, find(Axis::Y, &config.y_axis)?))
}

/// Build the renderer payload for `config` from `table`.
///
/// Pure: the same table and config always give the same spec. Every row
/// contributes exactly one label/value (or one point); cells that are missing
/// or not numeric count as `0`.
pub fn build_chart(table: &Table, config: &ChartConfig) -> ChartResult<ChartSpec> {
    let (x_index, y_index) = resolve_columns(table, config)?;

    let data = match config.kind {
        ChartKind::Scatter => scatter_data(table, config, x_index, y_index),
        kind => {
            let labels: Vec<String> = table
                .rows
                .iter()
                .map(|row| row.get(x_index).map(ToString::to_string).unwrap_or_default())
                .collect();
            let series: Vec<f64> = table.rows.iter().map(|row| number_at(row, y_index)).collect();
            ChartData {
                datasets: vec![series_dataset(kind, config, series)],
                labels: Some(labels),
            }
        }
    };

    Ok(ChartSpec {
        chart_type: config.kind,
        title: config.title.clone(),
        data,
        options: ChartOptions::for_config(config),
    })
}

fn number_at(row: &[CellValue], index: usize) -> f64 {
    row.get(index).map_or(0.0, CellValue::coerce_number)
}

fn series_dataset(kind: ChartKind, config: &ChartConfig, series: Vec<f64>) -> Dataset {
    match kind {
        ChartKind::Line => Dataset {
            label: Some(config.y_axis.clone()),
            data: DataPoints::Series(series),
            background_color: Paint::Solid(ACCENT),
            border_color: Paint::Solid(ACCENT),
            border_width: None,
            fill: Some(false),
            tension: Some(0.1),
        },
        _ => {
            let colors = colors_for(series.len());
            let (label, border_width) = if kind == ChartKind::Pie {
                (None, 2)
            } else {
                (Some(config.y_axis.clone()), 1)
            };
            Dataset {
                label,
                data: DataPoints::Series(series),
                background_color: Paint::PerItem(colors.background),
                border_color: Paint::PerItem(colors.border),
                border_width: Some(border_width),
                fill: None,
                tension: None,
            }
        }
    }
}

fn scatter_data(table: &Table, config: &ChartConfig, x_index: usize, y_index: usize) -> ChartData {
    let points = table
        .rows
        .iter()
        .map(|row| Point {
            x: number_at(row, x_index),
            y: number_at(row, y_index),
        })
        .collect();

    ChartData {
        labels: None,
        datasets: vec![Dataset {
            label: Some(format!("{} vs {}", config.x_axis, config.y_axis)),
            data: DataPoints::Points(points),
            background_color: Paint::Solid(ACCENT),
            border_color: Paint::Solid(ACCENT_DARK),
            border_width: None,
            fill: None,
            tension: None,
        }],
    }
}
