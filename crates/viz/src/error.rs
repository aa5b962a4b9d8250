//! Error types for chart building.

use thiserror::Error;

/// Result type for chart operations.
pub type ChartResult<T> = Result<T, ChartError>;

/// Which chart axis a column selection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "X-axis"),
            Axis::Y => write!(f, "Y-axis"),
        }
    }
}

/// Errors that can occur while turning a table into a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The table has no header row.
    #[error("No data headers found. Please upload a valid Excel file with column headers.")]
    NoHeaders,

    /// The table has headers but no data rows.
    #[error("No data rows found. Please upload a file with data.")]
    NoRows,

    /// The selected column is not one of the table headers.
    #[error(
        "Selected {axis} column \"{column}\" not found in data. Available columns: {}",
        .available.join(", ")
    )]
    ColumnNotFound {
        axis: Axis,
        column: String,
        available: Vec<String>,
    },

    /// Unknown chart type name.
    #[error("Unsupported chart type: {0}")]
    UnsupportedChartType(String),

    /// Malformed color literal.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChartError {
    /// True for errors caused by a configuration that doesn't fit the table.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::NoHeaders | Self::NoRows | Self::ColumnNotFound { .. }
        )
    }
}
