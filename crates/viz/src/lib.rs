//! # chartsheet-viz
//!
//! Chart generation for chartsheet.
//!
//! Turns a [`Table`](chartsheet_sheet::Table) and a [`ChartConfig`] into a
//! [`ChartSpec`] that can be rendered by:
//! - HTML/Chart.js output ([`ChartSpec::to_html`])
//! - any frontend that consumes Chart.js-shaped JSON ([`ChartSpec::to_json`])
//!
//! Building a chart is a pure function of the table and the config, so it is
//! simply re-run whenever the config changes.
//!
//! ```
//! use chartsheet_sheet::{CellValue, Table};
//! use chartsheet_viz::{build_chart, ChartConfig, ChartKind};
//!
//! let table = Table::from_grid("Sheet1", vec![
//!     vec!["Month".into(), "Sales".into()],
//!     vec!["Jan".into(), 100.into()],
//!     vec!["Feb".into(), CellValue::Null],
//!     vec!["Mar".into(), "250".into()],
//! ]).unwrap();
//!
//! let spec = build_chart(&table, &ChartConfig::new(ChartKind::Bar, "Month", "Sales")).unwrap();
//! assert_eq!(spec.labels().unwrap(), ["Jan", "Feb", "Mar"]);
//! assert_eq!(spec.series().unwrap(), [100.0, 0.0, 250.0]);
//! ```

mod chart;
mod color;
mod config;
mod error;
mod html;
mod options;

pub use chart::{
    build_chart, resolve_columns, ChartData, ChartSpec, DataPoints, Dataset, Paint, Point,
};
pub use color::{colors_for, Color, ColorSet, ACCENT, ACCENT_DARK, FILL_ALPHA, PALETTE};
pub use config::{ChartConfig, ChartKind, DEFAULT_TITLE};
pub use error::{Axis, ChartError, ChartResult};
pub use options::{
    ChartOptions, Font, LegendOptions, LegendPosition, Plugins, Scale, ScaleTitle, ScaleType,
    Scales, TitleOptions,
};
