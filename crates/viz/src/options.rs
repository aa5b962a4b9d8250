//! Rendering options attached to a chart: title, legend and axis scales.
//!
//! Field names serialize in camelCase so the options can be handed to a
//! Chart.js-style renderer unchanged.

use crate::config::{ChartConfig, ChartKind};
use serde::{Deserialize, Serialize};

/// Chart rendering options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: Plugins,
    /// Absent for pie charts, which have no axes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugins {
    pub title: TitleOptions,
    pub legend: LegendOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleOptions {
    pub display: bool,
    pub text: String,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub size: u32,
    pub weight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendOptions {
    pub display: bool,
    pub position: LegendPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scales {
    pub x: Scale,
    pub y: Scale,
}

/// One axis of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    /// Left unset for the renderer's default (categorical x, numeric y).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub scale_type: Option<ScaleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    pub title: ScaleTitle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    Linear,
    Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleTitle {
    pub display: bool,
    pub text: String,
}

impl Scale {
    fn titled(text: &str) -> Self {
        Self {
            scale_type: None,
            position: None,
            title: ScaleTitle {
                display: true,
                text: text.to_string(),
            },
        }
    }
}

impl ChartOptions {
    /// Derive display options from a config.
    ///
    /// The title is shown only when non-empty. Pie charts get no scales;
    /// scatter charts get a continuous (`linear`) x axis at the bottom.
    #[must_use]
    pub fn for_config(config: &ChartConfig) -> Self {
        let scales = match config.kind {
            ChartKind::Pie => None,
            ChartKind::Scatter => Some(Scales {
                x: Scale {
                    scale_type: Some(ScaleType::Linear),
                    position: Some("bottom".to_string()),
                    ..Scale::titled(&config.x_axis)
                },
                y: Scale::titled(&config.y_axis),
            }),
            ChartKind::Bar | ChartKind::Line => Some(Scales {
                x: Scale::titled(&config.x_axis),
                y: Scale::titled(&config.y_axis),
            }),
        };

        Self {
            responsive: true,
            maintain_aspect_ratio: false,
            plugins: Plugins {
                title: TitleOptions {
                    display: !config.title.is_empty(),
                    text: config.title.clone(),
                    font: Font {
                        size: 16,
                        weight: "bold".to_string(),
                    },
                },
                legend: LegendOptions {
                    display: true,
                    position: LegendPosition::Top,
                },
            },
            scales,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_options() {
        let options = ChartOptions::for_config(&ChartConfig::new(ChartKind::Bar, "Month", "Sales"));
        let scales = options.scales.unwrap();
        assert_eq!(scales.x.title.text, "Month");
        assert_eq!(scales.y.title.text, "Sales");
        assert!(scales.x.scale_type.is_none());
        assert!(options.plugins.title.display);
        assert_eq!(options.plugins.title.text, "Data Visualization");
    }

    #[test]
    fn test_pie_has_no_scales() {
        let options = ChartOptions::for_config(&ChartConfig::new(ChartKind::Pie, "a", "b"));
        assert!(options.scales.is_none());
        let json = serde_json::to_value(&options).unwrap();
        assert!(json.get("scales").is_none());
    }

    #[test]
    fn test_scatter_x_is_linear() {
        let options = ChartOptions::for_config(&ChartConfig::new(ChartKind::Scatter, "w", "h"));
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["scales"]["x"]["type"], "linear");
        assert_eq!(json["scales"]["x"]["position"], "bottom");
        assert_eq!(json["scales"]["x"]["title"]["text"], "w");
        assert!(json["scales"]["y"].get("type").is_none());
    }

    #[test]
    fn test_empty_title_hidden() {
        let config = ChartConfig::new(ChartKind::Line, "a", "b").with_title("");
        let options = ChartOptions::for_config(&config);
        assert!(!options.plugins.title.display);
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["maintainAspectRatio"], false);
        assert_eq!(json["plugins"]["legend"]["position"], "top");
    }
}
