//! Standalone HTML export.

use crate::chart::ChartSpec;
use crate::error::ChartResult;

/// Escape HTML special characters to prevent XSS.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

impl ChartSpec {
    /// Generate HTML with embedded Chart.js.
    ///
    /// # Errors
    ///
    /// Returns error if the spec cannot be serialized.
    pub fn to_html(&self) -> ChartResult<String> {
        // Escape title for HTML context and JSON for script context
        let title = escape_html(&self.title);
        let json = self.to_json()?.replace("</", "<\\/"); // Prevent script tag breakout

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
    <style>#chart-container {{ position: relative; height: 80vh; }}</style>
</head>
<body>
    <div id="chart-container"><canvas id="chart"></canvas></div>
    <script>
        const spec = {json};
        const ctx = document.getElementById('chart').getContext('2d');
        new Chart(ctx, {{
            type: spec.type,
            data: spec.data,
            options: spec.options
        }});
    </script>
</body>
</html>"#
        ))
    }

    /// File name for exporting this chart, e.g. `Monthly_Sales_chart.png`.
    ///
    /// Runs of whitespace in the title become a single underscore.
    #[must_use]
    pub fn export_file_name(&self, extension: &str) -> String {
        let mut name = String::with_capacity(self.title.len());
        let mut in_space = false;
        for c in self.title.chars() {
            if !c.is_whitespace() {
                name.push(c);
            } else if !in_space {
                name.push('_');
            }
            in_space = c.is_whitespace();
        }
        format!("{name}_chart.{extension}")
    }
}

#[cfg(test)]
mod tests {
    use crate::{build_chart, ChartConfig, ChartKind};
    use chartsheet_sheet::Table;

    fn spec(title: &str) -> crate::ChartSpec {
        let table = Table::from_grid(
            "S",
            vec![vec!["a".into(), "b".into()], vec!["x".into(), 1.into()]],
        )
        .unwrap();
        build_chart(&table, &ChartConfig::new(ChartKind::Pie, "a", "b").with_title(title)).unwrap()
    }

    #[test]
    fn test_chart_to_html() {
        let html = spec("Pie Chart").to_html().unwrap();
        assert!(html.contains("chart.js"));
        assert!(html.contains("<title>Pie Chart</title>"));
        assert!(html.contains("\"type\":\"pie\""));
    }

    #[test]
    fn test_html_escapes_title_and_script() {
        let html = spec("</script><b>&").to_html().unwrap();
        assert!(html.contains("<title>&lt;/script&gt;&lt;b&gt;&amp;</title>"));
        assert!(!html.contains("\"</script>"));
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            spec("Monthly  Sales\t2024").export_file_name("png"),
            "Monthly_Sales_2024_chart.png"
        );
        assert_eq!(spec(" padded ").export_file_name("html"), "_padded__chart.html");
        assert_eq!(spec("").export_file_name("png"), "_chart.png");
    }
}
