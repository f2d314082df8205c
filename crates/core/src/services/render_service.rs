use svg::node::element::{Circle, Group, Path, Text};
use svg::node::Text as TextNode;
use svg::Document;

use crate::models::chart::{ChartGeometry, PieChart};
use crate::services::activity_service::CATEGORY_COLORS;
use crate::models::settings::ThemeMode;


/// The handful of theme colours the chart needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPalette {
    pub background: &'static str,
    pub text: &'static str,
    pub primary: &'static str,
    pub divider: &'static str,
    pub muted: &'static str,
    pub label: &'static str,
}

impl ChartPalette {
    pub fn for_theme(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self {
                background: "#FFFFFF",
                text: "#1E1B4B",
                primary: "#7C3AED",
                divider: "rgba(109, 40, 217, 0.1)",
                muted: "#6B7280",
                label: "#000000",
            },
            ThemeMode::Dark => Self {
                background: "#1E1B4B",
                text: "#F5F3FF",
                primary: "#8B5CF6",
                divider: "rgba(139, 92, 246, 0.2)",
                muted: "#9CA3AF",
                label: "#FFFFFF",
            },
        }
    }
}

/// Draws computed pie charts as SVG documents.
pub struct RenderService;

impl RenderService {
    pub fn new() -> Self {
        Self
    }

    /// Render `chart` on a square canvas sized to fit `geometry`.
    ///
    /// Wedges carry their percentage label; the center hole shows the total.
    /// An empty chart renders the "no data" message instead.
    pub fn render_pie_chart(
        &self,
        chart: &PieChart,
        geometry: &ChartGeometry,
        mode: ThemeMode,
    ) -> Document {
        let palette = ChartPalette::for_theme(mode);
        let size = geometry.center.x.max(geometry.center.y) * 2.0;
        let (cx, cy) = (geometry.center.x, geometry.center.y);
        let document = Document::new()
            .set("width", size)
            .set("height", size)
            .set("viewBox", (0.0, 0.0, size, size));

        if chart.is_empty() {
            return document.add(text(cx, cy, palette.muted, 14, "No expense data available"));
        }

        let wedges = chart
            .segments
            .iter()
            .enumerate()
            .fold(Group::new(), |group, (i, segment)| {
                // Uncoloured segments cycle through the category palette
                let fill = segment
                    .color
                    .clone()
                    .unwrap_or_else(|| CATEGORY_COLORS[i % CATEGORY_COLORS.len()].1.to_string());
                let wedge = Path::new()
                    .set("d", segment.path.clone())
                    .set("fill", fill)
                    .set("stroke", palette.background)
                    .set("stroke-width", 2);
                let label = text(
                    segment.label_anchor.x,
                    segment.label_anchor.y,
                    palette.label,
                    13,
                    &format!("{:.1}%", segment.percentage_of_total),
                );
                group.add(wedge).add(label)
            });

        let hole = geometry.hole_radius();
        let shadow = Circle::new()
            .set("cx", cx)
            .set("cy", cy)
            .set("r", hole + 2.0)
            .set("fill", if mode.is_dark() { "rgba(0,0,0,0.3)" } else { "rgba(0,0,0,0.1)" });
        let center = Circle::new()
            .set("cx", cx)
            .set("cy", cy)
            .set("r", hole)
            .set("fill", palette.background)
            .set("stroke", palette.divider)
            .set("stroke-width", 1);

        document
            .add(wedges)
            .add(shadow)
            .add(center)
            .add(text(cx, cy - 15.0, palette.text, 15, "Total"))
            .add(text(cx, cy + 15.0, palette.primary, 18, &format!("${:.2}", chart.total)))
    }
}

impl Default for RenderService {
    fn default() -> Self {
        Self::new()
    }
}

fn text(x: f64, y: f64, fill: &str, font_size: u32, content: &str) -> Text {
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("fill", fill)
        .set("font-size", font_size)
        .set("font-weight", "bold")
        .set("text-anchor", "middle")
        .set("alignment-baseline", "middle")
        .add(TextNode::new(content))
}
