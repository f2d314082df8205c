use serde::{Deserialize, Serialize};

/// Side of the default square canvas the chart is laid out on.
pub const DEFAULT_CHART_SIZE: f64 = 300.0;

/// A 2D coordinate on the drawing surface (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One labeled value fed into the pie chart (typically a spending category).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEntry {
    /// Category name, unique within one chart input
    pub label: String,

    /// Non-negative amount
    pub value: f64,

    /// Optional fill colour (CSS colour string, e.g. `"#f97316"`)
    #[serde(default)]
    pub color: Option<String>,
}

impl ChartEntry {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            color: None,
        }
    }

    pub fn with_color(label: impl Into<String>, value: f64, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            color: Some(color.into()),
        }
    }
}

/// Placement of the chart on the drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartGeometry {
    /// Center of the pie
    pub center: Point,

    /// Outer radius of the pie
    pub radius: f64,

    /// Label anchors sit at `radius * label_radius_ratio`
    pub label_radius_ratio: f64,

    /// Radius of the center hole as a fraction of `radius` (rendering only)
    pub hole_radius_ratio: f64,
}

impl ChartGeometry {
    /// Geometry centered in a square canvas of side `size`.
    pub fn for_canvas(size: f64) -> Self {
        Self {
            center: Point::new(size / 2.0, size / 2.0),
            radius: size * 0.38,
            label_radius_ratio: 0.65,
            hole_radius_ratio: 0.35,
        }
    }

    pub fn label_radius(&self) -> f64 {
        self.radius * self.label_radius_ratio
    }

    pub fn hole_radius(&self) -> f64 {
        self.radius * self.hole_radius_ratio
    }
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self::for_canvas(DEFAULT_CHART_SIZE)
    }
}

/// One wedge of the pie chart.
///
/// Angles are in degrees, 0° at 12 o'clock, growing clockwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSegment {
    pub label: String,
    pub value: f64,
    pub color: Option<String>,

    /// `value / total * 100`, rounded to one decimal (display only)
    pub percentage_of_total: f64,

    pub start_angle: f64,
    pub end_angle: f64,

    /// The wedge's arc sweeps more than 180°
    pub large_arc: bool,

    /// Arc endpoint at `start_angle`
    pub arc_start: Point,

    /// Arc endpoint at `end_angle`
    pub arc_end: Point,

    /// Closed wedge path in SVG path syntax
    pub path: String,

    /// Where the percentage label goes (mid-angle, inner radius)
    pub label_anchor: Point,
}

impl ChartSegment {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Output of the pie chart builder: drawing-ordered segments plus the total.
///
/// An empty segment list means "no data" and should be rendered as such.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PieChart {
    pub segments: Vec<ChartSegment>,
    pub total: f64,
}

impl PieChart {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
