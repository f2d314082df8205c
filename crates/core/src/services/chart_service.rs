use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::chart::{ChartEntry, ChartGeometry, ChartSegment, PieChart, Point};

/// Degrees in a full turn.
const FULL_TURN: f64 = 360.0;

/// Computes pie chart geometry from labeled values.
///
/// The core computes all the numbers — the frontend only draws:
/// - Percentages of the total (rounded to one decimal, for labels)
/// - Contiguous start/end angles, largest value first, clockwise from 12 o'clock
/// - A closed wedge path per segment in SVG path syntax
/// - A label anchor at the middle of each wedge
pub struct PieChartGeometryBuilder {
    geometry: ChartGeometry,
}

impl PieChartGeometryBuilder {
    pub fn new(geometry: ChartGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &ChartGeometry {
        &self.geometry
    }

    /// Build the chart for `entries`.
    ///
    /// Every entry yields exactly one segment, zero-valued ones included
    /// (with a zero span), so legends can map input to output 1:1.
    /// If the total is zero the chart is empty.
    ///
    /// Angle spans come from the unrounded fractions and the last segment
    /// ends at exactly 360°, so rounding never opens a gap.
    pub fn build(&self, entries: &[ChartEntry]) -> Result<PieChart, CoreError> {
        for entry in entries {
            if !entry.value.is_finite() || entry.value < 0.0 {
                warn!(label = %entry.label, value = entry.value, "rejected chart entry");
                return Err(CoreError::InvalidArgument(format!(
                    "chart value for '{}' must be a non-negative number, got {}",
                    entry.label, entry.value
                )));
            }
        }

        // Stable: equal values keep their input order
        let mut sorted: Vec<&ChartEntry> = entries.iter().collect();
        sorted.sort_by(|a, b| b.value.total_cmp(&a.value));

        // Summed in drawing order so the running sum lands on it exactly
        let total: f64 = sorted.iter().map(|e| e.value).sum();
        if !total.is_finite() {
            warn!(entries = entries.len(), "rejected chart whose total overflows");
            return Err(CoreError::InvalidArgument(
                "sum of chart values is not a finite number".into(),
            ));
        }
        if total <= 0.0 {
            debug!(entries = entries.len(), "chart has no data");
            return Ok(PieChart::default());
        }

        let mut cumulative = 0.0;
        let mut start_angle = 0.0;
        let segments = sorted
            .into_iter()
            .map(|entry| {
                cumulative += entry.value;
                let end_angle = if cumulative >= total {
                    FULL_TURN
                } else {
                    cumulative / total * FULL_TURN
                };
                let segment = self.segment(entry, total, start_angle, end_angle);
                start_angle = end_angle;
                segment
            })
            .collect::<Vec<_>>();

        debug!(segments = segments.len(), total, "built pie chart");
        Ok(PieChart { segments, total })
    }

    fn segment(
        &self,
        entry: &ChartEntry,
        total: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> ChartSegment {
        let g = &self.geometry;
        let span = end_angle - start_angle;
        let arc_start = polar(g.center, g.radius, start_angle);
        let arc_end = polar(g.center, g.radius, end_angle);
        let label_anchor = polar(g.center, g.label_radius(), start_angle + span / 2.0);

        ChartSegment {
            label: entry.label.clone(),
            value: entry.value,
            color: entry.color.clone(),
            percentage_of_total: round_to_tenth(entry.value / total * 100.0),
            start_angle,
            end_angle,
            large_arc: span > 180.0,
            arc_start,
            arc_end,
            path: wedge_path(g, start_angle, span, arc_start, arc_end),
            label_anchor,
        }
    }
}

impl Default for PieChartGeometryBuilder {
    fn default() -> Self {
        Self::new(ChartGeometry::default())
    }
}

/// Polar → Cartesian with 0° pointing up (12 o'clock) and angles growing clockwise.
pub fn polar(center: Point, radius: f64, angle_deg: f64) -> Point {
    let rad = (angle_deg - 90.0).to_radians();
    Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Center → arc start → arc → arc end → close.
///
/// A whole turn starts and ends on the same point, which an SVG arc draws as
/// nothing, so it is split into two half arcs through the opposite point.
fn wedge_path(g: &ChartGeometry, start_angle: f64, span: f64, from: Point, to: Point) -> String {
    let (c, r) = (g.center, g.radius);
    if span >= FULL_TURN {
        let opposite = polar(c, r, start_angle + FULL_TURN / 2.0);
        return format!(
            "M {} {} L {} {} A {r} {r} 0 1 1 {} {} A {r} {r} 0 1 1 {} {} Z",
            c.x, c.y, from.x, from.y, opposite.x, opposite.y, to.x, to.y
        );
    }
    let large = if span > 180.0 { 1 } else { 0 };
    format!(
        "M {} {} L {} {} A {r} {r} 0 {large} 1 {} {} Z",
        c.x, c.y, from.x, from.y, to.x, to.y
    )
}
