//! Cubic curves connecting a parent commit to a child commit.

use cad_history_core::Position;
use serde::{Deserialize, Serialize};

/// Cubic Bézier from a parent position to a child position.
///
/// The horizontal control offset is proportional to the vertical distance
/// between the endpoints, so edges within a lane are straight and edges
/// crossing lanes bend gently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeCurve {
    pub from: Position,
    pub control_from: Position,
    pub control_to: Position,
    pub to: Position,
}

impl EdgeCurve {
    /// Ratio between the vertical distance and the control offset.
    pub const BEND_FACTOR: f64 = 0.5;

    /// Build the curve between two endpoints. Pure function of its inputs.
    pub fn between(from: Position, to: Position) -> Self {
        let bend = (to.y - from.y).abs() * Self::BEND_FACTOR;
        Self {
            from,
            control_from: Position::new(from.x + bend, from.y),
            control_to: Position::new(to.x - bend, to.y),
            to,
        }
    }

    /// Horizontal offset of the control points.
    pub fn bend(&self) -> f64 {
        self.control_from.x - self.from.x
    }

    /// Whether both endpoints share a vertical coordinate.
    pub fn is_straight(&self) -> bool {
        self.from.y == self.to.y
    }

    /// Evaluate the curve at `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Position {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let a = u * u * u;
        let b = 3.0 * u * u * t;
        let c = 3.0 * u * t * t;
        let d = t * t * t;
        Position::new(
            a * self.from.x + b * self.control_from.x + c * self.control_to.x + d * self.to.x,
            a * self.from.y + b * self.control_from.y + c * self.control_to.y + d * self.to.y,
        )
    }

    /// SVG path data (`M x y C c1x c1y, c2x c2y, x y`).
    pub fn to_svg_path(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.from.x,
            self.from.y,
            self.control_from.x,
            self.control_from.y,
            self.control_to.x,
            self.control_to.y,
            self.to.x,
            self.to.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_lane_is_straight() {
        let curve = EdgeCurve::between(Position::new(50.0, 50.0), Position::new(150.0, 50.0));

        assert!(curve.is_straight());
        assert_eq!(curve.bend(), 0.0);
        assert_eq!(curve.point_at(0.5), Position::new(100.0, 50.0));
        assert_eq!(curve.to_svg_path(), "M 50 50 C 50 50, 150 50, 150 50");
    }

    #[test]
    fn test_bend_proportional_to_vertical_distance() {
        let near = EdgeCurve::between(Position::new(350.0, 50.0), Position::new(450.0, 120.0));
        let far = EdgeCurve::between(Position::new(350.0, 50.0), Position::new(450.0, 190.0));

        assert!(!near.is_straight());
        assert_eq!(near.bend(), 35.0);
        assert_eq!(far.bend(), 70.0);
        assert_eq!(near.control_to, Position::new(415.0, 120.0));
    }

    #[test]
    fn test_endpoints_are_on_the_curve() {
        let curve = EdgeCurve::between(Position::new(0.0, 0.0), Position::new(10.0, 40.0));

        assert_eq!(curve.point_at(0.0), curve.from);
        assert_eq!(curve.point_at(1.0), curve.to);
    }

    #[test]
    fn test_geometry_is_deterministic() {
        let a = Position::new(1.5, 2.0);
        let b = Position::new(9.0, -4.0);
        assert_eq!(EdgeCurve::between(a, b), EdgeCurve::between(a, b));
    }
}
