// Copyright 2026 the Kurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immediate-mode drawing of segments.

use alloc::vec::Vec;

use crate::Point;

/// A drawing surface in the style of an HTML canvas path.
///
/// Segments draw themselves with [`ParamSegment::write_to_context`] assuming
/// the pen already sits at their start point, so a caller emits the initial
/// move itself.
///
/// Angles are in radians. `anticlockwise` arcs run toward decreasing angles.
///
/// [`ParamSegment::write_to_context`]: crate::ParamSegment::write_to_context
pub trait PathContext {
    /// Straight line from the pen to `end`.
    fn line_to(&mut self, end: Point);

    /// Quadratic Bézier from the pen.
    fn quadratic_curve_to(&mut self, control: Point, end: Point);

    /// Cubic Bézier from the pen.
    fn bezier_curve_to(&mut self, control1: Point, control2: Point, end: Point);

    /// Circular arc.
    fn arc(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    );

    /// Elliptical arc, `rotation` being the angle of the x radius.
    #[expect(clippy::too_many_arguments, reason = "mirrors the canvas ellipse call")]
    fn ellipse(
        &mut self,
        center: Point,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    );
}

/// One recorded drawing call.
#[derive(Clone, Copy, Debug, PartialEq)]
#[expect(missing_docs, reason = "variants mirror the PathContext methods")]
#[non_exhaustive]
pub enum PathCommand {
    LineTo(Point),
    QuadraticCurveTo(Point, Point),
    BezierCurveTo(Point, Point, Point),
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    },
    Ellipse {
        center: Point,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    },
}

/// Records calls in order.
impl PathContext for Vec<PathCommand> {
    fn line_to(&mut self, end: Point) {
        self.push(PathCommand::LineTo(end));
    }

    fn quadratic_curve_to(&mut self, control: Point, end: Point) {
        self.push(PathCommand::QuadraticCurveTo(control, end));
    }

    fn bezier_curve_to(&mut self, control1: Point, control2: Point, end: Point) {
        self.push(PathCommand::BezierCurveTo(control1, control2, end));
    }

    fn arc(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) {
        self.push(PathCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            anticlockwise,
        });
    }

    fn ellipse(
        &mut self,
        center: Point,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) {
        self.push(PathCommand::Ellipse {
            center,
            radius_x,
            radius_y,
            rotation,
            start_angle,
            end_angle,
            anticlockwise,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Arc, CubicBez, EllipticalArc, Line, ParamSegment, QuadBez, Segment};

    #[test]
    fn each_kind_draws_one_call() {
        let segments: Vec<Segment> = vec![
            Line::new((0.0, 0.0), (1.0, 0.0)).unwrap().into(),
            QuadBez::new((1.0, 0.0), (2.0, 1.0), (3.0, 0.0)).unwrap().into(),
            CubicBez::new((3.0, 0.0), (4.0, 1.0), (5.0, -1.0), (6.0, 0.0))
                .unwrap()
                .into(),
            Arc::new((7.0, 0.0), 1.0, 3.0, 0.0, true).unwrap().into(),
            EllipticalArc::new((10.0, 0.0), 2.0, 1.0, 0.0, 3.0, 0.0, true)
                .unwrap()
                .into(),
        ];
        let mut recorded: Vec<PathCommand> = Vec::new();
        for segment in &segments {
            segment.write_to_context(&mut recorded);
        }
        assert_eq!(recorded.len(), 5);
        assert_eq!(recorded[0], PathCommand::LineTo(Point::new(1.0, 0.0)));
        assert_eq!(
            recorded[1],
            PathCommand::QuadraticCurveTo(Point::new(2.0, 1.0), Point::new(3.0, 0.0))
        );
        assert!(matches!(recorded[2], PathCommand::BezierCurveTo(..)));
        assert_eq!(
            recorded[3],
            PathCommand::Arc {
                center: Point::new(7.0, 0.0),
                radius: 1.0,
                start_angle: 3.0,
                end_angle: 0.0,
                anticlockwise: true,
            }
        );
        assert!(matches!(
            recorded[4],
            PathCommand::Ellipse { radius_x, radius_y, .. } if radius_x == 2.0 && radius_y == 1.0
        ));
    }
}
