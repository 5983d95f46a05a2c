// Copyright 2026 the Kurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounding boxes.

use core::fmt;

use crate::Point;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// An axis-aligned rectangle, used for segment bounds.
#[derive(Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// The minimum x coordinate (left edge).
    pub x0: f64,
    /// The minimum y coordinate (top edge in y-down spaces).
    pub y0: f64,
    /// The maximum x coordinate (right edge).
    pub x1: f64,
    /// The maximum y coordinate (bottom edge in y-down spaces).
    pub y1: f64,
}

impl Rect {
    /// The empty rectangle, which is the identity for [`Rect::union`].
    pub const NOTHING: Rect = Rect::new(
        f64::INFINITY,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NEG_INFINITY,
    );

    /// A new rectangle from minimum and maximum coordinates.
    #[inline(always)]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect { x0, y0, x1, y1 }
    }

    /// A new rectangle from two points.
    ///
    /// The result will have non-negative width and height.
    #[inline]
    pub fn from_points(p0: impl Into<Point>, p1: impl Into<Point>) -> Rect {
        let p0 = p0.into();
        let p1 = p1.into();
        Rect::new(p0.x, p0.y, p1.x, p1.y).abs()
    }

    /// The smallest rectangle containing every point of the iterator.
    ///
    /// An empty iterator gives [`Rect::NOTHING`].
    pub fn from_point_iter(points: impl IntoIterator<Item = Point>) -> Rect {
        points.into_iter().fold(Rect::NOTHING, Rect::union_pt)
    }

    /// The width of the rectangle.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// The height of the rectangle.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// The center point of the rectangle.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(0.5 * (self.x0 + self.x1), 0.5 * (self.y0 + self.y1))
    }

    /// Take absolute value of width and height.
    #[inline]
    pub fn abs(&self) -> Rect {
        let Rect { x0, y0, x1, y1 } = *self;
        Rect::new(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
    }

    /// Whether this rectangle contains no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.x0 <= self.x1 && self.y0 <= self.y1)
    }

    /// Returns `true` if `point` lies within `self`, edges included.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x0 && point.x <= self.x1 && point.y >= self.y0 && point.y <= self.y1
    }

    /// The smallest rectangle enclosing two rectangles.
    #[inline]
    pub fn union(&self, other: Rect) -> Rect {
        Rect::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    /// Compute the union with one point.
    #[inline]
    pub fn union_pt(self, pt: Point) -> Rect {
        Rect::new(
            self.x0.min(pt.x),
            self.y0.min(pt.y),
            self.x1.max(pt.x),
            self.y1.max(pt.y),
        )
    }

    /// Grow the rectangle by `amount` on every side.
    #[inline]
    pub fn inflate(&self, amount: f64) -> Rect {
        Rect::new(
            self.x0 - amount,
            self.y0 - amount,
            self.x1 + amount,
            self.y1 + amount,
        )
    }

    /// Whether the two closed rectangles share at least one point.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x0 <= other.x1 && other.x0 <= self.x1 && self.y0 <= other.y1 && other.y0 <= self.y1
    }

    /// Squared distance from `point` to the nearest point of the rectangle.
    ///
    /// Zero for points inside.
    pub fn min_distance_squared_to(&self, point: Point) -> f64 {
        let dx = (self.x0 - point.x).max(0.0).max(point.x - self.x1);
        let dy = (self.y0 - point.y).max(0.0).max(point.y - self.y1);
        dx * dx + dy * dy
    }

    /// Squared distance from `point` to the farthest corner of the rectangle.
    pub fn max_distance_squared_to(&self, point: Point) -> f64 {
        let dx = (point.x - self.x0).abs().max((point.x - self.x1).abs());
        let dy = (point.y - self.y0).abs().max((point.y - self.y1).abs());
        dx * dx + dy * dy
    }

    /// The larger of width and height.
    #[inline]
    pub(crate) fn max_extent(&self) -> f64 {
        self.width().max(self.height())
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect {{ ({:?}, {:?}) - ({:?}, {:?}) }}",
            self.x0, self.y0, self.x1, self.y1
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::{Point, Rect};

    #[test]
    fn union_and_contains() {
        let r = Rect::from_point_iter([Point::new(3., 1.), Point::new(-1., 4.)]);
        assert_eq!(r, Rect::new(-1., 1., 3., 4.));
        assert!(r.contains(Point::new(0., 2.)));
        assert!(r.contains(Point::new(3., 4.)));
        assert!(!r.contains(Point::new(3.5, 4.)));
        assert!(Rect::from_point_iter([]).is_empty());
    }

    #[test]
    fn distance_bounds() {
        let r = Rect::new(0., 0., 10., 10.);
        assert_eq!(r.min_distance_squared_to(Point::new(5., 5.)), 0.);
        assert_eq!(r.min_distance_squared_to(Point::new(13., 14.)), 25.);
        assert_eq!(r.max_distance_squared_to(Point::new(5., 5.)), 50.);
        assert_eq!(r.max_distance_squared_to(Point::new(-3., 0.)), 269.);
    }

    #[test]
    fn intersects() {
        let r = Rect::new(0., 0., 10., 10.);
        assert!(r.intersects(&Rect::new(10., 10., 12., 12.)));
        assert!(!r.intersects(&Rect::new(10.5, 0., 12., 12.)));
    }
}
