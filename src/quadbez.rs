// Copyright 2026 the Kurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadratic Bézier segments.

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::OnceCell;
use core::fmt;

use crate::common::{solve_quadratic, triangle_area_signed, unit_perpendicular};
use crate::error::check_point;
use crate::overlap::{bezier_overlap, Overlap};
use crate::param_segment::{
    bezier_curvature_at, interior_extrema, ExtremaTs, ParamSegment, Subdivided,
};
use crate::ray::hit_from_tangent;
use crate::serialize::SerializedQuadratic;
use crate::svg::svg_number;
use crate::{
    Affine, CubicBez, Line, PathContext, Point, Ray, RayIntersection, Rect, Segment, SegmentError,
    SerializedSegment, Vec2,
};

/// Pieces a quadratic is split into when approximating its offset.
const OFFSET_PIECES: usize = 32;

/// A single quadratic Bézier segment.
#[derive(Clone)]
pub struct QuadBez {
    start: Point,
    control: Point,
    end: Point,
    revision: u64,
    cache: OnceCell<QuadCache>,
}

#[derive(Clone, Debug)]
struct QuadCache {
    start_tangent: Vec2,
    end_tangent: Vec2,
    t_critical_x: f64,
    t_critical_y: f64,
    bounds: Rect,
}

/// The parameter where the derivative of the one-dimensional quadratic
/// `(start, control, end)` vanishes.
///
/// NaN when the quadratic is linear in that dimension.
pub fn extrema_t(start: f64, control: f64, end: f64) -> f64 {
    let divisor = start - 2.0 * control + end;
    if divisor == 0.0 {
        f64::NAN
    } else {
        (start - control) / divisor
    }
}

impl QuadBez {
    /// Create a new quadratic Bézier segment.
    ///
    /// # Errors
    ///
    /// Fails if a coordinate is not finite.
    pub fn new(
        start: impl Into<Point>,
        control: impl Into<Point>,
        end: impl Into<Point>,
    ) -> Result<QuadBez, SegmentError> {
        Ok(QuadBez::from_points(
            check_point(start.into(), "start")?,
            check_point(control.into(), "control")?,
            check_point(end.into(), "end")?,
        ))
    }

    #[inline]
    pub(crate) fn from_points(start: Point, control: Point, end: Point) -> QuadBez {
        QuadBez {
            start,
            control,
            end,
            revision: 0,
            cache: OnceCell::new(),
        }
    }

    /// The control point.
    #[inline]
    pub fn control(&self) -> Point {
        self.control
    }

    /// Move the start point.
    ///
    /// # Errors
    ///
    /// Fails if a coordinate is not finite.
    pub fn set_start(&mut self, start: impl Into<Point>) -> Result<&mut Self, SegmentError> {
        let start = check_point(start.into(), "start")?;
        if start != self.start {
            self.start = start;
            self.invalidate();
        }
        Ok(self)
    }

    /// Move the control point.
    ///
    /// # Errors
    ///
    /// Fails if a coordinate is not finite.
    pub fn set_control(&mut self, control: impl Into<Point>) -> Result<&mut Self, SegmentError> {
        let control = check_point(control.into(), "control")?;
        if control != self.control {
            self.control = control;
            self.invalidate();
        }
        Ok(self)
    }

    /// Move the end point.
    ///
    /// # Errors
    ///
    /// Fails if a coordinate is not finite.
    pub fn set_end(&mut self, end: impl Into<Point>) -> Result<&mut Self, SegmentError> {
        let end = check_point(end.into(), "end")?;
        if end != self.end {
            self.end = end;
            self.invalidate();
        }
        Ok(self)
    }

    /// Number of changes applied through the setters.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn invalidate(&mut self) {
        self.cache = OnceCell::new();
        self.revision += 1;
    }

    fn cache(&self) -> &QuadCache {
        self.cache.get_or_init(|| {
            let start_tangent = if self.control == self.start {
                self.end - self.start
            } else {
                self.control - self.start
            }
            .normalize();
            let end_tangent = if self.control == self.end {
                self.end - self.start
            } else {
                self.end - self.control
            }
            .normalize();
            let t_critical_x = extrema_t(self.start.x, self.control.x, self.end.x);
            let t_critical_y = extrema_t(self.start.y, self.control.y, self.end.y);
            let mut bounds = Rect::from_points(self.start, self.end);
            for t in [t_critical_x, t_critical_y] {
                // NaN fails both comparisons.
                if t > 0.0 && t < 1.0 {
                    bounds = bounds.union_pt(self.position_at(t));
                }
            }
            QuadCache {
                start_tangent,
                end_tangent,
                t_critical_x,
                t_critical_y,
                bounds,
            }
        })
    }

    /// Parameter of the vertical tangent, NaN if there is none.
    pub fn t_critical_x(&self) -> f64 {
        self.cache().t_critical_x
    }

    /// Parameter of the horizontal tangent, NaN if there is none.
    pub fn t_critical_y(&self) -> f64 {
        self.cache().t_critical_y
    }

    /// Raise the order by 1.
    ///
    /// Returns a cubic Bézier segment that exactly represents this quadratic.
    pub fn degree_elevated(&self) -> CubicBez {
        CubicBez::from_points(
            self.start,
            self.start + (2.0 / 3.0) * (self.control - self.start),
            self.end + (2.0 / 3.0) * (self.control - self.end),
            self.end,
        )
    }

    /// The linear reparametrization between two quadratics tracing the same
    /// curve, if they overlap.
    ///
    /// See [`Overlap`] for the direction of the mapping.
    pub fn overlaps(first: &QuadBez, second: &QuadBez, epsilon: f64) -> Option<Overlap> {
        bezier_overlap(
            &[first.start, first.control, first.end],
            &[second.start, second.control, second.end],
            epsilon,
        )
    }

    /// Offset a piece by moving each control point along its own normal.
    fn approximate_offset(&self, r: f64) -> QuadBez {
        QuadBez::from_points(
            self.start + self.start_tangent().perpendicular() * r,
            self.control + unit_perpendicular(self.tangent_at(0.5)) * r,
            self.end + self.end_tangent().perpendicular() * r,
        )
    }

    fn endpoint_polygon(&self, at_start: bool) -> [Point; 3] {
        if at_start {
            [self.start, self.control, self.end]
        } else {
            [self.end, self.control, self.start]
        }
    }
}

impl PartialEq for QuadBez {
    fn eq(&self, other: &QuadBez) -> bool {
        self.start == other.start && self.control == other.control && self.end == other.end
    }
}

impl fmt::Debug for QuadBez {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuadBez")
            .field("start", &self.start)
            .field("control", &self.control)
            .field("end", &self.end)
            .finish_non_exhaustive()
    }
}

impl ParamSegment for QuadBez {
    #[inline]
    fn start(&self) -> Point {
        self.start
    }

    #[inline]
    fn end(&self) -> Point {
        self.end
    }

    fn start_tangent(&self) -> Vec2 {
        self.cache().start_tangent
    }

    fn end_tangent(&self) -> Vec2 {
        self.cache().end_tangent
    }

    fn bounds(&self) -> Rect {
        self.cache().bounds
    }

    #[inline]
    fn position_at(&self, t: f64) -> Point {
        debug_assert!((0.0..=1.0).contains(&t), "t out of range: {t}");
        let mt = 1.0 - t;
        (self.start.to_vec2() * (mt * mt)
            + (self.control.to_vec2() * (mt * 2.0) + self.end.to_vec2() * t) * t)
            .to_point()
    }

    #[inline]
    fn tangent_at(&self, t: f64) -> Vec2 {
        debug_assert!((0.0..=1.0).contains(&t), "t out of range: {t}");
        (self.control - self.start) * (2.0 * (1.0 - t)) + (self.end - self.control) * (2.0 * t)
    }

    fn curvature_at(&self, t: f64) -> f64 {
        debug_assert!((0.0..=1.0).contains(&t), "t out of range: {t}");
        bezier_curvature_at(self, t, 2.0, QuadBez::endpoint_polygon)
    }

    /// Split at `t` with de Casteljau's algorithm.
    fn subdivided(&self, t: f64) -> Subdivided<Self> {
        debug_assert!((0.0..=1.0).contains(&t), "t out of range: {t}");
        let mut result = Subdivided::new();
        if t == 0.0 || t == 1.0 {
            result.push(self.clone());
        } else {
            let left = self.start.lerp(self.control, t);
            let right = self.control.lerp(self.end, t);
            let middle = left.lerp(right, t);
            result.push(QuadBez::from_points(self.start, left, middle));
            result.push(QuadBez::from_points(middle, right, self.end));
        }
        result
    }

    fn interior_extrema_ts(&self) -> ExtremaTs {
        interior_extrema([self.t_critical_x(), self.t_critical_y()])
    }

    fn intersection(&self, ray: &Ray) -> Vec<RayIntersection> {
        let origin = ray.origin();
        let dir = ray.direction();
        // Signed distances of the control points from the ray's line.
        let p0 = dir.cross(self.start - origin);
        let p1 = dir.cross(self.control - origin);
        let p2 = dir.cross(self.end - origin);
        let a = p0 - 2.0 * p1 + p2;
        let b = -2.0 * p0 + 2.0 * p1;
        let c = p0;
        if a == 0.0 && b == 0.0 && c == 0.0 {
            // Along the ray; no transversal crossing.
            return Vec::new();
        }
        solve_quadratic(c, b, a)
            .into_iter()
            .filter(|t| (0.0..=1.0).contains(t))
            .filter_map(|t| {
                let point = self.position_at(t);
                if (point - origin).dot(dir) <= 0.0 {
                    return None;
                }
                let mut tangent = self.tangent_at(t);
                if tangent.hypot2() == 0.0 {
                    tangent = self.end - self.start;
                }
                Some(hit_from_tangent(ray, point, tangent, t))
            })
            .collect()
    }

    fn signed_area_fragment(&self) -> f64 {
        let (p0, p1, p2) = (self.start, self.control, self.end);
        (p0.x * (2.0 * p1.y + p2.y) + 2.0 * p1.x * (p2.y - p0.y) - p2.x * (p0.y + 2.0 * p1.y))
            * (1.0 / 6.0)
    }

    fn nondegenerate_segments(&self) -> Vec<Segment> {
        let (start, control, end) = (self.start, self.control, self.end);
        if start == control && start == end {
            return Vec::new();
        }
        if start == end {
            // Out and back along a line.
            let middle = self.position_at(0.5);
            return vec![
                Line::from_points(start, middle).into(),
                Line::from_points(middle, end).into(),
            ];
        }
        if triangle_area_signed(start, control, end) == 0.0 {
            if control == start || control == end {
                return vec![Line::from_points(start, end).into()];
            }
            let direction = end - start;
            let t = extrema_t(0.0, (control - start).dot(direction), direction.hypot2());
            if t > 0.0 && t < 1.0 {
                let turn = self.position_at(t);
                return vec![
                    Line::from_points(start, turn).into(),
                    Line::from_points(turn, end).into(),
                ];
            }
            return vec![Line::from_points(start, end).into()];
        }
        vec![self.clone().into()]
    }

    fn reversed(&self) -> QuadBez {
        QuadBez::from_points(self.end, self.control, self.start)
    }

    fn transformed(&self, affine: Affine) -> Segment {
        QuadBez::from_points(affine * self.start, affine * self.control, affine * self.end).into()
    }

    fn write_to_context<C: PathContext + ?Sized>(&self, context: &mut C) {
        context.quadratic_curve_to(self.control, self.end);
    }

    fn svg_path_fragment(&self) -> String {
        format!(
            "Q {} {} {} {}",
            svg_number(self.control.x),
            svg_number(self.control.y),
            svg_number(self.end.x),
            svg_number(self.end.y)
        )
    }

    fn serialize(&self) -> SerializedSegment {
        SerializedSegment::Quadratic(SerializedQuadratic {
            start_x: self.start.x,
            start_y: self.start.y,
            control_x: self.control.x,
            control_y: self.control.y,
            end_x: self.end.x,
            end_y: self.end.y,
        })
    }

    fn offset_to(&self, r: f64, reverse: bool) -> Vec<Segment> {
        let ts: Vec<f64> = (1..OFFSET_PIECES)
            .map(|i| i as f64 / OFFSET_PIECES as f64)
            .collect();
        let mut pieces: Vec<QuadBez> = self
            .subdivisions(&ts)
            .iter()
            .map(|piece| piece.approximate_offset(r))
            .collect();
        if reverse {
            pieces.reverse();
            for piece in &mut pieces {
                *piece = piece.reversed();
            }
        }
        pieces.into_iter().map(Segment::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn assert_near(p0: Point, p1: Point, epsilon: f64) {
        assert!((p1 - p0).hypot() < epsilon, "{p0:?} != {p1:?}");
    }

    fn arch() -> QuadBez {
        QuadBez::new((0.0, 0.0), (5.0, 10.0), (10.0, 0.0)).unwrap()
    }

    #[test]
    fn apex_at_midpoint() {
        let q = arch();
        assert_eq!(q.t_critical_y(), 0.5);
        assert!(q.t_critical_x().is_nan());
        assert_eq!(q.position_at(0.5).y, 5.0);
        assert_eq!(q.bounds().y1, 5.0);
        assert_eq!(q.interior_extrema_ts().as_slice(), &[0.5]);
    }

    #[test]
    fn endpoints_and_tangents() {
        let q = QuadBez::new((1.0, 2.0), (4.0, -3.0), (7.0, 5.0)).unwrap();
        assert_near(q.position_at(0.0), q.start(), 1e-12);
        assert_near(q.position_at(1.0), q.end(), 1e-12);
        let t0 = q.tangent_at(0.0).normalize();
        let t1 = q.tangent_at(1.0).normalize();
        assert!((t0 - q.start_tangent()).hypot() < 1e-12);
        assert!((t1 - q.end_tangent()).hypot() < 1e-12);

        let flat_start = QuadBez::new((0.0, 0.0), (0.0, 0.0), (3.0, 4.0)).unwrap();
        assert!((flat_start.start_tangent() - Vec2::new(0.6, 0.8)).hypot() < 1e-12);
    }

    #[test]
    fn subdivision_reproduces() {
        let q = QuadBez::new((1.0, 2.0), (4.0, -3.0), (7.0, 5.0)).unwrap();
        let t = 0.3;
        let halves = q.subdivided(t);
        for i in 0..=20 {
            let s = f64::from(i) / 20.0;
            let expected = q.position_at(s);
            let actual = if s <= t {
                halves[0].position_at(s / t)
            } else {
                halves[1].position_at((s - t) / (1.0 - t))
            };
            assert_near(actual, expected, 1e-9);
        }
    }

    #[test]
    fn bounds_contain_samples() {
        let mut rng = StdRng::seed_from_u64(7);
        let q = QuadBez::new((1.0, 2.0), (14.0, -9.0), (-3.0, 5.0)).unwrap();
        let bounds = q.bounds().inflate(1e-9);
        for _ in 0..1000 {
            let t: f64 = rng.random();
            assert!(bounds.contains(q.position_at(t)));
        }
    }

    #[test]
    fn reversal() {
        let q = arch();
        assert_eq!(q.reversed().reversed(), q);
        for i in 0..=10 {
            let t = f64::from(i) / 10.0;
            assert_near(q.reversed().position_at(t), q.position_at(1.0 - t), 1e-12);
        }
    }

    #[test]
    fn arc_length_adds_up() {
        let q = arch();
        let whole = q.arc_length();
        let parts: f64 = q.subdivided(0.4).iter().map(|p| p.arc_length()).sum();
        assert!((whole - parts).abs() < 1e-6);
        assert!(whole > 10.0 && whole < 20.0);
    }

    #[test]
    fn curvature() {
        let q = arch();
        // Turning clockwise on a y-up chart.
        assert!(q.curvature_at(0.0) < 0.0);
        assert!(q.curvature_at(0.5) < 0.0);
        // Symmetric arch: the ends agree.
        assert!((q.curvature_at(0.0) - q.curvature_at(1.0)).abs() < 1e-12);
        // At the apex the radius of curvature is |B'|³ / |B' × B''|.
        let expected = -(10.0f64.powi(3)) / (10.0 * 40.0);
        assert!((1.0 / q.curvature_at(0.5) - expected).abs() < 1e-9);
    }

    #[test]
    fn nondegenerate() {
        let point = QuadBez::new((1.0, 1.0), (1.0, 1.0), (1.0, 1.0)).unwrap();
        assert!(point.nondegenerate_segments().is_empty());

        let loop_back = QuadBez::new((0.0, 0.0), (10.0, 0.0), (0.0, 0.0)).unwrap();
        let lines = loop_back.nondegenerate_segments();
        assert_eq!(lines.len(), 2);
        assert_near(lines[0].end(), Point::new(5.0, 0.0), 1e-12);

        let overshoot = QuadBez::new((0.0, 0.0), (20.0, 0.0), (10.0, 0.0)).unwrap();
        let lines = overshoot.nondegenerate_segments();
        assert_eq!(lines.len(), 2);
        assert!(matches!(lines[0], Segment::Line(_)));
        assert!(lines[0].end().x > 10.0);

        let straight = QuadBez::new((0.0, 0.0), (5.0, 0.0), (10.0, 0.0)).unwrap();
        assert_eq!(straight.nondegenerate_segments().len(), 1);
        assert!(matches!(
            straight.nondegenerate_segments()[0],
            Segment::Line(_)
        ));

        assert!(matches!(
            arch().nondegenerate_segments()[..],
            [Segment::Quadratic(_)]
        ));
    }

    #[test]
    fn ray_hits() {
        let q = arch();
        let ray = Ray::new((-5.0, 2.0), (1.0, 0.0)).unwrap();
        let hits = q.intersection(&ray);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits.iter().map(|h| h.wind).sum::<i32>(), 0);
        for hit in &hits {
            assert!((hit.point.y - 2.0).abs() < 1e-9);
            assert_near(q.position_at(hit.t), hit.point, 1e-9);
        }

        let up = Ray::new((5.0, -1.0), (0.0, 1.0)).unwrap();
        assert_eq!(q.intersection(&up).len(), 1);
        let away = Ray::new((5.0, -1.0), (0.0, -1.0)).unwrap();
        assert!(q.intersection(&away).is_empty());
    }

    #[test]
    fn elevation() {
        let q = QuadBez::new((1.0, 2.0), (4.0, -3.0), (7.0, 5.0)).unwrap();
        let c = q.degree_elevated();
        for i in 0..=10 {
            let t = f64::from(i) / 10.0;
            assert_near(c.position_at(t), q.position_at(t), 1e-12);
        }
    }

    #[test]
    fn signed_area() {
        // Parabolic segment area is 2/3 of the bounding triangle's base times height.
        let q = QuadBez::new((10.0, 0.0), (5.0, 10.0), (0.0, 0.0)).unwrap();
        let closing = Line::new((0.0, 0.0), (10.0, 0.0)).unwrap();
        let area = q.signed_area_fragment() + closing.signed_area_fragment();
        assert!((area - 2.0 / 3.0 * 10.0 * 5.0).abs() < 1e-9);
    }

    #[test]
    fn offset() {
        let q = arch();
        let offset = q.offset_to(1.0, false);
        assert_eq!(offset.len(), OFFSET_PIECES);
        assert_near(offset[0].start(), q.start() + q.start_tangent().perpendicular(), 1e-12);
        let reversed = q.offset_to(1.0, true);
        assert_near(reversed[0].start(), offset[OFFSET_PIECES - 1].end(), 1e-12);
        for pair in offset.windows(2) {
            assert_near(pair[0].end(), pair[1].start(), 1e-9);
        }
    }

    #[test]
    fn overlap_with_subcurve() {
        let q = QuadBez::new((1.0, 2.0), (4.0, -3.0), (7.0, 5.0)).unwrap();
        let piece = q.subdivisions(&[0.25, 0.75]).swap_remove(1);
        let overlap = QuadBez::overlaps(&q, &piece, 1e-6).unwrap();
        assert!((overlap.a - 0.5).abs() < 1e-9);
        assert!((overlap.b - 0.25).abs() < 1e-9);
        let backwards = QuadBez::overlaps(&q, &piece.reversed(), 1e-6).unwrap();
        assert!((backwards.a + 0.5).abs() < 1e-9);
        assert!((backwards.b - 0.75).abs() < 1e-9);
        assert!(QuadBez::overlaps(&q, &arch(), 1e-6).is_none());
    }

    #[test]
    fn setters_invalidate() {
        let mut q = arch();
        assert_eq!(q.t_critical_y(), 0.5);
        q.set_control((5.0, 10.0)).unwrap();
        assert_eq!(q.revision(), 0);
        q.set_end((0.0, 0.0)).unwrap();
        assert_eq!(q.revision(), 1);
        assert_eq!(q.bounds().x1, 2.5);
        assert!(q.set_control((0.0, f64::INFINITY)).is_err());
    }
}
