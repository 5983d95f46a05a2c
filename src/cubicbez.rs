// Copyright 2026 the Kurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments.

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::OnceCell;
use core::fmt;

use arrayvec::ArrayVec;
use smallvec::SmallVec;

use crate::common::{solve_cubic, solve_quadratic, triangle_area_signed, unit_perpendicular};
use crate::epsilon::{distance, parametric};
use crate::error::check_point;
use crate::intersection::bounds_intersections;
use crate::overlap::{bezier_overlap, Overlap};
use crate::param_segment::{
    bezier_curvature_at, interior_extrema, ExtremaTs, ParamSegment, Subdivided,
};
use crate::ray::hit_from_tangent;
use crate::serialize::SerializedCubic;
use crate::svg::svg_number;
use crate::{
    Affine, Line, PathContext, Point, QuadBez, Ray, RayIntersection, Rect, Segment, SegmentError,
    SegmentIntersection, SerializedSegment, Vec2,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Points sampled along a cubic when approximating its offset.
const OFFSET_SAMPLES: usize = 32;

/// A single cubic Bézier segment.
#[derive(Clone)]
pub struct CubicBez {
    start: Point,
    control1: Point,
    control2: Point,
    end: Point,
    revision: u64,
    frame: OnceCell<CubicFrame>,
    cusp: OnceCell<CuspInfo>,
}

#[derive(Clone, Debug)]
struct CubicFrame {
    start_tangent: Vec2,
    end_tangent: Vec2,
    r: Vec2,
    s: Vec2,
    x_extrema_t: ArrayVec<f64, 2>,
    y_extrema_t: ArrayVec<f64, 2>,
    bounds: Rect,
}

#[derive(Clone, Debug)]
struct CuspInfo {
    t_cusp: f64,
    t_determinant: f64,
    t_inflection1: f64,
    t_inflection2: f64,
    has_cusp: bool,
    quadratics: ArrayVec<QuadBez, 2>,
}

/// Coefficients `(a, b, c)` of `a t³ + b t² + c t + start`.
fn power_coefficients(s: Point, c1: Point, c2: Point, e: Point) -> (Vec2, Vec2, Vec2) {
    let (s, c1, c2, e) = (s.to_vec2(), c1.to_vec2(), c2.to_vec2(), e.to_vec2());
    let a = -s + c1 * 3.0 - c2 * 3.0 + e;
    let b = s * 3.0 - c1 * 6.0 + c2 * 3.0;
    let c = -s * 3.0 + c1 * 3.0;
    (a, b, c)
}

/// Roots in `[0, 1]` of one coordinate of the derivative.
fn derivative_roots(a: f64, b: f64, c: f64) -> ArrayVec<f64, 2> {
    solve_quadratic(c, 2.0 * b, 3.0 * a)
        .into_iter()
        .filter(|t| (0.0..=1.0).contains(t))
        .collect()
}

impl CubicBez {
    /// Create a new cubic Bézier segment.
    ///
    /// # Errors
    ///
    /// Fails if a coordinate is not finite.
    pub fn new(
        start: impl Into<Point>,
        control1: impl Into<Point>,
        control2: impl Into<Point>,
        end: impl Into<Point>,
    ) -> Result<CubicBez, SegmentError> {
        Ok(CubicBez::from_points(
            check_point(start.into(), "start")?,
            check_point(control1.into(), "control1")?,
            check_point(control2.into(), "control2")?,
            check_point(end.into(), "end")?,
        ))
    }

    #[inline]
    pub(crate) fn from_points(start: Point, control1: Point, control2: Point, end: Point) -> Self {
        CubicBez {
            start,
            control1,
            control2,
            end,
            revision: 0,
            frame: OnceCell::new(),
            cusp: OnceCell::new(),
        }
    }

    /// The first control point.
    #[inline]
    pub fn control1(&self) -> Point {
        self.control1
    }

    /// The second control point.
    #[inline]
    pub fn control2(&self) -> Point {
        self.control2
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

    /// Move the first control point.
    ///
    /// # Errors
    ///
    /// Fails if a coordinate is not finite.
    pub fn set_control1(&mut self, control1: impl Into<Point>) -> Result<&mut Self, SegmentError> {
        let control1 = check_point(control1.into(), "control1")?;
        if control1 != self.control1 {
            self.control1 = control1;
            self.invalidate();
        }
        Ok(self)
    }

    /// Move the second control point.
    ///
    /// # Errors
    ///
    /// Fails if a coordinate is not finite.
    pub fn set_control2(&mut self, control2: impl Into<Point>) -> Result<&mut Self, SegmentError> {
        let control2 = check_point(control2.into(), "control2")?;
        if control2 != self.control2 {
            self.control2 = control2;
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
        self.frame = OnceCell::new();
        self.cusp = OnceCell::new();
        self.revision += 1;
    }

    fn frame(&self) -> &CubicFrame {
        self.frame.get_or_init(|| {
            let (s, c1, c2, e) = (self.start, self.control1, self.control2, self.end);
            let start_tangent = if s != c1 {
                c1 - s
            } else if s != c2 {
                c2 - s
            } else {
                e - s
            }
            .normalize();
            let end_tangent = if e != c2 {
                e - c2
            } else if e != c1 {
                e - c1
            } else {
                e - s
            }
            .normalize();

            let (a, b, c) = power_coefficients(s, c1, c2, e);
            let x_extrema_t = derivative_roots(a.x, b.x, c.x);
            let y_extrema_t = derivative_roots(a.y, b.y, c.y);
            let bounds = x_extrema_t
                .iter()
                .chain(&y_extrema_t)
                .fold(Rect::from_points(s, e), |bounds, &t| {
                    bounds.union_pt(self.position_at(t))
                });
            CubicFrame {
                start_tangent,
                end_tangent,
                r: start_tangent,
                s: start_tangent.perpendicular(),
                x_extrema_t,
                y_extrema_t,
                bounds,
            }
        })
    }

    fn cusp_info(&self) -> &CuspInfo {
        self.cusp.get_or_init(|| {
            let (a, b, c) = power_coefficients(self.start, self.control1, self.control2, self.end);
            let a_perp = a.perpendicular();
            let b_perp = b.perpendicular();
            let a_perp_dot_b = a_perp.dot(b);

            let mut t_cusp = -0.5 * (a_perp.dot(c) / a_perp_dot_b);
            let mut t_determinant = t_cusp * t_cusp - (1.0 / 3.0) * (b_perp.dot(c) / a_perp_dot_b);
            if !t_cusp.is_finite() {
                // Collinear control polygon: look for a vanishing tangent directly.
                t_determinant = f64::NAN;
                t_cusp = derivative_roots(a.x, b.x, c.x)
                    .into_iter()
                    .chain(derivative_roots(a.y, b.y, c.y))
                    .filter(|&t| self.tangent_at(t).hypot() < distance::CUSP_TANGENT)
                    .fold(f64::NAN, f64::min);
                if t_cusp.is_finite() {
                    log::debug!("cusp of collinear cubic found at t = {t_cusp}");
                }
            }
            let (t_inflection1, t_inflection2) = if t_determinant >= 0.0 {
                let root = t_determinant.sqrt();
                (t_cusp - root, t_cusp + root)
            } else {
                (f64::NAN, f64::NAN)
            };

            let has_cusp = (0.0..=1.0).contains(&t_cusp)
                && self.tangent_at(t_cusp).hypot() < distance::CUSP_TANGENT;
            let mut quadratics = ArrayVec::new();
            if has_cusp {
                if t_cusp == 0.0 {
                    quadratics.push(QuadBez::from_points(self.start, self.control2, self.end));
                } else if t_cusp == 1.0 {
                    quadratics.push(QuadBez::from_points(self.start, self.control1, self.end));
                } else {
                    let halves = self.subdivided(t_cusp);
                    let (first, second) = (&halves[0], &halves[1]);
                    quadratics.push(QuadBez::from_points(first.start, first.control1, first.end));
                    quadratics.push(QuadBez::from_points(
                        second.start,
                        second.control2,
                        second.end,
                    ));
                }
            }
            CuspInfo {
                t_cusp,
                t_determinant,
                t_inflection1,
                t_inflection2,
                has_cusp,
                quadratics,
            }
        })
    }

    /// Unit vector along the start of the curve.
    pub fn r(&self) -> Vec2 {
        self.frame().r
    }

    /// Unit vector perpendicular to [`CubicBez::r`].
    pub fn s(&self) -> Vec2 {
        self.frame().s
    }

    /// Parameter of the cusp candidate; where inflections are centered.
    ///
    /// NaN when the curve has neither.
    pub fn t_cusp(&self) -> f64 {
        self.cusp_info().t_cusp
    }

    /// Discriminant of the inflection equation; inflections exist when it
    /// is non-negative.
    pub fn t_determinant(&self) -> f64 {
        self.cusp_info().t_determinant
    }

    /// The first inflection parameter, NaN if there is none.
    pub fn t_inflection1(&self) -> f64 {
        self.cusp_info().t_inflection1
    }

    /// The second inflection parameter, NaN if there is none.
    pub fn t_inflection2(&self) -> f64 {
        self.cusp_info().t_inflection2
    }

    /// Whether the tangent vanishes at a parameter inside `[0, 1]`.
    pub fn has_cusp(&self) -> bool {
        self.cusp_info().has_cusp
    }

    /// The quadratics either side of the cusp; empty without a cusp.
    pub fn quadratics(&self) -> &[QuadBez] {
        &self.cusp_info().quadratics
    }

    /// Parameters in `[0, 1]` where the x derivative vanishes.
    pub fn x_extrema_t(&self) -> &[f64] {
        &self.frame().x_extrema_t
    }

    /// Parameters in `[0, 1]` where the y derivative vanishes.
    pub fn y_extrema_t(&self) -> &[f64] {
        &self.frame().y_extrema_t
    }

    /// The quadratic this cubic is an elevation of, if the two control
    /// points agree on it within `epsilon`.
    ///
    /// With an `epsilon` of zero this is an exactness test.
    pub fn degree_reduced(&self, epsilon: f64) -> Option<QuadBez> {
        let from_control1 = (self.control1.to_vec2() * 3.0 - self.start.to_vec2()) / 2.0;
        let from_control2 = (self.control2.to_vec2() * 3.0 - self.end.to_vec2()) / 2.0;
        ((from_control1 - from_control2).hypot() <= epsilon).then(|| {
            QuadBez::from_points(
                self.start,
                from_control1.lerp(from_control2, 0.5).to_point(),
                self.end,
            )
        })
    }

    /// Where the curve crosses itself, if it does.
    ///
    /// `a_t` and `b_t` of the result are the two parameters of the crossing.
    pub fn self_intersection(&self) -> Option<SegmentIntersection> {
        let extrema = self.interior_extrema_ts();
        if extrema.len() < 2 {
            // Fewer than three monotone pieces cannot loop.
            return None;
        }
        let mut boundaries: Vec<f64> = Vec::with_capacity(extrema.len() + 2);
        boundaries.push(0.0);
        boundaries.extend_from_slice(&extrema);
        boundaries.push(1.0);
        let pieces = self.subdivisions(&extrema);

        let interior =
            |t: f64| t > parametric::SELF_INTERSECTION && t < 1.0 - parametric::SELF_INTERSECTION;
        for i in 0..pieces.len() {
            for j in i + 1..pieces.len() {
                let hit = bounds_intersections(&pieces[i], &pieces[j])
                    .into_iter()
                    .find(|hit| interior(hit.a_t) && interior(hit.b_t));
                if let Some(hit) = hit {
                    let remap = |k: usize, t: f64| {
                        boundaries[k] + (boundaries[k + 1] - boundaries[k]) * t
                    };
                    return Some(SegmentIntersection {
                        point: hit.point,
                        a_t: remap(i, hit.a_t),
                        b_t: remap(j, hit.b_t),
                    });
                }
            }
        }
        None
    }

    /// The linear reparametrization between two cubics tracing the same
    /// curve, if they overlap.
    ///
    /// See [`Overlap`] for the direction of the mapping.
    pub fn overlaps(first: &CubicBez, second: &CubicBez, epsilon: f64) -> Option<Overlap> {
        bezier_overlap(&first.control_points(), &second.control_points(), epsilon)
    }

    #[inline]
    pub(crate) fn control_points(&self) -> [Point; 4] {
        [self.start, self.control1, self.control2, self.end]
    }

    fn endpoint_polygon(&self, at_start: bool) -> [Point; 3] {
        if at_start {
            [self.start, self.control1, self.control2]
        } else {
            [self.end, self.control2, self.control1]
        }
    }

    /// Lines through the extrema of a cubic whose points are all collinear.
    fn collinear_lines(&self) -> Vec<Segment> {
        let mut ts: Vec<f64> = self.interior_extrema_ts().into_iter().collect();
        ts.push(1.0);
        let mut lines = Vec::with_capacity(ts.len());
        let mut previous = self.start;
        for t in ts {
            let point = if t == 1.0 { self.end } else { self.position_at(t) };
            if point != previous {
                lines.push(Line::from_points(previous, point).into());
            }
            previous = point;
        }
        lines
    }
}

impl PartialEq for CubicBez {
    fn eq(&self, other: &CubicBez) -> bool {
        self.control_points() == other.control_points()
    }
}

impl fmt::Debug for CubicBez {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CubicBez")
            .field("start", &self.start)
            .field("control1", &self.control1)
            .field("control2", &self.control2)
            .field("end", &self.end)
            .finish_non_exhaustive()
    }
}

impl ParamSegment for CubicBez {
    #[inline]
    fn start(&self) -> Point {
        self.start
    }

    #[inline]
    fn end(&self) -> Point {
        self.end
    }

    fn start_tangent(&self) -> Vec2 {
        self.frame().start_tangent
    }

    fn end_tangent(&self) -> Vec2 {
        self.frame().end_tangent
    }

    fn bounds(&self) -> Rect {
        self.frame().bounds
    }

    #[inline]
    fn position_at(&self, t: f64) -> Point {
        debug_assert!((0.0..=1.0).contains(&t), "t out of range: {t}");
        let mt = 1.0 - t;
        let v = self.start.to_vec2() * (mt * mt * mt)
            + (self.control1.to_vec2() * (mt * mt * 3.0)
                + (self.control2.to_vec2() * (mt * 3.0) + self.end.to_vec2() * t) * t)
                * t;
        v.to_point()
    }

    #[inline]
    fn tangent_at(&self, t: f64) -> Vec2 {
        debug_assert!((0.0..=1.0).contains(&t), "t out of range: {t}");
        let mt = 1.0 - t;
        (self.control1 - self.start) * (3.0 * mt * mt)
            + (self.control2 - self.control1) * (6.0 * mt * t)
            + (self.end - self.control2) * (3.0 * t * t)
    }

    fn curvature_at(&self, t: f64) -> f64 {
        debug_assert!((0.0..=1.0).contains(&t), "t out of range: {t}");
        bezier_curvature_at(self, t, 3.0, CubicBez::endpoint_polygon)
    }

    /// Split at `t` with de Casteljau's algorithm.
    fn subdivided(&self, t: f64) -> Subdivided<Self> {
        debug_assert!((0.0..=1.0).contains(&t), "t out of range: {t}");
        let mut result = Subdivided::new();
        if t == 0.0 || t == 1.0 {
            result.push(self.clone());
        } else {
            let p01 = self.start.lerp(self.control1, t);
            let p12 = self.control1.lerp(self.control2, t);
            let p23 = self.control2.lerp(self.end, t);
            let p012 = p01.lerp(p12, t);
            let p123 = p12.lerp(p23, t);
            let middle = p012.lerp(p123, t);
            result.push(CubicBez::from_points(self.start, p01, p012, middle));
            result.push(CubicBez::from_points(middle, p123, p23, self.end));
        }
        result
    }

    fn interior_extrema_ts(&self) -> ExtremaTs {
        let frame = self.frame();
        interior_extrema(frame.x_extrema_t.iter().chain(&frame.y_extrema_t).copied())
    }

    fn intersection(&self, ray: &Ray) -> Vec<RayIntersection> {
        let origin = ray.origin();
        let dir = ray.direction();
        let [y0, y1, y2, y3] = self.control_points().map(|p| dir.cross(p - origin));
        let a = -y0 + 3.0 * y1 - 3.0 * y2 + y3;
        let b = 3.0 * y0 - 6.0 * y1 + 3.0 * y2;
        let c = -3.0 * y0 + 3.0 * y1;
        let d = y0;
        if a == 0.0 && b == 0.0 && c == 0.0 && d == 0.0 {
            return Vec::new();
        }
        let mut ts: SmallVec<[f64; 3]> = solve_cubic(d, c, b, a)
            .into_iter()
            .filter(|t| (0.0..=1.0).contains(t))
            .collect();
        ts.sort_by(f64::total_cmp);
        ts.dedup_by(|t0, t1| (*t0 - *t1).abs() < parametric::EXTREMA);
        ts.into_iter()
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
        let [p0, p1, p2, p3] = self.control_points();
        (p0.x * (6.0 * p1.y + 3.0 * p2.y + p3.y)
            + 3.0 * (p1.x * (-2.0 * p0.y + p2.y + p3.y) - p2.x * (p0.y + p1.y - 2.0 * p3.y))
            - p3.x * (p0.y + 3.0 * p1.y + 6.0 * p2.y))
            * (1.0 / 20.0)
    }

    fn nondegenerate_segments(&self) -> Vec<Segment> {
        let [s, c1, c2, e] = self.control_points();
        if s == c1 && s == c2 && s == e {
            return Vec::new();
        }
        if self.has_cusp() {
            return self
                .quadratics()
                .iter()
                .flat_map(|q| q.nondegenerate_segments())
                .collect();
        }
        if let Some(quadratic) = self.degree_reduced(distance::DEGREE_REDUCTION) {
            return quadratic.nondegenerate_segments();
        }
        if triangle_area_signed(s, c1, e) == 0.0
            && triangle_area_signed(s, c2, e) == 0.0
            && !s.approx_eq(e, distance::COLLINEAR_ENDPOINTS)
        {
            return self.collinear_lines();
        }
        vec![self.clone().into()]
    }

    fn reversed(&self) -> CubicBez {
        CubicBez::from_points(self.end, self.control2, self.control1, self.start)
    }

    fn transformed(&self, affine: Affine) -> Segment {
        let [s, c1, c2, e] = self.control_points().map(|p| affine * p);
        CubicBez::from_points(s, c1, c2, e).into()
    }

    fn write_to_context<C: PathContext + ?Sized>(&self, context: &mut C) {
        context.bezier_curve_to(self.control1, self.control2, self.end);
    }

    fn svg_path_fragment(&self) -> String {
        format!(
            "C {} {} {} {} {} {}",
            svg_number(self.control1.x),
            svg_number(self.control1.y),
            svg_number(self.control2.x),
            svg_number(self.control2.y),
            svg_number(self.end.x),
            svg_number(self.end.y)
        )
    }

    fn serialize(&self) -> SerializedSegment {
        SerializedSegment::Cubic(SerializedCubic {
            start_x: self.start.x,
            start_y: self.start.y,
            control1_x: self.control1.x,
            control1_y: self.control1.y,
            control2_x: self.control2.x,
            control2_y: self.control2.y,
            end_x: self.end.x,
            end_y: self.end.y,
        })
    }

    /// Offset as a polyline through evenly spaced samples.
    fn offset_to(&self, r: f64, reverse: bool) -> Vec<Segment> {
        let last = OFFSET_SAMPLES - 1;
        let mut points: Vec<Point> = (0..OFFSET_SAMPLES)
            .map(|i| {
                let normal = if i == 0 {
                    self.start_tangent().perpendicular()
                } else if i == last {
                    self.end_tangent().perpendicular()
                } else {
                    unit_perpendicular(self.tangent_at(i as f64 / last as f64))
                };
                let t = i as f64 / last as f64;
                self.position_at(t) + normal * r
            })
            .collect();
        if reverse {
            points.reverse();
        }
        points
            .windows(2)
            .map(|pair| Line::from_points(pair[0], pair[1]).into())
            .collect()
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

    fn cubic(points: [(f64, f64); 4]) -> CubicBez {
        CubicBez::new(points[0], points[1], points[2], points[3]).unwrap()
    }

    fn arch() -> CubicBez {
        cubic([(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)])
    }

    #[test]
    fn smooth_arch() {
        let c = arch();
        assert!(!c.has_cusp());
        assert!(c.quadratics().is_empty());
        assert_eq!(c.t_cusp(), 0.5);
        let segments = c.nondegenerate_segments();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0], Segment::Cubic(c.clone()));
    }

    #[test]
    fn cusp_with_loop() {
        let c = cubic([(0.0, 0.0), (10.0, 0.0), (-10.0, 0.0), (0.0, 0.0)]);
        assert!(c.has_cusp());
        assert!(c.t_cusp() > 0.0 && c.t_cusp() < 1.0);
        assert_eq!(c.quadratics().len(), 2);
        let pieces = c.nondegenerate_segments();
        assert!(!pieces.is_empty());
        assert!(pieces.iter().all(|p| matches!(p, Segment::Line(_))));
    }

    #[test]
    fn planar_cusp() {
        // Symmetric cubic whose tangent vanishes at t = 0.5.
        let c = cubic([(0.0, 0.0), (10.0, 10.0), (0.0, 10.0), (10.0, 0.0)]);
        assert!(c.has_cusp());
        assert!((c.t_cusp() - 0.5).abs() < 1e-12);
        let [q0, q1] = c.quadratics() else {
            panic!("expected two quadratics");
        };
        assert_near(q0.end(), c.position_at(0.5), 1e-12);
        assert_near(q1.start(), c.position_at(0.5), 1e-12);
    }

    #[test]
    fn inflections() {
        let s_curve = cubic([(0.0, 0.0), (10.0, 10.0), (5.0, -10.0), (20.0, 0.0)]);
        assert!(s_curve.t_determinant() > 0.0);
        assert!(s_curve.t_inflection1() < 0.0);
        let t = s_curve.t_inflection2();
        assert!(t > 0.0 && t < 1.0);
        assert!(s_curve.curvature_at(t).abs() < 1e-9);
        assert!(s_curve.curvature_at(0.2) * s_curve.curvature_at(0.8) < 0.0);
        assert!(arch().t_inflection1().is_nan());
    }

    #[test]
    fn endpoints_tangents_subdivision() {
        let c = cubic([(1.0, 2.0), (4.0, -3.0), (9.0, 8.0), (7.0, 5.0)]);
        assert_near(c.position_at(0.0), c.start(), 1e-12);
        assert_near(c.position_at(1.0), c.end(), 1e-12);
        assert!((c.tangent_at(0.0).normalize() - c.start_tangent()).hypot() < 1e-12);
        assert!((c.tangent_at(1.0).normalize() - c.end_tangent()).hypot() < 1e-12);

        let t = 0.65;
        let halves = c.subdivided(t);
        for i in 0..=20 {
            let s = f64::from(i) / 20.0;
            let actual = if s <= t {
                halves[0].position_at(s / t)
            } else {
                halves[1].position_at((s - t) / (1.0 - t))
            };
            assert_near(actual, c.position_at(s), 1e-9);
        }
    }

    #[test]
    fn bounds_contain_samples() {
        let mut rng = StdRng::seed_from_u64(11);
        let c = cubic([(0.0, 0.0), (300.0, 200.0), (-200.0, 200.0), (100.0, 0.0)]);
        let bounds = c.bounds().inflate(1e-9);
        for _ in 0..1000 {
            assert!(bounds.contains(c.position_at(rng.random())));
        }
        assert!((bounds.y1 - 150.0).abs() < 1e-6);
    }

    #[test]
    fn reversal_and_length() {
        let c = cubic([(1.0, 2.0), (4.0, -3.0), (9.0, 8.0), (7.0, 5.0)]);
        assert_eq!(c.reversed().reversed(), c);
        for i in 0..=10 {
            let t = f64::from(i) / 10.0;
            assert_near(c.reversed().position_at(t), c.position_at(1.0 - t), 1e-12);
        }
        let parts: f64 = c.subdivided(0.3).iter().map(|p| p.arc_length()).sum();
        assert!((parts - c.arc_length()).abs() < 1e-6);
    }

    #[test]
    fn degree_reduction() {
        let q = QuadBez::new((1.0, 2.0), (4.0, -3.0), (7.0, 5.0)).unwrap();
        let c = q.degree_elevated();
        let reduced = c.degree_reduced(1e-12).unwrap();
        assert_near(reduced.control(), q.control(), 1e-12);
        assert!(arch().degree_reduced(1e-9).is_none());
        assert!(matches!(
            c.nondegenerate_segments()[..],
            [Segment::Quadratic(_)]
        ));
        // Elevation does not change curvature.
        assert!((c.curvature_at(0.3) - q.curvature_at(0.3)).abs() < 1e-9);
    }

    #[test]
    fn collinear() {
        let c = cubic([(0.0, 0.0), (5.0, 0.0), (3.0, 0.0), (10.0, 0.0)]);
        assert!(!c.has_cusp());
        let lines = c.nondegenerate_segments();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], Segment::Line(Line::new((0.0, 0.0), (10.0, 0.0)).unwrap()));
        assert!(cubic([(1.0, 1.0); 4]).nondegenerate_segments().is_empty());
    }

    #[test]
    fn self_intersection() {
        let c = cubic([(0.0, 0.0), (300.0, 200.0), (-200.0, 200.0), (100.0, 0.0)]);
        let hit = c.self_intersection().unwrap();
        assert!((hit.point.x - 50.0).abs() < 1e-6);
        assert!((hit.a_t + hit.b_t - 1.0).abs() < 1e-6);
        assert_near(c.position_at(hit.a_t), c.position_at(hit.b_t), 1e-6);
        assert!(arch().self_intersection().is_none());
    }

    #[test]
    fn ray_hits() {
        let c = arch();
        let ray = Ray::new((-5.0, 5.0), (1.0, 0.0)).unwrap();
        let hits = c.intersection(&ray);
        assert_eq!(hits.len(), 2);
        assert_eq!(c.winding_intersection(&ray), 0);
        for hit in &hits {
            assert_near(c.position_at(hit.t), hit.point, 1e-9);
            assert!((hit.point.y - 5.0).abs() < 1e-9);
            assert!(hit.normal.dot(ray.direction()) <= 0.0);
        }
        let down = Ray::new((5.0, 20.0), (0.0, -1.0)).unwrap();
        let hits = c.intersection(&down);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].distance - 12.5).abs() < 1e-9);
    }

    #[test]
    fn offset_polyline() {
        let c = arch();
        let offset = c.offset_to(1.0, false);
        assert_eq!(offset.len(), OFFSET_SAMPLES - 1);
        assert_near(offset[0].start(), Point::new(1.0, 0.0), 1e-12);
        let reversed = c.offset_to(1.0, true);
        assert_near(reversed[0].start(), offset[offset.len() - 1].end(), 1e-12);
    }

    #[test]
    fn overlap_with_subcurve() {
        let c = cubic([(1.0, 2.0), (4.0, -3.0), (9.0, 8.0), (7.0, 5.0)]);
        let piece = c.subdivisions(&[0.2, 0.6]).swap_remove(1);
        let overlap = CubicBez::overlaps(&c, &piece, 1e-6).unwrap();
        assert!((overlap.a - 0.4).abs() < 1e-9);
        assert!((overlap.b - 0.2).abs() < 1e-9);
        for i in 0..=10 {
            let t = f64::from(i) / 10.0;
            assert_near(piece.position_at(t), c.position_at(overlap.apply(t)), 1e-9);
        }
        assert!(CubicBez::overlaps(&c, &arch(), 1e-6).is_none());
    }

    #[test]
    fn setters_invalidate() {
        let mut c = arch();
        assert!(!c.has_cusp());
        c.set_control1((10.0, 10.0))
            .unwrap()
            .set_control2((0.0, 10.0))
            .unwrap();
        assert_eq!(c.revision(), 2);
        assert!(c.has_cusp());
        c.set_end((10.0, 0.0)).unwrap();
        assert_eq!(c.revision(), 2);
    }
}
