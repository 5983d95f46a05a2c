// Copyright 2026 the Kurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circular arcs.

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::OnceCell;
use core::f64::consts::{FRAC_PI_2, PI, TAU};
use core::fmt;

use arrayvec::ArrayVec;

use crate::common::{
    circle_center_from_points, modulo_between_down, modulo_between_up, unit_perpendicular,
};
use crate::epsilon::{angle, distance, overlap, parametric};
use crate::error::{check_point, check_scalar};
use crate::param_segment::{interior_extrema, ExtremaTs, ParamSegment, Subdivided};
use crate::serialize::SerializedArc;
use crate::svg::svg_number;
use crate::{
    Affine, ArcLengthOptions, EllipticalArc, Line, Overlap, PathContext, Point, Ray,
    RayIntersection, Rect, Segment, SegmentError, SegmentIntersection, SerializedSegment, Vec2,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// The end angle an arc actually sweeps to.
///
/// The result differs from `end_angle` by a multiple of 2π, chosen so that
/// it lies on the side of `start_angle` given by the direction: below it
/// for anticlockwise arcs, above it otherwise.
pub fn actual_end_angle(start_angle: f64, end_angle: f64, anticlockwise: bool) -> f64 {
    if anticlockwise {
        if start_angle > end_angle {
            end_angle
        } else if start_angle < end_angle {
            end_angle - TAU * ((end_angle - start_angle) / TAU).ceil()
        } else {
            start_angle
        }
    } else if start_angle < end_angle {
        end_angle
    } else if start_angle > end_angle {
        end_angle + TAU * ((start_angle - end_angle) / TAU).ceil()
    } else {
        start_angle
    }
}

/// The angular extent shared by circular and elliptical arcs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Sweep {
    pub(crate) start: f64,
    pub(crate) end: f64,
    pub(crate) anticlockwise: bool,
    pub(crate) actual_end: f64,
    pub(crate) difference: f64,
}

impl Sweep {
    pub(crate) fn new(start: f64, end: f64, anticlockwise: bool) -> Sweep {
        let actual_end = actual_end_angle(start, end, anticlockwise);
        Sweep {
            start,
            end,
            anticlockwise,
            actual_end,
            difference: (actual_end - start).abs(),
        }
    }

    pub(crate) fn is_full_perimeter(&self) -> bool {
        if self.anticlockwise {
            self.start - self.end >= TAU
        } else {
            self.end - self.start >= TAU
        }
    }

    pub(crate) fn contains_angle(&self, angle: f64) -> bool {
        let relative = if self.anticlockwise {
            angle - self.actual_end
        } else {
            angle - self.start
        };
        modulo_between_down(relative, 0.0, TAU) <= self.difference
    }

    /// Bring `angle` into the range swept by the arc, modulo 2π.
    pub(crate) fn map_angle(&self, angle: f64) -> f64 {
        if modulo_between_down(angle - self.start, -PI, PI).abs() < angle::MAP {
            self.start
        } else if modulo_between_down(angle - self.actual_end, -PI, PI).abs() < angle::MAP {
            self.actual_end
        } else if self.start > self.actual_end {
            modulo_between_up(angle, self.start - TAU, self.start)
        } else {
            modulo_between_down(angle, self.start, self.start + TAU)
        }
    }

    pub(crate) fn t_at_angle(&self, angle: f64) -> f64 {
        (self.map_angle(angle) - self.start) / (self.actual_end - self.start)
    }

    #[inline]
    pub(crate) fn angle_at(&self, t: f64) -> f64 {
        self.start + (self.actual_end - self.start) * t
    }

    /// Pieces `[start, angle_at(t)]` and `[angle_at(t), end]`, as start/end pairs.
    pub(crate) fn split(&self, t: f64) -> [(f64, f64); 2] {
        let middle = self.angle_at(t);
        [(self.start, middle), (middle, self.actual_end)]
    }

    /// Interior parameters of the contained angles among `candidates`.
    pub(crate) fn interior_ts(&self, candidates: impl IntoIterator<Item = f64>) -> ExtremaTs {
        interior_extrema(
            candidates
                .into_iter()
                .filter(|&angle| self.contains_angle(angle))
                .map(|angle| self.t_at_angle(angle)),
        )
    }

    /// SVG arc flags: `(large_arc, sweep)`.
    pub(crate) fn svg_flags(&self) -> (u8, u8) {
        let large = u8::from(self.difference > PI);
        let sweep = u8::from(!self.anticlockwise);
        (large, sweep)
    }

    /// Whether the arc must be split in two for SVG output.
    pub(crate) fn needs_split_for_svg(&self) -> bool {
        self.difference >= TAU - angle::SVG_FULL_TURN
    }
}

/// Linear reparametrizations between two sweeps of the same circle.
///
/// Each result maps a parameter on `second` to the parameter on `first` at
/// the same angle (modulo 2π).
pub(crate) fn angular_overlaps(first: &Sweep, second: &Sweep) -> ArrayVec<Overlap, 2> {
    let mut result = ArrayVec::new();
    let (s1, e1) = (first.start, first.actual_end);
    let (s2, e2) = (second.start, second.actual_end);
    let first_span = e1 - s1;
    if first_span.abs() < parametric::EXTREMA {
        return result;
    }
    let a = (e2 - s2) / first_span;
    if a == 0.0 {
        return result;
    }
    let (min1, max1) = (s1.min(e1), s1.max(e1));
    let (min2, max2) = (s2.min(e2), s2.max(e2));
    #[expect(
        clippy::cast_possible_truncation,
        reason = "angles are finite, and turn counts past the i64 range saturate"
    )]
    let (k_min, k_max) = (
        ((min1 - max2) / TAU).ceil() as i64,
        ((max1 - min2) / TAU).floor() as i64,
    );
    for k in k_min..=k_max {
        let b = (s2 + TAU * k as f64 - s1) / first_span;
        // Range of second's parameter that lands inside first.
        let (t0, t1) = {
            let (u0, u1) = (-b / a, (1.0 - b) / a);
            (u0.min(u1).max(0.0), u0.max(u1).min(1.0))
        };
        if t1 - t0 > parametric::OVERLAP_LENGTH && result.try_push(Overlap { a, b }).is_err() {
            log::debug!("dropping extra angular overlap for k = {k}");
        }
    }
    result
}

/// A circular arc.
///
/// Angles are in radians. An anticlockwise arc sweeps towards decreasing
/// angles, which is anticlockwise on a y-down screen.
#[derive(Clone)]
pub struct Arc {
    center: Point,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    anticlockwise: bool,
    revision: u64,
    cache: OnceCell<ArcCache>,
}

#[derive(Clone, Debug)]
struct ArcCache {
    sweep: Sweep,
    bounds: Rect,
}

impl Arc {
    /// Create an arc.
    ///
    /// A negative radius is made positive by rotating both angles half a turn.
    ///
    /// # Errors
    ///
    /// Fails if any argument is not finite.
    pub fn new(
        center: impl Into<Point>,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) -> Result<Arc, SegmentError> {
        Ok(Arc::from_parts(
            check_point(center.into(), "center")?,
            check_scalar(radius, "radius")?,
            check_scalar(start_angle, "start angle")?,
            check_scalar(end_angle, "end angle")?,
            anticlockwise,
        ))
    }

    pub(crate) fn from_parts(
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) -> Arc {
        let (radius, start_angle, end_angle) = if radius < 0.0 {
            (-radius, start_angle + PI, end_angle + PI)
        } else {
            (radius, start_angle, end_angle)
        };
        Arc {
            center,
            radius,
            start_angle,
            end_angle,
            anticlockwise,
            revision: 0,
            cache: OnceCell::new(),
        }
    }

    /// The center of the circle.
    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// The radius, never negative.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The angle of the start point.
    #[inline]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// The end angle as given; see [`Arc::actual_end_angle`].
    #[inline]
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// Whether the arc sweeps towards decreasing angles.
    #[inline]
    pub fn anticlockwise(&self) -> bool {
        self.anticlockwise
    }

    /// Move the center.
    ///
    /// # Errors
    ///
    /// Fails if a coordinate is not finite.
    pub fn set_center(&mut self, center: impl Into<Point>) -> Result<&mut Self, SegmentError> {
        let center = check_point(center.into(), "center")?;
        if center != self.center {
            self.center = center;
            self.invalidate();
        }
        Ok(self)
    }

    /// Change the radius, normalizing a negative value like [`Arc::new`].
    ///
    /// # Errors
    ///
    /// Fails if `radius` is not finite.
    pub fn set_radius(&mut self, radius: f64) -> Result<&mut Self, SegmentError> {
        let radius = check_scalar(radius, "radius")?;
        if radius != self.radius {
            if radius < 0.0 {
                self.radius = -radius;
                self.start_angle += PI;
                self.end_angle += PI;
            } else {
                self.radius = radius;
            }
            self.invalidate();
        }
        Ok(self)
    }

    /// Change the start angle.
    ///
    /// # Errors
    ///
    /// Fails if `start_angle` is not finite.
    pub fn set_start_angle(&mut self, start_angle: f64) -> Result<&mut Self, SegmentError> {
        let start_angle = check_scalar(start_angle, "start angle")?;
        if start_angle != self.start_angle {
            self.start_angle = start_angle;
            self.invalidate();
        }
        Ok(self)
    }

    /// Change the end angle.
    ///
    /// # Errors
    ///
    /// Fails if `end_angle` is not finite.
    pub fn set_end_angle(&mut self, end_angle: f64) -> Result<&mut Self, SegmentError> {
        let end_angle = check_scalar(end_angle, "end angle")?;
        if end_angle != self.end_angle {
            self.end_angle = end_angle;
            self.invalidate();
        }
        Ok(self)
    }

    /// Change the direction.
    pub fn set_anticlockwise(&mut self, anticlockwise: bool) -> &mut Self {
        if anticlockwise != self.anticlockwise {
            self.anticlockwise = anticlockwise;
            self.invalidate();
        }
        self
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

    fn cache(&self) -> &ArcCache {
        self.cache.get_or_init(|| {
            let sweep = Sweep::new(self.start_angle, self.end_angle, self.anticlockwise);
            let mut bounds = Rect::from_points(self.start(), self.end());
            if sweep.difference > 0.0 {
                let (c, r) = (self.center, self.radius);
                let extremes = [
                    (0.0, Point::new(c.x + r, c.y)),
                    (FRAC_PI_2, Point::new(c.x, c.y + r)),
                    (PI, Point::new(c.x - r, c.y)),
                    (3.0 * FRAC_PI_2, Point::new(c.x, c.y - r)),
                ];
                for (angle, point) in extremes {
                    if sweep.contains_angle(angle) {
                        bounds = bounds.union_pt(point);
                    }
                }
            }
            ArcCache { sweep, bounds }
        })
    }

    #[inline]
    pub(crate) fn sweep(&self) -> &Sweep {
        &self.cache().sweep
    }

    /// The end angle, shifted by whole turns so that the sweep from the
    /// start angle runs in the arc's direction.
    pub fn actual_end_angle(&self) -> f64 {
        self.sweep().actual_end
    }

    /// The absolute angle swept, which can exceed 2π.
    pub fn angle_difference(&self) -> f64 {
        self.sweep().difference
    }

    /// Whether the arc covers the whole circle.
    pub fn is_full_perimeter(&self) -> bool {
        self.sweep().is_full_perimeter()
    }

    /// Whether the point of the circle at `angle` is on the arc.
    pub fn contains_angle(&self, angle: f64) -> bool {
        self.sweep().contains_angle(angle)
    }

    /// Shift `angle` by whole turns into the arc's parametric range.
    pub fn map_angle(&self, angle: f64) -> f64 {
        self.sweep().map_angle(angle)
    }

    /// The parameter of the point at `angle`.
    pub fn t_at_angle(&self, angle: f64) -> f64 {
        self.sweep().t_at_angle(angle)
    }

    /// The angle at parameter `t`.
    pub fn angle_at(&self, t: f64) -> f64 {
        self.sweep().angle_at(t)
    }

    /// The point of the circle at `angle`.
    #[inline]
    pub fn position_at_angle(&self, angle: f64) -> Point {
        self.center + Vec2::from_angle(angle) * self.radius
    }

    /// The unit tangent at `angle`, in the arc's direction.
    pub fn tangent_at_angle(&self, angle: f64) -> Vec2 {
        let normal = Vec2::from_angle(angle);
        if self.anticlockwise {
            normal.perpendicular()
        } else {
            -normal.perpendicular()
        }
    }

    /// This arc as an elliptical arc with equal radii.
    pub fn to_elliptical(&self) -> EllipticalArc {
        EllipticalArc::from_parts(
            self.center,
            self.radius,
            self.radius,
            0.0,
            self.start_angle,
            self.end_angle,
            self.anticlockwise,
        )
    }

    /// The arc from `start` through `middle` to `end`.
    ///
    /// Degrades to a line when the points are collinear.
    pub fn create_from_points(start: Point, middle: Point, end: Point) -> Segment {
        let Some(center) = circle_center_from_points(start, middle, end) else {
            log::debug!("collinear points {start:?} {middle:?} {end:?}, using a line");
            return Line::from_points(start, end).into();
        };
        let radius =
            (center.distance(start) + center.distance(middle) + center.distance(end)) / 3.0;
        let start_angle = (start - center).atan2();
        let middle_angle = (middle - center).atan2();
        let end_angle = (end - center).atan2();
        let arc = Arc::from_parts(center, radius, start_angle, end_angle, false);
        if arc.contains_angle(middle_angle) {
            arc.into()
        } else {
            Arc::from_parts(center, radius, start_angle, end_angle, true).into()
        }
    }

    /// Points shared by two circles: none, one where they touch, or two.
    pub fn circle_intersection_points(
        center_a: Point,
        radius_a: f64,
        center_b: Point,
        radius_b: f64,
    ) -> ArrayVec<Point, 2> {
        let mut result = ArrayVec::new();
        let delta = center_b - center_a;
        let d = delta.hypot();
        let eps = distance::CIRCLE_INTERSECTION;
        if d < eps || d > radius_a + radius_b + eps {
            return result;
        }
        if d > radius_a + radius_b - eps {
            result.push(center_a.lerp(center_b, radius_a / d));
            return result;
        }
        let bit = d * d - radius_b * radius_b + radius_a * radius_a;
        let x_prime = 0.5 * bit / d;
        let discriminant = 4.0 * d * d * radius_a * radius_a - bit * bit;
        let base = center_a.lerp(center_b, x_prime / d);
        if discriminant >= eps {
            let offset = unit_perpendicular(delta) * (discriminant.sqrt() / d / 2.0);
            result.push(base + offset);
            result.push(base - offset);
        } else if discriminant > -eps {
            result.push(base);
        }
        result
    }

    /// Crossings of two arcs, with each arc's own parameter.
    ///
    /// Arcs on the same circle only report shared endpoints.
    pub fn intersect(a: &Arc, b: &Arc) -> Vec<SegmentIntersection> {
        let same_circle = a.center.approx_eq(b.center, distance::SAME_CIRCLE)
            && (a.radius - b.radius).abs() < distance::SAME_CIRCLE;
        if same_circle {
            let mut result = Vec::new();
            for (a_t, a_point) in [(0.0, a.start()), (1.0, a.end())] {
                for (b_t, b_point) in [(0.0, b.start()), (1.0, b.end())] {
                    if a_point.approx_eq(b_point, distance::SAME_CIRCLE) {
                        result.push(SegmentIntersection {
                            point: a_point.midpoint(b_point),
                            a_t,
                            b_t,
                        });
                    }
                }
            }
            return result;
        }
        Arc::circle_intersection_points(a.center, a.radius, b.center, b.radius)
            .into_iter()
            .filter_map(|point| {
                let angle_a = (point - a.center).atan2();
                let angle_b = (point - b.center).atan2();
                (a.contains_angle(angle_a) && b.contains_angle(angle_b)).then(|| {
                    SegmentIntersection {
                        point,
                        a_t: a.t_at_angle(angle_a),
                        b_t: b.t_at_angle(angle_b),
                    }
                })
            })
            .collect()
    }

    /// Linear reparametrizations between two arcs of the same circle.
    ///
    /// Empty unless the centers and radii agree. See [`Overlap`] for the
    /// direction of the mapping.
    pub fn overlaps(first: &Arc, second: &Arc) -> ArrayVec<Overlap, 2> {
        if first.center.distance(second.center) > overlap::CIRCLE
            || (first.radius - second.radius).abs() > overlap::CIRCLE
        {
            return ArrayVec::new();
        }
        angular_overlaps(first.sweep(), second.sweep())
    }

    fn with_angles(&self, start_angle: f64, end_angle: f64, anticlockwise: bool) -> Arc {
        Arc::from_parts(self.center, self.radius, start_angle, end_angle, anticlockwise)
    }
}

impl PartialEq for Arc {
    fn eq(&self, other: &Arc) -> bool {
        self.center == other.center
            && self.radius == other.radius
            && self.start_angle == other.start_angle
            && self.end_angle == other.end_angle
            && self.anticlockwise == other.anticlockwise
    }
}

impl fmt::Debug for Arc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arc")
            .field("center", &self.center)
            .field("radius", &self.radius)
            .field("start_angle", &self.start_angle)
            .field("end_angle", &self.end_angle)
            .field("anticlockwise", &self.anticlockwise)
            .finish_non_exhaustive()
    }
}

impl ParamSegment for Arc {
    fn start(&self) -> Point {
        self.position_at_angle(self.start_angle)
    }

    fn end(&self) -> Point {
        self.position_at_angle(self.end_angle)
    }

    fn start_tangent(&self) -> Vec2 {
        self.tangent_at_angle(self.start_angle)
    }

    fn end_tangent(&self) -> Vec2 {
        self.tangent_at_angle(self.end_angle)
    }

    fn bounds(&self) -> Rect {
        self.cache().bounds
    }

    fn position_at(&self, t: f64) -> Point {
        debug_assert!((0.0..=1.0).contains(&t), "t out of range: {t}");
        self.position_at_angle(self.angle_at(t))
    }

    fn tangent_at(&self, t: f64) -> Vec2 {
        debug_assert!((0.0..=1.0).contains(&t), "t out of range: {t}");
        self.tangent_at_angle(self.angle_at(t))
    }

    fn curvature_at(&self, t: f64) -> f64 {
        debug_assert!((0.0..=1.0).contains(&t), "t out of range: {t}");
        if self.anticlockwise {
            -1.0 / self.radius
        } else {
            1.0 / self.radius
        }
    }

    fn subdivided(&self, t: f64) -> Subdivided<Self> {
        debug_assert!((0.0..=1.0).contains(&t), "t out of range: {t}");
        let mut result = Subdivided::new();
        if t == 0.0 || t == 1.0 {
            result.push(self.clone());
        } else {
            for (start, end) in self.sweep().split(t) {
                result.push(self.with_angles(start, end, self.anticlockwise));
            }
        }
        result
    }

    fn interior_extrema_ts(&self) -> ExtremaTs {
        self.sweep()
            .interior_ts([0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2])
    }

    fn intersection(&self, ray: &Ray) -> Vec<RayIntersection> {
        let origin = ray.origin();
        let dir = ray.direction();
        let center_to_ray = origin - self.center;
        let tmp = dir.dot(center_to_ray);
        let discriminant =
            4.0 * tmp * tmp - 4.0 * (center_to_ray.hypot2() - self.radius * self.radius);
        if discriminant < distance::CIRCLE_DISCRIMINANT {
            // Miss, or a tangent graze that does not change winding.
            return Vec::new();
        }
        let base = dir.dot(self.center.to_vec2()) - dir.dot(origin.to_vec2());
        let sqt = discriminant.sqrt() / 2.0;
        let ta = base - sqt;
        let tb = base + sqt;
        if tb < 0.0 {
            return Vec::new();
        }

        let hit = |distance: f64, outward: bool, wind: i32| {
            let point = ray.point_at_distance(distance);
            let normal = (point - self.center).normalize();
            let angle = normal.atan2();
            self.contains_angle(angle).then(|| RayIntersection {
                distance,
                point,
                normal: if outward { normal } else { -normal },
                wind,
                t: self.t_at_angle(angle),
            })
        };
        let (entry_wind, exit_wind) = if self.anticlockwise { (1, -1) } else { (-1, 1) };
        let mut result = Vec::with_capacity(2);
        if ta >= 0.0 {
            result.extend(hit(ta, true, entry_wind));
        }
        result.extend(hit(tb, false, exit_wind));
        result
    }

    fn signed_area_fragment(&self) -> f64 {
        let t0 = self.start_angle;
        let t1 = self.actual_end_angle();
        let (c, r) = (self.center, self.radius);
        0.5 * r * (r * (t1 - t0) + c.x * (t1.sin() - t0.sin()) - c.y * (t1.cos() - t0.cos()))
    }

    fn nondegenerate_segments(&self) -> Vec<Segment> {
        if self.radius <= 0.0 || self.start_angle == self.end_angle {
            Vec::new()
        } else {
            vec![self.clone().into()]
        }
    }

    fn reversed(&self) -> Arc {
        self.with_angles(self.end_angle, self.start_angle, !self.anticlockwise)
    }

    fn transformed(&self, affine: Affine) -> Segment {
        let ellipse = self.to_elliptical().transformed_ellipse(affine);
        if affine.is_similarity(1e-12) {
            Arc::from_parts(
                ellipse.center(),
                0.5 * (ellipse.radius_x() + ellipse.radius_y()),
                ellipse.start_angle() + ellipse.rotation(),
                ellipse.end_angle() + ellipse.rotation(),
                ellipse.anticlockwise(),
            )
            .into()
        } else {
            ellipse.into()
        }
    }

    fn write_to_context<C: PathContext + ?Sized>(&self, context: &mut C) {
        context.arc(
            self.center,
            self.radius,
            self.start_angle,
            self.end_angle,
            self.anticlockwise,
        );
    }

    fn svg_path_fragment(&self) -> String {
        let sweep = self.sweep();
        let r = svg_number(self.radius);
        let command = |large: u8, sweep_flag: u8, point: Point| {
            format!(
                "A {r} {r} 0 {large} {sweep_flag} {} {}",
                svg_number(point.x),
                svg_number(point.y)
            )
        };
        let (large, sweep_flag) = sweep.svg_flags();
        if sweep.needs_split_for_svg() {
            let middle = self.position_at_angle(0.5 * (sweep.start + sweep.actual_end));
            format!(
                "{} {}",
                command(0, sweep_flag, middle),
                command(0, sweep_flag, self.end())
            )
        } else {
            command(large, sweep_flag, self.end())
        }
    }

    fn serialize(&self) -> SerializedSegment {
        SerializedSegment::Arc(SerializedArc {
            center_x: self.center.x,
            center_y: self.center.y,
            radius: self.radius,
            start_angle: self.start_angle,
            end_angle: self.end_angle,
            anticlockwise: self.anticlockwise,
        })
    }

    fn offset_to(&self, r: f64, reverse: bool) -> Vec<Segment> {
        let radius = self.radius + if self.anticlockwise { -r } else { r };
        let arc = Arc::from_parts(
            self.center,
            radius,
            self.start_angle,
            self.end_angle,
            self.anticlockwise,
        );
        vec![if reverse { arc.reversed() } else { arc }.into()]
    }

    fn arc_length_with(&self, _options: ArcLengthOptions) -> f64 {
        self.radius * self.angle_difference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn assert_near(p0: Point, p1: Point) {
        assert!((p1 - p0).hypot() < 1e-9, "{p0:?} != {p1:?}");
    }

    fn arc(cx: f64, cy: f64, r: f64, start: f64, end: f64, anticlockwise: bool) -> Arc {
        Arc::new((cx, cy), r, start, end, anticlockwise).unwrap()
    }

    #[test]
    fn half_circle() {
        let a = arc(0.0, 0.0, 5.0, 0.0, PI, false);
        assert!((a.arc_length() - 5.0 * PI).abs() < 1e-12);
        let svg = a.svg_path_fragment();
        assert_eq!(svg.matches('A').count(), 1);
        assert!(svg.starts_with("A 5 5 0 0 1 "), "{svg}");
        assert_near(a.position_at(0.5), Point::new(0.0, 5.0));
        assert_near(a.end(), Point::new(-5.0, 0.0));
        // Flattened length agrees with the closed form.
        let generic: f64 = a.subdivided(0.5).iter().map(|p| p.radius * p.angle_difference()).sum();
        assert!((generic - a.arc_length()).abs() < 1e-12);
    }

    #[test]
    fn actual_end() {
        assert_eq!(actual_end_angle(0.0, 1.0, false), 1.0);
        assert!((actual_end_angle(1.0, 0.0, false) - TAU).abs() < 1e-12);
        assert!((actual_end_angle(0.0, 1.0, true) - (1.0 - TAU)).abs() < 1e-12);
        assert_eq!(actual_end_angle(1.0, 0.0, true), 0.0);
        assert_eq!(actual_end_angle(2.0, 2.0, true), 2.0);
        let full = arc(0.0, 0.0, 1.0, 0.0, TAU, false);
        assert!(full.is_full_perimeter());
        assert!((full.angle_difference() - TAU).abs() < 1e-12);
    }

    #[test]
    fn negative_radius() {
        let a = arc(0.0, 0.0, -2.0, 0.0, FRAC_PI_2, false);
        assert_eq!(a.radius(), 2.0);
        assert_eq!(a.start_angle(), PI);
        assert_near(a.start(), Point::new(-2.0, 0.0));
        let mut b = arc(0.0, 0.0, 2.0, 0.0, 1.0, false);
        b.set_radius(-3.0).unwrap();
        assert_eq!(b.radius(), 3.0);
        assert_eq!(b.start_angle(), PI);
        assert_eq!(b.revision(), 1);
    }

    #[test]
    fn angles() {
        let a = arc(0.0, 0.0, 1.0, -FRAC_PI_2, FRAC_PI_2, false);
        assert!(a.contains_angle(0.0));
        assert!(a.contains_angle(TAU));
        assert!(!a.contains_angle(PI));
        assert!((a.t_at_angle(0.0) - 0.5).abs() < 1e-12);
        assert!((a.t_at_angle(TAU) - 0.5).abs() < 1e-12);
        assert!((a.angle_at(0.25) + FRAC_PI_2 / 2.0).abs() < 1e-12);

        let b = arc(0.0, 0.0, 1.0, FRAC_PI_2, -FRAC_PI_2, true);
        assert!(b.contains_angle(0.0));
        assert!(!b.contains_angle(PI));
        assert!((b.t_at_angle(0.0) - 0.5).abs() < 1e-12);
        assert_near(b.position_at(0.5), Point::new(1.0, 0.0));
    }

    #[test]
    fn tangents_and_curvature() {
        let a = arc(0.0, 0.0, 2.0, 0.0, PI, false);
        assert_near(a.start_tangent().to_point(), Point::new(0.0, 1.0));
        assert_near(a.end_tangent().to_point(), Point::new(0.0, -1.0));
        assert_eq!(a.curvature_at(0.5), 0.5);
        let b = a.reversed();
        assert_near(b.start_tangent().to_point(), Point::new(0.0, 1.0));
        assert_eq!(b.curvature_at(0.5), -0.5);
        // Numerical tangent agrees in direction.
        let h = 1e-6;
        let numeric = (a.position_at(0.3 + h) - a.position_at(0.3 - h)).normalize();
        assert!((numeric - a.tangent_at(0.3)).hypot() < 1e-6);
    }

    #[test]
    fn bounds_contain_samples() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = arc(1.0, 2.0, 3.0, 0.5, 4.0, false);
        let bounds = a.bounds().inflate(1e-9);
        for _ in 0..1000 {
            assert!(bounds.contains(a.position_at(rng.random())));
        }
        assert!((bounds.y1 - 5.0).abs() < 1e-8);
        assert!((bounds.x0 + 2.0).abs() < 1e-8);
        assert_eq!(a.interior_extrema_ts().len(), 2);
    }

    #[test]
    fn subdivision_and_reversal() {
        let a = arc(1.0, 2.0, 3.0, 5.0, 1.0, true);
        let t = 0.3;
        let halves = a.subdivided(t);
        for i in 0..=20 {
            let s = f64::from(i) / 20.0;
            let actual = if s <= t {
                halves[0].position_at(s / t)
            } else {
                halves[1].position_at((s - t) / (1.0 - t))
            };
            assert_near(actual, a.position_at(s));
        }
        assert_eq!(a.reversed().reversed(), a);
        for i in 0..=10 {
            let s = f64::from(i) / 10.0;
            assert_near(a.reversed().position_at(s), a.position_at(1.0 - s));
        }
    }

    #[test]
    fn ray_hits() {
        let full = arc(0.0, 0.0, 1.0, 0.0, TAU, false);
        let ray = Ray::new((-5.0, 0.1), (1.0, 0.0)).unwrap();
        let hits = full.intersection(&ray);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].wind, -1);
        assert_eq!(hits[1].wind, 1);
        for hit in &hits {
            assert!(hit.normal.dot(ray.direction()) < 0.0);
            assert_near(full.position_at(hit.t), hit.point);
        }

        let inside = Ray::new((0.0, 0.0), (1.0, 0.0)).unwrap();
        let hits = full.intersection(&inside);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].distance - 1.0).abs() < 1e-12);
        assert!(hits[0].normal.dot(inside.direction()) < 0.0);

        let upper = arc(0.0, 0.0, 1.0, 0.0, PI, false);
        let down = Ray::new((0.5, 5.0), (0.0, -1.0)).unwrap();
        assert_eq!(upper.intersection(&down).len(), 1);
        let miss = Ray::new((-5.0, 2.0), (1.0, 0.0)).unwrap();
        assert!(upper.intersection(&miss).is_empty());
    }

    #[test]
    fn from_points() {
        let (right, left) = (Point::new(1.0, 0.0), Point::new(-1.0, 0.0));
        let segment = Arc::create_from_points(right, Point::new(0.0, 1.0), left);
        let Segment::Arc(a) = segment else {
            panic!("expected an arc");
        };
        assert_near(a.center(), Point::ORIGIN);
        assert!((a.radius() - 1.0).abs() < 1e-12);
        assert!(!a.anticlockwise());
        assert_near(a.position_at(0.5), Point::new(0.0, 1.0));

        let lower = Arc::create_from_points(right, Point::new(0.0, -1.0), left);
        assert_near(lower.position_at(0.5), Point::new(0.0, -1.0));

        let (near, far) = (Point::new(1.0, 1.0), Point::new(2.0, 2.0));
        let line = Arc::create_from_points(Point::ORIGIN, near, far);
        assert!(matches!(line, Segment::Line(_)));
    }

    #[test]
    fn circle_points() {
        let circle_with = |center: Point, radius: f64| {
            Arc::circle_intersection_points(Point::ORIGIN, radius, center, 1.0)
        };
        let two = circle_with(Point::new(1.0, 0.0), 1.0);
        assert_eq!(two.len(), 2);
        for p in &two {
            assert!((p.x - 0.5).abs() < 1e-12);
        }
        let touching = circle_with(Point::new(2.0, 0.0), 1.0);
        assert_eq!(touching.len(), 1);
        assert_near(touching[0], Point::new(1.0, 0.0));
        let internal = circle_with(Point::new(1.0, 0.0), 2.0);
        assert_eq!(internal.len(), 1);
        assert_near(internal[0], Point::new(2.0, 0.0));
        assert!(circle_with(Point::new(3.0, 0.0), 1.0).is_empty());
        assert!(circle_with(Point::ORIGIN, 1.0).is_empty());
    }

    #[test]
    fn arc_arc_intersection() {
        let a = arc(0.0, 0.0, 1.0, 0.0, PI, false);
        let b = arc(1.0, 0.0, 1.0, 0.0, PI, false);
        let hits = Arc::intersect(&a, &b);
        assert_eq!(hits.len(), 1);
        assert_near(hits[0].point, Point::new(0.5, 0.75f64.sqrt()));
        assert_near(a.position_at(hits[0].a_t), hits[0].point);
        assert_near(b.position_at(hits[0].b_t), hits[0].point);

        let c = arc(0.0, 0.0, 1.0, PI, TAU, false);
        let shared = Arc::intersect(&a, &c);
        assert_eq!(shared.len(), 2);
    }

    #[test]
    fn arc_overlaps() {
        let a = arc(0.0, 0.0, 2.0, 0.0, PI, false);
        let b = arc(0.0, 0.0, 2.0, FRAC_PI_2, 3.0 * FRAC_PI_2, false);
        let overlaps = Arc::overlaps(&a, &b);
        assert_eq!(overlaps.len(), 1);
        let overlap = overlaps[0];
        assert!((overlap.a - 1.0).abs() < 1e-12);
        assert!((overlap.b - 0.5).abs() < 1e-12);
        for i in 0..=10 {
            let t = f64::from(i) / 20.0;
            assert_near(b.position_at(t), a.position_at(overlap.apply(t)));
        }

        // Wraps around the zero angle.
        let c = arc(0.0, 0.0, 2.0, -FRAC_PI_2, FRAC_PI_2, false);
        let overlaps = Arc::overlaps(&a, &c);
        assert_eq!(overlaps.len(), 1);
        for i in 10..=20 {
            let t = f64::from(i) / 20.0;
            assert_near(c.position_at(t), a.position_at(overlaps[0].apply(t)));
        }

        // Many turns apart.
        let far = arc(0.0, 0.0, 2.0, FRAC_PI_2 + 10.0 * TAU, 3.0 * FRAC_PI_2 + 10.0 * TAU, false);
        let overlaps = Arc::overlaps(&a, &far);
        assert_eq!(overlaps.len(), 1);
        assert!((overlaps[0].b - 0.5).abs() < 1e-9);

        let reversed = Arc::overlaps(&a, &a.reversed());
        assert_eq!(reversed.len(), 1);
        assert!((reversed[0].a + 1.0).abs() < 1e-12);

        assert!(Arc::overlaps(&a, &arc(0.0, 0.0, 3.0, 0.0, PI, false)).is_empty());
    }

    #[test]
    fn signed_area_of_circle() {
        let full = arc(3.0, -4.0, 2.0, 0.0, TAU, false);
        assert!((full.signed_area_fragment() - 4.0 * PI).abs() < 1e-9);
        let back = full.reversed();
        assert!((back.signed_area_fragment() + 4.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn svg_full_turn() {
        let full = arc(0.0, 0.0, 1.0, 0.0, TAU, false);
        let svg = full.svg_path_fragment();
        assert_eq!(svg.matches('A').count(), 2);
        assert!(svg.starts_with("A 1 1 0 0 1 -1 "), "{svg}");
        let large = arc(0.0, 0.0, 1.0, 0.0, 2.0, true);
        assert!(large.svg_path_fragment().starts_with("A 1 1 0 1 0 "));
    }

    #[test]
    fn offset_and_transform() {
        let a = arc(0.0, 0.0, 2.0, 0.0, PI, false);
        let [Segment::Arc(outer)] = &a.offset_to(1.0, false)[..] else {
            panic!("expected one arc");
        };
        assert_eq!(outer.radius(), 3.0);
        let b = a.reversed();
        let [Segment::Arc(inner)] = &b.offset_to(1.0, false)[..] else {
            panic!("expected one arc");
        };
        assert_eq!(inner.radius(), 1.0);

        let moved = a.transformed(Affine::rotate(FRAC_PI_2).then_scale(2.0));
        let Segment::Arc(moved) = moved else {
            panic!("similarity keeps arcs circular");
        };
        assert!((moved.radius() - 4.0).abs() < 1e-9);
        assert_near(moved.start(), Point::new(0.0, 4.0));
        assert_near(moved.position_at(0.5), Point::new(-4.0, 0.0));

        let flipped = a.transformed(Affine::FLIP_Y);
        assert_near(flipped.position_at(0.5), Point::new(0.0, -2.0));
        assert_near(flipped.end(), Point::new(-2.0, 0.0));

        let stretched = a.transformed(Affine::scale_non_uniform(2.0, 1.0));
        assert!(matches!(stretched, Segment::EllipticalArc(_)));
        assert_near(stretched.position_at(0.5), Point::new(0.0, 2.0));
        assert_near(stretched.end(), Point::new(-4.0, 0.0));
    }
}
