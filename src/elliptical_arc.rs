// Copyright 2026 the Kurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arcs of rotated ellipses.

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::OnceCell;
use core::f64::consts::{FRAC_PI_2, PI};
use core::fmt;

use arrayvec::ArrayVec;

use crate::arc::{angular_overlaps, Sweep};
use crate::common::{modulo_between_down, unit_perpendicular};
use crate::epsilon::overlap;
use crate::error::{check_point, check_scalar};
use crate::param_segment::{ExtremaTs, ParamSegment, Subdivided};
use crate::ray::hit_from_tangent;
use crate::serialize::SerializedEllipticalArc;
use crate::svg::svg_number;
use crate::{
    Affine, Arc, Line, Overlap, PathContext, Point, Ray, RayIntersection, Rect, Segment,
    SegmentError, SerializedSegment, Vec2,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

const OFFSET_SAMPLES: usize = 32;

/// An arc of an ellipse.
///
/// The point at angle `θ` is `center + R(rotation)·(rx·cos θ, ry·sin θ)`, so
/// angles live in the frame of the unit circle the ellipse is stretched from.
/// Construction keeps `radius_x >= radius_y >= 0`.
#[derive(Clone)]
pub struct EllipticalArc {
    center: Point,
    radius_x: f64,
    radius_y: f64,
    rotation: f64,
    start_angle: f64,
    end_angle: f64,
    anticlockwise: bool,
    revision: u64,
    cache: OnceCell<EllipseCache>,
}

#[derive(Clone, Debug)]
struct EllipseCache {
    sweep: Sweep,
    bounds: Rect,
}

struct Normalized {
    radius_x: f64,
    radius_y: f64,
    rotation: f64,
    start_angle: f64,
    end_angle: f64,
    anticlockwise: bool,
}

impl Normalized {
    fn new(
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) -> Normalized {
        let mut n = Normalized {
            radius_x,
            radius_y,
            rotation,
            start_angle,
            end_angle,
            anticlockwise,
        };
        if n.radius_x < 0.0 {
            n.radius_x = -n.radius_x;
            n.start_angle = PI - n.start_angle;
            n.end_angle = PI - n.end_angle;
            n.anticlockwise = !n.anticlockwise;
        }
        if n.radius_y < 0.0 {
            n.radius_y = -n.radius_y;
            n.start_angle = -n.start_angle;
            n.end_angle = -n.end_angle;
            n.anticlockwise = !n.anticlockwise;
        }
        if n.radius_x < n.radius_y {
            core::mem::swap(&mut n.radius_x, &mut n.radius_y);
            n.rotation += FRAC_PI_2;
            n.start_angle -= FRAC_PI_2;
            n.end_angle -= FRAC_PI_2;
        }
        n
    }
}

impl EllipticalArc {
    /// Create an elliptical arc.
    ///
    /// Negative radii are made positive by reflecting the angles, and the
    /// radii are swapped (with a quarter-turn rotation) so that `radius_x`
    /// is the major one. The traced points do not change.
    ///
    /// # Errors
    ///
    /// Fails if any argument is not finite.
    pub fn new(
        center: impl Into<Point>,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) -> Result<EllipticalArc, SegmentError> {
        Ok(EllipticalArc::from_parts(
            check_point(center.into(), "center")?,
            check_scalar(radius_x, "radius x")?,
            check_scalar(radius_y, "radius y")?,
            check_scalar(rotation, "rotation")?,
            check_scalar(start_angle, "start angle")?,
            check_scalar(end_angle, "end angle")?,
            anticlockwise,
        ))
    }

    pub(crate) fn from_parts(
        center: Point,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) -> EllipticalArc {
        let n =
            Normalized::new(radius_x, radius_y, rotation, start_angle, end_angle, anticlockwise);
        EllipticalArc {
            center,
            radius_x: n.radius_x,
            radius_y: n.radius_y,
            rotation: n.rotation,
            start_angle: n.start_angle,
            end_angle: n.end_angle,
            anticlockwise: n.anticlockwise,
            revision: 0,
            cache: OnceCell::new(),
        }
    }

    /// The center of the ellipse.
    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// The major radius.
    #[inline]
    pub fn radius_x(&self) -> f64 {
        self.radius_x
    }

    /// The minor radius.
    #[inline]
    pub fn radius_y(&self) -> f64 {
        self.radius_y
    }

    /// The angle of the major axis.
    #[inline]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// The start angle, in the unit-circle frame.
    #[inline]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// The end angle, in the unit-circle frame.
    #[inline]
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// Whether the arc sweeps towards decreasing angles.
    #[inline]
    pub fn anticlockwise(&self) -> bool {
        self.anticlockwise
    }

    /// Number of changes applied through the setters.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
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

    /// Replace both radii, normalizing them like [`EllipticalArc::new`].
    ///
    /// # Errors
    ///
    /// Fails if a radius is not finite.
    pub fn set_radii(&mut self, radius_x: f64, radius_y: f64) -> Result<&mut Self, SegmentError> {
        let radius_x = check_scalar(radius_x, "radius x")?;
        let radius_y = check_scalar(radius_y, "radius y")?;
        if radius_x != self.radius_x || radius_y != self.radius_y {
            self.renormalize(radius_x, radius_y, self.rotation);
        }
        Ok(self)
    }

    /// Change the rotation of the major axis.
    ///
    /// # Errors
    ///
    /// Fails if `rotation` is not finite.
    pub fn set_rotation(&mut self, rotation: f64) -> Result<&mut Self, SegmentError> {
        let rotation = check_scalar(rotation, "rotation")?;
        if rotation != self.rotation {
            self.rotation = rotation;
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

    fn renormalize(&mut self, radius_x: f64, radius_y: f64, rotation: f64) {
        let n = Normalized::new(
            radius_x,
            radius_y,
            rotation,
            self.start_angle,
            self.end_angle,
            self.anticlockwise,
        );
        self.radius_x = n.radius_x;
        self.radius_y = n.radius_y;
        self.rotation = n.rotation;
        self.start_angle = n.start_angle;
        self.end_angle = n.end_angle;
        self.anticlockwise = n.anticlockwise;
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.cache = OnceCell::new();
        self.revision += 1;
    }

    fn cache(&self) -> &EllipseCache {
        self.cache.get_or_init(|| {
            let sweep = Sweep::new(self.start_angle, self.end_angle, self.anticlockwise);
            let mut bounds = Rect::from_points(self.start(), self.end());
            if sweep.difference > 0.0 {
                for angle in self.axis_extremum_angles() {
                    if sweep.contains_angle(angle) {
                        bounds = bounds.union_pt(self.position_at_angle(angle));
                    }
                }
            }
            EllipseCache { sweep, bounds }
        })
    }

    /// Angles where the x and then the y derivative vanish.
    fn axis_extremum_angles(&self) -> [f64; 4] {
        let (sin, cos) = self.rotation.sin_cos();
        let x = (-self.radius_y * sin).atan2(self.radius_x * cos);
        let y = (self.radius_y * cos).atan2(self.radius_x * sin);
        [x, x + PI, y, y + PI]
    }

    #[inline]
    fn sweep(&self) -> &Sweep {
        &self.cache().sweep
    }

    /// The end angle shifted by whole turns into the sweep direction.
    pub fn actual_end_angle(&self) -> f64 {
        self.sweep().actual_end
    }

    /// The absolute angle swept.
    pub fn angle_difference(&self) -> f64 {
        self.sweep().difference
    }

    /// Whether the arc covers the whole ellipse.
    pub fn is_full_perimeter(&self) -> bool {
        self.sweep().is_full_perimeter()
    }

    /// Whether the point at `angle` is on the arc.
    pub fn contains_angle(&self, angle: f64) -> bool {
        self.sweep().contains_angle(angle)
    }

    /// The parameter of the point at `angle`.
    pub fn t_at_angle(&self, angle: f64) -> f64 {
        self.sweep().t_at_angle(angle)
    }

    /// The angle at parameter `t`.
    pub fn angle_at(&self, t: f64) -> f64 {
        self.sweep().angle_at(t)
    }

    /// The transform taking the unit circle onto the full ellipse.
    pub fn unit_circle_transform(&self) -> Affine {
        Affine::translate(self.center.to_vec2())
            * Affine::rotate(self.rotation)
            * Affine::scale_non_uniform(self.radius_x, self.radius_y)
    }

    /// The point of the ellipse at `angle`.
    pub fn position_at_angle(&self, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        self.center + rotate(Vec2::new(self.radius_x * cos, self.radius_y * sin), self.rotation)
    }

    /// The unit tangent at `angle`, in the arc's direction.
    pub fn tangent_at_angle(&self, angle: f64) -> Vec2 {
        let (sin, cos) = angle.sin_cos();
        let local = Vec2::new(-self.radius_x * sin, self.radius_y * cos);
        let derivative = rotate(local, self.rotation);
        let unit = derivative.normalize();
        if self.anticlockwise {
            -unit
        } else {
            unit
        }
    }

    fn curvature_at_angle(&self, angle: f64) -> f64 {
        let (sin, cos) = angle.sin_cos();
        let (rx, ry) = (self.radius_x, self.radius_y);
        let speed_squared = rx * rx * sin * sin + ry * ry * cos * cos;
        let magnitude = rx * ry / (speed_squared * speed_squared.sqrt());
        if self.anticlockwise {
            -magnitude
        } else {
            magnitude
        }
    }

    /// The arc after an affine transform, always elliptical.
    ///
    /// A reflection flips the direction so that the traced points match.
    pub fn transformed_ellipse(&self, affine: Affine) -> EllipticalArc {
        let [a, b, c, d, _, _] = affine.as_coeffs();
        let mut linear = Affine::new([a, b, c, d, 0.0, 0.0])
            * Affine::rotate(self.rotation)
            * Affine::scale_non_uniform(self.radius_x, self.radius_y);
        let (mut start, mut end, mut anticlockwise) =
            (self.start_angle, self.end_angle, self.anticlockwise);
        if linear.determinant() < 0.0 {
            linear = linear * Affine::scale_non_uniform(1.0, -1.0);
            start = -start;
            end = -end;
            anticlockwise = !anticlockwise;
        }
        let (radii, rotation) = linear.svd();
        let [a, b, c, d, _, _] = linear.as_coeffs();
        let (sin, cos) = rotation.sin_cos();
        let psi = (cos * c + sin * d).atan2(cos * a + sin * b);
        EllipticalArc::from_parts(
            affine * self.center,
            radii.x,
            radii.y,
            rotation,
            start - psi,
            end - psi,
            anticlockwise,
        )
    }

    /// Linear reparametrizations between two arcs of the same ellipse.
    ///
    /// Empty unless center, radii and axis direction agree within tolerance.
    pub fn overlaps(first: &EllipticalArc, second: &EllipticalArc) -> ArrayVec<Overlap, 2> {
        if first.center.distance(second.center) > overlap::CIRCLE
            || (first.radius_x - second.radius_x).abs() > overlap::CIRCLE
            || (first.radius_y - second.radius_y).abs() > overlap::CIRCLE
        {
            return ArrayVec::new();
        }
        // Axes are undirected, so rotations may differ by a multiple of π.
        // A circle has no axes, so any rotation lines up.
        let delta = second.rotation - first.rotation;
        let residual = if (first.radius_x - first.radius_y).abs() <= overlap::CIRCLE {
            0.0
        } else {
            modulo_between_down(delta, -FRAC_PI_2, FRAC_PI_2)
        };
        if residual.abs() > overlap::CIRCLE {
            return ArrayVec::new();
        }
        let shift = delta - residual;
        let shifted = Sweep::new(
            second.start_angle + shift,
            second.end_angle + shift,
            second.anticlockwise,
        );
        angular_overlaps(first.sweep(), &shifted)
    }

    fn with_angles(&self, start_angle: f64, end_angle: f64, anticlockwise: bool) -> EllipticalArc {
        EllipticalArc {
            center: self.center,
            radius_x: self.radius_x,
            radius_y: self.radius_y,
            rotation: self.rotation,
            start_angle,
            end_angle,
            anticlockwise,
            revision: 0,
            cache: OnceCell::new(),
        }
    }
}

fn rotate(v: Vec2, angle: f64) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
}

impl PartialEq for EllipticalArc {
    fn eq(&self, other: &EllipticalArc) -> bool {
        self.center == other.center
            && self.radius_x == other.radius_x
            && self.radius_y == other.radius_y
            && self.rotation == other.rotation
            && self.start_angle == other.start_angle
            && self.end_angle == other.end_angle
            && self.anticlockwise == other.anticlockwise
    }
}

impl fmt::Debug for EllipticalArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EllipticalArc")
            .field("center", &self.center)
            .field("radius_x", &self.radius_x)
            .field("radius_y", &self.radius_y)
            .field("rotation", &self.rotation)
            .field("start_angle", &self.start_angle)
            .field("end_angle", &self.end_angle)
            .field("anticlockwise", &self.anticlockwise)
            .finish_non_exhaustive()
    }
}

impl ParamSegment for EllipticalArc {
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
        self.curvature_at_angle(self.angle_at(t))
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
        self.sweep().interior_ts(self.axis_extremum_angles())
    }

    fn intersection(&self, ray: &Ray) -> Vec<RayIntersection> {
        if self.radius_x == 0.0 || self.radius_y == 0.0 {
            return Vec::new();
        }
        let to_unit = self.unit_circle_transform().inverse();
        let direction = to_unit.transform_vector(ray.direction()).normalize();
        let unit_ray = Ray::from_unit(to_unit * ray.origin(), direction);
        let unit_arc = Arc::from_parts(
            Point::ORIGIN,
            1.0,
            self.start_angle,
            self.end_angle,
            self.anticlockwise,
        );
        unit_arc
            .intersection(&unit_ray)
            .into_iter()
            .map(|hit| {
                let angle = self.angle_at(hit.t);
                hit_from_tangent(
                    ray,
                    self.position_at_angle(angle),
                    self.tangent_at_angle(angle),
                    hit.t,
                )
            })
            .collect()
    }

    fn signed_area_fragment(&self) -> f64 {
        let sweep = self.sweep();
        let chord = self.end() - self.start();
        0.5 * (self.radius_x * self.radius_y * (sweep.actual_end - sweep.start)
            + self.center.to_vec2().cross(chord))
    }

    fn nondegenerate_segments(&self) -> Vec<Segment> {
        if self.radius_x == 0.0 || self.start_angle == self.end_angle {
            return Vec::new();
        }
        if self.radius_y == 0.0 {
            // Flattened onto the major axis, turning back at its ends.
            let mut points = vec![self.start()];
            points.extend(
                self.sweep()
                    .interior_ts([0.0, PI])
                    .into_iter()
                    .map(|t| self.position_at(t)),
            );
            points.push(self.end());
            return points
                .windows(2)
                .filter(|pair| pair[0] != pair[1])
                .map(|pair| Line::from_points(pair[0], pair[1]).into())
                .collect();
        }
        if self.radius_x == self.radius_y {
            return vec![Arc::from_parts(
                self.center,
                self.radius_x,
                self.start_angle + self.rotation,
                self.end_angle + self.rotation,
                self.anticlockwise,
            )
            .into()];
        }
        vec![self.clone().into()]
    }

    fn reversed(&self) -> EllipticalArc {
        self.with_angles(self.end_angle, self.start_angle, !self.anticlockwise)
    }

    fn transformed(&self, affine: Affine) -> Segment {
        self.transformed_ellipse(affine).into()
    }

    fn write_to_context<C: PathContext + ?Sized>(&self, context: &mut C) {
        context.ellipse(
            self.center,
            self.radius_x,
            self.radius_y,
            self.rotation,
            self.start_angle,
            self.end_angle,
            self.anticlockwise,
        );
    }

    fn svg_path_fragment(&self) -> String {
        let sweep = self.sweep();
        let rx = svg_number(self.radius_x);
        let ry = svg_number(self.radius_y);
        let rotation = svg_number(self.rotation.to_degrees());
        let command = |large: u8, sweep_flag: u8, point: Point| {
            format!(
                "A {rx} {ry} {rotation} {large} {sweep_flag} {} {}",
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
        SerializedSegment::EllipticalArc(SerializedEllipticalArc {
            center_x: self.center.x,
            center_y: self.center.y,
            radius_x: self.radius_x,
            radius_y: self.radius_y,
            rotation: self.rotation,
            start_angle: self.start_angle,
            end_angle: self.end_angle,
            anticlockwise: self.anticlockwise,
        })
    }

    fn offset_to(&self, r: f64, reverse: bool) -> Vec<Segment> {
        let last = OFFSET_SAMPLES - 1;
        let mut points: Vec<Point> = (0..OFFSET_SAMPLES)
            .map(|i| {
                let t = i as f64 / last as f64;
                self.position_at(t) + unit_perpendicular(self.tangent_at(t)) * r
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
