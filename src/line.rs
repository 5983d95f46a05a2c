// Copyright 2026 the Kurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lines.

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::common::{line_segment_intersection, unit_perpendicular};
use crate::epsilon::{distance, parametric};
use crate::error::check_point;
use crate::overlap::{bezier_overlap, Overlap};
use crate::param_segment::{
    ArcLengthOptions, ExtremaTs, Nearest, ParamSegment, PiecewiseLinearOptions, Subdivided,
};
use crate::ray::hit_from_tangent;
use crate::serialize::SerializedLine;
use crate::svg::svg_number;
use crate::{
    Affine, Arc, PathContext, Point, Ray, RayIntersection, Rect, Segment, SegmentError,
    SegmentIntersection, SerializedSegment, Vec2,
};

/// A single line segment.
#[derive(Clone, Debug)]
pub struct Line {
    start: Point,
    end: Point,
    revision: u64,
}

impl Line {
    /// Create a line between two points.
    ///
    /// # Errors
    ///
    /// Fails if a coordinate is not finite.
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Result<Line, SegmentError> {
        Ok(Line::from_points(
            check_point(start.into(), "start")?,
            check_point(end.into(), "end")?,
        ))
    }

    #[inline]
    pub(crate) fn from_points(start: Point, end: Point) -> Line {
        Line {
            start,
            end,
            revision: 0,
        }
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
            self.revision += 1;
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
            self.revision += 1;
        }
        Ok(self)
    }

    /// Number of changes applied through the setters.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The length of the line.
    #[inline]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// The point on the line closest to `point`, by projection onto the
    /// line clamped to its ends.
    pub fn explicit_closest_to_point(&self, point: Point) -> Nearest {
        let delta = self.end - self.start;
        // NaN for a zero-length line; `max` turns it into 0.
        let t = ((point - self.start).dot(delta) / delta.hypot2())
            .max(0.0)
            .min(1.0);
        let closest = self.position_at(t);
        Nearest {
            t,
            point: closest,
            distance_squared: closest.distance_squared(point),
        }
    }

    /// The linear reparametrization between two collinear lines, if they overlap.
    ///
    /// See [`Overlap`] for the direction of the mapping.
    pub fn overlaps(first: &Line, second: &Line, epsilon: f64) -> Option<Overlap> {
        bezier_overlap(&[first.start, first.end], &[second.start, second.end], epsilon)
    }

    /// Crossing of two lines, with each line's own parameter.
    pub fn intersect(a: &Line, b: &Line) -> Vec<SegmentIntersection> {
        match line_segment_intersection(a.start, a.end, b.start, b.end) {
            Some(point) => vec![SegmentIntersection {
                point,
                a_t: a.explicit_closest_to_point(point).t,
                b_t: b.explicit_closest_to_point(point).t,
            }],
            None => Vec::new(),
        }
    }

    /// Crossings of `line` with any other segment, found by casting a ray
    /// along the line.
    ///
    /// Hits within a small parametric distance of either end of the line are
    /// dropped. In the results `a_t` is on `line` and `b_t` on `other`.
    pub fn intersect_other(line: &Line, other: &Segment) -> Vec<SegmentIntersection> {
        let length = line.length();
        if length == 0.0 {
            return Vec::new();
        }
        let ray = Ray::from_unit(line.start, (line.end - line.start) / length);
        other
            .intersection(&ray)
            .into_iter()
            .filter_map(|hit| {
                let a_t = hit.distance / length;
                (a_t > parametric::LINE_ENDPOINT && a_t < 1.0 - parametric::LINE_ENDPOINT).then(
                    || SegmentIntersection {
                        point: hit.point,
                        a_t,
                        b_t: hit.t,
                    },
                )
            })
            .collect()
    }

    /// Interpret the line in polar coordinates, `x` as angle and `y` as
    /// radius, and convert it to Cartesian segments.
    ///
    /// Constant angle stays a line and constant radius becomes an arc
    /// around the origin. Anything else is approximated with lines using
    /// `options`, whose `point_map` is replaced by the polar conversion.
    pub fn polar_to_cartesian(&self, options: &PiecewiseLinearOptions<'_>) -> Vec<Segment> {
        let to_cartesian = |p: Point| Point::from_polar(p.y, p.x);
        if self.start.x == self.end.x {
            vec![Line::from_points(to_cartesian(self.start), to_cartesian(self.end)).into()]
        } else if self.start.y == self.end.y {
            vec![Arc::from_parts(
                Point::ORIGIN,
                self.start.y,
                self.start.x,
                self.end.x,
                self.start.x > self.end.x,
            )
            .into()]
        } else {
            let polar_options = PiecewiseLinearOptions {
                point_map: Some(&to_cartesian),
                ..*options
            };
            self.to_piecewise_linear_segments(&polar_options)
                .into_iter()
                .map(Segment::from)
                .collect()
        }
    }

    fn unit_direction(&self) -> Vec2 {
        (self.end - self.start).normalize()
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Line) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl ParamSegment for Line {
    #[inline]
    fn start(&self) -> Point {
        self.start
    }

    #[inline]
    fn end(&self) -> Point {
        self.end
    }

    fn start_tangent(&self) -> Vec2 {
        self.unit_direction()
    }

    fn end_tangent(&self) -> Vec2 {
        self.unit_direction()
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    #[inline]
    fn position_at(&self, t: f64) -> Point {
        debug_assert!((0.0..=1.0).contains(&t), "t out of range: {t}");
        self.start.lerp(self.end, t)
    }

    #[inline]
    fn tangent_at(&self, t: f64) -> Vec2 {
        debug_assert!((0.0..=1.0).contains(&t), "t out of range: {t}");
        self.end - self.start
    }

    fn curvature_at(&self, t: f64) -> f64 {
        debug_assert!((0.0..=1.0).contains(&t), "t out of range: {t}");
        0.0
    }

    fn subdivided(&self, t: f64) -> Subdivided<Self> {
        debug_assert!((0.0..=1.0).contains(&t), "t out of range: {t}");
        let mut result = Subdivided::new();
        if t == 0.0 || t == 1.0 {
            result.push(self.clone());
        } else {
            let middle = self.position_at(t);
            result.push(Line::from_points(self.start, middle));
            result.push(Line::from_points(middle, self.end));
        }
        result
    }

    fn interior_extrema_ts(&self) -> ExtremaTs {
        ExtremaTs::new()
    }

    fn intersection(&self, ray: &Ray) -> Vec<RayIntersection> {
        let start = self.start;
        let diff = self.end - start;
        let origin = ray.origin();
        let dir = ray.direction();

        let denom = dir.y * diff.x - dir.x * diff.y;
        if denom == 0.0 {
            return Vec::new();
        }
        let t = (dir.x * (start.y - origin.y) - dir.y * (start.x - origin.x)) / denom;
        if !(0.0..1.0).contains(&t) {
            return Vec::new();
        }
        let s = (diff.x * (start.y - origin.y) - diff.y * (start.x - origin.x)) / denom;
        if s < distance::RAY_BEHIND {
            return Vec::new();
        }
        vec![hit_from_tangent(ray, self.position_at(t), diff, t)]
    }

    fn signed_area_fragment(&self) -> f64 {
        0.5 * self.start.to_vec2().cross(self.end.to_vec2())
    }

    fn nondegenerate_segments(&self) -> Vec<Segment> {
        if self.start == self.end {
            Vec::new()
        } else {
            vec![self.clone().into()]
        }
    }

    fn reversed(&self) -> Line {
        Line::from_points(self.end, self.start)
    }

    fn transformed(&self, affine: Affine) -> Segment {
        Line::from_points(affine * self.start, affine * self.end).into()
    }

    fn write_to_context<C: PathContext + ?Sized>(&self, context: &mut C) {
        context.line_to(self.end);
    }

    fn svg_path_fragment(&self) -> String {
        format!("L {} {}", svg_number(self.end.x), svg_number(self.end.y))
    }

    fn serialize(&self) -> SerializedSegment {
        SerializedSegment::Line(SerializedLine {
            start_x: self.start.x,
            start_y: self.start.y,
            end_x: self.end.x,
            end_y: self.end.y,
        })
    }

    fn offset_to(&self, r: f64, reverse: bool) -> Vec<Segment> {
        let offset = unit_perpendicular(self.end - self.start) * r;
        let line = Line::from_points(self.start + offset, self.end + offset);
        let line = if reverse { line.reversed() } else { line };
        vec![line.into()]
    }

    fn arc_length_with(&self, _options: ArcLengthOptions) -> f64 {
        self.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuadBez;

    fn assert_near(p0: Point, p1: Point) {
        assert!((p1 - p0).hypot() < 1e-9, "{p0:?} != {p1:?}");
    }

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Line {
        Line::new((x0, y0), (x1, y1)).unwrap()
    }

    #[test]
    fn position_and_tangent() {
        let l = line(0.0, 0.0, 10.0, 0.0);
        assert_eq!(l.position_at(0.5), Point::new(5.0, 0.0));
        assert_eq!(l.position_at(0.0), l.start());
        assert_eq!(l.position_at(1.0), l.end());
        assert_eq!(l.tangent_at(0.3), Vec2::new(10.0, 0.0));
        assert_eq!(l.start_tangent(), Vec2::new(1.0, 0.0));
        assert_eq!(l.curvature_at(0.7), 0.0);
        assert!((l.arc_length() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn square_area() {
        let corners = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
        let area: f64 = (0..4)
            .map(|i| {
                let (x0, y0) = corners[i];
                let (x1, y1) = corners[(i + 1) % 4];
                line(x0, y0, x1, y1).signed_area_fragment()
            })
            .sum();
        assert!((area - 100.0).abs() < 1e-12);
    }

    #[test]
    fn setters_bump_revision() {
        let mut l = line(0.0, 0.0, 1.0, 1.0);
        l.set_end((1.0, 1.0)).unwrap();
        assert_eq!(l.revision(), 0);
        l.set_start((2.0, 0.0)).unwrap().set_end((3.0, 0.0)).unwrap();
        assert_eq!(l.revision(), 2);
        assert_eq!(l.start(), Point::new(2.0, 0.0));
        assert!(l.set_start((f64::NAN, 0.0)).is_err());
        assert_eq!(l.revision(), 2);
    }

    #[test]
    fn subdivision() {
        let l = line(0.0, 0.0, 10.0, 20.0);
        let halves = l.subdivided(0.25);
        assert_eq!(halves.len(), 2);
        assert_near(halves[0].end(), Point::new(2.5, 5.0));
        assert_near(halves[1].position_at(0.5), l.position_at(0.625));
        assert_eq!(l.subdivided(1.0).len(), 1);
    }

    #[test]
    fn ray_hits() {
        let l = line(0.0, -5.0, 0.0, 5.0);
        let ray = Ray::new((-10.0, 0.0), (1.0, 0.0)).unwrap();
        let hits = l.intersection(&ray);
        assert_eq!(hits.len(), 1);
        let hit = hits[0];
        assert!((hit.distance - 10.0).abs() < 1e-12);
        assert!((hit.t - 0.5).abs() < 1e-12);
        assert_near(hit.point, Point::ORIGIN);
        assert!(hit.normal.dot(ray.direction()) < 0.0);
        assert_eq!(hit.wind, 1);
        assert_eq!(l.reversed().winding_intersection(&ray), -1);

        let behind = Ray::new((10.0, 0.0), (1.0, 0.0)).unwrap();
        assert!(l.intersection(&behind).is_empty());
        let parallel = Ray::new((-10.0, 0.0), (0.0, 1.0)).unwrap();
        assert!(l.intersection(&parallel).is_empty());
    }

    #[test]
    fn closest_point() {
        let l = line(0.0, 0.0, 10.0, 0.0);
        let near = l.explicit_closest_to_point(Point::new(3.0, 4.0));
        assert!((near.t - 0.3).abs() < 1e-12);
        assert!((near.distance_squared - 16.0).abs() < 1e-12);
        assert_eq!(l.explicit_closest_to_point(Point::new(-5.0, 1.0)).t, 0.0);
        assert_eq!(l.explicit_closest_to_point(Point::new(15.0, 1.0)).t, 1.0);
        let point = line(1.0, 1.0, 1.0, 1.0);
        assert_eq!(point.explicit_closest_to_point(Point::ORIGIN).t, 0.0);
    }

    #[test]
    fn line_line_intersection() {
        let a = line(0.0, 0.0, 10.0, 10.0);
        let b = line(0.0, 10.0, 10.0, 0.0);
        let hits = Line::intersect(&a, &b);
        assert_eq!(hits.len(), 1);
        assert_near(hits[0].point, Point::new(5.0, 5.0));
        assert!((hits[0].a_t - 0.5).abs() < 1e-12);
        assert!((hits[0].b_t - 0.5).abs() < 1e-12);
        assert!(Line::intersect(&a, &line(0.0, 1.0, 10.0, 11.0)).is_empty());
    }

    #[test]
    fn line_other_intersection() {
        let l = line(0.0, 2.0, 10.0, 2.0);
        let q: Segment = QuadBez::new((0.0, 0.0), (5.0, 10.0), (10.0, 0.0)).unwrap().into();
        let hits = Line::intersect_other(&l, &q);
        assert_eq!(hits.len(), 2);
        for hit in hits {
            assert!((hit.point.y - 2.0).abs() < 1e-9);
            assert_near(l.position_at(hit.a_t), hit.point);
            assert_near(q.position_at(hit.b_t), hit.point);
        }
    }

    #[test]
    fn collinear_overlap() {
        let a = line(0.0, 0.0, 10.0, 0.0);
        let b = line(5.0, 0.0, 15.0, 0.0);
        let overlap = Line::overlaps(&a, &b, 1e-6).unwrap();
        assert!((overlap.a - 1.0).abs() < 1e-12);
        assert!((overlap.b - 0.5).abs() < 1e-12);
        for i in 0..=10 {
            let t = f64::from(i) / 20.0;
            assert_near(b.position_at(t), a.position_at(overlap.apply(t)));
        }
        assert!(Line::overlaps(&a, &line(20.0, 0.0, 30.0, 0.0), 1e-6).is_none());
        assert!(Line::overlaps(&a, &line(0.0, 1.0, 10.0, 1.0), 1e-6).is_none());
    }

    #[test]
    fn degenerate_and_offset() {
        assert!(line(1.0, 1.0, 1.0, 1.0).nondegenerate_segments().is_empty());
        let l = line(0.0, 0.0, 10.0, 0.0);
        assert_eq!(l.nondegenerate_segments().len(), 1);

        let left = l.stroke_left(2.0);
        assert_eq!(left.len(), 1);
        assert_near(left[0].start(), Point::new(0.0, 1.0));
        let right = l.stroke_right(2.0);
        assert_near(right[0].start(), Point::new(10.0, -1.0));
        assert_near(right[0].end(), Point::new(0.0, -1.0));
    }

    #[test]
    fn polar() {
        let radial = line(0.5, 1.0, 0.5, 2.0);
        assert!(matches!(
            radial.polar_to_cartesian(&PiecewiseLinearOptions::default())[..],
            [Segment::Line(_)]
        ));

        let circular = line(0.0, 2.0, core::f64::consts::PI, 2.0);
        let segments = circular.polar_to_cartesian(&PiecewiseLinearOptions::default());
        let [Segment::Arc(arc)] = &segments[..] else {
            panic!("expected an arc, got {segments:?}");
        };
        assert_near(arc.start(), Point::new(2.0, 0.0));
        assert_near(arc.end(), Point::new(-2.0, 0.0));

        let spiral = line(0.0, 1.0, 1.0, 2.0);
        let pieces = spiral.polar_to_cartesian(&PiecewiseLinearOptions {
            min_levels: 2,
            max_levels: 2,
            ..Default::default()
        });
        assert_eq!(pieces.len(), 4);
        assert_near(pieces[0].start(), Point::new(1.0, 0.0));
        assert_near(pieces[3].end(), Point::from_polar(2.0, 1.0));
    }

    #[test]
    fn svg_and_transform() {
        let l = line(0.0, 0.0, 10.0, -2.5);
        assert_eq!(l.svg_path_fragment(), "L 10 -2.5");
        let moved = l.transformed(Affine::translate((1.0, 1.0)));
        assert_near(moved.end(), Point::new(11.0, -1.5));
        assert_eq!(l.reversed().reversed(), l);
    }
}
