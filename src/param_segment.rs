// Copyright 2026 the Kurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The contract shared by every segment kind, and the algorithms built on it.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;

use arrayvec::ArrayVec;

use crate::common::{dist_to_segment_squared, linear, unit_perpendicular};
use crate::epsilon::{flatness, parametric};
use crate::error::{check_scalar, check_t};
use crate::{
    Affine, Arc, Line, PathContext, Point, Ray, RayIntersection, Rect, Segment, SegmentError,
    SerializedSegment, Vec2,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Sorted parametric values where a coordinate derivative vanishes.
pub type ExtremaTs = SmallVec<[f64; 4]>;

/// A dash pattern: alternating dash and gap lengths.
pub type Dashes = SmallVec<[f64; 4]>;

/// The result of splitting a segment at one parameter.
///
/// Holds one element when the split point is an endpoint.
pub type Subdivided<S> = ArrayVec<S, 2>;

/// A point on a segment closest to some query point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nearest {
    /// Parametric value of the closest point.
    pub t: f64,
    /// The closest point.
    pub point: Point,
    /// Squared distance from the query point.
    pub distance_squared: f64,
}

/// Tolerances for [`ParamSegment::arc_length_with`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcLengthOptions {
    /// Largest squared deviation of the midpoint from the chord.
    pub distance_epsilon: f64,
    /// Largest squared deviation relative to the squared chord length.
    pub curve_epsilon: f64,
    /// Subdivision depth after which chords are accepted unconditionally.
    pub max_levels: u32,
}

impl Default for ArcLengthOptions {
    fn default() -> Self {
        ArcLengthOptions {
            distance_epsilon: flatness::ARC_LENGTH_DISTANCE,
            curve_epsilon: flatness::ARC_LENGTH_CURVE,
            max_levels: flatness::ARC_LENGTH_MAX_LEVELS,
        }
    }
}

/// Options for [`ParamSegment::to_piecewise_linear_segments`].
#[derive(Clone, Copy)]
pub struct PiecewiseLinearOptions<'a> {
    /// Levels of subdivision applied regardless of flatness.
    pub min_levels: u32,
    /// Levels of subdivision after which pieces are accepted.
    pub max_levels: u32,
    /// Flatness distance tolerance; `None` disables the check.
    pub distance_epsilon: Option<f64>,
    /// Flatness curve tolerance; `None` disables the check.
    pub curve_epsilon: Option<f64>,
    /// Map applied to every emitted point, for non-Euclidean targets.
    pub point_map: Option<&'a dyn Fn(Point) -> Point>,
}

impl Default for PiecewiseLinearOptions<'_> {
    fn default() -> Self {
        PiecewiseLinearOptions {
            min_levels: 0,
            max_levels: 7,
            distance_epsilon: None,
            curve_epsilon: None,
            point_map: None,
        }
    }
}

impl fmt::Debug for PiecewiseLinearOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PiecewiseLinearOptions")
            .field("min_levels", &self.min_levels)
            .field("max_levels", &self.max_levels)
            .field("distance_epsilon", &self.distance_epsilon)
            .field("curve_epsilon", &self.curve_epsilon)
            .field("point_map", &self.point_map.is_some())
            .finish()
    }
}

impl PiecewiseLinearOptions<'_> {
    fn map(&self, point: Point) -> Point {
        match self.point_map {
            Some(map) => map(point),
            None => point,
        }
    }
}

/// Options for [`ParamSegment::to_piecewise_linear_or_arc_segments`].
#[derive(Clone, Debug, PartialEq)]
pub struct PiecewiseArcOptions {
    /// Levels of subdivision applied regardless of curvature.
    pub min_levels: u32,
    /// Levels of subdivision after which a fitted arc is accepted as is.
    pub max_levels: u32,
    /// Allowed mean curvature change across a piece.
    pub curvature_threshold: f64,
    /// Allowed deviation of a sample from the fitted circle, in distance units.
    pub error_threshold: f64,
    /// Fractions of each piece sampled against the fitted circle.
    pub error_points: SmallVec<[f64; 2]>,
}

impl Default for PiecewiseArcOptions {
    fn default() -> Self {
        PiecewiseArcOptions {
            min_levels: 2,
            max_levels: 7,
            curvature_threshold: 0.02,
            error_threshold: 0.1,
            error_points: SmallVec::from_slice(&[0.25, 0.75]),
        }
    }
}

/// Dash boundaries along a segment.
#[derive(Clone, Debug, PartialEq)]
pub struct DashValues {
    /// Sorted parametric values where the pattern switches between dash and gap.
    pub values: Vec<f64>,
    /// Arc length of the segment, as measured while sampling.
    pub arc_length: f64,
    /// Whether the segment starts inside a dash rather than a gap.
    pub initially_inside: bool,
}

/// The contract every segment kind implements.
///
/// Parametric methods take `t` in `[0, 1]`, where 0 is the start and 1 the
/// end. The unchecked methods only `debug_assert!` the domain; the `try_`
/// variants return an error instead.
pub trait ParamSegment: Clone {
    /// The start point.
    fn start(&self) -> Point;

    /// The end point.
    fn end(&self) -> Point;

    /// Unit tangent at the start.
    fn start_tangent(&self) -> Vec2;

    /// Unit tangent at the end.
    fn end_tangent(&self) -> Vec2;

    /// Axis-aligned bounds of the whole segment.
    fn bounds(&self) -> Rect;

    /// The point at parameter `t`.
    fn position_at(&self, t: f64) -> Point;

    /// The direction of travel at parameter `t`.
    ///
    /// Not normalized for the polynomial kinds; a unit vector for arcs.
    fn tangent_at(&self, t: f64) -> Vec2;

    /// Signed curvature at parameter `t`.
    ///
    /// Positive where the segment turns towards increasing angles, which is
    /// clockwise on a y-down screen.
    fn curvature_at(&self, t: f64) -> f64;

    /// Split at `t` into pieces of the same kind covering `[0, t]` and `[t, 1]`.
    ///
    /// Returns the segment unchanged when `t` is 0 or 1.
    fn subdivided(&self, t: f64) -> Subdivided<Self>;

    /// Sorted strict-interior parameters where the x or y derivative vanishes.
    fn interior_extrema_ts(&self) -> ExtremaTs;

    /// Every crossing of `ray` with this segment, excluding hits behind the origin.
    fn intersection(&self, ray: &Ray) -> Vec<RayIntersection>;

    /// This segment's share of `∮ (x dy - y dx) / 2`.
    ///
    /// Summed over a closed path this is the enclosed signed area.
    fn signed_area_fragment(&self) -> f64;

    /// Decompose into pieces with no zero-length or lower-degree collapse.
    ///
    /// Empty when the segment is a single point.
    fn nondegenerate_segments(&self) -> Vec<Segment>;

    /// The same curve traversed from end to start.
    #[must_use]
    fn reversed(&self) -> Self;

    /// The image of this segment under `affine`.
    fn transformed(&self, affine: Affine) -> Segment;

    /// Draw this segment, assuming the pen is at [`ParamSegment::start`].
    fn write_to_context<C: PathContext + ?Sized>(&self, context: &mut C);

    /// SVG path data for this segment, assuming the pen is at the start.
    fn svg_path_fragment(&self) -> String;

    /// The interchange record for this segment.
    fn serialize(&self) -> SerializedSegment;

    /// Approximate the curve offset by `r` along its perpendicular.
    ///
    /// With `reverse` the result runs from end to start.
    fn offset_to(&self, r: f64, reverse: bool) -> Vec<Segment>;

    /// Sum of the winding contributions of [`ParamSegment::intersection`].
    fn winding_intersection(&self, ray: &Ray) -> i32 {
        self.intersection(ray).iter().map(|hit| hit.wind).sum()
    }

    /// Arc length with the default tolerances.
    fn arc_length(&self) -> f64 {
        self.arc_length_with(ArcLengthOptions::default())
    }

    /// Arc length by recursive bisection until pieces are flat.
    fn arc_length_with(&self, options: ArcLengthOptions) -> f64 {
        arc_length_recursion(
            self,
            &options,
            options.max_levels,
            0.0,
            1.0,
            self.start(),
            self.end(),
        )
    }

    /// Parametric values where a dash pattern starting at `offset` toggles.
    ///
    /// # Errors
    ///
    /// Fails for an empty pattern, a negative or non-finite entry, a pattern
    /// summing to zero, or a non-finite offset.
    fn dash_values(
        &self,
        dashes: &[f64],
        offset: f64,
        distance_epsilon: f64,
        curve_epsilon: f64,
    ) -> Result<DashValues, SegmentError> {
        dash_values(self, dashes, offset, distance_epsilon, curve_epsilon)
    }

    /// Approximate the segment with lines.
    fn to_piecewise_linear_segments(&self, options: &PiecewiseLinearOptions<'_>) -> Vec<Line> {
        let mut lines = Vec::new();
        let start = options.map(self.start());
        let middle = options.map(self.position_at(0.5));
        let end = options.map(self.end());
        piecewise_linear_recursion(
            self,
            options,
            options.min_levels,
            options.max_levels,
            &mut lines,
            (0.0, 1.0),
            [start, middle, end],
        );
        lines
    }

    /// Approximate the segment with circular arcs, falling back to lines
    /// where three points are collinear.
    fn to_piecewise_linear_or_arc_segments(&self, options: &PiecewiseArcOptions) -> Vec<Segment> {
        let mut segments = Vec::new();
        piecewise_arc_recursion(
            self,
            options,
            options.min_levels,
            options.max_levels,
            &mut segments,
            (0.0, 1.0),
            (self.start(), self.end()),
            (self.curvature_at(0.0), self.curvature_at(1.0)),
        );
        segments
    }

    /// Split at every parameter of the sorted list `ts`.
    fn subdivisions(&self, ts: &[f64]) -> Vec<Self> {
        let mut result = Vec::with_capacity(ts.len() + 1);
        let mut right = self.clone();
        let mut consumed = 0.0;
        for &t in ts {
            // Rescale into the remaining piece.
            let local = linear(consumed, 1.0, 0.0, 1.0, t);
            if local <= 0.0 {
                continue;
            }
            if local >= 1.0 {
                break;
            }
            let mut pieces = right.subdivided(local).into_iter();
            match (pieces.next(), pieces.next()) {
                (Some(left), Some(rest)) => {
                    result.push(left);
                    right = rest;
                }
                (Some(whole), None) => right = whole,
                _ => {}
            }
            consumed = t;
        }
        result.push(right);
        result
    }

    /// Split into pieces that are monotone in both x and y.
    fn subdivided_into_monotone(&self) -> Vec<Self> {
        self.subdivisions(&self.interior_extrema_ts())
    }

    /// The left edge of a stroke of width `line_width`, in the segment's direction.
    fn stroke_left(&self, line_width: f64) -> Vec<Segment> {
        self.offset_to(-line_width / 2.0, false)
    }

    /// The right edge of a stroke of width `line_width`, running backwards.
    fn stroke_right(&self, line_width: f64) -> Vec<Segment> {
        self.offset_to(line_width / 2.0, true)
    }

    /// Bounds of the transformed segment.
    fn bounds_with_transform(&self, affine: Affine) -> Rect {
        self.transformed(affine).bounds()
    }

    /// [`ParamSegment::position_at`], rejecting `t` outside `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Fails when `t` is outside `[0, 1]` or NaN.
    fn try_position_at(&self, t: f64) -> Result<Point, SegmentError> {
        check_t(t).map(|t| self.position_at(t))
    }

    /// [`ParamSegment::tangent_at`], rejecting `t` outside `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Fails when `t` is outside `[0, 1]` or NaN.
    fn try_tangent_at(&self, t: f64) -> Result<Vec2, SegmentError> {
        check_t(t).map(|t| self.tangent_at(t))
    }

    /// [`ParamSegment::curvature_at`], rejecting `t` outside `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Fails when `t` is outside `[0, 1]` or NaN.
    fn try_curvature_at(&self, t: f64) -> Result<f64, SegmentError> {
        check_t(t).map(|t| self.curvature_at(t))
    }

    /// [`ParamSegment::subdivided`], rejecting `t` outside `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Fails when `t` is outside `[0, 1]` or NaN.
    fn try_subdivided(&self, t: f64) -> Result<Subdivided<Self>, SegmentError> {
        check_t(t).map(|t| self.subdivided(t))
    }
}

/// Whether the piece through `start`, `middle` and `end` is close enough to
/// its chord.
///
/// `middle` fails the test if its squared distance to the chord exceeds
/// `distance_epsilon`, or exceeds `curve_epsilon` times the squared chord length.
pub fn is_sufficiently_flat(
    distance_epsilon: f64,
    curve_epsilon: f64,
    start: Point,
    middle: Point,
    end: Point,
) -> bool {
    let d0 = dist_to_segment_squared(middle, start, end);
    let d1 = start.distance_squared(end);
    !(d0 / d1 > curve_epsilon || d0 > distance_epsilon)
}

fn arc_length_recursion<S: ParamSegment + ?Sized>(
    segment: &S,
    options: &ArcLengthOptions,
    levels: u32,
    t0: f64,
    t1: f64,
    p0: Point,
    p1: Point,
) -> f64 {
    let tm = 0.5 * (t0 + t1);
    let pm = segment.position_at(tm);
    if levels == 0
        || is_sufficiently_flat(options.distance_epsilon, options.curve_epsilon, p0, pm, p1)
    {
        p0.distance(p1)
    } else {
        arc_length_recursion(segment, options, levels - 1, t0, tm, p0, pm)
            + arc_length_recursion(segment, options, levels - 1, tm, t1, pm, p1)
    }
}

struct DashState<'a> {
    dashes: &'a [f64],
    index: usize,
    offset: f64,
    inside: bool,
    values: Vec<f64>,
    arc_length: f64,
}

impl DashState<'_> {
    fn advance(&mut self) {
        self.index = (self.index + 1) % self.dashes.len();
        self.inside = !self.inside;
    }
}

fn dash_values<S: ParamSegment + ?Sized>(
    segment: &S,
    dashes: &[f64],
    offset: f64,
    distance_epsilon: f64,
    curve_epsilon: f64,
) -> Result<DashValues, SegmentError> {
    check_scalar(offset, "dash offset")?;
    if dashes.is_empty() || dashes.iter().any(|d| !d.is_finite() || *d < 0.0) {
        return Err(SegmentError::InvalidDashPattern);
    }
    let sum: f64 = dashes.iter().sum();
    if sum <= 0.0 {
        return Err(SegmentError::InvalidDashPattern);
    }
    let mut state = DashState {
        dashes,
        index: 0,
        offset: 0.0,
        inside: true,
        values: Vec::new(),
        arc_length: 0.0,
    };

    // Burn off the initial offset.
    let mut remaining = offset % sum;
    if remaining < 0.0 {
        remaining += sum;
    }
    while remaining > 0.0 {
        if remaining >= dashes[state.index] {
            remaining -= dashes[state.index];
            state.advance();
        } else {
            state.offset = remaining;
            remaining = 0.0;
        }
    }
    let initially_inside = state.inside;

    dash_recursion(
        segment,
        &mut state,
        (distance_epsilon, curve_epsilon),
        0,
        (0.0, 1.0),
        (segment.start(), segment.end()),
    );
    Ok(DashValues {
        values: state.values,
        arc_length: state.arc_length,
        initially_inside,
    })
}

fn dash_recursion<S: ParamSegment + ?Sized>(
    segment: &S,
    state: &mut DashState<'_>,
    epsilons: (f64, f64),
    depth: u32,
    (t0, t1): (f64, f64),
    (p0, p1): (Point, Point),
) {
    let t_mid = 0.5 * (t0 + t1);
    let p_mid = segment.position_at(t_mid);
    if depth > flatness::DASH_MAX_DEPTH
        || is_sufficiently_flat(epsilons.0, epsilons.1, p0, p_mid, p1)
    {
        let total_length = p0.distance(p_mid) + p_mid.distance(p1);
        state.arc_length += total_length;

        let mut length_left = total_length;
        while state.offset + length_left >= state.dashes[state.index] {
            let along = total_length - length_left + state.dashes[state.index] - state.offset;
            let t = if total_length > 0.0 {
                linear(0.0, total_length, t0, t1, along)
            } else {
                t0
            };
            state.values.push(t);
            length_left -= state.dashes[state.index] - state.offset;
            state.offset = 0.0;
            state.advance();
        }
        state.offset += length_left;
    } else {
        dash_recursion(segment, state, epsilons, depth + 1, (t0, t_mid), (p0, p_mid));
        dash_recursion(segment, state, epsilons, depth + 1, (t_mid, t1), (p_mid, p1));
    }
}

fn piecewise_linear_recursion<S: ParamSegment + ?Sized>(
    segment: &S,
    options: &PiecewiseLinearOptions<'_>,
    min_levels: u32,
    max_levels: u32,
    lines: &mut Vec<Line>,
    (t0, t1): (f64, f64),
    [start, middle, end]: [Point; 3],
) {
    let distance_epsilon = options.distance_epsilon.unwrap_or(f64::INFINITY);
    let curve_epsilon = options.curve_epsilon.unwrap_or(f64::INFINITY);
    if max_levels == 0
        || (min_levels == 0
            && is_sufficiently_flat(distance_epsilon, curve_epsilon, start, middle, end))
    {
        lines.push(Line::from_points(start, end));
        return;
    }
    let tm = 0.5 * (t0 + t1);
    // Only the newly created midpoints are mapped; ancestors already were.
    let first_middle = options.map(segment.position_at(0.5 * (t0 + tm)));
    let second_middle = options.map(segment.position_at(0.5 * (tm + t1)));
    let min_levels = min_levels.saturating_sub(1);
    let max_levels = max_levels - 1;
    piecewise_linear_recursion(
        segment,
        options,
        min_levels,
        max_levels,
        lines,
        (t0, tm),
        [start, first_middle, middle],
    );
    piecewise_linear_recursion(
        segment,
        options,
        min_levels,
        max_levels,
        lines,
        (tm, t1),
        [middle, second_middle, end],
    );
}

#[expect(clippy::too_many_arguments, reason = "recursion state is passed down explicitly")]
fn piecewise_arc_recursion<S: ParamSegment + ?Sized>(
    segment: &S,
    options: &PiecewiseArcOptions,
    min_levels: u32,
    max_levels: u32,
    segments: &mut Vec<Segment>,
    (t0, t1): (f64, f64),
    (start, end): (Point, Point),
    (start_curvature, end_curvature): (f64, f64),
) {
    let tm = 0.5 * (t0 + t1);
    let middle = segment.position_at(tm);
    let middle_curvature = segment.curvature_at(tm);
    let curvature_change =
        (start_curvature - middle_curvature).abs() + (middle_curvature - end_curvature).abs();
    if max_levels == 0
        || (min_levels == 0 && curvature_change < options.curvature_threshold * 2.0)
    {
        let fitted = Arc::create_from_points(start, middle, end);
        let within_error = match &fitted {
            Segment::Arc(arc) => options.error_points.iter().all(|&fraction| {
                let sample = segment.position_at(t0 * (1.0 - fraction) + t1 * fraction);
                (sample.distance(arc.center()) - arc.radius()).abs() <= options.error_threshold
            }),
            _ => true,
        };
        // At the depth cap the fit is taken even if it is poor.
        if within_error || max_levels == 0 {
            segments.push(fitted);
            return;
        }
    }
    let min_levels = min_levels.saturating_sub(1);
    let max_levels = max_levels - 1;
    piecewise_arc_recursion(
        segment,
        options,
        min_levels,
        max_levels,
        segments,
        (t0, tm),
        (start, middle),
        (start_curvature, middle_curvature),
    );
    piecewise_arc_recursion(
        segment,
        options,
        min_levels,
        max_levels,
        segments,
        (tm, t1),
        (middle, end),
        (middle_curvature, end_curvature),
    );
}

/// Keep the candidates strictly inside `(0, 1)`, sorted and deduplicated.
pub(crate) fn interior_extrema(candidates: impl IntoIterator<Item = f64>) -> ExtremaTs {
    let mut ts: ExtremaTs = candidates
        .into_iter()
        .filter(|t| *t > parametric::EXTREMA && *t < 1.0 - parametric::EXTREMA)
        .collect();
    ts.sort_by(f64::total_cmp);
    ts.dedup_by(|a, b| (*a - *b).abs() <= parametric::EXTREMA);
    ts
}

/// Curvature of a Bézier at `t`.
///
/// Near either end the closed form over the first three control points is
/// used; elsewhere the curve is split at `t` so that `t` becomes an end.
/// `endpoint_polygon` returns the three control points that meet the
/// start (`true`) or the end (`false`), starting from that endpoint.
pub(crate) fn bezier_curvature_at<S: ParamSegment>(
    segment: &S,
    t: f64,
    degree: f64,
    endpoint_polygon: fn(&S, bool) -> [Point; 3],
) -> f64 {
    if (t - 0.5).abs() > 0.5 - parametric::CURVATURE_ENDPOINT {
        let at_start = t < 0.5;
        let [p0, p1, p2] = endpoint_polygon(segment, at_start);
        let d10 = p1 - p0;
        let a = d10.hypot();
        let sign = if at_start { -1.0 } else { 1.0 };
        let h = sign * unit_perpendicular(d10).dot(p2 - p1);
        (h * (degree - 1.0)) / (degree * a * a)
    } else {
        match segment.subdivided(t).first() {
            Some(first) => bezier_curvature_at(first, 1.0, degree, endpoint_polygon),
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epsilon::flatness::{DASH_CURVE, DASH_DISTANCE};
    use crate::{CubicBez, QuadBez};

    #[test]
    fn flatness() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!(is_sufficiently_flat(1e-10, 1e-8, a, Point::new(5.0, 0.0), b));
        assert!(!is_sufficiently_flat(1e-10, 1e-8, a, Point::new(5.0, 1.0), b));
        // A closed loop never looks flat unless the midpoint is on the start.
        assert!(!is_sufficiently_flat(1e-10, 1e-8, a, Point::new(5.0, 1.0), a));
    }

    #[test]
    fn extrema_filtering() {
        let ts = interior_extrema([0.7, 0.0, 0.3, 0.3 + 1e-12, 1.0, f64::NAN]);
        assert_eq!(ts.as_slice(), &[0.3, 0.7]);
    }

    #[test]
    fn dash_values_on_line() {
        let line = Line::new((0.0, 0.0), (10.0, 0.0)).unwrap();
        let dashes = line.dash_values(&[2.0, 3.0], 0.0, DASH_DISTANCE, DASH_CURVE).unwrap();
        assert!((dashes.arc_length - 10.0).abs() < 1e-12);
        assert!(dashes.initially_inside);
        let expected = [0.2, 0.5, 0.7, 1.0];
        assert_eq!(dashes.values.len(), expected.len());
        for (value, expected) in dashes.values.iter().zip(expected) {
            assert!((value - expected).abs() < 1e-12);
        }

        let shifted = line.dash_values(&[2.0, 3.0], 3.0, DASH_DISTANCE, DASH_CURVE).unwrap();
        assert!(!shifted.initially_inside);
        assert!((shifted.values[0] - 0.2).abs() < 1e-12);

        assert_eq!(
            line.dash_values(&[], 0.0, DASH_DISTANCE, DASH_CURVE),
            Err(SegmentError::InvalidDashPattern)
        );
        assert_eq!(
            line.dash_values(&[0.0, 0.0], 0.0, DASH_DISTANCE, DASH_CURVE),
            Err(SegmentError::InvalidDashPattern)
        );
    }

    #[test]
    fn dash_arc_length_matches() {
        let q = QuadBez::new((0.0, 0.0), (5.0, 10.0), (10.0, 0.0)).unwrap();
        let dashes = q.dash_values(&[1.0], -0.5, DASH_DISTANCE, DASH_CURVE).unwrap();
        assert!((dashes.arc_length - q.arc_length()).abs() < 1e-6);
        assert!(dashes.values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn piecewise_linear() {
        let c = CubicBez::new((0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)).unwrap();
        let lines = c.to_piecewise_linear_segments(&PiecewiseLinearOptions {
            min_levels: 3,
            max_levels: 3,
            ..Default::default()
        });
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0].start(), c.start());
        assert_eq!(lines[7].end(), c.end());
        for pair in lines.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }

        let shift = |p: Point| Point::new(p.x + 100.0, p.y);
        let shifted = c.to_piecewise_linear_segments(&PiecewiseLinearOptions {
            min_levels: 1,
            max_levels: 1,
            point_map: Some(&shift),
            ..Default::default()
        });
        assert_eq!(shifted.len(), 2);
        assert_eq!(shifted[0].start(), Point::new(100.0, 0.0));
        assert_eq!(shifted[1].end(), Point::new(110.0, 0.0));
    }

    #[test]
    fn piecewise_arcs() {
        let q = QuadBez::new((0.0, 0.0), (5.0, 10.0), (10.0, 0.0)).unwrap();
        let segments = q.to_piecewise_linear_or_arc_segments(&PiecewiseArcOptions::default());
        assert!(segments.len() >= 4);
        assert!(segments[0].start().distance(q.start()) < 1e-9);
        assert!(segments[segments.len() - 1].end().distance(q.end()) < 1e-9);
        for pair in segments.windows(2) {
            assert!(pair[0].end().distance(pair[1].start()) < 1e-9);
        }
    }

    #[test]
    fn subdivisions() {
        let line = Line::new((0.0, 0.0), (10.0, 0.0)).unwrap();
        let pieces = line.subdivisions(&[0.0, 0.25, 0.5, 1.0]);
        assert_eq!(pieces.len(), 3);
        assert!((pieces[0].end().x - 2.5).abs() < 1e-12);
        assert!((pieces[1].end().x - 5.0).abs() < 1e-12);
        assert_eq!(pieces[2].end(), Point::new(10.0, 0.0));
    }

    #[test]
    fn checked_parameters() {
        let line = Line::new((0.0, 0.0), (10.0, 0.0)).unwrap();
        assert_eq!(line.try_position_at(0.5), Ok(Point::new(5.0, 0.0)));
        assert_eq!(
            line.try_position_at(1.5),
            Err(SegmentError::ParameterOutOfRange { t: 1.5 })
        );
        assert!(line.try_tangent_at(f64::NAN).is_err());
        assert!(line.try_subdivided(-0.1).is_err());
    }
}
