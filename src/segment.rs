// Copyright 2026 the Kurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed family of segment kinds.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use arrayvec::ArrayVec;

use crate::closest::{closest_to_point, ClosestToPoint};
use crate::param_segment::{ArcLengthOptions, ExtremaTs, ParamSegment, Subdivided};
use crate::{
    Affine, Arc, CubicBez, EllipticalArc, Line, Overlap, PathContext, Point, QuadBez, Ray,
    RayIntersection, Rect, SegmentError, SegmentIntersection, SerializedSegment, Vec2,
};

/// Any one of the segment kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum Segment {
    /// A line.
    Line(Line),
    /// A quadratic Bézier.
    Quadratic(QuadBez),
    /// A cubic Bézier.
    Cubic(CubicBez),
    /// A circular arc.
    Arc(Arc),
    /// An arc of a rotated ellipse.
    EllipticalArc(EllipticalArc),
}

/// The kind of a [`Segment`], named as in the serialized `type` tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentKind {
    /// [`Segment::Line`].
    Line,
    /// [`Segment::Quadratic`].
    Quadratic,
    /// [`Segment::Cubic`].
    Cubic,
    /// [`Segment::Arc`].
    Arc,
    /// [`Segment::EllipticalArc`].
    EllipticalArc,
}

impl SegmentKind {
    /// The `type` tag of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            SegmentKind::Line => "Line",
            SegmentKind::Quadratic => "Quadratic",
            SegmentKind::Cubic => "Cubic",
            SegmentKind::Arc => "Arc",
            SegmentKind::EllipticalArc => "EllipticalArc",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SegmentKind {
    type Err = SegmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Line" => Ok(SegmentKind::Line),
            "Quadratic" => Ok(SegmentKind::Quadratic),
            "Cubic" => Ok(SegmentKind::Cubic),
            "Arc" => Ok(SegmentKind::Arc),
            "EllipticalArc" => Ok(SegmentKind::EllipticalArc),
            _ => Err(SegmentError::UnknownSegmentType(s.to_string())),
        }
    }
}

macro_rules! dispatch {
    ($self:expr, $s:ident => $body:expr) => {
        match $self {
            Segment::Line($s) => $body,
            Segment::Quadratic($s) => $body,
            Segment::Cubic($s) => $body,
            Segment::Arc($s) => $body,
            Segment::EllipticalArc($s) => $body,
        }
    };
}

impl Segment {
    /// Which kind of segment this is.
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Line(_) => SegmentKind::Line,
            Segment::Quadratic(_) => SegmentKind::Quadratic,
            Segment::Cubic(_) => SegmentKind::Cubic,
            Segment::Arc(_) => SegmentKind::Arc,
            Segment::EllipticalArc(_) => SegmentKind::EllipticalArc,
        }
    }

    /// The revision counter of the wrapped segment.
    pub fn revision(&self) -> u64 {
        dispatch!(self, s => s.revision())
    }

    /// Linear reparametrizations under which `other` retraces part of `self`.
    ///
    /// `None` when the kinds differ. Otherwise the overlaps found, each
    /// mapping a parameter on `other` to one on `self`.
    pub fn get_overlaps(&self, other: &Segment, epsilon: f64) -> Option<ArrayVec<Overlap, 2>> {
        let single = |overlap: Option<Overlap>| overlap.into_iter().collect();
        match (self, other) {
            (Segment::Line(a), Segment::Line(b)) => Some(single(Line::overlaps(a, b, epsilon))),
            (Segment::Quadratic(a), Segment::Quadratic(b)) => {
                Some(single(QuadBez::overlaps(a, b, epsilon)))
            }
            (Segment::Cubic(a), Segment::Cubic(b)) => {
                Some(single(CubicBez::overlaps(a, b, epsilon)))
            }
            (Segment::Arc(a), Segment::Arc(b)) => Some(Arc::overlaps(a, b)),
            (Segment::EllipticalArc(a), Segment::EllipticalArc(b)) => {
                Some(EllipticalArc::overlaps(a, b))
            }
            _ => None,
        }
    }

    /// Points where two segments of any kinds meet.
    ///
    /// `a_t` of each result is on `a` and `b_t` on `b`. Where one curve
    /// retraces the other, only the ends of the shared stretch are reported.
    pub fn intersect(a: &Segment, b: &Segment) -> Vec<SegmentIntersection> {
        crate::intersection::intersect(a, b)
    }

    /// The points of `segments` nearest to `point`, with exact ties kept.
    ///
    /// Curved segments are searched until candidate pieces are shorter than
    /// `threshold`.
    pub fn closest_to_point(
        segments: &[Segment],
        point: Point,
        threshold: f64,
    ) -> Vec<ClosestToPoint> {
        closest_to_point(segments, point, threshold)
    }

    /// Rebuild a segment from its interchange record.
    ///
    /// # Errors
    ///
    /// Fails when a field is not finite.
    pub fn deserialize(serialized: &SerializedSegment) -> Result<Segment, SegmentError> {
        Segment::try_from(serialized)
    }
}

impl From<Line> for Segment {
    fn from(line: Line) -> Segment {
        Segment::Line(line)
    }
}

impl From<QuadBez> for Segment {
    fn from(quad: QuadBez) -> Segment {
        Segment::Quadratic(quad)
    }
}

impl From<CubicBez> for Segment {
    fn from(cubic: CubicBez) -> Segment {
        Segment::Cubic(cubic)
    }
}

impl From<Arc> for Segment {
    fn from(arc: Arc) -> Segment {
        Segment::Arc(arc)
    }
}

impl From<EllipticalArc> for Segment {
    fn from(arc: EllipticalArc) -> Segment {
        Segment::EllipticalArc(arc)
    }
}

fn into_segments<S: Into<Segment>>(pieces: Subdivided<S>) -> Subdivided<Segment> {
    pieces.into_iter().map(Into::into).collect()
}

impl ParamSegment for Segment {
    fn start(&self) -> Point {
        dispatch!(self, s => s.start())
    }

    fn end(&self) -> Point {
        dispatch!(self, s => s.end())
    }

    fn start_tangent(&self) -> Vec2 {
        dispatch!(self, s => s.start_tangent())
    }

    fn end_tangent(&self) -> Vec2 {
        dispatch!(self, s => s.end_tangent())
    }

    fn bounds(&self) -> Rect {
        dispatch!(self, s => s.bounds())
    }

    fn position_at(&self, t: f64) -> Point {
        dispatch!(self, s => s.position_at(t))
    }

    fn tangent_at(&self, t: f64) -> Vec2 {
        dispatch!(self, s => s.tangent_at(t))
    }

    fn curvature_at(&self, t: f64) -> f64 {
        dispatch!(self, s => s.curvature_at(t))
    }

    fn subdivided(&self, t: f64) -> Subdivided<Segment> {
        dispatch!(self, s => into_segments(s.subdivided(t)))
    }

    fn interior_extrema_ts(&self) -> ExtremaTs {
        dispatch!(self, s => s.interior_extrema_ts())
    }

    fn intersection(&self, ray: &Ray) -> Vec<RayIntersection> {
        dispatch!(self, s => s.intersection(ray))
    }

    fn signed_area_fragment(&self) -> f64 {
        dispatch!(self, s => s.signed_area_fragment())
    }

    fn nondegenerate_segments(&self) -> Vec<Segment> {
        dispatch!(self, s => s.nondegenerate_segments())
    }

    fn reversed(&self) -> Segment {
        dispatch!(self, s => s.reversed().into())
    }

    fn transformed(&self, affine: Affine) -> Segment {
        dispatch!(self, s => s.transformed(affine))
    }

    fn write_to_context<C: PathContext + ?Sized>(&self, context: &mut C) {
        dispatch!(self, s => s.write_to_context(context));
    }

    fn svg_path_fragment(&self) -> String {
        dispatch!(self, s => s.svg_path_fragment())
    }

    fn serialize(&self) -> SerializedSegment {
        dispatch!(self, s => s.serialize())
    }

    fn offset_to(&self, r: f64, reverse: bool) -> Vec<Segment> {
        dispatch!(self, s => s.offset_to(r, reverse))
    }

    fn arc_length_with(&self, options: ArcLengthOptions) -> f64 {
        dispatch!(self, s => s.arc_length_with(options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epsilon::overlap;
    use crate::param_segment::PiecewiseLinearOptions;
    use core::f64::consts::{FRAC_PI_2, PI, TAU};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn assert_near(p0: Point, p1: Point, epsilon: f64) {
        assert!((p1 - p0).hypot() < epsilon, "{p0:?} != {p1:?}");
    }

    fn samples() -> Vec<Segment> {
        vec![
            Line::new((1.0, 2.0), (7.0, -3.0)).unwrap().into(),
            QuadBez::new((0.0, 0.0), (4.0, 6.0), (9.0, 1.0)).unwrap().into(),
            CubicBez::new((0.0, 0.0), (2.0, 8.0), (7.0, -4.0), (10.0, 3.0))
                .unwrap()
                .into(),
            Arc::new((2.0, 1.0), 3.0, 0.3, 2.5, false).unwrap().into(),
            Arc::new((2.0, 1.0), 3.0, 4.0, 0.5, true).unwrap().into(),
            EllipticalArc::new((1.0, -1.0), 5.0, 2.0, 0.4, -1.0, 2.0, false)
                .unwrap()
                .into(),
        ]
    }

    #[test]
    fn kind_round_trip() {
        for segment in samples() {
            let kind = segment.kind();
            assert_eq!(kind.to_string().parse::<SegmentKind>().unwrap(), kind);
        }
        assert_eq!(
            "Spline".parse::<SegmentKind>(),
            Err(SegmentError::UnknownSegmentType("Spline".to_string()))
        );
    }

    #[test]
    fn endpoints_match_evaluation() {
        for segment in samples() {
            assert_near(segment.position_at(0.0), segment.start(), 1e-12);
            assert_near(segment.position_at(1.0), segment.end(), 1e-12);
        }
    }

    #[test]
    fn bounds_contain_samples() {
        let mut rng = StdRng::seed_from_u64(11);
        for segment in samples() {
            let bounds = segment.bounds().inflate(1e-9);
            for _ in 0..500 {
                assert!(bounds.contains(segment.position_at(rng.random())), "{segment:?}");
            }
        }
    }

    #[test]
    fn reversal() {
        for segment in samples() {
            let reversed = segment.reversed();
            for i in 0..=10 {
                let t = f64::from(i) / 10.0;
                assert_near(reversed.position_at(t), segment.position_at(1.0 - t), 1e-9);
            }
            assert!(
                (reversed.signed_area_fragment() + segment.signed_area_fragment()).abs() < 1e-9
            );
            assert!((reversed.arc_length() - segment.arc_length()).abs() < 1e-6);
        }
    }

    #[test]
    fn subdivision_continuity() {
        let mut rng = StdRng::seed_from_u64(12);
        for segment in samples() {
            let t: f64 = rng.random_range(0.05..0.95);
            let halves = segment.subdivided(t);
            assert_eq!(halves.len(), 2);
            assert_near(halves[0].start(), segment.start(), 1e-9);
            assert_near(halves[0].end(), segment.position_at(t), 1e-9);
            assert_near(halves[1].start(), segment.position_at(t), 1e-9);
            assert_near(halves[1].end(), segment.end(), 1e-9);
            assert_eq!(halves[0].kind(), segment.kind());
            let pieces = segment.subdivided_into_monotone();
            assert_eq!(pieces.len(), segment.interior_extrema_ts().len() + 1);
        }
    }

    #[test]
    fn tangent_direction() {
        let h = 1e-6;
        for segment in samples() {
            for t in [0.2, 0.5, 0.8] {
                let numeric = (segment.position_at(t + h) - segment.position_at(t - h)).normalize();
                let tangent = segment.tangent_at(t).normalize();
                assert!((numeric - tangent).hypot() < 1e-5, "{segment:?} at {t}");
            }
        }
    }

    #[test]
    fn transform_commutes_with_evaluation() {
        let affines = [
            Affine::rotate(0.7).then_translate(Vec2::new(3.0, -1.0)),
            Affine::scale(2.5),
            Affine::scale_non_uniform(1.0, -2.0),
            Affine::new([1.0, 0.3, -0.4, 2.0, 5.0, 6.0]),
        ];
        for segment in samples() {
            for affine in affines {
                let moved = segment.transformed(affine);
                for i in 0..=8 {
                    let t = f64::from(i) / 8.0;
                    assert_near(moved.position_at(t), affine * segment.position_at(t), 1e-8);
                }
                let bounds = segment.bounds_with_transform(affine).inflate(1e-9);
                assert!(bounds.contains(affine * segment.position_at(0.37)));
            }
        }
    }

    #[test]
    fn serialization_round_trip() {
        for segment in samples() {
            let record = segment.serialize();
            let back = Segment::deserialize(&record).unwrap();
            assert_eq!(back, segment);
        }
    }

    #[test]
    fn checked_accessors() {
        for segment in samples() {
            assert!(segment.try_position_at(0.5).is_ok());
            assert!(matches!(
                segment.try_position_at(1.5),
                Err(SegmentError::ParameterOutOfRange { .. })
            ));
            assert!(segment.try_tangent_at(f64::NAN).is_err());
            assert!(segment.try_curvature_at(-0.1).is_err());
            assert!(segment.try_subdivided(2.0).is_err());
        }
    }

    #[test]
    fn square_area_and_winding() {
        let corners = [(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 3.0)];
        let square: Vec<Segment> = (0..4)
            .map(|i| Line::new(corners[i], corners[(i + 1) % 4]).unwrap().into())
            .collect();
        let area: f64 = square.iter().map(ParamSegment::signed_area_fragment).sum();
        assert!((area - 12.0).abs() < 1e-12);

        let inside = Ray::new((2.0, 1.0), (1.0, 0.2)).unwrap();
        let winding: i32 = square.iter().map(|s| s.winding_intersection(&inside)).sum();
        assert_eq!(winding.abs(), 1);
        let outside = Ray::new((-2.0, 1.0), (-1.0, 0.0)).unwrap();
        let winding: i32 = square.iter().map(|s| s.winding_intersection(&outside)).sum();
        assert_eq!(winding, 0);
    }

    #[test]
    fn circle_area_from_arcs() {
        let halves: [Segment; 2] = [
            Arc::new((1.0, 1.0), 2.0, 0.0, PI, false).unwrap().into(),
            Arc::new((1.0, 1.0), 2.0, PI, TAU, false).unwrap().into(),
        ];
        let area: f64 = halves.iter().map(ParamSegment::signed_area_fragment).sum();
        assert!((area - 4.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn overlaps_by_kind() {
        let line: Segment = Line::new((0.0, 0.0), (10.0, 0.0)).unwrap().into();
        let shifted: Segment = Line::new((5.0, 0.0), (15.0, 0.0)).unwrap().into();
        let overlaps = line.get_overlaps(&shifted, overlap::DEFAULT).unwrap();
        assert_eq!(overlaps.len(), 1);
        assert!((overlaps[0].a - 1.0).abs() < 1e-12);
        assert!((overlaps[0].b - 0.5).abs() < 1e-12);

        let arc: Segment = Arc::new((0.0, 0.0), 1.0, 0.0, FRAC_PI_2, false).unwrap().into();
        assert!(line.get_overlaps(&arc, overlap::DEFAULT).is_none());
        let quarter: Segment = Arc::new((0.0, 0.0), 1.0, 0.5, 1.0, false).unwrap().into();
        assert_eq!(arc.get_overlaps(&quarter, overlap::DEFAULT).unwrap().len(), 1);

        let apart: Segment = Line::new((0.0, 1.0), (10.0, 1.0)).unwrap().into();
        assert!(line.get_overlaps(&apart, overlap::DEFAULT).unwrap().is_empty());
    }

    #[test]
    fn flattening_stays_close() {
        let options = PiecewiseLinearOptions {
            distance_epsilon: Some(1e-4),
            ..PiecewiseLinearOptions::default()
        };
        for segment in samples() {
            let lines = segment.to_piecewise_linear_segments(&options);
            assert!(!lines.is_empty());
            assert_near(lines[0].start(), segment.start(), 1e-12);
            assert_near(lines[lines.len() - 1].end(), segment.end(), 1e-12);
            for pair in lines.windows(2) {
                assert_near(pair[0].end(), pair[1].start(), 1e-9);
            }
        }
    }

    #[test]
    fn strokes_are_offsets() {
        for segment in samples() {
            let left = segment.stroke_left(2.0);
            let right = segment.stroke_right(2.0);
            let start = segment.start();
            assert!((left[0].start().distance(start) - 1.0).abs() < 1e-9, "{segment:?}");
            let last = &right[right.len() - 1];
            assert!((last.end().distance(start) - 1.0).abs() < 1e-9, "{segment:?}");
        }
    }

    #[test]
    fn revisions() {
        let mut line = Line::new((0.0, 0.0), (1.0, 0.0)).unwrap();
        line.set_end((2.0, 0.0)).unwrap();
        let segment: Segment = line.into();
        assert_eq!(segment.revision(), 1);
    }
}
