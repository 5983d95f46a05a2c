// Copyright 2026 the Kurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intersections between pairs of segments.

use alloc::vec::Vec;

use arrayvec::ArrayVec;
use smallvec::SmallVec;

use crate::epsilon::{distance, overlap};
use crate::param_segment::ParamSegment;
use crate::{Arc, CubicBez, EllipticalArc, Line, Overlap, Point, QuadBez, Rect, Segment};

/// Subdivision rounds before a candidate is accepted as is.
const MAX_DEPTH: u32 = 50;

/// Total pair subdivisions before the intersector gives up.
const MAX_SPLITS: usize = 1 << 16;

/// A point where two segments meet.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentIntersection {
    /// The shared point.
    pub point: Point,
    /// Parameter on the first segment.
    pub a_t: f64,
    /// Parameter on the second segment.
    pub b_t: f64,
}

#[derive(Clone, Copy)]
struct Piece {
    t0: f64,
    t1: f64,
    bounds: Rect,
}

impl Piece {
    /// A parameter range of a monotone stretch, bounded by its endpoints.
    fn new<S: ParamSegment>(segment: &S, t0: f64, t1: f64) -> Piece {
        Piece {
            t0,
            t1,
            bounds: Rect::from_points(segment.position_at(t0), segment.position_at(t1)),
        }
    }

    fn split<S: ParamSegment>(&self, segment: &S) -> [Piece; 2] {
        let middle = 0.5 * (self.t0 + self.t1);
        [
            Piece::new(segment, self.t0, middle),
            Piece::new(segment, middle, self.t1),
        ]
    }

    #[inline]
    fn middle(&self) -> f64 {
        0.5 * (self.t0 + self.t1)
    }
}

fn monotone_pieces<S: ParamSegment>(segment: &S) -> SmallVec<[Piece; 6]> {
    let mut ts: SmallVec<[f64; 6]> = SmallVec::new();
    ts.push(0.0);
    ts.extend(segment.interior_extrema_ts());
    ts.push(1.0);
    ts.windows(2)
        .map(|pair| Piece::new(segment, pair[0], pair[1]))
        .collect()
}

/// Intersect any two segments by subdividing their bounding boxes.
///
/// Each segment is first split into monotone stretches so that the box
/// spanned by a stretch's endpoints contains it. Pairs of stretches whose
/// boxes meet are halved until both boxes are tiny.
pub(crate) fn bounds_intersections<A: ParamSegment, B: ParamSegment>(
    a: &A,
    b: &B,
) -> Vec<SegmentIntersection> {
    let mut stack: Vec<(Piece, Piece, u32)> = Vec::new();
    for pa in monotone_pieces(a) {
        for pb in monotone_pieces(b) {
            stack.push((pa, pb, 0));
        }
    }

    let eps = distance::BOUNDS_INTERSECTION;
    let mut result: Vec<SegmentIntersection> = Vec::new();
    let mut splits = 0;
    while let Some((pa, pb, depth)) = stack.pop() {
        if !pa.bounds.inflate(eps).intersects(&pb.bounds) {
            continue;
        }
        let a_small = pa.bounds.max_extent() < eps;
        let b_small = pb.bounds.max_extent() < eps;
        if (a_small && b_small) || depth >= MAX_DEPTH {
            if depth >= MAX_DEPTH {
                log::trace!(
                    "bounds intersector hit depth cap at t = {}, {}",
                    pa.middle(),
                    pb.middle()
                );
            }
            let (a_t, b_t) = (pa.middle(), pb.middle());
            let point = a.position_at(a_t).midpoint(b.position_at(b_t));
            let duplicate = result
                .iter()
                .any(|hit| hit.point.distance(point) < distance::INTERSECTION_DEDUP);
            if !duplicate {
                result.push(SegmentIntersection { point, a_t, b_t });
            }
            continue;
        }
        if splits >= MAX_SPLITS {
            log::debug!(
                "bounds intersector gave up after {splits} splits, {} pairs pending",
                stack.len()
            );
            break;
        }
        splits += 1;
        let depth = depth + 1;
        match (a_small, b_small) {
            (false, false) => {
                for qa in pa.split(a) {
                    for qb in pb.split(b) {
                        stack.push((qa, qb, depth));
                    }
                }
            }
            (true, _) => {
                for qb in pb.split(b) {
                    stack.push((pa, qb, depth));
                }
            }
            (false, true) => {
                for qa in pa.split(a) {
                    stack.push((qa, pb, depth));
                }
            }
        }
    }
    result.sort_by(|x, y| x.a_t.total_cmp(&y.a_t));
    result
}

fn swapped(hits: Vec<SegmentIntersection>) -> Vec<SegmentIntersection> {
    hits.into_iter()
        .map(|hit| SegmentIntersection {
            point: hit.point,
            a_t: hit.b_t,
            b_t: hit.a_t,
        })
        .collect()
}

/// Stretches where `b` retraces `a`, as overlaps mapping `b`'s parameter to `a`'s.
fn shared_stretches(a: &Segment, b: &Segment) -> ArrayVec<Overlap, 2> {
    let eps = overlap::DEFAULT;
    let single = |found: Option<Overlap>| -> ArrayVec<Overlap, 2> { found.into_iter().collect() };
    let stretches = match (a, b) {
        (Segment::Quadratic(a), Segment::Quadratic(b)) => single(QuadBez::overlaps(a, b, eps)),
        (Segment::Quadratic(a), Segment::Cubic(b)) => {
            single(CubicBez::overlaps(&a.degree_elevated(), b, eps))
        }
        (Segment::Cubic(a), Segment::Quadratic(b)) => {
            single(CubicBez::overlaps(a, &b.degree_elevated(), eps))
        }
        (Segment::Cubic(a), Segment::Cubic(b)) => single(CubicBez::overlaps(a, b, eps)),
        (Segment::EllipticalArc(a), Segment::EllipticalArc(b)) => EllipticalArc::overlaps(a, b),
        (Segment::Arc(a), Segment::EllipticalArc(b)) => {
            EllipticalArc::overlaps(&a.to_elliptical(), b)
        }
        (Segment::EllipticalArc(a), Segment::Arc(b)) => {
            EllipticalArc::overlaps(a, &b.to_elliptical())
        }
        _ => ArrayVec::new(),
    };
    stretches
        .into_iter()
        .filter(|stretch| stretch.second_range().is_some())
        .collect()
}

/// The points where each shared stretch begins and ends.
fn stretch_ends(a: &Segment, b: &Segment, stretches: &[Overlap]) -> Vec<SegmentIntersection> {
    let mut result: Vec<SegmentIntersection> = Vec::new();
    for stretch in stretches {
        let Some((t0, t1)) = stretch.second_range() else {
            continue;
        };
        for b_t in [t0, t1] {
            let a_t = stretch.apply(b_t).clamp(0.0, 1.0);
            let point = a.position_at(a_t).midpoint(b.position_at(b_t));
            let duplicate = result
                .iter()
                .any(|hit| hit.point.distance(point) < distance::INTERSECTION_DEDUP);
            if !duplicate {
                result.push(SegmentIntersection { point, a_t, b_t });
            }
        }
    }
    result.sort_by(|x, y| x.a_t.total_cmp(&y.a_t));
    result
}

/// Intersect two segments of any kinds, picking the best method for the pair.
///
/// `a_t` of each result is on `a` and `b_t` on `b`. Curves that retrace each
/// other meet only where the shared stretch begins and ends.
pub(crate) fn intersect(a: &Segment, b: &Segment) -> Vec<SegmentIntersection> {
    let stretches = shared_stretches(a, b);
    if !stretches.is_empty() {
        log::debug!("segments overlap, reporting the ends of {} stretches", stretches.len());
        return stretch_ends(a, b, &stretches);
    }
    match (a, b) {
        (Segment::Line(a), Segment::Line(b)) => Line::intersect(a, b),
        (Segment::Line(line), other) => Line::intersect_other(line, other),
        (other, Segment::Line(line)) => swapped(Line::intersect_other(line, other)),
        (Segment::Arc(a), Segment::Arc(b)) => Arc::intersect(a, b),
        (Segment::Quadratic(a), Segment::Quadratic(b)) => {
            bounds_intersections(&a.degree_elevated(), &b.degree_elevated())
        }
        (Segment::Quadratic(a), Segment::Cubic(b)) => {
            bounds_intersections(&a.degree_elevated(), b)
        }
        (Segment::Cubic(a), Segment::Quadratic(b)) => {
            bounds_intersections(a, &b.degree_elevated())
        }
        (Segment::Cubic(a), Segment::Cubic(b)) => bounds_intersections(a, b),
        (a, b) => bounds_intersections(a, b),
    }
}
