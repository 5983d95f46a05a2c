// Copyright 2026 the Kurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest points on a set of segments.

use alloc::vec::Vec;

use crate::epsilon::distance;
use crate::param_segment::ParamSegment;
use crate::{Point, Rect, Segment};

/// Bisection rounds after which a candidate piece is accepted regardless of size.
const MAX_DEPTH: u32 = 60;

/// Intervals refined per round. Beyond it the farthest ones are dropped.
const MAX_LEVEL_WIDTH: usize = 1 << 12;

/// One of the nearest points found by [`Segment::closest_to_point`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClosestToPoint {
    /// Index into the searched slice.
    pub segment_index: usize,
    /// Parameter on that segment.
    pub t: f64,
    /// The nearest point.
    pub closest_point: Point,
    /// Squared distance from the query point.
    pub distance_squared: f64,
}

/// A parameter interval of a monotone stretch of one segment.
#[derive(Clone, Copy)]
struct Interval {
    segment_index: usize,
    t0: f64,
    t1: f64,
    p0: Point,
    p1: Point,
    /// Least squared distance any point of the stretch can have.
    lower: f64,
}

impl Interval {
    fn new(
        segment_index: usize,
        (t0, p0): (f64, Point),
        (t1, p1): (f64, Point),
        to: Point,
    ) -> Self {
        // Monotone stretches lie inside the box of their endpoints.
        let lower = Rect::from_points(p0, p1).min_distance_squared_to(to);
        Interval {
            segment_index,
            t0,
            t1,
            p0,
            p1,
            lower,
        }
    }
}

/// A sampled point with the parameter span it was accepted from.
struct Sample {
    hit: ClosestToPoint,
    t0: f64,
    t1: f64,
}

pub(crate) fn closest_to_point(
    segments: &[Segment],
    point: Point,
    threshold: f64,
) -> Vec<ClosestToPoint> {
    let mut samples: Vec<Sample> = Vec::new();
    let mut level: Vec<Interval> = Vec::new();
    let mut best = f64::INFINITY;

    for (segment_index, segment) in segments.iter().enumerate() {
        if let Segment::Line(line) = segment {
            let nearest = line.explicit_closest_to_point(point);
            best = best.min(nearest.distance_squared);
            samples.push(Sample {
                hit: ClosestToPoint {
                    segment_index,
                    t: nearest.t,
                    closest_point: nearest.point,
                    distance_squared: nearest.distance_squared,
                },
                t0: nearest.t,
                t1: nearest.t,
            });
            continue;
        }
        let mut ts = Vec::with_capacity(6);
        ts.push(0.0);
        ts.extend(segment.interior_extrema_ts());
        ts.push(1.0);
        for pair in ts.windows(2) {
            let start = (pair[0], segment.position_at(pair[0]));
            let end = (pair[1], segment.position_at(pair[1]));
            best = best
                .min(start.1.distance_squared(point))
                .min(end.1.distance_squared(point));
            level.push(Interval::new(segment_index, start, end, point));
        }
    }

    // Every interval of a round is refined before any of the next, so
    // equally near stretches shrink in step.
    for depth in 0..=MAX_DEPTH {
        level.retain(|interval| interval.lower <= best + distance::CLOSEST_TIE);
        if level.is_empty() {
            break;
        }
        if level.len() > MAX_LEVEL_WIDTH {
            log::debug!(
                "closest point search keeps {MAX_LEVEL_WIDTH} of {} intervals at depth {depth}",
                level.len()
            );
            level.sort_by(|a, b| a.lower.total_cmp(&b.lower));
            level.truncate(MAX_LEVEL_WIDTH);
        }
        let mut next = Vec::with_capacity(2 * level.len());
        for interval in level {
            let segment = &segments[interval.segment_index];
            let tm = 0.5 * (interval.t0 + interval.t1);
            let middle = (tm, segment.position_at(tm));
            best = best.min(middle.1.distance_squared(point));
            if interval.p0.distance(interval.p1) < threshold || depth == MAX_DEPTH {
                let candidates = [(interval.t0, interval.p0), middle, (interval.t1, interval.p1)];
                for (t, closest_point) in candidates {
                    samples.push(Sample {
                        hit: ClosestToPoint {
                            segment_index: interval.segment_index,
                            t,
                            closest_point,
                            distance_squared: closest_point.distance_squared(point),
                        },
                        t0: interval.t0,
                        t1: interval.t1,
                    });
                }
                continue;
            }
            let start = (interval.t0, interval.p0);
            let end = (interval.t1, interval.p1);
            next.push(Interval::new(interval.segment_index, start, middle, point));
            next.push(Interval::new(interval.segment_index, middle, end, point));
        }
        level = next;
    }

    samples.retain(|sample| sample.hit.distance_squared <= best + distance::CLOSEST_TIE);
    samples.sort_by(|a, b| {
        a.hit
            .segment_index
            .cmp(&b.hit.segment_index)
            .then(a.t0.total_cmp(&b.t0))
    });
    // Touching spans of one segment cover the same local minimum.
    let mut runs: Vec<Sample> = Vec::new();
    for sample in samples {
        if let Some(run) = runs.last_mut() {
            if run.hit.segment_index == sample.hit.segment_index && sample.t0 <= run.t1 {
                run.t1 = run.t1.max(sample.t1);
                if sample.hit.distance_squared < run.hit.distance_squared {
                    run.hit = sample.hit;
                }
                continue;
            }
        }
        runs.push(sample);
    }

    // Best first, so that each kept point is the center of its cluster.
    runs.sort_by(|a, b| a.hit.distance_squared.total_cmp(&b.hit.distance_squared));
    let mut result: Vec<ClosestToPoint> = Vec::new();
    for Sample { hit, .. } in runs {
        let duplicate = result.iter().any(|kept| {
            kept.closest_point.distance_squared(hit.closest_point) < distance::CLOSEST_TIE
        });
        if !duplicate {
            result.push(hit);
        }
    }
    result.sort_by(|a, b| {
        a.segment_index
            .cmp(&b.segment_index)
            .then(a.t.total_cmp(&b.t))
    });
    result
}
