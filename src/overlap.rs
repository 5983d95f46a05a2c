// Copyright 2026 the Kurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlap detection between curves of the same kind.
//!
//! Two Bézier curves of the same degree trace the same points over a shared
//! stretch exactly when one is a linear reparametrization of the other. In
//! the power basis that reparametrization can be read off the two leading
//! coefficients of a single axis, then checked on both axes.

use arrayvec::ArrayVec;

use crate::common::solve_quadratic;
use crate::epsilon::overlap;
use crate::{Point, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A linear reparametrization between two curves that share points.
///
/// For an overlap found between `first` and `second`,
/// `second.position_at(t) == first.position_at(a * t + b)` wherever both
/// parameters lie in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Overlap {
    /// Scale of the mapping; negative when the curves run opposite ways.
    pub a: f64,
    /// Offset of the mapping.
    pub b: f64,
}

impl Overlap {
    /// Map a parameter on the second curve to the first.
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        self.a * t + self.b
    }

    /// Map a parameter on the first curve to the second.
    #[inline]
    pub fn inverse_apply(&self, t: f64) -> f64 {
        (t - self.b) / self.a
    }

    /// The parameter range on the first curve covered by the second.
    ///
    /// Returns `None` when the ranges only touch or miss.
    pub fn first_range(&self) -> Option<(f64, f64)> {
        let (t0, t1) = ordered(self.apply(0.0), self.apply(1.0));
        let (t0, t1) = (t0.max(0.0), t1.min(1.0));
        (t0 < t1).then_some((t0, t1))
    }

    /// The parameter range on the second curve covered by the first.
    pub fn second_range(&self) -> Option<(f64, f64)> {
        let (t0, t1) = ordered(self.inverse_apply(0.0), self.inverse_apply(1.0));
        let (t0, t1) = (t0.max(0.0), t1.min(1.0));
        (t0 < t1).then_some((t0, t1))
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// The outcome of matching two polynomials under a linear reparametrization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PolynomialOverlap {
    /// No `(a, b)` makes the polynomials agree.
    NoSolution,
    /// Both polynomials are the same constant, so any mapping works.
    AnyMapping,
    /// `p(t) == q(a * t + b)` for this mapping.
    Mapping {
        /// Scale.
        a: f64,
        /// Offset.
        b: f64,
    },
}

#[inline]
fn is_zero(c: f64) -> bool {
    c.abs() < overlap::COEFFICIENT
}

/// Solve `p(t) == q(a * t + b)` for power-basis coefficients of degree 1.
///
/// Coefficients are listed from the constant term up.
pub fn polynomial_overlap_linear(p: [f64; 2], q: [f64; 2]) -> PolynomialOverlap {
    let [p0, p1] = p;
    let [q0, q1] = q;
    match (is_zero(p1), is_zero(q1)) {
        (true, true) if is_zero(p0 - q0) => PolynomialOverlap::AnyMapping,
        (false, false) => PolynomialOverlap::Mapping {
            a: p1 / q1,
            b: (p0 - q0) / q1,
        },
        _ => PolynomialOverlap::NoSolution,
    }
}

/// Solve `p(t) == q(a * t + b)` for power-basis coefficients of degree 2.
///
/// The leading coefficients only fix `a` up to sign; this returns the
/// positive solution.
pub fn polynomial_overlap_quadratic(p: [f64; 3], q: [f64; 3]) -> PolynomialOverlap {
    quadratic_overlap(p, q, 1.0)
}

fn quadratic_overlap(p: [f64; 3], q: [f64; 3], sign: f64) -> PolynomialOverlap {
    let [p0, p1, p2] = p;
    let [q0, q1, q2] = q;
    match (is_zero(p2), is_zero(q2)) {
        (true, true) => polynomial_overlap_linear([p0, p1], [q0, q1]),
        (false, false) => {
            let ratio = p2 / q2;
            if ratio < 0.0 {
                return PolynomialOverlap::NoSolution;
            }
            let a = sign * ratio.sqrt();
            PolynomialOverlap::Mapping {
                a,
                b: (p1 - q1 * a) / (2.0 * q2 * a),
            }
        }
        _ => PolynomialOverlap::NoSolution,
    }
}

/// Solve `p(t) == q(a * t + b)` for power-basis coefficients of degree 3.
pub fn polynomial_overlap_cubic(p: [f64; 4], q: [f64; 4]) -> PolynomialOverlap {
    cubic_overlap(p, q, 1.0)
}

fn cubic_overlap(p: [f64; 4], q: [f64; 4], sign: f64) -> PolynomialOverlap {
    let [p0, p1, p2, p3] = p;
    let [q0, q1, q2, q3] = q;
    match (is_zero(p3), is_zero(q3)) {
        (true, true) => quadratic_overlap([p0, p1, p2], [q0, q1, q2], sign),
        (false, false) => {
            let a = (p3 / q3).cbrt();
            PolynomialOverlap::Mapping {
                a,
                b: (p2 - q2 * a * a) / (3.0 * q3 * a * a),
            }
        }
        _ => PolynomialOverlap::NoSolution,
    }
}

/// Power-basis coefficients of a Bézier curve of degree 1 to 3.
pub fn power_basis(points: &[Point]) -> ArrayVec<Vec2, 4> {
    let p: ArrayVec<Vec2, 4> = points.iter().map(|p| p.to_vec2()).collect();
    let mut result = ArrayVec::new();
    match p[..] {
        [p0, p1] => {
            result.push(p0);
            result.push(p1 - p0);
        }
        [p0, p1, p2] => {
            result.push(p0);
            result.push((p1 - p0) * 2.0);
            result.push(p0 - p1 * 2.0 + p2);
        }
        [p0, p1, p2, p3] => {
            result.push(p0);
            result.push((p1 - p0) * 3.0);
            result.push((p0 - p1 * 2.0 + p2) * 3.0);
            result.push(p3 - p0 + (p1 - p2) * 3.0);
        }
        _ => {}
    }
    result
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    fn of(self, v: Vec2) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }
}

fn axis_overlap(p: &[Vec2], q: &[Vec2], axis: Axis, sign: f64) -> PolynomialOverlap {
    let p: ArrayVec<f64, 4> = p.iter().map(|&v| axis.of(v)).collect();
    let q: ArrayVec<f64, 4> = q.iter().map(|&v| axis.of(v)).collect();
    match (&p[..], &q[..]) {
        (&[p0, p1], &[q0, q1]) => polynomial_overlap_linear([p0, p1], [q0, q1]),
        (&[p0, p1, p2], &[q0, q1, q2]) => quadratic_overlap([p0, p1, p2], [q0, q1, q2], sign),
        (&[p0, p1, p2, p3], &[q0, q1, q2, q3]) => {
            cubic_overlap([p0, p1, p2, p3], [q0, q1, q2, q3], sign)
        }
        _ => PolynomialOverlap::NoSolution,
    }
}

/// Coefficients of `q(a * t + b)`.
fn compose(q: &[Vec2], a: f64, b: f64) -> [Vec2; 4] {
    let mut result = [Vec2::ZERO; 4];
    for &coefficient in q.iter().rev() {
        let mut next = [Vec2::ZERO; 4];
        for (i, &c) in result.iter().enumerate() {
            next[i] += c * b;
            if i + 1 < next.len() {
                next[i + 1] += c * a;
            }
        }
        next[0] += coefficient;
        result = next;
    }
    result
}

fn evaluate(coefficients: &[Vec2; 4], t: f64) -> Vec2 {
    coefficients
        .iter()
        .rev()
        .fold(Vec2::ZERO, |acc, &c| acc * t + c)
}

/// Largest per-axis gap between `p(t)` and `q(a * t + b)` over `t` in `[0, 1]`.
fn max_residual(p: &[Vec2], q: &[Vec2], a: f64, b: f64) -> f64 {
    let composed = compose(q, a, b);
    let mut difference = [Vec2::ZERO; 4];
    for (i, d) in difference.iter_mut().enumerate() {
        *d = p.get(i).copied().unwrap_or(Vec2::ZERO) - composed[i];
    }
    let mut ts: ArrayVec<f64, 6> = ArrayVec::new();
    ts.push(0.0);
    ts.push(1.0);
    for axis in [Axis::X, Axis::Y] {
        let [_, d1, d2, d3] = difference.map(|v| axis.of(v));
        for t in solve_quadratic(d1, 2.0 * d2, 3.0 * d3) {
            if (0.0..=1.0).contains(&t) {
                ts.push(t);
            }
        }
    }
    ts.iter()
        .map(|&t| {
            let gap = evaluate(&difference, t);
            gap.x.abs().max(gap.y.abs())
        })
        .fold(0.0, f64::max)
}

/// Find the reparametrization between two Bézier curves of the same degree.
///
/// `first` and `second` are control polygons. The result satisfies the
/// convention of [`Overlap`], with residuals at most `epsilon`.
pub(crate) fn bezier_overlap(first: &[Point], second: &[Point], epsilon: f64) -> Option<Overlap> {
    if first.len() != second.len() || !(2..=4).contains(&first.len()) {
        return None;
    }
    let q = power_basis(first);
    let p = power_basis(second);

    let spread = |axis: Axis| {
        let (min, max) = first.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), pt| {
            let v = axis.of(pt.to_vec2());
            (lo.min(v), hi.max(v))
        });
        max - min
    };
    let axes = if spread(Axis::X) >= spread(Axis::Y) {
        [Axis::X, Axis::Y]
    } else {
        [Axis::Y, Axis::X]
    };

    // A square root leaves the sign of `a` open, so try both.
    let mut candidates: ArrayVec<(f64, f64), 2> = ArrayVec::new();
    for axis in axes {
        for sign in [1.0, -1.0] {
            if let PolynomialOverlap::Mapping { a, b } = axis_overlap(&p, &q, axis, sign) {
                if !candidates.contains(&(a, b)) {
                    candidates.push((a, b));
                }
            }
        }
        if !candidates.is_empty() {
            break;
        }
    }

    for (a, b) in candidates {
        if !(a.is_finite() && b.is_finite()) || a == 0.0 {
            continue;
        }
        let residual = max_residual(&p, &q, a, b);
        if residual > epsilon {
            log::debug!("overlap candidate a={a} b={b} rejected, residual {residual}");
            continue;
        }
        let (lo, hi) = ordered(b, a + b);
        if lo > 1.0 || hi < 0.0 {
            continue;
        }
        return Some(Overlap { a, b });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_mapping(result: PolynomialOverlap, a: f64, b: f64) {
        match result {
            PolynomialOverlap::Mapping { a: ra, b: rb } => {
                assert!((ra - a).abs() < 1e-9 && (rb - b).abs() < 1e-9, "{result:?}");
            }
            _ => panic!("expected a mapping, got {result:?}"),
        }
    }

    #[test]
    fn linear_solver() {
        // q(t) = 1 + 4t, p(t) = q(0.5t + 0.25) = 2 + 2t
        assert_mapping(polynomial_overlap_linear([2.0, 2.0], [1.0, 4.0]), 0.5, 0.25);
        assert_eq!(
            polynomial_overlap_linear([3.0, 0.0], [3.0, 0.0]),
            PolynomialOverlap::AnyMapping
        );
        assert_eq!(
            polynomial_overlap_linear([3.0, 1.0], [3.0, 0.0]),
            PolynomialOverlap::NoSolution
        );
    }

    #[test]
    fn quadratic_solver() {
        // q(t) = t², p(t) = q(2t + 1) = 1 + 4t + 4t²
        assert_mapping(polynomial_overlap_quadratic([1.0, 4.0, 4.0], [0.0, 0.0, 1.0]), 2.0, 1.0);
        assert_eq!(
            polynomial_overlap_quadratic([1.0, 4.0, -4.0], [0.0, 0.0, 1.0]),
            PolynomialOverlap::NoSolution
        );
        // Falls back to the linear solver.
        assert_mapping(polynomial_overlap_quadratic([2.0, 2.0, 0.0], [1.0, 4.0, 0.0]), 0.5, 0.25);
    }

    #[test]
    fn cubic_solver() {
        // q(t) = t³, p(t) = q(-t + 1) = 1 - 3t + 3t² - t³
        assert_mapping(
            polynomial_overlap_cubic([1.0, -3.0, 3.0, -1.0], [0.0, 0.0, 0.0, 1.0]),
            -1.0,
            1.0,
        );
        assert_eq!(
            polynomial_overlap_cubic([0.0, 0.0, 0.0, 1.0], [0.0, 0.0, 1.0, 0.0]),
            PolynomialOverlap::NoSolution
        );
    }

    #[test]
    fn power_basis_evaluates() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 2.0),
            Point::new(3.0, 2.0),
            Point::new(4.0, 0.0),
        ];
        let coefficients = power_basis(&points);
        let mut padded = [Vec2::ZERO; 4];
        padded.copy_from_slice(&coefficients);
        let mid = evaluate(&padded, 0.5);
        assert!((mid - Vec2::new(2.0, 1.5)).hypot() < 1e-12);
    }

    #[test]
    fn ranges() {
        let overlap = Overlap { a: 0.5, b: 0.75 };
        assert_eq!(overlap.first_range(), Some((0.75, 1.0)));
        assert_eq!(overlap.second_range(), Some((0.0, 0.5)));
        assert!((overlap.inverse_apply(overlap.apply(0.3)) - 0.3).abs() < 1e-12);
        let touching = Overlap { a: 1.0, b: 1.0 };
        assert_eq!(touching.first_range(), None);
    }

    #[test]
    fn rejects_curves_with_matching_axis() {
        // Same x polynomial, different y.
        let first = [Point::new(0.0, 0.0), Point::new(5.0, 1.0), Point::new(10.0, 0.0)];
        let second = [Point::new(0.0, 0.0), Point::new(5.0, -1.0), Point::new(10.0, 0.0)];
        assert!(bezier_overlap(&first, &second, 1e-6).is_none());
        assert!(bezier_overlap(&first, &first, 1e-6).is_some());
    }
}
