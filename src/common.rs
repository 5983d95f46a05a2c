// Copyright 2026 the Kurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations

use arrayvec::ArrayVec;

use crate::{Point, Vec2};

/// Defines a trait that chooses between libstd or libm implementations of float methods.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident/$lfname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            /// Special implementation for signum, because libm doesn't have it.
            fn signum(self) -> Self;

            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            #[inline]
            fn signum(self) -> f64 {
                if self.is_nan() {
                    f64::NAN
                } else {
                    1.0_f64.copysign(self)
                }
            }

            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("kurve requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabs/fabsf;
    fn atan2(self, other: Self) -> Self => atan2/atan2f;
    fn cbrt(self) -> Self => cbrt/cbrtf;
    fn ceil(self) -> Self => ceil/ceilf;
    fn copysign(self, sign: Self) -> Self => copysign/copysignf;
    fn cos(self) -> Self => cos/cosf;
    fn floor(self) -> Self => floor/floorf;
    fn hypot(self, other: Self) -> Self => hypot/hypotf;
    fn mul_add(self, a: Self, b: Self) -> Self => fma/fmaf;
    fn powi(self, n: i32) -> Self => pow/powf;
    fn round(self) -> Self => round/roundf;
    fn sin(self) -> Self => sin/sinf;
    fn sin_cos(self) -> (Self, Self) => sincos/sincosf;
    fn sqrt(self) -> Self => sqrt/sqrtf;
}

/// Find real roots of cubic equation.
///
/// The implementation is not (yet) fully robust, but it does handle the case
/// where `c3` is zero (in that case, solving the quadratic equation).
///
/// See: <https://momentsingraphics.de/CubicRoots.html>
///
/// That implementation is in turn based on Jim Blinn's "How to Solve a Cubic
/// Equation", which is masterful.
///
/// Return values of x for which c0 + c1 x + c2 x² + c3 x³ = 0.
pub fn solve_cubic(c0: f64, c1: f64, c2: f64, c3: f64) -> ArrayVec<f64, 3> {
    let mut result = ArrayVec::new();
    let c3_recip = c3.recip();
    const ONETHIRD: f64 = 1. / 3.;
    let scaled_c2 = c2 * (ONETHIRD * c3_recip);
    let scaled_c1 = c1 * (ONETHIRD * c3_recip);
    let scaled_c0 = c0 * c3_recip;
    if !(scaled_c0.is_finite() && scaled_c1.is_finite() && scaled_c2.is_finite()) {
        // cubic coefficient is zero or nearly so.
        for root in solve_quadratic(c0, c1, c2) {
            result.push(root);
        }
        return result;
    }
    let (c0, c1, c2) = (scaled_c0, scaled_c1, scaled_c2);
    // (d0, d1, d2) is called "Delta" in article
    let d0 = (-c2).mul_add(c2, c1);
    let d1 = (-c1).mul_add(c2, c0);
    let d2 = c2 * c0 - c1 * c1;
    // d is called "Discriminant"
    let d = 4.0 * d0 * d2 - d1 * d1;
    // de is called "Depressed.x", Depressed.y = d0
    let de = (-2.0 * c2).mul_add(d0, d1);
    if d < 0.0 {
        let sq = (-0.25 * d).sqrt();
        let r = -0.5 * de;
        let t1 = (r + sq).cbrt() + (r - sq).cbrt();
        result.push(t1 - c2);
    } else if d == 0.0 {
        let t1 = (-d0).sqrt().copysign(de);
        result.push(t1 - c2);
        result.push(-2.0 * t1 - c2);
    } else {
        let th = d.sqrt().atan2(-de) * ONETHIRD;
        // (th_cos, th_sin) is called "CubicRoot"
        let (th_sin, th_cos) = th.sin_cos();
        // (r0, r1, r2) is called "Root"
        let r0 = th_cos;
        let ss3 = th_sin * 3.0f64.sqrt();
        let r1 = 0.5 * (-th_cos + ss3);
        let r2 = 0.5 * (-th_cos - ss3);
        let t = 2.0 * (-d0).sqrt();
        result.push(t.mul_add(r0, -c2));
        result.push(t.mul_add(r1, -c2));
        result.push(t.mul_add(r2, -c2));
    }
    result
}

/// Find real roots of quadratic equation.
///
/// Return values of x for which c0 + c1 x + c2 x² = 0.
///
/// If the equation is nearly linear, the root of the linear part is
/// returned. In the degenerate case where all coefficients are zero,
/// so that all values of x satisfy the equation, a single `0.0` is
/// returned. Two roots come back sorted.
pub fn solve_quadratic(c0: f64, c1: f64, c2: f64) -> ArrayVec<f64, 2> {
    let mut result = ArrayVec::new();
    let sc0 = c0 * c2.recip();
    let sc1 = c1 * c2.recip();
    if !sc0.is_finite() || !sc1.is_finite() {
        // c2 is zero or very small, treat as linear eqn
        let root = -c0 / c1;
        if root.is_finite() {
            result.push(root);
        } else if c0 == 0.0 && c1 == 0.0 {
            // Degenerate case
            result.push(0.0);
        }
        return result;
    }
    let arg = sc1 * sc1 - 4. * sc0;
    let root1 = if !arg.is_finite() {
        // Likely, calculation of sc1 * sc1 overflowed. Find one root
        // using sc1 x + x² = 0, other root as sc0 / root1.
        -sc1
    } else {
        if arg < 0.0 {
            return result;
        } else if arg == 0.0 {
            result.push(-0.5 * sc1);
            return result;
        }
        // See https://math.stackexchange.com/questions/866331
        -0.5 * (sc1 + arg.sqrt().copysign(sc1))
    };
    let root2 = sc0 / root1;
    if root2.is_finite() {
        if root2 > root1 {
            result.push(root1);
            result.push(root2);
        } else {
            result.push(root2);
            result.push(root1);
        }
    } else {
        result.push(root1);
    }
    result
}

/// Roots of `c0 + c1 x + c2 x²` that lie in `[0, 1]`.
pub(crate) fn quadratic_roots_in_unit(c0: f64, c1: f64, c2: f64) -> ArrayVec<f64, 2> {
    solve_quadratic(c0, c1, c2)
        .into_iter()
        .filter(|t| (0.0..=1.0).contains(t))
        .collect()
}

/// Clamp `value` into `[min, max]`.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Linearly map `a3` from the range `[a1, a2]` to the range `[b1, b2]`.
#[inline]
pub fn linear(a1: f64, a2: f64, b1: f64, b2: f64, a3: f64) -> f64 {
    (b2 - b1) / (a2 - a1) * (a3 - a1) + b1
}

/// Wrap `value` into `[min, max)`.
pub fn modulo_between_down(value: f64, min: f64, max: f64) -> f64 {
    let divisor = max - min;
    let mut partial = (value - min) % divisor;
    if partial < 0.0 {
        partial += divisor;
    }
    partial + min
}

/// Wrap `value` into `(min, max]`.
pub fn modulo_between_up(value: f64, min: f64, max: f64) -> f64 {
    -modulo_between_down(-value, -max, -min)
}

/// Twice the signed area of the triangle `abc`.
#[inline]
pub(crate) fn triangle_area_signed(a: Point, b: Point, c: Point) -> f64 {
    a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y)
}

/// Whether the three points lie on a common line, up to `epsilon` of
/// (doubled) triangle area.
pub fn are_points_collinear(a: Point, b: Point, c: Point, epsilon: f64) -> bool {
    triangle_area_signed(a, b, c).abs() <= epsilon
}

/// Intersection of the infinite lines through `p1, p2` and `p3, p4`.
///
/// Returns `None` if either pair is coincident or the lines are (nearly)
/// parallel.
pub fn line_line_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    const PARALLEL_EPSILON: f64 = 1e-10;
    if p1 == p2 || p3 == p4 {
        return None;
    }
    let x12 = p1.x - p2.x;
    let x34 = p3.x - p4.x;
    let y12 = p1.y - p2.y;
    let y34 = p3.y - p4.y;
    let denom = x12 * y34 - y12 * x34;
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }
    let a = p1.x * p2.y - p1.y * p2.x;
    let b = p3.x * p4.y - p3.y * p4.x;
    Some(Point::new(
        (a * x34 - x12 * b) / denom,
        (a * y34 - y12 * b) / denom,
    ))
}

/// Center of the circle through three points, or `None` when they are
/// (nearly) collinear.
pub fn circle_center_from_points(p1: Point, p2: Point, p3: Point) -> Option<Point> {
    let p12 = p1.midpoint(p2);
    let p23 = p2.midpoint(p3);
    let p12x = p12 + (p2 - p1).perpendicular();
    let p23x = p23 + (p3 - p2).perpendicular();
    line_line_intersection(p12, p12x, p23, p23x)
}

/// Squared distance from `p` to the closed segment `v w`.
pub fn dist_to_segment_squared(p: Point, v: Point, w: Point) -> f64 {
    let l2 = v.distance_squared(w);
    if l2 == 0.0 {
        return p.distance_squared(v);
    }
    let t = (p - v).dot(w - v) / l2;
    if t < 0.0 {
        p.distance_squared(v)
    } else if t > 1.0 {
        p.distance_squared(w)
    } else {
        p.distance_squared(v + (w - v) * t)
    }
}

/// Intersection point of the closed segments `p1 p2` and `p3 p4`.
///
/// Parallel and coincident segments report no intersection. Shared
/// endpoints are returned exactly.
pub fn line_segment_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    // Positive when (a, b, c) turn counterclockwise.
    fn ccw(a: Point, b: Point, c: Point) -> f64 {
        (c.y - a.y) * (b.x - a.x) - (b.y - a.y) * (c.x - a.x)
    }
    if ccw(p1, p3, p4) * ccw(p2, p3, p4) > 0.0 || ccw(p3, p1, p2) * ccw(p4, p1, p2) > 0.0 {
        return None;
    }
    let denom = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if denom.abs() < 1e-10 {
        return None;
    }
    if p1 == p3 || p1 == p4 {
        return Some(p1);
    }
    if p2 == p3 || p2 == p4 {
        return Some(p2);
    }
    let a = p1.x * p2.y - p1.y * p2.x;
    let b = p3.x * p4.y - p3.y * p4.x;
    Some(Point::new(
        (a * (p3.x - p4.x) - (p1.x - p2.x) * b) / denom,
        (a * (p3.y - p4.y) - (p1.y - p2.y) * b) / denom,
    ))
}

/// Unit vector perpendicular to `v`, or zero when `v` is zero.
#[inline]
pub(crate) fn unit_perpendicular(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len == 0.0 {
        Vec2::ZERO
    } else {
        v.perpendicular() / len
    }
}
