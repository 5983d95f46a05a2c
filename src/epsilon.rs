// Copyright 2026 the Kurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named tolerances, grouped by the quantity they compare.
//!
//! Geometric distances, parametric `t` values and angles live on different
//! scales; a constant from one group is never used to compare quantities
//! of another.

/// Tolerances on parametric `t` values in `[0, 1]`.
pub mod parametric {
    /// Two extrema closer than this are the same extremum, and extrema this
    /// close to either end are not interior.
    pub const EXTREMA: f64 = 1e-10;

    /// Line-vs-curve hits this close to a line endpoint are discarded.
    pub const LINE_ENDPOINT: f64 = 1e-8;

    /// Self-intersection hits this close to the end of a monotone piece are
    /// the shared endpoint of adjacent pieces, not a crossing.
    pub const SELF_INTERSECTION: f64 = 1e-7;

    /// Within this of 0 or 1 curvature uses the closed endpoint formula.
    pub const CURVATURE_ENDPOINT: f64 = 1e-7;

    /// Overlap pieces shorter than this are dropped.
    pub const OVERLAP_LENGTH: f64 = 1e-8;
}

/// Tolerances on distances and lengths.
pub mod distance {
    /// A ray hit closer than this to the origin is behind the ray.
    pub const RAY_BEHIND: f64 = 1e-8;

    /// Tangent magnitude below which a cubic has a cusp.
    pub const CUSP_TANGENT: f64 = 1e-7;

    /// Cubic endpoints closer than this are treated as closed when
    /// decomposing collinear cubics.
    pub const COLLINEAR_ENDPOINTS: f64 = 1e-7;

    /// Control point disagreement allowed when reducing a cubic to a quadratic.
    pub const DEGREE_REDUCTION: f64 = 1e-9;

    /// Candidate squared distances this close to the best tie with it.
    pub const CLOSEST_TIE: f64 = 1e-11;

    /// Ray-circle discriminants below this miss the circle.
    pub const CIRCLE_DISCRIMINANT: f64 = 1e-10;

    /// Circle-circle center distances and tangency checks.
    pub const CIRCLE_INTERSECTION: f64 = 1e-10;

    /// Arcs whose circles agree to this are on the same circle when
    /// intersecting.
    pub const SAME_CIRCLE: f64 = 1e-7;

    /// Bounds smaller than this stop the subdivision intersector.
    pub const BOUNDS_INTERSECTION: f64 = 1e-10;

    /// Intersection points closer than this are reported once.
    pub const INTERSECTION_DEDUP: f64 = 1e-7;
}

/// Tolerances on angles in radians.
pub mod angle {
    /// Angles this close to an arc's start or end map exactly onto it.
    pub const MAP: f64 = 1e-8;

    /// Arcs within this of a full turn are written as two SVG arc commands.
    pub const SVG_FULL_TURN: f64 = 0.01;
}

/// Tolerances for overlap detection.
pub mod overlap {
    /// Default residual allowed between two curves claimed to overlap.
    pub const DEFAULT: f64 = 1e-6;

    /// Center and radius agreement required for circular overlaps.
    pub const CIRCLE: f64 = 1e-4;

    /// Power-basis coefficients smaller than this make an overlap
    /// polynomial fall back to the next lower degree.
    pub const COEFFICIENT: f64 = 1e-12;
}

/// Defaults for recursive flattening and arc length.
pub mod flatness {
    /// Default distance epsilon for arc length.
    pub const ARC_LENGTH_DISTANCE: f64 = 1e-10;

    /// Default curve epsilon for arc length.
    pub const ARC_LENGTH_CURVE: f64 = 1e-8;

    /// Default subdivision depth for arc length.
    pub const ARC_LENGTH_MAX_LEVELS: u32 = 15;

    /// Hard depth cap for dash sampling.
    pub const DASH_MAX_DEPTH: u32 = 14;

    /// Default distance epsilon for dash sampling.
    pub const DASH_DISTANCE: f64 = 1e-10;

    /// Default curve epsilon for dash sampling.
    pub const DASH_CURVE: f64 = 1e-8;
}
