// Copyright 2026 the Kurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rays and ray hits.

use crate::error::{check_point, SegmentError};
use crate::{Point, Vec2};

/// A half-line starting at `origin` and extending along a unit `direction`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    origin: Point,
    direction: Vec2,
}

impl Ray {
    /// Create a ray. The direction is normalized.
    ///
    /// # Errors
    ///
    /// Fails if either argument is not finite or the direction has zero length.
    pub fn new(origin: impl Into<Point>, direction: impl Into<Vec2>) -> Result<Ray, SegmentError> {
        let origin = check_point(origin.into(), "ray origin")?;
        let direction = direction.into();
        if !direction.is_finite() {
            return Err(SegmentError::NonFinite {
                field: "ray direction",
            });
        }
        let length = direction.hypot();
        if length == 0.0 {
            return Err(SegmentError::ZeroDirection);
        }
        Ok(Ray {
            origin,
            direction: direction / length,
        })
    }

    /// A ray along an already normalized direction.
    #[inline]
    pub(crate) fn from_unit(origin: Point, direction: Vec2) -> Ray {
        Ray { origin, direction }
    }

    /// Where the ray starts.
    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// The unit direction of the ray.
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// The point `distance` along the ray.
    #[inline]
    pub fn point_at_distance(&self, distance: f64) -> Point {
        self.origin + self.direction * distance
    }
}

/// A crossing of a ray with a segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayIntersection {
    /// Distance from the ray origin to the hit.
    pub distance: f64,
    /// The hit point.
    pub point: Point,
    /// Unit normal of the segment at the hit, facing against the ray.
    pub normal: Vec2,
    /// Winding contribution of the crossing, `1` or `-1`.
    pub wind: i32,
    /// Parametric value of the hit on the segment.
    pub t: f64,
}

/// Build the hit record shared by the Bézier kinds and the line.
///
/// `tangent` is the segment direction at the hit. The normal is its
/// perpendicular, flipped to face against the ray.
pub(crate) fn hit_from_tangent(
    ray: &Ray,
    point: Point,
    tangent: Vec2,
    t: f64,
) -> RayIntersection {
    let to_hit = point - ray.origin;
    let unit_tangent = tangent.normalize();
    let perp = unit_tangent.perpendicular();
    let normal = if perp.dot(ray.direction) > 0.0 {
        -perp
    } else {
        perp
    };
    let wind = if ray.direction.perpendicular().dot(unit_tangent) < 0.0 {
        1
    } else {
        -1
    };
    RayIntersection {
        distance: to_hit.hypot(),
        point,
        normal,
        wind,
        t,
    }
}
