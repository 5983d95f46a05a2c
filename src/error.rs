// Copyright 2026 the Kurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors for invalid segment input.

use alloc::string::String;

use thiserror::Error;

use crate::Point;

/// An argument that a segment operation cannot accept.
///
/// Geometric queries with no answer (no overlap, no intersection) are not
/// errors; they return `None` or an empty collection.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum SegmentError {
    /// A coordinate or parameter was NaN or infinite.
    #[error("{field} must be finite")]
    NonFinite {
        /// Name of the rejected field.
        field: &'static str,
    },

    /// A parametric value was outside `[0, 1]`.
    #[error("parameter t = {t} is out of range [0, 1]")]
    ParameterOutOfRange {
        /// The rejected value.
        t: f64,
    },

    /// A serialized segment carried an unrecognized type tag.
    #[error("unknown segment type {0:?}")]
    UnknownSegmentType(String),

    /// A dash array was empty, had negative entries, or summed to zero.
    #[error("invalid dash pattern")]
    InvalidDashPattern,

    /// A ray direction had zero length.
    #[error("ray direction must be non-zero")]
    ZeroDirection,
}

/// Reject a NaN or infinite scalar.
#[inline]
pub(crate) fn check_scalar(value: f64, field: &'static str) -> Result<f64, SegmentError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SegmentError::NonFinite { field })
    }
}

/// Reject a point with a NaN or infinite coordinate.
#[inline]
pub(crate) fn check_point(point: Point, field: &'static str) -> Result<Point, SegmentError> {
    if point.is_finite() {
        Ok(point)
    } else {
        Err(SegmentError::NonFinite { field })
    }
}

/// Reject a `t` outside `[0, 1]`, including NaN.
#[inline]
pub(crate) fn check_t(t: f64) -> Result<f64, SegmentError> {
    if (0.0..=1.0).contains(&t) {
        Ok(t)
    } else {
        Err(SegmentError::ParameterOutOfRange { t })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = check_point(Point::new(f64::NAN, 0.0), "start").unwrap_err();
        assert_eq!(err.to_string(), "start must be finite");
        let err = check_t(1.5).unwrap_err();
        assert_eq!(err.to_string(), "parameter t = 1.5 is out of range [0, 1]");
        assert!(check_t(f64::NAN).is_err());
        assert_eq!(check_scalar(2.0, "radius"), Ok(2.0));
    }
}
