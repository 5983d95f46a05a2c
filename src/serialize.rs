// Copyright 2026 the Kurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain interchange records for segments.
//!
//! With the `serde` feature, a record is a flat object tagged by a `type`
//! field (`"Line"`, `"Quadratic"`, `"Cubic"`, `"Arc"` or `"EllipticalArc"`)
//! and with camel-cased field names, e.g.
//! `{"type":"Line","startX":0,"startY":0,"endX":1,"endY":1}`.

use crate::param_segment::ParamSegment;
use crate::{Arc, CubicBez, EllipticalArc, Line, QuadBez, Segment, SegmentError, SegmentKind};

/// The record for a [`Line`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[expect(missing_docs, reason = "field names are self-explanatory")]
pub struct SerializedLine {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

/// The record for a [`QuadBez`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[expect(missing_docs, reason = "field names are self-explanatory")]
pub struct SerializedQuadratic {
    pub start_x: f64,
    pub start_y: f64,
    pub control_x: f64,
    pub control_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

/// The record for a [`CubicBez`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[expect(missing_docs, reason = "field names are self-explanatory")]
pub struct SerializedCubic {
    pub start_x: f64,
    pub start_y: f64,
    pub control1_x: f64,
    pub control1_y: f64,
    pub control2_x: f64,
    pub control2_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

/// The record for an [`Arc`]. Angles are in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[expect(missing_docs, reason = "field names are self-explanatory")]
pub struct SerializedArc {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub anticlockwise: bool,
}

/// The record for an [`EllipticalArc`]. Angles, including the rotation, are
/// in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[expect(missing_docs, reason = "field names are self-explanatory")]
pub struct SerializedEllipticalArc {
    pub center_x: f64,
    pub center_y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    pub rotation: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub anticlockwise: bool,
}

/// The interchange record of any segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
#[expect(missing_docs, reason = "variants mirror the segment kinds")]
pub enum SerializedSegment {
    Line(SerializedLine),
    Quadratic(SerializedQuadratic),
    Cubic(SerializedCubic),
    Arc(SerializedArc),
    EllipticalArc(SerializedEllipticalArc),
}

impl SerializedSegment {
    /// The kind of segment this record describes.
    pub fn kind(&self) -> SegmentKind {
        match self {
            SerializedSegment::Line(_) => SegmentKind::Line,
            SerializedSegment::Quadratic(_) => SegmentKind::Quadratic,
            SerializedSegment::Cubic(_) => SegmentKind::Cubic,
            SerializedSegment::Arc(_) => SegmentKind::Arc,
            SerializedSegment::EllipticalArc(_) => SegmentKind::EllipticalArc,
        }
    }
}

impl TryFrom<&SerializedSegment> for Segment {
    type Error = SegmentError;

    fn try_from(record: &SerializedSegment) -> Result<Segment, SegmentError> {
        let segment = match *record {
            SerializedSegment::Line(r) => {
                Line::new((r.start_x, r.start_y), (r.end_x, r.end_y))?.into()
            }
            SerializedSegment::Quadratic(r) => QuadBez::new(
                (r.start_x, r.start_y),
                (r.control_x, r.control_y),
                (r.end_x, r.end_y),
            )?
            .into(),
            SerializedSegment::Cubic(r) => CubicBez::new(
                (r.start_x, r.start_y),
                (r.control1_x, r.control1_y),
                (r.control2_x, r.control2_y),
                (r.end_x, r.end_y),
            )?
            .into(),
            SerializedSegment::Arc(r) => Arc::new(
                (r.center_x, r.center_y),
                r.radius,
                r.start_angle,
                r.end_angle,
                r.anticlockwise,
            )?
            .into(),
            SerializedSegment::EllipticalArc(r) => EllipticalArc::new(
                (r.center_x, r.center_y),
                r.radius_x,
                r.radius_y,
                r.rotation,
                r.start_angle,
                r.end_angle,
                r.anticlockwise,
            )?
            .into(),
        };
        Ok(segment)
    }
}

impl TryFrom<SerializedSegment> for Segment {
    type Error = SegmentError;

    #[inline]
    fn try_from(record: SerializedSegment) -> Result<Segment, SegmentError> {
        Segment::try_from(&record)
    }
}

impl From<&Segment> for SerializedSegment {
    fn from(segment: &Segment) -> SerializedSegment {
        segment.serialize()
    }
}
