// Copyright 2026 the Kurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parametric 2D segments.
//!
//! The kurve library models the pieces a vector path is built from: straight
//! [`Line`]s, quadratic and cubic Béziers ([`QuadBez`], [`CubicBez`]), circular
//! [`Arc`]s and [`EllipticalArc`]s. Each is parametrized over `t` in `[0, 1]`
//! and implements [`ParamSegment`], which carries the geometric queries
//! (position, tangent, curvature, bounds, subdivision, arc length, flattening,
//! ray casting, dashing). The closed [`Segment`] enum dispatches over all five
//! kinds and adds the pairwise operations: intersection, overlap detection
//! and nearest-point search.
//!
//! # Examples
//!
//! Intersecting a line with a cubic:
//! ```
//! use kurve::{CubicBez, Line, ParamSegment, Segment};
//!
//! let line: Segment = Line::new((0.0, 5.0), (10.0, 5.0))?.into();
//! let cubic: Segment = CubicBez::new((0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0))?.into();
//! let hits = Segment::intersect(&line, &cubic);
//! assert_eq!(hits.len(), 2);
//! for hit in &hits {
//!     assert!((hit.point.y - 5.0).abs() < 1e-6);
//!     assert!(cubic.position_at(hit.b_t).distance(hit.point) < 1e-6);
//! }
//! # Ok::<(), kurve::SegmentError>(())
//! ```
//!
//! Arc measurements are closed form:
//! ```
//! use core::f64::consts::PI;
//! use kurve::{Arc, ParamSegment, Point};
//!
//! let arc = Arc::new((0.0, 0.0), 2.0, 0.0, PI, false)?;
//! assert!((arc.arc_length() - 2.0 * PI).abs() < 1e-12);
//! assert!(arc.end().distance(Point::new(-2.0, 0.0)) < 1e-12);
//! # Ok::<(), kurve::SegmentError>(())
//! ```
//!
//! # Features
//!
//! This crate either uses the standard library or the [`libm`] crate for
//! math functionality. The `std` feature is enabled by default, but can be
//! disabled, as long as the `libm` feature is enabled. This crate uses the
//! `alloc` crate regardless.
//!
//! The `serde` feature derives serialization for the interchange records in
//! [`SerializedSegment`] and for the small value types. `schemars` derives
//! JSON schemas for the same types, and `mint` adds conversions for
//! [`Point`], [`Vec2`] and [`Affine`].
//!
//! Diagnostics (recursion caps, numeric fallbacks) go to the [`log`] facade
//! at debug and trace level.
//!
//! [`libm`]: https://docs.rs/libm
//! [`log`]: https://docs.rs/log

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision,
    clippy::bool_to_int_with_if,
    reason = "numeric code reads better with short names and literal constants"
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("kurve requires either the `std` or `libm` feature");

extern crate alloc;

mod affine;
mod arc;
mod closest;
pub mod common;
mod context;
mod cubicbez;
mod elliptical_arc;
pub mod epsilon;
mod error;
mod intersection;
mod line;
mod overlap;
mod param_segment;
mod point;
mod quadbez;
mod ray;
mod rect;
mod segment;
mod serialize;
mod svg;
mod vec2;

pub use crate::affine::*;
pub use crate::arc::*;
pub use crate::closest::*;
pub use crate::context::*;
pub use crate::cubicbez::*;
pub use crate::elliptical_arc::*;
pub use crate::error::*;
pub use crate::intersection::*;
pub use crate::line::*;
pub use crate::overlap::*;
pub use crate::param_segment::*;
pub use crate::point::*;
pub use crate::quadbez::*;
pub use crate::ray::*;
pub use crate::rect::*;
pub use crate::segment::*;
pub use crate::serialize::*;
pub use crate::svg::*;
pub use crate::vec2::*;
