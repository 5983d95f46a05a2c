// Copyright 2026 the Kurve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for SVG path fragments.

use alloc::string::{String, ToString};

/// Format a coordinate for an SVG path.
///
/// This is the shortest decimal that reads back to the same `f64`, without
/// an exponent and with negative zero written as `0`.
pub fn svg_number(value: f64) -> String {
    if value == 0.0 {
        // Also catches -0.0.
        return "0".to_string();
    }
    value.to_string()
}
