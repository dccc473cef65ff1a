// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Unit and color coercion shared by the style normalizers.
//!
//! All lengths leave this module rounded to two decimals so that float noise from the editor
//! (`15.999999`) cannot split otherwise-equal values into separate variables.

use crate::model::raw::RawColor;

pub(crate) fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let scaled = value * 100.0;
    // Magnitudes this large carry no fractional digits left to round.
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / 100.0;
    // Normalize -0.0 so it serializes as 0.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

pub(crate) fn px(value: f64) -> String {
    format!("{}px", round2(value))
}

/// CSS-style shorthand for four box sides; `None` when every side is zero.
pub(crate) fn box_shorthand(top: f64, right: f64, bottom: f64, left: f64) -> Option<String> {
    let (top, right, bottom, left) = (round2(top), round2(right), round2(bottom), round2(left));
    if top == 0.0 && right == 0.0 && bottom == 0.0 && left == 0.0 {
        return None;
    }
    if top == right && right == bottom && bottom == left {
        return Some(px(top));
    }
    if top == bottom && left == right {
        return Some(format!("{} {}", px(top), px(right)));
    }
    Some(format!("{} {} {} {}", px(top), px(right), px(bottom), px(left)))
}

fn channel(value: f64) -> u8 {
    let value = if value.is_finite() { value.clamp(0.0, 1.0) } else { 0.0 };
    (value * 255.0).round() as u8
}

/// Effective alpha of a color painted at `opacity`; an omitted alpha or opacity means opaque.
pub(crate) fn effective_alpha(color: &RawColor, opacity: Option<f64>) -> f64 {
    round2(color.a.unwrap_or(1.0) * opacity.unwrap_or(1.0)).clamp(0.0, 1.0)
}

/// `#RRGGBB` for opaque colors, `rgba(r, g, b, a)` otherwise.
pub(crate) fn css_color(color: &RawColor, opacity: Option<f64>) -> String {
    let (r, g, b) = (channel(color.r), channel(color.g), channel(color.b));
    let alpha = effective_alpha(color, opacity);
    if alpha >= 1.0 {
        format!("#{r:02X}{g:02X}{b:02X}")
    } else {
        format!("rgba({r}, {g}, {b}, {alpha})")
    }
}
