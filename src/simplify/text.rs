// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::raw::RawTypeStyle;
use crate::model::TextStyle;

use super::units::round2;

/// Normalizes a Figma `TypeStyle`.
///
/// Line height becomes a unitless `em` multiple and letter spacing a percentage of the font
/// size, so a style reused at the same size always collapses to one value. Editor defaults
/// (`LEFT`/`TOP` alignment, `ORIGINAL` case, `NONE` decoration, intrinsic line height) are
/// omitted rather than spelled out.
pub(crate) fn text_style(style: &RawTypeStyle) -> Option<TextStyle> {
    let font_size = style.font_size.map(round2).filter(|size| *size > 0.0);

    let line_height = match (style.line_height_unit.as_deref(), style.line_height_px, font_size) {
        (Some("INTRINSIC_%"), _, _) => None,
        (_, Some(line_px), Some(size)) if line_px > 0.0 => {
            Some(format!("{}em", round2(line_px / size)))
        }
        _ => None,
    };
    let letter_spacing = match (style.letter_spacing, font_size) {
        (Some(spacing), Some(size)) if round2(spacing) != 0.0 => {
            Some(format!("{}%", round2(spacing / size * 100.0)))
        }
        _ => None,
    };

    let text = TextStyle {
        font_family: style.font_family.clone().filter(|family| !family.is_empty()),
        font_weight: style
            .font_weight
            .filter(|weight| weight.is_finite() && *weight > 0.0)
            .map(|weight| weight.round().min(f64::from(u16::MAX)) as u16),
        font_size,
        font_style: style.italic.filter(|italic| *italic).map(|_| "italic"),
        line_height,
        letter_spacing,
        text_case: style.text_case.clone().filter(|case| case != "ORIGINAL"),
        text_decoration: style.text_decoration.clone().filter(|decoration| decoration != "NONE"),
        text_align_horizontal: style.text_align_horizontal.clone().filter(|align| align != "LEFT"),
        text_align_vertical: style.text_align_vertical.clone().filter(|align| align != "TOP"),
    };
    (!text.is_empty()).then_some(text)
}
