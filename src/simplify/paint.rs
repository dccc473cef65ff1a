// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::raw::{RawNode, RawPaint};
use crate::model::{Fill, FillList, GradientStop, StrokeStyle};

use super::units::{box_shorthand, css_color, px, round2};

fn gradient_parts(paint: &RawPaint) -> (Vec<[f64; 2]>, Vec<GradientStop>) {
    let handles = paint
        .gradient_handle_positions
        .iter()
        .map(|handle| [round2(handle.x), round2(handle.y)])
        .collect();
    let stops = paint
        .gradient_stops
        .iter()
        .map(|stop| GradientStop {
            position: round2(stop.position),
            color: css_color(&stop.color, paint.opacity),
        })
        .collect();
    (handles, stops)
}

/// Normalizes one visible paint. Solid paints without a color carry nothing and are dropped.
pub(crate) fn normalize_paint(paint: &RawPaint) -> Option<Fill> {
    let fill = match paint.paint_type.as_str() {
        "SOLID" => Fill::Solid(css_color(paint.color.as_ref()?, paint.opacity)),
        "GRADIENT_LINEAR" => {
            let (gradient_handle_positions, gradient_stops) = gradient_parts(paint);
            Fill::GradientLinear {
                gradient_handle_positions,
                gradient_stops,
            }
        }
        "GRADIENT_RADIAL" => {
            let (gradient_handle_positions, gradient_stops) = gradient_parts(paint);
            Fill::GradientRadial {
                gradient_handle_positions,
                gradient_stops,
            }
        }
        "GRADIENT_ANGULAR" => {
            let (gradient_handle_positions, gradient_stops) = gradient_parts(paint);
            Fill::GradientAngular {
                gradient_handle_positions,
                gradient_stops,
            }
        }
        "GRADIENT_DIAMOND" => {
            let (gradient_handle_positions, gradient_stops) = gradient_parts(paint);
            Fill::GradientDiamond {
                gradient_handle_positions,
                gradient_stops,
            }
        }
        "IMAGE" => Fill::Image {
            image_ref: paint.image_ref.clone(),
            scale_mode: paint.scale_mode.clone(),
        },
        other => Fill::Other {
            raw_type: other.to_owned(),
        },
    };
    Some(fill)
}

fn normalize_paints(paints: &[RawPaint]) -> Vec<Fill> {
    paints.iter().filter(|paint| paint.is_visible()).filter_map(normalize_paint).collect()
}

pub(crate) fn fills(node: &RawNode) -> Option<FillList> {
    let fills = normalize_paints(node.fills.as_deref()?);
    (!fills.is_empty()).then_some(FillList(fills))
}

pub(crate) fn strokes(node: &RawNode) -> Option<StrokeStyle> {
    let colors = normalize_paints(node.strokes.as_deref()?);
    if colors.is_empty() {
        return None;
    }

    let stroke_weight = match (node.individual_stroke_weights, node.stroke_weight) {
        (Some(sides), _) => box_shorthand(sides.top, sides.right, sides.bottom, sides.left),
        (None, Some(weight)) if round2(weight) > 0.0 => Some(px(weight)),
        _ => None,
    };
    let stroke_dashes = node
        .stroke_dashes
        .as_ref()
        .filter(|dashes| !dashes.is_empty())
        .map(|dashes| dashes.iter().copied().map(round2).collect());

    Some(StrokeStyle {
        colors: FillList(colors),
        stroke_weight,
        stroke_align: node.stroke_align.clone(),
        stroke_dashes,
    })
}
