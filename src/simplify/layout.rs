// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::raw::RawNode;
use crate::model::{LayoutMode, LayoutSizing, LayoutSpec, Sizing};

use super::units::{box_shorthand, px, round2};

pub(crate) fn layout_mode(node: &RawNode) -> LayoutMode {
    match node.layout_mode.as_deref() {
        Some("HORIZONTAL") => LayoutMode::Row,
        Some("VERTICAL") => LayoutMode::Column,
        _ => LayoutMode::None,
    }
}

fn justify_content(raw: Option<&str>) -> Option<&'static str> {
    match raw? {
        "MAX" => Some("flex-end"),
        "CENTER" => Some("center"),
        "SPACE_BETWEEN" => Some("space-between"),
        _ => None,
    }
}

fn align_items(raw: Option<&str>) -> Option<&'static str> {
    match raw? {
        "MAX" => Some("flex-end"),
        "CENTER" => Some("center"),
        "BASELINE" => Some("baseline"),
        _ => None,
    }
}

fn sizing(raw: Option<&str>) -> Option<Sizing> {
    match raw? {
        "FIXED" => Some(Sizing::Fixed),
        "FILL" => Some(Sizing::Fill),
        "HUG" => Some(Sizing::Hug),
        _ => None,
    }
}

fn overflow_scroll(raw: Option<&str>) -> Vec<&'static str> {
    match raw {
        Some("HORIZONTAL_SCROLLING") => vec!["x"],
        Some("VERTICAL_SCROLLING") => vec!["y"],
        Some("HORIZONTAL_AND_VERTICAL_SCROLLING") => vec!["x", "y"],
        _ => Vec::new(),
    }
}

/// Describes a node's own auto-layout (when it is a container) and its role inside an
/// auto-layout parent. Returns `None` when neither applies.
pub(crate) fn layout_spec(
    node: &RawNode,
    is_container: bool,
    parent_mode: Option<LayoutMode>,
) -> Option<LayoutSpec> {
    let mode = if is_container { layout_mode(node) } else { LayoutMode::None };
    let in_flex_parent = matches!(parent_mode, Some(LayoutMode::Row | LayoutMode::Column));
    let mut spec = LayoutSpec::none();
    spec.mode = mode;

    if mode != LayoutMode::None {
        spec.justify_content = justify_content(node.primary_axis_align_items.as_deref());
        spec.align_items = align_items(node.counter_axis_align_items.as_deref());
        spec.wrap = node.layout_wrap.as_deref() == Some("WRAP");
        spec.gap = node.item_spacing.filter(|gap| round2(*gap) != 0.0).map(px);
        spec.padding = box_shorthand(
            node.padding_top.unwrap_or(0.0),
            node.padding_right.unwrap_or(0.0),
            node.padding_bottom.unwrap_or(0.0),
            node.padding_left.unwrap_or(0.0),
        );
    }

    if mode != LayoutMode::None || in_flex_parent {
        spec.sizing = LayoutSizing {
            horizontal: sizing(node.layout_sizing_horizontal.as_deref()),
            vertical: sizing(node.layout_sizing_vertical.as_deref()),
        };
    }

    if in_flex_parent {
        if node.layout_align.as_deref() == Some("STRETCH") {
            spec.align_self = Some("stretch");
        }
        // Older files only carry `layoutGrow`; it means "fill" along the parent's main axis.
        if node.layout_grow.is_some_and(|grow| grow > 0.0) {
            match parent_mode {
                Some(LayoutMode::Row) if spec.sizing.horizontal.is_none() => {
                    spec.sizing.horizontal = Some(Sizing::Fill);
                }
                Some(LayoutMode::Column) if spec.sizing.vertical.is_none() => {
                    spec.sizing.vertical = Some(Sizing::Fill);
                }
                _ => {}
            }
        }
        if node.layout_positioning.as_deref() == Some("ABSOLUTE") {
            spec.position = Some("absolute");
        }
    }

    if is_container {
        spec.overflow_scroll = overflow_scroll(node.overflow_direction.as_deref());
    }

    (!spec.is_trivial()).then_some(spec)
}
