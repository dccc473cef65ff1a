// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::raw::RawNode;
use crate::model::Geometry;

use super::units::{px, round2};
use super::GeometryMode;

/// Bounding box in the output's coordinate system.
///
/// `origin` is the top-left corner of the nearest emitted ancestor that has a bounding box;
/// it is only consulted in [`GeometryMode::Relative`]. Output roots pass `None` and keep
/// canvas coordinates.
pub(crate) fn geometry(
    node: &RawNode,
    origin: Option<(f64, f64)>,
    mode: GeometryMode,
) -> Option<Geometry> {
    let bbox = node.absolute_bounding_box?;
    let (origin_x, origin_y) = match mode {
        GeometryMode::Relative => origin.unwrap_or((0.0, 0.0)),
        GeometryMode::Absolute => (0.0, 0.0),
    };
    Some(Geometry {
        x: round2(bbox.x - origin_x),
        y: round2(bbox.y - origin_y),
        width: round2(bbox.width),
        height: round2(bbox.height),
        rotation: rotation(node),
    })
}

/// Counter-clockwise rotation in degrees, read from the node's relative transform.
fn rotation(node: &RawNode) -> Option<f64> {
    let transform = node.relative_transform?;
    let degrees = round2((-transform[1][0]).atan2(transform[0][0]).to_degrees());
    (degrees != 0.0).then_some(degrees)
}

pub(crate) fn border_radius(node: &RawNode) -> Option<String> {
    if let Some(radii) = node.rectangle_corner_radii {
        let radii = radii.map(round2);
        if radii.iter().all(|radius| *radius == radii[0]) {
            return (radii[0] > 0.0).then(|| px(radii[0]));
        }
        return Some(radii.iter().map(|radius| px(*radius)).collect::<Vec<_>>().join(" "));
    }
    node.corner_radius.filter(|radius| round2(*radius) > 0.0).map(px)
}
