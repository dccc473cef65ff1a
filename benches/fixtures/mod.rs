// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Deterministic synthetic Figma documents (no RNG).

use figlens::model::SimplifiedDesign;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy)]
pub enum Case {
    /// One page, a dozen cards.
    Small,
    /// Many cards sharing a handful of styles.
    MediumShared,
    /// Cards with mostly unique colors, so the variable table grows with the tree.
    LargeUnique,
    /// A single chain deeper than the traversal ceiling.
    Deep,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::MediumShared => "medium_shared",
            Self::LargeUnique => "large_unique",
            Self::Deep => "deep_chain",
        }
    }

    pub const ALL: [Case; 4] = [Case::Small, Case::MediumShared, Case::LargeUnique, Case::Deep];
}

fn color(seed: u32) -> Value {
    let channel = |shift: u32| f64::from((seed >> shift) & 0xff) / 255.0;
    json!({"r": channel(16), "g": channel(8), "b": channel(0), "a": 1})
}

fn text(id: String, characters: &str, size: u32, x: u32, y: u32, fill: Value) -> Value {
    json!({
        "id": id,
        "name": characters,
        "type": "TEXT",
        "characters": characters,
        "absoluteBoundingBox": {"x": x, "y": y, "width": 200, "height": size + 4},
        "style": {
            "fontFamily": "Inter",
            "fontWeight": if size > 16 { 700 } else { 400 },
            "fontSize": size,
            "lineHeightPx": f64::from(size) * 1.25,
            "letterSpacing": 0.2
        },
        "fills": [{"type": "SOLID", "color": fill}]
    })
}

fn card(index: u32, palette: u32) -> Value {
    let x = (index % 10) * 260;
    let y = (index / 10) * 340;
    let accent = color(0x3366ff ^ (index % palette) * 0x010203);
    json!({
        "id": format!("{}:1", index + 10),
        "name": format!("Card {index}"),
        "type": "FRAME",
        "absoluteBoundingBox": {"x": x, "y": y, "width": 240, "height": 320},
        "layoutMode": "VERTICAL",
        "itemSpacing": 8,
        "paddingTop": 16, "paddingRight": 16, "paddingBottom": 16, "paddingLeft": 16,
        "cornerRadius": 12,
        "fills": [{"type": "SOLID", "color": {"r": 1, "g": 1, "b": 1, "a": 1}}],
        "strokes": [{"type": "SOLID", "color": accent}],
        "strokeWeight": 1,
        "effects": [{
            "type": "DROP_SHADOW",
            "radius": 12,
            "color": {"r": 0, "g": 0, "b": 0, "a": 0.1},
            "offset": {"x": 0, "y": 2}
        }],
        "children": [
            text(format!("{}:2", index + 10), "Title", 20, x + 16, y + 16, color(0x111111)),
            text(format!("{}:3", index + 10), "Body copy", 14, x + 16, y + 48, color(0x555555)),
            {
                "id": format!("{}:4", index + 10),
                "name": "Accent",
                "type": "RECTANGLE",
                "absoluteBoundingBox": {"x": x + 16, "y": y + 280, "width": 208, "height": 4},
                "fills": [{"type": "SOLID", "color": accent}]
            }
        ]
    })
}

fn file(cards: u32, palette: u32) -> Value {
    let children = (0..cards).map(|index| card(index, palette)).collect::<Vec<_>>();
    json!({
        "name": "Bench",
        "document": {
            "id": "0:0",
            "type": "DOCUMENT",
            "children": [{"id": "0:1", "name": "Page", "type": "CANVAS", "children": children}]
        }
    })
}

fn deep(levels: u32) -> Value {
    let mut node = json!({"id": format!("{levels}:0"), "name": "Leaf", "type": "RECTANGLE"});
    for level in (0..levels).rev() {
        node = json!({
            "id": format!("{level}:0"),
            "name": format!("Group {level}"),
            "type": "GROUP",
            "children": [node]
        });
    }
    json!({"document": {"id": "root", "type": "DOCUMENT", "children": [node]}})
}

pub fn fixture(case: Case) -> Value {
    match case {
        Case::Small => file(12, 2),
        Case::MediumShared => file(400, 4),
        Case::LargeUnique => file(2_000, 1_500),
        Case::Deep => deep(400),
    }
}

/// Cheap digest that keeps the optimizer from discarding a conversion.
pub fn checksum(design: &SimplifiedDesign) -> u64 {
    let mut acc = design.global_vars().len() as u64;
    for (node, depth) in design.walk() {
        acc = acc.wrapping_mul(31).wrapping_add(node.id.len() as u64 + depth as u64);
        acc = acc.wrapping_add(node.styles.len() as u64);
    }
    acc
}
