// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Typed, lenient views over raw Figma REST nodes.
//!
//! The upstream schema is versioned and mostly optional, so every field here is optional and
//! unknown fields are ignored. A node is viewed one object at a time: [`RawNode::from_value`]
//! never looks at `children`, which the simplifier walks separately.
//!
//! Style and layout properties are read one at a time. A property with an unexpected shape is
//! dropped on its own, and list properties (`fills`, `strokes`, `effects`, gradient stops) drop
//! only the entries that do not fit.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn entries<T: DeserializeOwned>(value: Value) -> Option<Vec<T>> {
    let Value::Array(items) = value else {
        return None;
    };
    let total = items.len();
    let kept: Vec<T> =
        items.into_iter().filter_map(|item| serde_json::from_value(item).ok()).collect();
    if kept.len() < total {
        tracing::debug!(dropped = total - kept.len(), "dropping unreadable list entries");
    }
    Some(kept)
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Value::deserialize(deserializer).map(entries::<T>)
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(entries::<T>(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// The node kinds the simplifier knows how to describe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawNodeKind {
    Document,
    Canvas,
    Frame,
    Group,
    Section,
    Vector,
    BooleanOperation,
    Star,
    Line,
    Ellipse,
    RegularPolygon,
    Rectangle,
    Text,
    Component,
    ComponentSet,
    Instance,
    Slice,
    /// Anything else, including nodes without a `type` discriminant.
    Unknown(String),
}

impl RawNodeKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "DOCUMENT" => Self::Document,
            "CANVAS" => Self::Canvas,
            "FRAME" => Self::Frame,
            "GROUP" => Self::Group,
            "SECTION" => Self::Section,
            "VECTOR" => Self::Vector,
            "BOOLEAN_OPERATION" => Self::BooleanOperation,
            "STAR" => Self::Star,
            "LINE" => Self::Line,
            "ELLIPSE" => Self::Ellipse,
            "REGULAR_POLYGON" => Self::RegularPolygon,
            "RECTANGLE" => Self::Rectangle,
            "TEXT" => Self::Text,
            "COMPONENT" => Self::Component,
            "COMPONENT_SET" => Self::ComponentSet,
            "INSTANCE" => Self::Instance,
            "SLICE" => Self::Slice,
            other => Self::Unknown(other.to_owned()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::Document => "DOCUMENT",
            Self::Canvas => "CANVAS",
            Self::Frame => "FRAME",
            Self::Group => "GROUP",
            Self::Section => "SECTION",
            Self::Vector => "VECTOR",
            Self::BooleanOperation => "BOOLEAN_OPERATION",
            Self::Star => "STAR",
            Self::Line => "LINE",
            Self::Ellipse => "ELLIPSE",
            Self::RegularPolygon => "REGULAR_POLYGON",
            Self::Rectangle => "RECTANGLE",
            Self::Text => "TEXT",
            Self::Component => "COMPONENT",
            Self::ComponentSet => "COMPONENT_SET",
            Self::Instance => "INSTANCE",
            Self::Slice => "SLICE",
            Self::Unknown(_) => "unknown",
        }
    }

    /// Frame-like containers can carry auto-layout parameters.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Frame | Self::Component | Self::ComponentSet | Self::Instance | Self::Section
        )
    }

}

impl fmt::Display for RawNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(tag) if !tag.is_empty() => write!(f, "unknown({tag})"),
            other => f.write_str(other.tag()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawVector {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RawColorStop {
    pub position: f64,
    pub color: RawColor,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPaint {
    #[serde(rename = "type")]
    pub paint_type: String,
    pub visible: Option<bool>,
    pub opacity: Option<f64>,
    pub color: Option<RawColor>,
    #[serde(deserialize_with = "lenient_vec")]
    pub gradient_handle_positions: Vec<RawVector>,
    #[serde(deserialize_with = "lenient_vec")]
    pub gradient_stops: Vec<RawColorStop>,
    pub scale_mode: Option<String>,
    pub image_ref: Option<String>,
}

impl RawPaint {
    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEffect {
    #[serde(rename = "type")]
    pub effect_type: String,
    pub visible: Option<bool>,
    pub radius: f64,
    pub color: Option<RawColor>,
    pub offset: Option<RawVector>,
    pub spread: Option<f64>,
}

impl RawEffect {
    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTypeStyle {
    #[serde(deserialize_with = "lenient")]
    pub font_family: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub font_weight: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub font_size: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub italic: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub text_align_horizontal: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub text_align_vertical: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub letter_spacing: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub line_height_px: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub line_height_percent_font_size: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub line_height_unit: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub text_case: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub text_decoration: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawStrokeWeights {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawComponentProperty {
    #[serde(rename = "type", default)]
    pub property_type: String,
    #[serde(default)]
    pub value: Value,
}

/// Per-node view of the raw property bag.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawNode {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub node_type: Option<String>,
    pub visible: Option<bool>,

    #[serde(deserialize_with = "lenient_list")]
    pub fills: Option<Vec<RawPaint>>,
    #[serde(deserialize_with = "lenient_list")]
    pub strokes: Option<Vec<RawPaint>>,
    #[serde(deserialize_with = "lenient")]
    pub stroke_weight: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub individual_stroke_weights: Option<RawStrokeWeights>,
    #[serde(deserialize_with = "lenient")]
    pub stroke_align: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub stroke_dashes: Option<Vec<f64>>,
    #[serde(deserialize_with = "lenient_list")]
    pub effects: Option<Vec<RawEffect>>,
    #[serde(deserialize_with = "lenient")]
    pub corner_radius: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub rectangle_corner_radii: Option<[f64; 4]>,
    #[serde(deserialize_with = "lenient")]
    pub opacity: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub blend_mode: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub style: Option<RawTypeStyle>,
    #[serde(deserialize_with = "lenient")]
    pub characters: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub absolute_bounding_box: Option<RawRect>,
    #[serde(deserialize_with = "lenient")]
    pub relative_transform: Option<[[f64; 3]; 2]>,

    #[serde(deserialize_with = "lenient")]
    pub layout_mode: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub layout_wrap: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub primary_axis_align_items: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub counter_axis_align_items: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub layout_align: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub layout_grow: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub layout_sizing_horizontal: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub layout_sizing_vertical: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub layout_positioning: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub item_spacing: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub counter_axis_spacing: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub padding_left: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub padding_right: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub padding_top: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub padding_bottom: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub clips_content: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub overflow_direction: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub component_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub component_properties: Option<BTreeMap<String, RawComponentProperty>>,

    #[serde(skip)]
    malformed: bool,
}

impl RawNode {
    /// Views one raw node object.
    ///
    /// Only a broken identity (a non-object value, or `id`, `name`, `type` or `visible` of the
    /// wrong shape) makes the node malformed: it is then re-read leniently (id, name, bounding
    /// box only) and normalizes to the generic unknown kind.
    pub fn from_value(value: &Value) -> Self {
        match RawNode::deserialize(value) {
            Ok(node) => node,
            Err(_) => Self::lenient(value),
        }
    }

    fn lenient(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_owned);
        Self {
            id: text("id"),
            name: text("name"),
            node_type: text("type"),
            visible: value.get("visible").and_then(Value::as_bool),
            absolute_bounding_box: value
                .get("absoluteBoundingBox")
                .and_then(|bbox| RawRect::deserialize(bbox).ok()),
            malformed: true,
            ..Self::default()
        }
    }

    pub fn kind(&self) -> RawNodeKind {
        match (&self.node_type, self.malformed) {
            (Some(tag), false) => RawNodeKind::from_tag(tag),
            (Some(tag), true) => RawNodeKind::Unknown(tag.clone()),
            (None, _) => RawNodeKind::Unknown(String::new()),
        }
    }

    pub fn is_malformed(&self) -> bool {
        self.malformed
    }

    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }
}

/// Component metadata as listed in a file's top-level `components` map.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawComponent {
    pub key: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub component_set_id: Option<String>,
}

/// Returns the children of a raw node object, in rendering order.
pub fn raw_children(value: &Value) -> &[Value] {
    value.get("children").and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[])
}
