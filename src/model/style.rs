// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Normalized style and layout values, the unit of interning.
//!
//! Everything in this module is already coerced to canonical form (hex/rgba colors, rounded
//! `px` lengths, defaults omitted), so serialized equality is structural equality.

use std::fmt;

use serde::Serialize;

/// Partitions the global variable namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleCategory {
    Fill,
    Stroke,
    Effect,
    Typography,
    Layout,
}

impl StyleCategory {
    /// Order in which a node lists its style references.
    pub const NODE_ORDER: [StyleCategory; 5] = [
        StyleCategory::Layout,
        StyleCategory::Fill,
        StyleCategory::Stroke,
        StyleCategory::Effect,
        StyleCategory::Typography,
    ];

    /// Prefix used for variable ids (`fill_3`).
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Stroke => "stroke",
            Self::Effect => "effect",
            Self::Typography => "typography",
            Self::Layout => "layout",
        }
    }

    /// Property name a node uses to reference a value of this category.
    pub fn node_field(self) -> &'static str {
        match self {
            Self::Fill => "fills",
            Self::Stroke => "strokes",
            Self::Effect => "effects",
            Self::Typography => "textStyle",
            Self::Layout => "layout",
        }
    }
}

impl fmt::Display for StyleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientStop {
    pub position: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Fill {
    /// Bare color string, serialized without a wrapper object.
    #[serde(skip)]
    Solid(String),
    #[serde(rename_all = "camelCase")]
    GradientLinear {
        gradient_handle_positions: Vec<[f64; 2]>,
        gradient_stops: Vec<GradientStop>,
    },
    #[serde(rename_all = "camelCase")]
    GradientRadial {
        gradient_handle_positions: Vec<[f64; 2]>,
        gradient_stops: Vec<GradientStop>,
    },
    #[serde(rename_all = "camelCase")]
    GradientAngular {
        gradient_handle_positions: Vec<[f64; 2]>,
        gradient_stops: Vec<GradientStop>,
    },
    #[serde(rename_all = "camelCase")]
    GradientDiamond {
        gradient_handle_positions: Vec<[f64; 2]>,
        gradient_stops: Vec<GradientStop>,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        image_ref: Option<String>,
        scale_mode: Option<String>,
    },
    /// A paint type this version does not describe; only its tag is kept.
    Other {
        #[serde(rename = "rawType")]
        raw_type: String,
    },
}

/// Fill lists serialize solid colors as plain strings and everything else as tagged objects.
#[derive(Debug, Clone, PartialEq)]
pub struct FillList(pub Vec<Fill>);

impl Serialize for FillList {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;

        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for fill in &self.0 {
            match fill {
                Fill::Solid(color) => seq.serialize_element(color)?,
                other => seq.serialize_element(other)?,
            }
        }
        seq.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeStyle {
    pub colors: FillList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_dashes: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_shadow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_filter: Option<String>,
}

impl EffectStyle {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_case: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align_horizontal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align_vertical: Option<String>,
}

impl TextStyle {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    None,
    Row,
    Column,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sizing {
    Fixed,
    Fill,
    Hug,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LayoutSizing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<Sizing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical: Option<Sizing>,
}

impl LayoutSizing {
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_none() && self.vertical.is_none()
    }
}

/// Auto-layout description of a container and/or of a child's role inside its parent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSpec {
    pub mode: LayoutMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_items: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_self: Option<&'static str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub wrap: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "LayoutSizing::is_empty")]
    pub sizing: LayoutSizing,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overflow_scroll: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<&'static str>,
}

impl LayoutSpec {
    pub fn none() -> Self {
        Self {
            mode: LayoutMode::None,
            justify_content: None,
            align_items: None,
            align_self: None,
            wrap: false,
            gap: None,
            padding: None,
            sizing: LayoutSizing::default(),
            overflow_scroll: Vec::new(),
            position: None,
        }
    }

    /// True when this spec carries no information beyond "not auto-layout".
    pub fn is_trivial(&self) -> bool {
        self == &Self::none()
    }
}

/// Any value that can live in the global variable table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StyleValue {
    Fills(FillList),
    Stroke(StrokeStyle),
    Effect(EffectStyle),
    Typography(TextStyle),
    Layout(LayoutSpec),
}

impl StyleValue {
    /// The category a value naturally belongs to.
    pub fn category(&self) -> StyleCategory {
        match self {
            Self::Fills(_) => StyleCategory::Fill,
            Self::Stroke(_) => StyleCategory::Stroke,
            Self::Effect(_) => StyleCategory::Effect,
            Self::Typography(_) => StyleCategory::Typography,
            Self::Layout(_) => StyleCategory::Layout,
        }
    }
}
