// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Output types of a conversion: simplified nodes, the global variable table, and metadata.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use smol_str::SmolStr;

use super::style::{StyleCategory, StyleValue};

/// Key into the global variable table, e.g. `fill_3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VarId(SmolStr);

impl VarId {
    pub(crate) fn new(category: StyleCategory, ordinal: u32) -> Self {
        let mut buf = itoa::Buffer::new();
        let ordinal = buf.format(ordinal);
        let prefix = category.prefix();
        let mut value = String::with_capacity(prefix.len() + 1 + ordinal.len());
        value.push_str(prefix);
        value.push('_');
        value.push_str(ordinal);
        Self(SmolStr::new(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRef {
    pub category: StyleCategory,
    pub var: VarId,
}

/// Ordered style references of one node; serialized as `{ "fills": "fill_1", ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRefs(SmallVec<[StyleRef; 4]>);

impl StyleRefs {
    pub fn push(&mut self, category: StyleCategory, var: VarId) {
        self.0.push(StyleRef { category, var });
    }

    pub fn get(&self, category: StyleCategory) -> Option<&VarId> {
        self.0.iter().find(|style| style.category == category).map(|style| &style.var)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleRef> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for StyleRefs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for style in &self.0 {
            map.serialize_entry(style.category.node_field(), &style.var)?;
        }
        map.end()
    }
}

/// Position and size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SmolStr,
    /// Upstream tag of a node that normalized to the generic `unknown` kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "StyleRefs::is_empty")]
    pub styles: StyleRefs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blend_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub component_properties: Vec<ComponentProperty>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SimplifiedNode>,
}

impl SimplifiedNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: impl Into<SmolStr>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            raw_type: None,
            geometry: None,
            text: None,
            styles: StyleRefs::default(),
            opacity: None,
            blend_mode: None,
            border_radius: None,
            component_id: None,
            component_properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Pre-order iterator over this node and its descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(self, 0)],
        }
    }
}

/// Pre-order traversal yielding `(node, depth)`, depth relative to the starting node.
pub struct Walk<'a> {
    stack: Vec<(&'a SimplifiedNode, usize)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (&'a SimplifiedNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        Some((node, depth))
    }
}

/// Deduplicated style values in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalVarTable {
    entries: Vec<(VarId, StyleValue)>,
}

impl GlobalVarTable {
    pub(crate) fn from_entries(entries: Vec<(VarId, StyleValue)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, var: &str) -> Option<&StyleValue> {
        self.entries.iter().find(|(id, _)| id.as_str() == var).map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VarId, &StyleValue)> {
        self.entries.iter().map(|(id, value)| (id, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_in(&self, category: StyleCategory) -> usize {
        self.entries
            .iter()
            .filter(|(id, _)| {
                id.as_str()
                    .strip_prefix(category.prefix())
                    .is_some_and(|rest| rest.starts_with('_'))
            })
            .count()
    }
}

impl Serialize for GlobalVarTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, value) in &self.entries {
            map.serialize_entry(id, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_set_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignMetadata {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub components: BTreeMap<String, ComponentSummary>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub component_sets: BTreeMap<String, ComponentSummary>,
}

/// The result of one conversion. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplifiedDesign {
    metadata: DesignMetadata,
    nodes: Vec<SimplifiedNode>,
    global_vars: GlobalVarTable,
}

impl SimplifiedDesign {
    pub(crate) fn new(
        metadata: DesignMetadata,
        nodes: Vec<SimplifiedNode>,
        global_vars: GlobalVarTable,
    ) -> Self {
        Self {
            metadata,
            nodes,
            global_vars,
        }
    }

    pub fn metadata(&self) -> &DesignMetadata {
        &self.metadata
    }

    pub fn nodes(&self) -> &[SimplifiedNode] {
        &self.nodes
    }

    pub fn global_vars(&self) -> &GlobalVarTable {
        &self.global_vars
    }

    /// Pre-order iterator over every node of the forest, with depth from its root.
    pub fn walk(&self) -> impl Iterator<Item = (&SimplifiedNode, usize)> {
        self.nodes.iter().flat_map(SimplifiedNode::walk)
    }

    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    pub fn find(&self, id: &str) -> Option<&SimplifiedNode> {
        self.walk().map(|(node, _)| node).find(|node| node.id == id)
    }
}
