// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Raw Figma document → [`SimplifiedDesign`].
//!
//! The walk is pre-order over an explicit stack, so pathological nesting in an upstream
//! document cannot exhaust the native call stack. Every conversion owns its own
//! [`Interner`]; variable ids therefore depend only on the traversal order of one document.

mod effects;
mod geometry;
pub mod interner;
mod layout;
mod paint;
mod text;
mod units;

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::raw::{raw_children, RawComponent};
use crate::model::{
    ComponentProperty, ComponentSummary, DesignMetadata, EffectStyle, FillList, LayoutMode,
    LayoutSpec, NodeId, RawNode, RawNodeKind, SimplifiedDesign, SimplifiedNode, StrokeStyle,
    StyleCategory, StyleRefs, StyleValue, TextStyle,
};

pub use interner::Interner;

/// Hard limit on traversal depth, applied even when the caller sets no `max_depth`.
pub const DEFAULT_DEPTH_CEILING: usize = 256;

const SUGGESTION_LIMIT: usize = 3;
const SUGGESTION_MIN_RATIO: f64 = 0.6;
const SUGGESTION_POOL_LIMIT: usize = 50_000;

/// Coordinate system used for every node of one output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GeometryMode {
    /// Relative to the nearest emitted ancestor with a bounding box; roots keep canvas
    /// coordinates.
    #[default]
    Relative,
    /// Canvas (world) coordinates.
    Absolute,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimplifyOptions {
    /// Deepest level to emit; output roots are level 0.
    pub max_depth: Option<usize>,
    /// Start at this node instead of the document's pages. The target is emitted even when
    /// it is hidden; hidden nodes below it are still skipped.
    pub target_node_id: Option<NodeId>,
    pub geometry: GeometryMode,
}

/// A node close to a requested id; `id` can be passed back as a target as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSuggestion {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl fmt::Display for NodeSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            f.write_str(&self.id)
        } else {
            write!(f, "{} ({})", self.id, self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimplifyError {
    NotADocument {
        found: &'static str,
    },
    TargetNotFound {
        node_id: NodeId,
        suggestions: Vec<NodeSuggestion>,
    },
}

impl fmt::Display for SimplifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotADocument { found } => write!(
                f,
                "expected a Figma file, file-nodes response or node object (found {found})"
            ),
            Self::TargetNotFound {
                node_id,
                suggestions,
            } => {
                write!(f, "node {node_id} does not exist in this document")?;
                for (index, suggestion) in suggestions.iter().enumerate() {
                    let lead = if index == 0 { " (did you mean: " } else { ", " };
                    write!(f, "{lead}{suggestion}")?;
                }
                if !suggestions.is_empty() {
                    f.write_str(")")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for SimplifyError {}

/// Converts one raw document.
pub fn simplify(
    raw: &Value,
    options: &SimplifyOptions,
) -> Result<SimplifiedDesign, SimplifyError> {
    Simplifier::new(options).run(raw)
}

/// Converts independent documents in parallel, one interner per document. Results keep the
/// input order.
pub fn simplify_batch(
    documents: &[Value],
    options: &SimplifyOptions,
) -> Vec<Result<SimplifiedDesign, SimplifyError>> {
    documents.par_iter().map(|raw| simplify(raw, options)).collect()
}

#[derive(Debug, Clone)]
pub struct Simplifier<'o> {
    options: &'o SimplifyOptions,
    depth_ceiling: usize,
}

impl<'o> Simplifier<'o> {
    pub fn new(options: &'o SimplifyOptions) -> Self {
        Self {
            options,
            depth_ceiling: DEFAULT_DEPTH_CEILING,
        }
    }

    pub fn with_depth_ceiling(mut self, depth_ceiling: usize) -> Self {
        self.depth_ceiling = depth_ceiling.max(1);
        self
    }

    pub fn run(&self, raw: &Value) -> Result<SimplifiedDesign, SimplifyError> {
        if !raw.is_object() {
            return Err(SimplifyError::NotADocument {
                found: json_kind(raw),
            });
        }
        let roots = DocumentRoots::of(raw).ok_or(SimplifyError::NotADocument {
            found: "an object without document, nodes or node fields",
        })?;

        let emit = match &self.options.target_node_id {
            Some(target) => vec![find_target(&roots.search, target)?],
            None => roots.emit,
        };

        let mut traversal = Traversal::new(self.options, self.depth_ceiling);
        let nodes = traversal.run(&emit);
        if traversal.truncated > 0 {
            tracing::warn!(
                truncated = traversal.truncated,
                depth_ceiling = self.depth_ceiling,
                "document nested deeper than the traversal ceiling; subtrees were dropped"
            );
        }
        tracing::debug!(
            nodes = traversal.emitted,
            unknown = traversal.unknown,
            global_vars = traversal.interner.len(),
            "simplified design"
        );

        Ok(SimplifiedDesign::new(metadata(raw), nodes, traversal.interner.into_table()))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Where emission starts and where a target node is searched for.
struct DocumentRoots<'v> {
    emit: Vec<&'v Value>,
    search: Vec<&'v Value>,
}

impl<'v> DocumentRoots<'v> {
    fn of(raw: &'v Value) -> Option<Self> {
        if let Some(document) = raw.get("document").filter(|document| document.is_object()) {
            return Some(Self {
                emit: raw_children(document).iter().collect(),
                search: vec![document],
            });
        }
        if let Some(nodes) = raw.get("nodes").and_then(Value::as_object) {
            // Unknown ids come back as `null` entries.
            let documents: Vec<&Value> = nodes
                .values()
                .filter_map(|entry| entry.get("document"))
                .filter(|document| document.is_object())
                .collect();
            return Some(Self {
                emit: documents.clone(),
                search: documents,
            });
        }
        if raw.get("type").is_some() || raw.get("id").is_some() {
            return Some(Self {
                emit: vec![raw],
                search: vec![raw],
            });
        }
        None
    }
}

fn node_id_of(value: &Value) -> Option<&str> {
    value.get("id").and_then(Value::as_str)
}

fn find_target<'v>(search: &[&'v Value], target: &NodeId) -> Result<&'v Value, SimplifyError> {
    let mut stack: Vec<&Value> = search.iter().rev().copied().collect();
    let mut pool: Vec<(&str, &str)> = Vec::new();
    while let Some(value) = stack.pop() {
        let id = node_id_of(value);
        if id == Some(target.as_str()) {
            return Ok(value);
        }
        if let Some(id) = id {
            if pool.len() < SUGGESTION_POOL_LIMIT {
                let name = value.get("name").and_then(Value::as_str).unwrap_or_default();
                pool.push((id, name));
            }
        }
        stack.extend(raw_children(value).iter().rev());
    }

    Err(SimplifyError::TargetNotFound {
        node_id: target.clone(),
        suggestions: suggestions(target.as_str(), &pool),
    })
}

fn suggestions(target: &str, pool: &[(&str, &str)]) -> Vec<NodeSuggestion> {
    let mut scored: Vec<(f64, usize)> = pool
        .iter()
        .enumerate()
        .filter_map(|(index, (id, _))| {
            let ratio = rapidfuzz::fuzz::ratio(target.chars(), id.chars());
            (ratio >= SUGGESTION_MIN_RATIO).then_some((ratio, index))
        })
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
    scored
        .into_iter()
        .take(SUGGESTION_LIMIT)
        .map(|(_, index)| {
            let (id, name) = pool[index];
            NodeSuggestion {
                id: id.to_owned(),
                name: name.to_owned(),
            }
        })
        .collect()
}

fn component_table(raw: &Value, key: &str, into: &mut BTreeMap<String, ComponentSummary>) {
    let Some(entries) = raw.get(key).and_then(Value::as_object) else {
        return;
    };
    for (id, entry) in entries {
        let Ok(component) = RawComponent::deserialize(entry) else {
            tracing::debug!(component_id = %id, "skipping malformed component entry");
            continue;
        };
        into.insert(
            id.clone(),
            ComponentSummary {
                name: component.name,
                key: component.key,
                description: component.description.filter(|description| !description.is_empty()),
                component_set_id: component.component_set_id,
            },
        );
    }
}

fn metadata(raw: &Value) -> DesignMetadata {
    let text = |key: &str| raw.get(key).and_then(Value::as_str).map(str::to_owned);
    let mut metadata = DesignMetadata {
        name: text("name").unwrap_or_default(),
        last_modified: text("lastModified"),
        thumbnail_url: text("thumbnailUrl"),
        version: text("version"),
        ..DesignMetadata::default()
    };

    component_table(raw, "components", &mut metadata.components);
    component_table(raw, "componentSets", &mut metadata.component_sets);
    if let Some(nodes) = raw.get("nodes").and_then(Value::as_object) {
        for entry in nodes.values() {
            component_table(entry, "components", &mut metadata.components);
            component_table(entry, "componentSets", &mut metadata.component_sets);
        }
    }
    metadata
}

/// Style groups extracted from one node, interned in a fixed order once the node is done.
#[derive(Default)]
struct NodeStyles {
    layout: Option<LayoutSpec>,
    fills: Option<FillList>,
    strokes: Option<StrokeStyle>,
    effects: Option<EffectStyle>,
    typography: Option<TextStyle>,
}

impl NodeStyles {
    fn take(&mut self, category: StyleCategory) -> Option<StyleValue> {
        match category {
            StyleCategory::Layout => self.layout.take().map(StyleValue::Layout),
            StyleCategory::Fill => self.fills.take().map(StyleValue::Fills),
            StyleCategory::Stroke => self.strokes.take().map(StyleValue::Stroke),
            StyleCategory::Effect => self.effects.take().map(StyleValue::Effect),
            StyleCategory::Typography => self.typography.take().map(StyleValue::Typography),
        }
    }

    fn attach(mut self, interner: &mut Interner, refs: &mut StyleRefs) {
        for category in StyleCategory::NODE_ORDER {
            if let Some(value) = self.take(category) {
                let var = interner.intern(category, value);
                refs.push(category, var);
            }
        }
    }
}

struct Pending<'v> {
    value: &'v Value,
    parent: Option<usize>,
    depth: usize,
    origin: Option<(f64, f64)>,
    parent_mode: Option<LayoutMode>,
}

struct Slot {
    node: SimplifiedNode,
    parent: Option<usize>,
}

struct Traversal<'o> {
    options: &'o SimplifyOptions,
    depth_ceiling: usize,
    interner: Interner,
    slots: Vec<Slot>,
    seen_ids: HashSet<String>,
    synthesized_ids: u32,
    emitted: usize,
    unknown: usize,
    truncated: usize,
}

impl<'o> Traversal<'o> {
    fn new(options: &'o SimplifyOptions, depth_ceiling: usize) -> Self {
        Self {
            options,
            depth_ceiling,
            interner: Interner::new(),
            slots: Vec::new(),
            seen_ids: HashSet::new(),
            synthesized_ids: 0,
            emitted: 0,
            unknown: 0,
            truncated: 0,
        }
    }

    fn run(&mut self, roots: &[&Value]) -> Vec<SimplifiedNode> {
        let mut stack: Vec<Pending<'_>> = roots
            .iter()
            .rev()
            .map(|&value| Pending {
                value,
                parent: None,
                depth: 0,
                origin: None,
                parent_mode: None,
            })
            .collect();

        while let Some(pending) = stack.pop() {
            let raw = RawNode::from_value(pending.value);
            let targeted = pending.parent.is_none() && self.options.target_node_id.is_some();
            if !raw.is_visible() && !targeted {
                continue;
            }
            let kind = raw.kind();
            let node = self.describe(&raw, &kind, &pending);
            let index = self.slots.len();
            self.slots.push(Slot {
                node,
                parent: pending.parent,
            });
            self.emitted += 1;

            let children = raw_children(pending.value);
            if children.is_empty() {
                continue;
            }
            let depth = pending.depth + 1;
            if self.options.max_depth.is_some_and(|max_depth| depth > max_depth) {
                continue;
            }
            if depth >= self.depth_ceiling {
                self.truncated += children.len();
                continue;
            }

            let origin = raw.absolute_bounding_box.map(|bbox| (bbox.x, bbox.y)).or(pending.origin);
            let parent_mode = kind.is_container().then(|| layout::layout_mode(&raw));
            stack.extend(children.iter().rev().map(|value| Pending {
                value,
                parent: Some(index),
                depth,
                origin,
                parent_mode,
            }));
        }

        assemble(std::mem::take(&mut self.slots))
    }

    fn unique_id(&mut self, raw_id: Option<&str>) -> String {
        let base = match raw_id.filter(|id| !id.is_empty()) {
            Some(id) => id.to_owned(),
            None => {
                self.synthesized_ids += 1;
                format!("unknown:{}", self.synthesized_ids)
            }
        };
        if self.seen_ids.insert(base.clone()) {
            return base;
        }

        let mut suffix = 2u32;
        loop {
            let candidate = format!("{base}#{suffix}");
            if self.seen_ids.insert(candidate.clone()) {
                tracing::debug!(node_id = %base, renamed = %candidate, "duplicate node id");
                return candidate;
            }
            suffix += 1;
        }
    }

    fn describe(
        &mut self,
        raw: &RawNode,
        kind: &RawNodeKind,
        pending: &Pending<'_>,
    ) -> SimplifiedNode {
        let id = self.unique_id(raw.id.as_deref());
        let mut node = SimplifiedNode::new(id, raw.name.clone().unwrap_or_default(), kind.tag());
        node.geometry = geometry::geometry(raw, pending.origin, self.options.geometry);

        let parent_mode = pending.parent_mode;
        let mut styles = NodeStyles::default();
        match kind {
            RawNodeKind::Unknown(tag) => {
                self.unknown += 1;
                tracing::debug!(
                    node_id = %node.id,
                    raw_type = %tag,
                    malformed = raw.is_malformed(),
                    "emitting generic node"
                );
                node.raw_type = (!tag.is_empty()).then(|| tag.clone());
                return node;
            }
            RawNodeKind::Document | RawNodeKind::Canvas | RawNodeKind::Slice => {}
            RawNodeKind::Text => {
                node.text = raw.characters.clone();
                styles.layout = layout::layout_spec(raw, false, parent_mode);
                styles.fills = paint::fills(raw);
                styles.effects = effects::effects(raw, true);
                styles.typography = raw.style.as_ref().and_then(text::text_style);
            }
            RawNodeKind::Group | RawNodeKind::BooleanOperation => {
                styles.layout = layout::layout_spec(raw, false, parent_mode);
                styles.fills = paint::fills(raw);
                styles.effects = effects::effects(raw, false);
            }
            RawNodeKind::Frame
            | RawNodeKind::Section
            | RawNodeKind::Component
            | RawNodeKind::ComponentSet
            | RawNodeKind::Instance => {
                styles.layout = layout::layout_spec(raw, true, parent_mode);
                styles.fills = paint::fills(raw);
                styles.strokes = paint::strokes(raw);
                styles.effects = effects::effects(raw, false);
                node.border_radius = geometry::border_radius(raw);
                if *kind == RawNodeKind::Instance {
                    node.component_id = raw.component_id.clone();
                    node.component_properties = component_properties(raw);
                }
            }
            RawNodeKind::Rectangle
            | RawNodeKind::Vector
            | RawNodeKind::Star
            | RawNodeKind::Line
            | RawNodeKind::Ellipse
            | RawNodeKind::RegularPolygon => {
                styles.layout = layout::layout_spec(raw, false, parent_mode);
                styles.fills = paint::fills(raw);
                styles.strokes = paint::strokes(raw);
                styles.effects = effects::effects(raw, false);
                node.border_radius = geometry::border_radius(raw);
            }
        }

        node.opacity = raw.opacity.map(units::round2).filter(|opacity| *opacity < 1.0);
        node.blend_mode =
            raw.blend_mode.clone().filter(|mode| mode != "PASS_THROUGH" && mode != "NORMAL");
        styles.attach(&mut self.interner, &mut node.styles);
        node
    }
}

fn component_properties(raw: &RawNode) -> Vec<ComponentProperty> {
    let Some(properties) = raw.component_properties.as_ref() else {
        return Vec::new();
    };
    properties
        .iter()
        .map(|(name, property)| ComponentProperty {
            name: name.clone(),
            kind: property.property_type.clone(),
            value: match &property.value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            },
        })
        .collect()
}

/// Rebuilds the tree from pre-order slots. A parent always precedes its children, so popping
/// from the back completes every subtree before its parent is taken.
fn assemble(mut slots: Vec<Slot>) -> Vec<SimplifiedNode> {
    let mut roots = Vec::new();
    while let Some(Slot { mut node, parent }) = slots.pop() {
        node.children.reverse();
        match parent {
            Some(parent) => slots[parent].node.children.push(node),
            None => roots.push(node),
        }
    }
    roots.reverse();
    roots
}
