// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Raw nodes are lenient views over upstream Figma JSON; simplified nodes, style values and
//! the global variable table are what a conversion produces.

pub mod design;
pub mod ids;
pub mod raw;
pub mod style;

pub use design::{
    ComponentProperty, ComponentSummary, DesignMetadata, Geometry, GlobalVarTable,
    SimplifiedDesign, SimplifiedNode, StyleRef, StyleRefs, VarId,
};
pub use ids::{FileKey, Id, IdError, NodeId};
pub use raw::{RawNode, RawNodeKind};
pub use style::{
    EffectStyle, Fill, FillList, GradientStop, LayoutMode, LayoutSizing, LayoutSpec, Sizing,
    StrokeStyle, StyleCategory, StyleValue, TextStyle,
};
