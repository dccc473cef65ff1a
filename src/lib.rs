// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Figlens: Figma designs as compact, deduplicated design data for coding agents.
//!
//! The core is [`simplify`], which converts a raw Figma node tree into a [`SimplifiedDesign`]
//! whose repeated style values live once in a global variable table. [`mcp`] exposes it as
//! tools over the Figma REST API ([`figma`]).

pub mod config;
pub mod figma;
pub mod mcp;
pub mod model;
pub mod offline;
pub mod output;
pub mod simplify;
pub mod telemetry;

pub use model::SimplifiedDesign;
pub use output::OutputFormat;
pub use simplify::{simplify, simplify_batch, NodeSuggestion, SimplifyError, SimplifyOptions};
