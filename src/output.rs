// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text rendering of a [`SimplifiedDesign`].
//!
//! The three top-level sections are serialized independently and concatenated, so a huge node
//! list never has to be built into one intermediate document value.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::model::{GlobalVarTable, SimplifiedDesign};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    pub fn label(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug)]
pub enum OutputError {
    Json {
        section: &'static str,
        source: serde_json::Error,
    },
    Yaml {
        section: &'static str,
        source: serde_yaml::Error,
    },
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json { section, source } => {
                write!(f, "cannot serialize {section} as json: {source}")
            }
            Self::Yaml { section, source } => {
                write!(f, "cannot serialize {section} as yaml: {source}")
            }
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source, .. } => Some(source),
            Self::Yaml { source, .. } => Some(source),
        }
    }
}

#[derive(Serialize)]
struct GlobalVars<'a> {
    styles: &'a GlobalVarTable,
}

/// Independently serialized sections of one design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignParts {
    pub format: OutputFormat,
    pub metadata: String,
    pub nodes: String,
    pub global_vars: String,
}

impl DesignParts {
    /// Concatenates the sections into one document of `format`.
    pub fn assemble(&self) -> String {
        let mut out = String::with_capacity(
            self.metadata.len() + self.nodes.len() + self.global_vars.len() + 48,
        );
        match self.format {
            OutputFormat::Json => {
                out.push_str("{\"metadata\":");
                out.push_str(&self.metadata);
                out.push_str(",\"nodes\":");
                out.push_str(&self.nodes);
                out.push_str(",\"globalVars\":");
                out.push_str(&self.global_vars);
                out.push('}');
            }
            OutputFormat::Yaml => {
                // Each section is already a one-key mapping; stacking them forms one mapping.
                for section in [&self.metadata, &self.nodes, &self.global_vars] {
                    out.push_str(section);
                    if !section.ends_with('\n') {
                        out.push('\n');
                    }
                }
            }
        }
        out
    }
}

fn json_section<T: Serialize + ?Sized>(
    section: &'static str,
    value: &T,
) -> Result<String, OutputError> {
    serde_json::to_string(value).map_err(|source| OutputError::Json { section, source })
}

fn yaml_section<T: Serialize + ?Sized>(
    section: &'static str,
    value: &T,
) -> Result<String, OutputError> {
    let mut keyed = BTreeMap::new();
    keyed.insert(section, value);
    serde_yaml::to_string(&keyed).map_err(|source| OutputError::Yaml { section, source })
}

pub fn serialize_parts(
    design: &SimplifiedDesign,
    format: OutputFormat,
) -> Result<DesignParts, OutputError> {
    let global_vars = GlobalVars {
        styles: design.global_vars(),
    };
    let (metadata, nodes, global_vars) = match format {
        OutputFormat::Json => (
            json_section("metadata", design.metadata())?,
            json_section("nodes", design.nodes())?,
            json_section("globalVars", &global_vars)?,
        ),
        OutputFormat::Yaml => (
            yaml_section("metadata", design.metadata())?,
            yaml_section("nodes", design.nodes())?,
            yaml_section("globalVars", &global_vars)?,
        ),
    };
    Ok(DesignParts {
        format,
        metadata,
        nodes,
        global_vars,
    })
}

pub fn assemble(parts: &DesignParts) -> String {
    parts.assemble()
}

pub fn render(design: &SimplifiedDesign, format: OutputFormat) -> Result<String, OutputError> {
    serialize_parts(design, format).map(|parts| parts.assemble())
}

impl SimplifiedDesign {
    pub fn serialize_parts(&self, format: OutputFormat) -> Result<DesignParts, OutputError> {
        serialize_parts(self, format)
    }
}
