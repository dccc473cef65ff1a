// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Offline conversion of raw Figma JSON dumps.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde_json::Value;

use crate::output::{render, OutputError, OutputFormat};
use crate::simplify::{simplify_batch, SimplifyError, SimplifyOptions};

#[derive(Debug)]
pub enum OfflineError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    Simplify {
        path: PathBuf,
        source: SimplifyError,
    },
    Output {
        path: PathBuf,
        source: OutputError,
    },
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    DuplicateOutput {
        path: PathBuf,
    },
}

impl fmt::Display for OfflineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Parse { path, source } => {
                write!(f, "{} is not valid JSON: {source}", path.display())
            }
            Self::Simplify { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Output { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Write { path, source } => write!(f, "cannot write {}: {source}", path.display()),
            Self::DuplicateOutput { path } => {
                write!(f, "two inputs would both be written to {}", path.display())
            }
        }
    }
}

impl std::error::Error for OfflineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Simplify { source, .. } => Some(source),
            Self::Output { source, .. } => Some(source),
            Self::DuplicateOutput { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    pub input: PathBuf,
    pub node_count: usize,
    pub global_var_count: usize,
    pub content: String,
}

/// Reads, simplifies and renders every input. Documents are converted in parallel, each with
/// its own interner; results keep the input order. The first failing input aborts the run.
pub fn convert_files(
    inputs: &[PathBuf],
    options: &SimplifyOptions,
    format: OutputFormat,
) -> Result<Vec<Converted>, OfflineError> {
    let documents = inputs
        .par_iter()
        .map(|path| read_document(path))
        .collect::<Result<Vec<_>, _>>()?;

    let designs = simplify_batch(&documents, options);
    drop(documents);

    inputs
        .par_iter()
        .zip(designs)
        .map(|(path, design)| {
            let design = design.map_err(|source| OfflineError::Simplify {
                path: path.clone(),
                source,
            })?;
            let content = render(&design, format).map_err(|source| OfflineError::Output {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(
                input = %path.display(),
                nodes = design.node_count(),
                vars = design.global_vars().len(),
                "converted"
            );
            Ok(Converted {
                input: path.clone(),
                node_count: design.node_count(),
                global_var_count: design.global_vars().len(),
                content,
            })
        })
        .collect()
}

fn read_document(path: &Path) -> Result<Value, OfflineError> {
    let text = std::fs::read_to_string(path).map_err(|source| OfflineError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| OfflineError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// `<out_dir>/<input stem>.simplified.<ext>`
pub fn output_path(out_dir: &Path, input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input.file_stem().and_then(|stem| stem.to_str()).unwrap_or("design");
    out_dir.join(format!("{stem}.simplified.{}", format.extension()))
}

pub fn write_all(
    converted: &[Converted],
    out_dir: &Path,
    format: OutputFormat,
) -> Result<Vec<PathBuf>, OfflineError> {
    let targets = converted
        .iter()
        .map(|item| output_path(out_dir, &item.input, format))
        .collect::<Vec<_>>();
    let mut seen = BTreeSet::new();
    for target in &targets {
        if !seen.insert(target) {
            return Err(OfflineError::DuplicateOutput {
                path: target.clone(),
            });
        }
    }

    std::fs::create_dir_all(out_dir).map_err(|source| OfflineError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;
    for (item, target) in converted.iter().zip(&targets) {
        std::fs::write(target, &item.content).map_err(|source| OfflineError::Write {
            path: target.clone(),
            source,
        })?;
    }
    Ok(targets)
}
