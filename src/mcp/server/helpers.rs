// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// MCP server helper functions:
/// argument parsing, image planning, error mapping, and the blocking-work timeout.
fn parse_file_key(raw: &str) -> Result<FileKey, ErrorData> {
    FileKey::new(raw).map_err(|err| {
        ErrorData::invalid_params(
            format!("invalid fileKey: {err}"),
            Some(serde_json::json!({ "fileKey": raw })),
        )
    })
}

fn parse_node_id(raw: &str) -> Result<NodeId, ErrorData> {
    NodeId::new(raw).map_err(|err| {
        ErrorData::invalid_params(
            format!("invalid nodeId: {err}"),
            Some(serde_json::json!({ "nodeId": raw })),
        )
    })
}

fn figma_error(err: FigmaError) -> ErrorData {
    tracing::warn!(error = %err, "figma request failed");
    if err.is_caller_error() {
        ErrorData::invalid_params(err.to_string(), None)
    } else {
        ErrorData::internal_error(err.to_string(), None)
    }
}

fn simplify_error(err: SimplifyError) -> ErrorData {
    match &err {
        SimplifyError::TargetNotFound {
            node_id,
            suggestions,
        } => ErrorData::invalid_params(
            err.to_string(),
            Some(serde_json::json!({
                "nodeId": node_id.as_str(),
                "suggestions": suggestions,
            })),
        ),
        SimplifyError::NotADocument { .. } => ErrorData::internal_error(err.to_string(), None),
    }
}

/// Runs CPU-bound work off the async runtime. On timeout the caller gets an error right away;
/// the worker finishes in the background and its result is dropped.
async fn run_blocking_with_timeout<T, F>(timeout: Duration, work: F) -> Result<T, ErrorData>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    match tokio::time::timeout(timeout, tokio::task::spawn_blocking(work)).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(ErrorData::internal_error(
            format!("simplification task failed: {err}"),
            None,
        )),
        Err(_) => {
            tracing::warn!(timeout_ms = timeout.as_millis() as u64, "simplification timed out");
            Err(ErrorData::internal_error(
                format!("simplification timed out after {}ms", timeout.as_millis()),
                None,
            ))
        }
    }
}

fn validate_local_path(raw: &str) -> Result<PathBuf, ErrorData> {
    let trimmed = raw.trim();
    let invalid = |reason: &str| {
        ErrorData::invalid_params(
            format!("invalid localPath: {reason}"),
            Some(serde_json::json!({ "localPath": raw })),
        )
    };
    if trimmed.is_empty() {
        return Err(invalid("must not be empty"));
    }
    let path = Path::new(trimmed);
    for component in path.components() {
        match component {
            Component::ParentDir => return Err(invalid("must not contain `..`")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("must be a relative path"))
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }
    Ok(path.to_path_buf())
}

fn validate_png_scale(scale: Option<f64>) -> Result<f64, ErrorData> {
    let scale = scale.unwrap_or(DEFAULT_PNG_SCALE);
    if !(0.01..=4.0).contains(&scale) {
        return Err(ErrorData::invalid_params(
            "pngScale must be between 0.01 and 4",
            Some(serde_json::json!({ "pngScale": scale })),
        ));
    }
    Ok(scale)
}

fn file_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^[a-z0-9_][a-z0-9._ -]*\.(png|svg|jpe?g|gif|webp)$")
            .expect("file name pattern compiles")
    })
}

fn validate_file_name(raw: &str) -> Result<(), ErrorData> {
    if file_name_pattern().is_match(raw) {
        return Ok(());
    }
    Err(ErrorData::invalid_params(
        "invalid fileName: expected a plain name ending in .png/.svg/.jpg/.jpeg/.gif/.webp",
        Some(serde_json::json!({ "fileName": raw })),
    ))
}

#[derive(Debug, Clone)]
struct PlannedImage {
    node_id: NodeId,
    image_ref: Option<String>,
    file_name: String,
    format: ImageFormat,
}

impl PlannedImage {
    fn skip(self, reason: String) -> SkippedImage {
        SkippedImage {
            node_id: self.node_id.into_string(),
            file_name: self.file_name,
            reason,
        }
    }
}

fn plan_images(requests: Vec<ImageRequest>) -> Result<Vec<PlannedImage>, ErrorData> {
    if requests.is_empty() {
        return Err(ErrorData::invalid_params("nodes must not be empty", None));
    }

    let mut file_names = BTreeSet::new();
    let mut planned = Vec::with_capacity(requests.len());
    for ImageRequest {
        node_id,
        image_ref,
        file_name,
    } in requests
    {
        let node_id = parse_node_id(&node_id)?;
        validate_file_name(&file_name)?;
        if !file_names.insert(file_name.to_ascii_lowercase()) {
            return Err(ErrorData::invalid_params(
                format!("fileName {file_name} is used more than once"),
                Some(serde_json::json!({ "fileName": file_name })),
            ));
        }
        let image_ref = image_ref.filter(|image_ref| !image_ref.trim().is_empty());
        planned.push(PlannedImage {
            format: ImageFormat::for_file_name(&file_name),
            node_id,
            image_ref,
            file_name,
        });
    }
    Ok(planned)
}
