// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetFigmaDataParams {
    /// Key of the Figma file, as found in `figma.com/design/<fileKey>/...`.
    pub file_key: String,
    /// Node to start from (`1:2`, or the `node-id=1-2` form from a share URL).
    pub node_id: Option<String>,
    /// How many levels of the tree to fetch and emit. Omit unless explicitly needed.
    pub depth: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetFigmaDataResponse {
    pub file_key: String,
    pub format: String,
    pub node_count: u64,
    pub global_var_count: u64,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    pub node_id: String,
    /// Set for image fills; omit to render the node itself.
    pub image_ref: Option<String>,
    /// Plain file name ending in .png, .svg, .jpg, .jpeg, .gif or .webp.
    pub file_name: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DownloadFigmaImagesParams {
    pub file_key: String,
    /// Relative directory (no `..`) the images are written to.
    pub local_path: String,
    pub nodes: Vec<ImageRequest>,
    /// Export scale for PNG renders, 0.01 to 4. Defaults to 2.
    pub png_scale: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedImage {
    pub node_id: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkippedImage {
    pub node_id: String,
    pub file_name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DownloadFigmaImagesResponse {
    pub saved: Vec<SavedImage>,
    pub skipped: Vec<SkippedImage>,
}
