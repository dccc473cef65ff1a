// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Model Context Protocol (MCP) server surface.
//!
//! Exposes Figma retrieval and simplification as tools for coding agents.

mod server;
mod types;

pub use server::{FiglensMcp, ServerSettings, DEFAULT_SIMPLIFY_TIMEOUT};
pub use types::{
    DownloadFigmaImagesParams, DownloadFigmaImagesResponse, GetFigmaDataParams,
    GetFigmaDataResponse, ImageRequest, SavedImage, SkippedImage,
};
