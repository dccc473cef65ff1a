// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use regex::Regex;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::{Json, Parameters};
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler, ServiceExt};
use tokio::task::JoinSet;

use crate::figma::{FigmaClient, FigmaError, ImageFormat};
use crate::model::{FileKey, NodeId};
use crate::output::{render, OutputFormat};
use crate::simplify::{simplify, GeometryMode, SimplifyError, SimplifyOptions};

use super::types::*;

pub const DEFAULT_SIMPLIFY_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_PNG_SCALE: f64 = 2.0;

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub format: OutputFormat,
    pub geometry: GeometryMode,
    pub simplify_timeout: Duration,
    /// Directory `localPath` arguments are resolved against.
    pub download_root: PathBuf,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Yaml,
            geometry: GeometryMode::Relative,
            simplify_timeout: DEFAULT_SIMPLIFY_TIMEOUT,
            download_root: PathBuf::from("."),
        }
    }
}

#[derive(Clone)]
pub struct FiglensMcp {
    figma: FigmaClient,
    settings: Arc<ServerSettings>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl FiglensMcp {
    pub fn new(figma: FigmaClient) -> Self {
        Self::with_settings(figma, ServerSettings::default())
    }

    pub fn with_settings(figma: FigmaClient, settings: ServerSettings) -> Self {
        Self {
            figma,
            settings: Arc::new(settings),
            tool_router: Self::tool_router(),
        }
    }

    pub fn settings(&self) -> &ServerSettings {
        &self.settings
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    /// Fetch a Figma file, or one node of it, as compact design data: a node tree whose
    /// repeated styles are replaced by references into `globalVars.styles`.
    #[tool(name = "get_figma_data")]
    async fn get_figma_data(
        &self,
        params: Parameters<GetFigmaDataParams>,
    ) -> Result<Json<GetFigmaDataResponse>, ErrorData> {
        let GetFigmaDataParams {
            file_key,
            node_id,
            depth,
        } = params.0;
        let file_key = parse_file_key(&file_key)?;
        let node_id = node_id.as_deref().map(parse_node_id).transpose()?;

        tracing::info!(
            file_key = %file_key,
            node_id = node_id.as_ref().map(NodeId::as_str),
            depth,
            "fetching figma data"
        );
        let raw = match &node_id {
            Some(node_id) => self.figma.get_file_nodes(&file_key, node_id, depth).await,
            None => self.figma.get_file(&file_key, depth).await,
        }
        .map_err(figma_error)?;

        let options = SimplifyOptions {
            max_depth: depth.map(|depth| depth as usize),
            target_node_id: node_id,
            geometry: self.settings.geometry,
        };
        let format = self.settings.format;
        let convert = move || -> Result<_, ErrorData> {
            let design = simplify(&raw, &options).map_err(simplify_error)?;
            let content = render(&design, format)
                .map_err(|err| ErrorData::internal_error(err.to_string(), None))?;
            Ok((content, design.node_count(), design.global_vars().len()))
        };
        let (content, node_count, global_var_count) =
            run_blocking_with_timeout(self.settings.simplify_timeout, convert).await??;

        tracing::info!(
            file_key = %file_key,
            node_count,
            global_var_count,
            bytes = content.len(),
            "simplified figma data"
        );
        Ok(Json(GetFigmaDataResponse {
            file_key: file_key.into_string(),
            format: format.label().to_owned(),
            node_count: node_count as u64,
            global_var_count: global_var_count as u64,
            content,
        }))
    }

    /// Download image fills (nodes with `imageRef`) and node renders (everything else) into
    /// `localPath`. `.svg` names are rendered as SVG, other names as PNG at `pngScale`.
    #[tool(name = "download_figma_images")]
    async fn download_figma_images(
        &self,
        params: Parameters<DownloadFigmaImagesParams>,
    ) -> Result<Json<DownloadFigmaImagesResponse>, ErrorData> {
        let DownloadFigmaImagesParams {
            file_key,
            local_path,
            nodes,
            png_scale,
        } = params.0;
        let file_key = parse_file_key(&file_key)?;
        let dir = self.settings.download_root.join(validate_local_path(&local_path)?);
        let scale = validate_png_scale(png_scale)?;
        let requests = plan_images(nodes)?;

        let fill_urls = if requests.iter().any(|request| request.image_ref.is_some()) {
            self.figma.get_image_fill_urls(&file_key).await.map_err(figma_error)?
        } else {
            BTreeMap::new()
        };

        let mut render_urls = BTreeMap::new();
        for format in [ImageFormat::Png, ImageFormat::Svg] {
            let ids = requests
                .iter()
                .filter(|request| request.image_ref.is_none() && request.format == format)
                .map(|request| request.node_id.clone())
                .collect::<Vec<_>>();
            if ids.is_empty() {
                continue;
            }
            let urls = self
                .figma
                .get_image_urls(&file_key, &ids, format, scale)
                .await
                .map_err(figma_error)?;
            for (node_id, url) in urls {
                render_urls.insert((format, node_id), url);
            }
        }

        let mut skipped = Vec::new();
        let mut jobs = JoinSet::new();
        for (index, request) in requests.into_iter().enumerate() {
            let url = match &request.image_ref {
                Some(image_ref) => fill_urls.get(image_ref).cloned(),
                None => render_urls
                    .get(&(request.format, request.node_id.clone()))
                    .cloned()
                    .flatten(),
            };
            let Some(url) = url else {
                let reason = match &request.image_ref {
                    Some(image_ref) => format!("no image fill with imageRef {image_ref}"),
                    None => "figma returned no render for this node".to_owned(),
                };
                skipped.push((index, request.skip(reason)));
                continue;
            };

            let figma = self.figma.clone();
            let dir = dir.clone();
            jobs.spawn(async move {
                let result = figma.download_to(&url, &dir, &request.file_name).await;
                (index, request, result)
            });
        }

        let mut saved = Vec::new();
        while let Some(joined) = jobs.join_next().await {
            let (index, request, result) = joined.map_err(|err| {
                ErrorData::internal_error(format!("download task failed: {err}"), None)
            })?;
            match result {
                Ok(path) => saved.push((
                    index,
                    SavedImage {
                        node_id: request.node_id.into_string(),
                        path: path.display().to_string(),
                    },
                )),
                Err(err) => {
                    tracing::warn!(
                        node_id = %request.node_id,
                        error = %err,
                        "image download failed"
                    );
                    skipped.push((index, request.skip(err.to_string())));
                }
            }
        }
        saved.sort_by_key(|(index, _)| *index);
        skipped.sort_by_key(|(index, _)| *index);

        tracing::info!(
            file_key = %file_key,
            saved = saved.len(),
            skipped = skipped.len(),
            dir = %dir.display(),
            "downloaded figma images"
        );
        Ok(Json(DownloadFigmaImagesResponse {
            saved: saved.into_iter().map(|(_, image)| image).collect(),
            skipped: skipped.into_iter().map(|(_, image)| image).collect(),
        }))
    }
}

#[tool_handler]
impl ServerHandler for FiglensMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Figlens Figma design server (tools: get_figma_data, download_figma_images). \
                 Call get_figma_data with the fileKey (and nodeId when the link has one) from a \
                 Figma URL; style fields in nodes reference entries of globalVars.styles."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// Argument validation and error mapping for the tool handlers.
include!("server/helpers.rs");

#[cfg(test)]
mod tests;
