// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use reqwest::StatusCode;
use serde_json::Value;

use super::FigmaError;
use crate::model::{FileKey, NodeId};

pub const DEFAULT_BASE_URL: &str = "https://api.figma.com/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const ERROR_BODY_LIMIT: usize = 512;

#[derive(Clone, PartialEq, Eq)]
pub enum FigmaAuth {
    /// Personal access token, sent as `X-Figma-Token`.
    ApiKey(String),
    /// OAuth access token, sent as a bearer token.
    OAuth(String),
}

impl fmt::Debug for FigmaAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(..)"),
            Self::OAuth(_) => f.write_str("OAuth(..)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    /// SVG for `*.svg` targets, PNG for every other raster name.
    pub fn for_file_name(file_name: &str) -> Self {
        if file_name.to_ascii_lowercase().ends_with(".svg") {
            Self::Svg
        } else {
            Self::Png
        }
    }
}

#[derive(Debug, Clone)]
pub struct FigmaClient {
    http: reqwest::Client,
    base_url: String,
    auth: FigmaAuth,
}

impl FigmaClient {
    pub fn new(auth: FigmaAuth) -> Result<Self, FigmaError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_owned(),
            auth,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /files/{key}`: the whole document.
    pub async fn get_file(
        &self,
        file_key: &FileKey,
        depth: Option<u32>,
    ) -> Result<Value, FigmaError> {
        let mut query = Vec::new();
        if let Some(depth) = depth {
            query.push(("depth", depth.to_string()));
        }
        self.get_json("file", &format!("/files/{file_key}"), &query).await
    }

    /// `GET /files/{key}/nodes`: one node subtree wrapped in a nodes response.
    pub async fn get_file_nodes(
        &self,
        file_key: &FileKey,
        node_id: &NodeId,
        depth: Option<u32>,
    ) -> Result<Value, FigmaError> {
        let mut query = vec![("ids", node_id.to_string())];
        if let Some(depth) = depth {
            query.push(("depth", depth.to_string()));
        }
        self.get_json("file nodes", &format!("/files/{file_key}/nodes"), &query).await
    }

    /// `GET /images/{key}`: render URLs per node. Nodes Figma could not render map to `None`.
    pub async fn get_image_urls(
        &self,
        file_key: &FileKey,
        node_ids: &[NodeId],
        format: ImageFormat,
        scale: f64,
    ) -> Result<BTreeMap<NodeId, Option<String>>, FigmaError> {
        if node_ids.is_empty() {
            return Ok(BTreeMap::new());
        }
        let ids = node_ids.iter().map(NodeId::as_str).collect::<Vec<_>>().join(",");
        let mut query = vec![("ids", ids), ("format", format.as_str().to_owned())];
        if format == ImageFormat::Png {
            query.push(("scale", scale.to_string()));
        }
        let body = self.get_json("images", &format!("/images/{file_key}"), &query).await?;
        let images = body.get("images").and_then(Value::as_object).ok_or_else(|| {
            FigmaError::Decode {
                context: "images",
                message: "missing `images` object".to_owned(),
            }
        })?;

        let mut urls = BTreeMap::new();
        for (raw_id, url) in images {
            let node_id = NodeId::new(raw_id).map_err(|err| FigmaError::Decode {
                context: "images",
                message: err.to_string(),
            })?;
            urls.insert(node_id, url.as_str().map(ToOwned::to_owned));
        }
        Ok(urls)
    }

    /// `GET /files/{key}/images`: download URLs for every image fill, keyed by `imageRef`.
    pub async fn get_image_fill_urls(
        &self,
        file_key: &FileKey,
    ) -> Result<BTreeMap<String, String>, FigmaError> {
        let body = self.get_json("image fills", &format!("/files/{file_key}/images"), &[]).await?;
        let images = body
            .pointer("/meta/images")
            .and_then(Value::as_object)
            .ok_or_else(|| FigmaError::Decode {
                context: "image fills",
                message: "missing `meta.images` object".to_owned(),
            })?;
        Ok(images
            .iter()
            .filter_map(|(image_ref, url)| Some((image_ref.clone(), url.as_str()?.to_owned())))
            .collect())
    }

    /// Downloads `url` into `dir/file_name`, creating `dir` when needed.
    ///
    /// Image URLs point at a CDN, so no credentials are attached.
    pub async fn download_to(
        &self,
        url: &str,
        dir: &Path,
        file_name: &str,
    ) -> Result<PathBuf, FigmaError> {
        let response = check_status(self.http.get(url).send().await?).await?;
        let bytes = response.bytes().await?;

        tokio::fs::create_dir_all(dir).await.map_err(|source| FigmaError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(file_name);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|source| FigmaError::Io {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved image");
        Ok(path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            FigmaAuth::ApiKey(key) => request.header("X-Figma-Token", key),
            FigmaAuth::OAuth(token) => request.bearer_auth(token),
        }
    }

    async fn get_json(
        &self,
        context: &'static str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, FigmaError> {
        let url = format!("{}{path}", self.base_url);
        let started = Instant::now();
        let response = self.authorize(self.http.get(&url)).query(query).send().await?;
        let response = check_status(response).await?;
        let body = response.json::<Value>().await.map_err(|err| FigmaError::Decode {
            context,
            message: err.to_string(),
        })?;
        tracing::debug!(
            %url,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "figma {context} request finished"
        );
        Ok(body)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, FigmaError> {
    match response.status() {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(FigmaError::Auth {
            status: response.status().as_u16(),
        }),
        StatusCode::TOO_MANY_REQUESTS => Err(FigmaError::RateLimited),
        status if !status.is_success() => {
            let body = response.text().await.unwrap_or_default();
            Err(FigmaError::Status {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            })
        }
        _ => Ok(response),
    }
}
