// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::*;
use crate::figma::stub::{StubFigma, TempDir, CARD_FILE_KEY};
use rmcp::model::ErrorCode;
use serde_json::Value;

fn server_for(stub: &StubFigma) -> FiglensMcp {
    FiglensMcp::new(stub.client())
}

fn server_with(stub: &StubFigma, settings: ServerSettings) -> FiglensMcp {
    FiglensMcp::with_settings(stub.client(), settings)
}

fn data_params(file_key: &str, node_id: Option<&str>, depth: Option<u32>) -> GetFigmaDataParams {
    GetFigmaDataParams {
        file_key: file_key.to_owned(),
        node_id: node_id.map(ToOwned::to_owned),
        depth,
    }
}

fn image(node_id: &str, image_ref: Option<&str>, file_name: &str) -> ImageRequest {
    ImageRequest {
        node_id: node_id.to_owned(),
        image_ref: image_ref.map(ToOwned::to_owned),
        file_name: file_name.to_owned(),
    }
}

fn download_params(local_path: &str, nodes: Vec<ImageRequest>) -> DownloadFigmaImagesParams {
    DownloadFigmaImagesParams {
        file_key: CARD_FILE_KEY.to_owned(),
        local_path: local_path.to_owned(),
        nodes,
        png_scale: None,
    }
}

fn names(nodes: &Value) -> Vec<String> {
    nodes
        .as_array()
        .expect("node list")
        .iter()
        .map(|node| node["name"].as_str().expect("name").to_owned())
        .collect()
}

#[tokio::test]
async fn get_figma_data_returns_yaml_with_shared_styles() {
    let stub = StubFigma::start().await;
    let server = server_for(&stub);

    let Json(result) = server
        .get_figma_data(Parameters(data_params(CARD_FILE_KEY, None, None)))
        .await
        .expect("get_figma_data");

    assert_eq!(result.file_key, CARD_FILE_KEY);
    assert_eq!(result.format, "yaml");
    let parsed: Value = serde_yaml::from_str(&result.content).expect("yaml content");
    assert_eq!(parsed["metadata"]["name"], "Marketing Site");
    assert_eq!(names(&parsed["nodes"]), vec!["Landing", "Components"]);

    let card = &parsed["nodes"][0]["children"][0];
    assert_eq!(card["name"], "Pricing Card");
    let card_children = names(&card["children"]);
    assert_eq!(card_children, vec!["Hero Image", "Plan", "Price", "Subscribe", "Check"]);

    let plan = &card["children"][1];
    let price = &card["children"][2];
    assert_eq!(plan["styles"]["textStyle"], price["styles"]["textStyle"]);
    assert_eq!(plan["styles"]["fills"], price["styles"]["fills"]);
    let typography = plan["styles"]["textStyle"].as_str().expect("typography ref");
    assert_eq!(parsed["globalVars"]["styles"][typography]["fontFamily"], "Inter");

    // pages, card, five visible children, the instance label and the component
    assert_eq!(result.node_count, 10);
    assert_eq!(
        result.global_var_count,
        parsed["globalVars"]["styles"].as_object().expect("styles").len() as u64
    );
}

#[tokio::test]
async fn get_figma_data_scopes_to_a_node_from_a_share_url() {
    let stub = StubFigma::start().await;
    let settings = ServerSettings {
        format: OutputFormat::Json,
        ..ServerSettings::default()
    };
    let server = server_with(&stub, settings);

    let Json(result) = server
        .get_figma_data(Parameters(data_params(CARD_FILE_KEY, Some("1-7"), None)))
        .await
        .expect("get_figma_data");

    assert_eq!(result.format, "json");
    let parsed: Value = serde_json::from_str(&result.content).expect("json content");
    let nodes = parsed["nodes"].as_array().expect("nodes");
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0]["id"], "1:7");
    assert_eq!(nodes[0]["componentId"], "3:1");
    assert_eq!(nodes[0]["children"][0]["text"], "Subscribe");
    assert_eq!(parsed["metadata"]["components"]["3:1"]["name"], "Button");
    assert_eq!(result.node_count, 2);

    assert_eq!(
        stub.requests(),
        vec![format!("/v1/files/{CARD_FILE_KEY}/nodes?ids=1:7")]
    );
}

#[tokio::test]
async fn get_figma_data_forwards_depth() {
    let stub = StubFigma::start().await;
    let server = server_for(&stub);

    let Json(result) = server
        .get_figma_data(Parameters(data_params(CARD_FILE_KEY, None, Some(1))))
        .await
        .expect("get_figma_data");

    let parsed: Value = serde_yaml::from_str(&result.content).expect("yaml content");
    let card = &parsed["nodes"][0]["children"][0];
    assert_eq!(card["name"], "Pricing Card");
    assert!(card.get("children").is_none());
    assert_eq!(stub.requests(), vec![format!("/v1/files/{CARD_FILE_KEY}?depth=1")]);
}

#[tokio::test]
async fn unknown_nodes_are_reported_as_invalid_params() {
    let stub = StubFigma::start().await;
    let server = server_for(&stub);

    let err = server
        .get_figma_data(Parameters(data_params(CARD_FILE_KEY, Some("9:99"), None)))
        .await
        .err()
        .expect("tool call should fail");

    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert!(err.message.contains("9:99"), "{}", err.message);
}

#[tokio::test]
async fn malformed_arguments_never_reach_figma() {
    let stub = StubFigma::start().await;
    let server = server_for(&stub);

    let err = server
        .get_figma_data(Parameters(data_params("not/a/key", None, None)))
        .await
        .err()
        .expect("tool call should fail");
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);

    let err = server
        .get_figma_data(Parameters(data_params(CARD_FILE_KEY, Some("frame"), None)))
        .await
        .err()
        .expect("tool call should fail");
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);

    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn upstream_failures_map_to_error_kinds() {
    let stub = StubFigma::start().await;
    let server = server_for(&stub);

    let err = server
        .get_figma_data(Parameters(data_params("MissingFile", None, None)))
        .await
        .err()
        .expect("tool call should fail");
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);

    let err = server
        .get_figma_data(Parameters(data_params("RateLimited", None, None)))
        .await
        .err()
        .expect("tool call should fail");
    assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    assert!(err.message.contains("rate limit"), "{}", err.message);
}

#[tokio::test]
async fn blocking_work_past_the_timeout_is_abandoned() {
    let err = run_blocking_with_timeout(Duration::from_millis(10), || {
        std::thread::sleep(Duration::from_millis(300));
        42
    })
    .await
    .unwrap_err();

    assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    assert!(err.message.contains("timed out"), "{}", err.message);

    let value = run_blocking_with_timeout(Duration::from_secs(5), || 7).await.expect("fast work");
    assert_eq!(value, 7);
}

#[tokio::test]
async fn download_figma_images_saves_fills_and_renders() {
    let stub = StubFigma::start().await;
    let tmp = TempDir::new("mcp-download");
    let settings = ServerSettings {
        download_root: tmp.path().to_path_buf(),
        ..ServerSettings::default()
    };
    let server = server_with(&stub, settings);

    let Json(result) = server
        .download_figma_images(Parameters(download_params(
            "public/img",
            vec![
                image("1:3", Some("img-ref-1"), "hero.png"),
                image("1:8", None, "check.svg"),
                image("1:2", None, "card.png"),
            ],
        )))
        .await
        .expect("download");

    assert!(result.skipped.is_empty(), "{:?}", result.skipped);
    let saved = result.saved.iter().map(|image| image.node_id.as_str()).collect::<Vec<_>>();
    assert_eq!(saved, vec!["1:3", "1:8", "1:2"]);

    let dir = tmp.path().join("public/img");
    let read = |name: &str| std::fs::read_to_string(dir.join(name)).expect("saved file");
    assert_eq!(read("hero.png"), "asset:fill-img-ref-1.png");
    assert_eq!(read("check.svg"), "asset:render-1_8.svg");
    assert_eq!(read("card.png"), "asset:render-1_2.png");

    let requests = stub.requests();
    assert!(requests.contains(&format!("/v1/files/{CARD_FILE_KEY}/images")));
    assert!(requests.contains(&format!("/v1/images/{CARD_FILE_KEY}?format=png&ids=1:2&scale=2")));
    assert!(requests.contains(&format!("/v1/images/{CARD_FILE_KEY}?format=svg&ids=1:8")));
}

#[tokio::test]
async fn images_figma_cannot_provide_are_skipped() {
    let stub = StubFigma::start().await;
    let tmp = TempDir::new("mcp-skip");
    let settings = ServerSettings {
        download_root: tmp.path().to_path_buf(),
        ..ServerSettings::default()
    };
    let server = server_with(&stub, settings);

    let Json(result) = server
        .download_figma_images(Parameters(download_params(
            "out",
            vec![
                image("9:9", None, "ghost.png"),
                image("1:3", Some("img-ref-404"), "missing.png"),
                image("1:8", None, "check.png"),
            ],
        )))
        .await
        .expect("download");

    assert_eq!(result.saved.len(), 1);
    assert_eq!(result.saved[0].node_id, "1:8");
    let skipped = result.skipped.iter().map(|image| image.file_name.as_str()).collect::<Vec<_>>();
    assert_eq!(skipped, vec!["ghost.png", "missing.png"]);
    assert!(result.skipped[1].reason.contains("img-ref-404"));
}

#[tokio::test]
async fn download_arguments_are_validated() {
    let stub = StubFigma::start().await;
    let server = server_for(&stub);

    for (local_path, file_name) in [
        ("../outside", "a.png"),
        ("/abs/path", "a.png"),
        ("", "a.png"),
        ("ok", "nested/a.png"),
        ("ok", "script.exe"),
        ("ok", ".hidden.png"),
    ] {
        let err = server
            .download_figma_images(Parameters(download_params(
                local_path,
                vec![image("1:8", None, file_name)],
            )))
            .await
            .err()
            .expect("tool call should fail");
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS, "{local_path} {file_name}");
    }

    let err = server
        .download_figma_images(Parameters(download_params(
            "ok",
            vec![image("1:8", None, "a.png"), image("1:3", None, "A.PNG")],
        )))
        .await
        .err()
        .expect("tool call should fail");
    assert!(err.message.contains("more than once"), "{}", err.message);

    let mut params = download_params("ok", vec![image("1:8", None, "a.png")]);
    params.png_scale = Some(8.0);
    let err = server
        .download_figma_images(Parameters(params))
        .await
        .err()
        .expect("tool call should fail");
    assert!(err.message.contains("pngScale"), "{}", err.message);

    let err = server
        .download_figma_images(Parameters(download_params("ok", Vec::new())))
        .await
        .err()
        .expect("tool call should fail");
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);

    assert!(stub.requests().is_empty());
}

#[test]
fn local_paths_may_use_current_dir_segments() {
    let path = validate_local_path("./assets/icons").expect("relative path");
    assert_eq!(path, PathBuf::from("./assets/icons"));
}

#[test]
fn missing_target_data_lists_reusable_ids() {
    let raw: Value = serde_json::from_str(crate::figma::stub::CARD_FILE_JSON).expect("fixture");
    let options = SimplifyOptions {
        target_node_id: Some(NodeId::new("1:77").expect("node id")),
        ..SimplifyOptions::default()
    };
    let err = simplify(&raw, &options).unwrap_err();

    let data = simplify_error(err).data.expect("error data");
    assert_eq!(data["nodeId"], "1:77");
    assert_eq!(data["suggestions"][0]["id"], "1:7");
    assert_eq!(data["suggestions"][0]["name"], "Subscribe");
}
