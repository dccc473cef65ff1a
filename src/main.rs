// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Figlens CLI entrypoint.
//!
//! By default this serves MCP over streamable HTTP at `http://127.0.0.1:<port>/mcp`.
//! `--stdio` serves MCP over stdin/stdout instead; `figlens simplify` converts local dumps.

use std::error::Error;
use std::io::Write;
use std::sync::Arc;

use axum::Router;
use clap::Parser;
use rmcp::transport::{
    streamable_http_server::session::local::LocalSessionManager, StreamableHttpServerConfig,
    StreamableHttpService,
};

use figlens::config::{Cli, Command, SimplifyArgs};
use figlens::figma::FigmaClient;
use figlens::mcp::FiglensMcp;
use figlens::offline;

fn run_simplify(cli: &Cli, args: &SimplifyArgs) -> Result<(), Box<dyn Error>> {
    let format = cli.output_format();
    let converted = offline::convert_files(&args.inputs, &args.options(cli.geometry()), format)?;

    match &args.out_dir {
        Some(out_dir) => {
            for path in offline::write_all(&converted, out_dir, format)? {
                tracing::info!(path = %path.display(), "wrote");
            }
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            for item in &converted {
                stdout.write_all(item.content.as_bytes())?;
                if !item.content.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
            }
            stdout.flush()?;
        }
    }
    Ok(())
}

fn build_server(cli: &Cli) -> Result<FiglensMcp, Box<dyn Error>> {
    let figma = FigmaClient::new(cli.auth()?)?.with_base_url(cli.figma_base_url.clone());
    let settings = cli.server_settings(std::env::current_dir()?);
    Ok(FiglensMcp::with_settings(figma, settings))
}

fn serve_http(mcp: FiglensMcp, port: u16) -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
        tracing::info!("serving MCP at http://{}/mcp", listener.local_addr()?);

        let config = StreamableHttpServerConfig {
            stateful_mode: true,
            ..StreamableHttpServerConfig::default()
        };
        let shutdown_token = config.cancellation_token.clone();

        let session_manager = Arc::new(LocalSessionManager::default());
        let mcp_service =
            StreamableHttpService::new(move || Ok(mcp.clone()), session_manager, config);

        let router = Router::new().nest_service("/mcp", mcp_service);
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("shutting down");
                shutdown_token.cancel();
            })
            .await?;
        Ok::<(), Box<dyn Error>>(())
    })
}

fn main() {
    let cli = Cli::parse();
    figlens::telemetry::init();

    let result = (|| -> Result<(), Box<dyn Error>> {
        if let Some(Command::Simplify(args)) = &cli.command {
            return run_simplify(&cli, args);
        }

        let mcp = build_server(&cli)?;
        if cli.stdio {
            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
            runtime.block_on(mcp.serve_stdio())?;
            return Ok(());
        }
        serve_http(mcp, cli.port)
    })();

    if let Err(err) = result {
        eprintln!("figlens: {err}");
        std::process::exit(1);
    }
}
