// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Floorwalk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Floorwalk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Floorwalk CLI entrypoint.
//!
//! By default this serves MCP over streamable HTTP at `http://127.0.0.1:<port>/mcp` until
//! interrupted.
//!
//! Use `--mcp` to run the MCP server over stdio instead (intended for tool integrations).

use std::error::Error;
use std::sync::Arc;

use axum::Router;
use rmcp::transport::{
    streamable_http_server::session::local::LocalSessionManager, StreamableHttpServerConfig,
    StreamableHttpService,
};
use tokio::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use floorwalk::desk::DeliveryDesk;
use floorwalk::mcp::FloorwalkMcp;
use floorwalk::store::{DirectoryFile, WriteDurability, DEFAULT_DIRECTORY_FILENAME};

const DEFAULT_MCP_HTTP_PORT: u16 = 27436;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<directory-file>] [--durable-writes] [--verbose] [--mcp-http-port <port>]\n  {program} [--directory <file>] [--durable-writes] [--verbose] [--mcp-http-port <port>]\n  {program} [<directory-file>] [--durable-writes] [--verbose] --mcp\n  {program} [--directory <file>] [--durable-writes] [--verbose] --mcp\n\nBy default MCP is served over streamable HTTP at `http://127.0.0.1:<port>/mcp`.\n--mcp-http-port selects the port (0 = ephemeral; default {DEFAULT_MCP_HTTP_PORT}).\n\nIf directory-file/--directory is omitted, `{DEFAULT_DIRECTORY_FILENAME}` in the current working directory is used.\n\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported).\n--verbose enables debug logging (otherwise RUST_LOG applies, default `floorwalk=info`). Logs go to stderr."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    mcp: bool,
    directory_file: Option<String>,
    mcp_http_port: Option<u16>,
    durable_writes: bool,
    verbose: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mcp" => {
                if options.mcp {
                    return Err(());
                }
                options.mcp = true;
            }
            "--directory" => {
                if options.directory_file.is_some() {
                    return Err(());
                }
                let file = args.next().ok_or(())?;
                options.directory_file = Some(file);
            }
            "--mcp-http-port" => {
                if options.mcp_http_port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let port: u16 = raw.parse().map_err(|_| ())?;
                options.mcp_http_port = Some(port);
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            "--verbose" => {
                if options.verbose {
                    return Err(());
                }
                options.verbose = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.directory_file.is_some() {
                    return Err(());
                }
                options.directory_file = Some(arg);
            }
        }
    }

    if options.mcp && options.mcp_http_port.is_some() {
        return Err(());
    }

    Ok(options)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("floorwalk=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("floorwalk=info"))
    };

    // stdout carries MCP framing in stdio mode.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "floorwalk".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_logging(options.verbose);

        let path = options.directory_file.unwrap_or_else(|| DEFAULT_DIRECTORY_FILENAME.to_owned());
        let store = if options.durable_writes {
            DirectoryFile::new(path).with_durability(WriteDurability::Durable)
        } else {
            DirectoryFile::new(path)
        };
        // Fail fast on an unreadable snapshot instead of on the first message.
        let directory = store.load()?;
        info!(
            path = %store.path().display(),
            employees = directory.len(),
            durability = ?store.durability(),
            "employee directory loaded"
        );

        let mcp = FloorwalkMcp::new(DeliveryDesk::new(store));
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        if options.mcp {
            info!("serving MCP over stdio");
            runtime.block_on(mcp.serve_stdio())?;
            return Ok(());
        }

        let mcp_http_port = options.mcp_http_port.unwrap_or(DEFAULT_MCP_HTTP_PORT);

        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind(("127.0.0.1", mcp_http_port)).await?;
            info!(addr = %listener.local_addr()?, "serving MCP over streamable HTTP at /mcp");

            let config = StreamableHttpServerConfig {
                stateful_mode: true,
                ..StreamableHttpServerConfig::default()
            };
            let shutdown_token = config.cancellation_token.clone();
            let server_shutdown = shutdown_token.clone();

            let session_manager = Arc::new(LocalSessionManager::default());
            let mcp_service = {
                let mcp = mcp.clone();
                StreamableHttpService::new(move || Ok(mcp.clone()), session_manager, config)
            };

            let router = Router::new().nest_service("/mcp", mcp_service);
            let server_handle = tokio::spawn(async move {
                let serve = axum::serve(listener, router).with_graceful_shutdown(async move {
                    server_shutdown.cancelled().await;
                });
                if let Err(err) = serve.await {
                    error!(error = %err, "MCP HTTP server error");
                }
            });

            tokio::signal::ctrl_c().await?;
            info!("shutting down");
            shutdown_token.cancel();
            let _ = server_handle.await;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("floorwalk: {err}");
        std::process::exit(1);
    }
}
