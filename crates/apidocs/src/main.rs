use std::pin::pin;
use std::time::Duration;

use apidocs::configure_server;
use apidocs_cli::CliArgs;
use apidocs_types::DocsResult;
use apidocs_types::errors::DocsError;
use axum_server::Handle;
use clap::Parser;
use tokio::signal;
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

async fn shutdown_signal(address: String, path: String) {
    info!("Serving API documentation over HTTP on {address} at {path}");

    let mut sigint = pin!(signal::ctrl_c());
    #[cfg(unix)]
    {
        let mut sigterm_stream = match signal(SignalKind::terminate()) {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Failed to bind SIGTERM, only Ctrl+C will stop the server: {e}");
                let _ = sigint.await;
                return;
            }
        };
        let mut sigterm = pin!(sigterm_stream.recv());
        tokio::select! {
            _ = &mut sigint => {
                info!("Received Ctrl+C (SIGINT), shutting down gracefully...");
            }
            _ = &mut sigterm => {
                info!("Received SIGTERM, shutting down gracefully...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = sigint.await;
        info!("Received Ctrl+C (SIGINT), shutting down gracefully...");
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = CliArgs::parse();
    if args.markdown_help {
        clap_markdown::print_help_markdown::<CliArgs>();
        return Ok(());
    }

    tracing_subscriber::registry()
        .with(apidocs::tracing::formatting_layer(&args))
        .with(apidocs::tracing::log_filter())
        .init();

    run_server(args).await.map_err(|e| e.into())
}

async fn run_server(args: CliArgs) -> DocsResult<()> {
    let router = configure_server(&args)?;
    let addr = args
        .http
        .http_server_socket()
        .map_err(DocsError::InvalidServerUrl)?;

    let handle = Handle::new();
    let shutdown_handle = handle.clone();
    let shutdown_fut = shutdown_signal(
        args.http.http_server_addr(),
        args.http.base_path().unwrap_or_else(|| "/".into()),
    );
    tokio::spawn(async move {
        shutdown_fut.await;
        shutdown_handle.graceful_shutdown(Some(Duration::from_secs(10)));
    });

    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .map_err(|e| DocsError::SocketBindError(e.to_string()))
}
