use anyhow::{Context, Result};
use axum::serve;
use rtgate::core::config::Config;
use rtgate::core::state::AppState;
use rtgate::core::{routes, tracing_init};
use rtgate::rtorrent::Rtorrent;
use rtgate::xmlrpc::XmlRpcClient;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::{TcpListener, UnixListener};
use tokio::signal;
use tracing::{error, info};

fn main() -> Result<()> {
    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    // Load and validate configuration, falling back to defaults plus environment
    let config = Config::load(&config_path).context(format!(
        "Failed to load configuration from '{}'. \
        Copy config.example.toml to config.toml or set the URL environment variable.",
        config_path.display()
    ))?;

    // Initialize tracing/logging
    tracing_init::init_tracing(&config.logging);

    // Build Tokio runtime with configured number of threads
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.num_threads)
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    runtime.block_on(async_main(config, config_path))
}

async fn async_main(config: Config, config_path: PathBuf) -> Result<()> {
    info!(
        config_path = %config_path.display(),
        bind_address = %config.server.bind_address,
        unix_socket = ?config.server.unix_socket,
        num_threads = config.server.num_threads,
        rtorrent_url = %config.rtorrent.url,
        basic_auth = config.rtorrent.username.is_some(),
        log_level = %config.logging.level,
        log_format = %config.logging.format,
        "rTorrent gateway starting"
    );

    let client = XmlRpcClient::new(&config.rtorrent).context("Failed to create XML-RPC client")?;
    let rtorrent = Rtorrent::new(Arc::new(client));

    let state = AppState::new(config.clone(), rtorrent);

    // Build the router with middleware
    let app = routes::build_app(Arc::new(state));

    // TCP listener is always on; the Unix socket is optional
    let addr = &config.server.bind_address;
    let listener = TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind TCP listener to {}", addr))?;

    info!(address = %addr, "TCP listener bound successfully");

    let tcp_app = app.clone();
    let tcp_handle = tokio::spawn(async move {
        serve(
            listener,
            tcp_app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("TCP server error")
    });

    let unix_handle = match &config.server.unix_socket {
        Some(unix_socket) => {
            // Remove stale socket file from a previous run
            if unix_socket.exists() {
                std::fs::remove_file(unix_socket).context(format!(
                    "Failed to remove existing Unix socket: {}",
                    unix_socket.display()
                ))?;
            }

            let listener = UnixListener::bind(unix_socket).context(format!(
                "Failed to bind Unix socket listener to {}",
                unix_socket.display()
            ))?;

            info!(path = %unix_socket.display(), "Unix socket listener bound successfully");

            Some(tokio::spawn(serve_unix(listener, app)))
        }
        None => None,
    };

    info!("HTTP server(s) started, waiting for shutdown signal");

    match unix_handle {
        Some(unix) => {
            tokio::select! {
                result = tcp_handle => log_server_exit("TCP", result),
                result = unix => {
                    if let Err(e) = result {
                        error!(error = %e, "Unix socket server task failed");
                    }
                }
            }
        }
        None => log_server_exit("TCP", tcp_handle.await),
    }

    info!("Shutting down gracefully");

    Ok(())
}

fn log_server_exit(name: &str, result: Result<Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(server = name, error = %e, "Server stopped with error"),
        Err(e) => error!(server = name, error = %e, "Server task failed"),
    }
}

/// Accept loop for the Unix socket listener; one hyper connection task per client
async fn serve_unix(listener: UnixListener, app: axum::Router) {
    use tower::Service;

    let mut make_service = app.into_make_service();

    loop {
        let (socket, _remote_addr) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                error!(error = %e, "Failed to accept Unix socket connection");
                continue;
            }
        };

        let tower_service = match make_service.call(&socket).await {
            Ok(svc) => svc,
            Err(infallible) => match infallible {},
        };

        tokio::spawn(async move {
            let socket = hyper_util::rt::TokioIo::new(socket);

            let hyper_service = hyper::service::service_fn(
                move |request: hyper::Request<hyper::body::Incoming>| {
                    tower_service.clone().call(request)
                },
            );

            if let Err(err) =
                hyper_util::server::conn::auto::Builder::new(hyper_util::rt::TokioExecutor::new())
                    .serve_connection_with_upgrades(socket, hyper_service)
                    .await
            {
                error!(error = %err, "Error serving Unix socket connection");
            }
        });
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
