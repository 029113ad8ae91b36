use timestore::{Config, TimeClient, TimeStore, Timestamp, api};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use tokio::sync::watch;

#[derive(Parser)]
#[command(name = "timestore", version, about = "In-memory time store served over HTTP")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the server until Ctrl-C.
    Serve {
        #[arg(long)]
        host: Option<IpAddr>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the timestamp stored on a running server.
    Get {
        /// Server root URL. Defaults to localhost on the configured port.
        #[arg(long)]
        url: Option<String>,
    },
    /// Store a timestamp (milliseconds since the Unix epoch) on a running server.
    Set {
        #[arg(allow_hyphen_values = true)]
        millis: Timestamp,
        #[arg(long)]
        url: Option<String>,
    },
    /// Start a local server, write a value, read it back, and exit.
    Demo {
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    init_tracing(&config.log_filter);

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            serve(config.bind_addr()).await
        }
        Command::Get { url } => {
            let client = TimeClient::new(url.unwrap_or_else(|| local_url(config.port)));
            let timestamp = client.get().await.context("failed to read time")?;
            println!("{timestamp}");
            Ok(())
        }
        Command::Set { millis, url } => {
            let client = TimeClient::new(url.unwrap_or_else(|| local_url(config.port)));
            client.set(millis).await.context("failed to store time")?;
            Ok(())
        }
        Command::Demo { port } => demo(port.unwrap_or(config.port)).await,
    }
}

fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn local_url(port: u16) -> String {
    format!("http://127.0.0.1:{port}")
}

/// Run until Ctrl-C. The HTTP server drains first so in-flight requests can
/// still reach the store; the store is stopped after that.
async fn serve(bind: SocketAddr) -> anyhow::Result<()> {
    let (server_shutdown_tx, server_shutdown_rx) = watch::channel(false);
    let (store_shutdown_tx, store_shutdown_rx) = watch::channel(false);

    let (store, store_handle) = TimeStore::spawn(store_shutdown_rx);
    let (_, server_handle) = api::start_http_server(bind, store, server_shutdown_rx)
        .await
        .context("failed to start HTTP server")?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    tracing::info!("shutdown requested");

    stop(server_shutdown_tx, server_handle, store_shutdown_tx, store_handle).await
}

async fn stop(
    server_shutdown_tx: watch::Sender<bool>,
    server_handle: tokio::task::JoinHandle<std::io::Result<()>>,
    store_shutdown_tx: watch::Sender<bool>,
    store_handle: tokio::task::JoinHandle<()>,
) -> anyhow::Result<()> {
    server_shutdown_tx.send_replace(true);
    server_handle
        .await
        .context("HTTP server task panicked")?
        .context("HTTP server failed")?;

    store_shutdown_tx.send_replace(true);
    store_handle.await.context("time store task panicked")?;
    Ok(())
}

async fn demo(port: u16) -> anyhow::Result<()> {
    let (server_shutdown_tx, server_shutdown_rx) = watch::channel(false);
    let (store_shutdown_tx, store_shutdown_rx) = watch::channel(false);

    let (store, store_handle) = TimeStore::spawn(store_shutdown_rx);
    let bind = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port);
    let (local_addr, server_handle) = api::start_http_server(bind, store, server_shutdown_rx)
        .await
        .context("failed to start HTTP server")?;

    let client = TimeClient::new(format!("http://{local_addr}"));
    client
        .set(Timestamp::from_millis(123456789))
        .await
        .context("failed to store time")?;
    let timestamp = client.get().await.context("failed to read time")?;
    println!("{timestamp}");

    stop(server_shutdown_tx, server_handle, store_shutdown_tx, store_handle).await
}
