//! i3span daemon
//!
//! Mirrors i3's workspace list over IPC and prints a Pango markup line to
//! stdout after every change, for a status-bar renderer to consume.

mod i3_ipc;
mod render;
mod store;
mod sync;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use i3_ipc::{I3Client, I3Error, WorkspaceEvent, EVENT_WORKSPACE};
use i3span_config::FormatConfig;
use store::WorkspaceStore;

#[derive(Parser, Debug)]
#[command(name = "i3spand")]
#[command(about = "Workspace status daemon for i3")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "~/.config/i3span/config.kdl")]
    config: String,

    /// i3 IPC socket path (overrides config and discovery)
    #[arg(short, long)]
    socket: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing. Output goes to stderr: stdout carries the
    // rendered workspace line and nothing else.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Expand tilde in config path
    let config_path: PathBuf = shellexpand::tilde(&args.config).into_owned().into();
    let config = i3span_config::parse_config(&config_path)?;

    let socket_path = match args.socket.or_else(|| config.global.socket_path.clone()) {
        Some(path) => path,
        None => i3_ipc::discover_socket_path().await?,
    };

    info!("Connecting to i3 IPC socket at {}", socket_path.display());
    let mut client = I3Client::connect(&socket_path).await?;

    // Seed the store from the one-shot workspace query, in i3's order
    let mut workspaces = WorkspaceStore::new();
    for reply in client.get_workspaces().await? {
        workspaces.push(reply.into());
    }
    info!("Seeded {} workspace(s)", workspaces.len());
    println!("{}", render::render(&workspaces, &config.format));

    client.subscribe(&["workspace"]).await?;

    run_event_loop(&mut client, &mut workspaces, &config.format).await
}

/// Receive-process loop: one frame at a time until i3 goes away
///
/// Protocol violations and undecodable payloads skip the offending frame
/// and keep the loop alive; a clean close ends it; transport read failures
/// are fatal.
async fn run_event_loop(
    client: &mut I3Client,
    workspaces: &mut WorkspaceStore,
    format: &FormatConfig,
) -> Result<()> {
    loop {
        let frame = match client.next_frame().await {
            Ok(frame) => frame,
            Err(I3Error::ConnectionClosed) => {
                info!("i3 closed the IPC connection, shutting down");
                return Ok(());
            }
            Err(e) if e.is_protocol_violation() => {
                warn!(error = %e, "Skipping malformed frame");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if frame.message_type != EVENT_WORKSPACE {
            debug!(message_type = frame.message_type, "Ignoring non-workspace frame");
            continue;
        }

        let event: WorkspaceEvent = match serde_json::from_slice(&frame.payload) {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "Undecodable workspace event payload, skipping");
                continue;
            }
        };

        sync::apply_event(workspaces, &event);
        println!("{}", render::render(workspaces, format));
    }
}
