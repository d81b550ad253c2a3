//! Minimal host stub for downstream shells.
//!
//! Loads configuration, installs logging, seeds in-memory backends and
//! walks a short scripted navigation so integrations can see the
//! controller's behaviour without a UI. It is not a player.

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use streamr_app::data::{collections, Fields, InMemoryBlobStore, InMemoryDocumentStore};
use streamr_app::navigation::NavigationContext;
use streamr_app::session::InMemorySessionProvider;
use streamr_app::{Backend, ScreenId, StreamrApp, StreamrConfig};
use streamr_core::SessionIdentity;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "streamr-host")]
#[command(about = "Boot the headless Streamr core against in-memory backends", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sign in as a demo user before navigating
    #[arg(long)]
    signed_in: bool,

    /// Screen to open after the demo video and channel (unknown names open Home)
    #[arg(long, default_value = "library")]
    open: String,
}

fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => Fields::new(),
    }
}

async fn seed(backend: &Backend) -> Result<()> {
    let store = &backend.documents;
    store
        .set(
            &collections::channels(),
            "demo",
            fields(json!({ "name": "Demo Channel", "avatarUrl": "", "subscribersCount": 1200, "videoCount": 1 })),
        )
        .await?;
    store
        .set(
            &collections::videos(),
            "welcome",
            fields(json!({
                "title": "Welcome to Streamr",
                "channelId": "demo",
                "views": 4200,
                "uploadDate": 0,
                "duration": "3:07",
                "thumbnailUrl": backend.config.media.placeholder_thumbnail,
                "isShort": false,
            })),
        )
        .await?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = StreamrConfig::load(cli.config.as_deref()).context("loading config")?;
    config.merge_with_env().context("reading environment overrides")?;
    config.validate().context("validating config")?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();

    let mut provider = InMemorySessionProvider::new();
    if cli.signed_in {
        provider =
            provider.signed_in_as(SessionIdentity::new("demo-user").with_display_name("Demo"));
    }
    let documents = Arc::new(InMemoryDocumentStore::new());
    let blobs = Arc::new(InMemoryBlobStore::new(config.backend.storage_bucket.clone()));
    let backend = Backend::new(config, Arc::new(provider), documents, blobs);
    seed(&backend).await?;

    let mut app = StreamrApp::new(backend);
    app.start();
    app.pump();

    let navigator = app.navigator();
    navigator.go_with(ScreenId::Video, NavigationContext::video("welcome"));
    navigator.go_with(ScreenId::Channel, NavigationContext::channel("demo"));
    navigator.go(ScreenId::parse_or_default(&cli.open));
    app.pump();

    if let Some(page) = app.mount().await {
        tracing::info!(screen = %page.screen(), "Mounted page");
    }
    app.pump();

    let stack: Vec<_> = app
        .controller()
        .history()
        .screens()
        .iter()
        .map(ScreenId::name)
        .collect();
    println!("Streamr host ready: [{}]", stack.join(" -> "));
    app.teardown();
    Ok(())
}
