//! Binary entry point: load the tables and the model, then serve.
//!
//! A missing or malformed input file is fatal; the process cannot serve
//! any request without its model and tables.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use data_loader::DataIndex;
use server::{create_router, AppState};
use svd_model::SvdModel;

/// GameRecs - Steam game recommendation server
#[derive(Parser)]
#[command(name = "game-recs-server")]
#[command(about = "Serves top-N game recommendations from a pretrained SVD model", long_about = None)]
struct Args {
    /// Path to the interactions CSV file
    #[arg(long, default_value = "data/interactions.csv")]
    interactions: PathBuf,

    /// Path to the game-metadata CSV file
    #[arg(long, default_value = "data/games.csv")]
    games: PathBuf,

    /// Path to the pretrained SVD model file
    #[arg(long, default_value = "data/svd_model.json")]
    model: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    info!("Loading dataset...");
    let index = Arc::new(
        DataIndex::load_from_files(&args.interactions, &args.games)
            .context("Failed to load dataset")?,
    );

    info!("Loading SVD model...");
    let model = Arc::new(
        SvdModel::load_from_file(&args.model).context("Failed to load SVD model")?,
    );

    let state = AppState::new(index, model);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    info!("Serving on http://{}", args.bind);
    axum::serve(listener, app).await?;

    Ok(())
}
