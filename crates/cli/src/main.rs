use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{DataIndex, GameId, UserId};
use recommender::{Recommendation, Recommender, UNKNOWN_TITLE};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use svd_model::SvdModel;

/// GameRecs - Steam Game Recommendation Engine
#[derive(Parser)]
#[command(name = "game-recs")]
#[command(about = "Game recommendations from a pretrained SVD model", long_about = None)]
struct Cli {
    /// Path to the interactions CSV file
    #[arg(long, default_value = "data/interactions.csv")]
    interactions: PathBuf,

    /// Path to the game-metadata CSV file
    #[arg(long, default_value = "data/games.csv")]
    games: PathBuf,

    /// Path to the pretrained SVD model file
    #[arg(long, default_value = "data/svd_model.json")]
    model: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get game recommendations for a user
    Recommend {
        /// User ID to get recommendations for
        #[arg(long)]
        user_id: UserId,

        /// Number of recommendations to return
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Show a user's rating history
    User {
        /// User ID to display
        #[arg(long)]
        user_id: UserId,
    },

    /// Search for games by title
    Search {
        /// Game title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Run a sequential latency benchmark
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Recommendations per request
        #[arg(long, default_value = "10")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load data and model (this may take a moment)
    println!(
        "Loading dataset from {} and {}...",
        cli.interactions.display(),
        cli.games.display()
    );
    let start = Instant::now();
    let index = Arc::new(
        DataIndex::load_from_files(&cli.interactions, &cli.games)
            .context("Failed to load dataset")?,
    );
    let model = Arc::new(
        SvdModel::load_from_file(&cli.model).context("Failed to load SVD model")?,
    );
    println!("{} Loaded in {:?}", "✓".green(), start.elapsed());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend { user_id, limit } => {
            handle_recommend(index, model, user_id, limit)?
        }
        Commands::User { user_id } => handle_user(index, user_id)?,
        Commands::Search { title } => handle_search(index, title)?,
        Commands::Benchmark { requests, limit } => {
            handle_benchmark(index, model, requests, limit)?
        }
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    index: Arc<DataIndex>,
    model: Arc<SvdModel>,
    user_id: UserId,
    limit: usize,
) -> Result<()> {
    let recommender = Recommender::new(index, model);
    let recommendations = recommender.recommend(user_id, limit)?;

    print_recommendations(user_id, &recommendations);
    Ok(())
}

/// Handle the 'user' command
fn handle_user(index: Arc<DataIndex>, user_id: UserId) -> Result<()> {
    let interactions = index.user_interactions(user_id);

    print!("{}", format!("User ID: {}\n", user_id).bold().blue());

    let num_ratings = interactions.len();
    let avg_rating = if num_ratings > 0 {
        let total: f32 = interactions.iter().map(|i| i.rating).sum();
        total / num_ratings as f32
    } else {
        0.0
    };
    println!("{}Number of ratings: {}", "• ".cyan(), num_ratings);
    println!("{}Average rating: {:.2}", "• ".cyan(), avg_rating);

    if num_ratings == 0 {
        println!("No history: this user would get cold-start recommendations.");
        return Ok(());
    }

    // Top rated games
    let mut top_rated: Vec<_> = interactions.iter().collect();
    top_rated.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    println!("Top rated games:");
    for interaction in top_rated.iter().take(5) {
        let title = index.title(interaction.app_id).unwrap_or(UNKNOWN_TITLE);
        println!("  - {} (Rating: {})", title, interaction.rating);
    }

    Ok(())
}

/// Handle the 'search' command
fn handle_search(index: Arc<DataIndex>, title: String) -> Result<()> {
    let title_lower = title.to_lowercase();
    let mut matches: Vec<(GameId, &str, f32, u32, usize)> = Vec::new();

    for (app_id, game_title) in index.games_with_titles() {
        let game_title_lower = game_title.to_lowercase();

        let rank = if game_title_lower == title_lower {
            0 // Exact match
        } else if game_title_lower.contains(&title_lower) {
            1 // Substring match
        } else {
            continue;
        };

        let stats = index.game_stats(app_id);
        let avg_rating = stats.map(|s| s.avg_rating).unwrap_or(0.0);
        let rating_count = stats.map(|s| s.rating_count).unwrap_or(0);

        matches.push((app_id, game_title, avg_rating, rating_count, rank));
    }

    // Sort by relevance (exact match first), then by average rating
    matches.sort_by(|a, b| {
        a.4.cmp(&b.4)
            .then_with(|| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal))
    });

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    for (app_id, game_title, avg_rating, rating_count, _) in matches.iter().take(20) {
        println!(
            "{}: {} avg {:.2} ({} ratings)",
            app_id, game_title, avg_rating, rating_count
        );
    }
    Ok(())
}

/// Handle the 'benchmark' command.
///
/// Requests are synchronous run-to-completion computations, so the
/// benchmark issues them sequentially and reports latency percentiles.
fn handle_benchmark(
    index: Arc<DataIndex>,
    model: Arc<SvdModel>,
    requests: usize,
    limit: usize,
) -> Result<()> {
    let users = index.known_users();
    if users.is_empty() || requests == 0 {
        println!("Nothing to benchmark.");
        return Ok(());
    }

    let recommender = Recommender::new(index.clone(), model);

    let mut timings = Vec::with_capacity(requests);
    let total_start = Instant::now();
    for _ in 0..requests {
        let user_id = users[rand::random::<u32>() as usize % users.len()];
        let start = Instant::now();
        recommender.recommend(user_id, limit)?;
        timings.push(start.elapsed());
    }
    let total_time = total_start.elapsed();

    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = requests as f32 / total_time.as_secs_f32();

    println!("Benchmark results:");
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(user_id: UserId, recommendations: &[Recommendation]) {
    print!(
        "{}",
        format!("Top {} games for user {}:\n", recommendations.len(), user_id)
            .bold()
            .blue()
    );
    for (rank, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} - Score: {:.2}",
            (rank + 1).to_string().green(),
            rec.title,
            rec.score
        );
    }
}
