//! End-to-end demo: load the dataset and model, print top-10 for a user.
//!
//! Usage: cargo run --example generate_recommendations -- [user_id]

use data_loader::DataIndex;
use recommender::Recommender;
use std::path::Path;
use std::sync::Arc;
use svd_model::SvdModel;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info,recommender=debug")
        .init();

    let index = Arc::new(DataIndex::load_from_files(
        Path::new("data/interactions.csv"),
        Path::new("data/games.csv"),
    )?);
    let model = Arc::new(SvdModel::load_from_file(Path::new("data/svd_model.json"))?);

    let user_id = std::env::args()
        .nth(1)
        .map(|s| s.parse())
        .transpose()?
        .or_else(|| index.known_users().first().copied())
        .expect("no users in the interactions table");

    let recommender = Recommender::new(index, model);
    let recommendations = recommender.recommend(user_id, 10)?;

    println!("Top {} games for user {}:", recommendations.len(), user_id);
    for (i, rec) in recommendations.iter().enumerate() {
        println!("{:2}. {} - {:.2}", i + 1, rec.title, rec.score);
    }

    Ok(())
}
