use data_loader::DataIndex;
use std::path::Path;
use std::time::Instant;

fn main() {
    let interactions = Path::new("data/interactions.csv");
    let games = Path::new("data/games.csv");

    println!("Loading dataset...\n");

    let start = Instant::now();
    let index = DataIndex::load_from_files(interactions, games)
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let (users, games, interactions) = index.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Users: {}", users);
    println!("Games: {}", games);
    println!("Interactions: {}", interactions);
    println!("\nPerformance: {:.0} interactions/second",
             interactions as f64 / elapsed.as_secs_f64());
}
