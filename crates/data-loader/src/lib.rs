//! # Data Loader Crate
//!
//! This crate handles loading and indexing the two tabular inputs of the
//! recommendation engine: the user/game interactions table and the game
//! metadata table.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Interaction, GameMeta, GameStats, DataIndex)
//! - **parser**: Parse the CSV files into Rust structs
//! - **index**: Build efficient indices for fast lookups
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::DataIndex;
//! use std::path::Path;
//!
//! // Load both tables
//! let index = DataIndex::load_from_files(
//!     Path::new("data/interactions.csv"),
//!     Path::new("data/games.csv"),
//! )?;
//!
//! // Query data
//! let universe = index.game_universe();
//! let history = index.user_interactions(42);
//! let title = index.title(730);
//!
//! println!("{} candidate games, user 42 rated {}", universe.len(), history.len());
//! ```
//!
//! Everything in the DataIndex is read-only after load; the binaries share
//! one instance behind an `Arc` for the process lifetime.

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    UserId,
    GameId,
    // Core types
    Interaction,
    GameMeta,
    GameStats,
    DataIndex,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_index_creation() {
        // Test that we can create an empty DataIndex
        let index = DataIndex::new();
        let (users, games, interactions) = index.counts();

        assert_eq!(users, 0);
        assert_eq!(games, 0);
        assert_eq!(interactions, 0);
    }

    #[test]
    fn test_insert_interaction() {
        let mut index = DataIndex::new();

        index.insert_interaction(Interaction {
            user_id: 1,
            app_id: 730,
            rating: 5.0,
        });

        let history = index.user_interactions(1);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].rating, 5.0);

        assert!(index.rated_games(1).unwrap().contains(&730));
        assert_eq!(index.game_interactions(730).len(), 1);
    }

    #[test]
    fn test_insert_game() {
        let mut index = DataIndex::new();

        index.insert_game(GameMeta {
            app_id: 730,
            title: "Counter-Strike 2".to_string(),
        });

        assert_eq!(index.title(730), Some("Counter-Strike 2"));
    }

    #[test]
    fn test_duplicate_metadata_first_row_wins() {
        let mut index = DataIndex::new();

        index.insert_game(GameMeta {
            app_id: 730,
            title: "First Title".to_string(),
        });
        index.insert_game(GameMeta {
            app_id: 730,
            title: "Second Title".to_string(),
        });

        assert_eq!(index.title(730), Some("First Title"));
    }

    #[test]
    fn test_empty_queries() {
        let index = DataIndex::new();

        // Querying non-existent data should return None or empty slices
        assert!(index.title(999).is_none());
        assert!(index.rated_games(999).is_none());
        assert!(index.user_interactions(999).is_empty());
        assert!(index.game_interactions(999).is_empty());
        assert!(index.game_stats(999).is_none());
    }

    #[test]
    fn test_duplicate_interaction_not_collapsed() {
        // Uniqueness of (user, game) pairs is not enforced by the loader
        let mut index = DataIndex::new();
        for _ in 0..2 {
            index.insert_interaction(Interaction {
                user_id: 1,
                app_id: 10,
                rating: 4.0,
            });
        }

        assert_eq!(index.user_interactions(1).len(), 2);
        // ...but the rated set and the universe see the game once
        assert_eq!(index.rated_games(1).unwrap().len(), 1);
        assert_eq!(index.game_universe(), &[10]);
    }
}
