//! DataIndex building and validation.
//!
//! This module assembles the DataIndex from parsed rows:
//! - Insert interactions (builds the universe, per-user and per-game indices)
//! - Insert metadata rows (title lookup, first match wins)
//! - Compute aggregate statistics per game
//! - Validate the loaded data

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::path::Path;
use tracing::info;

impl DataIndex {
    /// Load both tables from disk and build the full index.
    ///
    /// This is the main entry point for loading data. The two files are
    /// parsed in parallel; a missing or malformed file fails the whole load.
    pub fn load_from_files(interactions_path: &Path, games_path: &Path) -> Result<Self> {
        info!(
            "Loading dataset: interactions={:?} games={:?}",
            interactions_path, games_path
        );

        let (interactions, games) = rayon::join(
            || parser::parse_interactions(interactions_path),
            || parser::parse_games(games_path),
        );
        let interactions = interactions?;
        let games = games?;

        info!(
            "Parsed {} interactions and {} metadata rows",
            interactions.len(),
            games.len()
        );

        let mut index = DataIndex::new();

        for interaction in interactions {
            index.insert_interaction(interaction);
        }
        for game in games {
            index.insert_game(game);
        }

        index.compute_game_stats();
        index.validate()?;

        let (users, games, interactions) = index.counts();
        info!(
            "DataIndex built: {} users, {} games, {} interactions",
            users, games, interactions
        );
        Ok(index)
    }

    /// Compute aggregate statistics for all games.
    ///
    /// For each game in the universe: average rating, rating count, and a
    /// popularity score combining the two.
    pub fn compute_game_stats(&mut self) {
        let game_stats = self
            .game_interactions
            .par_iter()
            .map(|(&app_id, interactions)| {
                let rating_count = interactions.len() as u32;
                let avg_rating = if rating_count > 0 {
                    let total: f32 = interactions.iter().map(|i| i.rating).sum();
                    total / rating_count as f32
                } else {
                    0.0
                };
                let popularity_score = compute_popularity_score(avg_rating, rating_count);

                (
                    app_id,
                    GameStats {
                        avg_rating,
                        rating_count,
                        popularity_score,
                    },
                )
            })
            .collect();
        self.game_stats = game_stats;
    }

    /// Validate the loaded data.
    ///
    /// Every rating value must be a finite number. Referential integrity
    /// between interactions and metadata is NOT checked: games without a
    /// metadata row are legal and handled at request time with a sentinel
    /// title.
    pub fn validate(&self) -> Result<()> {
        for interactions in self.user_interactions.values() {
            for interaction in interactions {
                if !interaction.rating.is_finite() {
                    return Err(DataLoadError::InvalidValue {
                        field: "rating".to_string(),
                        value: interaction.rating.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Popularity formula: avg_rating * ln(rating_count + 1).
/// Rewards both high ratings and many ratings.
fn compute_popularity_score(avg_rating: f32, rating_count: u32) -> f32 {
    avg_rating * (rating_count as f32 + 1.0).ln()
}
