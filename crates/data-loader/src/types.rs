//! Core domain types for the Steam interactions dataset.
//!
//! This module defines the fundamental data structures used throughout the
//! system: the two table row types, per-game statistics, and the DataIndex
//! that holds everything in indexed form after load.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up user IDs with game IDs

/// Unique identifier for a user in the interactions table
pub type UserId = u64;

/// Steam app identifier for a game
pub type GameId = u32;

// =============================================================================
// Table Row Types
// =============================================================================

/// One row of the interactions table: a user's rating of a game.
///
/// The table is a flat ordered sequence of these records. A (user, game)
/// pair is expected to appear at most once, but uniqueness is neither
/// guaranteed by the data nor enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub user_id: UserId,
    pub app_id: GameId,
    pub rating: f32,
}

/// One row of the game-metadata table.
///
/// The source file carries additional descriptive columns; only the
/// identifier and title are deserialized, the rest are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMeta {
    pub app_id: GameId,
    pub title: String,
}

// =============================================================================
// Statistics Types
// =============================================================================

/// Precomputed statistics for a game.
///
/// These are computed once when loading data for fast lookups later.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GameStats {
    pub avg_rating: f32,
    pub rating_count: u32,
    /// Popularity score derived from rating count and average
    pub popularity_score: f32,
}

// =============================================================================
// DataIndex - The Core In-Memory Database
// =============================================================================

/// Holds both tables in indexed form. Read-only after load.
///
/// Lookup structures are built once at insert time so that request-path
/// queries are O(1): rated-set membership, title lookup, game stats.
/// The distinct-game and distinct-user lists preserve first-appearance
/// order from the interactions table; the game list's order is what makes
/// tie-breaks in ranking reproducible.
#[derive(Debug)]
pub struct DataIndex {
    /// Distinct games in the interactions table, in order of first appearance.
    /// This is the candidate universe for recommendations.
    pub(crate) game_universe: Vec<GameId>,
    pub(crate) universe_set: HashSet<GameId>,

    /// Distinct users in the interactions table, in order of first appearance
    pub(crate) user_ids: Vec<UserId>,

    /// Games each user has rated (membership queries)
    pub(crate) user_games: HashMap<UserId, HashSet<GameId>>,
    /// Full interaction history per user
    pub(crate) user_interactions: HashMap<UserId, Vec<Interaction>>,
    /// All interactions received by each game
    pub(crate) game_interactions: HashMap<GameId, Vec<Interaction>>,

    /// Game title by app id. Duplicate metadata rows can occur in storage;
    /// the first row wins.
    pub(crate) titles: HashMap<GameId, String>,

    // Precomputed statistics
    pub(crate) game_stats: HashMap<GameId, GameStats>,
}

impl DataIndex {
    /// Creates a new, empty DataIndex
    pub fn new() -> Self {
        Self {
            game_universe: Vec::new(),
            universe_set: HashSet::new(),
            user_ids: Vec::new(),
            user_games: HashMap::new(),
            user_interactions: HashMap::new(),
            game_interactions: HashMap::new(),
            titles: HashMap::new(),
            game_stats: HashMap::new(),
        }
    }

    // Getters - these return references into the index, not owned values

    /// All distinct games seen in the interactions table, in first-appearance
    /// order. Not limited to games with metadata.
    pub fn game_universe(&self) -> &[GameId] {
        &self.game_universe
    }

    /// All distinct users seen in the interactions table, in first-appearance
    /// order
    pub fn known_users(&self) -> &[UserId] {
        &self.user_ids
    }

    /// The set of games a user has rated.
    ///
    /// Returns `None` for users with no interaction history (cold start).
    pub fn rated_games(&self, user_id: UserId) -> Option<&HashSet<GameId>> {
        self.user_games.get(&user_id)
    }

    /// All interactions made by a user.
    ///
    /// Returns an empty slice if the user has no history.
    pub fn user_interactions(&self, user_id: UserId) -> &[Interaction] {
        self.user_interactions
            .get(&user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All interactions received by a game
    pub fn game_interactions(&self, app_id: GameId) -> &[Interaction] {
        self.game_interactions
            .get(&app_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Look up a game's title by exact identifier match
    pub fn title(&self, app_id: GameId) -> Option<&str> {
        self.titles.get(&app_id).map(|s| s.as_str())
    }

    /// Get precomputed statistics for a game
    pub fn game_stats(&self, app_id: GameId) -> Option<&GameStats> {
        self.game_stats.get(&app_id)
    }

    /// Iterate over all (app_id, title) pairs with known metadata
    pub fn games_with_titles(&self) -> impl Iterator<Item = (GameId, &str)> {
        self.titles.iter().map(|(&id, title)| (id, title.as_str()))
    }

    // Mutators - used during data loading and by test fixtures

    /// Insert an interaction and update all indices
    pub fn insert_interaction(&mut self, interaction: Interaction) {
        if self.universe_set.insert(interaction.app_id) {
            self.game_universe.push(interaction.app_id);
        }

        match self.user_games.entry(interaction.user_id) {
            std::collections::hash_map::Entry::Vacant(entry) => {
                self.user_ids.push(interaction.user_id);
                entry.insert(HashSet::new()).insert(interaction.app_id);
            }
            std::collections::hash_map::Entry::Occupied(mut entry) => {
                entry.get_mut().insert(interaction.app_id);
            }
        }

        self.user_interactions
            .entry(interaction.user_id)
            .or_default()
            .push(interaction);

        self.game_interactions
            .entry(interaction.app_id)
            .or_default()
            .push(interaction);
    }

    /// Insert a metadata row. The first row for an app id wins.
    pub fn insert_game(&mut self, game: GameMeta) {
        self.titles.entry(game.app_id).or_insert(game.title);
    }

    /// Get counts for debugging/validation
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_interactions = self.user_interactions.values().map(|v| v.len()).sum();
        (self.user_ids.len(), self.game_universe.len(), total_interactions)
    }
}

// Implement Default trait for convenience
impl Default for DataIndex {
    fn default() -> Self {
        Self::new()
    }
}
