//! Result types for the recommendation engine.

use data_loader::GameId;
use serde::{Deserialize, Serialize};

/// Title used when a recommended game has no metadata row.
///
/// Title lookup must never fail a request; a game missing from the
/// metadata table is annotated with this sentinel instead.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// One ranked recommendation returned to the caller.
///
/// Ephemeral: constructed per request, never persisted. The score is the
/// model's full-precision estimate; rendering layers round it if they
/// want to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub app_id: GameId,
    pub title: String,
    pub score: f32,
}
