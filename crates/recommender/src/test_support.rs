//! Scorer fixtures for unit tests.

use data_loader::{GameId, UserId};
use std::collections::HashMap;
use svd_model::{PredictError, Scorer};

/// Deterministic in-memory scorer: fixed per-pair scores with a flat
/// default, or unconditional failure.
pub struct FixtureScorer {
    scores: HashMap<(UserId, GameId), f32>,
    default: f32,
    fail: bool,
}

impl FixtureScorer {
    /// Scores every pair with the same value
    pub fn flat(default: f32) -> Self {
        Self {
            scores: HashMap::new(),
            default,
            fail: false,
        }
    }

    /// Override the score for one (user, game) pair
    pub fn with_score(mut self, user_id: UserId, app_id: GameId, score: f32) -> Self {
        self.scores.insert((user_id, app_id), score);
        self
    }

    /// Fails every prediction
    pub fn failing() -> Self {
        Self {
            scores: HashMap::new(),
            default: 0.0,
            fail: true,
        }
    }
}

impl Scorer for FixtureScorer {
    fn predict(&self, user_id: UserId, app_id: GameId) -> Result<f32, PredictError> {
        if self.fail {
            return Err(PredictError::InvalidPredictionValue { user_id, app_id });
        }
        Ok(*self.scores.get(&(user_id, app_id)).unwrap_or(&self.default))
    }
}
