//! Pretrained SVD matrix-factorization model.
//!
//! This crate deserializes the factor file produced by the external
//! training process and exposes prediction through the [`Scorer`] trait.
//! The model is immutable at serving time: it is loaded once at process
//! start and shared read-only.
//!
//! ## File format
//!
//! A single JSON document:
//!
//! ```json
//! {
//!   "global_mean": 4.12,
//!   "rating_min": 1.0,
//!   "rating_max": 5.0,
//!   "n_factors": 2,
//!   "users": { "1": { "bias": 0.2, "factors": [0.11, -0.42] } },
//!   "items": { "730": { "bias": -0.1, "factors": [0.33, 0.05] } }
//! }
//! ```

use data_loader::{GameId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while loading the model file.
///
/// Any of these at startup is fatal: the process cannot serve requests
/// without its model.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to open model file: {path}")]
    FileNotFound { path: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed model file: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("{entity} {id} has {found} factors, model declares {expected}")]
    DimensionMismatch {
        entity: &'static str,
        id: u64,
        expected: usize,
        found: usize,
    },

    #[error("Invalid rating bounds: min {min} > max {max}")]
    InvalidRatingBounds { min: f32, max: f32 },
}

/// Prediction failure. Not recovered anywhere: it propagates to the
/// caller, which surfaces a generic failure.
#[derive(Error, Debug)]
pub enum PredictError {
    /// The estimate came out non-finite (NaN or infinite)
    #[error("Invalid prediction value for user {user_id}, game {app_id}: non-finite")]
    InvalidPredictionValue { user_id: UserId, app_id: GameId },
}

/// A predictive scoring function over (user, game) pairs.
///
/// `Send + Sync` so one model instance can be shared across request
/// handlers. Keeping this a trait lets tests substitute fixture scorers
/// without a model file on disk.
pub trait Scorer: Send + Sync {
    /// Estimate the rating `user_id` would give `app_id`.
    ///
    /// Pairs unseen in training still produce an estimate; extrapolation
    /// is the point of serving predictions on unrated games.
    fn predict(&self, user_id: UserId, app_id: GameId) -> Result<f32, PredictError>;
}

/// Learned bias and latent factors for one user or one item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Factors {
    pub bias: f32,
    pub factors: Vec<f32>,
}

/// The deserialized SVD model: global mean, rating bounds, and the learned
/// per-user / per-item factors.
#[derive(Debug, Serialize, Deserialize)]
pub struct SvdModel {
    global_mean: f32,
    rating_min: f32,
    rating_max: f32,
    n_factors: usize,
    users: HashMap<UserId, Factors>,
    items: HashMap<GameId, Factors>,
}

impl SvdModel {
    /// Create an empty model (test fixtures and tooling)
    pub fn new(global_mean: f32, rating_min: f32, rating_max: f32, n_factors: usize) -> Self {
        Self {
            global_mean,
            rating_min,
            rating_max,
            n_factors,
            users: HashMap::new(),
            items: HashMap::new(),
        }
    }

    /// Load and validate the model from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ModelError> {
        let file = File::open(path).map_err(|_| ModelError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let model = Self::from_reader(BufReader::new(file))?;

        let (users, items) = model.counts();
        info!(
            "Loaded SVD model: {} users, {} items, {} factors",
            users, items, model.n_factors
        );
        Ok(model)
    }

    /// Deserialize and validate the model from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelError> {
        let model: SvdModel = serde_json::from_reader(reader)?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.rating_min > self.rating_max {
            return Err(ModelError::InvalidRatingBounds {
                min: self.rating_min,
                max: self.rating_max,
            });
        }
        for (&id, f) in &self.users {
            if f.factors.len() != self.n_factors {
                return Err(ModelError::DimensionMismatch {
                    entity: "User",
                    id,
                    expected: self.n_factors,
                    found: f.factors.len(),
                });
            }
        }
        for (&id, f) in &self.items {
            if f.factors.len() != self.n_factors {
                return Err(ModelError::DimensionMismatch {
                    entity: "Item",
                    id: id as u64,
                    expected: self.n_factors,
                    found: f.factors.len(),
                });
            }
        }
        Ok(())
    }

    /// Add a user's learned factors (test fixtures and tooling)
    pub fn insert_user(&mut self, user_id: UserId, factors: Factors) -> Result<(), ModelError> {
        if factors.factors.len() != self.n_factors {
            return Err(ModelError::DimensionMismatch {
                entity: "User",
                id: user_id,
                expected: self.n_factors,
                found: factors.factors.len(),
            });
        }
        self.users.insert(user_id, factors);
        Ok(())
    }

    /// Add an item's learned factors (test fixtures and tooling)
    pub fn insert_item(&mut self, app_id: GameId, factors: Factors) -> Result<(), ModelError> {
        if factors.factors.len() != self.n_factors {
            return Err(ModelError::DimensionMismatch {
                entity: "Item",
                id: app_id as u64,
                expected: self.n_factors,
                found: factors.factors.len(),
            });
        }
        self.items.insert(app_id, factors);
        Ok(())
    }

    /// Number of (users, items) with learned factors
    pub fn counts(&self) -> (usize, usize) {
        (self.users.len(), self.items.len())
    }
}

impl Scorer for SvdModel {
    /// Biased matrix-factorization estimate:
    /// `global_mean + b_u + b_i + q_i . p_u`, with components for an
    /// unknown user or item omitted, clamped to the rating bounds.
    fn predict(&self, user_id: UserId, app_id: GameId) -> Result<f32, PredictError> {
        let user = self.users.get(&user_id);
        let item = self.items.get(&app_id);

        let mut est = self.global_mean;
        if let Some(user) = user {
            est += user.bias;
        }
        if let Some(item) = item {
            est += item.bias;
        }
        if let (Some(user), Some(item)) = (user, item) {
            est += dot(&user.factors, &item.factors);
        }

        if !est.is_finite() {
            return Err(PredictError::InvalidPredictionValue { user_id, app_id });
        }

        Ok(est.clamp(self.rating_min, self.rating_max))
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
