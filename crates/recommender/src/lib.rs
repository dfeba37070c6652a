//! # Recommender Crate
//!
//! Ranked top-N recommendation of games a user has not yet rated.
//!
//! ## Components
//!
//! - **engine**: the [`Recommender`] — candidate generation (distinct-game
//!   universe minus the user's rated set), per-candidate prediction,
//!   descending stable sort, top-N selection, title annotation
//! - **types**: the [`Recommendation`] result entry and the
//!   [`UNKNOWN_TITLE`] sentinel
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::DataIndex;
//! use recommender::Recommender;
//! use svd_model::SvdModel;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let index = Arc::new(DataIndex::load_from_files(
//!     Path::new("data/interactions.csv"),
//!     Path::new("data/games.csv"),
//! )?);
//! let model = Arc::new(SvdModel::load_from_file(Path::new("data/svd_model.json"))?);
//!
//! let recommender = Recommender::new(index, model);
//! for rec in recommender.recommend(42, 10)? {
//!     println!("{} ({:.2})", rec.title, rec.score);
//! }
//! ```

pub mod engine;
pub mod types;

#[cfg(test)]
mod test_support;

// Re-export main types
pub use engine::Recommender;
pub use types::{Recommendation, UNKNOWN_TITLE};
