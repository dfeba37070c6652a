//! Top-N recommendation over the unrated portion of the catalog.
//!
//! ## Algorithm
//! 1. Candidate universe = all distinct games in the interactions table
//! 2. Drop the games the target user has already rated
//! 3. Predict a score for every remaining candidate
//! 4. Sort by score descending (stable, so ties keep universe order)
//! 5. Take the first `top_n` and annotate each with its title
//!
//! The scan is O(universe size) predictions per request regardless of the
//! user's history size. Candidates come from the interactions table, not
//! the metadata catalog, so a game nobody has rated is never recommended.

use crate::types::{Recommendation, UNKNOWN_TITLE};
use anyhow::Result;
use data_loader::{DataIndex, GameId, UserId};
use std::sync::Arc;
use svd_model::Scorer;
use tracing::{debug, instrument};

/// Produces ranked top-N recommendations of unrated games.
///
/// Holds shared references to the loaded tables and the pretrained model;
/// both are read-only, so one Recommender serves any number of requests
/// without locking. Given unchanged inputs, `recommend` is a pure
/// function of `(user_id, top_n)`.
pub struct Recommender {
    data_index: Arc<DataIndex>,
    model: Arc<dyn Scorer>,
}

impl Recommender {
    /// Create a new Recommender over loaded state
    pub fn new(data_index: Arc<DataIndex>, model: Arc<dyn Scorer>) -> Self {
        Self { data_index, model }
    }

    /// Rank the games `user_id` has not rated and return the top `top_n`.
    ///
    /// A user with no interaction history is not an error: their rated set
    /// is empty, so the whole catalog is candidate (cold start). If
    /// `top_n` exceeds the candidate count, all candidates are returned.
    ///
    /// A prediction failure aborts the request; there are no partial
    /// results.
    #[instrument(skip(self))]
    pub fn recommend(&self, user_id: UserId, top_n: usize) -> Result<Vec<Recommendation>> {
        let rated = self.data_index.rated_games(user_id);

        let mut scored: Vec<(GameId, f32)> =
            Vec::with_capacity(self.data_index.game_universe().len());
        for &app_id in self.data_index.game_universe() {
            if rated.is_some_and(|set| set.contains(&app_id)) {
                continue;
            }
            let score = self.model.predict(user_id, app_id)?;
            scored.push((app_id, score));
        }

        debug!(
            "Scored {} unrated candidates for user {}",
            scored.len(),
            user_id
        );

        // Stable sort: tie runs keep the universe's first-appearance order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_n);

        let recommendations = scored
            .into_iter()
            .map(|(app_id, score)| Recommendation {
                app_id,
                title: self
                    .data_index
                    .title(app_id)
                    .unwrap_or(UNKNOWN_TITLE)
                    .to_string(),
                score,
            })
            .collect();

        Ok(recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FixtureScorer;
    use data_loader::{GameMeta, Interaction};

    fn sample_index() -> DataIndex {
        let mut index = DataIndex::new();
        // User 1 rated games 10 and 11; games 12 and 13 exist via other users
        for (user_id, app_id, rating) in [
            (1, 10, 5.0),
            (1, 11, 3.0),
            (2, 10, 4.0),
            (2, 12, 4.0),
            (3, 13, 2.0),
        ] {
            index.insert_interaction(Interaction {
                user_id,
                app_id,
                rating,
            });
        }
        index.insert_game(GameMeta {
            app_id: 10,
            title: "Game A".to_string(),
        });
        index.insert_game(GameMeta {
            app_id: 11,
            title: "Game B".to_string(),
        });
        index.insert_game(GameMeta {
            app_id: 12,
            title: "Game C".to_string(),
        });
        index.insert_game(GameMeta {
            app_id: 13,
            title: "Game D".to_string(),
        });
        index
    }

    fn recommender_with(scorer: FixtureScorer) -> Recommender {
        Recommender::new(Arc::new(sample_index()), Arc::new(scorer))
    }

    #[test]
    fn test_excludes_rated_games() {
        let recommender = recommender_with(FixtureScorer::flat(3.0));
        let recs = recommender.recommend(1, 10).unwrap();

        let ids: Vec<_> = recs.iter().map(|r| r.app_id).collect();
        assert!(!ids.contains(&10));
        assert!(!ids.contains(&11));
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_ranked_descending() {
        let scorer = FixtureScorer::flat(1.0)
            .with_score(1, 12, 2.5)
            .with_score(1, 13, 4.5);
        let recommender = recommender_with(scorer);

        let recs = recommender.recommend(1, 10).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].app_id, 13);
        assert_eq!(recs[0].score, 4.5);
        assert_eq!(recs[1].app_id, 12);
    }

    #[test]
    fn test_ties_keep_universe_order() {
        // Equal scores: 12 appears before 13 in the interactions table
        let recommender = recommender_with(FixtureScorer::flat(3.0));
        let recs = recommender.recommend(1, 10).unwrap();

        assert_eq!(recs[0].app_id, 12);
        assert_eq!(recs[1].app_id, 13);
    }

    #[test]
    fn test_truncates_to_top_n() {
        let recommender = recommender_with(FixtureScorer::flat(3.0));
        let recs = recommender.recommend(1, 1).unwrap();
        assert_eq!(recs.len(), 1);
    }

    #[test]
    fn test_titles_annotated() {
        let recommender = recommender_with(FixtureScorer::flat(3.0));
        let recs = recommender.recommend(1, 10).unwrap();

        assert_eq!(recs[0].title, "Game C");
        assert_eq!(recs[1].title, "Game D");
    }

    #[test]
    fn test_prediction_failure_propagates() {
        let recommender = recommender_with(FixtureScorer::failing());
        assert!(recommender.recommend(1, 10).is_err());
    }

    #[test]
    fn test_empty_universe_yields_empty_result() {
        let recommender =
            Recommender::new(Arc::new(DataIndex::new()), Arc::new(FixtureScorer::flat(3.0)));
        let recs = recommender.recommend(1, 10).unwrap();
        assert!(recs.is_empty());
    }
}
