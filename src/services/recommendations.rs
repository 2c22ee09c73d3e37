use std::sync::Arc;
use std::time::Instant;

use crate::{
    config::Config,
    models::{Recommendation, Snapshot, UserId, UserProfile},
    services::{
        blender::{self, BlendWeights},
        collaborative::CollaborativeScorer,
        content::ContentScorer,
        diversity::{self, DiversitySource},
        profile, ScoringContext,
    },
};

/// Generates hybrid course recommendations
///
/// Combines rule-based content matching against the learner's inferred
/// profile with user-user collaborative filtering over the rating matrix.
/// Holds only immutable configuration; every call rebuilds the profile and
/// similarity state from the snapshot it is given.
#[derive(Clone)]
pub struct RecommendationService {
    content: ContentScorer,
    collaborative: CollaborativeScorer,
    weights: BlendWeights,
}

impl RecommendationService {
    pub fn new(
        diversity: Arc<dyn DiversitySource>,
        collaborative: CollaborativeScorer,
        weights: BlendWeights,
    ) -> Self {
        Self {
            content: ContentScorer::new(diversity),
            collaborative,
            weights,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            diversity::from_settings(config.diversity_max, config.diversity_seed),
            CollaborativeScorer::new(config.neighbor_count),
            BlendWeights {
                content: config.content_weight,
                collaborative: config.collaborative_weight,
            },
        )
    }

    pub fn profile(&self, user_id: UserId, snapshot: &Snapshot) -> UserProfile {
        profile::build_profile(user_id, snapshot)
    }

    /// Returns up to `count` courses for `user_id`, best first.
    ///
    /// Courses the user already took are never included. A `count` of zero
    /// yields an empty list without doing any scoring work.
    pub fn get_recommendations(
        &self,
        snapshot: &Snapshot,
        user_id: UserId,
        count: usize,
    ) -> Vec<Recommendation> {
        if count == 0 {
            return Vec::new();
        }

        let start = Instant::now();
        let profile = profile::build_profile(user_id, snapshot);
        let taken = snapshot.taken_courses(user_id);
        let ctx = ScoringContext {
            user_id,
            snapshot,
            profile: &profile,
            taken: &taken,
            limit: count,
        };

        let content = self
            .content
            .score(&profile, snapshot.courses(), &taken, count);
        let collaborative = self.collaborative.score(&ctx, &self.content);

        let content_count = content.len();
        let collaborative_count = collaborative.len();
        let recommendations = blender::blend(content, collaborative, self.weights, count);

        tracing::info!(
            user_id,
            snapshot = %snapshot.version,
            cold_start = profile.is_cold_start(),
            content = content_count,
            collaborative = collaborative_count,
            returned = recommendations.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Recommendations generated"
        );

        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseId, RecommendationMethod};
    use crate::services::content::matches_skill_band;
    use crate::services::diversity::{NoDiversity, UniformDiversity};
    use crate::store::sample_snapshot;
    use std::collections::HashSet;

    fn deterministic() -> RecommendationService {
        RecommendationService::new(
            Arc::new(NoDiversity),
            CollaborativeScorer::default(),
            BlendWeights::default(),
        )
    }

    #[test]
    fn test_never_returns_taken_courses() {
        let snapshot = sample_snapshot().unwrap();
        let service = RecommendationService::new(
            Arc::new(UniformDiversity::new(0.1)),
            CollaborativeScorer::default(),
            BlendWeights::default(),
        );

        for user_id in 0..=7 {
            let taken = snapshot.taken_courses(user_id);
            let recs = service.get_recommendations(&snapshot, user_id, 10);
            assert!(recs.iter().all(|r| !taken.contains(&r.course_id)));
        }
    }

    #[test]
    fn test_output_sorted_unique_and_finite() {
        let snapshot = sample_snapshot().unwrap();
        let service = deterministic();

        for user_id in 1..=5 {
            let recs = service.get_recommendations(&snapshot, user_id, 10);
            assert!(recs.windows(2).all(|w| w[0].score >= w[1].score));
            assert!(recs.iter().all(|r| r.score.is_finite()));
            let ids: HashSet<CourseId> = recs.iter().map(|r| r.course_id).collect();
            assert_eq!(ids.len(), recs.len());
        }
    }

    #[test]
    fn test_zero_count_is_empty() {
        let snapshot = sample_snapshot().unwrap();
        assert!(deterministic().get_recommendations(&snapshot, 1, 0).is_empty());
    }

    #[test]
    fn test_large_count_returns_only_available_candidates() {
        // User 1 took 3 of the 10 sample courses
        let snapshot = sample_snapshot().unwrap();
        let recs = deterministic().get_recommendations(&snapshot, 1, 1000);
        assert_eq!(recs.len(), 7);
    }

    #[test]
    fn test_deterministic_without_diversity() {
        let snapshot = sample_snapshot().unwrap();
        let service = deterministic();

        let first = serde_json::to_string(&service.get_recommendations(&snapshot, 3, 5)).unwrap();
        let second = serde_json::to_string(&service.get_recommendations(&snapshot, 3, 5)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cold_start_user_gets_beginner_friendly_courses() {
        let snapshot = sample_snapshot().unwrap();
        let recs = deterministic().get_recommendations(&snapshot, 999, 3);

        assert_eq!(recs.len(), 3);
        for rec in &recs {
            let course = snapshot.course(rec.course_id).unwrap();
            assert!(matches_skill_band(
                crate::models::SkillLevel::Beginner,
                course.difficulty_score
            ));
            // Both source lists come from content scoring, so they merge
            assert_eq!(rec.method, RecommendationMethod::Hybrid);
        }
    }

    #[test]
    fn test_hybrid_score_is_weighted_sum() {
        let snapshot = sample_snapshot().unwrap();
        let service = deterministic();
        let profile = service.profile(1, &snapshot);
        let taken = snapshot.taken_courses(1);

        let content = service.content.score(&profile, snapshot.courses(), &taken, 10);
        let ctx = ScoringContext {
            user_id: 1,
            snapshot: &snapshot,
            profile: &profile,
            taken: &taken,
            limit: 10,
        };
        let collaborative = service.collaborative.score(&ctx, &service.content);
        let recs = service.get_recommendations(&snapshot, 1, 10);

        let hybrids: Vec<_> = recs
            .iter()
            .filter(|r| r.method == RecommendationMethod::Hybrid)
            .collect();
        assert!(!hybrids.is_empty());

        for rec in hybrids {
            let c = content.iter().find(|r| r.course_id == rec.course_id).unwrap();
            let f = collaborative.iter().find(|r| r.course_id == rec.course_id).unwrap();
            assert!((rec.score - (0.6 * c.score + 0.4 * f.score)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_catalog_is_empty_result() {
        let snapshot = Snapshot::new("empty", vec![], vec![]).unwrap();
        assert!(deterministic().get_recommendations(&snapshot, 1, 5).is_empty());
    }
}
