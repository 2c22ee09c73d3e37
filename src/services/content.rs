use std::collections::HashSet;
use std::sync::Arc;

use crate::models::{
    sort_by_score_desc, Course, CourseId, LearningPace, Recommendation, RecommendationMethod,
    SkillLevel, UserProfile,
};
use crate::services::diversity::DiversitySource;

/// Bonus for a course whose difficulty sits in the learner's skill band
pub const SKILL_MATCH_BONUS: f64 = 0.3;
/// Bonus for a course whose length suits the learner's pace
pub const PACE_MATCH_BONUS: f64 = 0.2;

const BEGINNER_MAX_DIFFICULTY: u8 = 5;
const INTERMEDIATE_DIFFICULTY: (u8, u8) = (4, 7);
const ADVANCED_MIN_DIFFICULTY: u8 = 6;

const FAST_MAX_HOURS: f64 = 12.0;
const NORMAL_HOURS: (f64, f64) = (10.0, 18.0);
const SLOW_MIN_HOURS: f64 = 15.0;

/// Rule-based scorer matching untaken courses against a learner profile
#[derive(Clone)]
pub struct ContentScorer {
    diversity: Arc<dyn DiversitySource>,
}

impl ContentScorer {
    pub fn new(diversity: Arc<dyn DiversitySource>) -> Self {
        Self { diversity }
    }

    /// Scores every course in `catalog` that is not in `taken`.
    ///
    /// The result is sorted by score, highest first, with ties kept in
    /// catalog order, and truncated to `limit`.
    pub fn score(
        &self,
        profile: &UserProfile,
        catalog: &[Course],
        taken: &HashSet<CourseId>,
        limit: usize,
    ) -> Vec<Recommendation> {
        let reason = format!(
            "Matches your {} level and {} learning pace",
            profile.skill_level, profile.learning_pace
        );

        let mut recommendations: Vec<Recommendation> = catalog
            .iter()
            .filter(|course| !taken.contains(&course.id))
            .map(|course| {
                let mut score = 0.0;
                if matches_skill_band(profile.skill_level, course.difficulty_score) {
                    score += SKILL_MATCH_BONUS;
                }
                if matches_pace_band(profile.learning_pace, course.duration_hours) {
                    score += PACE_MATCH_BONUS;
                }
                score += self.diversity.sample();

                Recommendation::for_course(
                    course,
                    score,
                    reason.clone(),
                    RecommendationMethod::Content,
                )
            })
            .collect();

        sort_by_score_desc(&mut recommendations);
        recommendations.truncate(limit);

        tracing::debug!(
            user_id = profile.user_id,
            candidates = catalog.len().saturating_sub(taken.len()),
            returned = recommendations.len(),
            "Content-based scoring complete"
        );

        recommendations
    }
}

/// Bands overlap, so a difficulty of 5 suits both beginners and intermediates
pub fn matches_skill_band(level: SkillLevel, difficulty_score: u8) -> bool {
    match level {
        SkillLevel::Beginner => difficulty_score <= BEGINNER_MAX_DIFFICULTY,
        SkillLevel::Intermediate => {
            (INTERMEDIATE_DIFFICULTY.0..=INTERMEDIATE_DIFFICULTY.1).contains(&difficulty_score)
        }
        SkillLevel::Advanced => difficulty_score >= ADVANCED_MIN_DIFFICULTY,
    }
}

pub fn matches_pace_band(pace: LearningPace, duration_hours: f64) -> bool {
    match pace {
        LearningPace::Fast => duration_hours <= FAST_MAX_HOURS,
        LearningPace::Normal => (NORMAL_HOURS.0..=NORMAL_HOURS.1).contains(&duration_hours),
        LearningPace::Slow => duration_hours >= SLOW_MIN_HOURS,
    }
}
