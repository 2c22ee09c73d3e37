use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::{SkillLevel, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningPace {
    Slow,
    Normal,
    Fast,
}

impl Display for LearningPace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LearningPace::Slow => "slow",
            LearningPace::Normal => "normal",
            LearningPace::Fast => "fast",
        };
        write!(f, "{}", name)
    }
}

/// Learning profile derived from a user's interaction history.
///
/// Never stored; rebuilt for every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub interaction_count: usize,
    pub avg_rating: Option<f64>,
    pub avg_completion: Option<f64>,
    pub avg_time_spent: Option<f64>,
    pub learning_pace: LearningPace,
    pub skill_level: SkillLevel,
    /// Mean difficulty_score of the courses the user has taken
    pub preferred_difficulty: Option<f64>,
}

impl UserProfile {
    /// Profile used for users without any recorded interactions
    pub fn cold_start(user_id: UserId) -> Self {
        Self {
            user_id,
            interaction_count: 0,
            avg_rating: None,
            avg_completion: None,
            avg_time_spent: None,
            learning_pace: LearningPace::Normal,
            skill_level: SkillLevel::Beginner,
            preferred_difficulty: None,
        }
    }

    pub fn is_cold_start(&self) -> bool {
        self.interaction_count == 0
    }
}
