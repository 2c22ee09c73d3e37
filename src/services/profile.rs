use crate::models::{LearningPace, SkillLevel, Snapshot, UserId, UserProfile};

/// Mean hours per course above which a learner counts as slow
pub const SLOW_PACE_HOURS: f64 = 15.0;
/// Mean hours per course below which a learner counts as fast
pub const FAST_PACE_HOURS: f64 = 8.0;
/// Mean difficulty at or above which a learner counts as advanced
pub const ADVANCED_DIFFICULTY: f64 = 7.0;
/// Mean difficulty at or above which a learner counts as intermediate
pub const INTERMEDIATE_DIFFICULTY: f64 = 5.0;

/// Derives the learning profile of `user_id` from the snapshot's interaction log.
///
/// Users without interactions get [`UserProfile::cold_start`]. Every
/// interaction counts towards the averages, including repeats of a course.
pub fn build_profile(user_id: UserId, snapshot: &Snapshot) -> UserProfile {
    let mut count = 0usize;
    let mut rating_sum = 0.0;
    let mut completion_sum = 0.0;
    let mut time_sum = 0.0;
    let mut difficulties = Vec::new();

    for interaction in snapshot.interactions_for(user_id) {
        count += 1;
        rating_sum += f64::from(interaction.rating);
        completion_sum += interaction.completion_rate;
        time_sum += interaction.time_spent;
        if let Some(course) = snapshot.course(interaction.course_id) {
            difficulties.push(f64::from(course.difficulty_score));
        }
    }

    if count == 0 {
        tracing::debug!(user_id, "No interactions, using cold-start profile");
        return UserProfile::cold_start(user_id);
    }

    let n = count as f64;
    let avg_time = time_sum / n;
    let preferred_difficulty = mean(&difficulties);

    let profile = UserProfile {
        user_id,
        interaction_count: count,
        avg_rating: Some(rating_sum / n),
        avg_completion: Some(completion_sum / n),
        avg_time_spent: Some(avg_time),
        learning_pace: pace_for(avg_time),
        skill_level: preferred_difficulty
            .map(skill_level_for)
            .unwrap_or(SkillLevel::Beginner),
        preferred_difficulty,
    };

    tracing::debug!(
        user_id,
        interactions = count,
        pace = %profile.learning_pace,
        skill_level = %profile.skill_level,
        "Built user profile"
    );

    profile
}

pub fn pace_for(avg_time_spent: f64) -> LearningPace {
    if avg_time_spent > SLOW_PACE_HOURS {
        LearningPace::Slow
    } else if avg_time_spent < FAST_PACE_HOURS {
        LearningPace::Fast
    } else {
        LearningPace::Normal
    }
}

pub fn skill_level_for(avg_difficulty: f64) -> SkillLevel {
    if avg_difficulty >= ADVANCED_DIFFICULTY {
        SkillLevel::Advanced
    } else if avg_difficulty >= INTERMEDIATE_DIFFICULTY {
        SkillLevel::Intermediate
    } else {
        SkillLevel::Beginner
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Interaction};

    fn course(id: i64, difficulty_score: u8) -> Course {
        Course {
            id,
            title: format!("Course {}", id),
            category: "Programming".to_string(),
            level: SkillLevel::Intermediate,
            skills: String::new(),
            difficulty_score,
            duration_hours: 12.0,
        }
    }

    fn interaction(course_id: i64, rating: u8, completion_rate: f64, time_spent: f64) -> Interaction {
        Interaction {
            user_id: 1,
            course_id,
            rating,
            completion_rate,
            time_spent,
        }
    }

    #[test]
    fn test_unknown_user_gets_cold_start_profile() {
        let snapshot = Snapshot::new("test", vec![course(1, 5)], vec![]).unwrap();
        let profile = build_profile(99, &snapshot);
        assert_eq!(profile, UserProfile::cold_start(99));
    }

    #[test]
    fn test_two_interaction_profile() {
        // Mean time 12h sits between the fast and slow thresholds
        let snapshot = Snapshot::new(
            "test",
            vec![course(1, 8), course(2, 7)],
            vec![interaction(1, 5, 0.9, 10.0), interaction(2, 4, 0.8, 14.0)],
        )
        .unwrap();

        let profile = build_profile(1, &snapshot);
        assert_eq!(profile.interaction_count, 2);
        assert_eq!(profile.learning_pace, LearningPace::Normal);
        assert_eq!(profile.avg_time_spent, Some(12.0));
        assert!((profile.avg_rating.unwrap() - 4.5).abs() < 1e-9);
        assert!((profile.avg_completion.unwrap() - 0.85).abs() < 1e-9);
        assert_eq!(profile.preferred_difficulty, Some(7.5));
        assert_eq!(profile.skill_level, SkillLevel::Advanced);
    }

    #[test]
    fn test_repeated_course_counts_twice() {
        let snapshot = Snapshot::new(
            "test",
            vec![course(1, 2), course(2, 8)],
            vec![
                interaction(1, 3, 0.5, 4.0),
                interaction(1, 3, 0.5, 4.0),
                interaction(2, 3, 0.5, 4.0),
            ],
        )
        .unwrap();

        let profile = build_profile(1, &snapshot);
        assert_eq!(profile.preferred_difficulty, Some(4.0));
        assert_eq!(profile.skill_level, SkillLevel::Beginner);
        assert_eq!(profile.learning_pace, LearningPace::Fast);
    }

    #[test]
    fn test_pace_thresholds() {
        assert_eq!(pace_for(15.0), LearningPace::Normal);
        assert_eq!(pace_for(15.5), LearningPace::Slow);
        assert_eq!(pace_for(8.0), LearningPace::Normal);
        assert_eq!(pace_for(7.9), LearningPace::Fast);
    }

    #[test]
    fn test_skill_level_thresholds() {
        assert_eq!(skill_level_for(7.0), SkillLevel::Advanced);
        assert_eq!(skill_level_for(6.99), SkillLevel::Intermediate);
        assert_eq!(skill_level_for(5.0), SkillLevel::Intermediate);
        assert_eq!(skill_level_for(4.99), SkillLevel::Beginner);
    }
}
