use std::collections::HashMap;

use crate::models::{sort_by_score_desc, CourseId, Recommendation, RecommendationMethod};

/// Fixed weights applied to each source list before merging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendWeights {
    pub content: f64,
    pub collaborative: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            content: 0.6,
            collaborative: 0.4,
        }
    }
}

/// Merges the two ranked lists into one, keyed by course.
///
/// A course found in both lists gets the sum of its weighted scores and is
/// tagged hybrid, keeping the content entry's reason. The output holds each
/// course once, sorted by combined score (ties in first-seen order) and
/// truncated to `count`.
pub fn blend(
    content: Vec<Recommendation>,
    collaborative: Vec<Recommendation>,
    weights: BlendWeights,
    count: usize,
) -> Vec<Recommendation> {
    let mut merged: Vec<Recommendation> = Vec::with_capacity(content.len() + collaborative.len());
    let mut positions: HashMap<CourseId, usize> = HashMap::new();

    let weighted = content
        .into_iter()
        .map(|rec| (rec, weights.content))
        .chain(collaborative.into_iter().map(|rec| (rec, weights.collaborative)));

    for (mut rec, weight) in weighted {
        let contribution = rec.score * weight;
        match positions.get(&rec.course_id) {
            Some(&position) => {
                let existing = &mut merged[position];
                // Each source list is already unique per course
                existing.score += contribution;
                existing.method = RecommendationMethod::Hybrid;
            }
            None => {
                rec.score = contribution;
                positions.insert(rec.course_id, merged.len());
                merged.push(rec);
            }
        }
    }

    let sources = merged.len();
    sort_by_score_desc(&mut merged);
    merged.truncate(count);

    tracing::debug!(merged = sources, returned = merged.len(), "Blended recommendations");

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SkillLevel;

    fn rec(course_id: CourseId, score: f64, method: RecommendationMethod) -> Recommendation {
        Recommendation {
            course_id,
            title: format!("Course {}", course_id),
            category: "Programming".to_string(),
            level: SkillLevel::Beginner,
            score,
            reason: format!("{:?}", method),
            method,
        }
    }

    #[test]
    fn test_shared_course_is_weighted_sum_and_hybrid() {
        let content = vec![rec(1, 0.5, RecommendationMethod::Content)];
        let collaborative = vec![rec(1, 0.8, RecommendationMethod::Collaborative)];

        let blended = blend(content, collaborative, BlendWeights::default(), 5);
        assert_eq!(blended.len(), 1);
        assert!((blended[0].score - (0.6 * 0.5 + 0.4 * 0.8)).abs() < 1e-12);
        assert_eq!(blended[0].method, RecommendationMethod::Hybrid);
        assert_eq!(blended[0].reason, "Content");
    }

    #[test]
    fn test_single_source_keeps_tag_and_weighted_score() {
        let content = vec![rec(1, 0.5, RecommendationMethod::Content)];
        let collaborative = vec![rec(2, 1.0, RecommendationMethod::Collaborative)];

        let blended = blend(content, collaborative, BlendWeights::default(), 5);
        let ids: Vec<CourseId> = blended.iter().map(|r| r.course_id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert!((blended[0].score - 0.4).abs() < 1e-12);
        assert_eq!(blended[0].method, RecommendationMethod::Collaborative);
        assert!((blended[1].score - 0.3).abs() < 1e-12);
        assert_eq!(blended[1].method, RecommendationMethod::Content);
    }

    #[test]
    fn test_cold_start_lists_from_same_scorer_become_hybrid() {
        let content = vec![rec(1, 0.5, RecommendationMethod::Content)];
        let fallback = vec![rec(1, 0.5, RecommendationMethod::Content)];

        let blended = blend(content, fallback, BlendWeights::default(), 5);
        assert_eq!(blended[0].method, RecommendationMethod::Hybrid);
        assert!((blended[0].score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_no_duplicates_and_truncation() {
        let content = vec![
            rec(1, 0.5, RecommendationMethod::Content),
            rec(2, 0.4, RecommendationMethod::Content),
            rec(3, 0.3, RecommendationMethod::Content),
        ];
        let collaborative = vec![
            rec(3, 0.9, RecommendationMethod::Collaborative),
            rec(4, 0.2, RecommendationMethod::Collaborative),
        ];

        let blended = blend(content, collaborative, BlendWeights::default(), 3);
        let ids: Vec<CourseId> = blended.iter().map(|r| r.course_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_equal_scores_keep_first_seen_order() {
        let content = vec![
            rec(7, 0.5, RecommendationMethod::Content),
            rec(3, 0.5, RecommendationMethod::Content),
        ];

        let blended = blend(content, Vec::new(), BlendWeights::default(), 5);
        let ids: Vec<CourseId> = blended.iter().map(|r| r.course_id).collect();
        assert_eq!(ids, vec![7, 3]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(blend(Vec::new(), Vec::new(), BlendWeights::default(), 5).is_empty());
    }
}
