use serde::{Deserialize, Serialize};

use super::{Course, CourseId, SkillLevel};

/// Which signal source produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationMethod {
    Content,
    Collaborative,
    Hybrid,
}

/// A ranked course suggestion returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub course_id: CourseId,
    pub title: String,
    pub category: String,
    pub level: SkillLevel,
    /// Finite; higher ranks first
    pub score: f64,
    pub reason: String,
    pub method: RecommendationMethod,
}

impl Recommendation {
    pub fn for_course(
        course: &Course,
        score: f64,
        reason: String,
        method: RecommendationMethod,
    ) -> Self {
        Self {
            course_id: course.id,
            title: course.title.clone(),
            category: course.category.clone(),
            level: course.level,
            score,
            reason,
            method,
        }
    }
}

/// Stable descending sort by score; equal scores keep their incoming order
pub fn sort_by_score_desc(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|a, b| b.score.total_cmp(&a.score));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(course_id: CourseId, score: f64) -> Recommendation {
        Recommendation {
            course_id,
            title: format!("Course {}", course_id),
            category: "Programming".to_string(),
            level: SkillLevel::Beginner,
            score,
            reason: String::new(),
            method: RecommendationMethod::Content,
        }
    }

    #[test]
    fn test_sort_is_descending_and_stable() {
        let mut recs = vec![rec(1, 0.2), rec(2, 0.5), rec(3, 0.2), rec(4, 0.5)];
        sort_by_score_desc(&mut recs);
        let ids: Vec<CourseId> = recs.iter().map(|r| r.course_id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_method_serialization() {
        let json = serde_json::to_string(&RecommendationMethod::Hybrid).unwrap();
        assert_eq!(json, "\"hybrid\"");
    }
}
