use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

use super::CatalogStore;
use crate::{
    error::AppResult,
    models::{Course, Interaction, SkillLevel, Snapshot},
};

/// Store holding a single snapshot loaded at startup
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    snapshot: Arc<Snapshot>,
}

/// On-disk dataset layout
#[derive(Debug, Deserialize)]
struct DatasetFile {
    #[serde(default)]
    version: Option<String>,
    courses: Vec<Course>,
    #[serde(default)]
    interactions: Vec<Interaction>,
}

impl InMemoryStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }

    /// Loads `{ "courses": [...], "interactions": [...] }` from a JSON file
    pub async fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let store = Self::from_json_str(&raw, &path.display().to_string())?;

        tracing::info!(
            path = %path.display(),
            courses = store.snapshot.courses().len(),
            interactions = store.snapshot.interactions().len(),
            "Loaded dataset file"
        );

        Ok(store)
    }

    /// Parses a dataset document; `default_version` is used when it has none
    pub fn from_json_str(raw: &str, default_version: &str) -> AppResult<Self> {
        let dataset: DatasetFile = serde_json::from_str(raw)?;
        let version = dataset
            .version
            .unwrap_or_else(|| default_version.to_string());
        let snapshot = Snapshot::new(version, dataset.courses, dataset.interactions)?;
        Ok(Self::new(snapshot))
    }
}

#[async_trait::async_trait]
impl CatalogStore for InMemoryStore {
    async fn snapshot(&self) -> AppResult<Arc<Snapshot>> {
        Ok(self.snapshot.clone())
    }
}

/// Ten-course catalog with twelve interactions across five learners
pub fn sample_snapshot() -> AppResult<Snapshot> {
    let courses = [
        (1, "Advanced JavaScript Concepts", "Programming", SkillLevel::Advanced, "JavaScript ES6 Closures Async Programming", 8, 12.0),
        (2, "Python for Data Science", "Data Science", SkillLevel::Intermediate, "Python Pandas NumPy Machine Learning", 7, 16.0),
        (3, "React.js Complete Guide", "Frontend", SkillLevel::Beginner, "React Hooks Components State Management", 5, 10.0),
        (4, "Machine Learning Basics", "AI/ML", SkillLevel::Advanced, "Machine Learning Algorithms TensorFlow", 9, 20.0),
        (5, "Web Development Bootcamp", "Web Dev", SkillLevel::Beginner, "HTML CSS JavaScript Responsive Design", 3, 25.0),
        (6, "Database Design Fundamentals", "Database", SkillLevel::Intermediate, "SQL Database Design Normalization", 6, 8.0),
        (7, "UI/UX Design Principles", "Design", SkillLevel::Beginner, "Design Thinking Figma Prototyping", 4, 14.0),
        (8, "Node.js Backend Development", "Backend", SkillLevel::Intermediate, "Node.js Express MongoDB REST APIs", 7, 15.0),
        (9, "Mobile App Development", "Mobile", SkillLevel::Intermediate, "React Native Flutter Mobile UI", 6, 18.0),
        (10, "Cybersecurity Essentials", "Security", SkillLevel::Advanced, "Security Encryption Network Protection", 8, 12.0),
    ]
    .into_iter()
    .map(
        |(id, title, category, level, skills, difficulty_score, duration_hours)| Course {
            id,
            title: title.to_string(),
            category: category.to_string(),
            level,
            skills: skills.to_string(),
            difficulty_score,
            duration_hours,
        },
    )
    .collect();

    let interactions = [
        (1, 1, 5, 0.9, 10.0),
        (1, 2, 4, 0.8, 14.0),
        (1, 5, 3, 0.6, 8.0),
        (2, 1, 4, 0.7, 9.0),
        (2, 3, 5, 1.0, 10.0),
        (3, 2, 5, 0.95, 15.0),
        (3, 4, 3, 0.5, 12.0),
        (3, 6, 4, 0.8, 6.0),
        (4, 3, 4, 0.85, 8.0),
        (4, 5, 5, 0.9, 22.0),
        (5, 1, 3, 0.4, 5.0),
        (5, 7, 4, 0.7, 10.0),
    ]
    .into_iter()
    .map(
        |(user_id, course_id, rating, completion_rate, time_spent)| Interaction {
            user_id,
            course_id,
            rating,
            completion_rate,
            time_spent,
        },
    )
    .collect();

    Snapshot::new("sample", courses, interactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_sample_snapshot_is_valid() {
        let snapshot = sample_snapshot().unwrap();
        assert_eq!(snapshot.courses().len(), 10);
        assert_eq!(snapshot.interactions().len(), 12);
        assert_eq!(snapshot.version, "sample");
    }

    #[test]
    fn test_from_json_str() {
        let raw = r#"{
            "courses": [
                {"id": 1, "title": "Intro", "category": "Web Dev", "level": "Beginner",
                 "skills": "HTML", "difficulty_score": 2, "duration_hours": 6}
            ],
            "interactions": [
                {"user_id": 9, "course_id": 1, "rating": 5, "completion_rate": 1.0, "time_spent": 5}
            ]
        }"#;

        let store = InMemoryStore::from_json_str(raw, "inline").unwrap();
        assert_eq!(store.snapshot.version, "inline");
        assert_eq!(store.snapshot.course(1).unwrap().level, SkillLevel::Beginner);
        assert_eq!(store.snapshot.interactions().len(), 1);
    }

    #[test]
    fn test_from_json_str_rejects_out_of_range_values() {
        let raw = r#"{
            "courses": [
                {"id": 1, "title": "Intro", "category": "Web Dev", "level": "beginner",
                 "skills": "HTML", "difficulty_score": 2, "duration_hours": 6}
            ],
            "interactions": [
                {"user_id": 9, "course_id": 1, "rating": 7, "completion_rate": 1.0, "time_spent": 5}
            ]
        }"#;

        let result = InMemoryStore::from_json_str(raw, "inline");
        assert!(matches!(result, Err(AppError::InvalidDataset(msg)) if msg.contains("rating 7")));
    }

    #[test]
    fn test_from_json_str_rejects_missing_fields() {
        let raw = r#"{"courses": [{"id": 1, "title": "Intro"}]}"#;
        assert!(matches!(
            InMemoryStore::from_json_str(raw, "inline"),
            Err(AppError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_store_returns_shared_snapshot() {
        let store = InMemoryStore::new(sample_snapshot().unwrap());
        let first = store.snapshot().await.unwrap();
        let second = store.snapshot().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
