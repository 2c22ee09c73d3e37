use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use std::sync::Arc;

use super::CatalogStore;
use crate::{
    error::{AppError, AppResult},
    models::{Course, Interaction, SkillLevel, Snapshot},
};

/// Creates a PostgreSQL connection pool
pub async fn create_pool(database_url: &str) -> AppResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Catalog store backed by the `courses` and `interactions` tables.
///
/// Each call reads both tables and builds a fresh validated snapshot.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct CourseRow {
    id: i64,
    title: String,
    category: String,
    level: String,
    skills: String,
    difficulty_score: i16,
    duration_hours: f64,
}

impl TryFrom<CourseRow> for Course {
    type Error = AppError;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        let level = SkillLevel::parse(&row.level).ok_or_else(|| {
            AppError::InvalidDataset(format!("course {}: unknown level {}", row.id, row.level))
        })?;
        let difficulty_score = u8::try_from(row.difficulty_score).map_err(|_| {
            AppError::InvalidDataset(format!(
                "course {}: difficulty_score {} outside 1-10",
                row.id, row.difficulty_score
            ))
        })?;

        Ok(Course {
            id: row.id,
            title: row.title,
            category: row.category,
            level,
            skills: row.skills,
            difficulty_score,
            duration_hours: row.duration_hours,
        })
    }
}

#[derive(Debug, FromRow)]
struct InteractionRow {
    user_id: i64,
    course_id: i64,
    rating: i16,
    completion_rate: f64,
    time_spent: f64,
}

impl TryFrom<InteractionRow> for Interaction {
    type Error = AppError;

    fn try_from(row: InteractionRow) -> Result<Self, Self::Error> {
        let rating = u8::try_from(row.rating).map_err(|_| {
            AppError::InvalidDataset(format!(
                "interaction user={} course={}: rating {} outside 1-5",
                row.user_id, row.course_id, row.rating
            ))
        })?;

        Ok(Interaction {
            user_id: row.user_id,
            course_id: row.course_id,
            rating,
            completion_rate: row.completion_rate,
            time_spent: row.time_spent,
        })
    }
}

impl PgStore {
    /// Connects and applies the embedded migrations
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let pool = create_pool(database_url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
        Ok(Self::new(pool))
    }

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CatalogStore for PgStore {
    async fn snapshot(&self) -> AppResult<Arc<Snapshot>> {
        let course_rows: Vec<CourseRow> = sqlx::query_as(
            "SELECT id, title, category, level, skills, difficulty_score, duration_hours \
             FROM courses ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let interaction_rows: Vec<InteractionRow> = sqlx::query_as(
            "SELECT user_id, course_id, rating, completion_rate, time_spent \
             FROM interactions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let courses = course_rows
            .into_iter()
            .map(Course::try_from)
            .collect::<AppResult<Vec<_>>>()?;
        let interactions = interaction_rows
            .into_iter()
            .map(Interaction::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        let version = format!("pg:{}c:{}i", courses.len(), interactions.len());
        let snapshot = Snapshot::new(version, courses, interactions)?;
        tracing::debug!(
            version = %snapshot.version,
            loaded_at = %snapshot.loaded_at,
            "Loaded snapshot from Postgres"
        );

        Ok(Arc::new(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_row_conversion() {
        let row = CourseRow {
            id: 4,
            title: "Machine Learning Basics".to_string(),
            category: "AI/ML".to_string(),
            level: "Advanced".to_string(),
            skills: "TensorFlow".to_string(),
            difficulty_score: 9,
            duration_hours: 20.0,
        };

        let course = Course::try_from(row).unwrap();
        assert_eq!(course.level, SkillLevel::Advanced);
        assert_eq!(course.difficulty_score, 9);
    }

    #[test]
    fn test_course_row_with_unknown_level() {
        let row = CourseRow {
            id: 4,
            title: "Machine Learning Basics".to_string(),
            category: "AI/ML".to_string(),
            level: "Expert".to_string(),
            skills: "TensorFlow".to_string(),
            difficulty_score: 9,
            duration_hours: 20.0,
        };

        assert!(matches!(Course::try_from(row), Err(AppError::InvalidDataset(_))));
    }

    #[test]
    fn test_negative_rating_row_is_rejected() {
        let row = InteractionRow {
            user_id: 1,
            course_id: 2,
            rating: -1,
            completion_rate: 0.5,
            time_spent: 3.0,
        };

        assert!(matches!(Interaction::try_from(row), Err(AppError::InvalidDataset(_))));
    }
}
