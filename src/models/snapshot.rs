use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

use super::{Course, CourseId, Interaction, UserId};
use crate::error::{AppError, AppResult};

/// Validated, read-only view of the catalog and interaction log.
///
/// Built once at ingestion and shared between requests behind an `Arc`.
/// Courses and interactions are flat collections; `course_index` maps an id
/// to its catalog position.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub version: String,
    pub loaded_at: DateTime<Utc>,
    courses: Vec<Course>,
    interactions: Vec<Interaction>,
    course_index: HashMap<CourseId, usize>,
}

impl Snapshot {
    /// Validates the records and builds the snapshot.
    ///
    /// Every problem found is reported in a single `InvalidDataset` error.
    pub fn new(
        version: impl Into<String>,
        courses: Vec<Course>,
        interactions: Vec<Interaction>,
    ) -> AppResult<Self> {
        let mut errors = Vec::new();
        let mut course_index = HashMap::with_capacity(courses.len());

        for (position, course) in courses.iter().enumerate() {
            errors.extend(course.validate());
            if course_index.insert(course.id, position).is_some() {
                errors.push(format!("course {}: duplicate id", course.id));
            }
        }

        for interaction in &interactions {
            errors.extend(interaction.validate());
            if !course_index.contains_key(&interaction.course_id) {
                errors.push(format!(
                    "interaction user={} course={}: unknown course",
                    interaction.user_id, interaction.course_id
                ));
            }
        }

        if !errors.is_empty() {
            tracing::warn!(error_count = errors.len(), "Rejected dataset snapshot");
            return Err(AppError::InvalidDataset(errors.join("; ")));
        }

        Ok(Self {
            version: version.into(),
            loaded_at: Utc::now(),
            courses,
            interactions,
            course_index,
        })
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.course_index.get(&id).map(|&position| &self.courses[position])
    }

    /// The user's interactions, in log order
    pub fn interactions_for(&self, user_id: UserId) -> impl Iterator<Item = &Interaction> + '_ {
        self.interactions
            .iter()
            .filter(move |interaction| interaction.user_id == user_id)
    }

    /// Ids of every course the user has an interaction with
    pub fn taken_courses(&self, user_id: UserId) -> HashSet<CourseId> {
        self.interactions_for(user_id)
            .map(|interaction| interaction.course_id)
            .collect()
    }
}
