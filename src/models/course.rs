use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

pub type CourseId = i64;

/// Difficulty tier shared by catalog entries and derived user profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }

    /// Parses a level name, ignoring case ("Beginner" and "beginner" both match)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "beginner" => Some(SkillLevel::Beginner),
            "intermediate" => Some(SkillLevel::Intermediate),
            "advanced" => Some(SkillLevel::Advanced),
            _ => None,
        }
    }
}

impl Display for SkillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'de> Deserialize<'de> for SkillLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        SkillLevel::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown skill level: {}", raw)))
    }
}

/// A catalog entry. Immutable once loaded into a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub category: String,
    pub level: SkillLevel,
    /// Free-text skill keywords
    pub skills: String,
    /// 1 (easiest) through 10
    pub difficulty_score: u8,
    pub duration_hours: f64,
}

impl Course {
    /// Checks the catalog invariants for this record.
    ///
    /// Returns an empty `Vec` if valid; otherwise a list of human-readable errors.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let prefix = format!("course {}", self.id);

        if self.title.trim().is_empty() {
            errors.push(format!("{prefix}: title must not be empty"));
        }

        if !(1..=10).contains(&self.difficulty_score) {
            errors.push(format!(
                "{prefix}: difficulty_score {} outside 1-10",
                self.difficulty_score
            ));
        }

        if !self.duration_hours.is_finite() || self.duration_hours <= 0.0 {
            errors.push(format!(
                "{prefix}: duration_hours must be positive, got {}",
                self.duration_hours
            ));
        }

        errors
    }
}
