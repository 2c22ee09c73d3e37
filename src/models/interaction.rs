use serde::{Deserialize, Serialize};

use super::{CourseId, UserId};

/// One entry of a user's append-only interaction log.
///
/// Repeated (user, course) pairs are kept as separate entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    pub user_id: UserId,
    pub course_id: CourseId,
    /// 1 through 5
    pub rating: u8,
    /// Fraction of the course completed, 0 through 1
    pub completion_rate: f64,
    /// Hours spent on the course
    pub time_spent: f64,
}

impl Interaction {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let prefix = format!("interaction user={} course={}", self.user_id, self.course_id);

        if !(1..=5).contains(&self.rating) {
            errors.push(format!("{prefix}: rating {} outside 1-5", self.rating));
        }

        if !(0.0..=1.0).contains(&self.completion_rate) {
            errors.push(format!(
                "{prefix}: completion_rate {} outside 0-1",
                self.completion_rate
            ));
        }

        if !self.time_spent.is_finite() || self.time_spent <= 0.0 {
            errors.push(format!(
                "{prefix}: time_spent must be positive, got {}",
                self.time_spent
            ));
        }

        errors
    }
}
