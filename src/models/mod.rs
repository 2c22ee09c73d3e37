pub mod course;
pub mod interaction;
pub mod profile;
pub mod recommendation;
pub mod snapshot;

pub use course::{Course, CourseId, SkillLevel};
pub use interaction::Interaction;
pub use profile::{LearningPace, UserProfile};
pub use recommendation::{sort_by_score_desc, Recommendation, RecommendationMethod};
pub use snapshot::Snapshot;

pub type UserId = i64;
