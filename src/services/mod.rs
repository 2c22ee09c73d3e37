use std::collections::HashSet;

use crate::models::{CourseId, Snapshot, UserId, UserProfile};

pub mod blender;
pub mod collaborative;
pub mod content;
pub mod diversity;
pub mod profile;
pub mod recommendations;

pub use blender::BlendWeights;
pub use collaborative::CollaborativeScorer;
pub use content::ContentScorer;
pub use diversity::{DiversitySource, NoDiversity, SeededDiversity, UniformDiversity};
pub use recommendations::RecommendationService;

/// Everything a scorer needs for one request, derived once up front
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub user_id: UserId,
    pub snapshot: &'a Snapshot,
    pub profile: &'a UserProfile,
    pub taken: &'a HashSet<CourseId>,
    pub limit: usize,
}
