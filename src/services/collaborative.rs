use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::models::{
    sort_by_score_desc, CourseId, Interaction, Recommendation, RecommendationMethod, UserId,
};
use crate::services::content::ContentScorer;
use crate::services::ScoringContext;

/// Ratings at or above this count as a neighbor endorsing a course
pub const LIKED_RATING: u8 = 4;
pub const DEFAULT_NEIGHBOR_COUNT: usize = 3;

const NEIGHBOR_REASON: &str = "Users with similar interests rated this highly";

/// Dense user × course rating matrix.
///
/// Rows and columns are in ascending id order. Repeated (user, course)
/// ratings are averaged into one cell; cells without a rating hold 0.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingMatrix {
    users: Vec<UserId>,
    courses: Vec<CourseId>,
    rows: Vec<Vec<f64>>,
}

impl RatingMatrix {
    pub fn from_interactions(interactions: &[Interaction]) -> Self {
        let mut cells: BTreeMap<UserId, BTreeMap<CourseId, (f64, u32)>> = BTreeMap::new();
        let mut courses = BTreeSet::new();

        for interaction in interactions {
            let cell = cells
                .entry(interaction.user_id)
                .or_default()
                .entry(interaction.course_id)
                .or_insert((0.0, 0));
            cell.0 += f64::from(interaction.rating);
            cell.1 += 1;
            courses.insert(interaction.course_id);
        }

        let courses: Vec<CourseId> = courses.into_iter().collect();
        let mut users = Vec::with_capacity(cells.len());
        let mut rows = Vec::with_capacity(cells.len());

        for (user_id, rated) in cells {
            let row = courses
                .iter()
                .map(|course_id| match rated.get(course_id) {
                    Some(&(sum, count)) => sum / f64::from(count),
                    None => 0.0,
                })
                .collect();
            users.push(user_id);
            rows.push(row);
        }

        Self {
            users,
            courses,
            rows,
        }
    }

    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    pub fn courses(&self) -> &[CourseId] {
        &self.courses
    }

    pub fn row_of(&self, user_id: UserId) -> Option<usize> {
        self.users.binary_search(&user_id).ok()
    }

    pub fn row(&self, index: usize) -> &[f64] {
        &self.rows[index]
    }
}

/// Pairwise cosine similarity between every pair of matrix rows
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    values: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    pub fn from_ratings(ratings: &RatingMatrix) -> Self {
        let n = ratings.users.len();
        let mut values = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in i..n {
                let similarity = cosine_similarity(&ratings.rows[i], &ratings.rows[j]);
                values[i][j] = similarity;
                values[j][i] = similarity;
            }
        }

        Self { values }
    }

    pub fn get(&self, a: usize, b: usize) -> f64 {
        self.values[a][b]
    }

    /// Other rows ranked by similarity to `row`, highest first.
    ///
    /// Equal similarities keep matrix (ascending user id) order.
    pub fn nearest(&self, row: usize, count: usize) -> Vec<(usize, f64)> {
        let mut others: Vec<(usize, f64)> = self.values[row]
            .iter()
            .copied()
            .enumerate()
            .filter(|&(other, _)| other != row)
            .collect();
        others.sort_by(|a, b| b.1.total_cmp(&a.1));
        others.truncate(count);
        others
    }
}

/// Cosine similarity of two equal-length vectors; 0 when either has zero length
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let denominator = norm(a) * norm(b);
    if denominator == 0.0 {
        0.0
    } else {
        dot(a, b) / denominator
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn norm(v: &[f64]) -> f64 {
    dot(v, v).sqrt()
}

/// User-user nearest-neighbor recommender
#[derive(Debug, Clone, Copy)]
pub struct CollaborativeScorer {
    neighbor_count: usize,
}

impl Default for CollaborativeScorer {
    fn default() -> Self {
        Self::new(DEFAULT_NEIGHBOR_COUNT)
    }
}

impl CollaborativeScorer {
    pub fn new(neighbor_count: usize) -> Self {
        Self { neighbor_count }
    }

    /// Recommends courses the closest neighbors rated highly.
    ///
    /// A course's score is the similarity of the first neighbor, in rank
    /// order, who liked it; later neighbors liking the same course do not
    /// change it. Users absent from the rating matrix are scored by
    /// `fallback` instead.
    pub fn score(&self, ctx: &ScoringContext<'_>, fallback: &ContentScorer) -> Vec<Recommendation> {
        let ratings = RatingMatrix::from_interactions(ctx.snapshot.interactions());

        let Some(target) = ratings.row_of(ctx.user_id) else {
            tracing::info!(
                user_id = ctx.user_id,
                cold_start = true,
                "User has no ratings, falling back to content-based scoring"
            );
            return fallback.score(ctx.profile, ctx.snapshot.courses(), ctx.taken, ctx.limit);
        };

        let similarities = SimilarityMatrix::from_ratings(&ratings);
        let neighbors = similarities.nearest(target, self.neighbor_count);

        let mut seen: HashSet<CourseId> = HashSet::new();
        let mut recommendations = Vec::new();

        for &(row, similarity) in &neighbors {
            let neighbor_id = ratings.users()[row];
            let liked = ctx
                .snapshot
                .interactions_for(neighbor_id)
                .filter(|interaction| interaction.rating >= LIKED_RATING);

            for interaction in liked {
                if ctx.taken.contains(&interaction.course_id) || !seen.insert(interaction.course_id)
                {
                    continue;
                }
                if let Some(course) = ctx.snapshot.course(interaction.course_id) {
                    recommendations.push(Recommendation::for_course(
                        course,
                        similarity,
                        NEIGHBOR_REASON.to_string(),
                        RecommendationMethod::Collaborative,
                    ));
                }
            }
        }

        sort_by_score_desc(&mut recommendations);
        recommendations.truncate(ctx.limit);

        tracing::debug!(
            user_id = ctx.user_id,
            matrix_users = ratings.users().len(),
            matrix_courses = ratings.courses().len(),
            neighbors = neighbors.len(),
            returned = recommendations.len(),
            "Collaborative scoring complete"
        );

        recommendations
    }
}
