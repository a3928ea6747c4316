//! Course ranking against a vocational-interest profile
//!
//! The query is the student's free-text answers as a term-frequency vector,
//! optionally boosted by keywords from an [`AiProfile`]. Every course becomes a
//! vector of its name and area tokens, and is scored by cosine similarity. When
//! the profile carries area weights, the similarity is blended with the weight
//! of the course's area.

pub mod tokenizer;
pub mod vector;

use crate::core::models::Course;
use crate::core::recommendation::AiProfile;
use serde::{Deserialize, Serialize};
pub use vector::TermVector;

/// Field multipliers and blend ratio used by [`rank_with_weights`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingWeights {
    /// Multiplier applied to AI keyword tokens merged into the query
    pub keyword_boost: f64,
    /// Multiplier applied to course-name tokens
    pub name_weight: f64,
    /// Multiplier applied to course-area tokens
    pub area_weight: f64,
    /// Share of the final score taken by the AI area weight (the rest is similarity)
    pub area_blend: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            keyword_boost: 1.5,
            name_weight: 2.0,
            area_weight: 1.0,
            area_blend: 0.4,
        }
    }
}

/// Anything that can be ranked: an identifier, a display name and a study area
pub trait Rankable {
    /// Identifier reported back in the ranking
    fn id(&self) -> &str;
    /// Name tokens carry the heavier weight
    fn name(&self) -> &str;
    /// Study area; also the key into the profile's area weights
    fn area(&self) -> &str;
}

impl Rankable for Course {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn area(&self) -> &str {
        &self.area
    }
}

/// A course and its relevance score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCourse {
    /// Course identifier
    pub id: String,
    /// Relevance score; higher is better
    pub score: f64,
}

/// Rank courses with the default weights.
///
/// All courses are returned, best first; equal scores keep input order.
#[must_use]
pub fn rank<C: Rankable>(
    query: &str,
    courses: &[C],
    profile: Option<&AiProfile>,
) -> Vec<RankedCourse> {
    rank_with_weights(query, courses, profile, &RankingWeights::default())
}

/// Rank courses with explicit weights.
#[must_use]
pub fn rank_with_weights<C: Rankable>(
    query: &str,
    courses: &[C],
    profile: Option<&AiProfile>,
    weights: &RankingWeights,
) -> Vec<RankedCourse> {
    let query_vec = query_vector(query, profile, weights);

    let mut ranked: Vec<RankedCourse> = courses
        .iter()
        .map(|course| {
            let mut course_vec = TermVector::from_text(course.name(), weights.name_weight);
            course_vec.merge(&TermVector::from_text(course.area(), weights.area_weight));

            let similarity = query_vec.cosine(&course_vec);
            let score = match profile {
                Some(p) if !p.area_weights.is_empty() => {
                    let area_weight = p.area_weight(course.area());
                    similarity.mul_add(1.0 - weights.area_blend, area_weight * weights.area_blend)
                }
                _ => similarity,
            };

            RankedCourse {
                id: course.id().to_string(),
                score,
            }
        })
        .collect();

    // stable: ties keep catalog order
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Query vector from the answers text merged with boosted profile keywords
fn query_vector(query: &str, profile: Option<&AiProfile>, weights: &RankingWeights) -> TermVector {
    let mut vec = TermVector::from_text(query, 1.0);
    if let Some(profile) = profile {
        for keyword in &profile.keywords {
            vec.merge(&TermVector::from_text(keyword, weights.keyword_boost));
        }
    }
    vec
}
