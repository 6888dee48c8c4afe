//! Recommender — personality filter, title similarity, range filter, top-3.
//!
//! Algorithm:
//! 1. Keep jobs whose personality equals the query's exactly (empty → return early)
//! 2. Vectorize `"{personality} {exp.min} {hours.min} {salary.min}"`
//! 3. Cosine similarity against the personality-matching jobs only
//! 4. Drop jobs outside any of the inclusive salary / experience / hours ranges
//! 5. Stable sort by score descending, truncate to 3, materialize

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::job::RecommendedJob;
use crate::recommend::catalog::CatalogIndex;
use crate::recommend::range::{parse_range, Range, RangeInput};

pub const MAX_RECOMMENDATIONS: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Query
// ────────────────────────────────────────────────────────────────────────────

/// A user's preferences with every numeric field normalized to a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserQuery {
    pub personality: String,
    pub work_experience: Range,
    pub work_hours: Range,
    pub salary: Range,
}

impl UserQuery {
    /// Builds a query from a request body.
    ///
    /// Missing or `null` fields are `MissingInput`; numeric fields never fail
    /// and fall back to `(0, 0)` when they hold no usable number.
    pub fn from_json(body: &Value) -> Result<Self, AppError> {
        let object = body
            .as_object()
            .ok_or_else(|| AppError::Validation("request body must be a JSON object".to_string()))?;

        let personality = required(object, "personality")?
            .as_str()
            .ok_or_else(|| AppError::Validation("personality must be a string".to_string()))?
            .to_string();

        let range = |name: &str| -> Result<Range, AppError> {
            let input: RangeInput = serde_json::from_value(required(object, name)?.clone())
                .map_err(|e| AppError::Validation(format!("{name}: {e}")))?;
            Ok(parse_range(&input))
        };

        Ok(Self {
            personality,
            work_experience: range("work_experience")?,
            work_hours: range("work_hours")?,
            salary: range("salary")?,
        })
    }

    /// The text standing in for a title when scoring this query.
    pub fn preference_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.personality, self.work_experience.min, self.work_hours.min, self.salary.min
        )
    }
}

fn required<'a>(object: &'a Map<String, Value>, name: &str) -> Result<&'a Value, AppError> {
    match object.get(name) {
        None | Some(Value::Null) => Err(AppError::MissingInput(name.to_string())),
        Some(value) => Ok(value),
    }
}

/// Presentation order of the selected recommendations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Similarity,
    /// Highest salary first; ties keep similarity order.
    Salary,
}

/// A catalog row that survived both filters, with its similarity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedCandidate {
    pub job_index: usize,
    pub score: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Recommendation
// ────────────────────────────────────────────────────────────────────────────

/// Scores and ranks the candidates for `query`, best first, at most three.
pub fn rank(index: &CatalogIndex, query: &UserQuery) -> Vec<RankedCandidate> {
    info!(
        "Recommendation query: personality={} experience={} hours={} salary={}",
        query.personality, query.work_experience, query.work_hours, query.salary
    );

    let matching: Vec<usize> = index.indices_with_personality(&query.personality).collect();
    if matching.is_empty() {
        info!("No jobs match personality {}", query.personality);
        return Vec::new();
    }
    info!("{} jobs match personality {}", matching.len(), query.personality);

    let text = query.preference_text();
    let preferences = index.vectorize(&text);
    if preferences.is_zero() {
        debug!("Preference text '{text}' shares no terms with catalog titles");
    }

    let mut candidates: Vec<RankedCandidate> = matching
        .into_iter()
        .map(|job_index| RankedCandidate {
            job_index,
            score: preferences.cosine(index.vector(job_index)),
        })
        .filter(|candidate| {
            let job = index.job(candidate.job_index);
            query.salary.contains(job.salary)
                && query.work_experience.contains(job.experience())
                && query.work_hours.contains(job.hours())
        })
        .collect();

    // Stable: equal scores keep catalog order.
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates.truncate(MAX_RECOMMENDATIONS);
    candidates
}

/// Returns up to three jobs for `query`, ordered per `order`.
pub fn recommend(index: &CatalogIndex, query: &UserQuery, order: SortOrder) -> Vec<RecommendedJob> {
    let mut jobs: Vec<RecommendedJob> = rank(index, query)
        .into_iter()
        .map(|candidate| {
            let job = RecommendedJob::from(index.job(candidate.job_index));
            debug!(
                "Recommended '{}' (salary {}, score {:.4})",
                job.title, job.salary, candidate.score
            );
            job
        })
        .collect();

    if order == SortOrder::Salary {
        jobs.sort_by(|a, b| b.salary.cmp(&a.salary));
    }
    jobs
}
