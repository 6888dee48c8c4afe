//! Catalog Index — the immutable job records plus their title vectors.
//!
//! Built once before the server binds and shared read-only via `Arc` afterwards.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::errors::CatalogError;
use crate::models::job::JobRecord;
use crate::recommend::loader::load_jobs;
use crate::recommend::tfidf::{SparseVector, TfidfModel};

#[derive(Debug)]
pub struct CatalogIndex {
    jobs: Vec<JobRecord>,
    model: TfidfModel,
    /// `vectors[i]` belongs to `jobs[i]`.
    vectors: Vec<SparseVector>,
    loaded_at: DateTime<Utc>,
}

impl CatalogIndex {
    /// Fits the title model over the whole catalog.
    pub fn build(jobs: Vec<JobRecord>) -> Result<Self, CatalogError> {
        if jobs.is_empty() {
            return Err(CatalogError::Empty);
        }

        let titles: Vec<&str> = jobs.iter().map(|j| j.title.as_str()).collect();
        let (model, vectors) = TfidfModel::fit(&titles);
        if model.vocabulary_size() == 0 {
            return Err(CatalogError::EmptyVocabulary);
        }

        info!(
            "Catalog index built: {} jobs, vocabulary of {} terms",
            jobs.len(),
            model.vocabulary_size()
        );

        Ok(Self {
            jobs,
            model,
            vectors,
            loaded_at: Utc::now(),
        })
    }

    /// Loads the CSV at `path` and builds the index from it.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        Self::build(load_jobs(path)?)
    }

    pub fn job(&self, index: usize) -> &JobRecord {
        &self.jobs[index]
    }

    pub fn vector(&self, index: usize) -> &SparseVector {
        &self.vectors[index]
    }

    pub fn vectorize(&self, text: &str) -> SparseVector {
        self.model.vectorize(text)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.model.vocabulary_size()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Row indices of jobs whose personality equals `personality` exactly, in catalog order.
    pub fn indices_with_personality<'a>(
        &'a self,
        personality: &'a str,
    ) -> impl Iterator<Item = usize> + 'a {
        self.jobs
            .iter()
            .enumerate()
            .filter(move |(_, job)| job.personality == personality)
            .map(|(index, _)| index)
    }

    /// Distinct personality labels, sorted.
    pub fn personalities(&self) -> Vec<String> {
        self.jobs
            .iter()
            .map(|j| j.personality.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
