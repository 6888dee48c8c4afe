use serde::Serialize;

use crate::recommend::range::extract_numeric;

/// One row of the job catalog. Its position in the catalog is its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub title: String,
    pub personality: String,
    /// Descriptive text such as "5 years"; read through [`JobRecord::experience`].
    pub work_experience: String,
    /// Same rule as `work_experience`.
    pub work_hours: String,
    pub salary: i64,
}

impl JobRecord {
    pub fn experience(&self) -> i64 {
        extract_numeric(&self.work_experience)
    }

    pub fn hours(&self) -> i64 {
        extract_numeric(&self.work_hours)
    }
}

/// A job as returned to the caller, with experience and hours already extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendedJob {
    pub title: String,
    pub salary: i64,
    pub personality: String,
    pub work_experience: i64,
    pub work_hours: i64,
}

impl From<&JobRecord> for RecommendedJob {
    fn from(job: &JobRecord) -> Self {
        Self {
            title: job.title.clone(),
            salary: job.salary,
            personality: job.personality.clone(),
            work_experience: job.experience(),
            work_hours: job.hours(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(experience: &str, hours: &str) -> JobRecord {
        JobRecord {
            title: "Data Analyst".to_string(),
            personality: "INTJ".to_string(),
            work_experience: experience.to_string(),
            work_hours: hours.to_string(),
            salary: 60_000,
        }
    }

    #[test]
    fn test_numeric_fields_are_extracted() {
        let record = job("3 years", "40 hrs/week");
        assert_eq!(record.experience(), 3);
        assert_eq!(record.hours(), 40);
    }

    #[test]
    fn test_non_numeric_fields_read_as_zero() {
        let record = job("entry level", "flexible");
        assert_eq!(record.experience(), 0);
        assert_eq!(record.hours(), 0);
    }

    #[test]
    fn test_recommended_job_materializes_extracted_values() {
        let recommended = RecommendedJob::from(&job("5 years", "40"));
        assert_eq!(
            recommended,
            RecommendedJob {
                title: "Data Analyst".to_string(),
                salary: 60_000,
                personality: "INTJ".to_string(),
                work_experience: 5,
                work_hours: 40,
            }
        );
    }
}
