//! CSV loading for the job catalog.

use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::errors::CatalogError;
use crate::models::job::JobRecord;

const REQUIRED_COLUMNS: [&str; 5] = [
    "title",
    "personality",
    "work_experience",
    "work_hours",
    "salary",
];

/// Reads every job from the CSV file at `path`.
pub fn load_jobs(path: impl AsRef<Path>) -> Result<Vec<JobRecord>, CatalogError> {
    let path = path.as_ref();
    info!("Loading job catalog from {}", path.display());
    let file = std::fs::File::open(path)
        .map_err(|e| CatalogError::Csv(csv::Error::from(e)))?;
    read_jobs(file)
}

/// Reads jobs from any CSV source with a header row.
/// Extra columns are ignored and column order does not matter.
pub fn read_jobs<R: Read>(source: R) -> Result<Vec<JobRecord>, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let mut positions = [0usize; 5];
    for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == column)
            .ok_or(CatalogError::MissingColumn(column))?;
    }
    let [title, personality, experience, hours, salary] = positions;

    let mut jobs = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = i + 1;
        let field = |pos: usize| record.get(pos).unwrap_or_default().to_string();

        jobs.push(JobRecord {
            title: field(title),
            personality: field(personality),
            work_experience: field(experience),
            work_hours: field(hours),
            salary: parse_salary(&field(salary), row)?,
        });
    }

    if jobs.is_empty() {
        return Err(CatalogError::Empty);
    }

    info!("Loaded {} jobs", jobs.len());
    Ok(jobs)
}

// Spreadsheet exports often write integral salaries as `60000.0`.
fn parse_salary(value: &str, row: usize) -> Result<i64, CatalogError> {
    if let Ok(salary) = value.parse::<i64>() {
        return Ok(salary);
    }
    match value.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
        _ => Err(CatalogError::InvalidSalary {
            row,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
title,personality,work_experience,work_hours,salary
Data Analyst,INTJ,3 years,40,60000
Data Scientist,INTJ,5 years,40,90000
";

    #[test]
    fn test_reads_rows_in_order() {
        let jobs = read_jobs(SAMPLE.as_bytes()).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "Data Analyst");
        assert_eq!(jobs[0].work_experience, "3 years");
        assert_eq!(jobs[1].salary, 90_000);
    }

    #[test]
    fn test_column_order_and_extra_columns() {
        let csv = "\
salary,id,title , personality,work_hours,work_experience
 75000 ,7,  Nurse ,ISFJ,36 hrs,2 years
";
        let jobs = read_jobs(csv.as_bytes()).unwrap();
        assert_eq!(
            jobs[0],
            JobRecord {
                title: "Nurse".to_string(),
                personality: "ISFJ".to_string(),
                work_experience: "2 years".to_string(),
                work_hours: "36 hrs".to_string(),
                salary: 75_000,
            }
        );
    }

    #[test]
    fn test_integral_float_salary_is_accepted() {
        let csv = "title,personality,work_experience,work_hours,salary\nNurse,ISFJ,2,36,60000.0\n";
        assert_eq!(read_jobs(csv.as_bytes()).unwrap()[0].salary, 60_000);
    }

    #[test]
    fn test_bad_salary_names_the_row() {
        let csv = "title,personality,work_experience,work_hours,salary\n\
                   Nurse,ISFJ,2,36,60000\n\
                   Pilot,ESTP,8,45,lots\n";
        match read_jobs(csv.as_bytes()) {
            Err(CatalogError::InvalidSalary { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "lots");
            }
            other => panic!("expected InvalidSalary, got {other:?}"),
        }
    }

    #[test]
    fn test_fractional_salary_is_rejected() {
        let csv = "title,personality,work_experience,work_hours,salary\nNurse,ISFJ,2,36,600.5\n";
        assert!(matches!(
            read_jobs(csv.as_bytes()),
            Err(CatalogError::InvalidSalary { row: 1, .. })
        ));
    }

    #[test]
    fn test_missing_column() {
        let csv = "title,personality,work_experience,salary\nNurse,ISFJ,2,60000\n";
        assert!(matches!(
            read_jobs(csv.as_bytes()),
            Err(CatalogError::MissingColumn("work_hours"))
        ));
    }

    #[test]
    fn test_header_only_is_empty() {
        let csv = "title,personality,work_experience,work_hours,salary\n";
        assert!(matches!(read_jobs(csv.as_bytes()), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_short_row_fails() {
        let csv = "title,personality,work_experience,work_hours,salary\nNurse,ISFJ,2\n";
        assert!(matches!(read_jobs(csv.as_bytes()), Err(CatalogError::Csv(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let jobs = load_jobs(file.path()).unwrap();
        assert_eq!(jobs.len(), 2);
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_jobs(dir.path().join("absent.csv")),
            Err(CatalogError::Csv(_))
        ));
    }
}
