// src/training/preprocess.rs
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::info;

use super::dataset::{
    normalize_column_name, PostingDate, JOB_TITLE_COLUMN, POSTING_DATE_COLUMN, SKILLS_COLUMN,
};
use crate::config::ArtifactPaths;
use crate::core::Table;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreprocessReport {
    pub rows_read: usize,
    pub dropped_missing: usize,
    pub dropped_duplicates: usize,
    pub dates_nulled: usize,
    pub rows_written: usize,
    pub columns: Vec<String>,
}

/// Cleans the raw skills dataset into the processed training table
pub struct Preprocessor {
    input: PathBuf,
    output: PathBuf,
}

impl Preprocessor {
    pub fn new(paths: &ArtifactPaths) -> Self {
        Self {
            input: paths.raw_data.clone(),
            output: paths.processed_data.clone(),
        }
    }

    pub fn run(&self) -> Result<PreprocessReport> {
        if !self.input.exists() {
            anyhow::bail!(
                "File '{}' not found. Please check the path.",
                self.input.display()
            );
        }

        let table = Table::read_csv(&self.input)?;
        info!(
            "Dataset loaded: {} rows, columns {:?}",
            table.len(),
            table.headers()
        );

        let (cleaned, report) = Self::clean(table)?;
        cleaned
            .write_csv(&self.output)
            .with_context(|| {
                format!("Failed to save processed data to {}", self.output.display())
            })?;

        info!(
            rows_read = report.rows_read,
            dropped_missing = report.dropped_missing,
            dropped_duplicates = report.dropped_duplicates,
            dates_nulled = report.dates_nulled,
            "Preprocessing complete, processed file saved at: {}",
            self.output.display()
        );
        info!(
            "Final dataset shape: ({}, {})",
            report.rows_written,
            report.columns.len()
        );
        Ok(report)
    }

    /// Normalize headers, drop incomplete and duplicate rows, coerce dates.
    ///
    /// Empty or whitespace-only cells count as missing. The first copy of a
    /// duplicated row is kept. Unparseable dates become empty cells.
    pub fn clean(mut table: Table) -> Result<(Table, PreprocessReport)> {
        let mut report = PreprocessReport {
            rows_read: table.len(),
            ..Default::default()
        };

        table.map_headers(normalize_column_name);

        let title_idx = table
            .column_index(JOB_TITLE_COLUMN)
            .ok_or_else(|| missing_column(JOB_TITLE_COLUMN))?;
        let skills_idx = table
            .column_index(SKILLS_COLUMN)
            .ok_or_else(|| missing_column(SKILLS_COLUMN))?;

        let before = table.len();
        table.retain_rows(|row| {
            !row[title_idx].trim().is_empty() && !row[skills_idx].trim().is_empty()
        });
        report.dropped_missing = before - table.len();

        let before = table.len();
        let mut seen = HashSet::new();
        table.retain_rows(|row| seen.insert(row.to_vec()));
        report.dropped_duplicates = before - table.len();

        if let Some(date_idx) = table.column_index(POSTING_DATE_COLUMN) {
            for row in table.rows_mut() {
                let cell = &mut row[date_idx];
                match PostingDate::parse(cell) {
                    Some(date) => *cell = date.to_string(),
                    None => {
                        if !cell.trim().is_empty() {
                            report.dates_nulled += 1;
                        }
                        cell.clear();
                    }
                }
            }
        }

        report.rows_written = table.len();
        report.columns = table.headers().to_vec();
        Ok((table, report))
    }
}

fn missing_column(name: &str) -> anyhow::Error {
    anyhow::anyhow!("'{}' column is missing in the raw dataset", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "\
Job Id , Job Title ,Skills,Job Posting Date,Company
1,Data Scientist,\"python, machine learning\",2023-01-05,Acme
2,Data Scientist,\"python, machine learning\",2023-01-05,Acme
3,,sql,2023-01-06,Initech
4,Web Developer,,2023-01-07,Globex
5,Web Developer,\"html, css\",not a date,Globex
5,Web Developer,\"html, css\",not a date,Globex
6,Data Analyst,\"sql, excel\",,Umbrella
";

    #[test]
    fn test_clean() {
        let table = Table::from_reader(RAW.as_bytes()).unwrap();
        let (cleaned, report) = Preprocessor::clean(table).unwrap();

        assert_eq!(
            cleaned.headers(),
            &["job id", "job title", "skills", "job posting date", "company"]
        );
        assert_eq!(report.rows_read, 7);
        assert_eq!(report.dropped_missing, 2);
        assert_eq!(report.dropped_duplicates, 1);
        assert_eq!(report.dates_nulled, 1);
        assert_eq!(report.rows_written, 4);

        let dates = cleaned.column("job posting date").unwrap();
        assert_eq!(dates, vec!["2023-01-05", "2023-01-05", "", ""]);
    }

    #[test]
    fn test_duplicates_compare_whole_rows() {
        // rows 1 and 2 differ only by job id, so both survive
        let table = Table::from_reader(RAW.as_bytes()).unwrap();
        let (cleaned, _) = Preprocessor::clean(table).unwrap();
        let ids = cleaned.column("job id").unwrap();
        assert_eq!(ids, vec!["1", "2", "5", "6"]);
    }

    #[test]
    fn test_missing_essential_column() {
        let table = Table::from_reader("title,skills\nx,y\n".as_bytes()).unwrap();
        assert!(Preprocessor::clean(table).is_err());
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::rooted_at(dir.path());

        let err = Preprocessor::new(&paths).run().unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert!(!paths.processed_data.exists());
    }

    #[test]
    fn test_run_writes_processed_file() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::rooted_at(dir.path());
        std::fs::create_dir_all(paths.raw_data.parent().unwrap()).unwrap();
        std::fs::write(&paths.raw_data, RAW).unwrap();

        let report = Preprocessor::new(&paths).run().unwrap();
        assert_eq!(report.rows_written, 4);

        let processed = Table::read_csv(&paths.processed_data).unwrap();
        assert_eq!(processed.len(), 4);
        assert_eq!(processed.headers()[1], "job title");
    }
}
