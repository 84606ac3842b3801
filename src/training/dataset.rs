// src/training/dataset.rs
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

use crate::core::Table;

pub const JOB_TITLE_COLUMN: &str = "job title";
pub const SKILLS_COLUMN: &str = "skills";
pub const JOB_ID_COLUMN: &str = "job id";
pub const POSTING_DATE_COLUMN: &str = "job posting date";

/// One cleaned training row
#[derive(Debug, Clone, PartialEq)]
pub struct SkillRecord {
    pub skills: String,
    pub job_title: String,
    pub job_id: Option<String>,
    pub posting_date: Option<PostingDate>,
}

/// Posting date, keeping whether the source carried a time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostingDate {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

impl PostingDate {
    /// Parse a date cell, `None` when no known format matches
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Some(date) = DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        {
            return Some(Self::Date(date));
        }

        if let Some(datetime) = DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        {
            return Some(Self::DateTime(datetime));
        }

        chrono::DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| Self::DateTime(dt.naive_utc()))
    }
}

impl fmt::Display for PostingDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// Lower-case and trim a column name
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone, Default)]
pub struct SkillDataset {
    records: Vec<SkillRecord>,
}

impl SkillDataset {
    /// Load the processed dataset written by the preprocessor
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Processed dataset '{}' not found. Run the preprocess step first.",
                path.display()
            );
        }

        let table = Table::read_csv(path)?;
        let dataset = Self::from_table(table)
            .with_context(|| format!("Invalid dataset: {}", path.display()))?;

        info!("Dataset loaded: {} records from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    pub fn from_table(mut table: Table) -> Result<Self> {
        table.map_headers(normalize_column_name);

        let title_idx = table
            .column_index(JOB_TITLE_COLUMN)
            .ok_or_else(|| anyhow::anyhow!("'{}' column is missing", JOB_TITLE_COLUMN))?;
        let skills_idx = table
            .column_index(SKILLS_COLUMN)
            .ok_or_else(|| anyhow::anyhow!("'{}' column is missing", SKILLS_COLUMN))?;
        let id_idx = table.column_index(JOB_ID_COLUMN);
        let date_idx = table.column_index(POSTING_DATE_COLUMN);

        let mut records = Vec::with_capacity(table.len());
        let mut skipped = 0usize;
        for row in table.rows() {
            let job_title = row[title_idx].trim();
            let skills = row[skills_idx].trim();
            if job_title.is_empty() || skills.is_empty() {
                skipped += 1;
                continue;
            }

            records.push(SkillRecord {
                skills: skills.to_string(),
                job_title: job_title.to_string(),
                job_id: id_idx
                    .map(|i| row[i].trim().to_string())
                    .filter(|id| !id.is_empty()),
                posting_date: date_idx.and_then(|i| PostingDate::parse(&row[i])),
            });
        }

        if skipped > 0 {
            warn!("Skipped {} rows with an empty job title or skills", skipped);
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[SkillRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.skills.as_str())
    }

    pub fn job_titles(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.job_title.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dates() {
        assert_eq!(
            PostingDate::parse("2023-04-01").unwrap().to_string(),
            "2023-04-01"
        );
        assert_eq!(
            PostingDate::parse("04/01/2023").unwrap().to_string(),
            "2023-04-01"
        );
        assert_eq!(
            PostingDate::parse("2023-04-01 09:30:00").unwrap().to_string(),
            "2023-04-01 09:30:00"
        );
        assert_eq!(
            PostingDate::parse("2023-04-01T09:30:00+00:00").unwrap().to_string(),
            "2023-04-01 09:30:00"
        );
        assert_eq!(PostingDate::parse("next tuesday"), None);
        assert_eq!(PostingDate::parse("2023-02-30"), None);
        assert_eq!(PostingDate::parse(""), None);
    }

    #[test]
    fn test_from_table_normalizes_headers() {
        let csv = " Job Title ,SKILLS,Job Id\n\
                   Data Analyst,\"sql, excel\",3\n,python,4\nChef,  ,5\n";
        let table = Table::from_reader(csv.as_bytes()).unwrap();
        let dataset = SkillDataset::from_table(table).unwrap();

        assert_eq!(dataset.len(), 1);
        let record = &dataset.records()[0];
        assert_eq!(record.job_title, "Data Analyst");
        assert_eq!(record.skills, "sql, excel");
        assert_eq!(record.job_id.as_deref(), Some("3"));
        assert_eq!(record.posting_date, None);
    }

    #[test]
    fn test_missing_title_column() {
        let table = Table::from_reader("skills,title\npython,x\n".as_bytes()).unwrap();
        let err = SkillDataset::from_table(table).unwrap_err();
        assert!(err.to_string().contains("job title"));
    }
}
