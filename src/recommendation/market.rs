// src/recommendation/market.rs
use std::path::Path;
use tracing::{info, warn};

use super::RecommendError;
use crate::core::Table;

pub const JOB_ID_COLUMN: &str = "Job Id";
pub const JOB_TITLE_COLUMN: &str = "Job Title";
pub const SALARY_RANGE_COLUMN: &str = "Salary Range";
pub const DEMAND_LEVEL_COLUMN: &str = "Demand Level";

const RESERVED_COLUMNS: [&str; 4] = [
    JOB_TITLE_COLUMN,
    SALARY_RANGE_COLUMN,
    DEMAND_LEVEL_COLUMN,
    JOB_ID_COLUMN,
];

/// Market metadata joined onto a predicted job title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketInsights {
    pub salary_range: Option<String>,
    pub demand_level: Option<String>,
    /// Every other column of the row, in file order
    pub details: Vec<(String, String)>,
}

/// Read-only market reference table keyed by job id and job title
#[derive(Debug, Clone)]
pub struct MarketData {
    table: Table,
}

impl MarketData {
    pub fn load(path: &Path) -> Result<Self, RecommendError> {
        if !path.exists() {
            return Err(RecommendError::MarketDataNotFound(path.to_path_buf()));
        }

        let table = Table::read_csv(path)
            .map_err(|e| RecommendError::MarketDataUnreadable(format!("{:#}", e)))?;
        let market = Self::from_table(table);

        if !market.has_required_columns() {
            warn!(
                "Market data at {} lacks '{}' or '{}' columns",
                path.display(),
                JOB_ID_COLUMN,
                JOB_TITLE_COLUMN
            );
        }
        info!("Reference data loaded: {} rows", market.table.len());
        Ok(market)
    }

    pub fn from_table(mut table: Table) -> Self {
        table.map_headers(|h| h.trim().to_string());
        Self { table }
    }

    pub fn has_required_columns(&self) -> bool {
        self.table.has_column(JOB_ID_COLUMN) && self.table.has_column(JOB_TITLE_COLUMN)
    }

    /// Title of the first row whose job id equals `class_id`
    pub fn title_for_id(&self, class_id: u32) -> Option<&str> {
        let title_idx = self.table.column_index(JOB_TITLE_COLUMN)?;
        self.table
            .find_row(JOB_ID_COLUMN, |cell| parse_job_id(cell) == Some(class_id as i64))
            .map(|row| row[title_idx].as_str())
    }

    /// Insights from the first row carrying `job_title`
    pub fn insights_for_title(&self, job_title: &str) -> Option<MarketInsights> {
        let row = self.table.find_row(JOB_TITLE_COLUMN, |cell| cell == job_title)?;
        let headers = self.table.headers();
        let cell = |name: &str| {
            self.table
                .column_index(name)
                .map(|idx| row[idx].clone())
        };

        let details = headers
            .iter()
            .zip(row)
            .filter(|(header, _)| !RESERVED_COLUMNS.contains(&header.as_str()))
            .map(|(header, value)| (header.clone(), value.clone()))
            .collect();

        Some(MarketInsights {
            salary_range: cell(SALARY_RANGE_COLUMN),
            demand_level: cell(DEMAND_LEVEL_COLUMN),
            details,
        })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Job ids are integers, possibly written as `3.0` by spreadsheet exports
fn parse_job_id(cell: &str) -> Option<i64> {
    let cell = cell.trim();
    cell.parse::<i64>().ok().or_else(|| {
        cell.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.fract() == 0.0)
            .map(|v| v as i64)
    })
}
