// src/core/table.rs
//! In-memory CSV table used for raw, processed and market data files

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use super::FsOps;

/// Header row plus string cells, one `Vec` per record.
///
/// Records shorter than the header are padded with empty cells so every row
/// has exactly `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn read_csv(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
        Self::from_reader(file)
            .with_context(|| format!("Failed to parse CSV file: {}", path.display()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .headers()
            .context("Failed to read CSV header row")?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("Malformed CSV record {}", line + 1))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self::new(headers, rows))
    }

    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(&self.headers)
            .context("Failed to write CSV header")?;
        for row in &self.rows {
            writer.write_record(row).context("Failed to write CSV record")?;
        }
        writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e))
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let bytes = self.to_csv_bytes()?;
        FsOps::write_file_atomic(path, &bytes)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cells of the named column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    pub fn map_headers<F: FnMut(&str) -> String>(&mut self, mut f: F) {
        for header in self.headers.iter_mut() {
            *header = f(header);
        }
    }

    pub fn retain_rows<F: FnMut(&[String]) -> bool>(&mut self, mut f: F) {
        self.rows.retain(|row| f(row));
    }

    pub fn rows_mut(&mut self) -> &mut [Vec<String>] {
        &mut self.rows
    }

    /// First row whose cell in `column` satisfies `matches`
    pub fn find_row<F: Fn(&str) -> bool>(&self, column: &str, matches: F) -> Option<&[String]> {
        let idx = self.column_index(column)?;
        self.rows
            .iter()
            .find(|row| matches(&row[idx]))
            .map(|row| row.as_slice())
    }
}
