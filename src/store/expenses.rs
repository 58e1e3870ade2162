//! Dated expense log, persisted as JSON and exportable to CSV.
use super::NumericInput;
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Category ids accepted by the log, with their display names.
pub const EXPENSE_CATEGORIES: [(&str, &str); 10] = [
    ("housing", "Housing"),
    ("food", "Food & Dining"),
    ("transportation", "Transportation"),
    ("utilities", "Utilities"),
    ("entertainment", "Entertainment"),
    ("shopping", "Shopping"),
    ("healthcare", "Healthcare"),
    ("personal", "Personal Care"),
    ("education", "Education"),
    ("other", "Other"),
];

pub fn category_name(id: &str) -> Option<&'static str> {
    EXPENSE_CATEGORIES
        .iter()
        .find(|(key, _)| *key == id)
        .map(|(_, name)| *name)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: i64,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
}

/// On-disk layout: a JSON object keyed by collection name.
#[derive(Debug, Default, Serialize, Deserialize)]
struct LogFile {
    #[serde(default)]
    expenses: Vec<ExpenseEntry>,
}

#[derive(Debug)]
pub struct ExpenseLog {
    path: PathBuf,
    entries: Vec<ExpenseEntry>,
}

impl ExpenseLog {
    /// Opens the log stored at `path`. A missing file is an empty log.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            debug!("No expense log at {}, starting empty", path.display());
            return Ok(Self {
                path,
                entries: Vec::new(),
            });
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read expense log: {}", path.display()))?;
        let file: LogFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse expense log: {}", path.display()))?;
        debug!(count = file.expenses.len(), "Loaded expense log");
        Ok(Self {
            path,
            entries: file.expenses,
        })
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let file = LogFile {
            expenses: self.entries.clone(),
        };
        let content = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write expense log: {}", self.path.display()))?;
        debug!(count = self.entries.len(), "Saved expense log");
        Ok(())
    }

    pub fn entries(&self) -> &[ExpenseEntry] {
        &self.entries
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Appends an entry and returns its id. Ids are creation timestamps in
    /// milliseconds, bumped past the newest existing id when needed.
    pub fn add(
        &mut self,
        amount: impl NumericInput,
        category: &str,
        description: &str,
        date: NaiveDate,
    ) -> Result<i64> {
        if category_name(category).is_none() {
            bail!("Unknown expense category: {category}");
        }
        let now = chrono::Utc::now().timestamp_millis();
        let id = match self.entries.iter().map(|e| e.id).max() {
            Some(max) if max >= now => max + 1,
            _ => now,
        };
        self.entries.push(ExpenseEntry {
            id,
            amount: amount.to_amount(),
            category: category.to_string(),
            description: description.to_string(),
            date,
        });
        debug!(id, category, "Logged expense");
        Ok(id)
    }

    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Writes `Date,Category,Description,Amount` rows in log order.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Date", "Category", "Description", "Amount"])?;
        for entry in &self.entries {
            csv.write_record([
                entry.date.format("%Y-%m-%d").to_string(),
                entry.category.clone(),
                entry.description.clone(),
                entry.amount.to_string(),
            ])?;
        }
        csv.flush().context("Failed to flush CSV output")?;
        Ok(())
    }

    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = fs::File::create(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
        self.write_csv(file)
    }
}
