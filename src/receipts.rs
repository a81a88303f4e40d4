//! Receipt records and the YAML folder loader.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::record::{DetailView, ListRow};
use crate::ui::{display_width, pad_to_width, truncate_to_width};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed receipt {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("receipt {} has date {date:?}, expected [year, month, day]", .path.display())]
    InvalidDate { path: PathBuf, date: Vec<u32> },
}

/// How a receipt was paid: a method name or a card number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Payment {
    Card(u64),
    Method(String),
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payment::Card(number) => write!(f, "card {number}"),
            Payment::Method(method) => f.write_str(method),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Receipt {
    pub store: String,
    #[serde(default)]
    pub short: Option<String>,
    pub date: Vec<u32>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub products: BTreeMap<String, f64>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    #[serde(default)]
    pub payment: Option<Payment>,
}

impl Receipt {
    /// Parse one receipt document. `path` is only used for error reporting.
    pub fn from_yaml(path: &Path, text: &str) -> Result<Self, LoadError> {
        let receipt: Receipt = serde_yaml::from_str(text).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let valid = match receipt.date.as_slice() {
            [_, month, day] => (1..=12).contains(month) && (1..=31).contains(day),
            _ => false,
        };
        if !valid {
            return Err(LoadError::InvalidDate {
                path: path.to_path_buf(),
                date: receipt.date,
            });
        }
        Ok(receipt)
    }

    /// `YYYY-MM-DD`.
    pub fn date_string(&self) -> String {
        match self.date.as_slice() {
            [year, month, day] => format!("{year:04}-{month:02}-{day:02}"),
            _ => String::from("????-??-??"),
        }
    }
}

/// Load every `*.yaml` / `*.yml` file in `dir`, ordered by file name.
///
/// The first unreadable or malformed file aborts the load.
pub fn load_dir(dir: &Path) -> Result<Vec<Receipt>, LoadError> {
    let entries = fs::read_dir(dir).map_err(|source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
        if is_yaml && path.is_file() {
            paths.push(path);
        } else {
            tracing::warn!(path = %path.display(), "skipping non-receipt entry");
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut receipts = Vec::with_capacity(paths.len());
    for path in paths {
        let text = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        receipts.push(Receipt::from_yaml(&path, &text)?);
        tracing::debug!(path = %path.display(), "loaded receipt");
    }
    tracing::info!(dir = %dir.display(), count = receipts.len(), "receipts loaded");
    Ok(receipts)
}

impl ListRow for Receipt {
    fn list_row(&self) -> String {
        format!("{} {}", self.date_string(), self.store)
    }
}

impl DetailView for Receipt {
    fn detail_lines(&self, width: usize) -> Vec<String> {
        let mut lines = vec![
            columns("Store", &self.store, width),
            columns("Date", &self.date_string(), width),
        ];
        if let Some(category) = &self.category {
            lines.push(columns("Category", category, width));
        }
        if let Some(payment) = &self.payment {
            lines.push(columns("Payment", &payment.to_string(), width));
        }
        lines.push(String::new());
        for (name, price) in &self.products {
            lines.push(columns(name, &format!("{price:.2}"), width));
        }
        lines.push(String::new());
        lines.push(columns("Subtotal", &format!("{:.2}", self.subtotal), width));
        lines.push(columns("Tax", &format!("{:.2}", self.tax), width));
        lines.push(columns("Total", &format!("{:.2}", self.total), width));
        lines
    }
}

/// `left` and `right` on one line of exactly `width` columns, `right` flush
/// against the end. The left side gives way first.
fn columns(left: &str, right: &str, width: usize) -> String {
    let right_width = display_width(right);
    if right_width + 1 > width {
        return truncate_to_width(&format!("{left} {right}"), width);
    }
    let left_width = width - right_width - 1;
    format!("{} {}", pad_to_width(left, left_width), right)
}
