use crate::utils::error::{ImportError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 每一列至少要有的欄位數 (name, surname, email)
pub const MIN_FIELDS: usize = 3;

/// 預設 email 欄位位置 (第三欄)
pub const DEFAULT_EMAIL_INDEX: usize = 2;

/// One parsed line of the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub line: u64,
    pub fields: Vec<String>,
}

impl Row {
    pub fn new(line: u64, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }
}

/// Header plus every row of one customer file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerBatch {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

/// A domain together with the number of customers using it.
///
/// Only built by the aggregator; fields are read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainCount {
    domain: String,
    count: usize,
}

impl DomainCount {
    pub fn new(domain: impl Into<String>, count: usize) -> Self {
        Self {
            domain: domain.into(),
            count,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl fmt::Display for DomainCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.domain, self.count)
    }
}

/// Where the email address lives in each row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmailColumn {
    Index(usize),
    Header(String),
}

impl Default for EmailColumn {
    fn default() -> Self {
        EmailColumn::Index(DEFAULT_EMAIL_INDEX)
    }
}

impl EmailColumn {
    /// 數字視為位置，其餘視為標題名稱
    pub fn parse(value: &str) -> std::result::Result<Self, String> {
        let value = value.trim();
        if value.is_empty() {
            return Err("email column cannot be empty".to_string());
        }
        Ok(match value.parse::<usize>() {
            Ok(index) => EmailColumn::Index(index),
            Err(_) => EmailColumn::Header(value.to_string()),
        })
    }

    /// Resolves the column to a zero-based position against the header row.
    ///
    /// A position past the last header column is rejected; with no header at
    /// all (empty input) any position is accepted.
    pub fn resolve(&self, headers: &[String]) -> Result<usize> {
        match self {
            EmailColumn::Index(index) if !headers.is_empty() && *index >= headers.len() => {
                Err(ImportError::ColumnOutOfRange {
                    index: *index,
                    columns: headers.len(),
                })
            }
            EmailColumn::Index(index) => Ok(*index),
            EmailColumn::Header(name) => headers
                .iter()
                .position(|h| h == name)
                .or_else(|| headers.iter().position(|h| h.eq_ignore_ascii_case(name)))
                .ok_or_else(|| ImportError::UnknownColumn { name: name.clone() }),
        }
    }
}

impl fmt::Display for EmailColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailColumn::Index(index) => write!(f, "{}", index),
            EmailColumn::Header(name) => write!(f, "{}", name),
        }
    }
}

/// What to do with a row whose email has no `@`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum InvalidAddressPolicy {
    /// Count the row under the empty domain.
    #[default]
    Keep,
    /// Leave the row out of the counts.
    Skip,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformResult {
    pub domain_counts: Vec<DomainCount>,
    pub rows_processed: usize,
    pub invalid_addresses: usize,
    pub rows_skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtlReport {
    pub destination: String,
    pub rows_processed: usize,
    pub invalid_addresses: usize,
    pub rows_skipped: usize,
    pub distinct_domains: usize,
}
