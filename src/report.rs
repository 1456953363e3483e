//! CSV report output.
//!
//! One row per repository, written and flushed immediately so that a run
//! which dies halfway leaves every completed row on disk. Of the twelve
//! extracted protection settings, the report carries six:
//!
//! | Column | Source |
//! |--------|--------|
//! | `repo`, `branch` | [`Repository`] |
//! | `enabled` | [`ProtectionRule::enabled`] |
//! | `Review Count` | `required_approving_review_count` |
//! | `require code owners` | `require_code_owner_reviews` |
//! | `restrictions` | `restrictions` |
//! | `enforce admins` | `enforce_admins` |
//! | `allow deletions` | `allow_deletions` |
//! | `require linear history` | `required_linear_history` |
//! | `admins` | admin logins joined with `"; "` |
//!
//! Booleans are written as `True`/`False`; absent values are empty cells.

use crate::error::Result;
use crate::protection::ProtectionRule;
use crate::repository::Repository;
use chrono::{DateTime, TimeZone};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Header row of every report.
pub const HEADER: [&str; 10] = [
    "repo",
    "branch",
    "enabled",
    "Review Count",
    "require code owners",
    "restrictions",
    "enforce admins",
    "allow deletions",
    "require linear history",
    "admins",
];

/// One repository's line in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub repository: Repository,
    pub rule: ProtectionRule,
    pub admins: String,
}

impl ReportRow {
    /// Cells in [`HEADER`] order.
    pub fn to_record(&self) -> [String; 10] {
        let rule = &self.rule;
        [
            self.repository.name.clone(),
            self.repository.default_branch.clone(),
            format_bool(rule.enabled).to_string(),
            rule.required_approving_review_count
                .map(|n| n.to_string())
                .unwrap_or_default(),
            format_opt_bool(rule.require_code_owner_reviews).to_string(),
            format_opt_bool(rule.restrictions).to_string(),
            format_opt_bool(rule.enforce_admins).to_string(),
            format_opt_bool(rule.allow_deletions).to_string(),
            format_opt_bool(rule.required_linear_history).to_string(),
            self.admins.clone(),
        ]
    }
}

/// Renders a boolean as `True` or `False`.
pub fn format_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn format_opt_bool(value: Option<bool>) -> &'static str {
    value.map(format_bool).unwrap_or("")
}

/// Report file name for `org` at local time `at`:
/// `{org}-{YYYY-MM-DD}_{HH:MM:SS}-branch-protection-report.csv`.
///
/// # Examples
///
/// ```
/// use branch_protection_audit::report::report_file_name;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
/// assert_eq!(
///     report_file_name("acme", &at),
///     "acme-2024-03-09_14:05:07-branch-protection-report.csv"
/// );
/// ```
pub fn report_file_name<Tz: TimeZone>(org: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{org}-{}_{}-branch-protection-report.csv",
        at.format("%Y-%m-%d"),
        at.format("%H:%M:%S")
    )
}

/// Streams report rows to CSV, flushing after every record.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl ReportWriter<File> {
    /// Creates `{dir}/{report_file_name}` for `org` at the current local time.
    ///
    /// Returns the writer together with the path of the created file.
    pub fn create(dir: &Path, org: &str) -> Result<(Self, PathBuf)> {
        let path = dir.join(report_file_name(org, &chrono::Local::now()));
        let file = File::create(&path)?;
        tracing::info!(path = %path.display(), "created report file");
        Ok((ReportWriter::new(file)?, path))
    }
}

impl<W: Write> ReportWriter<W> {
    /// Wraps `inner` and writes the header row.
    pub fn new(inner: W) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_writer(inner);
        writer.write_record(HEADER)?;
        writer.flush()?;
        Ok(ReportWriter { writer })
    }

    /// Appends one row and flushes it to the underlying writer.
    pub fn write_row(&mut self, row: &ReportRow) -> Result<()> {
        self.writer.write_record(row.to_record())?;
        self.writer.flush()?;
        Ok(())
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| crate::error::Error::Io(e.into_error()))
    }
}
