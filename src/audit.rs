//! Audit orchestration.
//!
//! [`run_audit`] drives one run after the pre-flight checks have passed:
//!
//! 1. Lists every repository of the organization (all pages, before any
//!    inspection starts).
//! 2. Opens the report; nothing is created if listing fails.
//! 3. For each repository, in listing order, fetches the protection rule
//!    and the admin list, writes a row, and prints a progress line.
//!
//! A failure while inspecting a repository aborts the run; the rows written
//! up to that point stay in the report.

use crate::error::Result;
use crate::github::{GitHubClient, Transport};
use crate::rate_limit::Clock;
use crate::report::{format_bool, ReportRow, ReportWriter};
use std::io::Write;

/// Counts gathered over a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditSummary {
    pub repositories: usize,
    pub protected: usize,
    pub unprotected: usize,
}

/// Runs the audit for `org`, writing rows to the report returned by
/// `open_report` and progress lines to `out`.
///
/// # Examples
///
/// ```rust,no_run
/// use branch_protection_audit::{audit, config::{Config, Credentials}, github, report};
/// use std::path::Path;
///
/// # fn main() -> branch_protection_audit::error::Result<()> {
/// let config = Config::default();
/// let creds = Credentials::resolve(Some("ghp_token".into()), Some("acme".into()))?;
/// let transport = github::ReqwestTransport::new(&config.api)?;
/// let client = github::GitHubClient::new(transport, config.api_base(), &creds);
///
/// let summary = audit::run_audit(
///     &client,
///     &creds.org,
///     || report::ReportWriter::create(Path::new("."), &creds.org).map(|(w, _)| w),
///     &mut std::io::stdout(),
/// )?;
/// println!("{} repositories audited", summary.repositories);
/// # Ok(())
/// # }
/// ```
pub fn run_audit<T, C, W, F>(
    client: &GitHubClient<T, C>,
    org: &str,
    open_report: F,
    out: &mut dyn Write,
) -> Result<AuditSummary>
where
    T: Transport,
    C: Clock,
    W: Write,
    F: FnOnce() -> Result<ReportWriter<W>>,
{
    let repositories = client.list_repositories(org)?;
    writeln!(out, "Total Repos: {}", repositories.len())?;

    let mut report = open_report()?;
    let mut summary = AuditSummary {
        repositories: repositories.len(),
        ..AuditSummary::default()
    };

    for repository in repositories {
        let rule = client.branch_protection(org, &repository)?;
        let admins = client.admins(org, &repository)?;

        writeln!(
            out,
            "Repo: {}, Branch: {}, Enabled: {}",
            repository.name,
            repository.default_branch,
            format_bool(rule.enabled)
        )?;
        tracing::info!(
            repo = %repository.name,
            branch = %repository.default_branch,
            enabled = rule.enabled,
            "inspected repository"
        );

        if rule.enabled {
            summary.protected += 1;
        } else {
            summary.unprotected += 1;
        }

        report.write_row(&ReportRow {
            repository,
            rule,
            admins,
        })?;
    }

    Ok(summary)
}
