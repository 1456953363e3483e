//! # branch-protection-audit
//!
//! Compliance report of default-branch protection across a GitHub
//! organization.
//!
//! For every repository of the organization the audit records whether the
//! default branch is protected, the main protection settings (required
//! reviews, code owners, restrictions, admin enforcement, deletions, linear
//! history) and the admin collaborators, and writes one CSV row per
//! repository.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use branch_protection_audit::{audit, config::{Config, Credentials}, github, report};
//!
//! # fn main() -> branch_protection_audit::error::Result<()> {
//! let config = Config::load(None)?;
//! let creds = Credentials::resolve(std::env::var("GITHUB_TOKEN").ok(), Some("acme".into()))?;
//! let transport = github::ReqwestTransport::new(&config.api)?;
//! let client = github::GitHubClient::new(transport, config.api_base(), &creds)
//!     .with_retry_policy(config.rate_limit.policy());
//!
//! client.validate_token()?;
//! client.validate_org(&creds.org)?;
//!
//! audit::run_audit(
//!     &client,
//!     &creds.org,
//!     || report::ReportWriter::create(&config.report.output_dir, &creds.org).map(|(w, _)| w),
//!     &mut std::io::stdout(),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! 1. **[`config`]** / **[`env_file`]** — TOML settings, the optional `.env`
//!    file and token/organization resolution.
//! 2. **[`github`]** — transport seam, rate-limited request helper and the
//!    endpoints the audit reads.
//! 3. **[`rate_limit`]** — backoff policy and the clock it waits on.
//! 4. **[`repository`]** / **[`protection`]** — API records and the
//!    flattened [`protection::ProtectionRule`].
//! 5. **[`report`]** — CSV output, flushed row by row.
//! 6. **[`audit`]** — the sequential run tying it all together.

pub mod audit;
pub mod config;
pub mod env_file;
pub mod error;
pub mod github;
pub mod protection;
pub mod rate_limit;
pub mod report;
pub mod repository;
