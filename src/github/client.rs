//! Authenticated GitHub REST client.
//!
//! All requests are sequential and blocking. [`GitHubClient::get_json`] is
//! the rate-limited helper every data endpoint goes through; the two
//! pre-flight checks ([`GitHubClient::validate_token`] and
//! [`GitHubClient::validate_org`]) are single attempts.

use super::transport::{HttpResponse, Transport};
use crate::config::Credentials;
use crate::error::{Error, Result};
use crate::protection::{BranchProtection, ProtectionRule};
use crate::rate_limit::{self, Clock, RetryPolicy, SystemClock};
use crate::repository::{join_logins, Collaborator, Repository};
use serde::de::DeserializeOwned;

/// Page size used when listing organization repositories.
pub const REPOS_PER_PAGE: u32 = 100;

/// Client for the endpoints the audit consumes.
///
/// The configuration a run needs (API root, token, backoff policy) lives in
/// the client itself; nothing is process-global.
pub struct GitHubClient<T, C = SystemClock> {
    transport: T,
    clock: C,
    policy: RetryPolicy,
    base_url: String,
    token: String,
}

impl<T: Transport> GitHubClient<T, SystemClock> {
    /// Creates a client using the system clock and an unbounded retry policy.
    pub fn new(transport: T, base_url: &str, credentials: &Credentials) -> Self {
        GitHubClient {
            transport,
            clock: SystemClock,
            policy: RetryPolicy::unbounded(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: credentials.token.clone(),
        }
    }
}

impl<T: Transport, C: Clock> GitHubClient<T, C> {
    /// Replaces the clock used for rate-limit waits.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> GitHubClient<T, C2> {
        GitHubClient {
            transport: self.transport,
            clock,
            policy: self.policy,
            base_url: self.base_url,
            token: self.token,
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Absolute URL for an API path such as `/user`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Performs a single authenticated GET.
    fn send(&self, url: &str) -> Result<HttpResponse> {
        let authorization = format!("token {}", self.token);
        let headers = [
            ("Authorization", authorization.as_str()),
            ("Accept", "application/vnd.github+json"),
        ];
        let response = self.transport.get(url, &headers)?;
        tracing::debug!(url, status = response.status, "GET");
        Ok(response)
    }

    /// Performs a single authenticated GET and fails on any non-2xx status.
    fn get_checked(&self, url: &str) -> Result<HttpResponse> {
        let response = self.send(url)?;
        check_status(url, response)
    }

    /// Authenticated GET returning the decoded JSON body.
    ///
    /// A `403` carrying an `X-RateLimit-Reset` header is not an error: the
    /// helper blocks until the advertised reset time and retries the same
    /// URL, for as long as the [`RetryPolicy`] allows (by default forever).
    /// Any other non-2xx status is returned as [`Error::Http`] without retry.
    ///
    /// # Errors
    ///
    /// - [`Error::Http`] for a non-2xx response (including a `403` without a
    ///   reset header).
    /// - [`Error::RateLimitExhausted`] when a bounded policy runs out.
    /// - [`Error::Transport`] / [`Error::Decode`] for network or body failures.
    pub fn get_json<D: DeserializeOwned>(&self, url: &str) -> Result<D> {
        let mut waits = 0u32;
        loop {
            let response = self.send(url)?;

            if response.status == 403 {
                if let Some(reset) = reset_time(&response) {
                    if !self.policy.allows(waits) {
                        return Err(Error::RateLimitExhausted {
                            url: url.to_string(),
                            waits,
                        });
                    }
                    waits += 1;
                    match rate_limit::wait_until_reset(reset, self.clock.now()) {
                        Some(wait) => {
                            tracing::warn!(
                                url,
                                wait_secs = wait.as_secs_f64(),
                                "rate limited, waiting for reset"
                            );
                            self.clock.sleep(wait);
                        }
                        None => tracing::debug!(url, "rate limit already reset, retrying"),
                    }
                    continue;
                }
            }

            let response = check_status(url, response)?;
            return response.json().map_err(|source| Error::Decode {
                url: url.to_string(),
                source,
            });
        }
    }

    /// Confirms the token authenticates (`GET /user`).
    pub fn validate_token(&self) -> Result<()> {
        self.get_checked(&self.url("/user")).map(|_| ())
    }

    /// Confirms the organization exists and is visible (`GET /orgs/{org}`).
    pub fn validate_org(&self, org: &str) -> Result<()> {
        self.get_checked(&self.url(&format!("/orgs/{org}")))
            .map(|_| ())
    }

    /// Lists every repository of `org`, in listing order.
    ///
    /// Pages of [`REPOS_PER_PAGE`] are requested starting at page 1 until a
    /// page comes back empty.
    pub fn list_repositories(&self, org: &str) -> Result<Vec<Repository>> {
        let mut repositories = Vec::new();
        let mut page = 1u32;
        loop {
            let url = self.url(&format!(
                "/orgs/{org}/repos?per_page={REPOS_PER_PAGE}&page={page}"
            ));
            let batch: Vec<Repository> = self.get_json(&url)?;
            if batch.is_empty() {
                break;
            }
            tracing::debug!(page, count = batch.len(), "fetched repository page");
            repositories.extend(batch);
            page += 1;
        }
        Ok(repositories)
    }

    /// Protection state of the repository's default branch.
    ///
    /// A `404` means the branch carries no protection and yields
    /// [`ProtectionRule::not_configured`]. Any other error is returned.
    pub fn branch_protection(&self, org: &str, repo: &Repository) -> Result<ProtectionRule> {
        let url = self.url(&format!(
            "/repos/{org}/{}/branches/{}/protection",
            repo.name, repo.default_branch
        ));
        match self.get_json::<BranchProtection>(&url) {
            Ok(protection) => Ok(ProtectionRule::from_protection(&protection)),
            Err(e) if e.is_not_found() => Ok(ProtectionRule::not_configured()),
            Err(e) => Err(e),
        }
    }

    /// Logins of the repository's admin collaborators, joined with `"; "`.
    ///
    /// Only the first page of collaborators is read.
    pub fn admins(&self, org: &str, repo: &Repository) -> Result<String> {
        let url = self.url(&format!(
            "/repos/{org}/{}/collaborators?permission=admin",
            repo.name
        ));
        let collaborators: Vec<Collaborator> = self.get_json(&url)?;
        Ok(join_logins(&collaborators))
    }
}

fn reset_time(response: &HttpResponse) -> Option<u64> {
    response
        .header(rate_limit::RESET_HEADER)
        .and_then(|v| v.trim().parse().ok())
}

fn check_status(url: &str, response: HttpResponse) -> Result<HttpResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(Error::Http {
            status: response.status,
            url: url.to_string(),
            body: response.text(),
        })
    }
}
