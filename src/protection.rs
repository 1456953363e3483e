//! Branch protection extraction.
//!
//! [`BranchProtection`] mirrors the (partial) body of
//! `GET /repos/{owner}/{repo}/branches/{branch}/protection`, where every
//! setting is an optional nested object. [`ProtectionRule`] flattens it into
//! twelve optional fields.
//!
//! # Absent versus false
//!
//! Two extraction styles coexist and must not be mixed up:
//!
//! - **Absence-as-null** — most settings are read from a nested object
//!   (`enforce_admins.enabled`, `required_pull_request_reviews.*`, ...). If
//!   the containing object is missing, the field is `None`.
//! - **Presence-as-boolean** — `restrictions` and `required_status_checks`
//!   are `Some(true)` when the object is present and non-empty, and
//!   `Some(false)` otherwise.
//!
//! A branch without any protection ([`ProtectionRule::not_configured`]) has
//! every field `None`, including the two presence-as-boolean ones: "no rule"
//! is reported differently from "rule that disables the setting".

use serde_json::Value;

/// Partial branch protection body as returned by the GitHub API.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct BranchProtection {
    pub required_pull_request_reviews: Option<PullRequestReviews>,
    pub enforce_admins: Option<EnabledSetting>,
    pub restrictions: Option<Value>,
    pub required_status_checks: Option<Value>,
    pub allow_deletions: Option<EnabledSetting>,
    pub allow_force_pushes: Option<EnabledSetting>,
    pub required_conversation_resolution: Option<EnabledSetting>,
    pub lock_branch: Option<EnabledSetting>,
    pub allow_fork_syncing: Option<EnabledSetting>,
    pub required_linear_history: Option<EnabledSetting>,
}

/// The `required_pull_request_reviews` object.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct PullRequestReviews {
    pub required_approving_review_count: Option<u64>,
    pub require_code_owner_reviews: Option<bool>,
    pub require_last_push_approval: Option<bool>,
}

/// A `{ "enabled": bool }` toggle object.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct EnabledSetting {
    pub enabled: Option<bool>,
}

/// Flattened protection state of a repository's default branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtectionRule {
    /// Whether any protection rule exists on the branch.
    pub enabled: bool,
    pub required_approving_review_count: Option<u64>,
    pub require_code_owner_reviews: Option<bool>,
    pub enforce_admins: Option<bool>,
    pub restrictions: Option<bool>,
    pub allow_deletions: Option<bool>,
    pub allow_force_pushes: Option<bool>,
    pub required_conversation_resolution: Option<bool>,
    pub require_last_push_approval: Option<bool>,
    pub required_status_checks: Option<bool>,
    pub lock_branch: Option<bool>,
    pub allow_fork_syncing: Option<bool>,
    pub required_linear_history: Option<bool>,
}

impl ProtectionRule {
    /// Rule for a branch that has no protection configured.
    ///
    /// Every sub-field is `None`; none of them is inferred as `false`.
    pub fn not_configured() -> Self {
        ProtectionRule::default()
    }

    /// Flattens a protection body into a rule with `enabled = true`.
    pub fn from_protection(protection: &BranchProtection) -> Self {
        let reviews = protection.required_pull_request_reviews.as_ref();

        ProtectionRule {
            enabled: true,
            required_approving_review_count: reviews
                .and_then(|r| r.required_approving_review_count),
            require_code_owner_reviews: reviews.and_then(|r| r.require_code_owner_reviews),
            enforce_admins: enabled(&protection.enforce_admins),
            restrictions: Some(is_present(&protection.restrictions)),
            allow_deletions: enabled(&protection.allow_deletions),
            allow_force_pushes: enabled(&protection.allow_force_pushes),
            required_conversation_resolution: enabled(&protection.required_conversation_resolution),
            require_last_push_approval: reviews.and_then(|r| r.require_last_push_approval),
            required_status_checks: Some(is_present(&protection.required_status_checks)),
            lock_branch: enabled(&protection.lock_branch),
            allow_fork_syncing: enabled(&protection.allow_fork_syncing),
            required_linear_history: enabled(&protection.required_linear_history),
        }
    }
}

fn enabled(setting: &Option<EnabledSetting>) -> Option<bool> {
    setting.as_ref().and_then(|s| s.enabled)
}

/// Presence test for settings reported as a boolean: `null`, `false`, zero,
/// and empty strings, arrays or objects all count as absent.
fn is_present(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}
