//! Repository and collaborator records as returned by the GitHub API.
//!
//! Only the fields the audit reads are modelled; serde ignores the rest.

/// Partial repository record from `GET /orgs/{org}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Repository {
    /// Repository name, without the owner prefix.
    pub name: String,
    /// Name of the branch the repository designates as primary.
    pub default_branch: String,
}

/// Partial collaborator record from `GET /repos/{owner}/{repo}/collaborators`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Collaborator {
    /// The user's handle.
    pub login: String,
}

/// Joins collaborator logins with `"; "` in the order they were returned.
///
/// # Examples
///
/// ```
/// use branch_protection_audit::repository::{join_logins, Collaborator};
///
/// let admins = vec![
///     Collaborator { login: "alice".into() },
///     Collaborator { login: "bob".into() },
/// ];
/// assert_eq!(join_logins(&admins), "alice; bob");
/// assert_eq!(join_logins(&[]), "");
/// ```
pub fn join_logins(collaborators: &[Collaborator]) -> String {
    collaborators
        .iter()
        .map(|c| c.login.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
