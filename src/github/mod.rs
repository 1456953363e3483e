//! GitHub REST API access.
//!
//! [`Transport`] is the seam between the audit and the network: the binary
//! uses [`ReqwestTransport`], tests substitute a scripted implementation.
//! [`GitHubClient`] layers authentication, rate-limit backoff and the five
//! endpoints the audit consumes on top of it.

pub mod client;
pub mod transport;

pub use client::GitHubClient;
pub use transport::{HttpResponse, ReqwestTransport, Transport};
