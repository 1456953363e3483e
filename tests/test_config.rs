use branch_protection_audit::config::{Config, Credentials, DEFAULT_API_URL};
use branch_protection_audit::error::Error;
use branch_protection_audit::rate_limit::RetryPolicy;
use std::path::PathBuf;

#[test]
fn defaults_target_public_github() {
    let config = Config::default();

    assert_eq!(config.api.base_url, DEFAULT_API_URL);
    assert!(config.api.user_agent.starts_with("branch-protection-audit/"));
    assert_eq!(config.rate_limit.policy(), RetryPolicy::unbounded());
    assert_eq!(config.report.output_dir, PathBuf::from("."));
}

#[test]
fn explicit_missing_file_is_an_error() {
    let err = Config::load(Some(std::path::Path::new("does-not-exist.toml"))).unwrap_err();
    assert!(matches!(err, Error::Config(ref m) if m.contains("not found")));
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audit.toml");
    std::fs::write(
        &path,
        r#"
[api]
base_url = "https://ghe.example.com/api/v3/"

[rate_limit]
max_waits = 3

[report]
output_dir = "reports"
"#,
    )
    .unwrap();

    let config = Config::load(Some(&path)).unwrap();

    assert_eq!(config.api_base(), "https://ghe.example.com/api/v3");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.rate_limit.policy(), RetryPolicy::bounded(3));
    assert_eq!(config.report.output_dir, PathBuf::from("reports"));
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[api\nbase_url = ").unwrap();

    let err = Config::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("failed to parse config"));
}

#[test]
fn credentials_require_token_and_org() {
    assert!(matches!(
        Credentials::resolve(None, None),
        Err(Error::MissingCredentials("token"))
    ));
    assert!(matches!(
        Credentials::resolve(Some("t".into()), None),
        Err(Error::MissingCredentials("organization"))
    ));
    assert!(matches!(
        Credentials::resolve(Some("t".into()), Some(String::new())),
        Err(Error::MissingCredentials("organization"))
    ));
}

#[test]
fn credentials_debug_hides_token() {
    let creds = Credentials::resolve(Some("ghp_secret".into()), Some("acme".into())).unwrap();
    let debug = format!("{creds:?}");

    assert!(!debug.contains("ghp_secret"));
    assert!(debug.contains("acme"));
}

#[test]
fn flag_wins_over_environment() {
    let env = |key: &str| match key {
        "GITHUB_TOKEN" => Some("env-token".to_string()),
        "ORG_NAME" => Some("acme".to_string()),
        _ => None,
    };

    let creds = Credentials::resolve_with(Some("flag-token".into()), Some("other".into()), env)
        .unwrap();

    assert_eq!(creds.token, "flag-token");
    assert_eq!(creds.org, "other");
}

#[test]
fn absent_or_empty_flag_falls_back_to_environment() {
    let env = |key: &str| match key {
        "GITHUB_TOKEN" => Some("env-token".to_string()),
        "ORG_NAME" => Some("acme".to_string()),
        _ => None,
    };

    let creds = Credentials::resolve_with(None, Some(String::new()), env).unwrap();

    assert_eq!(creds.token, "env-token");
    assert_eq!(creds.org, "acme");
}

#[test]
fn empty_flag_without_environment_is_missing() {
    assert!(matches!(
        Credentials::resolve_with(Some("t".into()), Some(String::new()), |_| None),
        Err(Error::MissingCredentials("organization"))
    ));
}
