use branch_protection_audit::env_file::{find, EnvFile};

fn pair(k: &str, v: &str) -> (String, String) {
    (k.to_string(), v.to_string())
}

#[test]
fn clean_file_loads_every_variable() {
    let file = EnvFile::parse("# credentials\nGITHUB_TOKEN=abc\n\nexport ORG_NAME=\"acme\"\n");

    assert_eq!(file.vars, vec![pair("GITHUB_TOKEN", "abc"), pair("ORG_NAME", "acme")]);
    assert!(file.skipped.is_empty());
}

#[test]
fn bad_line_is_skipped_and_later_lines_still_load() {
    let file = EnvFile::parse("NOTE=it's fine\nGITHUB_TOKEN=abc\nORG_NAME=acme\n");

    assert_eq!(file.vars, vec![pair("GITHUB_TOKEN", "abc"), pair("ORG_NAME", "acme")]);
    assert_eq!(file.skipped.len(), 1);
    assert_eq!(file.skipped[0].line, 1);
}

#[test]
fn bad_line_in_the_middle_keeps_both_sides() {
    let file = EnvFile::parse("GITHUB_TOKEN=abc\nthis is not an assignment\nORG_NAME=acme\n");

    assert_eq!(file.vars, vec![pair("GITHUB_TOKEN", "abc"), pair("ORG_NAME", "acme")]);
    assert_eq!(file.skipped[0].line, 2);
}

#[test]
fn find_walks_up_to_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    std::fs::create_dir_all(&nested).unwrap();
    std::fs::write(dir.path().join(".env"), "ORG_NAME=acme\n").unwrap();

    assert_eq!(find(&nested), Some(dir.path().join(".env")));
}

#[test]
fn read_parses_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    std::fs::write(&path, "ORG_NAME=acme\n").unwrap();

    let file = EnvFile::read(&path).unwrap();
    assert_eq!(file.vars, vec![pair("ORG_NAME", "acme")]);
}
