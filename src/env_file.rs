//! Optional `.env` file.
//!
//! The file is looked up in the working directory and its parents. Values
//! never override variables already set in the process environment, so the
//! precedence is flag > process environment > `.env`.
//!
//! A line `dotenvy` cannot parse is skipped and reported; the remaining
//! lines still load. `dotenvy`'s own loader stops at the first bad line,
//! which would silently drop any credentials defined after it.

use crate::error::Result;
use std::path::{Path, PathBuf};

pub const FILE_NAME: &str = ".env";

/// A line that was not loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line: usize,
    pub reason: String,
}

/// Parsed contents of an environment file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    pub vars: Vec<(String, String)>,
    pub skipped: Vec<SkippedLine>,
}

impl EnvFile {
    /// Parses `content` with `dotenvy`'s grammar.
    ///
    /// A clean file is parsed as a whole, which keeps multi-line quoted
    /// values and `${VAR}` references to earlier lines. If any line fails,
    /// the file is parsed again line by line so that only the bad lines are
    /// lost.
    ///
    /// # Examples
    ///
    /// ```
    /// use branch_protection_audit::env_file::EnvFile;
    ///
    /// let file = EnvFile::parse("NOTE=it's fine\nORG_NAME=acme\n");
    /// assert_eq!(file.vars, vec![("ORG_NAME".to_string(), "acme".to_string())]);
    /// assert_eq!(file.skipped[0].line, 1);
    /// ```
    pub fn parse(content: &str) -> Self {
        let whole: std::result::Result<Vec<_>, _> =
            dotenvy::from_read_iter(content.as_bytes()).collect();
        if let Ok(vars) = whole {
            return EnvFile {
                vars,
                skipped: Vec::new(),
            };
        }

        let mut file = EnvFile::default();
        for (index, line) in content.lines().enumerate() {
            for item in dotenvy::from_read_iter(line.as_bytes()) {
                match item {
                    Ok(pair) => file.vars.push(pair),
                    Err(e) => file.skipped.push(SkippedLine {
                        line: index + 1,
                        reason: e.to_string(),
                    }),
                }
            }
        }
        file
    }

    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(EnvFile::parse(&content))
    }

    /// Exports every variable that is not already set in the process
    /// environment. Call before any other thread is started.
    pub fn apply(&self) {
        for (key, value) in &self.vars {
            if std::env::var_os(key).is_none() {
                std::env::set_var(key, value);
            }
        }
    }
}

/// Finds the nearest `.env` file in `start` or one of its ancestors.
pub fn find(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(FILE_NAME))
        .find(|path| path.is_file())
}
