use crate::types::evidence::CommitRecord;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::path::Path;
use std::process::Command;
use std::sync::LazyLock;

static HOSTED_REPO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"github\.com[/:]([^/]+/[^/]+?)(?:\.git)?/?$")
        .expect("remote url pattern must compile")
});

const FIELD_SEP: char = '\u{1f}';
const RECORD_SEP: char = '\u{1e}';

/// Most recent commits, newest first, capped at `window`. Anything that
/// prevents reading history yields an empty list.
pub fn recent_commits(root: &Path, window: usize) -> Vec<CommitRecord> {
    let output = match Command::new("git")
        .arg("-C")
        .arg(root)
        .arg("log")
        .arg("-n")
        .arg(window.to_string())
        .arg("--format=%aI%x1f%B%x1e")
        .output()
    {
        Ok(output) => output,
        Err(error) => {
            tracing::warn!(%error, "git is unavailable; commit history skipped");
            return Vec::new();
        }
    };

    if !output.status.success() {
        tracing::warn!(
            path = %root.display(),
            "git log failed; treating repository as having no commits"
        );
        return Vec::new();
    }

    parse_log(&String::from_utf8_lossy(&output.stdout))
}

/// `owner/repo` of the `origin` remote when it points at GitHub.
pub fn origin_full_name(root: &Path) -> Option<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(root)
        .args(["remote", "get-url", "origin"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    parse_remote(String::from_utf8_lossy(&output.stdout).trim())
}

fn parse_remote(url: &str) -> Option<String> {
    HOSTED_REPO
        .captures(url.trim())
        .and_then(|captures| captures.get(1))
        .map(|full_name| full_name.as_str().to_string())
}

fn parse_log(stdout: &str) -> Vec<CommitRecord> {
    stdout
        .split(RECORD_SEP)
        .filter_map(|record| {
            let record = record.trim_start_matches('\n');
            let (date, message) = record.split_once(FIELD_SEP)?;
            let date = DateTime::parse_from_rfc3339(date.trim()).ok()?;
            Some(CommitRecord {
                message: message.trim_end().to_string(),
                date: date.with_timezone(&Utc),
            })
        })
        .collect()
}
