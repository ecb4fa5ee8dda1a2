use crate::types::evidence::CommitRecord;
use crate::types::scoring::AgentResult;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

static CONVENTIONAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(feat|fix|docs|style|refactor|test|chore|ci|perf)(\(.+\))?:")
        .expect("conventional commit pattern must compile")
});

const MS_PER_DAY: i64 = 86_400_000;
const RECENT_DAYS: i64 = 30;

// Volume thresholds are calibrated against the provider's capped fetch
// window (15 commits), not the repository's full history.
const ACTIVE_VOLUME: usize = 5;
const FULL_WINDOW_VOLUME: usize = 15;

pub fn is_conventional(message: &str) -> bool {
    CONVENTIONAL_PREFIX.is_match(message)
}

/// Whole days between `date` and `now`, rounded up. Future dates yield
/// zero or negative values.
pub fn days_since(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = now.signed_duration_since(date).num_milliseconds();
    let whole = millis.div_euclid(MS_PER_DAY);
    if millis.rem_euclid(MS_PER_DAY) > 0 {
        whole + 1
    } else {
        whole
    }
}

/// Scores commit hygiene. `commits` must be ordered newest-first.
pub fn commit_health_agent(commits: &[CommitRecord], now: DateTime<Utc>) -> AgentResult {
    let Some(newest) = commits.first() else {
        return AgentResult {
            score: 0,
            evidence: "no commit history".to_string(),
        };
    };

    let total = commits.len();
    let conventional = commits
        .iter()
        .filter(|commit| is_conventional(&commit.message))
        .count();
    // conventional / total > 0.30, kept in integers
    let mostly_conventional = conventional * 10 > total * 3;
    let days = days_since(newest.date, now);

    let mut score = 20;
    if mostly_conventional {
        score += 20;
    }
    if days < RECENT_DAYS {
        score += 20;
    }
    if total > ACTIVE_VOLUME {
        score += 20;
    }
    if total >= FULL_WINDOW_VOLUME {
        score += 20;
    }

    let ratio = conventional as f64 / total as f64 * 100.0;
    AgentResult {
        score,
        evidence: format!(
            "Commit count (fetched): {total}. Conventional ratio: {ratio:.0}%. Days since last: {days}."
        ),
    }
}
