//! Flat record model shared by extraction and cleaning, plus the per-job
//! status entry. Records serialize with their full field set so every JSONL
//! row carries identical columns.

use serde::{Deserialize, Serialize};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Post,
    Comment,
}

/// One flattened post or comment row.
///
/// Invariant: `parent_id` is `None` if and only if the record is a post.
/// `depth` is 0 for posts and for top-level comments, and grows by exactly 1
/// per reply nesting level.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FlatRecord {
    pub kind_desc: RecordKind,
    /// Job id from the input CSV; carried on posts only.
    pub csv_id: Option<String>,
    pub reddit_id: String,
    /// Owning post id; comments only.
    pub post_id: Option<String>,
    pub parent_id: Option<String>,
    pub author: String,
    /// Posts only.
    pub title: Option<String>,
    pub timestamp_utc: Option<i64>,
    /// `YYYY-MM-DD HH:MM:SS` (UTC) derived from `timestamp_utc`, or `N/A`.
    pub datetime: String,
    pub text: String,
    pub score: i64,
    /// Posts only.
    pub num_comments: Option<i64>,
    pub depth: u32,
}

impl FlatRecord {
    pub fn is_post(&self) -> bool {
        self.parent_id.is_none()
    }
}

const DATETIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Derive the human-readable datetime column from a unix timestamp.
/// Absent or out-of-range timestamps yield `"N/A"`.
pub fn datetime_string(timestamp_utc: Option<i64>) -> String {
    timestamp_utc
        .and_then(|ts| OffsetDateTime::from_unix_timestamp(ts).ok())
        .and_then(|dt| dt.format(&DATETIME_FORMAT).ok())
        .unwrap_or_else(|| "N/A".to_string())
}

/// One row of the job-list CSV (header `SUBREDDIT,ID`).
#[derive(Clone, Debug, Deserialize)]
pub struct SubredditJob {
    #[serde(rename = "SUBREDDIT")]
    pub subreddit: String,
    #[serde(rename = "ID")]
    pub id: String,
}

/// Per-job outcome, appended exactly once per job (success or failure) and
/// written as the batch report at the end of the run. Immutable once pushed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtractionStatus {
    pub subreddit: String,
    pub num_posts: usize,
    pub num_comments: usize,
    pub total_records: usize,
    pub csv_id: String,
    pub status: bool,
    pub status_desc: String,
    /// Wall-clock seconds for the job, rounded to 2 decimals.
    pub execute_time: f64,
}
