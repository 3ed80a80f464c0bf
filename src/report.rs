//! Cleaning audit types: per-stage logs, per-file and dataset-wide
//! statistics, and the assembled report document.

use crate::settings::CleaningSettings;
use crate::util::pct;
use serde::{Deserialize, Serialize};

/// One entry of a file's stage history, appended after the stage runs and
/// never mutated afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StageLog {
    pub step_id: u32,
    pub description: String,
    pub rows_remaining: usize,
    pub rows_removed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<StageMetrics>,
}

/// Auxiliary numbers for stages that transform without removing rows.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct StageMetrics {
    pub words_before: u64,
    pub words_after: u64,
}

/// Statistics for one input file. The post/reply split is taken from the
/// loaded rows before any filtering; removal counts come from the stages.
/// Percentages all use the loaded row total as denominator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PerFileStats {
    pub csv_id: String,
    pub subreddit: String,
    pub post_total: usize,
    pub posts: usize,
    pub posts_pct: f64,
    pub replies: usize,
    pub replies_pct: f64,
    pub post_rmd_short: usize,
    pub post_rmd_short_pct: f64,
    pub post_rmd_author: usize,
    pub post_rmd_author_pct: f64,
}

/// Dataset-wide totals, produced only by [`aggregate`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub post_total: usize,
    pub posts: usize,
    pub posts_pct: f64,
    pub replies: usize,
    pub replies_pct: f64,
    pub post_rmd_short: usize,
    pub post_rmd_short_pct: f64,
    pub post_rmd_author: usize,
    pub post_rmd_author_pct: f64,
}

/// Fold per-file statistics into dataset totals: sum every raw count, then
/// derive percentages from the summed totals. Averaging the per-file
/// percentages would weight small files equally with large ones and is
/// deliberately not done here.
pub fn aggregate(per_file: &[PerFileStats]) -> SummaryStats {
    let post_total: usize = per_file.iter().map(|s| s.post_total).sum();
    let posts: usize = per_file.iter().map(|s| s.posts).sum();
    let replies: usize = per_file.iter().map(|s| s.replies).sum();
    let post_rmd_short: usize = per_file.iter().map(|s| s.post_rmd_short).sum();
    let post_rmd_author: usize = per_file.iter().map(|s| s.post_rmd_author).sum();

    SummaryStats {
        post_total,
        posts,
        posts_pct: pct(posts, post_total),
        replies,
        replies_pct: pct(replies, post_total),
        post_rmd_short,
        post_rmd_short_pct: pct(post_rmd_short, post_total),
        post_rmd_author,
        post_rmd_author_pct: pct(post_rmd_author, post_total),
    }
}

/// Dataset overview for the report's `info` block: a snapshot of the
/// cleaning settings plus the attribute list of the first processed file.
/// Built once per run; the settings object itself is never written to.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunOverview {
    pub word_length: usize,
    pub author_filter_trigger: bool,
    pub author_filter: Vec<String>,
    pub output_path: String,
    pub output_report: String,
    pub attribute_count: usize,
    pub attributes: Vec<String>,
}

impl RunOverview {
    pub fn capture(cleaning: &CleaningSettings, attributes: Vec<String>) -> Self {
        Self {
            word_length: cleaning.word_length,
            author_filter_trigger: cleaning.author_filter_trigger,
            author_filter: cleaning.author_filter.clone(),
            output_path: cleaning.output_path.display().to_string(),
            output_report: cleaning.output_report.display().to_string(),
            attribute_count: attributes.len(),
            attributes,
        }
    }
}

/// Full stage history for one file, keyed by file stem.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileHistory {
    pub file: String,
    pub history: Vec<StageLog>,
}

/// The cleaning report document, assembled once and written once.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CleaningReport {
    pub info: RunOverview,
    pub summary: SummaryStats,
    pub data: Vec<PerFileStats>,
    pub hist: Vec<FileHistory>,
}
