//! Typed run configuration, deserialized once from a YAML file. The settings
//! object is read-only after load; derived run metadata lives in
//! `report::RunOverview`, never here.

use crate::error::{HarvestError, Result};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub http: HttpSettings,
    pub reddit: RedditSettings,
    pub paths: PathSettings,
    pub report: ReportSettings,
    pub cleaning: CleaningSettings,
}

#[derive(Clone, Debug, Deserialize)]
pub struct HttpSettings {
    pub user_agent: String,
    /// Per-request timeout in seconds.
    pub timeout: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RedditSettings {
    /// Community listing URL template; `{SUBREDDIT}` is substituted per job.
    pub post_base_url: String,
    /// Comment listing URL template; `{POST_ID}` is substituted per post.
    pub comment_base_url: String,
    /// Politeness delay between successive per-post requests, in seconds.
    pub delay_between_requests: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PathSettings {
    /// CSV with SUBREDDIT and ID columns.
    pub job_list: PathBuf,
    /// Directory receiving one `out_<subreddit>.jsonl` per job.
    pub extract_dir: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ReportSettings {
    /// Destination for the extraction status report (JSON array).
    pub output_file: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CleaningSettings {
    /// Minimum word count a row must have to survive the short-content filter.
    pub word_length: usize,
    pub author_filter_trigger: bool,
    #[serde(default)]
    pub author_filter: Vec<String>,
    /// Destination for the unified cleaned table (JSONL).
    pub output_path: PathBuf,
    /// Destination for the cleaning report (JSON document).
    pub output_report: PathBuf,
}

impl Settings {
    /// Load and validate the run configuration. A missing file or key is
    /// terminal for the run; there is no partial-config fallback.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HarvestError::NotFound(path.to_path_buf())
            } else {
                HarvestError::Io(e)
            }
        })?;
        let settings: Settings = serde_yaml::from_reader(file)?;
        Ok(settings)
    }
}
