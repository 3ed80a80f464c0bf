mod error;
mod settings;
mod record;

mod flatten;
mod fetch;
mod jobs;
mod harvest;

mod normalize;
mod clean;
mod report;

mod ndjson;
mod progress;
mod util;

pub use crate::error::{HarvestError, Result};
pub use crate::settings::{
    CleaningSettings, HttpSettings, PathSettings, RedditSettings, ReportSettings, Settings,
};
pub use crate::record::{datetime_string, ExtractionStatus, FlatRecord, RecordKind, SubredditJob};

pub use crate::flatten::flatten;
pub use crate::fetch::{parse_comment_listing, parse_post_listing, ThreadFetcher};
pub use crate::jobs::read_job_list;
pub use crate::harvest::run_harvest;

pub use crate::normalize::{normalize_text, stop_words, word_count};
pub use crate::clean::{clean_file, run_cleaning, CleanedFile};
pub use crate::report::{
    aggregate, CleaningReport, FileHistory, PerFileStats, RunOverview, StageLog, StageMetrics,
    SummaryStats,
};

// Expose NDJSON helpers
pub use crate::ndjson::{read_rows, NdjsonWriter};

// Expose progress and tracing/rounding helpers to the binaries.
pub use crate::progress::make_count_progress;
pub use crate::util::{init_tracing_once, pct, round2};
