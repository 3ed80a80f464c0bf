//! Staged cleaning pipeline. Each extracted table runs through four fixed
//! stages — load, short-content filter, author filter, text normalization —
//! with a stage-log entry recorded after every stage. Filtered rows are
//! dropped, never flagged, so row counts shrink monotonically until the
//! normalization stage, which only rewrites text.

use crate::error::{HarvestError, Result};
use crate::ndjson::{read_rows, NdjsonWriter};
use crate::normalize::{normalize_text, word_count};
use crate::progress::make_count_progress;
use crate::report::{
    aggregate, CleaningReport, FileHistory, PerFileStats, RunOverview, StageLog, StageMetrics,
};
use crate::settings::{CleaningSettings, Settings};
use crate::util::{pct, round2};
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Result of cleaning one input file: the surviving (rewritten) rows, the
/// file's statistics, and its full stage history. `attributes` is the
/// column list of the loaded table, captured before any filtering.
pub struct CleanedFile {
    pub file: String,
    pub rows: Vec<Value>,
    pub stats: PerFileStats,
    pub history: Vec<StageLog>,
    pub attributes: Vec<String>,
}

/// Clean every `*.jsonl` table in the extraction directory, write the
/// unified cleaned table and the report document, and return the report.
///
/// Files are processed in path order; the unified output preserves that
/// order. A directory with no input tables is terminal: the cleaning run
/// cannot obtain its inputs.
pub fn run_cleaning(settings: &Settings) -> Result<CleaningReport> {
    let inputs = discover_inputs(&settings.paths.extract_dir)?;
    if inputs.is_empty() {
        return Err(HarvestError::EmptyInput(format!(
            "no .jsonl tables found under {}",
            settings.paths.extract_dir.display()
        )));
    }
    tracing::info!(count = inputs.len(), dir = %settings.paths.extract_dir.display(), "found extracted tables");

    // Denylist is matched with binary_search; sort it once per run.
    let mut denylist = settings.cleaning.author_filter.clone();
    denylist.sort();
    denylist.dedup();

    let pb = make_count_progress(inputs.len() as u64, "Cleaning extracted tables");
    let mut writer = NdjsonWriter::create(&settings.cleaning.output_path)?;
    let mut info: Option<RunOverview> = None;
    let mut data = Vec::with_capacity(inputs.len());
    let mut hist = Vec::with_capacity(inputs.len());

    for path in &inputs {
        let cleaned = clean_file(path, &settings.cleaning, &denylist)?;

        // Dataset overview comes from the first processed file only.
        if info.is_none() {
            info = Some(RunOverview::capture(&settings.cleaning, cleaned.attributes.clone()));
        }

        for row in &cleaned.rows {
            writer.write_record(row)?;
        }
        data.push(cleaned.stats);
        hist.push(FileHistory { file: cleaned.file, history: cleaned.history });

        tracing::info!(file = %path.display(), "finished cleaning table");
        pb.inc(1);
    }

    writer.finish()?;
    pb.finish_with_message("done");

    let info = info
        .unwrap_or_else(|| RunOverview::capture(&settings.cleaning, Vec::new()));
    let report = CleaningReport { info, summary: aggregate(&data), data, hist };
    write_report(&settings.cleaning.output_report, &report)?;
    tracing::info!(
        report = %settings.cleaning.output_report.display(),
        output = %settings.cleaning.output_path.display(),
        "cleaning run complete"
    );
    Ok(report)
}

/// Run the four-stage pipeline over one table. `denylist` must be sorted.
pub fn clean_file(path: &Path, cfg: &CleaningSettings, denylist: &[String]) -> Result<CleanedFile> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("out")
        .to_string();
    let subreddit = stem.strip_prefix("out_").unwrap_or(&stem).to_string();

    // Stage 1: load.
    let mut rows = read_rows(path)?;
    let total = rows.len();
    let attributes: Vec<String> = rows
        .first()
        .and_then(Value::as_object)
        .map(|obj| obj.keys().cloned().collect())
        .unwrap_or_default();
    let mut history = vec![StageLog {
        step_id: 1,
        description: "load".to_string(),
        rows_remaining: total,
        rows_removed: 0,
        metrics: None,
    }];

    // The post/reply split is computed here, from the loaded rows, before
    // any filtering touches them.
    let replies = rows.iter().filter(|r| is_reply(r)).count();
    let posts = total - replies;
    let replies_pct = pct(replies, total);
    let posts_pct = if total == 0 { 0.0 } else { round2(100.0 - replies_pct) };

    // Stage 2: short-content filter.
    rows.retain(|r| row_word_count(r) >= cfg.word_length);
    let post_rmd_short = total - rows.len();
    history.push(StageLog {
        step_id: 2,
        description: "short_content_filter".to_string(),
        rows_remaining: rows.len(),
        rows_removed: post_rmd_short,
        metrics: None,
    });
    tracing::info!(
        file = %stem,
        removed = post_rmd_short,
        threshold = cfg.word_length,
        "removed rows under the word-count threshold"
    );

    // Stage 3: author filter. Disabled still logs a zero-removed entry so
    // every file's history has the same shape.
    let before_author = rows.len();
    if cfg.author_filter_trigger {
        rows.retain(|r| {
            row_author(r).map_or(true, |a| denylist.binary_search_by(|d| d.as_str().cmp(a)).is_err())
        });
    }
    let post_rmd_author = before_author - rows.len();
    history.push(StageLog {
        step_id: 3,
        description: "author_filter".to_string(),
        rows_remaining: rows.len(),
        rows_removed: post_rmd_author,
        metrics: None,
    });

    // Stage 4: text normalization. Rewrites the text column; row count is
    // untouched.
    let words_before: u64 = rows.iter().map(|r| row_word_count(r) as u64).sum();
    for row in rows.iter_mut() {
        if let Some(obj) = row.as_object_mut() {
            let normalized = obj.get("text").and_then(Value::as_str).map(normalize_text);
            if let Some(text) = normalized {
                obj.insert("text".to_string(), Value::String(text));
            }
        }
    }
    let words_after: u64 = rows.iter().map(|r| row_word_count(r) as u64).sum();
    history.push(StageLog {
        step_id: 4,
        description: "text_normalization".to_string(),
        rows_remaining: rows.len(),
        rows_removed: 0,
        metrics: Some(StageMetrics { words_before, words_after }),
    });

    let stats = PerFileStats {
        csv_id: stem.clone(),
        subreddit,
        post_total: total,
        posts,
        posts_pct,
        replies,
        replies_pct,
        post_rmd_short,
        post_rmd_short_pct: pct(post_rmd_short, total),
        post_rmd_author,
        post_rmd_author_pct: pct(post_rmd_author, total),
    };

    Ok(CleanedFile { file: stem, rows, stats, history, attributes })
}

/// A row is a reply when its parent_id is present and non-null; a null or
/// absent parent_id marks a post.
fn is_reply(row: &Value) -> bool {
    row.get("parent_id").map_or(false, |v| !v.is_null())
}

/// Whitespace word count of the text column; missing or null text is zero.
fn row_word_count(row: &Value) -> usize {
    row.get("text").and_then(Value::as_str).map(word_count).unwrap_or(0)
}

fn row_author(row: &Value) -> Option<&str> {
    row.get("author").and_then(Value::as_str)
}

fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(HarvestError::NotFound(dir.to_path_buf()));
    }
    let mut inputs: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.path().to_path_buf())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("jsonl"))
        .collect();
    inputs.sort();
    Ok(inputs)
}

fn write_report(path: &Path, report: &CleaningReport) -> Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, report)?;
    w.flush()?;
    Ok(())
}
