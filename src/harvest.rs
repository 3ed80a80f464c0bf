//! Extraction orchestration: iterate the job list, fetch each community's
//! posts and comment trees, persist one merged table per job, and write the
//! batch status report. Jobs run one at a time; a failed job records its
//! status and the loop moves on.

use crate::error::Result;
use crate::fetch::ThreadFetcher;
use crate::jobs::read_job_list;
use crate::ndjson::NdjsonWriter;
use crate::progress::make_count_progress;
use crate::record::{ExtractionStatus, FlatRecord, SubredditJob};
use crate::settings::Settings;
use crate::util::round2;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

/// Run the whole extraction batch. Fails hard only when the job list cannot
/// be obtained or an output file cannot be written; per-job fetch problems
/// degrade to an unsuccessful status entry.
pub fn run_harvest(settings: &Settings) -> Result<Vec<ExtractionStatus>> {
    let jobs = read_job_list(&settings.paths.job_list)?;
    let fetcher = ThreadFetcher::new(&settings.http, settings.reddit.clone())?;
    fs::create_dir_all(&settings.paths.extract_dir)?;

    let pb = make_count_progress(jobs.len() as u64, "Harvesting subreddits");
    let mut report = Vec::with_capacity(jobs.len());

    for job in &jobs {
        let started = Instant::now();

        let posts = fetcher.fetch_posts(job);
        let comments = fetcher.fetch_comments(job, &posts);
        let execute_time = round2(started.elapsed().as_secs_f64());

        let num_posts = posts.len();
        let num_comments = comments.len();
        let total_records = num_posts + num_comments;

        // An empty merge writes no table; the status entry records why.
        if total_records == 0 {
            tracing::warn!(
                csv_id = %job.id,
                subreddit = %job.subreddit,
                "no posts or comments found; skipping output"
            );
            report.push(job_status(job, 0, 0, false, "No posts or comments found.", execute_time));
            pb.inc(1);
            continue;
        }

        let out_path = settings
            .paths
            .extract_dir
            .join(format!("out_{}.jsonl", job.subreddit));
        write_job_table(&out_path, &posts, &comments)?;
        tracing::info!(
            csv_id = %job.id,
            subreddit = %job.subreddit,
            posts = num_posts,
            comments = num_comments,
            path = %out_path.display(),
            "extracted and saved"
        );

        report.push(job_status(
            job,
            num_posts,
            num_comments,
            true,
            "Data successfully extracted and saved.",
            execute_time,
        ));
        pb.inc(1);
    }

    pb.finish_with_message("done");
    write_status_report(&settings.report.output_file, &report)?;
    Ok(report)
}

fn job_status(
    job: &SubredditJob,
    num_posts: usize,
    num_comments: usize,
    status: bool,
    status_desc: &str,
    execute_time: f64,
) -> ExtractionStatus {
    ExtractionStatus {
        subreddit: job.subreddit.clone(),
        num_posts,
        num_comments,
        total_records: num_posts + num_comments,
        csv_id: job.id.clone(),
        status,
        status_desc: status_desc.to_string(),
        execute_time,
    }
}

/// Persist one job's merged table: posts first, then comments in flattener
/// order.
fn write_job_table(path: &Path, posts: &[FlatRecord], comments: &[FlatRecord]) -> Result<()> {
    let mut writer = NdjsonWriter::create(path)?;
    for record in posts.iter().chain(comments.iter()) {
        writer.write_record(record)?;
    }
    writer.finish()
}

fn write_status_report(path: &Path, report: &[ExtractionStatus]) -> Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, report)?;
    w.flush()?;
    Ok(())
}
