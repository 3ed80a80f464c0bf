//! Job-list input: a CSV with `SUBREDDIT` and `ID` columns. Failing to
//! obtain the job list is terminal for the run.

use crate::error::{HarvestError, Result};
use crate::record::SubredditJob;
use std::path::Path;

pub fn read_job_list(path: &Path) -> Result<Vec<SubredditJob>> {
    if !path.exists() {
        return Err(HarvestError::NotFound(path.to_path_buf()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut jobs = Vec::new();
    for row in reader.deserialize() {
        let job: SubredditJob = row?;
        jobs.push(job);
    }

    if jobs.is_empty() {
        return Err(HarvestError::EmptyInput(format!(
            "job list {} has no rows",
            path.display()
        )));
    }
    Ok(jobs)
}
