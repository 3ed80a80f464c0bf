//! Minimal buffered NDJSON reader/writer used for per-job tables and the
//! unified cleaned output.

use crate::error::{HarvestError, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Read a JSONL file into row values, skipping blank lines.
pub fn read_rows(path: &Path) -> Result<Vec<Value>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            HarvestError::NotFound(path.to_path_buf())
        } else {
            HarvestError::Io(e)
        }
    })?;
    let reader = BufReader::new(file);

    let mut rows = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        rows.push(serde_json::from_str(&line)?);
    }
    Ok(rows)
}

/// Line-per-record JSONL writer. Callers must `finish()` to flush.
pub struct NdjsonWriter {
    w: BufWriter<File>,
}

impl NdjsonWriter {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self { w: BufWriter::new(file) })
    }

    pub fn write_record<T: Serialize>(&mut self, record: &T) -> Result<()> {
        serde_json::to_writer(&mut self.w, record)?;
        self.w.write_all(b"\n")?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.w.flush()?;
        Ok(())
    }
}
