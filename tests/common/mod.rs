use rharvest::{
    CleaningSettings, HttpSettings, PathSettings, RedditSettings, ReportSettings, Settings,
};
use serde_json::{json, Value};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Write one JSON value per line to `path`, creating parent directories.
pub fn write_jsonl(path: &Path, rows: &[Value]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut f = File::create(path).unwrap();
    for row in rows {
        writeln!(&mut f, "{}", row).unwrap();
    }
}

/// Read a JSONL file back into values (skips empty lines).
pub fn read_jsonl_values(path: &Path) -> Vec<Value> {
    let f = File::open(path).unwrap();
    let r = BufReader::new(f);
    r.lines()
        .map(|l| l.unwrap())
        .filter(|s| !s.is_empty())
        .map(|s| serde_json::from_str(&s).unwrap())
        .collect()
}

/// A comment listing node (`kind: t1`). Replies, when given, are wrapped in
/// the nested listing shape the comment endpoint uses.
pub fn comment_node(id: &str, body: &str, parent_id: &str, replies: Vec<Value>) -> Value {
    let mut data = json!({
        "id": id,
        "body": body,
        "parent_id": parent_id,
        "author": "alice",
        "created_utc": 1136074600,
        "score": 2,
    });
    if !replies.is_empty() {
        data["replies"] = json!({ "data": { "children": replies } });
    }
    json!({ "kind": "t1", "data": data })
}

/// A `more` placeholder node: stands in for comments that were not loaded.
pub fn more_node() -> Value {
    json!({ "kind": "more", "data": { "count": 17, "children": ["x1", "x2"] } })
}

/// A full-schema extracted row, as the harvest step writes them.
/// `parent_id = None` makes it a post row.
pub fn table_row(reddit_id: &str, parent_id: Option<&str>, author: &str, text: &str) -> Value {
    let is_post = parent_id.is_none();
    json!({
        "kind_desc": if is_post { "post" } else { "comment" },
        "csv_id": if is_post { json!("1") } else { Value::Null },
        "reddit_id": reddit_id,
        "post_id": if is_post { Value::Null } else { json!("p1") },
        "parent_id": parent_id.map(|p| json!(p)).unwrap_or(Value::Null),
        "author": author,
        "title": if is_post { json!("A title") } else { Value::Null },
        "timestamp_utc": 1136074600,
        "datetime": "2006-01-01 00:16:40",
        "text": text,
        "score": 1,
        "num_comments": if is_post { json!(2) } else { Value::Null },
        "depth": 0,
    })
}

/// Cleaning settings used across the pipeline tests: 3-word minimum, author
/// filter on with a one-name denylist, outputs under `base`.
pub fn cleaning_settings(base: &Path) -> CleaningSettings {
    CleaningSettings {
        word_length: 3,
        author_filter_trigger: true,
        author_filter: vec!["spammer".to_string()],
        output_path: base.join("cleaned.jsonl"),
        output_report: base.join("cleaning_report.json"),
    }
}

/// Full settings pointing every path under `base`; HTTP/endpoint values are
/// placeholders for tests that never touch the network.
pub fn settings_under(base: &Path) -> Settings {
    Settings {
        http: HttpSettings {
            user_agent: "rharvest-tests/0.1".to_string(),
            timeout: 5,
        },
        reddit: RedditSettings {
            post_base_url: "http://localhost:9/r/{SUBREDDIT}/new.json".to_string(),
            comment_base_url: "http://localhost:9/comments/{POST_ID}.json".to_string(),
            delay_between_requests: 0.0,
        },
        paths: PathSettings {
            job_list: base.join("subreddits.csv"),
            extract_dir: base.join("out"),
        },
        report: ReportSettings {
            output_file: base.join("extract_report.json"),
        },
        cleaning: cleaning_settings(base),
    }
}
