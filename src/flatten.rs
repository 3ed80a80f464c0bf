//! Comment-tree flattening: nested tagged listing nodes to an ordered flat
//! record sequence. Pure; no I/O.

use crate::record::{datetime_string, FlatRecord, RecordKind};
use serde_json::Value;

/// Reddit tags comment nodes `t1`. `more` nodes stand in for lazily-loaded
/// continuations; they contribute zero records and are never fetched, so a
/// deep thread's tail beyond the first payload is dropped by design.
const KIND_COMMENT: &str = "t1";
const KIND_MORE: &str = "more";

/// Flatten a listing's children into records, pre-order: each comment is
/// emitted before its replies, siblings keep their input order, and a reply's
/// depth is its parent's depth + 1 (top level at 0).
///
/// Non-array input yields an empty sequence rather than an error; listing
/// payloads are not trusted to be well-formed.
pub fn flatten(nodes: &Value, post_id: &str) -> Vec<FlatRecord> {
    let Some(children) = nodes.as_array() else {
        return Vec::new();
    };

    let mut out = Vec::new();
    // Explicit (node, depth) stack instead of recursion: thread nesting is
    // attacker-controlled and must not be able to exhaust the call stack.
    // Children are pushed in reverse so pop order matches input order.
    let mut stack: Vec<(&Value, u32)> = children.iter().rev().map(|n| (n, 0)).collect();

    while let Some((node, depth)) = stack.pop() {
        match node.get("kind").and_then(Value::as_str) {
            Some(KIND_COMMENT) => {
                let data = node.get("data");
                out.push(comment_record(data, post_id, depth));

                // Replies are only present as an object; Reddit sends an
                // empty string when a comment has none.
                if let Some(replies) = data
                    .and_then(|d| d.get("replies"))
                    .and_then(|r| r.get("data"))
                    .and_then(|d| d.get("children"))
                    .and_then(Value::as_array)
                {
                    for child in replies.iter().rev() {
                        stack.push((child, depth + 1));
                    }
                }
            }
            Some(KIND_MORE) => {}
            _ => {}
        }
    }

    out
}

/// Build one comment record from a node's `data` payload at the given depth.
/// Every `t1` node yields exactly one record; degenerate payloads fall back
/// to defaults instead of being skipped.
fn comment_record(data: Option<&Value>, post_id: &str, depth: u32) -> FlatRecord {
    let get_str = |key: &str| {
        data.and_then(|d| d.get(key))
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    // created_utc arrives as an integer or a float depending on endpoint.
    let timestamp_utc = data
        .and_then(|d| d.get("created_utc"))
        .and_then(Value::as_f64)
        .map(|ts| ts as i64);

    FlatRecord {
        kind_desc: RecordKind::Comment,
        csv_id: None,
        reddit_id: get_str("id").unwrap_or_default(),
        post_id: Some(post_id.to_string()),
        // Missing parent_id defaults to the owning post so that a null
        // parent_id always means "post".
        parent_id: Some(get_str("parent_id").unwrap_or_else(|| post_id.to_string())),
        author: get_str("author").unwrap_or_else(|| "[deleted]".to_string()),
        title: None,
        timestamp_utc,
        datetime: datetime_string(timestamp_utc),
        text: get_str("body").unwrap_or_default(),
        score: data
            .and_then(|d| d.get("score"))
            .and_then(Value::as_i64)
            .unwrap_or(0),
        num_comments: None,
        depth,
    }
}
