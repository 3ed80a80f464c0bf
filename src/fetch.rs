//! Thread fetching: one listing request per community, one comment request
//! per post, strictly sequential with a politeness delay between requests.
//!
//! Transport and parsing are split: `ThreadFetcher` owns the HTTP client and
//! degrades every per-unit failure to an empty result, while
//! `parse_post_listing` / `parse_comment_listing` are pure functions over
//! response bodies.

use crate::error::Result;
use crate::flatten::flatten;
use crate::record::{datetime_string, FlatRecord, RecordKind, SubredditJob};
use crate::settings::{HttpSettings, RedditSettings};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::thread;
use std::time::Duration;

pub struct ThreadFetcher {
    client: Client,
    reddit: RedditSettings,
}

impl ThreadFetcher {
    pub fn new(http: &HttpSettings, reddit: RedditSettings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(http.user_agent.clone())
            .timeout(Duration::from_secs(http.timeout))
            .build()?;
        Ok(Self { client, reddit })
    }

    /// Fetch the community listing for one job. Any failure — transport,
    /// status, content type, body shape — logs and yields an empty list;
    /// a bad community never aborts the batch.
    pub fn fetch_posts(&self, job: &SubredditJob) -> Vec<FlatRecord> {
        match self.try_fetch_posts(job) {
            Ok(posts) => {
                tracing::info!(
                    csv_id = %job.id,
                    subreddit = %job.subreddit,
                    count = posts.len(),
                    "fetched non-stickied posts"
                );
                posts
            }
            Err(e) => {
                tracing::error!(
                    csv_id = %job.id,
                    subreddit = %job.subreddit,
                    error = %e,
                    "post listing fetch failed; community yields no posts"
                );
                Vec::new()
            }
        }
    }

    fn try_fetch_posts(&self, job: &SubredditJob) -> Result<Vec<FlatRecord>> {
        let url = self.reddit.post_base_url.replace("{SUBREDDIT}", &job.subreddit);
        let resp = self.client.get(&url).send()?;

        match resp.status().as_u16() {
            200 => {}
            429 => {
                // Rate-limited responses are still handed to the parser.
                // TODO: negotiate backoff/retry here once the intended 429
                // semantics are confirmed upstream.
                tracing::warn!(
                    subreddit = %job.subreddit,
                    "rate limited (HTTP 429); attempting to parse body anyway"
                );
            }
            code => {
                tracing::error!(
                    subreddit = %job.subreddit,
                    code,
                    "unexpected response status; community yields no posts"
                );
                return Ok(Vec::new());
            }
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();
        if !content_type.contains("application/json") {
            tracing::warn!(
                subreddit = %job.subreddit,
                content_type = %content_type,
                "listing response is not JSON; community yields no posts"
            );
            return Ok(Vec::new());
        }

        let body: Value = resp.json()?;
        Ok(parse_post_listing(&body, job))
    }

    /// Fetch the comment tree for every post, one request per post, sleeping
    /// the configured delay after each. A malformed or failed response for
    /// one post contributes zero comments and the loop continues.
    pub fn fetch_comments(&self, job: &SubredditJob, posts: &[FlatRecord]) -> Vec<FlatRecord> {
        let delay = Duration::from_secs_f64(self.reddit.delay_between_requests.max(0.0));
        let mut comments = Vec::new();

        for (i, post) in posts.iter().enumerate() {
            tracing::info!(
                post = %post.reddit_id,
                index = i + 1,
                total = posts.len(),
                "fetching comment tree"
            );
            match self.try_fetch_comments(&post.reddit_id) {
                Ok(mut tree) => comments.append(&mut tree),
                Err(e) => tracing::warn!(
                    post = %post.reddit_id,
                    error = %e,
                    "comment fetch failed; post yields no comments"
                ),
            }
            thread::sleep(delay);
        }

        comments
    }

    fn try_fetch_comments(&self, post_id: &str) -> Result<Vec<FlatRecord>> {
        let url = self.reddit.comment_base_url.replace("{POST_ID}", post_id);
        let resp = self.client.get(&url).send()?;
        if resp.status().as_u16() == 429 {
            tracing::warn!(post = %post_id, "rate limited (HTTP 429); attempting to parse body anyway");
        }
        let body: Value = resp.json()?;
        Ok(parse_comment_listing(&body, post_id))
    }
}

/// Build post records from a community listing body. Stickied posts are
/// unconditionally excluded; children without an id are skipped; a body
/// without `data.children` logs and yields an empty list.
pub fn parse_post_listing(body: &Value, job: &SubredditJob) -> Vec<FlatRecord> {
    let Some(children) = body
        .get("data")
        .and_then(|d| d.get("children"))
        .and_then(Value::as_array)
    else {
        tracing::warn!(
            csv_id = %job.id,
            subreddit = %job.subreddit,
            "no posts found in the subreddit response"
        );
        return Vec::new();
    };

    let mut posts = Vec::new();
    for child in children {
        let Some(data) = child.get("data") else { continue };
        if data.get("stickied").and_then(Value::as_bool).unwrap_or(false) {
            continue;
        }
        let Some(id) = data.get("id").and_then(Value::as_str) else {
            tracing::warn!(subreddit = %job.subreddit, "skipping listing child without an id");
            continue;
        };

        // created_utc arrives as an integer or a float depending on endpoint.
        let timestamp_utc = data.get("created_utc").and_then(Value::as_f64).map(|ts| ts as i64);
        posts.push(FlatRecord {
            kind_desc: RecordKind::Post,
            csv_id: Some(job.id.clone()),
            reddit_id: id.to_string(),
            post_id: None,
            parent_id: None,
            author: data
                .get("author")
                .and_then(Value::as_str)
                .unwrap_or("[deleted]")
                .to_string(),
            title: data.get("title").and_then(Value::as_str).map(str::to_string),
            timestamp_utc,
            datetime: datetime_string(timestamp_utc),
            text: data
                .get("selftext")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            score: data.get("score").and_then(Value::as_i64).unwrap_or(0),
            num_comments: data.get("num_comments").and_then(Value::as_i64),
            depth: 0,
        });
    }
    posts
}

/// Extract the comment tree from a per-post response. The endpoint returns a
/// two-element listing with the tree in element 1; any other shape yields
/// zero comments for this post.
pub fn parse_comment_listing(body: &Value, post_id: &str) -> Vec<FlatRecord> {
    let children = body
        .as_array()
        .filter(|arr| arr.len() > 1)
        .and_then(|arr| arr[1].get("data"))
        .and_then(|d| d.get("children"));

    match children {
        Some(nodes) => flatten(nodes, post_id),
        None => {
            tracing::debug!(post = %post_id, "comment response did not match the two-element listing shape");
            Vec::new()
        }
    }
}
