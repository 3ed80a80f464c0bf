//! Text normalization for the final cleaning stage: lowercase, URL and
//! punctuation stripping, stop-word removal. Row counts are never affected
//! here; only the `text` column is rewritten.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // http/https URLs and bare www-prefixed tokens.
    RE.get_or_init(|| Regex::new(r"(?i)\b(?:https?://|www\.)\S+").unwrap())
}

fn punct_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Everything outside word and whitespace characters.
    RE.get_or_init(|| Regex::new(r"[^\w\s]+").unwrap())
}

/// Fixed stop-word set, built once at first use and immutable afterwards.
pub fn stop_words() -> &'static HashSet<&'static str> {
    static WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    WORDS.get_or_init(|| {
        [
            "a", "about", "after", "again", "all", "also", "am", "an", "and", "any",
            "are", "as", "at", "be", "because", "been", "before", "being", "but",
            "by", "can", "could", "did", "do", "does", "doing", "down", "during",
            "each", "few", "for", "from", "further", "had", "has", "have", "having",
            "he", "her", "here", "hers", "him", "his", "how", "i", "if", "in",
            "into", "is", "it", "its", "just", "me", "more", "most", "my", "no",
            "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other",
            "our", "out", "over", "own", "same", "she", "should", "so", "some",
            "such", "than", "that", "the", "their", "them", "then", "there",
            "these", "they", "this", "those", "through", "to", "too", "under",
            "until", "up", "very", "was", "we", "were", "what", "when", "where",
            "which", "while", "who", "why", "will", "with", "would", "you", "your",
        ]
        .into_iter()
        .collect()
    })
}

/// Naive whitespace word count; the short-content filter's measure.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Normalize one text field: lowercase, strip URLs, strip punctuation
/// (retaining word and whitespace characters), drop stop words, rejoin with
/// single spaces. Applying it to already-normalized text is a no-op.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let no_urls = url_re().replace_all(&lowered, "");
    let no_punct = punct_re().replace_all(&no_urls, "");
    no_punct
        .split_whitespace()
        .filter(|w| !stop_words().contains(w))
        .collect::<Vec<_>>()
        .join(" ")
}
