use rharvest::{aggregate, pct, round2, PerFileStats};

fn file_stats(name: &str, total: usize, posts: usize, short: usize, author: usize) -> PerFileStats {
    let replies = total - posts;
    let replies_pct = pct(replies, total);
    PerFileStats {
        csv_id: format!("out_{name}"),
        subreddit: name.to_string(),
        post_total: total,
        posts,
        posts_pct: if total == 0 { 0.0 } else { round2(100.0 - replies_pct) },
        replies,
        replies_pct,
        post_rmd_short: short,
        post_rmd_short_pct: pct(short, total),
        post_rmd_author: author,
        post_rmd_author_pct: pct(author, total),
    }
}

/// Percentages are rounded to two decimals, half away from zero. 5/800 is
/// exactly 0.625% (representable in binary), so this pins the tie-break.
#[test]
fn rounds_half_away_from_zero() {
    assert_eq!(pct(5, 800), 0.63);
    assert_eq!(round2(0.625), 0.63);
    assert_eq!(round2(0.375), 0.38);
    assert_eq!(pct(1, 3), 33.33);
    assert_eq!(pct(2, 3), 66.67);
    assert_eq!(pct(0, 10), 0.0);
    assert_eq!(pct(10, 10), 100.0);
}

#[test]
fn zero_total_never_divides() {
    assert_eq!(pct(0, 0), 0.0);
    assert_eq!(pct(5, 0), 0.0);
}

/// The summary derives percentages from summed counts. A big file at 10%
/// posts and a tiny file at 90% must not average to 50%.
#[test]
fn summary_is_percentage_of_sums() {
    let per_file = vec![
        file_stats("big", 100, 10, 20, 0),
        file_stats("tiny", 10, 9, 1, 0),
    ];

    let summary = aggregate(&per_file);
    assert_eq!(summary.post_total, 110);
    assert_eq!(summary.posts, 19);
    // 19 / 110 = 17.27%, nowhere near the 50% an average would give.
    assert_eq!(summary.posts_pct, 17.27);
    assert_eq!(summary.replies, 91);
    assert_eq!(summary.replies_pct, 82.73);
    assert_eq!(summary.post_rmd_short, 21);
    assert_eq!(summary.post_rmd_short_pct, 19.09);
}

/// Post and reply shares cover the whole file within rounding, whenever the
/// file has rows at all.
#[test]
fn post_and_reply_shares_sum_to_hundred() {
    for (total, posts) in [(3usize, 1usize), (7, 2), (100, 33), (1, 1), (1, 0)] {
        let s = file_stats("x", total, posts, 0, 0);
        assert!(
            (s.posts_pct + s.replies_pct - 100.0).abs() < 0.01,
            "total={total} posts={posts}: {} + {}",
            s.posts_pct,
            s.replies_pct
        );
    }
}

/// Folding no files yields zeroed totals, not NaN percentages.
#[test]
fn aggregate_of_nothing_is_zero() {
    let summary = aggregate(&[]);
    assert_eq!(summary.post_total, 0);
    assert_eq!(summary.posts_pct, 0.0);
    assert_eq!(summary.replies_pct, 0.0);
    assert_eq!(summary.post_rmd_short_pct, 0.0);
    assert_eq!(summary.post_rmd_author_pct, 0.0);
}
