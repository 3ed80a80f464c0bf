//! Shared helpers: one-shot tracing init and the percentage/rounding rules
//! every report figure goes through.

static INIT_ONCE: std::sync::Once = std::sync::Once::new();

pub fn init_tracing_once() {
    INIT_ONCE.call_once(|| {
        let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();
    });
}

/// Round to 2 decimal places, half away from zero (`f64::round` semantics).
/// Every percentage in the reports goes through this so audit numbers are
/// reproducible bit-for-bit across runs.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// `part` as a percentage of `total`, rounded to 2 decimals. A zero total
/// yields 0.0 rather than dividing by zero.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(part as f64 / total as f64 * 100.0)
}
