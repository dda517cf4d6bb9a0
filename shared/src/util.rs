use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Last issued id value: `millis * 1000 + sequence`
static LAST_RECORD_ID: AtomicI64 = AtomicI64::new(0);

/// Generate a record id.
///
/// Layout (20 decimal digits, fixed width):
///   - 17 digits: UTC time `YYYYMMDDHHMMSSmmm`
///   - 3 digits: per-millisecond sequence
///
/// Ids are strictly increasing within the process, so sorting them as
/// strings gives creation order. Ids written with second resolution
/// (`YYYYMMDDHHMMSS`) are prefixes of ids from the same second and sort
/// before them.
pub fn record_id() -> String {
    let now = now_millis() * 1000;
    let mut last = LAST_RECORD_ID.load(Ordering::Relaxed);
    let next = loop {
        let candidate = now.max(last + 1);
        match LAST_RECORD_ID.compare_exchange_weak(
            last,
            candidate,
            Ordering::SeqCst,
            Ordering::Relaxed,
        ) {
            Ok(_) => break candidate,
            Err(actual) => last = actual,
        }
    };
    format_record_id(next)
}

fn format_record_id(value: i64) -> String {
    let millis = value.div_euclid(1000);
    let sequence = value.rem_euclid(1000);
    let time: DateTime<Utc> = DateTime::from_timestamp_millis(millis).unwrap_or_default();
    format!("{}{:03}", time.format("%Y%m%d%H%M%S%3f"), sequence)
}
