const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

const UNITS: [(i64, &str); 6] = [
    (YEAR, "year"),
    (MONTH, "month"),
    (DAY, "day"),
    (HOUR, "hour"),
    (MINUTE, "minute"),
    (1, "second"),
];

/// Human-relative age label for a comment, from unix timestamps.
///
/// Only the coarsest unit with a non-zero count is reported, and the
/// pluralization token is always the literal `(s)` for wire
/// compatibility ("More than 1 year(s) ago"). Zero or negative
/// elapsed time yields "now".
pub fn age_bucket(created_at: i64, now: i64) -> String {
    let elapsed = now - created_at;
    for (unit_seconds, unit) in UNITS {
        let count = elapsed / unit_seconds;
        if count > 0 {
            return format!("More than {} {}(s) ago", count, unit);
        }
    }
    "now".to_string()
}
