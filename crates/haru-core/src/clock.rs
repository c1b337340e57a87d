use chrono::{Duration, NaiveDateTime, Utc};

/// Korea Standard Time offset. Korea observes no daylight saving.
const KST_OFFSET_HOURS: i64 = 9;

/// Current wall-clock time in Korea.
pub fn kst_now() -> NaiveDateTime {
    Utc::now().naive_utc() + Duration::hours(KST_OFFSET_HOURS)
}
