use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

/// Issue time of the ultra-short-term forecast to request.
///
/// KMA publishes at HH:30, so before the half hour the previous hour's
/// issue is the latest one available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseTime {
    pub date: NaiveDate,
    pub hour: u32,
}

impl BaseTime {
    /// Latest issue at or before `now` (KST)
    pub fn latest_at(now: NaiveDateTime) -> Self {
        let issued = if now.minute() < 30 {
            now - Duration::hours(1)
        } else {
            now
        };

        Self {
            date: issued.date(),
            hour: issued.hour(),
        }
    }

    /// `base_date` request parameter, `YYYYMMDD`
    pub fn base_date(&self) -> String {
        self.date.format("%Y%m%d").to_string()
    }

    /// `base_time` request parameter, `HH30`
    pub fn base_time(&self) -> String {
        format!("{:02}30", self.hour)
    }

    /// Footer label, `MM.DD HH:30`
    pub fn label(&self) -> String {
        format!("{} {:02}:30", self.date.format("%m.%d"), self.hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, 0)
            .unwrap()
    }

    #[test]
    fn test_after_half_hour_uses_current_hour() {
        let base = BaseTime::latest_at(at(2024, 5, 10, 14, 45));
        assert_eq!(base.base_date(), "20240510");
        assert_eq!(base.base_time(), "1430");
    }

    #[test]
    fn test_before_half_hour_uses_previous_hour() {
        let base = BaseTime::latest_at(at(2024, 5, 10, 14, 10));
        assert_eq!(base.base_time(), "1330");
    }

    #[test]
    fn test_exactly_half_past() {
        let base = BaseTime::latest_at(at(2024, 5, 10, 9, 30));
        assert_eq!(base.base_time(), "0930");
    }

    #[test]
    fn test_just_after_midnight_rolls_back_a_day() {
        let base = BaseTime::latest_at(at(2024, 5, 10, 0, 5));
        assert_eq!(base.base_date(), "20240509");
        assert_eq!(base.base_time(), "2330");
    }

    #[test]
    fn test_month_and_year_boundary() {
        let base = BaseTime::latest_at(at(2025, 1, 1, 0, 29));
        assert_eq!(base.base_date(), "20241231");
        assert_eq!(base.base_time(), "2330");
    }

    #[test]
    fn test_label() {
        let base = BaseTime::latest_at(at(2024, 3, 7, 8, 50));
        assert_eq!(base.label(), "03.07 08:30");
    }
}
