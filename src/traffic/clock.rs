use chrono::{NaiveDateTime, Timelike};

/// Number of minute slots in a day.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Minutes elapsed since midnight of the timestamp's own day, `0..=1439`.
///
/// Seconds are truncated, so `08:10:59` lands on minute 490.
pub fn minutes_since_midnight(t: &NaiveDateTime) -> u16 {
    (t.hour() * 60 + t.minute()) as u16
}

/// Renders a minute of the day as a 12-hour clock label, e.g. `8:10 AM`.
pub fn format_minute(minute: u16) -> String {
    let minute = minute % MINUTES_PER_DAY;
    let (hour, min) = (minute / 60, minute % 60);
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour12}:{min:02} {suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_minutes_since_midnight_bounds() {
        assert_eq!(minutes_since_midnight(&at(0, 0, 0)), 0);
        assert_eq!(minutes_since_midnight(&at(23, 59, 59)), 1439);
    }

    #[test]
    fn test_minutes_since_midnight_ignores_date_and_seconds() {
        let other_day = NaiveDate::from_ymd_opt(2024, 3, 28)
            .unwrap()
            .and_hms_opt(8, 10, 0)
            .unwrap();
        assert_eq!(minutes_since_midnight(&at(8, 10, 59)), 490);
        assert_eq!(minutes_since_midnight(&other_day), 490);
    }

    #[test]
    fn test_format_minute() {
        assert_eq!(format_minute(0), "12:00 AM");
        assert_eq!(format_minute(490), "8:10 AM");
        assert_eq!(format_minute(720), "12:00 PM");
        assert_eq!(format_minute(1439), "11:59 PM");
    }
}
