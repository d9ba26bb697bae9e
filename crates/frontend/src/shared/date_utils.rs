/// Utilities for date and time formatting
///
/// All dates are shown in Bangkok time (UTC+7) using the Buddhist era
/// (พ.ศ. = ค.ศ. + 543), e.g. "15/03/2567 14:02".
use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};

const BANGKOK_OFFSET_SECS: i32 = 7 * 3600;
const BUDDHIST_ERA_OFFSET: i32 = 543;

fn to_bangkok(dt: DateTime<Utc>) -> DateTime<FixedOffset> {
    match FixedOffset::east_opt(BANGKOK_OFFSET_SECS) {
        Some(offset) => dt.with_timezone(&offset),
        None => dt.fixed_offset(),
    }
}

/// DD/MM/YYYY (พ.ศ.)
pub fn format_thai_date(dt: DateTime<Utc>) -> String {
    let local = to_bangkok(dt);
    format!(
        "{:02}/{:02}/{}",
        local.day(),
        local.month(),
        local.year() + BUDDHIST_ERA_OFFSET
    )
}

/// DD/MM/YYYY HH:MM (พ.ศ.)
pub fn format_thai_datetime(dt: DateTime<Utc>) -> String {
    let local = to_bangkok(dt);
    format!(
        "{} {:02}:{:02}",
        format_thai_date(dt),
        local.hour(),
        local.minute()
    )
}

pub fn format_thai_datetime_opt(dt: Option<DateTime<Utc>>) -> String {
    dt.map(format_thai_datetime).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_thai_date_uses_buddhist_era() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 15, 7, 2, 26).unwrap();
        assert_eq!(format_thai_date(dt), "15/03/2567");
        assert_eq!(format_thai_datetime(dt), "15/03/2567 14:02");
    }

    #[test]
    fn test_bangkok_offset_crosses_midnight() {
        let dt = Utc.with_ymd_and_hms(2024, 12, 31, 18, 30, 0).unwrap();
        assert_eq!(format_thai_datetime(dt), "01/01/2568 01:30");
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(format_thai_datetime_opt(None), "-");
    }
}
