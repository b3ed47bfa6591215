use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::SubmissionError;

/// Shifts span midnight, so the business day rolls over at 06:00 rather
/// than 00:00. Anything before that hour belongs to yesterday's date.
pub const DAY_ROLLOVER_HOUR: u32 = 6;

const TIME_FORMAT: &str = "%H:%M:%S";
const SECS_PER_DAY: i64 = 86_400;

/// Business day a submission made at `now` is filed under.
pub fn business_date(now: NaiveDateTime) -> NaiveDate {
    if now.hour() < DAY_ROLLOVER_HOUR {
        now.date().pred_opt().unwrap_or(now.date())
    } else {
        now.date()
    }
}

/// Worked hours between two "HH:MM:SS" strings, rounded to 2 decimals.
///
/// end <= start is treated as a midnight-crossing shift. A parse failure
/// returns None; the submission still goes through with hours unset.
pub fn hours_worked(start_time: &str, end_time: &str) -> Option<f64> {
    let start = NaiveTime::parse_from_str(start_time, TIME_FORMAT).ok()?;
    let end = NaiveTime::parse_from_str(end_time, TIME_FORMAT).ok()?;

    let mut secs =
        end.num_seconds_from_midnight() as i64 - start.num_seconds_from_midnight() as i64;
    if secs <= 0 {
        secs += SECS_PER_DAY;
    }

    Some(round2(secs as f64 / 3600.0))
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Validates the requested shift triple before slot resolution.
pub fn parse_slot_times(
    start_time: &str,
    end_time: &str,
    duration_hours: f64,
) -> Result<(NaiveTime, NaiveTime), SubmissionError> {
    let start = NaiveTime::parse_from_str(start_time, TIME_FORMAT)
        .map_err(|_| SubmissionError::Validation(format!("invalid start_time: {start_time}")))?;
    let end = NaiveTime::parse_from_str(end_time, TIME_FORMAT)
        .map_err(|_| SubmissionError::Validation(format!("invalid end_time: {end_time}")))?;

    if !(duration_hours > 0.0 && duration_hours <= 24.0) {
        return Err(SubmissionError::Validation(
            "duration_hours must be between 0 and 24".into(),
        ));
    }

    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn before_rollover_files_under_yesterday() {
        let day = business_date(at("2025-03-10", "05:59:00"));
        assert_eq!(day.to_string(), "2025-03-09");
    }

    #[test]
    fn at_rollover_files_under_today() {
        let day = business_date(at("2025-03-10", "06:00:00"));
        assert_eq!(day.to_string(), "2025-03-10");
    }

    #[test]
    fn rollover_crosses_month_boundary() {
        let day = business_date(at("2025-03-01", "02:30:00"));
        assert_eq!(day.to_string(), "2025-02-28");
    }

    #[test]
    fn plain_daytime_shift() {
        assert_eq!(hours_worked("08:00:00", "11:00:00"), Some(3.0));
    }

    #[test]
    fn midnight_crossing_shift() {
        assert_eq!(hours_worked("22:00:00", "02:00:00"), Some(4.0));
    }

    #[test]
    fn fractional_hours_round_to_two_decimals() {
        assert_eq!(hours_worked("09:00:00", "12:10:00"), Some(3.17));
    }

    #[test]
    fn unparsable_times_leave_hours_unset() {
        assert_eq!(hours_worked("9am", "12pm"), None);
        assert_eq!(hours_worked("08:00:00", "not-a-time"), None);
    }

    #[test]
    fn slot_validation_rejects_bad_input() {
        assert!(parse_slot_times("08:00:00", "11:00:00", 3.0).is_ok());
        assert!(parse_slot_times("8 o'clock", "11:00:00", 3.0).is_err());
        assert!(parse_slot_times("08:00:00", "11:00:00", 0.0).is_err());
        assert!(parse_slot_times("08:00:00", "11:00:00", 25.0).is_err());
    }
}
