use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

/// Half-month billing window: 1st-15th, or 16th-end of month.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PayPeriod {
    #[schema(example = "2025-02-01", value_type = String, format = "date")]
    pub start_date: NaiveDate,

    #[schema(example = "2025-02-15", value_type = String, format = "date")]
    pub end_date: NaiveDate,

    #[schema(example = "February 1 - 15, 2025")]
    pub period_name: String,
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_y, next_m) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_y, next_m, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    // Valid by construction for day in 1..=last_day_of_month.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Pay period enclosing `date`. Always within `date`'s calendar month.
pub fn pay_period_for(date: NaiveDate) -> PayPeriod {
    let (year, month) = (date.year(), date.month());

    let (start, end) = if date.day() <= 15 {
        (ymd(year, month, 1), ymd(year, month, 15))
    } else {
        (ymd(year, month, 16), ymd(year, month, last_day_of_month(year, month)))
    };

    PayPeriod {
        start_date: start,
        end_date: end,
        period_name: format!("{} - {}", start.format("%B %-d"), end.format("%-d, %Y")),
    }
}

/// Whole days left until the current period resets. 0 on the end date.
pub fn days_until_reset(date: NaiveDate) -> i64 {
    let period = pay_period_for(date);
    (period.end_date - date).num_days().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn first_half_of_february() {
        let p = pay_period_for(d("2025-02-01"));
        assert_eq!(p.start_date, d("2025-02-01"));
        assert_eq!(p.end_date, d("2025-02-15"));
        assert_eq!(p.period_name, "February 1 - 15, 2025");
    }

    #[test]
    fn second_half_of_february_non_leap() {
        let p = pay_period_for(d("2025-02-16"));
        assert_eq!(p.start_date, d("2025-02-16"));
        assert_eq!(p.end_date, d("2025-02-28"));
    }

    #[test]
    fn second_half_of_february_leap_year() {
        let p = pay_period_for(d("2024-02-20"));
        assert_eq!(p.end_date, d("2024-02-29"));
        assert_eq!(p.period_name, "February 16 - 29, 2024");
    }

    #[test]
    fn thirty_one_day_month_second_half() {
        let p = pay_period_for(d("2025-12-31"));
        assert_eq!(p.start_date, d("2025-12-16"));
        assert_eq!(p.end_date, d("2025-12-31"));
    }

    #[test]
    fn period_always_contains_its_date() {
        let mut date = d("2024-01-01");
        let end = d("2026-01-01");
        while date < end {
            let p = pay_period_for(date);
            assert!(p.start_date <= date && date <= p.end_date, "{date}");
            assert_eq!(p.start_date.month(), date.month());
            assert_eq!(p.end_date.month(), date.month());
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn days_until_reset_counts_down_to_zero() {
        assert_eq!(days_until_reset(d("2025-02-10")), 5);
        assert_eq!(days_until_reset(d("2025-02-14")), 1);
        assert_eq!(days_until_reset(d("2025-02-15")), 0);

        // Monotonically non-increasing across a whole period.
        let mut prev = days_until_reset(d("2025-03-16"));
        let mut date = d("2025-03-17");
        while date <= d("2025-03-31") {
            let left = days_until_reset(date);
            assert!(left <= prev);
            prev = left;
            date = date.succ_opt().unwrap();
        }
        assert_eq!(prev, 0);
    }
}
