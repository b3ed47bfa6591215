use std::cmp::Ordering;
use std::str::FromStr;

use serde::Serialize;
use utoipa::ToSchema;

use crate::model::seller::{ExperienceStatus, HOURLY_RATE_NEWBIE};
use crate::utils::attendance_calc::round2;

/// Primary sort key for the leaderboard.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RankTarget {
    SalesQuantity,
    HoursWorked,
}

/// Aggregated totals for one seller over a pay period.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct SellerPerformance {
    #[schema(example = 7)]
    pub seller_id: u64,

    #[schema(example = "mira.live")]
    pub username: String,

    #[schema(example = "Mira Santos")]
    pub full_name: String,

    #[schema(example = "tenured", nullable = true)]
    pub experience_status: Option<String>,

    #[schema(example = 50)]
    pub total_solds: i64,

    #[schema(example = 42.5)]
    pub total_hours: f64,

    #[schema(example = 11)]
    pub working_days: i64,

    /// 1-based position after sorting; assigned by `rank_sellers`.
    #[sqlx(default)]
    #[schema(example = 1)]
    pub rank: u32,
}

fn compare(a: &SellerPerformance, b: &SellerPerformance, target: RankTarget) -> Ordering {
    let primary = match target {
        RankTarget::SalesQuantity => b.total_solds.cmp(&a.total_solds),
        RankTarget::HoursWorked => b.total_hours.total_cmp(&a.total_hours),
    };

    // Ties fall back to hours, then working days, all descending.
    primary
        .then_with(|| b.total_hours.total_cmp(&a.total_hours))
        .then_with(|| b.working_days.cmp(&a.working_days))
}

/// Sorts in place by `target` and assigns gapless 1-based ranks.
pub fn rank_sellers(rows: &mut [SellerPerformance], target: RankTarget) {
    rows.sort_by(|a, b| compare(a, b, target));
    for (idx, row) in rows.iter_mut().enumerate() {
        row.rank = idx as u32 + 1;
    }
}

/// Hourly payout rate for a stored experience_status value. Unknown or
/// missing values fall back to the newbie rate.
pub fn hourly_rate(experience_status: Option<&str>) -> f64 {
    experience_status
        .and_then(|s| ExperienceStatus::from_str(s).ok())
        .map(|s| s.hourly_rate())
        .unwrap_or(HOURLY_RATE_NEWBIE)
}

/// Derived payout projection: hours x rate, never stored.
pub fn total_earned(total_hours: f64, experience_status: Option<&str>) -> f64 {
    round2(total_hours * hourly_rate(experience_status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::seller::HOURLY_RATE_TENURED;

    fn seller(name: &str, solds: i64, hours: f64, days: i64) -> SellerPerformance {
        SellerPerformance {
            seller_id: 0,
            username: name.to_string(),
            full_name: name.to_string(),
            experience_status: None,
            total_solds: solds,
            total_hours: hours,
            working_days: days,
            rank: 0,
        }
    }

    #[test]
    fn sales_ties_break_on_hours() {
        let mut rows = vec![
            seller("low", 30, 99.0, 20),
            seller("tied_short", 50, 20.0, 10),
            seller("tied_long", 50, 35.5, 9),
        ];
        rank_sellers(&mut rows, RankTarget::SalesQuantity);

        let order: Vec<&str> = rows.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(order, ["tied_long", "tied_short", "low"]);

        let ranks: Vec<u32> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, [1, 2, 3]);
    }

    #[test]
    fn equal_hours_break_on_working_days() {
        let mut rows = vec![
            seller("fewer_days", 50, 20.0, 5),
            seller("more_days", 50, 20.0, 8),
        ];
        rank_sellers(&mut rows, RankTarget::SalesQuantity);
        assert_eq!(rows[0].username, "more_days");
    }

    #[test]
    fn hours_target_orders_by_hours() {
        let mut rows = vec![
            seller("short", 100, 10.0, 3),
            seller("long", 10, 40.0, 10),
        ];
        rank_sellers(&mut rows, RankTarget::HoursWorked);
        assert_eq!(rows[0].username, "long");
        assert_eq!(rows[0].rank, 1);
    }

    #[test]
    fn pay_rates_by_experience() {
        assert_eq!(hourly_rate(Some("tenured")), HOURLY_RATE_TENURED);
        assert_eq!(hourly_rate(Some("newbie")), HOURLY_RATE_NEWBIE);
        assert_eq!(hourly_rate(None), HOURLY_RATE_NEWBIE);
        assert_eq!(hourly_rate(Some("garbage")), HOURLY_RATE_NEWBIE);

        assert_eq!(total_earned(10.0, Some("tenured")), 650.0);
        assert_eq!(total_earned(2.5, Some("newbie")), 137.5);
    }
}
