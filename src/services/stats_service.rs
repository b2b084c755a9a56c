use std::collections::BTreeMap;

use sqlx::SqlitePool;

use crate::database::stats_repo;

/// Dashboard snapshot, recomputed fresh on every call. Reflects the
/// registry as of the read; a live dashboard tolerates being a moment
/// stale by delivery time.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StatsSnapshot {
    pub total: i64,
    pub checked_in: i64,
    pub pending: i64,
    pub checkin_rate: String,
    pub worship_team: i64,
    pub volunteers: i64,
    pub hourly_checkins: BTreeMap<String, i64>,
}

pub async fn aggregate(pool: &SqlitePool) -> sqlx::Result<StatsSnapshot> {
    let totals = stats_repo::totals(pool).await?;
    let hourly = stats_repo::hourly_checkins_today(pool).await?;

    Ok(StatsSnapshot {
        total: totals.total,
        checked_in: totals.checked_in,
        pending: totals.total - totals.checked_in,
        checkin_rate: checkin_rate(totals.checked_in, totals.total),
        worship_team: totals.worship_team,
        volunteers: totals.volunteers,
        hourly_checkins: hourly.into_iter().map(|r| (r.hour, r.count)).collect(),
    })
}

fn checkin_rate(checked_in: i64, total: i64) -> String {
    if total == 0 {
        "0%".to_string()
    } else {
        format!("{:.1}%", checked_in as f64 / total as f64 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::checkin_rate;

    #[test]
    fn empty_registry_reports_zero_percent() {
        assert_eq!(checkin_rate(0, 0), "0%");
    }

    #[test]
    fn rate_has_one_decimal_place() {
        assert_eq!(checkin_rate(7, 10), "70.0%");
        assert_eq!(checkin_rate(1, 3), "33.3%");
        assert_eq!(checkin_rate(10, 10), "100.0%");
        assert_eq!(checkin_rate(0, 4), "0.0%");
    }
}
