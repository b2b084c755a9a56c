use sqlx::SqlitePool;

#[derive(Debug, sqlx::FromRow)]
pub struct StatsRow {
    pub total: i64,
    pub checked_in: i64,
    pub worship_team: i64,
    pub volunteers: i64,
}

#[derive(Debug, sqlx::FromRow)]
pub struct HourlyCheckinRow {
    pub hour: String,
    pub count: i64,
}

const SQL_TOTALS: &str = r#"
SELECT
  COUNT(*) AS total,
  COALESCE(SUM(CASE WHEN status = 'checked_in' THEN 1 ELSE 0 END), 0) AS checked_in,
  COALESCE(SUM(CASE WHEN worship_team = 1 THEN 1 ELSE 0 END), 0) AS worship_team,
  COALESCE(SUM(CASE WHEN volunteer = 1 THEN 1 ELSE 0 END), 0) AS volunteers
FROM registrations
"#;

pub async fn totals(pool: &SqlitePool) -> sqlx::Result<StatsRow> {
    sqlx::query_as::<_, StatsRow>(SQL_TOTALS).fetch_one(pool).await
}

const SQL_HOURLY_CHECKINS_TODAY: &str = r#"
SELECT
  strftime('%H', checkin_time) AS hour,
  COUNT(*) AS count
FROM registrations
WHERE date(checkin_time) = date('now')
  AND status = 'checked_in'
  AND checkin_time IS NOT NULL
GROUP BY hour
ORDER BY hour
"#;

/// Check-ins bucketed by hour of the current UTC calendar day. Stored
/// timestamps are UTC text, so `date('now')` compares like for like.
pub async fn hourly_checkins_today(pool: &SqlitePool) -> sqlx::Result<Vec<HourlyCheckinRow>> {
    sqlx::query_as::<_, HourlyCheckinRow>(SQL_HOURLY_CHECKINS_TODAY)
        .fetch_all(pool)
        .await
}
