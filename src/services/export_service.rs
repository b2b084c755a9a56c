use sqlx::SqlitePool;

use crate::database::registrations_repo::{self, CategoryFilter, ExportFilter};
use crate::models::{RegistrationRow, TicketStatus};

pub const EXPORT_COLUMNS: [&str; 13] = [
    "ticket_id",
    "first_name",
    "last_name",
    "email",
    "phone",
    "emergency_contact",
    "medical_notes",
    "worship_team",
    "volunteer",
    "status",
    "source_system",
    "registration_time",
    "checkin_time",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unknown status filter {0:?}")]
    UnknownStatus(String),
    #[error("unknown category filter {0:?}")]
    UnknownCategory(String),
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ExportSummary {
    pub total: usize,
    pub checked_in: usize,
}

/// Map raw query parameters onto a typed filter. Date strings pass through
/// to SQLite's `date()`; an unparseable date simply matches nothing.
pub fn parse_filter(
    status: Option<&str>,
    category: Option<&str>,
    from_date: Option<&str>,
    to_date: Option<&str>,
) -> Result<ExportFilter, ExportError> {
    let status = match status {
        None => None,
        Some(raw) => Some(
            TicketStatus::parse(raw).ok_or_else(|| ExportError::UnknownStatus(raw.to_string()))?,
        ),
    };
    let category = match category {
        None => None,
        Some("worship_team") => Some(CategoryFilter::WorshipTeam),
        Some("volunteer") => Some(CategoryFilter::Volunteer),
        Some(raw) => return Err(ExportError::UnknownCategory(raw.to_string())),
    };
    Ok(ExportFilter {
        status,
        category,
        from_date: from_date.map(str::to_string),
        to_date: to_date.map(str::to_string),
    })
}

pub async fn export_rows(
    pool: &SqlitePool,
    filter: &ExportFilter,
) -> Result<Vec<RegistrationRow>, ExportError> {
    Ok(registrations_repo::list_filtered(pool, filter).await?)
}

pub fn summarize(rows: &[RegistrationRow]) -> ExportSummary {
    ExportSummary {
        total: rows.len(),
        checked_in: rows
            .iter()
            .filter(|r| r.status() == Some(TicketStatus::CheckedIn))
            .count(),
    }
}

/// Attachment name for a download, embedding the requested date range.
pub fn filename(filter: &ExportFilter) -> String {
    format!(
        "registrations_{}_to_{}.csv",
        filter.from_date.as_deref().unwrap_or("all"),
        filter.to_date.as_deref().unwrap_or("all"),
    )
}

/// RFC 4180 serialization: header row, one line per record, fields quoted
/// only when they contain a comma, quote, or line break.
pub fn to_csv(rows: &[RegistrationRow]) -> String {
    let mut out = String::new();
    out.push_str(&EXPORT_COLUMNS.join(","));
    out.push('\n');

    for row in rows {
        let fields = [
            row.ticket_id.as_str(),
            row.first_name.as_str(),
            row.last_name.as_str(),
            row.email.as_str(),
            row.phone.as_deref().unwrap_or(""),
            row.emergency_contact.as_deref().unwrap_or(""),
            row.medical_notes.as_deref().unwrap_or(""),
            if row.worship_team != 0 { "1" } else { "0" },
            if row.volunteer != 0 { "1" } else { "0" },
            row.status.as_str(),
            row.source_system.as_str(),
            row.registration_time.as_str(),
            row.checkin_time.as_deref().unwrap_or(""),
        ];
        let line: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }

    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(ticket_id: &str, medical_notes: Option<&str>) -> RegistrationRow {
        RegistrationRow {
            ticket_id: ticket_id.to_string(),
            first_name: "Jo".to_string(),
            last_name: "Nagel".to_string(),
            email: "jo@example.org".to_string(),
            phone: None,
            emergency_contact: None,
            medical_notes: medical_notes.map(str::to_string),
            worship_team: 1,
            volunteer: 0,
            status: "registered".to_string(),
            source_system: "manual".to_string(),
            registration_time: "2026-08-06 18:00:00".to_string(),
            checkin_time: None,
        }
    }

    #[test]
    fn header_matches_column_order() {
        let csv = to_csv(&[]);
        assert_eq!(csv, format!("{}\n", EXPORT_COLUMNS.join(",")));
    }

    #[test]
    fn fields_with_commas_and_quotes_are_escaped() {
        let csv = to_csv(&[row("RWT-AAAA1111", Some(r#"peanuts, "severe""#))]);
        let data_line = csv.lines().nth(1).unwrap();
        assert!(data_line.contains(r#""peanuts, ""severe""""#));
        assert!(data_line.starts_with("RWT-AAAA1111,Jo,Nagel,"));
    }

    #[test]
    fn flags_serialize_as_zero_one() {
        let csv = to_csv(&[row("RWT-AAAA1111", None)]);
        let data_line = csv.lines().nth(1).unwrap();
        assert!(data_line.contains(",1,0,registered,"));
    }

    #[test]
    fn parse_filter_rejects_unknown_status() {
        assert!(matches!(
            parse_filter(Some("cancelled"), None, None, None),
            Err(ExportError::UnknownStatus(_))
        ));
        let filter = parse_filter(Some("checked_in"), Some("volunteer"), None, None).unwrap();
        assert_eq!(filter.status, Some(TicketStatus::CheckedIn));
        assert_eq!(filter.category, Some(CategoryFilter::Volunteer));
    }

    #[test]
    fn filename_embeds_date_range() {
        let filter = parse_filter(None, None, Some("2026-08-01"), Some("2026-08-06")).unwrap();
        assert_eq!(filename(&filter), "registrations_2026-08-01_to_2026-08-06.csv");
        assert_eq!(
            filename(&ExportFilter::default()),
            "registrations_all_to_all.csv"
        );
    }
}
