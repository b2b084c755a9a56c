mod common;

use eventdesk::database::registrations_repo::{self, NewRegistration};
use eventdesk::models::now_timestamp;
use eventdesk::services::checkin_service;
use eventdesk::services::export_service;
use eventdesk::services::stats_service;
use eventdesk::services::attendee_service;

#[tokio::test]
async fn aggregate_on_empty_registry() {
    let pool = common::memory_pool().await;

    let stats = stats_service::aggregate(&pool).await.unwrap();
    assert_eq!(stats.total, 0);
    assert_eq!(stats.checked_in, 0);
    assert_eq!(stats.pending, 0);
    assert_eq!(stats.checkin_rate, "0%");
    assert!(stats.hourly_checkins.is_empty());
}

#[tokio::test]
async fn aggregate_after_ten_inserts_and_seven_checkins() {
    let pool = common::memory_pool().await;
    let now = now_timestamp();

    for i in 0..10 {
        common::insert_with_id(&pool, &format!("RWT-STAT000{i}"), "Gast", "Nummer", &now)
            .await
            .unwrap();
    }
    for i in 0..7 {
        checkin_service::checkin(&pool, &format!("RWT-STAT000{i}"))
            .await
            .expect("check-in");
    }

    let stats = stats_service::aggregate(&pool).await.unwrap();
    assert_eq!(stats.total, 10);
    assert_eq!(stats.checked_in, 7);
    assert_eq!(stats.pending, 3);
    assert_eq!(stats.checkin_rate, "70.0%");

    // All seven check-ins happened just now, on the current UTC day.
    let bucketed: i64 = stats.hourly_checkins.values().sum();
    assert_eq!(bucketed, 7);
    for hour in stats.hourly_checkins.keys() {
        assert_eq!(hour.len(), 2);
    }
}

#[tokio::test]
async fn aggregate_counts_category_flags() {
    let pool = common::memory_pool().await;
    let now = now_timestamp();

    let flags = [(true, false), (true, false), (false, true), (false, false)];
    for (i, (worship, volunteer)) in flags.iter().enumerate() {
        registrations_repo::insert(
            &pool,
            NewRegistration {
                ticket_id: &format!("RWT-FLAG000{i}"),
                first_name: "Vlag",
                last_name: "Drager",
                email: "vlag@example.org",
                phone: None,
                emergency_contact: None,
                medical_notes: None,
                worship_team: *worship,
                volunteer: *volunteer,
                source_system: "manual",
                registration_time: &now,
            },
        )
        .await
        .unwrap();
    }

    let stats = stats_service::aggregate(&pool).await.unwrap();
    assert_eq!(stats.worship_team, 2);
    assert_eq!(stats.volunteers, 1);
}

#[tokio::test]
async fn name_search_is_case_insensitive_and_capped_at_ten() {
    let pool = common::memory_pool().await;
    let now = now_timestamp();

    common::insert_with_id(&pool, "RWT-NAME0000", "Jordan", "Smit", &now)
        .await
        .unwrap();
    common::insert_with_id(&pool, "RWT-NAME0001", "Mira", "Jonker", &now)
        .await
        .unwrap();
    common::insert_with_id(&pool, "RWT-NAME0002", "Pieter", "Bakker", &now)
        .await
        .unwrap();

    let results = attendee_service::search_by_name(&pool, "jo").await.unwrap();
    let ids: Vec<&str> = results.iter().map(|r| r.ticket_id.as_str()).collect();
    assert_eq!(ids, ["RWT-NAME0000", "RWT-NAME0001"]);

    let results = attendee_service::search_by_name(&pool, "Jo").await.unwrap();
    assert_eq!(results.len(), 2);

    for i in 0..12 {
        common::insert_with_id(&pool, &format!("RWT-CAP000{i:02}"), "Jody", "Veld", &now)
            .await
            .unwrap();
    }
    let capped = attendee_service::search_by_name(&pool, "Jody").await.unwrap();
    assert_eq!(capped.len(), 10);
}

#[tokio::test]
async fn export_filters_compose_over_status_category_and_date_range() {
    let pool = common::memory_pool().await;

    registrations_repo::insert(
        &pool,
        NewRegistration {
            ticket_id: "RWT-EXP00000",
            first_name: "Vroeg",
            last_name: "Vogel",
            email: "vroeg@example.org",
            phone: None,
            emergency_contact: None,
            medical_notes: None,
            worship_team: true,
            volunteer: false,
            source_system: "manual",
            registration_time: "2026-08-01 09:00:00",
        },
    )
    .await
    .unwrap();
    registrations_repo::insert(
        &pool,
        NewRegistration {
            ticket_id: "RWT-EXP00001",
            first_name: "Laat",
            last_name: "Komer",
            email: "laat@example.org",
            phone: None,
            emergency_contact: None,
            medical_notes: None,
            worship_team: false,
            volunteer: true,
            source_system: "mobile",
            registration_time: "2026-08-05 21:30:00",
        },
    )
    .await
    .unwrap();

    checkin_service::checkin(&pool, "RWT-EXP00001").await.unwrap();

    // Status filter.
    let filter = export_service::parse_filter(Some("checked_in"), None, None, None).unwrap();
    let rows = export_service::export_rows(&pool, &filter).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ticket_id, "RWT-EXP00001");

    // Category filter.
    let filter = export_service::parse_filter(None, Some("worship_team"), None, None).unwrap();
    let rows = export_service::export_rows(&pool, &filter).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ticket_id, "RWT-EXP00000");

    // Date range keeps only the early registration.
    let filter =
        export_service::parse_filter(None, None, Some("2026-08-01"), Some("2026-08-03")).unwrap();
    let rows = export_service::export_rows(&pool, &filter).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ticket_id, "RWT-EXP00000");

    // No filter: everything, insertion-ordered, serializable.
    let rows = export_service::export_rows(&pool, &Default::default())
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    let summary = export_service::summarize(&rows);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.checked_in, 1);

    let csv = export_service::to_csv(&rows);
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.lines().nth(1).unwrap().starts_with("RWT-EXP00000,Vroeg,Vogel,"));
}

#[tokio::test]
async fn recent_feeds_are_newest_first_and_bounded() {
    let pool = common::memory_pool().await;
    let now = now_timestamp();

    for i in 0..12 {
        common::insert_with_id(&pool, &format!("RWT-FEED00{i:02}"), "Feed", "Rij", &now)
            .await
            .unwrap();
    }

    let feed = attendee_service::recent_registrations(&pool, None).await.unwrap();
    assert_eq!(feed.len(), 10);
    assert_eq!(feed[0].ticket_id, "RWT-FEED0011");
    assert_eq!(feed[9].ticket_id, "RWT-FEED0002");

    for i in 0..7 {
        checkin_service::checkin(&pool, &format!("RWT-FEED00{i:02}"))
            .await
            .unwrap();
    }
    let checkins = attendee_service::recent_checkins(&pool, None).await.unwrap();
    assert_eq!(checkins.len(), 5);
    assert!(checkins.iter().all(|c| !c.checkin_time.is_empty()));
}
