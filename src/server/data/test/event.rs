use chrono::NaiveDate;

use super::*;
use crate::server::{data::event::EventRepository, model::event::EventParams};

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Tests creating an event at a location.
///
/// Verifies that the location is eagerly loaded and the dates round-trip.
///
/// Expected: Ok with location populated
#[tokio::test]
async fn creates_event_with_location() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let location = factory::create_location(db).await?;
    let repo = EventRepository::new(db);

    let created = repo
        .create(EventParams {
            name: "RustConf".to_string(),
            start_date: date(2026, 9, 8),
            end_date: date(2026, 9, 10),
            location_id: Some(location.id),
        })
        .await?;

    assert_eq!(Some(created.start_date), date(2026, 9, 8));
    assert_eq!(Some(created.end_date), date(2026, 9, 10));
    assert_eq!(created.location.as_ref().map(|l| l.id), Some(location.id));
    assert_eq!(repo.get_by_id(created.id).await?, created);

    Ok(())
}

/// Tests that missing dates are reported.
///
/// Expected: Err(ValidationFailed) on startDate and endDate
#[tokio::test]
async fn requires_dates() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();

    let result = EventRepository::new(db)
        .create(EventParams {
            name: "RustConf".to_string(),
            ..Default::default()
        })
        .await;

    match result {
        Err(StoreError::ValidationFailed(err)) => {
            assert!(err.has_field("startDate"));
            assert!(err.has_field("endDate"));
        }
        other => panic!("expected ValidationFailed, got {:?}", other),
    }

    Ok(())
}

/// Tests that an event may not end before it starts.
///
/// Expected: Err(ValidationFailed) on endDate
#[tokio::test]
async fn rejects_end_before_start() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();

    let result = EventRepository::new(db)
        .create(EventParams {
            name: "RustConf".to_string(),
            start_date: date(2026, 9, 10),
            end_date: date(2026, 9, 8),
            location_id: None,
        })
        .await;

    assert_violation(result, "endDate");
    assert_eq!(count::<entity::prelude::Event>(db).await?, 0);

    Ok(())
}

/// Tests that a single-day event is accepted.
///
/// Expected: Ok
#[tokio::test]
async fn accepts_single_day_event() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();

    let created = EventRepository::new(db)
        .create(EventParams {
            name: "Meetup".to_string(),
            start_date: date(2026, 11, 3),
            end_date: date(2026, 11, 3),
            location_id: None,
        })
        .await?;

    assert!(created.location.is_none());

    Ok(())
}
