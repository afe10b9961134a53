use chrono::{TimeZone, Utc};

use super::*;

/// Tests creating a talk with persons, topics and a talk date.
///
/// Verifies that every relation is stored and eagerly loaded: persons with their
/// organization, topics with their children, talk dates with room and event.
///
/// Expected: Ok with all relations populated and equal to a fresh read
#[tokio::test]
async fn creates_talk_with_relations() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();

    let organization = factory::create_organization(db).await?;
    let speaker = factory::person::PersonFactory::new(db)
        .organization_id(Some(organization.id))
        .build()
        .await?;
    let topic = factory::create_topic(db).await?;
    let subtopic = factory::topic::create_child_topic(db, Some(topic.id)).await?;
    let location = factory::create_location(db).await?;
    let room = factory::create_room(db, location.id).await?;
    let event = factory::event::EventFactory::new(db)
        .location_id(Some(location.id))
        .build()
        .await?;
    let begins_at = Utc.with_ymd_and_hms(2026, 5, 4, 9, 30, 0).unwrap();

    let repo = TalkRepository::new(db);
    let created = repo
        .create(TalkParams {
            person_ids: vec![speaker.id],
            topic_ids: vec![topic.id],
            talk_dates: vec![TalkDateParams {
                event_id: Some(event.id),
                room_id: Some(room.id),
                begins_at: Some(begins_at),
            }],
            ..talk_params()
        })
        .await?;

    assert!(created.id > 0);
    assert_eq!(created.level, TalkLevel::Advanced);
    assert_eq!(created.persons.len(), 1);
    assert_eq!(
        created.persons[0].organization.as_ref().map(|o| o.id),
        Some(organization.id)
    );
    assert_eq!(created.topics.len(), 1);
    assert_eq!(created.topics[0].children[0].id, subtopic.id);
    assert_eq!(created.talk_dates.len(), 1);

    let talk_date = &created.talk_dates[0];
    assert_eq!(talk_date.begins_at, Some(begins_at));
    assert_eq!(talk_date.room.as_ref().map(|r| r.id), Some(room.id));
    assert_eq!(talk_date.event.as_ref().map(|e| e.id), Some(event.id));
    let nested_event = talk_date.event.as_ref().unwrap();
    assert_eq!(nested_event.location.as_ref().map(|l| l.id), Some(location.id));

    assert_eq!(repo.get_by_id(created.id).await?, created);

    Ok(())
}

/// Tests that persons are listed by id regardless of input order, and duplicates collapse.
///
/// Expected: Ok with persons in ascending id order
#[tokio::test]
async fn orders_persons_by_id() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let first = factory::create_person(db).await?;
    let second = factory::create_person(db).await?;

    let created = TalkRepository::new(db)
        .create(TalkParams {
            person_ids: vec![second.id, first.id],
            ..talk_params()
        })
        .await?;

    assert_eq!(
        created.persons.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![first.id, second.id]
    );

    Ok(())
}

/// Tests that missing required fields are all reported and nothing is written.
///
/// Expected: Err(ValidationFailed) on title, durationInMinutes, language and level
#[tokio::test]
async fn rejects_incomplete_talk_without_writing() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();

    let result = TalkRepository::new(db).create(TalkParams::default()).await;

    match result {
        Err(StoreError::ValidationFailed(err)) => {
            for field in ["title", "durationInMinutes", "language", "level"] {
                assert!(err.has_field(field), "missing violation on {}", field);
            }
        }
        other => panic!("expected ValidationFailed, got {:?}", other),
    }
    assert_eq!(count::<entity::prelude::Talk>(db).await?, 0);

    Ok(())
}

/// Tests that unknown person, topic, event and room references are reported together.
///
/// Expected: Err(ValidationFailed) on every unknown reference, no rows written
#[tokio::test]
async fn rejects_unknown_references() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let person = factory::create_person(db).await?;

    let result = TalkRepository::new(db)
        .create(TalkParams {
            person_ids: vec![person.id, 901],
            topic_ids: vec![902],
            talk_dates: vec![TalkDateParams {
                event_id: Some(903),
                room_id: Some(904),
                begins_at: None,
            }],
            ..talk_params()
        })
        .await;

    match result {
        Err(StoreError::ValidationFailed(err)) => {
            for field in [
                "personIds",
                "topicIds",
                "talkDates[0].eventId",
                "talkDates[0].roomId",
            ] {
                assert!(err.has_field(field), "missing violation on {}", field);
            }
        }
        other => panic!("expected ValidationFailed, got {:?}", other),
    }
    assert_eq!(count::<entity::prelude::Talk>(db).await?, 0);
    assert_eq!(count::<entity::prelude::TalkPerson>(db).await?, 0);

    Ok(())
}

/// Tests that an unknown level is rejected.
///
/// Expected: Err(ValidationFailed) on level
#[tokio::test]
async fn rejects_unknown_level() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();

    let result = TalkRepository::new(db)
        .create(TalkParams {
            level: "intermediate".to_string(),
            ..talk_params()
        })
        .await;

    assert_violation(result, "level");

    Ok(())
}
