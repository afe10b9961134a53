use super::*;

/// Tests listing the talks scheduled at an event.
///
/// Verifies that a talk scheduled twice at the same event is listed once and that talks at
/// other events are excluded.
///
/// Expected: Ok with only the matching talk
#[tokio::test]
async fn gets_talks_by_event() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let (_, room, event, talk) = factory::helpers::create_scheduled_talk(db).await?;
    factory::talk::add_talk_date(db, talk.id, event.id, room.id).await?;
    factory::helpers::create_scheduled_talk(db).await?;

    let talks = TalkRepository::new(db).get_by_event_id(event.id).await?;

    assert_eq!(talks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![talk.id]);
    assert_eq!(talks[0].talk_dates.len(), 2);

    Ok(())
}

/// Tests listing the talks of a person.
///
/// Expected: Ok with the person's talks in ascending id order
#[tokio::test]
async fn gets_talks_by_person() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let person = factory::create_person(db).await?;
    let first = factory::create_talk(db).await?;
    let second = factory::create_talk(db).await?;
    let unrelated = factory::create_talk(db).await?;
    factory::talk::add_person(db, second.id, person.id).await?;
    factory::talk::add_person(db, first.id, person.id).await?;

    let talks = TalkRepository::new(db).get_by_person_id(person.id).await?;
    let ids: Vec<i32> = talks.iter().map(|t| t.id).collect();

    assert_eq!(ids, vec![first.id, second.id]);
    assert!(!ids.contains(&unrelated.id));

    Ok(())
}

/// Tests relation queries with ids that do not exist.
///
/// Expected: Ok with empty lists
#[tokio::test]
async fn unknown_ids_yield_empty_lists() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let repo = TalkRepository::new(db);

    assert!(repo.get_by_event_id(999_999).await?.is_empty());
    assert!(repo.get_by_person_id(999_999).await?.is_empty());

    Ok(())
}
