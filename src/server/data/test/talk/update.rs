use super::*;

/// Tests that update replaces the relation sets instead of merging them.
///
/// Verifies that the old person and talk date are gone and only the new ones remain.
///
/// Expected: Ok with exactly the new relations
#[tokio::test]
async fn replaces_relation_sets() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let (_, room, event, talk) = factory::helpers::create_scheduled_talk(db).await?;
    let old_speaker = factory::create_person(db).await?;
    let new_speaker = factory::create_person(db).await?;
    factory::talk::add_person(db, talk.id, old_speaker.id).await?;
    let other_event = factory::create_event(db).await?;

    let updated = TalkRepository::new(db)
        .update(
            talk.id,
            TalkParams {
                title: "Renamed".to_string(),
                level: "expert".to_string(),
                person_ids: vec![new_speaker.id],
                talk_dates: vec![TalkDateParams {
                    event_id: Some(other_event.id),
                    room_id: Some(room.id),
                    begins_at: None,
                }],
                ..talk_params()
            },
        )
        .await?;

    assert_eq!(updated.id, talk.id);
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.level, TalkLevel::Expert);
    assert_eq!(
        updated.persons.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![new_speaker.id]
    );
    assert_eq!(updated.talk_dates.len(), 1);
    assert_eq!(updated.talk_dates[0].event_id, other_event.id);
    assert_ne!(updated.talk_dates[0].event_id, event.id);
    assert_eq!(count::<entity::prelude::TalkDate>(db).await?, 1);

    Ok(())
}

/// Tests that empty relation lists clear every relation.
///
/// Expected: Ok with no persons, topics or talk dates
#[tokio::test]
async fn clears_relations() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let (_, _, _, talk) = factory::helpers::create_scheduled_talk(db).await?;
    let topic = factory::create_topic(db).await?;
    factory::talk::add_topic(db, talk.id, topic.id).await?;

    let updated = TalkRepository::new(db).update(talk.id, talk_params()).await?;

    assert!(updated.persons.is_empty());
    assert!(updated.topics.is_empty());
    assert!(updated.talk_dates.is_empty());

    Ok(())
}

/// Tests updating a talk that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn missing_talk_is_not_found() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();

    assert_not_found(
        TalkRepository::new(db).update(999_999, talk_params()).await,
        999_999,
    );

    Ok(())
}

/// Tests that a failed update leaves the stored talk untouched.
///
/// Expected: Err(ValidationFailed) and the original relations still present
#[tokio::test]
async fn failed_update_keeps_existing_relations() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let (_, _, _, talk) = factory::helpers::create_scheduled_talk(db).await?;
    let repo = TalkRepository::new(db);

    let result = repo
        .update(
            talk.id,
            TalkParams {
                person_ids: vec![31337],
                ..talk_params()
            },
        )
        .await;

    assert_violation(result, "personIds");
    let stored = repo.get_by_id(talk.id).await?;
    assert_eq!(stored.title, talk.title);
    assert_eq!(stored.talk_dates.len(), 1);

    Ok(())
}
