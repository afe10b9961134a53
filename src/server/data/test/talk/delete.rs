use super::*;

/// Tests that deleting a talk removes its relation rows but not the related entities.
///
/// Expected: Ok; junction and talk date rows gone, person and room kept
#[tokio::test]
async fn delete_cascades_to_relation_rows() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let (_, _, _, talk) = factory::helpers::create_scheduled_talk(db).await?;
    let person = factory::create_person(db).await?;
    factory::talk::add_person(db, talk.id, person.id).await?;
    let repo = TalkRepository::new(db);

    repo.delete(talk.id).await?;

    assert_eq!(count::<entity::prelude::TalkPerson>(db).await?, 0);
    assert_eq!(count::<entity::prelude::TalkDate>(db).await?, 0);
    assert_eq!(count::<entity::prelude::Person>(db).await?, 1);
    assert_eq!(count::<entity::prelude::Room>(db).await?, 1);
    assert_not_found(repo.delete(talk.id).await, talk.id);

    Ok(())
}

/// Tests that deleting an event drops the talk dates scheduled there.
///
/// Expected: talk kept without talk dates
#[tokio::test]
async fn event_delete_drops_talk_dates() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let (_, _, event, talk) = factory::helpers::create_scheduled_talk(db).await?;

    entity::prelude::Event::delete_by_id(event.id).exec(db).await?;

    let stored = TalkRepository::new(db).get_by_id(talk.id).await?;
    assert!(stored.talk_dates.is_empty());

    Ok(())
}
