//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique names in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a talk scheduled at an event in a room, with every dependency.
///
/// Creates, in order: location, room, event (at the location), talk, and the talk date
/// linking them.
///
/// # Returns
/// - `Ok((location, room, event, talk))` - All created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_scheduled_talk(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::location::Model,
        entity::room::Model,
        entity::event::Model,
        entity::talk::Model,
    ),
    DbErr,
> {
    let location = crate::factory::location::create_location(db).await?;
    let room = crate::factory::room::create_room(db, location.id).await?;
    let event = crate::factory::event::EventFactory::new(db)
        .location_id(Some(location.id))
        .build()
        .await?;
    let talk = crate::factory::talk::create_talk(db).await?;
    crate::factory::talk::add_talk_date(db, talk.id, event.id, room.id).await?;

    Ok((location, room, event, talk))
}
