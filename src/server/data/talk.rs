//! Talk repository.
//!
//! Talks own three relation sets: persons (`talk_person`), topics (`talk_topic`) and talk
//! dates (`talk_date`). Create and update write the talk row and all three sets in one
//! transaction; update replaces each set wholesale.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::server::{
    data::{
        describe_missing, event::load_events_by_id, find_missing_ids, person::load_persons_by_id,
        room::load_rooms_by_id, topic::load_topics_by_id, ReferenceCheck, Store,
    },
    error::{store::StoreError, validation::ValidationError},
    model::{
        talk::{Talk, TalkDate, TalkLevel, TalkParams},
        validate::{present, Validate},
    },
};

const ENTITY: &str = "Talk";

/// A talk date whose event and room have been checked for presence.
struct ResolvedTalkDate {
    event_id: i32,
    room_id: i32,
    begins_at: Option<DateTime<Utc>>,
}

pub struct TalkRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TalkRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the talks scheduled at an event, ordered by id.
    ///
    /// An unknown event id yields an empty list.
    pub async fn get_by_event_id(&self, event_id: i32) -> Result<Vec<Talk>, StoreError> {
        let talk_ids = entity::prelude::TalkDate::find()
            .select_only()
            .column(entity::talk_date::Column::TalkId)
            .filter(entity::talk_date::Column::EventId.eq(event_id))
            .distinct()
            .into_tuple::<i32>()
            .all(self.db)
            .await?;

        self.get_by_ids(talk_ids).await
    }

    /// Returns the talks a person speaks at, ordered by id.
    ///
    /// An unknown person id yields an empty list.
    pub async fn get_by_person_id(&self, person_id: i32) -> Result<Vec<Talk>, StoreError> {
        let talk_ids = entity::prelude::TalkPerson::find()
            .select_only()
            .column(entity::talk_person::Column::TalkId)
            .filter(entity::talk_person::Column::PersonId.eq(person_id))
            .into_tuple::<i32>()
            .all(self.db)
            .await?;

        self.get_by_ids(talk_ids).await
    }

    async fn get_by_ids(&self, ids: Vec<i32>) -> Result<Vec<Talk>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let talks = entity::prelude::Talk::find()
            .filter(entity::talk::Column::Id.is_in(ids))
            .order_by_asc(entity::talk::Column::Id)
            .all(self.db)
            .await?;

        Ok(load_talks(self.db, talks).await?)
    }

    async fn check_references<C: ConnectionTrait>(
        conn: &C,
        params: &TalkParams,
        talk_dates: &[ResolvedTalkDate],
    ) -> Result<(), StoreError> {
        let mut check = ReferenceCheck::new();
        check
            .require::<entity::prelude::Person, _>(
                conn,
                "personIds",
                entity::person::Column::Id,
                &params.person_ids,
            )
            .await?;
        check
            .require::<entity::prelude::Topic, _>(
                conn,
                "topicIds",
                entity::topic::Column::Id,
                &params.topic_ids,
            )
            .await?;

        let event_ids: Vec<i32> = talk_dates.iter().map(|td| td.event_id).collect();
        let missing_events = find_missing_ids::<entity::prelude::Event, _>(
            conn,
            entity::event::Column::Id,
            &event_ids,
        )
        .await?;

        let room_ids: Vec<i32> = talk_dates.iter().map(|td| td.room_id).collect();
        let missing_rooms = find_missing_ids::<entity::prelude::Room, _>(
            conn,
            entity::room::Column::Id,
            &room_ids,
        )
        .await?;

        for (index, talk_date) in talk_dates.iter().enumerate() {
            if missing_events.contains(&talk_date.event_id) {
                check.violation(
                    format!("talkDates[{}].eventId", index),
                    describe_missing(&[talk_date.event_id]),
                );
            }
            if missing_rooms.contains(&talk_date.room_id) {
                check.violation(
                    format!("talkDates[{}].roomId", index),
                    describe_missing(&[talk_date.room_id]),
                );
            }
        }

        Ok(check.finish()?)
    }

    /// Replaces the person, topic and talk date sets of a talk.
    async fn replace_relations<C: ConnectionTrait>(
        conn: &C,
        talk_id: i32,
        params: &TalkParams,
        talk_dates: Vec<ResolvedTalkDate>,
    ) -> Result<(), DbErr> {
        entity::prelude::TalkPerson::delete_many()
            .filter(entity::talk_person::Column::TalkId.eq(talk_id))
            .exec(conn)
            .await?;
        entity::prelude::TalkTopic::delete_many()
            .filter(entity::talk_topic::Column::TalkId.eq(talk_id))
            .exec(conn)
            .await?;
        entity::prelude::TalkDate::delete_many()
            .filter(entity::talk_date::Column::TalkId.eq(talk_id))
            .exec(conn)
            .await?;

        for person_id in &params.person_ids {
            entity::talk_person::ActiveModel {
                talk_id: ActiveValue::Set(talk_id),
                person_id: ActiveValue::Set(*person_id),
            }
            .insert(conn)
            .await?;
        }

        for topic_id in &params.topic_ids {
            entity::talk_topic::ActiveModel {
                talk_id: ActiveValue::Set(talk_id),
                topic_id: ActiveValue::Set(*topic_id),
            }
            .insert(conn)
            .await?;
        }

        for talk_date in talk_dates {
            entity::talk_date::ActiveModel {
                talk_id: ActiveValue::Set(talk_id),
                event_id: ActiveValue::Set(talk_date.event_id),
                room_id: ActiveValue::Set(talk_date.room_id),
                begins_at: ActiveValue::Set(talk_date.begins_at),
                ..Default::default()
            }
            .insert(conn)
            .await?;
        }

        Ok(())
    }
}

impl Store for TalkRepository<'_> {
    type Record = Talk;
    type Params = TalkParams;

    async fn get_all(&self) -> Result<Vec<Talk>, StoreError> {
        let talks = entity::prelude::Talk::find()
            .order_by_asc(entity::talk::Column::Id)
            .all(self.db)
            .await?;

        Ok(load_talks(self.db, talks).await?)
    }

    async fn get_by_id(&self, id: i32) -> Result<Talk, StoreError> {
        let talk = entity::prelude::Talk::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, id))?;

        load_talks(self.db, vec![talk])
            .await?
            .pop()
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    async fn create(&self, params: TalkParams) -> Result<Talk, StoreError> {
        params.validate()?;
        let level = parse_level(&params)?;
        let talk_dates = resolve_talk_dates(&params)?;
        tracing::debug!("Creating talk '{}'", params.title);

        let txn = self.db.begin().await?;
        Self::check_references(&txn, &params, &talk_dates).await?;

        let talk = entity::talk::ActiveModel {
            title: ActiveValue::Set(params.title.clone()),
            duration_in_minutes: ActiveValue::Set(params.duration_in_minutes),
            language: ActiveValue::Set(params.language.clone()),
            level: ActiveValue::Set(level.as_str().to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        Self::replace_relations(&txn, talk.id, &params, talk_dates).await?;

        txn.commit().await?;

        self.get_by_id(talk.id).await
    }

    async fn update(&self, id: i32, params: TalkParams) -> Result<Talk, StoreError> {
        params.validate()?;
        let level = parse_level(&params)?;
        let talk_dates = resolve_talk_dates(&params)?;
        tracing::debug!("Updating talk {}", id);

        let txn = self.db.begin().await?;

        entity::prelude::Talk::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, id))?;
        Self::check_references(&txn, &params, &talk_dates).await?;

        entity::talk::ActiveModel {
            id: ActiveValue::Unchanged(id),
            title: ActiveValue::Set(params.title.clone()),
            duration_in_minutes: ActiveValue::Set(params.duration_in_minutes),
            language: ActiveValue::Set(params.language.clone()),
            level: ActiveValue::Set(level.as_str().to_string()),
        }
        .update(&txn)
        .await?;

        Self::replace_relations(&txn, id, &params, talk_dates).await?;

        txn.commit().await?;

        self.get_by_id(id).await
    }

    /// Deletes a talk; its person and topic links and its talk dates go with it.
    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        tracing::debug!("Deleting talk {}", id);

        let result = entity::prelude::Talk::delete_by_id(id)
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::not_found(ENTITY, id));
        }

        Ok(())
    }
}

fn parse_level(params: &TalkParams) -> Result<TalkLevel, ValidationError> {
    params
        .level
        .parse::<TalkLevel>()
        .map_err(|e| ValidationError::single("level", e))
}

fn resolve_talk_dates(params: &TalkParams) -> Result<Vec<ResolvedTalkDate>, ValidationError> {
    params
        .talk_dates
        .iter()
        .enumerate()
        .map(|(index, talk_date)| -> Result<ResolvedTalkDate, ValidationError> {
            Ok(ResolvedTalkDate {
                event_id: present(&format!("talkDates[{}].eventId", index), talk_date.event_id)?,
                room_id: present(&format!("talkDates[{}].roomId", index), talk_date.room_id)?,
                begins_at: talk_date.begins_at,
            })
        })
        .collect()
}

/// Loads persons, topics and talk dates for each talk, preserving the input order.
///
/// Persons and topics are ordered by id; talk dates by their own id. Events nested in talk
/// dates carry their location like everywhere else.
async fn load_talks<C: ConnectionTrait>(
    conn: &C,
    talks: Vec<entity::talk::Model>,
) -> Result<Vec<Talk>, DbErr> {
    if talks.is_empty() {
        return Ok(Vec::new());
    }

    let talk_ids: Vec<i32> = talks.iter().map(|t| t.id).collect();

    let talk_persons = entity::prelude::TalkPerson::find()
        .filter(entity::talk_person::Column::TalkId.is_in(talk_ids.clone()))
        .order_by_asc(entity::talk_person::Column::PersonId)
        .all(conn)
        .await?;
    let talk_topics = entity::prelude::TalkTopic::find()
        .filter(entity::talk_topic::Column::TalkId.is_in(talk_ids.clone()))
        .order_by_asc(entity::talk_topic::Column::TopicId)
        .all(conn)
        .await?;
    let talk_dates = entity::prelude::TalkDate::find()
        .filter(entity::talk_date::Column::TalkId.is_in(talk_ids))
        .order_by_asc(entity::talk_date::Column::Id)
        .all(conn)
        .await?;

    let persons = load_persons_by_id(conn, talk_persons.iter().map(|tp| tp.person_id).collect())
        .await?;
    let topics =
        load_topics_by_id(conn, talk_topics.iter().map(|tt| tt.topic_id).collect()).await?;
    let events =
        load_events_by_id(conn, talk_dates.iter().map(|td| td.event_id).collect()).await?;
    let rooms = load_rooms_by_id(conn, talk_dates.iter().map(|td| td.room_id).collect()).await?;

    let mut persons_by_talk: HashMap<i32, Vec<_>> = HashMap::new();
    for link in talk_persons {
        if let Some(person) = persons.get(&link.person_id) {
            persons_by_talk
                .entry(link.talk_id)
                .or_default()
                .push(person.clone());
        }
    }

    let mut topics_by_talk: HashMap<i32, Vec<_>> = HashMap::new();
    for link in talk_topics {
        if let Some(topic) = topics.get(&link.topic_id) {
            topics_by_talk
                .entry(link.talk_id)
                .or_default()
                .push(topic.clone());
        }
    }

    let mut dates_by_talk: HashMap<i32, Vec<TalkDate>> = HashMap::new();
    for talk_date in talk_dates {
        let event = events.get(&talk_date.event_id).cloned();
        let room = rooms.get(&talk_date.room_id).cloned();
        dates_by_talk
            .entry(talk_date.talk_id)
            .or_default()
            .push(TalkDate::from_entity(talk_date, event, room));
    }

    talks
        .into_iter()
        .map(|talk| {
            let id = talk.id;
            Talk::from_entity(
                talk,
                persons_by_talk.remove(&id).unwrap_or_default(),
                topics_by_talk.remove(&id).unwrap_or_default(),
                dates_by_talk.remove(&id).unwrap_or_default(),
            )
        })
        .collect()
}
