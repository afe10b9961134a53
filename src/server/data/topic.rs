use std::collections::{HashMap, HashSet};

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::{
    data::{ReferenceCheck, Store},
    error::store::StoreError,
    model::{
        topic::{Topic, TopicParams},
        validate::Validate,
    },
};

const ENTITY: &str = "Topic";

pub struct TopicRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TopicRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Checks that the parent exists and, for an existing topic, that it is not the topic
    /// itself or one of its descendants.
    async fn check_references<C: ConnectionTrait>(
        conn: &C,
        id: Option<i32>,
        params: &TopicParams,
    ) -> Result<(), StoreError> {
        let mut check = ReferenceCheck::new();

        if let Some(parent_id) = params.parent_id {
            check
                .require::<entity::prelude::Topic, _>(
                    conn,
                    "parentId",
                    entity::topic::Column::Id,
                    &[parent_id],
                )
                .await?;

            if let Some(id) = id {
                if is_same_or_descendant(conn, parent_id, id).await? {
                    check.violation(
                        "parentId",
                        "must not be the topic itself or one of its descendants",
                    );
                }
            }
        }

        Ok(check.finish()?)
    }
}

impl Store for TopicRepository<'_> {
    type Record = Topic;
    type Params = TopicParams;

    async fn get_all(&self) -> Result<Vec<Topic>, StoreError> {
        let topics = entity::prelude::Topic::find()
            .order_by_asc(entity::topic::Column::Id)
            .all(self.db)
            .await?;

        Ok(load_topics(self.db, topics).await?)
    }

    async fn get_by_id(&self, id: i32) -> Result<Topic, StoreError> {
        let topic = entity::prelude::Topic::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, id))?;

        load_topics(self.db, vec![topic])
            .await?
            .pop()
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    async fn create(&self, params: TopicParams) -> Result<Topic, StoreError> {
        params.validate()?;
        tracing::debug!("Creating topic '{}'", params.name);

        let txn = self.db.begin().await?;
        Self::check_references(&txn, None, &params).await?;

        let topic = entity::topic::ActiveModel {
            name: ActiveValue::Set(params.name),
            parent_id: ActiveValue::Set(params.parent_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        self.get_by_id(topic.id).await
    }

    async fn update(&self, id: i32, params: TopicParams) -> Result<Topic, StoreError> {
        params.validate()?;
        tracing::debug!("Updating topic {}", id);

        let txn = self.db.begin().await?;

        entity::prelude::Topic::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, id))?;
        Self::check_references(&txn, Some(id), &params).await?;

        entity::topic::ActiveModel {
            id: ActiveValue::Unchanged(id),
            name: ActiveValue::Set(params.name),
            parent_id: ActiveValue::Set(params.parent_id),
        }
        .update(&txn)
        .await?;

        txn.commit().await?;

        self.get_by_id(id).await
    }

    /// Deletes a topic. Its children become root topics and talks lose the topic.
    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        tracing::debug!("Deleting topic {}", id);

        let result = entity::prelude::Topic::delete_by_id(id)
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::not_found(ENTITY, id));
        }

        Ok(())
    }
}

/// Attaches direct children to each topic, preserving the input order.
pub(crate) async fn load_topics<C: ConnectionTrait>(
    conn: &C,
    topics: Vec<entity::topic::Model>,
) -> Result<Vec<Topic>, DbErr> {
    if topics.is_empty() {
        return Ok(Vec::new());
    }

    let topic_ids: Vec<i32> = topics.iter().map(|t| t.id).collect();
    let children = entity::prelude::Topic::find()
        .filter(entity::topic::Column::ParentId.is_in(topic_ids))
        .order_by_asc(entity::topic::Column::Id)
        .all(conn)
        .await?;

    let mut children_by_parent: HashMap<i32, Vec<entity::topic::Model>> = HashMap::new();
    for child in children {
        if let Some(parent_id) = child.parent_id {
            children_by_parent.entry(parent_id).or_default().push(child);
        }
    }

    Ok(topics
        .into_iter()
        .map(|topic| {
            let children = children_by_parent.remove(&topic.id).unwrap_or_default();
            Topic::from_entity(topic, children)
        })
        .collect())
}

/// Loads topics with their children, keyed by topic id.
pub(crate) async fn load_topics_by_id<C: ConnectionTrait>(
    conn: &C,
    ids: Vec<i32>,
) -> Result<HashMap<i32, Topic>, DbErr> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let topics = entity::prelude::Topic::find()
        .filter(entity::topic::Column::Id.is_in(ids))
        .all(conn)
        .await?;

    Ok(load_topics(conn, topics)
        .await?
        .into_iter()
        .map(|topic| (topic.id, topic))
        .collect())
}

/// Reports whether `topic_id` is `ancestor_id` or lies below it, walking up the parent chain.
async fn is_same_or_descendant<C: ConnectionTrait>(
    conn: &C,
    topic_id: i32,
    ancestor_id: i32,
) -> Result<bool, DbErr> {
    let mut visited = HashSet::new();
    let mut current = Some(topic_id);

    while let Some(topic_id) = current {
        if topic_id == ancestor_id {
            return Ok(true);
        }
        if !visited.insert(topic_id) {
            break;
        }

        current = entity::prelude::Topic::find_by_id(topic_id)
            .one(conn)
            .await?
            .and_then(|topic| topic.parent_id);
    }

    Ok(false)
}
