use super::*;
use crate::server::{data::topic::TopicRepository, model::topic::TopicParams};

/// Tests that a topic is returned with its direct children only.
///
/// Expected: Ok with one child; the grandchild is not listed
#[tokio::test]
async fn loads_direct_children() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let root = factory::create_topic(db).await?;
    let child = factory::topic::create_child_topic(db, Some(root.id)).await?;
    factory::topic::create_child_topic(db, Some(child.id)).await?;

    let topic = TopicRepository::new(db).get_by_id(root.id).await?;

    assert_eq!(topic.children.len(), 1);
    assert_eq!(topic.children[0].id, child.id);
    assert_eq!(topic.children[0].parent_id, Some(root.id));

    Ok(())
}

/// Tests creating a topic below an existing parent.
///
/// Expected: Ok, and the parent now lists the new topic as child
#[tokio::test]
async fn creates_child_topic() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let repo = TopicRepository::new(db);
    let parent = repo
        .create(TopicParams {
            name: "Languages".to_string(),
            parent_id: None,
        })
        .await?;

    let child = repo
        .create(TopicParams {
            name: "Rust".to_string(),
            parent_id: Some(parent.id),
        })
        .await?;

    let parent = repo.get_by_id(parent.id).await?;
    assert_eq!(child.parent_id, Some(parent.id));
    assert_eq!(
        parent.children.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![child.id]
    );

    Ok(())
}

/// Tests that a topic cannot become its own ancestor.
///
/// Expected: Err(ValidationFailed) on parentId for self and for a descendant
#[tokio::test]
async fn rejects_parent_cycles() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let root = factory::create_topic(db).await?;
    let child = factory::topic::create_child_topic(db, Some(root.id)).await?;
    let repo = TopicRepository::new(db);

    let to_self = repo
        .update(
            root.id,
            TopicParams {
                name: root.name.clone(),
                parent_id: Some(root.id),
            },
        )
        .await;
    let to_child = repo
        .update(
            root.id,
            TopicParams {
                name: root.name.clone(),
                parent_id: Some(child.id),
            },
        )
        .await;

    assert_violation(to_self, "parentId");
    assert_violation(to_child, "parentId");

    Ok(())
}

/// Tests that deleting a parent turns its children into root topics.
///
/// Expected: child kept with no parent
#[tokio::test]
async fn delete_unsets_children_parent() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let root = factory::create_topic(db).await?;
    let child = factory::topic::create_child_topic(db, Some(root.id)).await?;
    let repo = TopicRepository::new(db);

    repo.delete(root.id).await?;

    assert_eq!(repo.get_by_id(child.id).await?.parent_id, None);
    assert_not_found(repo.delete(root.id).await, root.id);

    Ok(())
}
