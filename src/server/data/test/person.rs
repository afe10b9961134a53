use super::*;
use crate::server::{data::person::PersonRepository, model::person::PersonParams};

/// Tests creating a person with an organization.
///
/// Verifies that the organization is eagerly loaded on the returned person.
///
/// Expected: Ok with organization populated
#[tokio::test]
async fn creates_person_with_organization() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let organization = factory::organization::create_organization_named(db, "Acme").await?;
    let repo = PersonRepository::new(db);

    let created = repo
        .create(PersonParams {
            name: "Ada Lovelace".to_string(),
            email: Some("ada@example.org".to_string()),
            organization_id: Some(organization.id),
        })
        .await?;

    assert_eq!(created.organization_id, Some(organization.id));
    assert_eq!(
        created.organization.as_ref().map(|o| o.name.as_str()),
        Some("Acme")
    );
    assert_eq!(repo.get_by_id(created.id).await?, created);

    Ok(())
}

/// Tests referencing an organization that does not exist.
///
/// Expected: Err(ValidationFailed) on organizationId and no person stored
#[tokio::test]
async fn rejects_unknown_organization() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();

    let result = PersonRepository::new(db)
        .create(PersonParams {
            name: "Ada Lovelace".to_string(),
            email: None,
            organization_id: Some(4242),
        })
        .await;

    assert_violation(result, "organizationId");
    assert_eq!(count::<entity::prelude::Person>(db).await?, 0);

    Ok(())
}

/// Tests that a malformed e-mail address is rejected.
///
/// Expected: Err(ValidationFailed) on email
#[tokio::test]
async fn rejects_malformed_email() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();

    let result = PersonRepository::new(db)
        .create(PersonParams {
            name: "Ada Lovelace".to_string(),
            email: Some("ada.example.org".to_string()),
            organization_id: None,
        })
        .await;

    assert_violation(result, "email");

    Ok(())
}

/// Tests that deleting an organization keeps its members.
///
/// Expected: person still present with no organization
#[tokio::test]
async fn organization_delete_unsets_person_organization() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let organization = factory::create_organization(db).await?;
    let person = factory::person::PersonFactory::new(db)
        .organization_id(Some(organization.id))
        .build()
        .await?;

    entity::prelude::Organization::delete_by_id(organization.id)
        .exec(db)
        .await?;

    let person = PersonRepository::new(db).get_by_id(person.id).await?;
    assert_eq!(person.organization_id, None);
    assert!(person.organization.is_none());

    Ok(())
}

/// Tests updating a person removes the organization when none is given.
///
/// Expected: Ok with organization cleared
#[tokio::test]
async fn update_replaces_all_fields() -> Result<(), StoreError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let organization = factory::create_organization(db).await?;
    let person = factory::person::PersonFactory::new(db)
        .organization_id(Some(organization.id))
        .build()
        .await?;

    let updated = PersonRepository::new(db)
        .update(
            person.id,
            PersonParams {
                name: "Grace Hopper".to_string(),
                email: None,
                organization_id: None,
            },
        )
        .await?;

    assert_eq!(updated.name, "Grace Hopper");
    assert_eq!(updated.email, None);
    assert_eq!(updated.organization_id, None);

    Ok(())
}
