//! Person factory for creating test person entities.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test persons with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let person = PersonFactory::new(&db)
///     .name("Ada Lovelace")
///     .organization_id(Some(org.id))
///     .build()
///     .await?;
/// ```
pub struct PersonFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    email: Option<String>,
    organization_id: Option<i32>,
}

impl<'a> PersonFactory<'a> {
    /// Creates a new PersonFactory with a unique name and no organization.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Person {}", id),
            email: Some(format!("person{}@example.com", id)),
            organization_id: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    pub fn organization_id(mut self, organization_id: Option<i32>) -> Self {
        self.organization_id = organization_id;
        self
    }

    /// Inserts the person into the database.
    pub async fn build(self) -> Result<entity::person::Model, DbErr> {
        entity::person::ActiveModel {
            name: ActiveValue::Set(self.name),
            email: ActiveValue::Set(self.email),
            organization_id: ActiveValue::Set(self.organization_id),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a person with default values.
pub async fn create_person(db: &DatabaseConnection) -> Result<entity::person::Model, DbErr> {
    PersonFactory::new(db).build().await
}
