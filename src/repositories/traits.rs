//! Common repository traits
//!
//! This module defines generic interfaces for database operations.

/// Trait for creating new entities in the database
///
/// # Type Parameters
/// * `Entity` - Type of the returned entity (with ID assigned by the database)
/// * `CreateDTO` - DTO for creation (without ID, will be automatically generated)
pub trait Create<Entity, CreateDTO> {
    /// Creates a new entity in the database
    ///
    /// # Returns
    /// * `Ok(Entity)` - Created entity, read back from the store
    /// * `Err(sqlx::Error)` - Error during insertion
    async fn create(&self, data: &CreateDTO) -> Result<Entity, sqlx::Error>;
}

/// Trait for reading a single entity by primary key
///
/// # Type Parameters
/// * `Entity` - Type of the entity to read
/// * `Id` - Type of the primary key (e.g. `i64`, `String`)
pub trait Read<Entity, Id: ?Sized> {
    /// Reads an entity from the database by its primary key
    ///
    /// # Returns
    /// * `Ok(Some(Entity))` - Entity found
    /// * `Ok(None)` - No entity with that ID
    /// * `Err(sqlx::Error)` - Error during reading
    async fn read(&self, id: &Id) -> Result<Option<Entity>, sqlx::Error>;
}

/// Trait for deleting entities
///
/// # Type Parameters
/// * `Id` - Type of the primary key
pub trait Delete<Id: ?Sized> {
    /// Deletes an entity from the database. Deleting a missing row is not an error.
    async fn delete(&self, id: &Id) -> Result<(), sqlx::Error>;
}
