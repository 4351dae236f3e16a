//! Repository trait definitions
//!
//! The traits use RPITIT (return position `impl Trait` in traits) so async
//! methods need no `async_trait` boxing. Implementations may simply write
//! `async fn`.

use std::future::Future;

use super::error::RepositoryError;
use super::pagination::{OrderDirection, Pagination};

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Base repository trait for CRUD operations
///
/// # Type Parameters
///
/// - `Id`: The identifier type for the entity (e.g., `ActorId`)
/// - `Entity`: The full entity type returned from queries
/// - `Create`: The validated data used to insert a new entity
/// - `Update`: The validated partial changes applied to an existing entity
pub trait Repository<Id, Entity, Create, Update>: Send + Sync {
    /// Find an entity by its unique identifier
    ///
    /// Returns `Ok(Some(entity))` if found, `Ok(None)` if not found.
    fn find_by_id(&self, id: &Id) -> impl Future<Output = RepositoryResult<Option<Entity>>> + Send;

    /// Fetch one page of entities ordered by identifier
    fn find_all(
        &self,
        order: OrderDirection,
        pagination: Pagination,
    ) -> impl Future<Output = RepositoryResult<Vec<Entity>>> + Send;

    /// Count all entities
    fn count(&self) -> impl Future<Output = RepositoryResult<u64>> + Send;

    /// Check if an entity with the given ID exists
    fn exists(&self, id: &Id) -> impl Future<Output = RepositoryResult<bool>> + Send;

    /// Create a new entity
    ///
    /// Returns the created entity with database-generated fields populated.
    fn create(&self, data: Create) -> impl Future<Output = RepositoryResult<Entity>> + Send;

    /// Update an existing entity
    ///
    /// Only the fields present in `data` change. Returns a `NotFound` error
    /// when no entity has the given ID.
    fn update(
        &self,
        id: &Id,
        data: Update,
    ) -> impl Future<Output = RepositoryResult<Entity>> + Send;

    /// Delete an entity by ID
    ///
    /// Returns `Ok(true)` if the entity was deleted, `Ok(false)` if not found.
    fn delete(&self, id: &Id) -> impl Future<Output = RepositoryResult<bool>> + Send;
}

/// Eager loading of the entities on the other side of a join table
///
/// A join between films and actors loads actors for a film and films for an
/// actor; the parent identifier type selects the direction.
pub trait RelationLoader<ParentId, Related>: Send + Sync {
    /// Load every related entity for one parent, ordered by the related ID
    fn load_related(
        &self,
        parent: &ParentId,
    ) -> impl Future<Output = RepositoryResult<Vec<Related>>> + Send;
}

/// Mutation of a many-to-many join table
pub trait LinkRepository<LeftId, RightId, Link>: Send + Sync {
    /// Insert the pair
    ///
    /// Fails with `AlreadyExists` when the pair is already linked and with
    /// `ForeignKeyViolation` when either side does not exist.
    fn link(
        &self,
        left: &LeftId,
        right: &RightId,
    ) -> impl Future<Output = RepositoryResult<Link>> + Send;

    /// Remove the pair
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if the pair was
    /// not linked.
    fn unlink(
        &self,
        left: &LeftId,
        right: &RightId,
    ) -> impl Future<Output = RepositoryResult<bool>> + Send;
}
