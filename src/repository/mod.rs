use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        filter::PropertyFilter,
        property::{NewProperty, Property},
        types::PropertyId,
    },
    pagination::PageRequest,
    repository::errors::RepositoryResult,
};

pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod property;

/// Diesel-backed store shared by every repository trait implementation.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// A filtered, optionally paginated listing request.
///
/// Results are ordered by `created_at` descending, then `id` ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyListQuery {
    pub filter: PropertyFilter,
    pub pagination: Option<PageRequest>,
}

impl PropertyListQuery {
    pub fn new(filter: PropertyFilter) -> Self {
        Self {
            filter,
            pagination: None,
        }
    }

    pub fn paginate(mut self, request: PageRequest) -> Self {
        self.pagination = Some(request);
        self
    }
}

pub trait PropertyReader {
    fn get_property_by_id(&self, id: PropertyId) -> RepositoryResult<Option<Property>>;
    /// Returns the total number of matches and the requested window of them.
    fn search_properties(&self, query: PropertyListQuery)
    -> RepositoryResult<(usize, Vec<Property>)>;
    fn count_properties(&self, filter: &PropertyFilter) -> RepositoryResult<usize>;
}

pub trait PropertyWriter {
    fn create_property(&self, new_property: &NewProperty) -> RepositoryResult<Property>;
    /// Replaces every writable field; `None` when no such property exists.
    fn replace_property(
        &self,
        id: PropertyId,
        property: &NewProperty,
    ) -> RepositoryResult<Option<Property>>;
    /// Returns whether a row was removed.
    fn delete_property(&self, id: PropertyId) -> RepositoryResult<bool>;
}
