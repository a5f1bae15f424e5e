//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::filter::PropertyFilter;
use crate::domain::property::{NewProperty, Property};
use crate::domain::types::PropertyId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{PropertyListQuery, PropertyReader, PropertyWriter};

mock! {
    pub Repository {}

    impl PropertyReader for Repository {
        fn get_property_by_id(&self, id: PropertyId) -> RepositoryResult<Option<Property>>;
        fn search_properties(
            &self,
            query: PropertyListQuery,
        ) -> RepositoryResult<(usize, Vec<Property>)>;
        fn count_properties(&self, filter: &PropertyFilter) -> RepositoryResult<usize>;
    }

    impl PropertyWriter for Repository {
        fn create_property(&self, new_property: &NewProperty) -> RepositoryResult<Property>;
        fn replace_property(
            &self,
            id: PropertyId,
            property: &NewProperty,
        ) -> RepositoryResult<Option<Property>>;
        fn delete_property(&self, id: PropertyId) -> RepositoryResult<bool>;
    }
}
