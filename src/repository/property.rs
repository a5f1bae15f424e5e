//! Repository implementation for property listings.

use chrono::Utc;
use diesel::prelude::*;
use diesel::define_sql_function;
use diesel::sql_types::{Bool, Text};
use diesel::sqlite::Sqlite;

use crate::{
    domain::{
        filter::{PropertyFilter, PropertyPredicate, contains_ignore_case},
        property::{NewProperty, Property},
        types::PropertyId,
    },
    models::property::{
        NewProperty as DbNewProperty, Property as DbProperty, ReplaceProperty as DbReplaceProperty,
    },
    repository::{
        DieselRepository, PropertyListQuery, PropertyReader, PropertyWriter,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::properties,
};

type PropertyCondition = Box<dyn BoxableExpression<properties::table, Sqlite, SqlType = Bool>>;

define_sql_function! {
    /// Case-insensitive substring test with full Unicode case folding.
    fn contains_ci(haystack: Text, needle: Text) -> Bool;
}

/// Installs `contains_ci` on `conn`. Every pooled connection needs it before
/// text predicates can run.
pub fn register_sql_functions(conn: &mut SqliteConnection) -> QueryResult<()> {
    contains_ci_utils::register_impl(conn, |haystack: String, needle: String| {
        contains_ignore_case(&haystack, &needle)
    })
}

fn predicate_condition(predicate: PropertyPredicate) -> PropertyCondition {
    match predicate {
        PropertyPredicate::NameContains(needle) => Box::new(contains_ci(properties::name, needle)),
        PropertyPredicate::AddressContains(needle) => {
            Box::new(contains_ci(properties::address, needle))
        }
        PropertyPredicate::MinPrice(cents) => Box::new(properties::price_cents.ge(cents)),
        PropertyPredicate::MaxPrice(cents) => Box::new(properties::price_cents.le(cents)),
        PropertyPredicate::TypeIs(kind) => Box::new(properties::property_type.eq(kind.as_str())),
        PropertyPredicate::AvailabilityIs(flag) => Box::new(properties::is_available.eq(flag)),
    }
}

/// AND of every predicate of `filter`, or `None` when nothing is constrained.
fn filter_condition(filter: &PropertyFilter) -> Option<PropertyCondition> {
    filter
        .predicates()
        .into_iter()
        .map(predicate_condition)
        .reduce(|acc, next| -> PropertyCondition { Box::new(acc.and(next)) })
}

fn count_matching(conn: &mut SqliteConnection, filter: &PropertyFilter) -> QueryResult<i64> {
    let mut query = properties::table.into_boxed();
    if let Some(condition) = filter_condition(filter) {
        query = query.filter(condition);
    }
    query.count().get_result(conn)
}

fn to_sql_window(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn into_domain(rows: Vec<DbProperty>) -> RepositoryResult<Vec<Property>> {
    rows.into_iter()
        .map(|row| Property::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl PropertyReader for DieselRepository {
    fn get_property_by_id(&self, id: PropertyId) -> RepositoryResult<Option<Property>> {
        let mut conn = self.conn()?;

        let row = properties::table
            .find(id.to_string())
            .select(DbProperty::as_select())
            .first::<DbProperty>(&mut conn)
            .optional()?;

        row.map(Property::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn search_properties(
        &self,
        query: PropertyListQuery,
    ) -> RepositoryResult<(usize, Vec<Property>)> {
        let mut conn = self.conn()?;

        let (total, rows) = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let total = count_matching(conn, &query.filter)?;

            let mut items = properties::table
                .select(DbProperty::as_select())
                .order((properties::created_at.desc(), properties::id.asc()))
                .into_boxed();

            if let Some(condition) = filter_condition(&query.filter) {
                items = items.filter(condition);
            }

            if let Some(pagination) = &query.pagination {
                items = items
                    .limit(to_sql_window(pagination.limit()))
                    .offset(to_sql_window(pagination.offset()));
            }

            let rows = items.load::<DbProperty>(conn)?;
            Ok((total, rows))
        })?;

        Ok((total as usize, into_domain(rows)?))
    }

    fn count_properties(&self, filter: &PropertyFilter) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let total = count_matching(&mut conn, filter)?;
        Ok(total as usize)
    }
}

impl PropertyWriter for DieselRepository {
    fn create_property(&self, new_property: &NewProperty) -> RepositoryResult<Property> {
        let mut conn = self.conn()?;

        let now = Utc::now().naive_utc();
        let insertable = DbNewProperty::new(PropertyId::new(), new_property, now);

        let row = diesel::insert_into(properties::table)
            .values(&insertable)
            .returning(DbProperty::as_returning())
            .get_result::<DbProperty>(&mut conn)?;

        Property::try_from(row).map_err(RepositoryError::from)
    }

    fn replace_property(
        &self,
        id: PropertyId,
        property: &NewProperty,
    ) -> RepositoryResult<Option<Property>> {
        let mut conn = self.conn()?;

        let now = Utc::now().naive_utc();
        let changes = DbReplaceProperty::new(property, now);

        let row = diesel::update(properties::table.find(id.to_string()))
            .set(&changes)
            .returning(DbProperty::as_returning())
            .get_result::<DbProperty>(&mut conn)
            .optional()?;

        row.map(Property::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn delete_property(&self, id: PropertyId) -> RepositoryResult<bool> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(properties::table.find(id.to_string())).execute(&mut conn)?;

        Ok(deleted > 0)
    }
}
