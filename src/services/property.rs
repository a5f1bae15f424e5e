//! Search and maintenance operations over property listings.
//!
//! Search input is never rejected here: pagination is clamped and unusable
//! filter values are dropped (see [`FilterSpec`]). Lookups by a malformed id
//! report "not found" rather than an error. Only store failures surface as
//! [`ServiceError`]s.

use crate::domain::filter::FilterSpec;
use crate::domain::property::{NewProperty, Property};
use crate::domain::types::PropertyId;
use crate::dto::property::{PropertyDetail, PropertyListItem};
use crate::forms::property::PropertyForm;
use crate::pagination::PageResult;
use crate::repository::{PropertyListQuery, PropertyReader, PropertyWriter};
use crate::services::{ServiceError, ServiceResult};

fn parse_id(id: &str) -> Option<PropertyId> {
    match id.parse::<PropertyId>() {
        Ok(id) => Some(id),
        Err(_) => {
            log::debug!("Ignoring malformed property id `{id}`");
            None
        }
    }
}

/// Returns one page of properties matching `spec`, newest first.
pub fn search_properties<R>(repo: &R, spec: &FilterSpec) -> ServiceResult<PageResult<Property>>
where
    R: PropertyReader + ?Sized,
{
    let request = spec.page_request();
    let filter = spec.filter();

    log::debug!(
        "Searching properties: page {} size {} with {} constraint(s)",
        request.page_number,
        request.page_size,
        filter.predicates().len()
    );

    let (total, items) = repo
        .search_properties(PropertyListQuery::new(filter).paginate(request))
        .map_err(|err| {
            log::error!("Failed to search properties: {err}");
            err
        })?;

    Ok(PageResult::new(items, request, total))
}

/// Same as [`search_properties`] but shaped for the catalog grid.
pub fn list_properties<R>(
    repo: &R,
    spec: &FilterSpec,
) -> ServiceResult<PageResult<PropertyListItem>>
where
    R: PropertyReader + ?Sized,
{
    Ok(search_properties(repo, spec)?.map(PropertyListItem::from))
}

/// Fetches a property; malformed ids are reported as absent.
pub fn get_property<R>(repo: &R, id: &str) -> ServiceResult<Option<Property>>
where
    R: PropertyReader + ?Sized,
{
    let Some(id) = parse_id(id) else {
        return Ok(None);
    };

    repo.get_property_by_id(id).map_err(|err| {
        log::error!("Failed to get property {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn get_property_detail<R>(repo: &R, id: &str) -> ServiceResult<Option<PropertyDetail>>
where
    R: PropertyReader + ?Sized,
{
    Ok(get_property(repo, id)?.map(PropertyDetail::from))
}

/// Persists a new property. The store assigns its id and timestamps.
pub fn create_property<R>(repo: &R, new_property: &NewProperty) -> ServiceResult<Property>
where
    R: PropertyWriter + ?Sized,
{
    let created = repo.create_property(new_property).map_err(|err| {
        log::error!("Failed to create property: {err}");
        err
    })?;

    log::info!("Created property {}", created.id);
    Ok(created)
}

/// Validates the form and persists a new property.
pub fn create_property_from_form<R>(repo: &R, form: PropertyForm) -> ServiceResult<Property>
where
    R: PropertyWriter + ?Sized,
{
    let new_property = NewProperty::try_from(form).map_err(|err| {
        log::error!("Failed to validate property form: {err}");
        err
    })?;

    create_property(repo, &new_property)
}

/// Replaces every writable field of an existing property.
///
/// Returns `None` when the property does not exist; nothing is created.
pub fn update_property<R>(
    repo: &R,
    id: &str,
    property: &NewProperty,
) -> ServiceResult<Option<Property>>
where
    R: PropertyWriter + ?Sized,
{
    let Some(id) = parse_id(id) else {
        return Ok(None);
    };

    let updated = repo.replace_property(id, property).map_err(|err| {
        log::error!("Failed to update property {id}: {err}");
        err
    })?;

    if updated.is_none() {
        log::info!("Property {id} not found for update");
    }

    Ok(updated)
}

/// Validates the form and replaces the property.
pub fn update_property_from_form<R>(
    repo: &R,
    id: &str,
    form: PropertyForm,
) -> ServiceResult<Option<Property>>
where
    R: PropertyWriter + ?Sized,
{
    let property = NewProperty::try_from(form).map_err(|err| {
        log::error!("Failed to validate property form: {err}");
        err
    })?;

    update_property(repo, id, &property)
}

/// Deletes a property, returning whether anything was removed.
pub fn delete_property<R>(repo: &R, id: &str) -> ServiceResult<bool>
where
    R: PropertyWriter + ?Sized,
{
    let Some(id) = parse_id(id) else {
        return Ok(false);
    };

    let deleted = repo.delete_property(id).map_err(|err| {
        log::error!("Failed to delete property {id}: {err}");
        err
    })?;

    if deleted {
        log::info!("Deleted property {id}");
    }

    Ok(deleted)
}
