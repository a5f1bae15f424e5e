//! Diesel models for storing property listings.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::{
    property::{NewProperty as DomainNewProperty, Property as DomainProperty},
    types::{
        ImageUrl, OwnerId, Price, PropertyAddress, PropertyDescription, PropertyId, PropertyName,
        PropertyType, RoomCount, SquareMeters, TypeConstraintError,
    },
};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::properties)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::property::Property`].
pub struct Property {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub address: String,
    pub price_cents: i64,
    pub image_url: String,
    pub description: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub square_meters: Option<f64>,
    pub property_type: String,
    pub is_available: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::properties)]
/// Insertable form of [`Property`].
pub struct NewProperty<'a> {
    pub id: String,
    pub owner_id: &'a str,
    pub name: &'a str,
    pub address: &'a str,
    pub price_cents: i64,
    pub image_url: &'a str,
    pub description: Option<&'a str>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub square_meters: Option<f64>,
    pub property_type: &'static str,
    pub is_available: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::properties)]
#[diesel(treat_none_as_null = true)]
/// Full replacement of every writable column of a [`Property`].
///
/// `id` and `created_at` are never rewritten.
pub struct ReplaceProperty<'a> {
    pub owner_id: &'a str,
    pub name: &'a str,
    pub address: &'a str,
    pub price_cents: i64,
    pub image_url: &'a str,
    pub description: Option<&'a str>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub square_meters: Option<f64>,
    pub property_type: &'static str,
    pub is_available: bool,
    pub updated_at: NaiveDateTime,
}

impl<'a> NewProperty<'a> {
    /// Builds the row for a freshly created listing; both timestamps equal `now`.
    pub fn new(id: PropertyId, property: &'a DomainNewProperty, now: NaiveDateTime) -> Self {
        Self {
            id: id.to_string(),
            owner_id: property.owner_id.as_str(),
            name: property.name.as_str(),
            address: property.address.as_str(),
            price_cents: property.price.cents(),
            image_url: property.image_url.as_str(),
            description: property.description.as_ref().map(|d| d.as_str()),
            bedrooms: property.bedrooms.map(RoomCount::get),
            bathrooms: property.bathrooms.map(RoomCount::get),
            square_meters: property.square_meters.map(SquareMeters::get),
            property_type: property.property_type.as_str(),
            is_available: property.is_available,
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> ReplaceProperty<'a> {
    pub fn new(property: &'a DomainNewProperty, now: NaiveDateTime) -> Self {
        Self {
            owner_id: property.owner_id.as_str(),
            name: property.name.as_str(),
            address: property.address.as_str(),
            price_cents: property.price.cents(),
            image_url: property.image_url.as_str(),
            description: property.description.as_ref().map(|d| d.as_str()),
            bedrooms: property.bedrooms.map(RoomCount::get),
            bathrooms: property.bathrooms.map(RoomCount::get),
            square_meters: property.square_meters.map(SquareMeters::get),
            property_type: property.property_type.as_str(),
            is_available: property.is_available,
            updated_at: now,
        }
    }
}

impl TryFrom<Property> for DomainProperty {
    type Error = TypeConstraintError;

    fn try_from(row: Property) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.parse()?,
            owner_id: OwnerId::new(row.owner_id)?,
            name: PropertyName::new(row.name)?,
            address: PropertyAddress::new(row.address)?,
            price: Price::from_cents(row.price_cents)?,
            image_url: ImageUrl::new(row.image_url)?,
            description: row
                .description
                .filter(|d| !d.trim().is_empty())
                .map(PropertyDescription::new)
                .transpose()?,
            bedrooms: row.bedrooms.map(RoomCount::new).transpose()?,
            bathrooms: row.bathrooms.map(RoomCount::new).transpose()?,
            square_meters: row.square_meters.map(SquareMeters::new).transpose()?,
            property_type: row.property_type.parse::<PropertyType>()?,
            is_available: row.is_available,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
