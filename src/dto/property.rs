//! View models for the property catalog.
//!
//! Every field mapping is spelled out by hand so the list and detail shapes can
//! be audited in one place.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::property::Property;
use crate::domain::types::{RoomCount, SquareMeters};

/// Summary row shown in the catalog grid.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListItem {
    pub id: String,
    pub name: String,
    pub address: String,
    pub price: f64,
    pub image_url: String,
    pub property_type: String,
    pub is_available: bool,
}

/// Full record shown in the detail view.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetail {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub address: String,
    pub price: f64,
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

impl From<&Property> for PropertyListItem {
    fn from(property: &Property) -> Self {
        Self {
            id: property.id.to_string(),
            name: property.name.as_str().to_string(),
            address: property.address.as_str().to_string(),
            price: property.price.as_amount(),
            image_url: property.image_url.as_str().to_string(),
            property_type: property.property_type.as_str().to_string(),
            is_available: property.is_available,
        }
    }
}

impl From<Property> for PropertyListItem {
    fn from(property: Property) -> Self {
        Self::from(&property)
    }
}

impl From<Property> for PropertyDetail {
    fn from(property: Property) -> Self {
        Self {
            id: property.id.to_string(),
            owner_id: property.owner_id.into_inner(),
            name: property.name.into_inner(),
            address: property.address.into_inner(),
            price: property.price.as_amount(),
            image_url: property.image_url.into_inner(),
            description: property.description.map(|d| d.into_inner()),
            bedrooms: property.bedrooms.map(RoomCount::get),
            bathrooms: property.bathrooms.map(RoomCount::get),
            square_meters: property.square_meters.map(SquareMeters::get),
            property_type: property.property_type.as_str().to_string(),
            is_available: property.is_available,
            created_at: property.created_at,
            updated_at: property.updated_at,
        }
    }
}
