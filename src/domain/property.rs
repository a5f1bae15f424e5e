use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ImageUrl, OwnerId, Price, PropertyAddress, PropertyDescription, PropertyId, PropertyName,
    PropertyType, RoomCount, SquareMeters,
};

/// A persisted property listing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: PropertyId,
    pub owner_id: OwnerId,
    pub name: PropertyName,
    pub address: PropertyAddress,
    pub price: Price,
    pub image_url: ImageUrl,
    pub description: Option<PropertyDescription>,
    pub bedrooms: Option<RoomCount>,
    pub bathrooms: Option<RoomCount>,
    pub square_meters: Option<SquareMeters>,
    pub property_type: PropertyType,
    pub is_available: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Property {
    /// Returns the writable part of the record.
    pub fn to_new_property(&self) -> NewProperty {
        NewProperty {
            owner_id: self.owner_id.clone(),
            name: self.name.clone(),
            address: self.address.clone(),
            price: self.price,
            image_url: self.image_url.clone(),
            description: self.description.clone(),
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            square_meters: self.square_meters,
            property_type: self.property_type,
            is_available: self.is_available,
        }
    }
}

/// Writable fields of a property.
///
/// Used both for inserts and for full-record replacements: every field is
/// written, absent optionals clear the stored value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewProperty {
    pub owner_id: OwnerId,
    pub name: PropertyName,
    pub address: PropertyAddress,
    pub price: Price,
    pub image_url: ImageUrl,
    pub description: Option<PropertyDescription>,
    pub bedrooms: Option<RoomCount>,
    pub bathrooms: Option<RoomCount>,
    pub square_meters: Option<SquareMeters>,
    pub property_type: PropertyType,
    pub is_available: bool,
}

impl NewProperty {
    /// Creates an available listing with only the mandatory fields set.
    #[must_use]
    pub fn new(
        owner_id: OwnerId,
        name: PropertyName,
        address: PropertyAddress,
        price: Price,
        image_url: ImageUrl,
        property_type: PropertyType,
    ) -> Self {
        Self {
            owner_id,
            name,
            address,
            price,
            image_url,
            description: None,
            bedrooms: None,
            bathrooms: None,
            square_meters: None,
            property_type,
            is_available: true,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: PropertyDescription) -> Self {
        self.description = Some(description);
        self
    }

    #[must_use]
    pub fn with_rooms(mut self, bedrooms: RoomCount, bathrooms: RoomCount) -> Self {
        self.bedrooms = Some(bedrooms);
        self.bathrooms = Some(bathrooms);
        self
    }

    #[must_use]
    pub fn with_square_meters(mut self, square_meters: SquareMeters) -> Self {
        self.square_meters = Some(square_meters);
        self
    }

    #[must_use]
    pub fn available(mut self, is_available: bool) -> Self {
        self.is_available = is_available;
        self
    }
}
