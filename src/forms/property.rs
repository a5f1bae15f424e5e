use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::filter::FilterSpec;
use crate::domain::property::NewProperty;
use crate::domain::types::{
    ImageUrl, OwnerId, Price, PropertyAddress, PropertyDescription, PropertyName, PropertyType,
    RoomCount, SquareMeters,
};
use crate::forms::FormError;
use crate::pagination::DEFAULT_PAGE_SIZE;

fn default_property_type() -> String {
    PropertyType::default().as_str().to_string()
}

fn default_available() -> bool {
    true
}

fn validate_property_type(value: &str) -> Result<(), ValidationError> {
    if PropertyType::from_token(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("property_type").with_message("Invalid property type".into()))
    }
}

fn validate_http_scheme(value: &str) -> Result<(), ValidationError> {
    let lower = value.trim().to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Ok(())
    } else {
        Err(ValidationError::new("image_url").with_message("Invalid URL format".into()))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Payload for creating a property or replacing all of its fields.
pub struct PropertyForm {
    /// Reference to the owner.
    #[validate(length(min = 1, message = "Owner ID is required"))]
    pub owner_id: String,
    #[validate(length(min = 3, max = 100, message = "Name must be between 3 and 100 characters"))]
    pub name: String,
    #[validate(length(
        min = 5,
        max = 200,
        message = "Address must be between 5 and 200 characters"
    ))]
    pub address: String,
    /// Asking price as a decimal amount.
    #[validate(range(min = 0.0, message = "Price must be a positive value"))]
    pub price: f64,
    #[validate(url(message = "Invalid URL format"), custom(function = "validate_http_scheme"))]
    pub image_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(range(min = 0, max = 50, message = "Bedrooms must be between 0 and 50"))]
    #[serde(default)]
    pub bedrooms: Option<i32>,
    #[validate(range(min = 0, max = 20, message = "Bathrooms must be between 0 and 20"))]
    #[serde(default)]
    pub bathrooms: Option<i32>,
    #[validate(range(exclusive_min = 0.0, message = "Square meters must be greater than 0"))]
    #[serde(default)]
    pub square_meters: Option<f64>,
    /// Property type token; unknown tokens are rejected.
    #[validate(custom(function = "validate_property_type"))]
    #[serde(default = "default_property_type")]
    pub property_type: String,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

impl TryFrom<PropertyForm> for NewProperty {
    type Error = FormError;

    fn try_from(form: PropertyForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let description = form
            .description
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PropertyDescription::new)
            .transpose()?;

        Ok(NewProperty {
            owner_id: OwnerId::new(form.owner_id)?,
            name: PropertyName::new(form.name)?,
            address: PropertyAddress::new(form.address)?,
            price: Price::from_amount(form.price)?,
            image_url: ImageUrl::new(form.image_url)?,
            description,
            bedrooms: form.bedrooms.map(RoomCount::new).transpose()?,
            bathrooms: form.bathrooms.map(RoomCount::new).transpose()?,
            square_meters: form.square_meters.map(SquareMeters::new).transpose()?,
            property_type: form.property_type.parse()?,
            is_available: form.is_available,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Catalog search parameters as they appear in a URL query string.
pub struct SearchQuery {
    pub name: Option<String>,
    pub address: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub property_type: Option<String>,
    pub is_available: Option<bool>,
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

impl SearchQuery {
    /// Parses `name=loft&minPrice=100000&pageNumber=2` style input.
    pub fn parse(query: &str) -> Result<Self, FormError> {
        let query = query.trim_start_matches('?');
        Ok(serde_html_form::from_str(query)?)
    }
}

impl From<SearchQuery> for FilterSpec {
    fn from(query: SearchQuery) -> Self {
        FilterSpec {
            name: query.name,
            address: query.address,
            min_price: query.min_price,
            max_price: query.max_price,
            property_type: query.property_type,
            is_available: query.is_available,
            page_number: query.page_number.unwrap_or(1),
            page_size: query.page_size.unwrap_or(DEFAULT_PAGE_SIZE as i64),
        }
    }
}
