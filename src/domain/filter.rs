//! Search filters over property listings.
//!
//! [`FilterSpec`] is the raw, caller-supplied search request. It is normalized
//! into a [`PropertyFilter`], which in turn yields one [`PropertyPredicate`] per
//! active constraint. Predicates are always combined with logical AND.

use serde::{Deserialize, Serialize};

use crate::domain::property::Property;
use crate::domain::types::{PropertyType, amount_to_cents_ceil, amount_to_cents_floor};
use crate::pagination::{DEFAULT_PAGE_SIZE, PageRequest};

/// Raw search request as received from a caller.
///
/// Nothing here is validated: blank text, unknown property types and
/// out-of-range pagination are all repaired during normalization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub name: Option<String>,
    pub address: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub property_type: Option<String>,
    pub is_available: Option<bool>,
    pub page_number: i64,
    pub page_size: i64,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            name: None,
            address: None,
            min_price: None,
            max_price: None,
            property_type: None,
            is_available: None,
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE as i64,
        }
    }
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn min_price(mut self, amount: f64) -> Self {
        self.min_price = Some(amount);
        self
    }

    pub fn max_price(mut self, amount: f64) -> Self {
        self.max_price = Some(amount);
        self
    }

    pub fn property_type(mut self, token: impl Into<String>) -> Self {
        self.property_type = Some(token.into());
        self
    }

    pub fn available(mut self, is_available: bool) -> Self {
        self.is_available = Some(is_available);
        self
    }

    pub fn paginate(mut self, page_number: i64, page_size: i64) -> Self {
        self.page_number = page_number;
        self.page_size = page_size;
        self
    }

    /// Clamped pagination window for this request.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page_number, self.page_size)
    }

    /// Normalized constraints for this request.
    pub fn filter(&self) -> PropertyFilter {
        PropertyFilter::from(self)
    }
}

/// Normalized search constraints. `None` means "no constraint".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyFilter {
    pub name: Option<String>,
    pub address: Option<String>,
    pub min_price_cents: Option<i64>,
    pub max_price_cents: Option<i64>,
    pub property_type: Option<PropertyType>,
    pub is_available: Option<bool>,
}

fn normalize_text(value: Option<&String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl From<&FilterSpec> for PropertyFilter {
    fn from(spec: &FilterSpec) -> Self {
        Self {
            name: normalize_text(spec.name.as_ref()),
            address: normalize_text(spec.address.as_ref()),
            // Bounds round inward so sub-cent amounts never widen the range.
            min_price_cents: spec.min_price.and_then(amount_to_cents_ceil),
            max_price_cents: spec.max_price.and_then(amount_to_cents_floor),
            // Unknown tokens drop the constraint instead of failing the search.
            property_type: spec
                .property_type
                .as_deref()
                .and_then(PropertyType::from_token),
            is_available: spec.is_available,
        }
    }
}

impl PropertyFilter {
    /// One predicate per present constraint, in a fixed order.
    pub fn predicates(&self) -> Vec<PropertyPredicate> {
        let mut predicates = Vec::new();
        predicates.extend(self.name.clone().map(PropertyPredicate::NameContains));
        predicates.extend(self.address.clone().map(PropertyPredicate::AddressContains));
        predicates.extend(self.min_price_cents.map(PropertyPredicate::MinPrice));
        predicates.extend(self.max_price_cents.map(PropertyPredicate::MaxPrice));
        predicates.extend(self.property_type.map(PropertyPredicate::TypeIs));
        predicates.extend(self.is_available.map(PropertyPredicate::AvailabilityIs));
        predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates().is_empty()
    }

    /// Evaluates the AND of all predicates against an in-memory record.
    pub fn matches(&self, property: &Property) -> bool {
        self.predicates()
            .iter()
            .all(|predicate| predicate.matches(property))
    }
}

/// A single search constraint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyPredicate {
    /// Case-insensitive substring of the name.
    NameContains(String),
    /// Case-insensitive substring of the address.
    AddressContains(String),
    /// Inclusive lower price bound, in cents.
    MinPrice(i64),
    /// Inclusive upper price bound, in cents.
    MaxPrice(i64),
    TypeIs(PropertyType),
    AvailabilityIs(bool),
}

/// Unicode-aware, case-insensitive substring test shared with the SQL store.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl PropertyPredicate {
    pub fn matches(&self, property: &Property) -> bool {
        match self {
            PropertyPredicate::NameContains(needle) => {
                contains_ignore_case(property.name.as_str(), needle)
            }
            PropertyPredicate::AddressContains(needle) => {
                contains_ignore_case(property.address.as_str(), needle)
            }
            PropertyPredicate::MinPrice(cents) => property.price.cents() >= *cents,
            PropertyPredicate::MaxPrice(cents) => property.price.cents() <= *cents,
            PropertyPredicate::TypeIs(kind) => property.property_type == *kind,
            PropertyPredicate::AvailabilityIs(flag) => property.is_available == *flag,
        }
    }
}
