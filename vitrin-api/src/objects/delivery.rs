use serde::{Deserialize, Serialize};

use super::order::{OrderDetails, OrderId};

/// Shipping and contact details collected after payment confirmation.
///
/// The backend requires all six fields non-empty; [`missing_fields`] reports
/// the ones still blank after trimming.
///
/// [`missing_fields`]: DeliveryDetails::missing_fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub name: String,
    pub contact_handle: String,
    pub address: String,
    pub postcode: String,
    pub city: String,
    pub country: String,
}

impl DeliveryDetails {
    /// Copy with surrounding whitespace stripped from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            contact_handle: self.contact_handle.trim().to_owned(),
            address: self.address.trim().to_owned(),
            postcode: self.postcode.trim().to_owned(),
            city: self.city.trim().to_owned(),
            country: self.country.trim().to_owned(),
        }
    }

    /// Names of the fields that are empty after trimming.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.contact_handle.trim().is_empty() {
            missing.push("contact_handle");
        }
        if self.address.trim().is_empty() {
            missing.push("address");
        }
        if self.postcode.trim().is_empty() {
            missing.push("postcode");
        }
        if self.city.trim().is_empty() {
            missing.push("city");
        }
        if self.country.trim().is_empty() {
            missing.push("country");
        }
        missing
    }

    /// Prefill a draft from whatever partial delivery data the order already
    /// carries.
    pub fn from_order(order: &OrderDetails) -> Self {
        Self {
            name: order.name.clone().unwrap_or_default(),
            contact_handle: order.contact_handle.clone().unwrap_or_default(),
            address: order.address.clone().unwrap_or_default(),
            postcode: order.postcode.clone().unwrap_or_default(),
            city: order.city.clone().unwrap_or_default(),
            country: order.country.clone().unwrap_or_default(),
        }
    }
}

/// Body of the delivery update call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryUpdateRequest {
    pub order_id: OrderId,
    #[serde(flatten)]
    pub details: DeliveryDetails,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn filled() -> DeliveryDetails {
        DeliveryDetails {
            name: "  Ada Lovelace ".to_owned(),
            contact_handle: "@ada".to_owned(),
            address: "12 Analytical Row".to_owned(),
            postcode: "AB1 2CD".to_owned(),
            city: "London".to_owned(),
            country: "UK".to_owned(),
        }
    }

    #[test]
    fn trimmed_strips_whitespace() {
        assert_eq!(filled().trimmed().name, "Ada Lovelace");
    }

    #[test]
    fn missing_fields_sees_through_whitespace() {
        let mut details = filled();
        details.postcode = "   ".to_owned();
        details.country = String::new();
        assert_eq!(details.missing_fields(), vec!["postcode", "country"]);
    }

    #[test]
    fn update_request_flattens_details() {
        let request = DeliveryUpdateRequest {
            order_id: OrderId::from("abc"),
            details: filled().trimmed(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["order_id"], "abc");
        assert_eq!(json["city"], "London");
    }
}
