//! Shipping rates and pincode serviceability

use serde::Serialize;
use crate::domain::value_objects::Money;

/// A row of the serviceable-pincode table.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceablePincode {
    pub pincode: String,
    pub shipping_cost: Option<Money>,
    pub free_shipping_threshold: Option<Money>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub cod_available: bool,
    pub estimated_delivery_days: Option<i32>,
    pub is_active: bool,
}

/// Rate in effect for one cart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShippingRate {
    pub shipping_cost: Money,
    pub free_shipping_threshold: Money,
}

impl ShippingRate {
    pub fn new(shipping_cost: Money, free_shipping_threshold: Money) -> Self {
        Self { shipping_cost, free_shipping_threshold }
    }

    /// Overrides `self` with whatever the pincode record sets.
    pub fn overridden_by(self, record: &ServiceablePincode) -> Self {
        Self {
            shipping_cost: record.shipping_cost.unwrap_or(self.shipping_cost),
            free_shipping_threshold: record.free_shipping_threshold.unwrap_or(self.free_shipping_threshold),
        }
    }

    pub fn charge_for(&self, subtotal: Money) -> Money {
        if subtotal >= self.free_shipping_threshold { Money::ZERO } else { self.shipping_cost }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    pub city: Option<String>,
    pub state: Option<String>,
    pub cod_available: bool,
    pub estimated_delivery_days: Option<i32>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PincodeCheck {
    pub serviceable: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<DeliveryDetails>,
}

impl PincodeCheck {
    pub fn unserviceable() -> Self {
        Self { serviceable: false, message: "Sorry, we do not deliver to this pincode yet.".to_string(), details: None }
    }

    pub fn serviceable(record: &ServiceablePincode) -> Self {
        let city = record.city.as_deref().unwrap_or("");
        let state = record.state.as_deref().unwrap_or("");
        Self {
            serviceable: true,
            message: format!("Delivery available to {city}, {state}"),
            details: Some(DeliveryDetails {
                city: record.city.clone(), state: record.state.clone(),
                cod_available: record.cod_available, estimated_delivery_days: record.estimated_delivery_days,
            }),
        }
    }
}
