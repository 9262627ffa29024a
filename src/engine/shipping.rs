//! Shipping stage

use crate::domain::advisories::Advisory;
use crate::domain::aggregates::{ServiceablePincode, ShippingRate};
use crate::domain::value_objects::Money;

/// Resolves the rate for `pincode` and the resulting charge on `subtotal`.
/// An unknown pincode keeps `standard` and is flagged.
pub(crate) fn shipping_charge(
    pincode: Option<&str>, record: Option<&ServiceablePincode>, standard: ShippingRate,
    subtotal: Money, advisories: &mut Vec<Advisory>,
) -> Money {
    let rate = match (pincode, record) {
        (Some(_), Some(record)) => standard.overridden_by(record),
        (Some(pincode), None) => {
            tracing::debug!(pincode, "pincode has no shipping rule");
            advisories.push(Advisory::PincodeUnrecognized { pincode: pincode.to_string() });
            standard
        }
        (None, _) => standard,
    };
    rate.charge_for(subtotal)
}
