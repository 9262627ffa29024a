//! Pricing domain: value objects, catalog/coupon/shipping aggregates, advisories.
pub mod advisories;
pub mod aggregates;
pub mod value_objects;
