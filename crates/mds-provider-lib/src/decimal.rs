//! Serialization of arbitrary-precision decimals as JSON numbers.
//!
//! Pricing and other store-backed values are held as [`BigDecimal`], but MDS
//! consumers expect plain JSON numbers. Fields opt in with
//! `#[serde(serialize_with = "crate::decimal::serialize")]`. Coercion to `f64`
//! never fails and always yields a finite number: values beyond `f64` range
//! clamp to `f64::MAX` or `f64::MIN` by sign.

use bigdecimal::{BigDecimal, ToPrimitive};
use serde::Serializer;

/// Coerce a decimal to the nearest finite `f64`.
pub fn to_f64(value: &BigDecimal) -> f64 {
    let coerced = value
        .to_f64()
        .or_else(|| value.to_string().parse::<f64>().ok())
        .filter(|v| v.is_finite());

    match coerced {
        Some(v) => v,
        None if value.to_string().starts_with('-') => f64::MIN,
        None => f64::MAX,
    }
}

pub fn serialize<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(to_f64(value))
}
