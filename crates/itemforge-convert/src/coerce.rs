//! Raw-value coercion into typed claim values.
//!
//! Raw rows carry no type tags: a value is a scalar, an identifier
//! string, or a mapping whose keys reveal what it is. Dispatch order is
//! load-bearing and fixed here, first match wins:
//!
//! 1. string in entity-identifier format
//! 2. mapping with a `quantity_value` key (optional `unit`)
//! 3. mapping with a `date_value` key
//! 4. the `"somevalue"` / `"novalue"` keywords
//! 5. anything else passes through as plain text
//!
//! A single-element sequence is unwrapped to its sole element before
//! dispatch. A mapping matching neither key set is caller error and
//! falls through to plain text unvalidated.

use crate::error::ConvertError;
use itemforge_domain::{is_entity_id, ClaimValue, DateValue, EntityId, SpecialValue};
use serde_json::Value;

/// Coerce one raw value into a [`ClaimValue`].
///
/// # Examples
///
/// ```
/// use itemforge_convert::coerce;
/// use itemforge_domain::ClaimValue;
/// use serde_json::json;
///
/// // An identifier-shaped string is never plain text.
/// assert!(matches!(coerce(&json!("Q123")).unwrap(), ClaimValue::EntityRef(_)));
/// assert!(matches!(coerce(&json!("hello")).unwrap(), ClaimValue::PlainText(_)));
/// ```
pub fn coerce(raw: &Value) -> Result<ClaimValue, ConvertError> {
    let raw = unwrap_singleton(raw);

    if let Value::String(text) = raw {
        if is_entity_id(text) {
            return Ok(ClaimValue::EntityRef(EntityId::new(text)?));
        }
    }

    if let Value::Object(map) = raw {
        if let Some(amount) = map.get("quantity_value") {
            let amount = amount
                .as_f64()
                .ok_or_else(|| ConvertError::BadQuantity(amount.to_string()))?;
            let unit = match map.get("unit") {
                Some(Value::String(code)) => Some(EntityId::new(code)?),
                Some(other) => return Err(ConvertError::BadUnit(other.to_string())),
                None => None,
            };
            return Ok(ClaimValue::Quantity { amount, unit });
        }
        if let Some(date) = map.get("date_value") {
            return coerce_date(date);
        }
        // Neither key: falls through to plain text below.
    }

    if let Value::String(text) = raw {
        if let Some(marker) = SpecialValue::from_keyword(text) {
            return Ok(ClaimValue::Special(marker));
        }
        return Ok(ClaimValue::PlainText(text.clone()));
    }

    Ok(ClaimValue::PlainText(raw.to_string()))
}

/// A single-element sequence stands for its sole element.
fn unwrap_singleton(raw: &Value) -> &Value {
    match raw {
        Value::Array(items) if items.len() == 1 => &items[0],
        other => other,
    }
}

/// Copy only the fields the source supplied; never default a month or day.
fn coerce_date(date: &Value) -> Result<ClaimValue, ConvertError> {
    let map = date
        .as_object()
        .ok_or_else(|| ConvertError::BadDateValue(date.to_string()))?;
    let year = map
        .get("year")
        .and_then(Value::as_i64)
        .ok_or_else(|| ConvertError::BadDateValue(date.to_string()))?;
    let month = map.get("month").and_then(Value::as_u64).map(|m| m as u32);
    let day = map.get("day").and_then(Value::as_u64).map(|d| d as u32);
    Ok(ClaimValue::Date(DateValue { year: year as i32, month, day }))
}
