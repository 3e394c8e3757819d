// src/models/casting.rs
//
// The web client sends form state more or less as typed: numbers arrive as strings,
// untouched selects arrive as "". These helpers cast those shapes into typed fields.

use chrono::{DateTime, NaiveDate};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn cast_number<E: de::Error>(value: Value) -> Result<Option<f64>, E> {
    let number = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| E::custom(format!("expected a number, got {}", n)))?,
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| E::custom(format!("cast to number failed for value \"{}\"", s)))?,
        other => return Err(E::custom(format!("expected a number, got {}", other))),
    };
    if !number.is_finite() {
        return Err(E::custom(format!("expected a finite number, got {}", number)));
    }
    Ok(Some(number))
}

fn cast_integer<E: de::Error>(value: Value) -> Result<Option<i64>, E> {
    if let Value::Number(n) = &value {
        if let Some(i) = n.as_i64() {
            return Ok(Some(i));
        }
    }
    match cast_number::<E>(value)? {
        None => Ok(None),
        // the upper bound is exclusive: i64::MAX rounds up to 2^63 as f64
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Ok(Some(f as i64))
        }
        Some(f) => Err(E::custom(format!("expected a whole number, got {}", f))),
    }
}

/// Whole number or numeric string; `null` and `""` are treated as absent.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null);
    cast_integer(value)
}

/// Number or numeric string, decimals allowed; `null` and `""` are treated as absent.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null);
    cast_number(value)
}

/// Like [`lenient_f64`] but the value must be present.
pub fn required_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null);
    cast_number(value)?.ok_or_else(|| de::Error::custom("value is required"))
}

/// Any deserializable value, with `null` and blank strings mapped to `None`.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(value) => T::deserialize(value).map(Some).map_err(de::Error::custom),
    }
}

/// Accepts `YYYY-MM-DD` (date inputs) or a full RFC 3339 timestamp.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = blank_as_none(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    let raw = raw.trim();

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map(Some)
        .map_err(|_| de::Error::custom(format!("invalid date: '{}'. Use YYYY-MM-DD", raw)))
}
