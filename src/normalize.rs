//! Event payload normalization.
//!
//! Walks a payload depth-first and replaces string leaves that look like
//! identifiers or dates with typed values. Containers are updated in place,
//! so the shape of the payload never changes.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::date::parse_date_string;
use crate::error::Error;
use crate::object_id::{is_valid_object_id, ObjectId};
use crate::PayloadValue;

/// Strings at or below this length never reach the date parser.
pub const DEFAULT_DATE_MIN_LEN: usize = 7;

/// Configurable payload normalizer.
///
/// The defaults reproduce the gateway's behavior: identifiers and dates are
/// both recognized, and only strings longer than seven bytes are considered
/// as dates. Identifier recognition always runs before date recognition.
///
/// # Examples
///
/// ```
/// use gateway_core::{PayloadNormalizer, PayloadValue};
/// use serde_json::json;
///
/// let normalizer = PayloadNormalizer::new().dates(false);
/// let out = normalizer.normalize(PayloadValue::from(json!({
///     "id": "507f1f77bcf86cd799439011",
///     "at": "2024-01-05",
/// })));
///
/// assert!(out.get("id").unwrap().as_object_id().is_some());
/// assert_eq!(out.get("at").unwrap().as_str(), Some("2024-01-05"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadNormalizer {
    object_ids: bool,
    dates: bool,
    date_min_len: usize,
}

impl Default for PayloadNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
struct Conversions {
    object_ids: usize,
    dates: usize,
}

impl PayloadNormalizer {
    /// Creates a normalizer with the default settings.
    pub fn new() -> Self {
        Self {
            object_ids: true,
            dates: true,
            date_min_len: DEFAULT_DATE_MIN_LEN,
        }
    }

    /// Enables or disables identifier recognition.
    pub fn object_ids(mut self, enabled: bool) -> Self {
        self.object_ids = enabled;
        self
    }

    /// Enables or disables date recognition.
    pub fn dates(mut self, enabled: bool) -> Self {
        self.dates = enabled;
        self
    }

    /// Sets the length a string must exceed before it is tried as a date.
    pub fn date_min_len(mut self, len: usize) -> Self {
        self.date_min_len = len;
        self
    }

    /// Normalizes `value` and returns it.
    pub fn normalize(&self, mut value: PayloadValue) -> PayloadValue {
        self.normalize_in_place(&mut value);
        value
    }

    /// Normalizes `value` by rewriting its leaves in place.
    pub fn normalize_in_place(&self, value: &mut PayloadValue) {
        let mut conversions = Conversions::default();
        self.walk(value, &mut conversions);
        tracing::debug!(
            object_ids = conversions.object_ids,
            dates = conversions.dates,
            "normalized event payload"
        );
    }

    /// Converts JSON into a payload and normalizes it.
    pub fn normalize_json(&self, value: Value) -> PayloadValue {
        self.normalize(PayloadValue::from(value))
    }

    /// Normalizes JSON and decodes the result into `T`.
    ///
    /// Typed leaves are handed to `T` in their serialized spelling, so fields
    /// declared as [`ObjectId`] or `DateTime<Utc>` receive the converted values.
    ///
    /// # Errors
    ///
    /// Returns `Error::Decode` if the normalized payload does not fit `T`.
    pub fn normalize_as<T: DeserializeOwned>(&self, value: Value) -> Result<T, Error> {
        let normalized = self.normalize_json(value);
        Ok(serde_json::from_value(normalized.to_json())?)
    }

    fn walk(&self, value: &mut PayloadValue, conversions: &mut Conversions) {
        match value {
            PayloadValue::String(s) => {
                if let Some(typed) = self.convert_str(s, conversions) {
                    *value = typed;
                }
            }
            PayloadValue::Array(items) => {
                for item in items.iter_mut() {
                    self.walk(item, conversions);
                }
            }
            PayloadValue::Object(map) => {
                for item in map.values_mut() {
                    self.walk(item, conversions);
                }
            }
            PayloadValue::Null
            | PayloadValue::Bool(_)
            | PayloadValue::Number(_)
            | PayloadValue::ObjectId(_)
            | PayloadValue::DateTime(_) => {}
        }
    }

    fn convert_str(&self, s: &str, conversions: &mut Conversions) -> Option<PayloadValue> {
        if self.object_ids && is_valid_object_id(s) {
            if let Ok(id) = ObjectId::parse_str(s) {
                tracing::trace!(value = s, "string leaf recognized as object id");
                conversions.object_ids += 1;
                return Some(PayloadValue::ObjectId(id));
            }
        }

        if self.dates && s.len() > self.date_min_len {
            if let Some(dt) = parse_date_string(s) {
                tracing::trace!(value = s, "string leaf recognized as date");
                conversions.dates += 1;
                return Some(PayloadValue::DateTime(dt));
            }
        }

        None
    }
}

/// Normalizes an event payload with the default settings.
///
/// # Examples
///
/// ```
/// use gateway_core::{format_event_payload, PayloadValue};
/// use serde_json::json;
///
/// let out = format_event_payload(PayloadValue::from(json!({
///     "id": "507f1f77bcf86cd799439011",
///     "tags": ["a", "2024-01-05"],
///     "count": 3
/// })));
///
/// assert!(out.get("id").unwrap().as_object_id().is_some());
/// let tags = out.get("tags").unwrap().as_array().unwrap();
/// assert_eq!(tags[0].as_str(), Some("a"));
/// assert!(tags[1].as_datetime().is_some());
/// ```
pub fn format_event_payload(value: PayloadValue) -> PayloadValue {
    PayloadNormalizer::new().normalize(value)
}

/// Converts JSON into a payload and normalizes it with the default settings.
pub fn normalize_json(value: Value) -> PayloadValue {
    PayloadNormalizer::new().normalize_json(value)
}

/// Normalizes JSON with the default settings and decodes it into `T`.
///
/// # Errors
///
/// Returns `Error::Decode` if the normalized payload does not fit `T`.
pub fn normalize_as<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    PayloadNormalizer::new().normalize_as(value)
}
