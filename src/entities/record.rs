//! Daily record - stock, order, lead time and safety stock for one item on one date

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lead-time days a freshly created record starts with
pub const DEFAULT_LEAD_DAYS: f64 = 3.0;

/// Safety stock a freshly created record starts with
pub const DEFAULT_SAFETY_STOCK: f64 = 0.0;

/// One of the four tracked quantities of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Stock,
    Order,
    Days,
    Safety,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Stock, Field::Order, Field::Days, Field::Safety];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Stock => "stock",
            Field::Order => "order",
            Field::Days => "days",
            Field::Safety => "safety",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stock" => Ok(Field::Stock),
            "order" => Ok(Field::Order),
            "days" => Ok(Field::Days),
            "safety" => Ok(Field::Safety),
            other => Err(format!(
                "unknown field '{}' (expected stock, order, days or safety)",
                other
            )),
        }
    }
}

/// Quantities tracked for one item on one date
///
/// Every field is either a number or `None`, the empty marker. Empty is a
/// distinct state from zero: a cleared stock cell is not "zero on hand".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Quantity on hand
    #[serde(default, with = "quantity")]
    pub stock: Option<f64>,

    /// Quantity ordered
    #[serde(default, with = "quantity")]
    pub order: Option<f64>,

    /// Lead-time days the next order has to cover
    #[serde(default = "default_days", with = "quantity")]
    pub days: Option<f64>,

    /// Fixed buffer added on top of computed need
    #[serde(default = "default_safety", with = "quantity")]
    pub safety: Option<f64>,
}

fn default_days() -> Option<f64> {
    Some(DEFAULT_LEAD_DAYS)
}

fn default_safety() -> Option<f64> {
    Some(DEFAULT_SAFETY_STOCK)
}

impl Default for Record {
    fn default() -> Self {
        Self {
            stock: None,
            order: None,
            days: default_days(),
            safety: default_safety(),
        }
    }
}

impl Record {
    /// Read a field; `None` is the empty marker
    pub fn get(&self, field: Field) -> Option<f64> {
        *self.slot(field)
    }

    fn slot(&self, field: Field) -> &Option<f64> {
        match field {
            Field::Stock => &self.stock,
            Field::Order => &self.order,
            Field::Days => &self.days,
            Field::Safety => &self.safety,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<f64> {
        match field {
            Field::Stock => &mut self.stock,
            Field::Order => &mut self.order,
            Field::Days => &mut self.days,
            Field::Safety => &mut self.safety,
        }
    }

    /// Overwrite a field with an already coerced value
    pub fn set(&mut self, field: Field, value: Option<f64>) {
        *self.slot_mut(field) = value;
    }

    /// Add `delta` to a field, counting an empty field as zero
    ///
    /// Unlike [`Record::set`] this never leaves the field empty: `-1` on an
    /// empty field yields `-1`.
    pub fn adjust(&mut self, field: Field, delta: f64) -> f64 {
        let slot = self.slot_mut(field);
        let next = slot.unwrap_or(0.0) + delta;
        *slot = Some(next);
        next
    }
}

/// Coerce raw user text into a field value
///
/// Blank text is the empty marker. Anything else must parse as a finite
/// number; `"0"` is a real zero, not empty.
pub fn parse_quantity(raw: &str) -> Result<Option<f64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        Ok(_) => Err(format!("'{}' is not a finite number", trimmed)),
        Err(_) => Err(format!("'{}' is not a number", trimmed)),
    }
}

/// Format a field value for display; the empty marker renders blank
pub fn format_quantity(value: Option<f64>) -> String {
    match value {
        None => String::new(),
        Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", v as i64),
        Some(v) => format!("{}", v),
    }
}

/// Serde adapter for the empty marker
///
/// Writes `""` for empty and whole numbers as integers, which is the shape
/// the browser version of the planner stored. Reads numbers, numeric
/// strings, `""` and `null`.
pub mod quantity {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::ser::Error as _;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            None => serializer.serialize_str(""),
            // JSON would write these as null, which reads back as empty
            Some(v) if !v.is_finite() => Err(S::Error::custom(format!(
                "cannot store non-finite quantity {}",
                v
            ))),
            Some(v) if v.fract() == 0.0 && v.abs() < 9.0e15 => serializer.serialize_i64(*v as i64),
            Some(v) => serializer.serialize_f64(*v),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        deserializer.deserialize_any(QuantityVisitor)
    }

    struct QuantityVisitor;

    impl<'de> Visitor<'de> for QuantityVisitor {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number, a numeric string, an empty string or null")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            super::parse_quantity(v).map_err(E::custom)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(QuantityVisitor)
        }
    }
}
