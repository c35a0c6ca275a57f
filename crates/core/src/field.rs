use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::format::format_amount;
use crate::raw::RawField;

/// Force a confidence into [0, 1]. Non-finite scores carry no information.
pub(crate) fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_finite() {
        confidence.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Confidence for a value that may be missing: zero when there is no value.
pub(crate) fn confidence_for<T>(value: &Option<T>, confidence: f64) -> f64 {
    if value.is_some() {
        clamp_confidence(confidence)
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Monetary field
// ---------------------------------------------------------------------------

/// An extracted amount.
///
/// `value` is `None` when extraction failed; in that case `confidence` is
/// always `0.0`. `derived` is set when the value was computed from other
/// fields instead of read from the prediction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "FieldRepr")]
pub struct Field {
    pub value: Option<f64>,
    pub confidence: f64,
    pub derived: bool,
}

impl Field {
    pub fn new(value: Option<f64>, confidence: f64) -> Self {
        let value = value.filter(|v| v.is_finite());
        Self {
            confidence: confidence_for(&value, confidence),
            value,
            derived: false,
        }
    }

    /// A field computed from other fields. A non-finite result is no
    /// value at all, so it yields an empty, non-derived field.
    pub fn derived(value: f64, confidence: f64) -> Self {
        if !value.is_finite() {
            return Self::default();
        }
        Self {
            derived: true,
            ..Self::new(Some(value), confidence)
        }
    }

    pub fn from_raw(raw: &RawField) -> Self {
        Self::new(raw.number(), raw.confidence.unwrap_or(0.0))
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

/// Wire shape of a `Field`; deserialized values pass through `Field::new`.
#[derive(Deserialize)]
struct FieldRepr {
    value: Option<f64>,
    #[serde(default)]
    confidence: f64,
    #[serde(default)]
    derived: bool,
}

impl From<FieldRepr> for Field {
    fn from(repr: FieldRepr) -> Self {
        let field = Self::new(repr.value, repr.confidence);
        Self {
            derived: repr.derived && field.is_present(),
            ..field
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => f.write_str(&format_amount(v)),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Text field
// ---------------------------------------------------------------------------

/// A non-monetary string field (reference numbers, names).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "TextFieldRepr")]
pub struct TextField {
    pub value: Option<String>,
    pub confidence: f64,
}

impl TextField {
    pub fn new(value: Option<String>, confidence: f64) -> Self {
        Self {
            confidence: confidence_for(&value, confidence),
            value,
        }
    }

    pub fn from_raw(raw: &RawField) -> Self {
        Self::new(raw.text(), raw.confidence.unwrap_or(0.0))
    }
}

#[derive(Deserialize)]
struct TextFieldRepr {
    value: Option<String>,
    #[serde(default)]
    confidence: f64,
}

impl From<TextFieldRepr> for TextField {
    fn from(repr: TextFieldRepr) -> Self {
        Self::new(repr.value, repr.confidence)
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value.as_deref().unwrap_or(""))
    }
}

// ---------------------------------------------------------------------------
// Date field
// ---------------------------------------------------------------------------

/// An ISO `YYYY-MM-DD` date field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "DateFieldRepr")]
pub struct DateField {
    pub value: Option<NaiveDate>,
    pub confidence: f64,
}

impl DateField {
    pub fn new(value: Option<NaiveDate>, confidence: f64) -> Self {
        Self {
            confidence: confidence_for(&value, confidence),
            value,
        }
    }

    pub fn from_raw(raw: &RawField) -> Self {
        let value = raw
            .text()
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok());
        Self::new(value, raw.confidence.unwrap_or(0.0))
    }
}

#[derive(Deserialize)]
struct DateFieldRepr {
    value: Option<NaiveDate>,
    #[serde(default)]
    confidence: f64,
}

impl From<DateFieldRepr> for DateField {
    fn from(repr: DateFieldRepr) -> Self {
        Self::new(repr.value, repr.confidence)
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            None => Ok(()),
        }
    }
}
