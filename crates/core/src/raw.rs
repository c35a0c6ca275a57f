//! Raw values as they arrive in a prediction response.
//!
//! Amounts may be JSON numbers, numeric strings, the `"N/A"` sentinel or
//! null. Everything past this module only ever sees `Option<f64>`.

use serde::{Deserialize, Serialize};

/// Sentinel the extraction service uses for "nothing found".
pub const NOT_AVAILABLE: &str = "N/A";

/// A scalar exactly as the service sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Number(f64),
    Text(String),
}

impl RawScalar {
    /// Finite number, or `None` for sentinels, junk and non-finite values.
    pub fn as_number(&self) -> Option<f64> {
        let parsed = match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => {
                let s = s.trim();
                if s.is_empty() || s == NOT_AVAILABLE {
                    None
                } else {
                    let parsed = s.parse::<f64>().ok();
                    if parsed.is_none() {
                        log::trace!("discarding non-numeric raw value '{s}'");
                    }
                    parsed
                }
            }
        };
        parsed.filter(|n| n.is_finite())
    }

    /// Non-empty text, with the sentinel mapped to `None`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Number(n) => Some(n.to_string()),
            Self::Text(s) => normalize_text(s),
        }
    }
}

/// Trimmed text, or `None` when blank or the sentinel.
pub fn normalize_text(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() || s == NOT_AVAILABLE {
        None
    } else {
        Some(s.to_string())
    }
}

/// One field of a prediction: a value plus the extractor's confidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawField {
    #[serde(default)]
    pub value: Option<RawScalar>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl RawField {
    pub fn number(&self) -> Option<f64> {
        self.value.as_ref().and_then(RawScalar::as_number)
    }

    pub fn text(&self) -> Option<String> {
        self.value.as_ref().and_then(RawScalar::as_text)
    }
}

/// One tax bracket of a prediction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTaxLine {
    #[serde(default)]
    pub value: Option<RawScalar>,
    #[serde(default)]
    pub rate: Option<RawScalar>,
    #[serde(default)]
    pub code: Option<RawScalar>,
    #[serde(default)]
    pub base: Option<RawScalar>,
    #[serde(default)]
    pub confidence: Option<f64>,
}
