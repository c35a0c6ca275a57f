use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::confidence_for;
use crate::format::format_amount;
use crate::raw::{normalize_text, RawScalar, RawTaxLine};

/// One bracket of a tax breakdown.
///
/// `rate` is a percentage (20 means 20%). Like `Field`, a line without a
/// value carries confidence `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "TaxLineRepr")]
pub struct TaxLine {
    pub value: Option<f64>,
    pub confidence: f64,
    pub derived: bool,
    pub rate: Option<f64>,
    pub code: Option<String>,
    pub base: Option<f64>,
}

impl TaxLine {
    pub fn new(value: Option<f64>, rate: Option<f64>, confidence: f64) -> Self {
        let value = value.filter(|v| v.is_finite());
        Self {
            confidence: confidence_for(&value, confidence),
            value,
            derived: false,
            rate: rate.filter(|r| r.is_finite()),
            code: None,
            base: None,
        }
    }

    pub fn with_code(mut self, code: impl AsRef<str>) -> Self {
        self.code = normalize_text(code.as_ref());
        self
    }

    pub fn with_base(mut self, base: f64) -> Self {
        self.base = Some(base).filter(|b| b.is_finite());
        self
    }

    pub fn from_raw(raw: &RawTaxLine) -> Self {
        let number = |s: &Option<RawScalar>| s.as_ref().and_then(RawScalar::as_number);
        Self {
            code: raw.code.as_ref().and_then(RawScalar::as_text),
            base: number(&raw.base),
            ..Self::new(number(&raw.value), number(&raw.rate), raw.confidence.unwrap_or(0.0))
        }
    }
}

/// Wire shape of a `TaxLine`; deserialized values pass through `TaxLine::new`.
#[derive(Deserialize)]
struct TaxLineRepr {
    value: Option<f64>,
    #[serde(default)]
    confidence: f64,
    #[serde(default)]
    derived: bool,
    rate: Option<f64>,
    code: Option<String>,
    base: Option<f64>,
}

impl From<TaxLineRepr> for TaxLine {
    fn from(repr: TaxLineRepr) -> Self {
        let tax = Self::new(repr.value, repr.rate, repr.confidence);
        Self {
            derived: repr.derived && tax.value.is_some(),
            code: repr.code.as_deref().and_then(normalize_text),
            base: repr.base.filter(|b| b.is_finite()),
            ..tax
        }
    }
}

impl fmt::Display for TaxLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value.map(format_amount).unwrap_or_default();
        let rate = self.rate.map(format_amount).unwrap_or_default();
        write!(f, "{value} {rate}%")?;
        if let Some(ref code) = self.code {
            write!(f, " {code}")?;
        }
        if let Some(base) = self.base {
            write!(f, " base {}", format_amount(base))?;
        }
        Ok(())
    }
}
