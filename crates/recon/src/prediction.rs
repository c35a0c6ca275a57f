//! Deserialization boundary between a prediction response and the engine.
//!
//! Sentinels and numeric strings are resolved here; the engine only ever
//! sees `Option<f64>` values.

use docextract_core::{DateField, Field, RawField, RawTaxLine, TaxLine, TextField};
use serde::{Deserialize, Serialize};

use crate::error::ReconError;
use crate::model::MonetaryDocument;

/// The monetary fields of one prediction (document-level or one page).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPrediction {
    #[serde(default)]
    pub total_incl: Option<RawField>,
    #[serde(default)]
    pub total_excl: Option<RawField>,
    #[serde(default)]
    pub total_tax: Option<RawField>,
    #[serde(default)]
    pub taxes: Option<Vec<RawTaxLine>>,
    #[serde(default)]
    pub date: Option<RawField>,
    #[serde(default)]
    pub reference: Option<RawField>,
}

/// A multi-page prediction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPages {
    #[serde(default)]
    pub pages: Vec<RawPrediction>,
}

fn field(raw: &Option<RawField>) -> Field {
    raw.as_ref().map(Field::from_raw).unwrap_or_default()
}

impl MonetaryDocument {
    /// Build a document from raw prediction values. The checklist is left empty.
    pub fn from_prediction(raw: &RawPrediction) -> Self {
        let taxes = raw
            .taxes
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(TaxLine::from_raw)
            .collect();
        Self {
            total_incl: field(&raw.total_incl),
            total_excl: field(&raw.total_excl),
            total_tax: field(&raw.total_tax),
            taxes,
            date: raw.date.as_ref().map(DateField::from_raw).unwrap_or_default(),
            reference: raw.reference.as_ref().map(TextField::from_raw).unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn from_json(input: &str) -> Result<Self, ReconError> {
        let raw: RawPrediction =
            serde_json::from_str(input).map_err(|e| ReconError::PredictionParse(e.to_string()))?;
        Ok(Self::from_prediction(&raw))
    }
}

/// Parse a `{"pages": [...]}` prediction into one document per page.
pub fn pages_from_json(input: &str) -> Result<Vec<MonetaryDocument>, ReconError> {
    let raw: RawPages =
        serde_json::from_str(input).map_err(|e| ReconError::PredictionParse(e.to_string()))?;
    Ok(raw.pages.iter().map(MonetaryDocument::from_prediction).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_json_resolves_sentinels() {
        let json = r#"{
            "total_incl": {"value": "507.25", "confidence": 0.6},
            "total_excl": {"value": "N/A", "confidence": 0.4},
            "total_tax": null,
            "taxes": [
                {"value": 10.99, "rate": 20, "code": "N/A", "confidence": 0.5},
                {"value": "40.12", "rate": "10", "code": "TVA", "base": 401.2, "confidence": 0.1}
            ],
            "reference": {"value": "INV-001", "confidence": 0.8}
        }"#;
        let doc = MonetaryDocument::from_json(json).unwrap();
        assert_eq!(doc.total_incl.value, Some(507.25));
        assert_eq!(doc.total_excl.value, None);
        assert_eq!(doc.total_excl.confidence, 0.0);
        assert_eq!(doc.total_tax, Field::default());
        assert_eq!(doc.taxes.len(), 2);
        assert_eq!(doc.taxes[0].code, None);
        assert_eq!(doc.taxes[1].rate, Some(10.0));
        assert_eq!(doc.taxes[1].code.as_deref(), Some("TVA"));
        assert_eq!(doc.taxes[1].base, Some(401.2));
        assert_eq!(doc.reference.value.as_deref(), Some("INV-001"));
        assert!(doc.checklist.is_empty());
    }

    #[test]
    fn empty_object_is_empty_document() {
        let doc = MonetaryDocument::from_json("{}").unwrap();
        assert_eq!(doc, MonetaryDocument::default());
    }

    #[test]
    fn malformed_json_is_error() {
        let err = MonetaryDocument::from_json("{\"taxes\": 3}").unwrap_err();
        assert!(matches!(err, ReconError::PredictionParse(_)));
    }

    #[test]
    fn pages() {
        let json = r#"{"pages": [{"total_incl": {"value": 1, "confidence": 0.1}}, {}]}"#;
        let pages = pages_from_json(json).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].total_incl.value, Some(1.0));
    }
}
