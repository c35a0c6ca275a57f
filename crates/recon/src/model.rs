use docextract_core::{DateField, Field, TaxLine, TextField};
use serde::{Deserialize, Serialize};

use crate::checklist::Checklist;

/// The monetary part of one extracted document (or one page of it).
///
/// Built once from a prediction, then touched twice by the engine: the
/// checks raise confidences and fill `checklist`, the reconstruction fills
/// in missing totals. Treated as read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonetaryDocument {
    pub total_incl: Field,
    pub total_excl: Field,
    pub total_tax: Field,
    pub taxes: Vec<TaxLine>,
    #[serde(default)]
    pub checklist: Checklist,
    #[serde(default)]
    pub date: DateField,
    #[serde(default)]
    pub reference: TextField,
}

impl MonetaryDocument {
    pub fn new(total_incl: Field, total_excl: Field, total_tax: Field, taxes: Vec<TaxLine>) -> Self {
        Self {
            total_incl,
            total_excl,
            total_tax,
            taxes,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialized_document_keeps_field_invariants() {
        let json = r#"{
            "total_incl": {"value": null, "confidence": 0.9},
            "total_excl": {"value": 100.0, "confidence": 0.4},
            "total_tax": {"value": null, "confidence": 0.5, "derived": true},
            "taxes": [{"value": null, "confidence": 0.7, "rate": 20.0, "code": null, "base": null}]
        }"#;
        let doc: MonetaryDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.total_incl, Field::default());
        assert_eq!(doc.total_tax, Field::default());
        assert_eq!(doc.total_excl, Field::new(Some(100.0), 0.4));
        assert_eq!(doc.taxes[0].confidence, 0.0);
        assert!(doc.checklist.is_empty());
    }

    #[test]
    fn serialize_roundtrip() {
        let mut doc = MonetaryDocument::new(
            Field::new(Some(250.0), 0.81),
            Field::new(Some(240.5), 0.9),
            Field::derived(9.5, 0.9),
            vec![TaxLine::new(Some(9.5), Some(20.0), 0.9).with_code("TVA")],
        );
        doc.reference = TextField::new(Some("INV-4410".into()), 0.92);
        let json = serde_json::to_string(&doc).unwrap();
        let back: MonetaryDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
