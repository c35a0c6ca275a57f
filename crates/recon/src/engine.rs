use crate::checker::run_checks;
use crate::config::EngineConfig;
use crate::merge::merge_pages;
use crate::model::MonetaryDocument;
use crate::reconstruct::reconstruct;

/// Check the extracted values, then fill in missing totals.
///
/// The checklist always reflects the values as extracted; reconstruction
/// runs afterwards and never feeds back into it.
pub fn process(mut doc: MonetaryDocument, config: &EngineConfig) -> MonetaryDocument {
    run_checks(&mut doc, &config.tolerance);
    if config.reconstruct {
        doc = reconstruct(doc);
    }
    doc
}

/// Process each page independently, then merge them into one document.
pub fn process_pages(pages: Vec<MonetaryDocument>, config: &EngineConfig) -> MonetaryDocument {
    log::debug!("processing {} page(s)", pages.len());
    let processed: Vec<MonetaryDocument> =
        pages.into_iter().map(|page| process(page, config)).collect();
    merge_pages(&processed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::CheckName;
    use docextract_core::{Field, TaxLine};

    fn scenario() -> MonetaryDocument {
        MonetaryDocument::new(
            Field::new(Some(507.25), 0.6),
            Field::default(),
            Field::default(),
            vec![
                TaxLine::new(Some(10.99), Some(20.0), 0.5),
                TaxLine::new(Some(40.12), Some(10.0), 0.1),
            ],
        )
    }

    #[test]
    fn checks_run_on_extracted_values() {
        let out = process(scenario(), &EngineConfig::default());
        // total_excl is derived afterwards, yet the checks never saw it
        assert!(out.total_excl.derived);
        assert_eq!(out.checklist.get(CheckName::TaxesMatchTotalExcl), Some(false));
        assert_eq!(out.checklist.get(CheckName::TaxesAndTotalExclMatchTotalIncl), Some(false));
        assert_eq!(out.checklist.get(CheckName::TaxesMatchTotalIncl), Some(true));
    }

    #[test]
    fn confirmed_taxes_feed_reconstruction() {
        let out = process(scenario(), &EngineConfig::default());
        assert_eq!(out.total_tax.confidence, 1.0);
        assert_eq!(out.total_excl.confidence, 1.0);
        assert!((out.total_excl.value.unwrap() - 456.14).abs() < 1e-9);
    }

    #[test]
    fn reconstruction_can_be_disabled() {
        let config = EngineConfig {
            reconstruct: false,
            ..EngineConfig::default()
        };
        let out = process(scenario(), &config);
        assert!(!out.total_excl.is_present());
        assert!(!out.total_tax.is_present());
        assert!(!out.checklist.is_empty());
    }
}
