//! Multi-page merging: every field comes from the page that is most
//! confident about it.

use docextract_core::{aggregate_confidence, TaxLine};

use crate::checklist::{CheckName, Checklist};
use crate::model::MonetaryDocument;

/// Merge per-page documents into one.
///
/// Each scalar takes the present value with the highest confidence (ties keep
/// the earliest page). Tax lines are taken whole from the page with the most
/// confident non-empty breakdown. A check passes only if it passed on every
/// page that recorded it.
pub fn merge_pages(pages: &[MonetaryDocument]) -> MonetaryDocument {
    MonetaryDocument {
        total_incl: most_confident(pages, |p| &p.total_incl, |f| f.is_present(), |f| f.confidence),
        total_excl: most_confident(pages, |p| &p.total_excl, |f| f.is_present(), |f| f.confidence),
        total_tax: most_confident(pages, |p| &p.total_tax, |f| f.is_present(), |f| f.confidence),
        taxes: most_confident_taxes(pages),
        checklist: merge_checklists(pages),
        date: most_confident(pages, |p| &p.date, |f| f.value.is_some(), |f| f.confidence),
        reference: most_confident(pages, |p| &p.reference, |f| f.value.is_some(), |f| f.confidence),
    }
}

fn most_confident<T: Clone + Default>(
    pages: &[MonetaryDocument],
    get: impl Fn(&MonetaryDocument) -> &T,
    present: impl Fn(&T) -> bool,
    confidence: impl Fn(&T) -> f64,
) -> T {
    let mut best: Option<&T> = None;
    for candidate in pages.iter().map(&get).filter(|f| present(f)) {
        if best.map_or(true, |b| confidence(candidate) > confidence(b)) {
            best = Some(candidate);
        }
    }
    best.cloned().unwrap_or_default()
}

fn most_confident_taxes(pages: &[MonetaryDocument]) -> Vec<TaxLine> {
    let mut best: Option<(&[TaxLine], f64)> = None;
    for taxes in pages.iter().map(|p| p.taxes.as_slice()).filter(|t| !t.is_empty()) {
        let confidence = aggregate_confidence(taxes);
        if best.map_or(true, |(_, c)| confidence > c) {
            best = Some((taxes, confidence));
        }
    }
    best.map(|(taxes, _)| taxes.to_vec()).unwrap_or_default()
}

fn merge_checklists(pages: &[MonetaryDocument]) -> Checklist {
    CheckName::ALL
        .into_iter()
        .filter_map(|name| {
            let mut outcomes = pages.iter().filter_map(|p| p.checklist.get(name)).peekable();
            outcomes.peek()?;
            Some((name, outcomes.all(|passed| passed)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use docextract_core::{Field, TextField};

    fn page(incl: Option<f64>, incl_conf: f64, taxes: Vec<TaxLine>) -> MonetaryDocument {
        MonetaryDocument::new(Field::new(incl, incl_conf), Field::default(), Field::default(), taxes)
    }

    #[test]
    fn highest_confidence_wins() {
        let pages = vec![
            page(Some(100.0), 0.4, Vec::new()),
            page(Some(120.0), 0.9, Vec::new()),
            page(None, 0.0, Vec::new()),
        ];
        let merged = merge_pages(&pages);
        assert_eq!(merged.total_incl.value, Some(120.0));
        assert_eq!(merged.total_incl.confidence, 0.9);
        assert!(!merged.total_excl.is_present());
    }

    #[test]
    fn ties_keep_earliest_page() {
        let mut first = page(Some(100.0), 0.5, Vec::new());
        first.reference = TextField::new(Some("A".into()), 0.5);
        let mut second = page(Some(200.0), 0.5, Vec::new());
        second.reference = TextField::new(Some("B".into()), 0.5);
        let merged = merge_pages(&[first, second]);
        assert_eq!(merged.total_incl.value, Some(100.0));
        assert_eq!(merged.reference.value.as_deref(), Some("A"));
    }

    #[test]
    fn taxes_taken_whole() {
        let low = vec![
            TaxLine::new(Some(1.0), Some(20.0), 0.9),
            TaxLine::new(Some(2.0), Some(10.0), 0.1),
        ];
        let high = vec![TaxLine::new(Some(3.0), Some(20.0), 0.5)];
        let merged = merge_pages(&[page(None, 0.0, low), page(None, 0.0, high.clone()), page(None, 0.0, Vec::new())]);
        assert_eq!(merged.taxes, high);
    }

    #[test]
    fn checklists_combine_with_and() {
        let mut a = MonetaryDocument::default();
        a.checklist = [(CheckName::TaxesMatchTotalIncl, true)].into_iter().collect();
        let mut b = MonetaryDocument::default();
        b.checklist = [
            (CheckName::TaxesMatchTotalIncl, false),
            (CheckName::TaxesMatchTotalExcl, true),
        ]
        .into_iter()
        .collect();
        let merged = merge_pages(&[a, b]);
        assert_eq!(merged.checklist.get(CheckName::TaxesMatchTotalIncl), Some(false));
        assert_eq!(merged.checklist.get(CheckName::TaxesMatchTotalExcl), Some(true));
        assert_eq!(merged.checklist.get(CheckName::TaxesAndTotalExclMatchTotalIncl), None);
    }

    #[test]
    fn no_pages() {
        assert_eq!(merge_pages(&[]), MonetaryDocument::default());
    }
}
