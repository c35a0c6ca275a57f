//! Consistency checks between tax lines and document totals.
//!
//! A passing check raises the confidence of every field it cross-validated
//! to `1.0`. Values are never modified here.

use docextract_core::TaxLine;

use crate::checklist::{CheckName, Checklist};
use crate::config::ToleranceConfig;
use crate::model::MonetaryDocument;
use crate::tolerance::{within_flat, within_scaled};

/// Run all checks against the extracted values and store the checklist.
pub fn run_checks(doc: &mut MonetaryDocument, tol: &ToleranceConfig) {
    let checklist: Checklist = CheckName::ALL
        .into_iter()
        .map(|name| {
            let passed = match name {
                CheckName::TaxesMatchTotalIncl => taxes_match_total_incl(doc, tol),
                CheckName::TaxesMatchTotalExcl => taxes_match_total_excl(doc, tol),
                CheckName::TaxesAndTotalExclMatchTotalIncl => {
                    taxes_and_total_excl_match_total_incl(doc, tol)
                }
            };
            log::debug!("check {name}: {}", if passed { "pass" } else { "fail" });
            (name, passed)
        })
        .collect();
    doc.checklist = checklist;
}

/// Check A: each tax line rebuilt into its taxed base sums to `total_incl`.
pub fn taxes_match_total_incl(doc: &mut MonetaryDocument, tol: &ToleranceConfig) -> bool {
    let Some(total_incl) = doc.total_incl.value else {
        return false;
    };
    let Some((total_vat, reconstructed)) =
        sum_over_rates(&doc.taxes, |value, rate| value + 100.0 * value / rate)
    else {
        return false;
    };
    if total_vat <= 0.0 || !within_scaled(total_incl, reconstructed, total_vat, tol) {
        return false;
    }

    confirm_taxes(doc);
    doc.total_incl.confidence = 1.0;
    true
}

/// Check B: each tax line rebuilt into its base sums to `total_excl`.
pub fn taxes_match_total_excl(doc: &mut MonetaryDocument, tol: &ToleranceConfig) -> bool {
    let Some(total_excl) = doc.total_excl.value else {
        return false;
    };
    let Some((total_vat, reconstructed)) =
        sum_over_rates(&doc.taxes, |value, rate| 100.0 * value / rate)
    else {
        return false;
    };
    if total_vat <= 0.0 || !within_scaled(total_excl, reconstructed, total_vat, tol) {
        return false;
    }

    confirm_taxes(doc);
    doc.total_excl.confidence = 1.0;
    true
}

/// Check C: `total_excl` plus the tax lines equals `total_incl`.
pub fn taxes_and_total_excl_match_total_incl(
    doc: &mut MonetaryDocument,
    tol: &ToleranceConfig,
) -> bool {
    let (Some(total_excl), Some(total_incl)) = (doc.total_excl.value, doc.total_incl.value) else {
        return false;
    };
    if doc.taxes.is_empty() {
        return false;
    }

    let mut total_vat = 0.0;
    for tax in &doc.taxes {
        let Some(value) = tax.value else {
            return false;
        };
        total_vat += value;
    }
    if total_vat <= 0.0 {
        return false;
    }

    let reconstructed = total_vat + total_excl;
    if !within_flat(total_incl, reconstructed, tol) {
        return false;
    }

    confirm_taxes(doc);
    doc.total_incl.confidence = 1.0;
    true
}

/// Sum of tax values alongside the sum of `term(value, rate)` per line.
///
/// `None` when there are no lines, or any line lacks a value, lacks a rate,
/// has a zero rate, or produces a non-finite term.
fn sum_over_rates(taxes: &[TaxLine], term: impl Fn(f64, f64) -> f64) -> Option<(f64, f64)> {
    if taxes.is_empty() {
        return None;
    }

    let mut total_vat = 0.0;
    let mut reconstructed = 0.0;
    for tax in taxes {
        let (Some(value), Some(rate)) = (tax.value, tax.rate) else {
            return None;
        };
        if rate == 0.0 {
            return None;
        }
        let part = term(value, rate);
        if !part.is_finite() {
            return None;
        }
        total_vat += value;
        reconstructed += part;
    }
    Some((total_vat, reconstructed))
}

/// Tax lines and the tax total are ground truth once a check passes.
/// An absent tax total stays at zero confidence.
fn confirm_taxes(doc: &mut MonetaryDocument) {
    for tax in &mut doc.taxes {
        tax.confidence = 1.0;
    }
    if doc.total_tax.is_present() {
        doc.total_tax.confidence = 1.0;
    }
}
