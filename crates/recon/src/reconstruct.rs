//! Derivation of missing totals.
//!
//! Four steps run in a fixed order, each a pure function from one document
//! snapshot to the next. A step only writes a field that is still absent, so
//! an extracted value is never overwritten; a later step does see what an
//! earlier one derived.

use docextract_core::{aggregate_confidence, aggregate_sum, Field};

use crate::model::MonetaryDocument;

pub type Step = fn(MonetaryDocument) -> MonetaryDocument;

/// The cascade, in execution order.
pub const STEPS: [Step; 4] = [
    total_tax_from_taxes,
    total_excl_from_total_incl,
    total_incl_from_total_excl,
    total_tax_from_totals,
];

/// Run every step in order.
pub fn reconstruct(doc: MonetaryDocument) -> MonetaryDocument {
    STEPS.iter().fold(doc, |doc, step| step(doc))
}

/// Step 1: `total_tax` = sum of tax lines, kept only when positive.
pub fn total_tax_from_taxes(mut doc: MonetaryDocument) -> MonetaryDocument {
    if doc.taxes.is_empty() {
        log::trace!("total_tax_from_taxes skipped: no tax lines");
        return doc;
    }
    if doc.total_tax.is_present() {
        log::trace!("total_tax_from_taxes skipped: total_tax present");
        return doc;
    }
    let value = aggregate_sum(&doc.taxes);
    if value <= 0.0 {
        log::trace!("total_tax_from_taxes skipped: tax sum {value} not positive");
        return doc;
    }
    commit(
        &mut doc.total_tax,
        Field::derived(value, aggregate_confidence(&doc.taxes)),
        "total_tax from tax lines",
    );
    doc
}

/// Step 2: `total_excl` = `total_incl` - taxes.
pub fn total_excl_from_total_incl(mut doc: MonetaryDocument) -> MonetaryDocument {
    if doc.taxes.is_empty() {
        log::trace!("total_excl_from_total_incl skipped: no tax lines");
        return doc;
    }
    if doc.total_excl.is_present() {
        log::trace!("total_excl_from_total_incl skipped: total_excl present");
        return doc;
    }
    let Some(total_incl) = doc.total_incl.value else {
        log::trace!("total_excl_from_total_incl skipped: total_incl absent");
        return doc;
    };
    let value = total_incl - aggregate_sum(&doc.taxes);
    let confidence = aggregate_confidence(&doc.taxes) * doc.total_incl.confidence;
    commit(&mut doc.total_excl, Field::derived(value, confidence), "total_excl from total_incl");
    doc
}

/// Step 3: `total_incl` = `total_excl` + taxes.
pub fn total_incl_from_total_excl(mut doc: MonetaryDocument) -> MonetaryDocument {
    if doc.taxes.is_empty() {
        log::trace!("total_incl_from_total_excl skipped: no tax lines");
        return doc;
    }
    if doc.total_incl.is_present() {
        log::trace!("total_incl_from_total_excl skipped: total_incl present");
        return doc;
    }
    let Some(total_excl) = doc.total_excl.value else {
        log::trace!("total_incl_from_total_excl skipped: total_excl absent");
        return doc;
    };
    let value = total_excl + aggregate_sum(&doc.taxes);
    let confidence = aggregate_confidence(&doc.taxes) * doc.total_excl.confidence;
    commit(&mut doc.total_incl, Field::derived(value, confidence), "total_incl from total_excl");
    doc
}

/// Step 4: `total_tax` = `total_incl` - `total_excl`, kept only when not negative.
pub fn total_tax_from_totals(mut doc: MonetaryDocument) -> MonetaryDocument {
    if doc.total_tax.is_present() {
        log::trace!("total_tax_from_totals skipped: total_tax present");
        return doc;
    }
    let (Some(total_incl), Some(total_excl)) = (doc.total_incl.value, doc.total_excl.value) else {
        log::trace!("total_tax_from_totals skipped: a total is absent");
        return doc;
    };
    let value = total_incl - total_excl;
    if value < 0.0 {
        log::trace!("total_tax_from_totals skipped: difference {value} negative");
        return doc;
    }
    let confidence = doc.total_incl.confidence * doc.total_excl.confidence;
    commit(&mut doc.total_tax, Field::derived(value, confidence), "total_tax from totals");
    doc
}

/// Write a derived field, unless the derivation produced no usable value.
fn commit(target: &mut Field, derived: Field, what: &str) {
    match derived.value {
        Some(value) => {
            log::debug!("derived {what} = {value}");
            *target = derived;
        }
        None => log::trace!("{what} skipped: result not finite"),
    }
}
