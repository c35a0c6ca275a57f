use crate::field::Field;
use crate::tax::TaxLine;

/// Anything carrying an optional amount and a confidence score.
pub trait Scored {
    fn value(&self) -> Option<f64>;
    fn confidence(&self) -> f64;
}

impl Scored for Field {
    fn value(&self) -> Option<f64> {
        self.value
    }

    fn confidence(&self) -> f64 {
        self.confidence
    }
}

impl Scored for TaxLine {
    fn value(&self) -> Option<f64> {
        self.value
    }

    fn confidence(&self) -> f64 {
        self.confidence
    }
}

/// Product of every confidence. Empty input is `1.0`; any non-finite
/// confidence makes the whole product `0.0`.
pub fn aggregate_confidence<T: Scored>(items: &[T]) -> f64 {
    let mut product = 1.0;
    for item in items {
        let confidence = item.confidence();
        if !confidence.is_finite() {
            return 0.0;
        }
        product *= confidence;
    }
    product
}

/// Sum of every value, counting absent values as zero. A running sum that
/// overflows to a non-finite number yields `0.0`.
pub fn aggregate_sum<T: Scored>(items: &[T]) -> f64 {
    let mut sum = 0.0;
    for item in items {
        sum += item.value().unwrap_or(0.0);
        if !sum.is_finite() {
            return 0.0;
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tax(value: Option<f64>, confidence: f64) -> TaxLine {
        TaxLine::new(value, Some(20.0), confidence)
    }

    #[test]
    fn empty_confidence_is_identity() {
        let empty: Vec<TaxLine> = Vec::new();
        assert_eq!(aggregate_confidence(&empty), 1.0);
        assert_eq!(aggregate_sum(&empty), 0.0);
    }

    #[test]
    fn confidence_product() {
        let taxes = vec![tax(Some(10.2), 0.5), tax(Some(40.0), 0.1)];
        assert!((aggregate_confidence(&taxes) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn absent_value_zeroes_confidence() {
        let taxes = vec![tax(Some(10.2), 0.5), tax(None, 0.9)];
        assert_eq!(aggregate_confidence(&taxes), 0.0);
    }

    #[test]
    fn non_finite_confidence_is_zero() {
        let mut bad = tax(Some(1.0), 0.5);
        bad.confidence = f64::NAN;
        assert_eq!(aggregate_confidence(&[tax(Some(1.0), 0.5), bad]), 0.0);
    }

    #[test]
    fn sum_skips_absent() {
        let taxes = vec![tax(Some(10.99), 0.5), tax(None, 0.0), tax(Some(40.12), 0.1)];
        assert!((aggregate_sum(&taxes) - 51.11).abs() < 1e-9);
    }

    #[test]
    fn overflowing_sum_is_zero() {
        let fields = vec![Field::new(Some(f64::MAX), 1.0), Field::new(Some(f64::MAX), 1.0)];
        assert_eq!(aggregate_sum(&fields), 0.0);
    }
}
