//! Vegetation index computation and classification.
//!
//! An index value is bucketed into one of 7 ordinal classes:
//!
//! | Class | Range          |
//! |-------|----------------|
//! | 1     | \[0.00, 0.15)  |
//! | 2     | \[0.15, 0.25)  |
//! | 3     | \[0.25, 0.35)  |
//! | 4     | \[0.35, 0.45)  |
//! | 5     | \[0.45, 0.65)  |
//! | 6     | \[0.65, 0.75)  |
//! | 7     | \[0.75, 1.00\] |
//!
//! Negative values (water, clouds,...) must be masked before
//! classification, see [`mask_negative`] and [`classify_masked`].

use std::fmt;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::{Error, Result};

/// Lower bounds (inclusive) of classes 2 to 7.
const THRESHOLDS: [f64; 6] = [0.15, 0.25, 0.35, 0.45, 0.65, 0.75];

const LABELS: [&str; 7] = [
    "Absent vegetation (water/clouds/built-up/rocks/sand)",
    "Bare soil",
    "Low vegetation",
    "Light vegetation",
    "Moderate vegetation",
    "Strong vegetation",
    "Dense vegetation",
];

/// A vegetation density class, from 1 (no vegetation) to 7 (dense
/// vegetation).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
         Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct IndexClass(u8);

impl IndexClass {
    /// All classes, in increasing order.
    pub const ALL: [IndexClass; 7] = [
        IndexClass(1), IndexClass(2), IndexClass(3), IndexClass(4),
        IndexClass(5), IndexClass(6), IndexClass(7)];

    pub fn new(value: u8) -> Result<Self> {
        if (1 ..= 7).contains(&value) { Ok(IndexClass(value)) }
        else { Err(Error::InvalidClass(value)) }
    }

    /// The class number, in 1..=7.
    #[inline]
    pub fn value(self) -> u8 { self.0 }

    /// Position of the class in a classified palette.
    #[inline]
    pub fn index(self) -> usize { self.0 as usize - 1 }

    /// Legend label of the class.
    pub fn label(self) -> &'static str { LABELS[self.index()] }

    /// Range `[lower, upper)` of index values mapped to this class.
    /// The range of class 7 also contains its upper bound 1.
    pub fn bounds(self) -> (f64, f64) {
        let i = self.index();
        let lower = if i == 0 { 0. } else { THRESHOLDS[i - 1] };
        let upper = if i == 6 { 1. } else { THRESHOLDS[i] };
        (lower, upper)
    }
}

impl TryFrom<u8> for IndexClass {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> { IndexClass::new(value) }
}

impl From<IndexClass> for u8 {
    fn from(c: IndexClass) -> u8 { c.0 }
}

impl fmt::Display for IndexClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn classify_at(value: f64, position: usize) -> Result<IndexClass> {
    // Also rejects NaN.
    if !(0. ..= 1.).contains(&value) {
        return Err(Error::InvalidInput { value, position });
    }
    let above = THRESHOLDS.iter().take_while(|&&t| value >= t).count();
    Ok(IndexClass(above as u8 + 1))
}

/// Return the class of the index `value`.
///
/// # Errors
/// [`Error::InvalidInput`] if `value` is not in \[0, 1\].  Values are
/// never clamped: a negative value here means masking was skipped.
///
/// # Example
/// ```
/// use ndvi_palette::classify;
/// assert_eq!(classify(0.15)?.value(), 2);
/// assert_eq!(classify(1.0)?.value(), 7);
/// assert!(classify(-0.2).is_err());
/// # Ok::<(), ndvi_palette::Error>(())
/// ```
#[inline]
pub fn classify(value: f64) -> Result<IndexClass> {
    classify_at(value, 0)
}

/// Classify every value of `values`, failing on the first value out
/// of \[0, 1\] (its position is reported in the error).
pub fn classify_all(values: &[f64]) -> Result<Vec<IndexClass>> {
    values.iter().enumerate()
        .map(|(i, &v)| classify_at(v, i))
        .collect()
}

/// Mask the values the way the imagery service does before
/// classification: negative values and NaN become `None`.
pub fn mask_negative(values: &[f64]) -> Vec<Option<f64>> {
    values.iter()
        .map(|&v| if v >= 0. { Some(v) } else { None })
        .collect()
}

/// Mask negative values, then classify the others.
///
/// Values above 1 are not masked and still yield
/// [`Error::InvalidInput`].
pub fn classify_masked(values: &[f64]) -> Result<Vec<Option<IndexClass>>> {
    let classes = mask_negative(values).into_iter().enumerate()
        .map(|(i, v)| v.map(|v| classify_at(v, i)).transpose())
        .collect::<Result<Vec<_>>>()?;
    debug!(pixels = values.len(),
           masked = classes.iter().filter(|c| c.is_none()).count(),
           "classified index values");
    Ok(classes)
}

/// Normalized difference `(nir - red) / (nir + red)`.
///
/// Returns `None` when an input is not finite or when both
/// reflectances sum to zero.
pub fn ndvi(nir: f64, red: f64) -> Option<f64> {
    let sum = nir + red;
    if !nir.is_finite() || !red.is_finite() || sum == 0. {
        return None;
    }
    Some((nir - red) / sum)
}

/// Per-pixel [`ndvi`] of two bands of the same length.
pub fn ndvi_bands(nir: &[f64], red: &[f64]) -> Result<Vec<Option<f64>>> {
    if nir.len() != red.len() {
        return Err(Error::LengthMismatch { expected: nir.len(),
                                           actual: red.len() });
    }
    Ok(nir.iter().zip(red).map(|(&n, &r)| ndvi(n, r)).collect())
}


#[cfg(test)]
mod tests {
    use super::*;

    fn class(v: f64) -> u8 { classify(v).unwrap().value() }

    #[test]
    fn examples() {
        assert_eq!(class(0.10), 1);
        assert_eq!(class(0.30), 3);
        assert_eq!(class(0.50), 5);
        assert_eq!(class(0.80), 7);
    }

    #[test]
    fn lower_bounds_are_inclusive() {
        assert_eq!(class(0.), 1);
        assert_eq!(class(0.1499), 1);
        assert_eq!(class(0.15), 2);
        assert_eq!(class(0.25), 3);
        assert_eq!(class(0.35), 4);
        assert_eq!(class(0.45), 5);
        assert_eq!(class(0.65), 6);
        assert_eq!(class(0.75), 7);
        assert_eq!(class(1.), 7);
    }

    #[test]
    fn monotone() {
        let mut prev = 1;
        for i in 0 ..= 1000 {
            let c = class(i as f64 / 1000.);
            assert!(c >= prev, "class decreases at {}", i as f64 / 1000.);
            prev = c;
        }
        assert_eq!(prev, 7);
    }

    #[test]
    fn bounds_agree_with_classify() {
        for c in IndexClass::ALL {
            let (lo, hi) = c.bounds();
            assert_eq!(classify(lo).unwrap(), c);
            assert_eq!(classify((lo + hi) / 2.).unwrap(), c);
        }
        assert_eq!(IndexClass::ALL[6].bounds(), (0.75, 1.));
    }

    #[test]
    fn out_of_domain_values_are_rejected() {
        for v in [-0.01, -1., 1.0001, f64::NAN, f64::INFINITY] {
            assert!(matches!(classify(v), Err(Error::InvalidInput { .. })),
                    "{v} accepted");
        }
    }

    #[test]
    fn classify_all_reports_position() {
        match classify_all(&[0.2, 0.9, -0.3]) {
            Err(Error::InvalidInput { position, .. }) => assert_eq!(position, 2),
            r => panic!("unexpected {r:?}"),
        }
        let c = classify_all(&[0.2, 0.9]).unwrap();
        assert_eq!(c, vec![IndexClass::new(2).unwrap(),
                           IndexClass::new(7).unwrap()]);
    }

    #[test]
    fn masked_classification() {
        let c = classify_masked(&[-0.4, 0.05, f64::NAN, 0.7]).unwrap();
        assert_eq!(c, vec![None, Some(IndexClass::ALL[0]), None,
                           Some(IndexClass::ALL[5])]);
        assert!(classify_masked(&[0.3, 1.5]).is_err());
    }

    #[test]
    fn class_construction() {
        assert!(IndexClass::new(0).is_err());
        assert!(IndexClass::new(8).is_err());
        assert_eq!(IndexClass::new(2).unwrap().label(), "Bare soil");
        let c: IndexClass = serde_json::from_str("4").unwrap();
        assert_eq!(c.value(), 4);
        assert!(serde_json::from_str::<IndexClass>("9").is_err());
    }

    #[test]
    fn normalized_difference() {
        assert_eq!(ndvi(0.75, 0.25), Some(0.5));
        assert_eq!(ndvi(0., 0.), None);
        assert_eq!(ndvi(f64::NAN, 0.1), None);
        assert!(ndvi(0.05, 0.2).unwrap() < 0.);
        let v = ndvi_bands(&[0.375, 0.], &[0.125, 0.]).unwrap();
        assert_eq!(v, vec![Some(0.5), None]);
        assert!(matches!(ndvi_bands(&[0.4], &[]),
                         Err(Error::LengthMismatch { expected: 1, actual: 0 })));
    }
}
