//! Coverage of the vegetation classes, and class changes between two
//! dates.

use serde::Serialize;
use crate::classify::classify_masked;
use crate::{Error, IndexClass, Result};

/// Descriptive statistics of an index raster.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassSummary {
    /// Number of pixels of each class (class 1 first).
    pub counts: [usize; 7],
    /// Pixels masked out (negative or NaN).
    pub masked: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl ClassSummary {
    /// Summarize the index `values`, masking negative values first.
    ///
    /// ```
    /// use ndvi_palette::{summary::ClassSummary, IndexClass};
    /// let s = ClassSummary::from_values(&[-0.3, 0.1, 0.2, 0.8, 0.9])?;
    /// assert_eq!(s.masked, 1);
    /// assert_eq!(s.dominant(), Some(IndexClass::new(7)?));
    /// # Ok::<(), ndvi_palette::Error>(())
    /// ```
    pub fn from_values(values: &[f64]) -> Result<Self> {
        let classes = classify_masked(values)?;
        let mut counts = [0; 7];
        let mut masked = 0;
        for c in &classes {
            match c {
                Some(c) => counts[c.index()] += 1,
                None => masked += 1,
            }
        }
        let kept: Vec<f64> = values.iter().copied().filter(|&v| v >= 0.).collect();
        let (min, max, mean) = if kept.is_empty() {
            (None, None, None)
        } else {
            (Some(kept.iter().copied().fold(f64::INFINITY, f64::min)),
             Some(kept.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
             Some(kept.iter().sum::<f64>() / kept.len() as f64))
        };
        Ok(ClassSummary { counts, masked, min, max, mean })
    }

    /// Number of classified (unmasked) pixels.
    pub fn classified(&self) -> usize { self.counts.iter().sum() }

    pub fn count(&self, class: IndexClass) -> usize { self.counts[class.index()] }

    /// Share of the classified pixels that belong to `class`, 0 when
    /// every pixel is masked.
    pub fn fraction(&self, class: IndexClass) -> f64 {
        let n = self.classified();
        if n == 0 { 0. } else { self.count(class) as f64 / n as f64 }
    }

    /// Most frequent class; ties go to the denser class.
    pub fn dominant(&self) -> Option<IndexClass> {
        IndexClass::ALL.into_iter()
            .filter(|&c| self.count(c) > 0)
            .max_by_key(|&c| (self.count(c), c))
    }
}

/// Transitions between the classes of two rasters of the same area.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassChange {
    /// `transitions[from][to]`, indices being [`IndexClass::index`].
    pub transitions: [[usize; 7]; 7],
    /// Pixels masked at either date.
    pub masked: usize,
}

impl ClassChange {
    /// Compare the `initial` and `updated` index values pixel by pixel.
    pub fn between(initial: &[f64], updated: &[f64]) -> Result<Self> {
        if initial.len() != updated.len() {
            return Err(Error::LengthMismatch { expected: initial.len(),
                                               actual: updated.len() });
        }
        let before = classify_masked(initial)?;
        let after = classify_masked(updated)?;
        let mut transitions = [[0; 7]; 7];
        let mut masked = 0;
        for (b, a) in before.into_iter().zip(after) {
            match (b, a) {
                (Some(b), Some(a)) => transitions[b.index()][a.index()] += 1,
                _ => masked += 1,
            }
        }
        Ok(ClassChange { transitions, masked })
    }

    pub fn count(&self, from: IndexClass, to: IndexClass) -> usize {
        self.transitions[from.index()][to.index()]
    }

    fn sum_where(&self, keep: impl Fn(usize, usize) -> bool) -> usize {
        (0 .. 7).flat_map(|i| (0 .. 7).map(move |j| (i, j)))
            .filter(|&(i, j)| keep(i, j))
            .map(|(i, j)| self.transitions[i][j])
            .sum()
    }

    /// Pixels whose class increased.
    pub fn improved(&self) -> usize { self.sum_where(|from, to| to > from) }

    /// Pixels whose class decreased.
    pub fn degraded(&self) -> usize { self.sum_where(|from, to| to < from) }

    pub fn unchanged(&self) -> usize { self.sum_where(|from, to| to == from) }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn class(v: u8) -> IndexClass { IndexClass::new(v).unwrap() }

    #[test]
    fn counts_and_fractions() {
        let s = ClassSummary::from_values(
            &[0.05, 0.1, 0.3, 0.5, -0.2, f64::NAN, 0.76, 1.]).unwrap();
        assert_eq!(s.counts, [2, 0, 1, 0, 1, 0, 2]);
        assert_eq!(s.masked, 2);
        assert_eq!(s.classified(), 6);
        assert_eq!(s.fraction(class(1)), 2. / 6.);
        assert_eq!(s.min, Some(0.05));
        assert_eq!(s.max, Some(1.));
        assert_eq!(s.dominant(), Some(class(7)));
    }

    #[test]
    fn all_masked() {
        let s = ClassSummary::from_values(&[-0.5, -0.1]).unwrap();
        assert_eq!(s.classified(), 0);
        assert_eq!(s.fraction(class(3)), 0.);
        assert_eq!(s.mean, None);
        assert_eq!(s.dominant(), None);
    }

    #[test]
    fn out_of_range_is_error() {
        assert!(ClassSummary::from_values(&[0.5, 1.2]).is_err());
    }

    #[test]
    fn change_between_dates() {
        let initial = [0.1, 0.3, 0.8, -0.1, 0.5];
        let updated = [0.5, 0.3, 0.2, 0.4, 0.6];
        let c = ClassChange::between(&initial, &updated).unwrap();
        assert_eq!(c.masked, 1);
        assert_eq!(c.count(class(1), class(5)), 1);
        assert_eq!(c.count(class(7), class(2)), 1);
        assert_eq!(c.improved(), 1);
        assert_eq!(c.degraded(), 1);
        assert_eq!(c.unchanged(), 2);
        assert!(ClassChange::between(&initial, &updated[1..]).is_err());
    }
}
