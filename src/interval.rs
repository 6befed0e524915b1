//! Interval numbers used to carry epistemic bounds through the pipeline.
//!
//! Only the operations the frequency-response analysis needs are provided:
//! bound access, hull, and worst-case addition and multiplication.

use std::ops::{Add, Index, Mul};

use serde::{Deserialize, Serialize};

use crate::{ensure_len, IfrError};

/// Closed interval `[lo, hi]` with `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    lo: f64,
    hi: f64,
}

impl Interval {
    pub fn new(lo: f64, hi: f64) -> Result<Self, IfrError> {
        if lo.is_nan() || hi.is_nan() || lo > hi {
            return Err(IfrError::InvalidInterval { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    /// Zero-width interval `[x, x]`.
    pub fn degenerate(x: f64) -> Self {
        Self { lo: x, hi: x }
    }

    /// `[x (1 - rel), x (1 + rel)]`, reordered when `x` is negative.
    pub fn from_relative(x: f64, rel: f64) -> Self {
        let a = x * (1.0 - rel);
        let b = x * (1.0 + rel);
        Self {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lo + self.hi)
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    pub fn contains(&self, x: f64) -> bool {
        self.lo <= x && x <= self.hi
    }

    /// Smallest interval enclosing both operands.
    pub fn hull(&self, other: &Interval) -> Interval {
        Interval {
            lo: self.lo.min(other.lo),
            hi: self.hi.max(other.hi),
        }
    }
}

impl Add for Interval {
    type Output = Interval;

    fn add(self, rhs: Interval) -> Interval {
        Interval {
            lo: self.lo + rhs.lo,
            hi: self.hi + rhs.hi,
        }
    }
}

impl Mul for Interval {
    type Output = Interval;

    fn mul(self, rhs: Interval) -> Interval {
        let products = [
            self.lo * rhs.lo,
            self.lo * rhs.hi,
            self.hi * rhs.lo,
            self.hi * rhs.hi,
        ];
        Interval {
            lo: products.iter().copied().fold(f64::INFINITY, f64::min),
            hi: products.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

impl Mul<f64> for Interval {
    type Output = Interval;

    fn mul(self, rhs: f64) -> Interval {
        let a = self.lo * rhs;
        let b = self.hi * rhs;
        Interval {
            lo: a.min(b),
            hi: a.max(b),
        }
    }
}

/// Sequence of intervals, one per frequency bin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntervalVector {
    items: Vec<Interval>,
}

impl IntervalVector {
    pub fn new(items: Vec<Interval>) -> Self {
        Self { items }
    }

    /// Pairs up lower and upper bound vectors.
    pub fn from_bounds(lo: &[f64], hi: &[f64]) -> Result<Self, IfrError> {
        ensure_len("interval upper bounds", lo.len(), hi.len())?;
        lo.iter()
            .zip(hi)
            .map(|(&l, &h)| Interval::new(l, h))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    pub fn from_points(values: &[f64]) -> Self {
        values.iter().copied().map(Interval::degenerate).collect()
    }

    pub fn lo(&self) -> Vec<f64> {
        self.items.iter().map(Interval::lo).collect()
    }

    pub fn hi(&self) -> Vec<f64> {
        self.items.iter().map(Interval::hi).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.items.iter()
    }
}

impl FromIterator<Interval> for IntervalVector {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Index<usize> for IntervalVector {
    type Output = Interval;

    fn index(&self, idx: usize) -> &Interval {
        &self.items[idx]
    }
}

impl<'a> IntoIterator for &'a IntervalVector {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_inverted_bounds() {
        assert!(matches!(
            Interval::new(2.0, 1.0),
            Err(IfrError::InvalidInterval { .. })
        ));
        assert!(Interval::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn multiplication_takes_worst_case_products() {
        let a = Interval::new(-1.0, 2.0).unwrap();
        let b = Interval::new(3.0, 4.0).unwrap();
        let p = a * b;
        assert_eq!(p.lo(), -4.0);
        assert_eq!(p.hi(), 8.0);
    }

    #[test]
    fn negative_scalar_swaps_bounds() {
        let a = Interval::new(1.0, 2.0).unwrap() * -2.0;
        assert_eq!((a.lo(), a.hi()), (-4.0, -2.0));
    }

    #[test]
    fn addition_and_hull() {
        let a = Interval::new(0.0, 1.0).unwrap();
        let b = Interval::new(2.0, 5.0).unwrap();
        assert_eq!(a + b, Interval::new(2.0, 6.0).unwrap());
        assert_eq!(a.hull(&b), Interval::new(0.0, 5.0).unwrap());
    }

    #[test]
    fn relative_interval_contains_centre() {
        let a = Interval::from_relative(-3.0, 0.1);
        assert!(a.lo() <= a.hi());
        assert!(a.contains(-3.0));
        assert!((a.width() - 0.6).abs() < 1e-12);
        assert!((a.midpoint() + 3.0).abs() < 1e-12);
    }

    #[test]
    fn vector_exposes_bound_vectors() {
        let v = IntervalVector::from_bounds(&[0.0, 1.0], &[0.5, 1.5]).unwrap();
        assert_eq!(v.lo(), vec![0.0, 1.0]);
        assert_eq!(v.hi(), vec![0.5, 1.5]);
        assert_eq!(v[1].width(), 0.5);
        assert!(IntervalVector::from_bounds(&[0.0], &[1.0, 2.0]).is_err());
        assert!(IntervalVector::from_bounds(&[2.0], &[1.0]).is_err());
    }
}
