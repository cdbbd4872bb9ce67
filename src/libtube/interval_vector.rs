// Copyright 2026 The tubular developers

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Fixed-dimension box of intervals.
//!
//! The dimension is immutable after creation. A box is empty as soon as one
//! of its components is empty; intersection normalizes such a result so that
//! all components are empty at once.

use crate::interval::Interval;
use crate::ops::Hull;
use gcollections::kind::*;
use gcollections::ops::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, BitAnd, BitAndAssign, BitOr, BitOrAssign, Index, IndexMut, Mul, Sub};

#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct IntervalVector
{
  vec: Vec<Interval>
}

impl IntervalVector
{
  /// `dim` copies of `i`; the dimension must be non-zero.
  pub fn new(dim: usize, i: Interval) -> IntervalVector {
    assert!(dim > 0, "an interval vector must have at least one dimension");
    IntervalVector { vec: vec![i; dim] }
  }

  pub fn empty(dim: usize) -> IntervalVector {
    IntervalVector::new(dim, Interval::EMPTY)
  }

  pub fn whole(dim: usize) -> IntervalVector {
    IntervalVector::new(dim, Interval::ALL_REALS)
  }

  /// Degenerate box around an exact point.
  pub fn from_point(p: &[f64]) -> IntervalVector {
    assert!(!p.is_empty(), "an interval vector must have at least one dimension");
    IntervalVector { vec: p.iter().map(|x| Interval::point(*x)).collect() }
  }

  pub fn dim(&self) -> usize {
    self.vec.len()
  }

  pub fn iter(&self) -> std::slice::Iter<Interval> {
    self.vec.iter()
  }

  pub fn set_empty(&mut self) {
    for i in self.vec.iter_mut() {
      *i = Interval::EMPTY;
    }
  }

  pub fn max_diam(&self) -> f64 {
    self.vec.iter().fold(0., |a, i| a.max(i.diam()))
  }

  /// Product of the diameters; `0` when empty, infinite as soon as one
  /// dimension is unbounded.
  pub fn volume(&self) -> f64 {
    if self.is_empty() {
      return 0.;
    }
    if self.vec.iter().any(|i| !i.diam().is_finite()) {
      return f64::INFINITY;
    }
    self.vec.iter().fold(1., |a, i| a * i.diam())
  }

  pub fn contains_point(&self, p: &[f64]) -> bool {
    assert!(p.len() == self.dim(), "point dimension must match the box dimension");
    self.vec.iter().zip(p).all(|(i, x)| i.contains(x))
  }

  /// Largest-first bisection at `ratio` of the widest dimension. `None` when
  /// every dimension is degenerate, empty or unbounded.
  pub fn bisect(&self, ratio: f64) -> Option<(IntervalVector, IntervalVector)> {
    if self.is_empty() {
      return None;
    }
    let widest = (0..self.dim())
      .filter(|k| self.vec[*k].diam().is_finite())
      .max_by(|a, b| self.vec[*a].diam().total_cmp(&self.vec[*b].diam()))?;
    let (lo, hi) = self.vec[widest].bisect(ratio)?;
    let mut first = self.clone();
    let mut second = self.clone();
    first.vec[widest] = lo;
    second.vec[widest] = hi;
    Some((first, second))
  }

  /// Componentwise combination; both operands must share the dimension.
  pub(crate) fn zip_with<F>(&self, x: &IntervalVector, f: F) -> IntervalVector
   where F: Fn(Interval, Interval) -> Interval
  {
    assert!(self.dim() == x.dim(), "interval vectors must share their dimension");
    IntervalVector {
      vec: self.vec.iter().zip(x.vec.iter()).map(|(a, b)| f(*a, *b)).collect()
    }
  }
}

impl From<Vec<Interval>> for IntervalVector
{
  fn from(vec: Vec<Interval>) -> IntervalVector {
    assert!(!vec.is_empty(), "an interval vector must have at least one dimension");
    IntervalVector { vec }
  }
}

impl Index<usize> for IntervalVector
{
  type Output = Interval;

  fn index(&self, k: usize) -> &Interval {
    &self.vec[k]
  }
}

impl IndexMut<usize> for IntervalVector
{
  fn index_mut(&mut self, k: usize) -> &mut Interval {
    &mut self.vec[k]
  }
}

impl Collection for IntervalVector
{
  type Item = Vec<f64>;
}

impl IsEmpty for IntervalVector
{
  fn is_empty(&self) -> bool {
    self.vec.iter().any(|i| i.is_empty())
  }
}

impl Contains for IntervalVector
{
  fn contains(&self, p: &Vec<f64>) -> bool {
    self.contains_point(p)
  }
}

impl Subset for IntervalVector
{
  fn is_subset(&self, x: &IntervalVector) -> bool {
    assert!(self.dim() == x.dim(), "interval vectors must share their dimension");
    if self.is_empty() { true }
    else {
      self.vec.iter().zip(x.vec.iter()).all(|(a, b)| a.is_subset(b))
    }
  }
}

impl ProperSubset for IntervalVector
{
  fn is_proper_subset(&self, x: &IntervalVector) -> bool {
    self.is_subset(x) && self != x
  }
}

impl Intersection for IntervalVector
{
  type Output = IntervalVector;

  fn intersection(&self, x: &IntervalVector) -> IntervalVector {
    let mut r = self.zip_with(x, |a, b| a.intersection(&b));
    if r.is_empty() {
      r.set_empty();
    }
    r
  }
}

impl Hull for IntervalVector
{
  type Output = IntervalVector;

  fn hull(&self, x: &IntervalVector) -> IntervalVector {
    self.zip_with(x, |a, b| a.hull(&b))
  }
}

impl Add for &IntervalVector
{
  type Output = IntervalVector;

  fn add(self, x: &IntervalVector) -> IntervalVector {
    self.zip_with(x, |a, b| a + b)
  }
}

impl Sub for &IntervalVector
{
  type Output = IntervalVector;

  fn sub(self, x: &IntervalVector) -> IntervalVector {
    self.zip_with(x, |a, b| a - b)
  }
}

// Scalar broadcast, `dt * v` on every component of `v`.
impl Mul<&IntervalVector> for Interval
{
  type Output = IntervalVector;

  fn mul(self, x: &IntervalVector) -> IntervalVector {
    IntervalVector {
      vec: x.vec.iter().map(|b| self * *b).collect()
    }
  }
}

impl BitAnd for &IntervalVector
{
  type Output = IntervalVector;

  fn bitand(self, x: &IntervalVector) -> IntervalVector {
    self.intersection(x)
  }
}

impl BitOr for &IntervalVector
{
  type Output = IntervalVector;

  fn bitor(self, x: &IntervalVector) -> IntervalVector {
    self.hull(x)
  }
}

impl BitAndAssign<&IntervalVector> for IntervalVector
{
  fn bitand_assign(&mut self, x: &IntervalVector) {
    *self = self.intersection(x);
  }
}

impl BitOrAssign<&IntervalVector> for IntervalVector
{
  fn bitor_assign(&mut self, x: &IntervalVector) {
    *self = self.hull(x);
  }
}

impl fmt::Display for IntervalVector
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "(")?;
    for (k, i) in self.vec.iter().enumerate() {
      if k > 0 {
        write!(f, ", ")?;
      }
      write!(f, "{}", i)?;
    }
    write!(f, ")")
  }
}
