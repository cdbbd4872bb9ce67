// Copyright 2026 The tubular developers

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Closed and bounded interval over `f64`, with outward-rounded arithmetic.
//!
//! The empty set is a value-level sentinel, not a wrapper type: any interval
//! with `lb > ub` is normalized at construction to the canonical
//! `[oo, -oo]`, which keeps union and intersection closed over one type.
//! Arithmetic (`+ - * /`) widens each computed bound by one float step so
//! results never underestimate the true real bound.

use crate::ops::{next_float, prev_float, Hull, Whole};
use gcollections::kind::*;
use gcollections::ops::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

#[derive(PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Interval
{
  lb: f64,
  ub: f64
}

impl Interval
{
  pub const EMPTY: Interval = Interval { lb: f64::INFINITY, ub: f64::NEG_INFINITY };
  pub const ALL_REALS: Interval = Interval { lb: f64::NEG_INFINITY, ub: f64::INFINITY };

  /// Builds `[lb, ub]`; any pair that does not satisfy `lb <= ub` (including
  /// NaN bounds) collapses to the canonical empty interval.
  pub fn new(lb: f64, ub: f64) -> Interval {
    if lb <= ub {
      Interval { lb, ub }
    }
    else {
      Interval::EMPTY
    }
  }

  pub fn point(x: f64) -> Interval {
    Interval::new(x, x)
  }

  pub fn lb(self) -> f64 {
    self.lb
  }

  pub fn ub(self) -> f64 {
    self.ub
  }

  pub fn is_degenerated(self) -> bool {
    self.lb == self.ub
  }

  pub fn is_unbounded(self) -> bool {
    !self.is_empty() && (self.lb == f64::NEG_INFINITY || self.ub == f64::INFINITY)
  }

  /// Width of the interval, `0` when empty, possibly infinite.
  pub fn diam(self) -> f64 {
    if self.is_empty() { 0. }
    else { self.ub - self.lb }
  }

  pub fn mid(self) -> f64 {
    self.lb + self.diam() / 2.
  }

  /// Symmetric enlargement by `rad` on both bounds.
  pub fn inflate(self, rad: f64) -> Interval {
    self + Interval::new(-rad, rad)
  }

  /// Splits at `lb + ratio * diam`; both halves share the pivot so their
  /// hull reconstructs the original. `None` when there is nothing to split.
  pub fn bisect(self, ratio: f64) -> Option<(Interval, Interval)> {
    assert!(ratio > 0. && ratio < 1., "bisection ratio must lie in ]0,1[");
    if self.is_empty() || self.is_degenerated() || !self.diam().is_finite() {
      return None;
    }
    let pivot = self.lb + ratio * self.diam();
    Some((Interval::new(self.lb, pivot), Interval::new(pivot, self.ub)))
  }
}

impl Collection for Interval
{
  type Item = f64;
}

impl Empty for Interval
{
  fn empty() -> Interval {
    Interval::EMPTY
  }
}

impl IsEmpty for Interval
{
  fn is_empty(&self) -> bool {
    self.lb > self.ub
  }
}

impl Contains for Interval
{
  fn contains(&self, x: &f64) -> bool {
    *x >= self.lb && *x <= self.ub
  }
}

impl Bounded for Interval
{
  fn lower(&self) -> f64 {
    self.lb
  }

  fn upper(&self) -> f64 {
    self.ub
  }
}

impl Subset for Interval
{
  fn is_subset(&self, i: &Interval) -> bool {
    if self.is_empty() { true }
    else {
      self.lb >= i.lb && self.ub <= i.ub
    }
  }
}

impl ProperSubset for Interval
{
  fn is_proper_subset(&self, i: &Interval) -> bool {
    self.is_subset(i) && self != i
  }
}

impl Intersection for Interval
{
  type Output = Interval;

  fn intersection(&self, i: &Interval) -> Interval {
    Interval::new(
      self.lb.max(i.lb),
      self.ub.min(i.ub)
    )
  }
}

impl Disjoint for Interval
{
  fn is_disjoint(&self, i: &Interval) -> bool {
    self.is_empty() || i.is_empty() || self.lb > i.ub || i.lb > self.ub
  }
}

impl Overlap for Interval
{
  fn overlap(&self, i: &Interval) -> bool {
    !self.is_disjoint(i)
  }
}

impl Hull for Interval
{
  type Output = Interval;

  fn hull(&self, i: &Interval) -> Interval {
    if self.is_empty() { *i }
    else if i.is_empty() { *self }
    else {
      Interval::new(
        self.lb.min(i.lb),
        self.ub.max(i.ub)
      )
    }
  }
}

impl Whole for Interval
{
  fn whole() -> Interval {
    Interval::ALL_REALS
  }
}

impl Neg for Interval
{
  type Output = Interval;

  fn neg(self) -> Interval {
    if self.is_empty() { Interval::EMPTY }
    else {
      Interval { lb: -self.ub, ub: -self.lb }
    }
  }
}

impl Add for Interval
{
  type Output = Interval;

  fn add(self, i: Interval) -> Interval {
    if self.is_empty() || i.is_empty() { Interval::EMPTY }
    else {
      Interval::new(
        prev_float(self.lb + i.lb),
        next_float(self.ub + i.ub)
      )
    }
  }
}

impl Sub for Interval
{
  type Output = Interval;

  fn sub(self, i: Interval) -> Interval {
    self + (-i)
  }
}

// `0 * oo` is `0` here: the zero factor means the operand is exactly zero.
fn mul_bound(x: f64, y: f64) -> f64 {
  if x == 0. || y == 0. { 0. }
  else { x * y }
}

impl Mul for Interval
{
  type Output = Interval;

  fn mul(self, i: Interval) -> Interval {
    if self.is_empty() || i.is_empty() { Interval::EMPTY }
    else {
      let c = [
        mul_bound(self.lb, i.lb), mul_bound(self.lb, i.ub),
        mul_bound(self.ub, i.lb), mul_bound(self.ub, i.ub)
      ];
      let lb = c.iter().cloned().fold(f64::INFINITY, f64::min);
      let ub = c.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
      Interval::new(prev_float(lb), next_float(ub))
    }
  }
}

impl Div for Interval
{
  type Output = Interval;

  fn div(self, i: Interval) -> Interval {
    if self.is_empty() || i.is_empty() { Interval::EMPTY }
    else if i.lb == 0. && i.ub == 0. { Interval::EMPTY }
    else if i.contains(&0.) { Interval::ALL_REALS } // divisor straddles zero
    else {
      let c = [self.lb / i.lb, self.lb / i.ub, self.ub / i.lb, self.ub / i.ub];
      if c.iter().any(|x| x.is_nan()) {
        return Interval::ALL_REALS;
      }
      let lb = c.iter().cloned().fold(f64::INFINITY, f64::min);
      let ub = c.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
      Interval::new(prev_float(lb), next_float(ub))
    }
  }
}

impl fmt::Display for Interval
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    if self.is_empty() {
      write!(f, "[empty]")
    }
    else {
      write!(f, "[{}, {}]", self.lb, self.ub)
    }
  }
}

#[allow(non_upper_case_globals)]
#[cfg(test)]
mod tests
{
  use super::*;
  use serde_test::{assert_tokens, Token};

  const empty: Interval = Interval::EMPTY;
  const zero: Interval = Interval { lb: 0., ub: 0. };
  const i0_10: Interval = Interval { lb: 0., ub: 10. };
  const i0_5: Interval = Interval { lb: 0., ub: 5. };
  const i5_10: Interval = Interval { lb: 5., ub: 10. };
  const i20_30: Interval = Interval { lb: 20., ub: 30. };
  const im2_3: Interval = Interval { lb: -2., ub: 3. };

  #[test]
  fn constructor_normalizes_test() {
    assert!(Interval::new(10., -10.) == empty);
    assert!(Interval::new(f64::NAN, 0.) == empty);
    assert!(Interval::new(0., 10.) == i0_10);
    assert!(Interval::point(0.) == zero);
    assert!(empty.is_empty());
    assert!(!i0_10.is_empty());
  }

  #[test]
  fn membership_test() {
    let cases = vec![
      (i0_10, 0., true),
      (i0_10, 10., true),
      (i0_10, 5., true),
      (i0_10, -0.1, false),
      (i0_10, 10.1, false),
      (empty, 0., false)
    ];

    for (id, (i, x, expected)) in cases.into_iter().enumerate() {
      assert!(i.contains(&x) == expected, "test #{} of membership", id);
    }
  }

  #[test]
  fn hull_intersection_test() {
    let sym_cases = vec![
      (1, i0_5, i5_10, i0_10, Interval::point(5.)),
      (2, i0_10, i20_30, Interval::new(0., 30.), empty),
      (3, i0_10, empty, i0_10, empty),
      (4, empty, empty, empty, empty),
      (5, i0_10, i0_5, i0_10, i0_5)
    ];

    for (id, a, b, expected_hull, expected_inter) in sym_cases {
      assert!(a.hull(&b) == expected_hull, "test #{} of hull", id);
      assert!(b.hull(&a) == expected_hull, "test #{} of hull (sym)", id);
      assert!(a.intersection(&b) == expected_inter, "test #{} of intersection", id);
      assert!(b.intersection(&a) == expected_inter, "test #{} of intersection (sym)", id);
    }
  }

  #[test]
  fn subset_test() {
    assert!(i0_5.is_subset(&i0_10));
    assert!(empty.is_subset(&i0_10));
    assert!(!i0_10.is_subset(&i0_5));
    assert!(i0_10.is_subset(&i0_10));
    assert!(!i0_10.is_proper_subset(&i0_10));
    assert!(i0_5.is_proper_subset(&i0_10));
  }

  // Outward rounding: the result must contain the exact real result and
  // stay within one float step of it.
  fn assert_outer(i: Interval, lb: f64, ub: f64) {
    assert!(i.lb <= lb && i.lb >= prev_float(lb), "{} is not an outer bound of [{}, {}]", i, lb, ub);
    assert!(i.ub >= ub && i.ub <= next_float(ub), "{} is not an outer bound of [{}, {}]", i, lb, ub);
  }

  #[test]
  fn arithmetic_test() {
    assert_outer(i0_5 + i5_10, 5., 15.);
    assert_outer(i0_5 - i5_10, -10., 0.);
    assert_outer(i0_5 * im2_3, -10., 15.);
    assert_outer(im2_3 * im2_3, -6., 9.);
    assert_outer(i5_10 / Interval::new(2., 4.), 1.25, 5.);
    assert!((empty + i0_10).is_empty());
    assert!((i0_10 * empty).is_empty());
    assert!(-i0_5 == Interval::new(-5., 0.));
  }

  #[test]
  fn division_by_zero_test() {
    assert!(i0_5 / zero == empty);
    assert!(i0_5 / im2_3 == Interval::ALL_REALS);
    assert!((i0_5 / empty).is_empty());
  }

  #[test]
  fn inflate_test() {
    let i = zero.inflate(1.);
    assert!(i.contains(&-1.) && i.contains(&1.));
    assert!(i.diam() >= 2.);
  }

  #[test]
  fn bisect_test() {
    let (a, b) = i0_10.bisect(0.5).unwrap();
    assert!(a == i0_5 && b == i5_10);
    assert!(a.hull(&b) == i0_10);
    assert!(zero.bisect(0.5).is_none());
    assert!(empty.bisect(0.5).is_none());
  }

  #[test]
  fn serde_test() {
    assert_tokens(&Interval::new(1., 2.), &[
      Token::Struct { name: "Interval", len: 2 },
      Token::Str("lb"), Token::F64(1.),
      Token::Str("ub"), Token::F64(2.),
      Token::StructEnd
    ]);
  }
}
