// Copyright 2026 The tubular developers

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! One atomic time-cell of a tube.
//!
//! A slice pairs a bounded, non-degenerate time `domain` with an `envelope`
//! box bounding the signal over the whole domain, and two gates bounding it
//! exactly at `domain.lb()` (input) and `domain.ub()` (output). Neighbor
//! links are positional: the owning [TubeVector](crate::TubeVector) stores
//! its slices in temporal order, so `prev`/`next` are index arithmetic and
//! the back-reference of the original design is ownership itself.
//!
//! Chaining alone never equalizes the output gate of a slice with the input
//! gate of its successor; the tube-level mutators that need this equality
//! (gate writes, sampling, the assignment operators) set both sides
//! explicitly.

use crate::errors::{Result, TubeError};
use crate::interval::Interval;
use crate::interval_vector::IntervalVector;
use crate::ops::Hull;
use crate::trajectory::Trajectory;
use gcollections::ops::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct Slice
{
  pub(crate) domain: Interval,
  pub(crate) envelope: IntervalVector,
  pub(crate) input_gate: IntervalVector,
  pub(crate) output_gate: IntervalVector
}

impl Slice
{
  /// New slice over `domain`, with unbounded envelope and gates.
  pub fn new(domain: Interval, dim: usize) -> Result<Slice> {
    if dim == 0 {
      return Err(TubeError::InvalidDimension(dim));
    }
    if domain.is_empty() || domain.is_degenerated() || domain.is_unbounded() {
      return Err(TubeError::InvalidDomain(domain));
    }
    Ok(Slice {
      domain,
      envelope: IntervalVector::whole(dim),
      input_gate: IntervalVector::whole(dim),
      output_gate: IntervalVector::whole(dim)
    })
  }

  pub fn domain(&self) -> Interval {
    self.domain
  }

  pub fn dim(&self) -> usize {
    self.envelope.dim()
  }

  /// The envelope box, bounding the signal over the whole slice domain.
  pub fn codomain(&self) -> &IntervalVector {
    &self.envelope
  }

  pub fn input_gate(&self) -> &IntervalVector {
    &self.input_gate
  }

  pub fn output_gate(&self) -> &IntervalVector {
    &self.output_gate
  }

  fn check_dim(&self, y: &IntervalVector) -> Result<()> {
    if y.dim() != self.dim() {
      return Err(TubeError::Dimension { expected: self.dim(), actual: y.dim() });
    }
    Ok(())
  }

  /// Raw envelope overwrite, used by contractors and deserializers.
  pub fn set_envelope(&mut self, y: &IntervalVector) -> Result<()> {
    self.check_dim(y)?;
    self.envelope = y.clone();
    Ok(())
  }

  pub fn set_input_gate(&mut self, y: &IntervalVector) -> Result<()> {
    self.check_dim(y)?;
    self.input_gate = y.clone();
    Ok(())
  }

  pub fn set_output_gate(&mut self, y: &IntervalVector) -> Result<()> {
    self.check_dim(y)?;
    self.output_gate = y.clone();
    Ok(())
  }

  /// Overwrites the envelope and both gates with `y`.
  pub fn set(&mut self, y: &IntervalVector) -> Result<()> {
    self.check_dim(y)?;
    self.envelope = y.clone();
    self.input_gate = y.clone();
    self.output_gate = y.clone();
    Ok(())
  }

  /// Value bound at one time of the slice: the matching gate on a boundary,
  /// the envelope anywhere strictly inside.
  pub fn value_at(&self, t: f64) -> IntervalVector {
    debug_assert!(self.domain.contains(&t), "time outside the slice domain");
    if t == self.domain.lb() {
      self.input_gate.clone()
    }
    else if t == self.domain.ub() {
      self.output_gate.clone()
    }
    else {
      self.envelope.clone()
    }
  }

  /// Enclosures of the lower and upper bound functions of the tube over `t`,
  /// kept separate instead of being mixed into one box.
  pub fn eval(&self, t: &Interval) -> (IntervalVector, IntervalVector) {
    let dim = self.dim();
    let mut lo = IntervalVector::empty(dim);
    let mut hi = IntervalVector::empty(dim);
    let inter = t.intersection(&self.domain);
    if inter.is_empty() {
      return (lo, hi);
    }

    let mut absorb = |y: &IntervalVector, lo: &mut IntervalVector, hi: &mut IntervalVector| {
      for k in 0..dim {
        lo[k] = lo[k].hull(&Interval::point(y[k].lb()));
        hi[k] = hi[k].hull(&Interval::point(y[k].ub()));
      }
    };

    if inter.contains(&self.domain.lb()) {
      absorb(&self.input_gate, &mut lo, &mut hi);
    }
    if inter.contains(&self.domain.ub()) {
      absorb(&self.output_gate, &mut lo, &mut hi);
    }
    let interior = !inter.is_degenerated()
      || (inter.lb() != self.domain.lb() && inter.lb() != self.domain.ub());
    if interior {
      absorb(&self.envelope, &mut lo, &mut hi);
    }

    (lo, hi)
  }

  /// Times of `search ∩ domain` at which the signal could equal `y`.
  /// The envelope is constant over the slice, so a non-empty match cannot be
  /// narrowed below the whole intersection; gates can still witness a match
  /// at a boundary the envelope misses.
  pub fn invert(&self, y: &IntervalVector, search: &Interval) -> Interval {
    let inter = search.intersection(&self.domain);
    if inter.is_empty() {
      return Interval::EMPTY;
    }
    if !self.envelope.intersection(y).is_empty() {
      return inter;
    }
    let mut hull = Interval::EMPTY;
    if inter.contains(&self.domain.lb()) && !self.input_gate.intersection(y).is_empty() {
      hull = hull.hull(&Interval::point(self.domain.lb()));
    }
    if inter.contains(&self.domain.ub()) && !self.output_gate.intersection(y).is_empty() {
      hull = hull.hull(&Interval::point(self.domain.ub()));
    }
    hull
  }

  /// A slice makes the whole tube infeasible as soon as its envelope is
  /// empty.
  pub fn is_empty(&self) -> bool {
    self.envelope.is_empty()
  }

  /// Both slices must cover the same domain.
  pub fn is_subset(&self, x: &Slice) -> bool {
    assert!(self.domain == x.domain, "subset tests require slices over the same domain");
    self.envelope.is_subset(&x.envelope)
      && self.input_gate.is_subset(&x.input_gate)
      && self.output_gate.is_subset(&x.output_gate)
  }

  pub fn is_strict_subset(&self, x: &Slice) -> bool {
    self.is_subset(x) && self != x
  }

  /// True iff the exact trajectory is guaranteed inside the slice: its hull
  /// over the domain within the envelope and its boundary values within the
  /// gates.
  pub fn encloses(&self, x: &Trajectory) -> Result<bool> {
    let hull = x.hull_over(&self.domain)?;
    Ok(hull.is_subset(&self.envelope)
      && self.input_gate.contains_point(&x.value_at(self.domain.lb())?)
      && self.output_gate.contains_point(&x.value_at(self.domain.ub())?))
  }

  /// Time width times envelope volume.
  pub fn volume(&self) -> f64 {
    if self.is_empty() { 0. }
    else { self.domain.diam() * self.envelope.volume() }
  }
}

impl fmt::Display for Slice
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "Slice {} ↦ {}", self.domain, self.envelope)
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  fn make_slice(lb: f64, ub: f64, env: (f64, f64)) -> Slice {
    let mut s = Slice::new(Interval::new(lb, ub), 1).unwrap();
    s.set(&IntervalVector::new(1, Interval::new(env.0, env.1))).unwrap();
    s
  }

  #[test]
  fn construction_test() {
    assert!(Slice::new(Interval::new(0., 1.), 0).is_err());
    assert!(Slice::new(Interval::point(1.), 1).is_err());
    assert!(Slice::new(Interval::EMPTY, 1).is_err());
    assert!(Slice::new(Interval::ALL_REALS, 1).is_err());
    assert!(Slice::new(Interval::new(f64::NEG_INFINITY, 0.), 1).is_err());
    let s = Slice::new(Interval::new(0., 1.), 3).unwrap();
    assert!(s.dim() == 3);
    assert!(s.codomain() == &IntervalVector::whole(3));
  }

  #[test]
  fn value_at_test() {
    let mut s = make_slice(0., 1., (0., 10.));
    s.set_input_gate(&IntervalVector::new(1, Interval::new(1., 2.))).unwrap();
    s.set_output_gate(&IntervalVector::new(1, Interval::new(3., 4.))).unwrap();
    assert!(s.value_at(0.)[0] == Interval::new(1., 2.));
    assert!(s.value_at(1.)[0] == Interval::new(3., 4.));
    assert!(s.value_at(0.5)[0] == Interval::new(0., 10.));
  }

  #[test]
  fn eval_test() {
    let mut s = make_slice(0., 1., (0., 10.));
    s.set_input_gate(&IntervalVector::new(1, Interval::new(4., 5.))).unwrap();

    // degenerate query on the input boundary: gates only
    let (lo, hi) = s.eval(&Interval::point(0.));
    assert!(lo[0] == Interval::point(4.) && hi[0] == Interval::point(5.));

    // query spanning the interior: envelope and gates
    let (lo, hi) = s.eval(&Interval::new(0., 0.5));
    assert!(lo[0] == Interval::new(0., 4.));
    assert!(hi[0] == Interval::new(5., 10.));
  }

  #[test]
  fn invert_test() {
    let s = make_slice(0., 1., (0., 10.));
    let y = IntervalVector::new(1, Interval::new(5., 6.));
    assert!(s.invert(&y, &Interval::new(0., 1.)) == Interval::new(0., 1.));
    assert!(s.invert(&y, &Interval::new(0.25, 0.5)) == Interval::new(0.25, 0.5));
    assert!(s.invert(&y, &Interval::new(2., 3.)).is_empty());
    let far = IntervalVector::new(1, Interval::new(20., 30.));
    assert!(s.invert(&far, &Interval::new(0., 1.)).is_empty());
  }

  #[test]
  fn invert_gate_witness_test() {
    let mut s = make_slice(0., 1., (0., 1.));
    let y = IntervalVector::new(1, Interval::new(5., 6.));
    s.set_output_gate(&y).unwrap();
    assert!(s.invert(&y, &Interval::new(0., 1.)) == Interval::point(1.));
  }

  #[test]
  fn subset_test() {
    let small = make_slice(0., 1., (2., 3.));
    let big = make_slice(0., 1., (0., 10.));
    assert!(small.is_subset(&big));
    assert!(small.is_strict_subset(&big));
    assert!(!big.is_subset(&small));
    assert!(big.is_subset(&big) && !big.is_strict_subset(&big));
  }

  #[test]
  fn encloses_test() {
    let s = make_slice(0., 2., (0., 10.));
    let mut inside = Trajectory::new(1);
    inside.set(0., vec![1.]);
    inside.set(2., vec![3.]);
    assert!(s.encloses(&inside).unwrap());

    let mut outside = Trajectory::new(1);
    outside.set(0., vec![1.]);
    outside.set(2., vec![11.]);
    assert!(!s.encloses(&outside).unwrap());
  }

  #[test]
  fn volume_test() {
    assert!(make_slice(0., 2., (1., 4.)).volume() == 6.);
    let mut s = make_slice(0., 2., (1., 4.));
    s.set(&IntervalVector::empty(1)).unwrap();
    assert!(s.is_empty());
    assert!(s.volume() == 0.);
  }
}
