// Copyright 2026 The tubular developers

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Compound assignment operators on tubes.
//!
//! Every operator walks the chain once: it combines each slice envelope and
//! input gate with the matching value of the right-hand side, mirroring each
//! interior gate onto the previous slice, and finishes with the single final
//! output gate. What varies between right-hand-side kinds is only how that
//! matching value is fetched, captured by the [`OpRhs`] strategy: a constant
//! interval broadcasts, a trajectory is hulled over each slice domain and
//! point-evaluated at gates, and a tube is read slice-for-slice when the
//! slicings agree or through by-time queries when they do not.
//!
//! Operand mismatches (dimension, domain) are contract violations and panic.

use crate::interval::Interval;
use crate::interval_vector::IntervalVector;
use crate::ops::Hull;
use crate::slice::Slice;
use crate::trajectory::Trajectory;
use crate::tube_vector::TubeVector;
use gcollections::ops::*;
use std::ops::{AddAssign, BitAndAssign, BitOrAssign, DivAssign, MulAssign, SubAssign};

/// How an operator right-hand side is valued against one slice of the
/// left-hand tube.
trait OpRhs
{
  fn envelope(&self, slice_id: usize, s: &Slice) -> IntervalVector;
  fn gate(&self, slice_id: usize, t: f64, dim: usize) -> IntervalVector;
}

impl OpRhs for Interval
{
  fn envelope(&self, _: usize, s: &Slice) -> IntervalVector {
    IntervalVector::new(s.dim(), *self)
  }

  fn gate(&self, _: usize, _: f64, dim: usize) -> IntervalVector {
    IntervalVector::new(dim, *self)
  }
}

impl OpRhs for Trajectory
{
  fn envelope(&self, _: usize, s: &Slice) -> IntervalVector {
    self.hull_over(&s.domain()).expect("trajectory not defined over the tube domain")
  }

  fn gate(&self, _: usize, t: f64, _: usize) -> IntervalVector {
    self.eval_point(t).expect("trajectory not defined over the tube domain")
  }
}

/// Right-hand tube sharing the exact slicing of the left-hand one: values
/// are read slice-for-slice, gates included.
struct AlignedTube<'a>(&'a TubeVector);

impl OpRhs for AlignedTube<'_>
{
  fn envelope(&self, slice_id: usize, _: &Slice) -> IntervalVector {
    self.0.slices[slice_id].codomain().clone()
  }

  fn gate(&self, slice_id: usize, t: f64, _: usize) -> IntervalVector {
    let s = &self.0.slices[slice_id];
    if t == s.domain().lb() {
      s.input_gate().clone()
    }
    else {
      s.output_gate().clone()
    }
  }
}

/// Right-hand tube with a foreign slicing: values are fetched through
/// by-time queries, which stay conservative since a left-hand boundary may
/// fall strictly inside a right-hand slice.
struct ByTimeTube<'a>(&'a TubeVector);

impl OpRhs for ByTimeTube<'_>
{
  fn envelope(&self, _: usize, s: &Slice) -> IntervalVector {
    self.0.value_over(&s.domain()).expect("tubes must share their time domain")
  }

  fn gate(&self, _: usize, t: f64, _: usize) -> IntervalVector {
    self.0.value_at(t).expect("tubes must share their time domain")
  }
}

/// One sweep over the chain: envelope and input gate of every slice, then
/// the final output gate once. Interior gates are written on both adjacent
/// slices.
fn apply_assign<R, F>(tube: &mut TubeVector, rhs: &R, op: F) where
  R: OpRhs,
  F: Fn(&IntervalVector, &IntervalVector) -> IntervalVector
{
  let n = tube.n_slices();
  let dim = tube.dim();
  for i in 0..n {
    let y = rhs.envelope(i, &tube.slices[i]);
    tube.slices[i].envelope = op(&tube.slices[i].envelope, &y);

    let t = tube.slices[i].domain().lb();
    let gate = op(&tube.slices[i].input_gate, &rhs.gate(i, t, dim));
    tube.slices[i].input_gate = gate.clone();
    if i > 0 {
      tube.slices[i - 1].output_gate = gate;
    }
  }

  let t = tube.slices[n - 1].domain().ub();
  let gate = op(&tube.slices[n - 1].output_gate, &rhs.gate(n - 1, t, dim));
  tube.slices[n - 1].output_gate = gate;
}

macro_rules! tube_assign_ops
{
  ( $( $trait_:ident, $method:ident, $op:expr );+ ) => {$(
    impl $trait_<Interval> for TubeVector
    {
      fn $method(&mut self, x: Interval) {
        apply_assign(self, &x, $op);
      }
    }

    impl $trait_<&Trajectory> for TubeVector
    {
      fn $method(&mut self, x: &Trajectory) {
        assert!(x.dim() == self.dim(), "operand dimensions must agree");
        assert!(self.domain().is_subset(&x.domain()),
          "trajectory not defined over the tube domain");
        apply_assign(self, x, $op);
      }
    }

    impl $trait_<&TubeVector> for TubeVector
    {
      fn $method(&mut self, x: &TubeVector) {
        assert!(x.dim() == self.dim(), "operand dimensions must agree");
        assert!(x.domain() == self.domain(), "tubes must share their time domain");
        if TubeVector::same_slicing(self, x) {
          apply_assign(self, &AlignedTube(x), $op);
        }
        else {
          apply_assign(self, &ByTimeTube(x), $op);
        }
      }
    }
  )+};
}

tube_assign_ops! {
  AddAssign, add_assign, |a: &IntervalVector, b: &IntervalVector| a.zip_with(b, |p, q| p + q);
  SubAssign, sub_assign, |a: &IntervalVector, b: &IntervalVector| a.zip_with(b, |p, q| p - q);
  MulAssign, mul_assign, |a: &IntervalVector, b: &IntervalVector| a.zip_with(b, |p, q| p * q);
  DivAssign, div_assign, |a: &IntervalVector, b: &IntervalVector| a.zip_with(b, |p, q| p / q);
  BitAndAssign, bitand_assign, |a: &IntervalVector, b: &IntervalVector| a.intersection(b);
  BitOrAssign, bitor_assign, |a: &IntervalVector, b: &IntervalVector| a.hull(b)
}

#[cfg(test)]
mod tests
{
  use super::*;

  fn box1(lb: f64, ub: f64) -> IntervalVector {
    IntervalVector::new(1, Interval::new(lb, ub))
  }

  fn tube(lb: f64, ub: f64) -> TubeVector {
    let mut t = TubeVector::with_timestep(Interval::new(0., 10.), 2., 1).unwrap();
    t.set(&box1(lb, ub)).unwrap();
    t
  }

  #[test]
  fn interval_operand_test() {
    // arithmetic bounds are rounded outwards, hence enclosure assertions
    let mut x = tube(0., 1.);
    x += Interval::new(10., 10.);
    assert!(box1(10., 11.).is_subset(&x.codomain()));
    assert!(x.codomain().is_subset(&box1(9.9, 11.1)));
    for s in 0..x.n_slices() {
      assert!(box1(10., 11.).is_subset(x.slice(s).unwrap().input_gate()));
    }

    x -= Interval::new(10., 10.);
    assert!(box1(0., 1.).is_subset(&x.codomain()));
    assert!(x.codomain().is_subset(&box1(-0.1, 1.1)));

    let mut x = tube(2., 4.);
    x *= Interval::new(0.5, 1.);
    assert!(box1(1., 4.).is_subset(&x.codomain()));
    assert!(x.codomain().is_subset(&box1(0.9, 4.1)));

    let mut x = tube(2., 4.);
    x /= Interval::new(2., 2.);
    assert!(box1(1., 2.).is_subset(&x.codomain()));

    let mut x = tube(0., 10.);
    x &= Interval::new(5., 20.);
    assert!(x.codomain() == box1(5., 10.));

    let mut x = tube(0., 1.);
    x |= Interval::new(5., 6.);
    assert!(x.codomain() == box1(0., 6.));
  }

  #[test]
  fn trajectory_operand_test() {
    let mut x = tube(0., 0.);
    let mut traj = Trajectory::new(1);
    traj.set(0., vec![0.]);
    traj.set(10., vec![10.]);
    x |= &traj;

    // first slice spans [0,2], so its hull contribution is [0,2]
    assert!(x.slice_value(0).unwrap() == box1(0., 2.));
    // gates come from exact point evaluation
    assert!(x.value_at(0.).unwrap() == box1(0., 0.));
    assert!(x.value_at(10.).unwrap() == box1(0., 10.));
    assert!(x.encloses(&traj).unwrap());
  }

  #[test]
  fn aligned_tube_operand_test() {
    let mut x = tube(0., 10.);
    let y = tube(5., 20.);
    x &= &y;
    assert!(x.codomain() == box1(5., 10.));
    assert!(x.value_at(4.).unwrap() == box1(5., 10.));

    let mut x = tube(0., 1.);
    let y = tube(2., 3.);
    x += &y;
    assert!(box1(2., 4.).is_subset(&x.codomain()));
    assert!(x.codomain().is_subset(&box1(1.9, 4.1)));
  }

  #[test]
  fn foreign_slicing_operand_test() {
    let mut x = tube(0., 10.);
    let mut y = TubeVector::with_timestep(Interval::new(0., 10.), 5., 1).unwrap();
    y.set(&box1(3., 8.)).unwrap();
    x &= &y;
    assert!(TubeVector::same_slicing(&x, &tube(0., 0.)));
    assert!(x.codomain() == box1(3., 8.));
    // a boundary of x strictly inside a slice of y reads y's envelope
    assert!(x.value_at(2.).unwrap() == box1(3., 8.));
  }

  #[test]
  fn gate_consistency_after_op_test() {
    let mut x = tube(0., 1.);
    x += Interval::new(1., 2.);
    for i in 1..x.n_slices() {
      assert!(x.slice(i - 1).unwrap().output_gate() == x.slice(i).unwrap().input_gate());
    }
  }
}
