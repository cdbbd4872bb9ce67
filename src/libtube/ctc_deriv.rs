// Copyright 2026 The tubular developers

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Differential contractor: narrows a tube `x` consistently with an
//! enclosure `v` of its derivative, from `x(t1) ∈ x(t0) + (t1 - t0) · v`.

use crate::errors::Result;
use crate::interval::Interval;
use crate::tube_vector::TubeVector;
use gcollections::ops::*;

/// Contracts a tube under `ẋ(·) ∈ v(·)`. Both tubes must share their
/// slicing. Contraction is sound but not minimal: each pass reasons on one
/// slice at a time through its gates.
pub struct CtcDeriv;

impl CtcDeriv
{
  pub fn new() -> CtcDeriv {
    CtcDeriv
  }

  /// One forward gate pass, one backward gate pass, then an envelope pass
  /// intersecting the reachable sets propagated from both gates. Interior
  /// gates are written on both adjacent slices. Returns whether `x`
  /// actually narrowed.
  pub fn contract(&self, x: &mut TubeVector, v: &TubeVector) -> Result<bool> {
    x.check_structure(v)?;
    let before = x.clone();
    let n = x.n_slices();

    for i in 0..n {
      let dt = x.slices[i].domain().diam();
      let step = Interval::point(dt) * &v.slices[i].envelope;
      let bound = &x.slices[i].input_gate + &step;
      let gate = x.slices[i].output_gate.intersection(&bound);
      x.slices[i].output_gate = gate.clone();
      if i + 1 < n {
        x.slices[i + 1].input_gate = gate;
      }
    }

    for i in (0..n).rev() {
      let dt = x.slices[i].domain().diam();
      let step = Interval::point(dt) * &v.slices[i].envelope;
      let bound = &x.slices[i].output_gate - &step;
      let gate = x.slices[i].input_gate.intersection(&bound);
      x.slices[i].input_gate = gate.clone();
      if i > 0 {
        x.slices[i - 1].output_gate = gate;
      }
    }

    for i in 0..n {
      let dt = x.slices[i].domain().diam();
      let from_input = &x.slices[i].input_gate + &(Interval::new(0., dt) * &v.slices[i].envelope);
      let from_output = &x.slices[i].output_gate + &(Interval::new(-dt, 0.) * &v.slices[i].envelope);
      x.slices[i].envelope =
        x.slices[i].envelope.intersection(&from_input).intersection(&from_output);
    }

    Ok(before != *x)
  }
}

impl Default for CtcDeriv
{
  fn default() -> CtcDeriv {
    CtcDeriv::new()
  }
}
