// Copyright 2026 The tubular developers

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Evaluable functions over a tube, `f(t, x(t))`.

use crate::errors::Result;
use crate::interval::Interval;
use crate::interval_vector::IntervalVector;
use crate::tube_vector::TubeVector;

/// An inclusion function of time and signal value. Implementations must be
/// conservative: `eval` over an interval must enclose every point image.
pub trait Fnc
{
  fn image_dim(&self) -> usize;

  /// Interval enclosure of `f` over the time interval `t` and value box
  /// `x`.
  fn eval(&self, t: &Interval, x: &IntervalVector) -> IntervalVector;

  /// Image tube of `x`: same slicing, envelopes from interval evaluation
  /// over each slice domain, gates from point evaluation at each boundary.
  fn eval_tube(&self, x: &TubeVector) -> Result<TubeVector> {
    let mut image = TubeVector::with_slicing_of(x, self.image_dim())?;
    for i in 0..image.n_slices() {
      let domain = image.slice(i)?.domain();
      let y = self.eval(&domain, x.slice(i)?.codomain());
      image.slice_mut(i)?.set_envelope(&y)?;
    }

    let mut boundaries: Vec<f64> = vec![];
    for i in 0..x.n_slices() {
      boundaries.push(x.slice(i)?.domain().lb());
    }
    boundaries.push(x.domain().ub());
    for t in boundaries {
      let gate = self.eval(&Interval::point(t), &x.value_at(t)?);
      image.set_gate(t, &gate)?;
    }
    Ok(image)
  }
}

/// Adapts a closure into a [`Fnc`].
pub struct FncLambda<F> where
  F: Fn(&Interval, &IntervalVector) -> IntervalVector
{
  image_dim: usize,
  f: F
}

impl<F> FncLambda<F> where
  F: Fn(&Interval, &IntervalVector) -> IntervalVector
{
  pub fn new(image_dim: usize, f: F) -> FncLambda<F> {
    assert!(image_dim > 0, "a function must have at least one image dimension");
    FncLambda { image_dim, f }
  }
}

impl<F> Fnc for FncLambda<F> where
  F: Fn(&Interval, &IntervalVector) -> IntervalVector
{
  fn image_dim(&self) -> usize {
    self.image_dim
  }

  fn eval(&self, t: &Interval, x: &IntervalVector) -> IntervalVector {
    (self.f)(t, x)
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  // f(t, x) = t, the identity of time
  fn identity() -> FncLambda<impl Fn(&Interval, &IntervalVector) -> IntervalVector> {
    FncLambda::new(1, |t, _| IntervalVector::from(vec![*t]))
  }

  #[test]
  fn set_fnc_test() {
    let f = identity();
    let tube = TubeVector::with_timestep_and_fnc(Interval::new(0., 10.), 2., &f).unwrap();
    assert!(tube.codomain() == IntervalVector::from(vec![Interval::new(0., 10.)]));
    assert!(tube.slice_value(1).unwrap() == IntervalVector::from(vec![Interval::new(2., 4.)]));
    // gates are exact point evaluations
    assert!(tube.value_at(4.).unwrap() == IntervalVector::from(vec![Interval::point(4.)]));
  }

  #[test]
  fn eval_tube_test() {
    let mut x = TubeVector::with_timestep(Interval::new(0., 10.), 2., 1).unwrap();
    x.set(&IntervalVector::new(1, Interval::new(-1., 1.))).unwrap();

    // f(t, x) = x reflected, a one-dimensional image of the signal value
    let f = FncLambda::new(1, |_: &Interval, x: &IntervalVector|
      IntervalVector::from(vec![-x[0]]));
    let image = f.eval_tube(&x).unwrap();
    assert!(TubeVector::same_slicing(&x, &image));
    assert!(image.codomain() == IntervalVector::new(1, Interval::new(-1., 1.)));

    // the image dimension may differ from the input dimension
    let f = FncLambda::new(2, |t: &Interval, x: &IntervalVector|
      IntervalVector::from(vec![*t, x[0]]));
    let image = f.eval_tube(&x).unwrap();
    assert!(image.dim() == 2);
    assert!(image.value_at(6.).unwrap()[0] == Interval::point(6.));
  }
}
