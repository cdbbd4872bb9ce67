// Copyright 2026 The tubular developers

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Exact, uncertainty-free vector-valued signal.
//!
//! A trajectory is an ordered list of time samples with linear interpolation
//! in between. It serves as input for tube construction and inflation, and
//! as ground truth for enclosure checks.

use crate::errors::{Result, TubeError};
use crate::interval::Interval;
use crate::interval_vector::IntervalVector;
use crate::ops::Hull;
use gcollections::ops::*;
use serde::{Deserialize, Serialize};

#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct Trajectory
{
  dim: usize,
  points: Vec<(f64, Vec<f64>)> // sorted by time, unique times
}

impl Trajectory
{
  pub fn new(dim: usize) -> Trajectory {
    assert!(dim > 0, "a trajectory must have at least one dimension");
    Trajectory { dim, points: vec![] }
  }

  pub fn dim(&self) -> usize {
    self.dim
  }

  pub fn n_samples(&self) -> usize {
    self.points.len()
  }

  /// Time span covered by the samples, empty when no sample was set.
  pub fn domain(&self) -> Interval {
    match (self.points.first(), self.points.last()) {
      (Some((t0, _)), Some((tf, _))) => Interval::new(*t0, *tf),
      _ => Interval::EMPTY
    }
  }

  /// Records the value at time `t`, replacing any sample already there.
  pub fn set(&mut self, t: f64, v: Vec<f64>) {
    assert!(v.len() == self.dim, "sample dimension must match the trajectory dimension");
    assert!(t.is_finite(), "sample times must be finite");
    let k = self.points.partition_point(|(u, _)| *u < t);
    if k < self.points.len() && self.points[k].0 == t {
      self.points[k].1 = v;
    }
    else {
      self.points.insert(k, (t, v));
    }
  }

  /// Linear interpolation at `t`; fails outside the sampled domain.
  pub fn value_at(&self, t: f64) -> Result<Vec<f64>> {
    if !self.domain().contains(&t) {
      return Err(TubeError::OutOfDomain { t: Interval::point(t), domain: self.domain() });
    }
    let k = self.points.partition_point(|(u, _)| *u < t);
    if self.points[k].0 == t {
      return Ok(self.points[k].1.clone());
    }
    let (t0, v0) = &self.points[k - 1];
    let (t1, v1) = &self.points[k];
    let lambda = (t - t0) / (t1 - t0);
    Ok(v0.iter().zip(v1).map(|(a, b)| a + lambda * (b - a)).collect())
  }

  /// Hull of the trajectory values over `t`. With linear interpolation the
  /// extrema lie at the endpoints of `t` or at interior samples.
  pub fn hull_over(&self, t: &Interval) -> Result<IntervalVector> {
    let inter = t.intersection(&self.domain());
    if inter.is_empty() {
      return Err(TubeError::OutOfDomain { t: *t, domain: self.domain() });
    }
    let mut hull = IntervalVector::from_point(&self.value_at(inter.lb())?);
    hull = hull.hull(&IntervalVector::from_point(&self.value_at(inter.ub())?));
    for (u, v) in self.points.iter() {
      if *u > inter.lb() && *u < inter.ub() {
        hull = hull.hull(&IntervalVector::from_point(v));
      }
    }
    Ok(hull)
  }

  /// Degenerate box enclosing the point value at `t`.
  pub fn eval_point(&self, t: f64) -> Result<IntervalVector> {
    Ok(IntervalVector::from_point(&self.value_at(t)?))
  }

  /// Invariants re-checked on untrusted (deserialized) trajectories:
  /// positive dimension, matching sample dimensions, finite and strictly
  /// increasing sample times.
  pub fn validate(&self) -> Result<()> {
    if self.dim == 0 {
      return Err(TubeError::InvalidDimension(0));
    }
    for (t, v) in self.points.iter() {
      if v.len() != self.dim {
        return Err(TubeError::Structure { reason: "samples must share the trajectory dimension" });
      }
      if !t.is_finite() || v.iter().any(|x| !x.is_finite()) {
        return Err(TubeError::Structure { reason: "samples must be finite" });
      }
    }
    for w in self.points.windows(2) {
      if w[0].0 >= w[1].0 {
        return Err(TubeError::Structure { reason: "sample times must be strictly increasing" });
      }
    }
    Ok(())
  }
}
