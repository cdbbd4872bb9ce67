// Copyright 2026 The tubular developers

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The tube: an ordered, gap-free chain of slices spanning one time domain.
//!
//! A `TubeVector` owns its slices in temporal order. Every lookup descends
//! the chain linearly from the first slice; there is deliberately no tree
//! index, the linear scan is the documented scalability bound of this
//! design. All mutation is in place and single-threaded; a failed
//! precondition aborts the call without rolling back what was already
//! mutated.
//!
//! Interior boundary gates are stored on both adjacent slices (the output
//! gate of the earlier one, the input gate of the later one). Tube-level
//! mutators write both sides so the two copies agree, which renders the
//! shared-gate object of the reference design; the raw slice setters can
//! still make them diverge transiently.

use crate::errors::{Result, TubeError};
use crate::fnc::Fnc;
use crate::interval::Interval;
use crate::interval_vector::IntervalVector;
use crate::ops::Hull;
use crate::slice::Slice;
use crate::trajectory::Trajectory;
use gcollections::ops::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use trilean::SKleene;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TubeVector
{
  pub(crate) slices: Vec<Slice>
}

impl TubeVector
{
  // Definition

  /// One single slice covering the whole domain, with unbounded codomain.
  pub fn new(domain: Interval, dim: usize) -> Result<TubeVector> {
    Ok(TubeVector { slices: vec![Slice::new(domain, dim)?] })
  }

  pub fn with_codomain(domain: Interval, codomain: &IntervalVector) -> Result<TubeVector> {
    let mut tube = TubeVector::new(domain, codomain.dim())?;
    tube.set(codomain)?;
    Ok(tube)
  }

  /// Subdivision by a fixed timestep; the last slice may be narrower so the
  /// chain exactly reaches the domain upper bound. A zero timestep builds
  /// one single slice.
  pub fn with_timestep(domain: Interval, timestep: f64, dim: usize) -> Result<TubeVector> {
    if domain.is_empty() || domain.is_degenerated() || domain.is_unbounded() {
      return Err(TubeError::InvalidDomain(domain));
    }
    if !(timestep >= 0.) || !timestep.is_finite() {
      return Err(TubeError::InvalidTimestep(timestep));
    }
    let timestep = if timestep == 0. { domain.diam() } else { timestep };

    let mut slices = vec![];
    let mut ub = domain.lb();
    loop {
      let lb = ub; // all slices are adjacent, no gap
      ub = (lb + timestep).min(domain.ub());
      slices.push(Slice::new(Interval::new(lb, ub), dim)?);
      if ub >= domain.ub() {
        break;
      }
    }
    Ok(TubeVector { slices })
  }

  pub fn with_timestep_and_codomain(domain: Interval, timestep: f64, codomain: &IntervalVector)
    -> Result<TubeVector>
  {
    let mut tube = TubeVector::with_timestep(domain, timestep, codomain.dim())?;
    tube.set(codomain)?;
    Ok(tube)
  }

  pub fn with_timestep_and_fnc<F: Fnc>(domain: Interval, timestep: f64, f: &F)
    -> Result<TubeVector>
  {
    let mut tube = TubeVector::with_timestep(domain, timestep, f.image_dim())?;
    tube.set_fnc(f)?;
    Ok(tube)
  }

  /// Degenerate-width enclosure of an exact trajectory.
  pub fn from_trajectory(traj: &Trajectory, timestep: f64) -> Result<TubeVector> {
    let mut tube = TubeVector::with_timestep(traj.domain(), timestep, traj.dim())?;
    tube.set_empty();
    tube |= traj;
    Ok(tube)
  }

  /// Enclosure of the band spanned by two exact trajectories.
  pub fn from_trajectories(lb: &Trajectory, ub: &Trajectory, timestep: f64) -> Result<TubeVector> {
    if lb.dim() != ub.dim() {
      return Err(TubeError::Dimension { expected: lb.dim(), actual: ub.dim() });
    }
    if lb.domain() != ub.domain() {
      return Err(TubeError::Structure { reason: "trajectories must share their domain" });
    }
    let mut tube = TubeVector::with_timestep(lb.domain(), timestep, lb.dim())?;
    tube.set_empty();
    tube |= lb;
    tube |= ub;
    Ok(tube)
  }

  /// Restores a tube archived with
  /// [`serialize_file`](crate::serialization::serialize_file), dropping any
  /// companion trajectories.
  pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<TubeVector> {
    let (tube, _) = crate::serialization::deserialize_file(path)?;
    Ok(tube)
  }

  /// Same slicing as `x`, possibly another dimension, unbounded values.
  pub(crate) fn with_slicing_of(x: &TubeVector, dim: usize) -> Result<TubeVector> {
    let mut slices = Vec::with_capacity(x.n_slices());
    for s in &x.slices {
      slices.push(Slice::new(s.domain, dim)?);
    }
    Ok(TubeVector { slices })
  }

  pub fn domain(&self) -> Interval {
    Interval::new(
      self.slices[0].domain.lb(),
      self.slices[self.n_slices() - 1].domain.ub()
    )
  }

  pub fn dim(&self) -> usize {
    self.slices[0].dim()
  }

  // Slices structure

  pub fn n_slices(&self) -> usize {
    self.slices.len()
  }

  pub fn slice(&self, slice_id: usize) -> Result<&Slice> {
    self.check_index(slice_id)?;
    Ok(&self.slices[slice_id])
  }

  pub fn slice_mut(&mut self, slice_id: usize) -> Result<&mut Slice> {
    self.check_index(slice_id)?;
    Ok(&mut self.slices[slice_id])
  }

  pub fn slice_at(&self, t: f64) -> Result<&Slice> {
    Ok(&self.slices[self.input2index(t)?])
  }

  pub fn first_slice(&self) -> &Slice {
    &self.slices[0]
  }

  pub fn last_slice(&self) -> &Slice {
    &self.slices[self.n_slices() - 1]
  }

  /// Index of the slice with the widest time domain.
  pub fn wider_slice(&self) -> usize {
    let mut wider = 0;
    let mut max_width = 0.;
    for (i, s) in self.slices.iter().enumerate() {
      if s.domain.diam() > max_width {
        max_width = s.domain.diam();
        wider = i;
      }
    }
    wider
  }

  /// Index of the unique slice whose domain contains `t`, resolving a
  /// boundary time to the later slice, except the domain upper bound which
  /// resolves to the last slice. Linear scan from the first slice.
  pub fn input2index(&self, t: f64) -> Result<usize> {
    self.check_time(t)?;
    if t == self.domain().ub() {
      return Ok(self.n_slices() - 1);
    }
    for (i, s) in self.slices.iter().enumerate() {
      if t >= s.domain.lb() && t < s.domain.ub() {
        return Ok(i);
      }
    }
    Err(TubeError::Structure { reason: "slice chain is not contiguous" })
  }

  /// Inserts a new boundary at `t`, splitting the slice strictly containing
  /// it. The two halves inherit the envelope of the original slice and the
  /// new interior gates start from that envelope; a no-op when `t` already
  /// bounds a slice.
  pub fn sample(&mut self, t: f64) -> Result<()> {
    let i = self.input2index(t)?;
    let domain = self.slices[i].domain;
    if t == domain.lb() || t == domain.ub() {
      return Ok(()); // no degenerate slice, the method has no effect
    }

    let mut new_slice = self.slices[i].clone();
    new_slice.domain = Interval::new(t, domain.ub());
    self.slices[i].domain = Interval::new(domain.lb(), t);

    let envelope = self.slices[i].envelope.clone();
    self.slices[i].output_gate = envelope.clone();
    new_slice.input_gate = envelope;
    self.slices.insert(i + 1, new_slice);
    Ok(())
  }

  /// Splits at `t` then assigns the exact gate value there.
  pub fn sample_with_gate(&mut self, t: f64, gate: &IntervalVector) -> Result<()> {
    self.check_dim(gate)?;
    self.sample(t)?;
    self.set_gate(t, gate)
  }

  /// Overwrites the boundary gate at `t`, writing both adjacent slices for
  /// an interior boundary. `t` must already bound a slice.
  pub fn set_gate(&mut self, t: f64, gate: &IntervalVector) -> Result<()> {
    self.check_dim(gate)?;
    self.check_time(t)?;
    if t == self.domain().lb() {
      self.slices[0].input_gate = gate.clone();
    }
    else if t == self.domain().ub() {
      let n = self.n_slices();
      self.slices[n - 1].output_gate = gate.clone();
    }
    else {
      let i = self.input2index(t)?;
      if self.slices[i].domain.lb() != t {
        return Err(TubeError::Structure { reason: "time is not a slice boundary" });
      }
      self.slices[i].input_gate = gate.clone();
      self.slices[i - 1].output_gate = gate.clone();
    }
    Ok(())
  }

  /// True iff both tubes share the same slice count and slice domains.
  pub fn same_slicing(x: &TubeVector, y: &TubeVector) -> bool {
    x.n_slices() == y.n_slices()
      && x.slices.iter().zip(&y.slices).all(|(a, b)| a.domain == b.domain)
  }

  // Access values

  /// Union of every slice envelope, the global value bound.
  pub fn codomain(&self) -> IntervalVector {
    let mut codomain = IntervalVector::empty(self.dim());
    for s in &self.slices {
      codomain |= &s.envelope;
    }
    codomain
  }

  pub fn volume(&self) -> f64 {
    self.slices.iter().map(|s| s.volume()).sum()
  }

  /// Largest envelope diameter over the chain, with the first slice index
  /// reaching it.
  pub fn max_thickness(&self) -> (f64, usize) {
    let mut thickness = 0.;
    let mut first_id = 0;
    for (i, s) in self.slices.iter().enumerate() {
      if s.envelope.max_diam() > thickness {
        thickness = s.envelope.max_diam();
        first_id = i;
      }
    }
    (thickness, first_id)
  }

  /// Envelope of the slice `slice_id`.
  pub fn slice_value(&self, slice_id: usize) -> Result<IntervalVector> {
    Ok(self.slice(slice_id)?.codomain().clone())
  }

  /// Value bound at one exact time: the boundary gate when `t` bounds a
  /// slice, the envelope otherwise.
  pub fn value_at(&self, t: f64) -> Result<IntervalVector> {
    Ok(self.slice_at(t)?.value_at(t))
  }

  /// Union of the envelopes of every slice truly overlapping `t`; a slice
  /// only abutting `t.ub()` from above is excluded unless `t` is
  /// degenerate.
  pub fn value_over(&self, t: &Interval) -> Result<IntervalVector> {
    self.check_interval(t)?;
    if t.is_degenerated() {
      return self.value_at(t.lb());
    }

    let first = self.input2index(t.lb())?;
    let mut last = self.input2index(t.ub())?;
    if self.slices[last].domain.lb() == t.ub() {
      last -= 1;
    }

    let mut codomain = IntervalVector::empty(self.dim());
    for s in &self.slices[first..=last] {
      codomain |= &s.envelope;
    }
    Ok(codomain)
  }

  /// Separate enclosures of the lower and upper bound functions over `t`.
  pub fn eval(&self, t: &Interval) -> (IntervalVector, IntervalVector) {
    let mut lo = IntervalVector::empty(self.dim());
    let mut hi = IntervalVector::empty(self.dim());
    let inter = t.intersection(&self.domain());
    if inter.is_empty() {
      return (lo, hi);
    }

    let first = match self.input2index(inter.lb()) {
      Ok(i) => i,
      Err(_) => return (lo, hi)
    };
    for s in &self.slices[first..] {
      if s.domain.lb() > inter.ub() {
        break;
      }
      let (l, h) = s.eval(&inter);
      lo |= &l;
      hi |= &h;
    }
    (lo, hi)
  }

  /// Hull of the times of `search ∩ domain()` at which the signal could
  /// equal `y`.
  pub fn invert(&self, y: &IntervalVector, search: &Interval) -> Result<Interval> {
    self.check_dim(y)?;
    let inter = search.intersection(&self.domain());
    if inter.is_empty() {
      return Ok(Interval::EMPTY);
    }

    let mut hull = Interval::EMPTY;
    let first = self.input2index(inter.lb())?;
    for s in &self.slices[first..] {
      if s.domain.lb() > inter.ub() {
        break;
      }
      hull = hull.hull(&s.invert(y, &inter));
    }
    Ok(hull)
  }

  /// Same inversion, partitioned into maximal contiguous time windows: a
  /// slice-local miss closes off the running union, so disjoint candidate
  /// windows are not conflated into one wide interval.
  pub fn invert_windows(&self, y: &IntervalVector, search: &Interval) -> Result<Vec<Interval>> {
    self.check_dim(y)?;
    let mut windows = vec![];
    let inter = search.intersection(&self.domain());
    if inter.is_empty() {
      return Ok(windows);
    }

    let mut running = Interval::EMPTY;
    let first = self.input2index(inter.lb())?;
    for s in &self.slices[first..] {
      if s.domain.lb() > inter.ub() {
        break;
      }
      let local = s.invert(y, &inter);
      if local.is_empty() && !running.is_empty() {
        windows.push(running);
        running = Interval::EMPTY;
      }
      else {
        running = running.hull(&local);
      }
    }
    if !running.is_empty() {
      windows.push(running);
    }
    Ok(windows)
  }

  // Tests

  pub fn is_subset(&self, x: &TubeVector) -> Result<bool> {
    self.check_structure(x)?;
    Ok(self.slices.iter().zip(&x.slices).all(|(a, b)| a.is_subset(b)))
  }

  pub fn is_strict_subset(&self, x: &TubeVector) -> Result<bool> {
    Ok(self.is_subset(x)? && self != x)
  }

  /// A tube is empty as soon as one slice envelope is empty.
  pub fn is_empty(&self) -> bool {
    self.slices.iter().any(|s| s.is_empty())
  }

  /// True iff every slice guarantee-contains the matching restriction of
  /// the exact trajectory `x`.
  pub fn encloses(&self, x: &Trajectory) -> Result<bool> {
    self.check_trajectory(x)?;
    for s in &self.slices {
      if !s.encloses(x)? {
        return Ok(false);
      }
    }
    Ok(true)
  }

  /// Three-valued containment of an exact trajectory: `True` when enclosed
  /// everywhere, `False` when provably escaping some slice envelope,
  /// `Unknown` otherwise.
  pub fn contains(&self, x: &Trajectory) -> Result<SKleene> {
    self.check_trajectory(x)?;
    let mut enclosed = SKleene::True;
    for s in &self.slices {
      let hull = x.hull_over(&s.domain)?;
      if hull.intersection(&s.envelope).is_empty() {
        return Ok(SKleene::False);
      }
      if !s.encloses(x)? {
        enclosed = SKleene::Unknown;
      }
    }
    Ok(enclosed)
  }

  // Setting values

  /// Overwrites every slice envelope and gate with `y`.
  pub fn set(&mut self, y: &IntervalVector) -> Result<()> {
    self.check_dim(y)?;
    for s in self.slices.iter_mut() {
      s.envelope = y.clone();
      s.input_gate = y.clone();
      s.output_gate = y.clone();
    }
    Ok(())
  }

  /// Overwrites one slice, mirroring its boundary gates onto the adjacent
  /// slices.
  pub fn set_at_index(&mut self, y: &IntervalVector, slice_id: usize) -> Result<()> {
    self.check_dim(y)?;
    self.check_index(slice_id)?;
    self.slices[slice_id].envelope = y.clone();
    self.slices[slice_id].input_gate = y.clone();
    self.slices[slice_id].output_gate = y.clone();
    if slice_id > 0 {
      self.slices[slice_id - 1].output_gate = y.clone();
    }
    if slice_id + 1 < self.n_slices() {
      self.slices[slice_id + 1].input_gate = y.clone();
    }
    Ok(())
  }

  /// Materializes a boundary at `t` and assigns the exact gate value there.
  pub fn set_at_time(&mut self, y: &IntervalVector, t: f64) -> Result<()> {
    self.check_dim(y)?;
    self.sample_with_gate(t, y)
  }

  /// Overwrites the envelope of every slice fully inside `t`, after
  /// materializing exact boundaries at `t.lb()` and `t.ub()`. Slices whose
  /// intersection with `t` is degenerate (a touching boundary) are left
  /// untouched.
  pub fn set_over(&mut self, y: &IntervalVector, t: &Interval) -> Result<()> {
    self.check_dim(y)?;
    self.check_interval(t)?;
    if t.is_degenerated() {
      return self.set_at_time(y, t.lb());
    }

    self.sample_with_gate(t.lb(), y)?;
    self.sample_with_gate(t.ub(), y)?;

    let first = self.input2index(t.lb())?;
    let last = self.input2index(t.ub())?;
    for i in first..=last {
      if t.intersection(&self.slices[i].domain).is_degenerated() {
        continue;
      }
      self.set_at_index(y, i)?;
    }
    Ok(())
  }

  /// Assignment from an evaluable function: envelopes from interval
  /// evaluation over each slice domain first, then gates from exact point
  /// evaluation at each boundary. Two passes, since gates need point
  /// evaluation distinct from the looser interval-domain one.
  pub fn set_fnc<F: Fnc>(&mut self, f: &F) -> Result<()> {
    if f.image_dim() != self.dim() {
      return Err(TubeError::Dimension { expected: self.dim(), actual: f.image_dim() });
    }

    for i in 0..self.n_slices() {
      let domain = self.slices[i].domain;
      let env = f.eval(&domain, &self.slices[i].envelope);
      self.slices[i].envelope = env;
    }

    let mut boundaries: Vec<f64> = self.slices.iter().map(|s| s.domain.lb()).collect();
    boundaries.push(self.domain().ub());
    for t in boundaries {
      let x = self.value_at(t)?;
      let gate = f.eval(&Interval::point(t), &x);
      self.set_gate(t, &gate)?;
    }
    Ok(())
  }

  pub fn set_empty(&mut self) {
    let empty = IntervalVector::empty(self.dim());
    for s in self.slices.iter_mut() {
      s.envelope = empty.clone();
      s.input_gate = empty.clone();
      s.output_gate = empty.clone();
    }
  }

  /// Adds the symmetric uncertainty `[-rad, rad]` to every envelope first,
  /// then to the boundary gates, so gates are inflated in the context of
  /// the already-inflated envelopes.
  pub fn inflate(&mut self, rad: f64) -> &mut TubeVector {
    assert!(rad >= 0., "inflation radius must be non-negative");
    let e = IntervalVector::new(self.dim(), Interval::new(-rad, rad));

    for s in self.slices.iter_mut() {
      s.envelope = &s.envelope + &e;
    }

    self.slices[0].input_gate = &self.slices[0].input_gate + &e;
    for i in 0..self.n_slices() {
      let gate = &self.slices[i].output_gate + &e;
      self.slices[i].output_gate = gate.clone();
      if i + 1 < self.n_slices() {
        self.slices[i + 1].input_gate = gate;
      }
    }
    self
  }

  /// Inflation by a time-varying radius trajectory, one radius per
  /// dimension.
  pub fn inflate_with(&mut self, rad: &Trajectory) -> Result<()> {
    if rad.dim() != self.dim() {
      return Err(TubeError::Dimension { expected: self.dim(), actual: rad.dim() });
    }
    if !self.domain().is_subset(&rad.domain()) {
      return Err(TubeError::OutOfDomain { t: self.domain(), domain: rad.domain() });
    }

    let symmetric = |r: &IntervalVector| -> IntervalVector {
      let mut e = IntervalVector::empty(r.dim());
      for k in 0..r.dim() {
        assert!(r[k].lb() >= 0., "inflation radius must be non-negative");
        e[k] = Interval::new(-r[k].ub(), r[k].ub());
      }
      e
    };

    for i in 0..self.n_slices() {
      let e = symmetric(&rad.hull_over(&self.slices[i].domain)?);
      self.slices[i].envelope = &self.slices[i].envelope + &e;
    }

    let e = symmetric(&rad.eval_point(self.domain().lb())?);
    self.slices[0].input_gate = &self.slices[0].input_gate + &e;
    for i in 0..self.n_slices() {
      let e = symmetric(&rad.eval_point(self.slices[i].domain.ub())?);
      let gate = &self.slices[i].output_gate + &e;
      self.slices[i].output_gate = gate.clone();
      if i + 1 < self.n_slices() {
        self.slices[i + 1].input_gate = gate;
      }
    }
    Ok(())
  }

  // Bisection

  /// Two copies differing only at time `t`: the box there is bisected along
  /// its widest dimension at `ratio`, and each copy receives one half via an
  /// exact gate assignment. The union of the two halves reconstructs the
  /// original box.
  pub fn bisect(&self, t: f64, ratio: f64) -> Result<(TubeVector, TubeVector)> {
    let y = self.value_at(t)?;
    let (lo, hi) = y.bisect(ratio).ok_or(TubeError::NotBisectable)?;
    let mut first = self.clone();
    let mut second = self.clone();
    first.set_at_time(&lo, t)?;
    second.set_at_time(&hi, t)?;
    Ok((first, second))
  }

  // Structural checks

  fn check_time(&self, t: f64) -> Result<()> {
    if !self.domain().contains(&t) {
      return Err(TubeError::OutOfDomain { t: Interval::point(t), domain: self.domain() });
    }
    Ok(())
  }

  fn check_interval(&self, t: &Interval) -> Result<()> {
    if t.is_empty() || !t.is_subset(&self.domain()) {
      return Err(TubeError::OutOfDomain { t: *t, domain: self.domain() });
    }
    Ok(())
  }

  fn check_index(&self, slice_id: usize) -> Result<()> {
    if slice_id >= self.n_slices() {
      return Err(TubeError::SliceIndex { index: slice_id, n_slices: self.n_slices() });
    }
    Ok(())
  }

  fn check_dim(&self, y: &IntervalVector) -> Result<()> {
    if y.dim() != self.dim() {
      return Err(TubeError::Dimension { expected: self.dim(), actual: y.dim() });
    }
    Ok(())
  }

  pub(crate) fn check_structure(&self, x: &TubeVector) -> Result<()> {
    if x.dim() != self.dim() {
      return Err(TubeError::Dimension { expected: self.dim(), actual: x.dim() });
    }
    if !TubeVector::same_slicing(self, x) {
      return Err(TubeError::Structure { reason: "tubes must share their slicing" });
    }
    Ok(())
  }

  fn check_trajectory(&self, x: &Trajectory) -> Result<()> {
    if x.dim() != self.dim() {
      return Err(TubeError::Dimension { expected: self.dim(), actual: x.dim() });
    }
    if !self.domain().is_subset(&x.domain()) {
      return Err(TubeError::OutOfDomain { t: self.domain(), domain: x.domain() });
    }
    Ok(())
  }

  /// Structural invariants, re-checked on untrusted (deserialized) chains:
  /// a non-empty chain of uniform dimension, bounded non-degenerate slice
  /// domains,
  /// and temporal contiguity with no gap or overlap.
  pub fn validate(&self) -> Result<()> {
    if self.slices.is_empty() {
      return Err(TubeError::Structure { reason: "a tube must own at least one slice" });
    }
    let dim = self.dim();
    for s in &self.slices {
      if s.dim() != dim {
        return Err(TubeError::Structure { reason: "slices must share one dimension" });
      }
      if s.domain.is_empty() || s.domain.is_degenerated() || s.domain.is_unbounded() {
        return Err(TubeError::InvalidDomain(s.domain));
      }
    }
    for w in self.slices.windows(2) {
      if w[0].domain.ub() != w[1].domain.lb() {
        return Err(TubeError::Structure { reason: "slice chain is not contiguous" });
      }
    }
    Ok(())
  }
}

impl PartialEq for TubeVector
{
  fn eq(&self, x: &TubeVector) -> bool {
    // two chains of differing slice counts are immediately unequal
    self.n_slices() == x.n_slices()
      && self.slices.iter().zip(&x.slices).all(|(a, b)| a == b)
  }
}

impl fmt::Display for TubeVector
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "TubeVector {} ↦ {}, {} slice{}",
      self.domain(), self.codomain(), self.n_slices(),
      if self.n_slices() > 1 { "s" } else { "" })
  }
}
