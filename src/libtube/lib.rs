// Copyright 2026 The tubular developers

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This library proposes guaranteed interval enclosures of continuous-time,
//! vector-valued signals, called tubes. A tube covers a bounded time domain
//! with an ordered chain of slices; each slice carries an envelope box over
//! its time width and exact gates at its boundaries. Every operation is
//! conservative: whatever is not provably excluded stays in.
//!
//! Tubes support by-time and by-interval valuation, inversion, bisection,
//! compound arithmetic with intervals, trajectories and other tubes
//! ([`tube_vector`]), enclosure tests against exact trajectories
//! ([`trajectory`]), image computation through inclusion functions
//! ([`fnc`]), differential contraction ([`ctc_deriv`]) and binary
//! persistence ([`serialization`]).
//!
//! # Examples
//!
//! ```
//! use tube::prelude::*;
//!
//! // x(t) ∈ [-10, 10] over [0, 10], with x(0) = 0 and ẋ ∈ [0, 1]
//! let domain = Interval::new(0., 10.);
//! let mut x = TubeVector::with_timestep_and_codomain(
//!   domain, 0.5, &IntervalVector::new(1, Interval::new(-10., 10.)))?;
//! x.set_gate(0., &IntervalVector::new(1, Interval::point(0.)))?;
//!
//! let mut v = TubeVector::with_timestep(domain, 0.5, 1)?;
//! v.set(&IntervalVector::new(1, Interval::new(0., 1.)))?;
//!
//! CtcDeriv::new().contract(&mut x, &v)?;
//! assert!(x.value_at(10.)?.is_subset(&IntervalVector::new(1, Interval::new(-0.1, 10.1))));
//! # Ok::<(), tube::errors::TubeError>(())
//! ```

#![crate_name = "tube"]

pub mod ctc_deriv;
pub mod errors;
pub mod fnc;
pub mod interval;
pub mod interval_vector;
pub mod ops;
pub mod serialization;
pub mod slice;
pub mod trajectory;
pub mod tube_vector;

mod tube_ops;

pub use crate::ctc_deriv::CtcDeriv;
pub use crate::fnc::{Fnc, FncLambda};
pub use crate::interval::Interval;
pub use crate::interval_vector::IntervalVector;
pub use crate::slice::Slice;
pub use crate::trajectory::Trajectory;
pub use crate::tube_vector::TubeVector;

pub mod prelude
{
  pub use crate::ctc_deriv::CtcDeriv;
  pub use crate::errors::{Result, TubeError};
  pub use crate::fnc::{Fnc, FncLambda};
  pub use crate::interval::Interval;
  pub use crate::interval_vector::IntervalVector;
  pub use crate::ops::{Hull, Whole};
  pub use crate::slice::Slice;
  pub use crate::trajectory::Trajectory;
  pub use crate::tube_vector::TubeVector;
  pub use gcollections::ops::*;
  pub use trilean::SKleene;
}
