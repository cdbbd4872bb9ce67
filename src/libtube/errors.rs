// Copyright 2026 The tubular developers

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Failure taxonomy of the tube structure.
//!
//! Every precondition is checked eagerly at the start of an operation and
//! reported as one of the named variants below. A failed call aborts without
//! rollback: mutations already applied are kept, so the caller must treat the
//! tube as requiring revalidation.

use crate::interval::Interval;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TubeError>;

#[derive(Debug, Error)]
pub enum TubeError
{
  /// A time or sub-interval falls outside the tube domain.
  #[error("input {t} out of the tube domain {domain}")]
  OutOfDomain { t: Interval, domain: Interval },

  /// A slice index beyond the chain length.
  #[error("slice index {index} out of range ({n_slices} slices)")]
  SliceIndex { index: usize, n_slices: usize },

  /// An operand box or function does not match the tube dimension.
  #[error("dimension mismatch: expected {expected}, got {actual}")]
  Dimension { expected: usize, actual: usize },

  /// A dimension that cannot define a tube (zero).
  #[error("invalid dimension {0}")]
  InvalidDimension(usize),

  /// Two tubes expected to share their slicing or domain, but don't; or a
  /// deserialized chain breaks a structural invariant.
  #[error("structure mismatch: {reason}")]
  Structure { reason: &'static str },

  /// A slice domain must be a non-degenerate, non-empty interval.
  #[error("invalid slice or tube domain {0}")]
  InvalidDomain(Interval),

  /// The sampling timestep must be positive and finite.
  #[error("invalid timestep {0}")]
  InvalidTimestep(f64),

  /// No dimension of the codomain is wide enough to split.
  #[error("unable to bisect, degenerated codomain")]
  NotBisectable,

  /// A serialized archive carries a version tag this build cannot read.
  #[error("unsupported serialization format version {0}")]
  UnsupportedVersion(u32),

  #[error("serialization i/o failure: {0}")]
  Io(#[from] std::io::Error),

  #[error("serialization codec failure: {0}")]
  Codec(#[from] bincode::Error),
}
