// Copyright 2026 The tubular developers

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Interval and bound specific operations.

/// Smallest enclosing superset of two values.
pub trait Hull<RHS = Self>
{
  type Output;
  fn hull(&self, rhs: &RHS) -> Self::Output;
}

/// The unbounded element, `[-oo, oo]` for intervals.
pub trait Whole
{
  fn whole() -> Self;
}

/// Largest float strictly below `x`, saturating at `-oo`.
///
/// Outward rounding of computed lower bounds relies on this step so that
/// interval arithmetic never underestimates the true result.
pub(crate) fn prev_float(x: f64) -> f64 {
  if x.is_nan() || x == f64::NEG_INFINITY {
    x
  }
  else if x == 0.0 {
    -f64::from_bits(1)
  }
  else {
    let bits = x.to_bits();
    f64::from_bits(if x > 0.0 { bits - 1 } else { bits + 1 })
  }
}

/// Smallest float strictly above `x`, saturating at `oo`.
pub(crate) fn next_float(x: f64) -> f64 {
  if x.is_nan() || x == f64::INFINITY {
    x
  }
  else if x == 0.0 {
    f64::from_bits(1)
  }
  else {
    let bits = x.to_bits();
    f64::from_bits(if x > 0.0 { bits + 1 } else { bits - 1 })
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn float_steps() {
    assert!(prev_float(1.0) < 1.0);
    assert!(next_float(1.0) > 1.0);
    assert!(prev_float(0.0) < 0.0);
    assert!(next_float(0.0) > 0.0);
    assert!(prev_float(f64::NEG_INFINITY) == f64::NEG_INFINITY);
    assert!(next_float(f64::INFINITY) == f64::INFINITY);
    assert!(next_float(prev_float(42.0)) == 42.0);
  }
}
