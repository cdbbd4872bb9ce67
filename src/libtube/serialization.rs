// Copyright 2026 The tubular developers

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Binary persistence of a tube with optional companion trajectories.
//!
//! The on-disk layout is sequential: a format version number, then the
//! tube, then the trajectories. The version is read and checked before
//! anything else so an archive from another format era fails with
//! [`TubeError::UnsupportedVersion`] instead of a decoding error.
//! Structural invariants are re-validated after decoding, the bytes are
//! untrusted.

use crate::errors::{Result, TubeError};
use crate::trajectory::Trajectory;
use crate::tube_vector::TubeVector;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Current archive format version.
pub const FORMAT_VERSION: u32 = 2;

pub fn serialize_file<P: AsRef<Path>>(path: P, tube: &TubeVector,
  trajectories: &[Trajectory]) -> Result<()>
{
  let path = path.as_ref();
  let mut writer = BufWriter::new(File::create(path)?);
  bincode::serialize_into(&mut writer, &FORMAT_VERSION)?;
  bincode::serialize_into(&mut writer, tube)?;
  bincode::serialize_into(&mut writer, trajectories)?;
  log::debug!("serialized tube ({} slices, {} trajectories) into {}",
    tube.n_slices(), trajectories.len(), path.display());
  Ok(())
}

pub fn deserialize_file<P: AsRef<Path>>(path: P) -> Result<(TubeVector, Vec<Trajectory>)> {
  let path = path.as_ref();
  let mut reader = BufReader::new(File::open(path)?);

  let version: u32 = bincode::deserialize_from(&mut reader)?;
  if version != FORMAT_VERSION {
    return Err(TubeError::UnsupportedVersion(version));
  }

  let tube: TubeVector = bincode::deserialize_from(&mut reader)?;
  tube.validate()?;
  let trajectories: Vec<Trajectory> = bincode::deserialize_from(&mut reader)?;
  for traj in trajectories.iter() {
    traj.validate()?;
  }
  log::debug!("deserialized tube ({} slices, {} trajectories) from {}",
    tube.n_slices(), trajectories.len(), path.display());
  Ok((tube, trajectories))
}

#[cfg(test)]
mod tests
{
  use super::*;
  use crate::interval::Interval;
  use crate::interval_vector::IntervalVector;

  fn archive_path(name: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("tubular-{}-{}.tube", name, std::process::id()));
    path
  }

  fn sample_tube() -> TubeVector {
    let mut tube = TubeVector::with_timestep(Interval::new(0., 10.), 2., 2).unwrap();
    tube.set(&IntervalVector::new(2, Interval::new(-1., 1.))).unwrap();
    tube.sample(3.).unwrap();
    tube.set_gate(3., &IntervalVector::new(2, Interval::new(0., 0.5))).unwrap();
    tube
  }

  #[test]
  fn roundtrip_test() {
    let path = archive_path("roundtrip");
    let tube = sample_tube();
    let mut traj = Trajectory::new(2);
    traj.set(0., vec![0., 0.]);
    traj.set(10., vec![0.5, -0.5]);

    serialize_file(&path, &tube, std::slice::from_ref(&traj)).unwrap();
    let (tube2, trajs2) = deserialize_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(tube2 == tube);
    assert!(trajs2 == vec![traj]);
  }

  #[test]
  fn from_file_test() {
    let path = archive_path("from-file");
    let tube = sample_tube();
    serialize_file(&path, &tube, &[]).unwrap();
    let tube2 = TubeVector::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(tube2 == tube);
  }

  #[test]
  fn no_trajectory_test() {
    let path = archive_path("no-traj");
    let tube = sample_tube();
    serialize_file(&path, &tube, &[]).unwrap();
    let (tube2, trajs2) = deserialize_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(tube2 == tube);
    assert!(trajs2.is_empty());
  }

  #[test]
  fn version_mismatch_test() {
    let path = archive_path("version");
    {
      let mut writer = BufWriter::new(File::create(&path).unwrap());
      bincode::serialize_into(&mut writer, &99u32).unwrap();
      bincode::serialize_into(&mut writer, &sample_tube()).unwrap();
      bincode::serialize_into(&mut writer, &Vec::<Trajectory>::new()).unwrap();
    }
    let result = deserialize_file(&path);
    std::fs::remove_file(&path).unwrap();
    assert!(match result {
      Err(TubeError::UnsupportedVersion(99)) => true,
      _ => false
    });
  }

  #[test]
  fn corrupted_structure_test() {
    let path = archive_path("corrupted");
    let mut tube = sample_tube();
    // a gap in the chain must be rejected on load
    tube.slices[0].domain = Interval::new(0., 1.5);
    serialize_file(&path, &tube, &[]).unwrap();
    let result = deserialize_file(&path);
    std::fs::remove_file(&path).unwrap();
    assert!(match result {
      Err(TubeError::Structure { .. }) => true,
      _ => false
    });
  }

  #[test]
  fn missing_file_test() {
    assert!(match deserialize_file("/nonexistent/tube.bin") {
      Err(TubeError::Io(_)) => true,
      _ => false
    });
  }
}
