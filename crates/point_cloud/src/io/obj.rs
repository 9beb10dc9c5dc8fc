//! Plain-text OBJ point clouds.
//!
//! Only vertex (`v x y z`) and vertex normal (`vn x y z`) records are read;
//! faces, comments and every other record are skipped. Coordinates must be
//! finite numbers. Output writes one `v` line per point, each followed by its
//! `vn` line when normals exist.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use glam::DVec3;

use crate::error::ObjError;

/// Points and (possibly empty) normals read from an OBJ file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjCloud {
  pub points: Vec<DVec3>,
  pub normals: Vec<DVec3>,
}

impl ObjCloud {
  /// True when every point has a normal.
  pub fn has_normals(&self) -> bool {
    !self.points.is_empty() && self.points.len() == self.normals.len()
  }
}

/// Parse OBJ text from `reader`.
pub fn read(reader: impl BufRead) -> Result<ObjCloud, ObjError> {
  let mut cloud = ObjCloud::default();
  for (index, line) in reader.lines().enumerate() {
    let line = line?;
    let mut fields = line.split_whitespace();
    let target = match fields.next() {
      Some("v") => &mut cloud.points,
      Some("vn") => &mut cloud.normals,
      _ => continue,
    };
    let vector = parse_vector(fields).ok_or_else(|| ObjError::Parse {
      line: index + 1,
      content: line.clone(),
    })?;
    target.push(vector);
  }
  Ok(cloud)
}

/// Read an `.obj` file.
pub fn read_path(path: impl AsRef<Path>) -> Result<ObjCloud, ObjError> {
  let path = check_extension(path.as_ref())?;
  read(BufReader::new(File::open(path)?))
}

/// Write `points`, each followed by its normal when `normals` is non-empty.
pub fn write(mut writer: impl Write, points: &[DVec3], normals: &[DVec3]) -> Result<(), ObjError> {
  if !normals.is_empty() && normals.len() != points.len() {
    return Err(ObjError::NormalCount {
      points: points.len(),
      normals: normals.len(),
    });
  }
  for (i, p) in points.iter().enumerate() {
    writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    if let Some(n) = normals.get(i) {
      writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
    }
  }
  writer.flush()?;
  Ok(())
}

/// Write an `.obj` file, replacing any existing one.
pub fn write_path(path: impl AsRef<Path>, points: &[DVec3], normals: &[DVec3]) -> Result<(), ObjError> {
  let path = check_extension(path.as_ref())?;
  write(BufWriter::new(File::create(path)?), points, normals)
}

fn check_extension(path: &Path) -> Result<&Path, ObjError> {
  match path.extension().and_then(|e| e.to_str()) {
    Some(ext) if ext.eq_ignore_ascii_case("obj") => Ok(path),
    _ => Err(ObjError::Extension(path.to_path_buf())),
  }
}

/// First three fields as a finite vector. `nan` and `inf` are rejected.
fn parse_vector<'a>(mut fields: impl Iterator<Item = &'a str>) -> Option<DVec3> {
  let mut next = || fields.next()?.parse::<f64>().ok().filter(|v| v.is_finite());
  Some(DVec3::new(next()?, next()?, next()?))
}

#[cfg(test)]
#[path = "obj_test.rs"]
mod obj_test;
