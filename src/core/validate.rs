//! Input validation shared by the delay and mask engines.
//!
//! A Point3 may arrive as shape `(3)`, `(1, 3)` or `(3, 1)`. A PointSet must be
//! exactly two-dimensional with three columns; a flat 3-vector is not accepted
//! as a single-row set.
use ndarray::{ArrayBase, ArrayView1, ArrayView2, Data, Dimension, Ix2};

use crate::error::{Error, Result};
use crate::types::Point3;

pub fn point3<S, D>(arg: &'static str, a: &ArrayBase<S, D>) -> Result<Point3>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    if !(1..=2).contains(&a.ndim()) || a.len() != 3 {
        return Err(Error::shape(arg, "a vector of length 3", a.shape()));
    }
    let mut it = a.iter().copied();
    match (it.next(), it.next(), it.next()) {
        (Some(x), Some(y), Some(z)) => Ok(Point3::new(x, y, z)),
        _ => Err(Error::shape(arg, "a vector of length 3", a.shape())),
    }
}

pub fn point_set<'a, S, D>(arg: &'static str, a: &'a ArrayBase<S, D>) -> Result<ArrayView2<'a, f64>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    if a.ndim() != 2 || a.shape()[1] != 3 {
        return Err(Error::shape(arg, "a matrix with dimensions N by 3", a.shape()));
    }
    a.view()
        .into_dimensionality::<Ix2>()
        .map_err(|_| Error::shape(arg, "a matrix with dimensions N by 3", a.shape()))
}

/// Row `i` of a validated PointSet.
#[inline]
pub fn row_point(row: ArrayView1<'_, f64>) -> Point3 {
    Point3::new(row[0], row[1], row[2])
}

pub fn sound_speed(c: f64) -> Result<f64> {
    positive("c", c)
}

pub fn fnumber(fnum: f64) -> Result<f64> {
    positive("fnum", fnum)
}

pub fn positive(arg: &'static str, v: f64) -> Result<f64> {
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(Error::invalid(arg, v))
    }
}

pub fn finite(arg: &'static str, v: f64) -> Result<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(Error::invalid(arg, v))
    }
}
