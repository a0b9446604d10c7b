//! Coordinate generation for element positions and reconstruction grids.
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::core::validate;
use crate::error::{Error, Result};

/// `nele` elements along x, centered on the origin, `pitch` meters apart.
pub fn linear_array(nele: usize, pitch: f64) -> Result<Array2<f64>> {
    let pitch = validate::positive("pitch", pitch)?;
    let center = (nele as f64 - 1.0) / 2.0;
    let mut eles = Array2::<f64>::zeros((nele, 3));
    for (i, mut row) in eles.rows_mut().into_iter().enumerate() {
        row[0] = pitch * (i as f64 - center);
    }
    Ok(eles)
}

/// Rectilinear reconstruction grid in the xz plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGrid {
    /// Number of axial samples
    pub nax: usize,
    /// Axial spacing [m]
    pub dax: f64,
    /// Number of lateral samples
    pub nlat: usize,
    /// Lateral spacing [m]
    pub dlat: f64,
    /// Upper-left corner as [axial, lateral] [m]
    pub ulc: [f64; 2],
}

impl ImageGrid {
    pub fn new(nax: usize, dax: f64, nlat: usize, dlat: f64, ulc: [f64; 2]) -> Result<Self> {
        let grid = Self {
            nax,
            dax,
            nlat,
            dlat,
            ulc,
        };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> Result<()> {
        if self.nax == 0 {
            return Err(Error::invalid("nax", self.nax));
        }
        if self.nlat == 0 {
            return Err(Error::invalid("nlat", self.nlat));
        }
        validate::positive("dax", self.dax)?;
        validate::positive("dlat", self.dlat)?;
        validate::finite("ulc", self.ulc[0])?;
        validate::finite("ulc", self.ulc[1])?;
        Ok(())
    }

    pub fn axial(&self) -> Array1<f64> {
        Array1::from_iter((0..self.nax).map(|i| self.ulc[0] + i as f64 * self.dax))
    }

    pub fn lateral(&self) -> Array1<f64> {
        Array1::from_iter((0..self.nlat).map(|j| self.ulc[1] + j as f64 * self.dlat))
    }

    pub fn len(&self) -> usize {
        self.nax * self.nlat
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Field points as an `(nax * nlat) x 3` array, axial-major: row
    /// `i * nlat + j` is `(lateral[j], 0, axial[i])`.
    pub fn points(&self) -> Array2<f64> {
        let axial = self.axial();
        let lateral = self.lateral();
        let mut points = Array2::<f64>::zeros((self.len(), 3));
        for (k, mut row) in points.rows_mut().into_iter().enumerate() {
            row[0] = lateral[k % self.nlat];
            row[2] = axial[k / self.nlat];
        }
        points
    }
}
