//! Shared value types and enums used across BMFRM.
//! Includes `Point3`, `SteeringAngles`, the plane-wave normal convention
//! (`PlaneWaveNormal`) and the aperture sizing rule (`ApertureKind`).
use std::ops::{Add, Mul, Sub};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A spatial coordinate in meters.
#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3::new(0.0, 0.0, 0.0);
    pub const AXIAL: Point3 = Point3::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(&self, other: &Point3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn distance(&self, other: &Point3) -> f64 {
        (*self - *other).norm()
    }

    /// Unit vector along `self`; `None` for a zero or non-finite vector.
    pub fn normalized(&self) -> Option<Point3> {
        let n = self.norm();
        if n > 0.0 && n.is_finite() {
            Some(*self * (1.0 / n))
        } else {
            None
        }
    }

    /// Projection onto the z = 0 plane.
    pub fn lateral(&self) -> Point3 {
        Point3::new(self.x, self.y, 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(v: [f64; 3]) -> Self {
        Point3::new(v[0], v[1], v[2])
    }
}

impl Add for Point3 {
    type Output = Point3;
    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Point3;
    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Point3 {
    type Output = Point3;
    fn mul(self, s: f64) -> Point3 {
        Point3::new(self.x * s, self.y * s, self.z * s)
    }
}

impl std::fmt::Display for Point3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Plane-wave steering: `theta` in the xz plane, `phi` in the yz plane (radians).
#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct SteeringAngles {
    pub theta: f64,
    pub phi: f64,
}

impl SteeringAngles {
    pub const fn new(theta: f64, phi: f64) -> Self {
        Self { theta, phi }
    }
}

/// Convention used to build the propagation direction of a steered plane wave.
///
/// The two variants agree for `theta == phi == 0` and diverge as soon as both
/// angles are non-zero.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaneWaveNormal {
    /// `[sin θ, sin φ, cos θ · cos φ]`, normalized.
    #[default]
    Spherical,
    /// `[sin θ, sin φ, cos θ + cos φ]`, normalized. Kept for compatibility with
    /// delay tables produced by the earlier transmit convention.
    SummedCosine,
}

impl PlaneWaveNormal {
    /// Unit propagation direction for the given steering.
    pub fn direction(self, steer: SteeringAngles) -> Option<Point3> {
        let SteeringAngles { theta, phi } = steer;
        let axial = match self {
            PlaneWaveNormal::Spherical => theta.cos() * phi.cos(),
            PlaneWaveNormal::SummedCosine => theta.cos() + phi.cos(),
        };
        Point3::new(theta.sin(), phi.sin(), axial).normalized()
    }
}

impl std::fmt::Display for PlaneWaveNormal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaneWaveNormal::Spherical => write!(f, "Spherical"),
            PlaneWaveNormal::SummedCosine => write!(f, "SummedCosine"),
        }
    }
}

/// How the aperture width of a field-point mask is sized.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApertureKind {
    /// Width grows with the depth of each reconstructed point.
    #[default]
    Dynamic,
    /// Width is fixed by the focal depth.
    Fixed,
}

impl std::fmt::Display for ApertureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApertureKind::Dynamic => write!(f, "Dynamic"),
            ApertureKind::Fixed => write!(f, "Fixed"),
        }
    }
}
