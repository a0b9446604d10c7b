use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{PlaneWaveNormal, Point3, SteeringAngles};

/// Recognized transmit excitations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransmitMode {
    /// Steered transmit; `focus: None` is a plane wave, `Some` a focused beam.
    Parametric {
        steer: SteeringAngles,
        #[serde(default)]
        focus: Option<Point3>,
    },
}

impl TransmitMode {
    pub fn plane_wave(steer: SteeringAngles) -> Self {
        TransmitMode::Parametric { steer, focus: None }
    }

    pub fn focused(steer: SteeringAngles, focus: Point3) -> Self {
        TransmitMode::Parametric {
            steer,
            focus: Some(focus),
        }
    }

    pub fn steer(&self) -> SteeringAngles {
        match self {
            TransmitMode::Parametric { steer, .. } => *steer,
        }
    }

    pub fn focus(&self) -> Option<Point3> {
        match self {
            TransmitMode::Parametric { focus, .. } => *focus,
        }
    }
}

impl Default for TransmitMode {
    fn default() -> Self {
        TransmitMode::plane_wave(SteeringAngles::default())
    }
}

/// Transmit parameters suitable for config files and CLI presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmitParams {
    pub mode: TransmitMode,
    /// Speed of sound [m/s]
    pub c: f64,
    /// F-number of the aperture
    pub fnum: f64,
    #[serde(default)]
    pub normal: PlaneWaveNormal,
}

impl Default for TransmitParams {
    fn default() -> Self {
        Self {
            mode: TransmitMode::default(),
            c: 1540.0,
            fnum: 2.0,
            normal: PlaneWaveNormal::Spherical,
        }
    }
}

impl TransmitParams {
    pub fn new(mode: TransmitMode, c: f64, fnum: f64, normal: PlaneWaveNormal) -> Result<Self> {
        let params = Self {
            mode,
            c,
            fnum,
            normal,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(Error::Config(format!("c must be positive, got {}", self.c)));
        }
        if !(self.fnum.is_finite() && self.fnum > 0.0) {
            return Err(Error::Config(format!(
                "fnum must be positive, got {}",
                self.fnum
            )));
        }
        let steer = self.mode.steer();
        for (name, angle) in [("theta", steer.theta), ("phi", steer.phi)] {
            if !(angle.is_finite() && angle.abs() < FRAC_PI_2) {
                return Err(Error::Config(format!(
                    "steering angle {} must lie in (-pi/2, pi/2), got {}",
                    name, angle
                )));
            }
        }
        if let Some(focus) = self.mode.focus() {
            if !focus.is_finite() {
                return Err(Error::Config(format!("focus {} is not finite", focus)));
            }
            if focus.z == 0.0 {
                return Err(Error::Config(format!(
                    "focus {} lies in the array plane",
                    focus
                )));
            }
        }
        Ok(())
    }
}
