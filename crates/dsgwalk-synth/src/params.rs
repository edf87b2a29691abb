//! Per-layer evolution parameters.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{SynthError, SynthResult};

/// Rotation angle and phase shared by every interaction in one layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkParameters {
    /// `π·t / layers`.
    pub theta: f64,
    /// `exp(-2iθ)`, the exchange phase of the Heisenberg block.
    pub zeta: Complex64,
}

impl WalkParameters {
    /// Derive the layer parameters for total time `t` split into `layers`.
    pub fn derive(t: f64, layers: u32) -> SynthResult<Self> {
        if layers == 0 {
            return Err(SynthError::InvalidLayers(layers));
        }
        Ok(Self::from_theta(PI * t / f64::from(layers)))
    }

    /// Parameters for a given per-layer angle.
    pub fn from_theta(theta: f64) -> Self {
        Self {
            theta,
            zeta: Complex64::from_polar(1.0, -2.0 * theta),
        }
    }
}
