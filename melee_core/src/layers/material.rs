//! Material layer schema shared by armour and tissue

use serde::{Deserialize, Serialize};

/// Shielding coefficients, each in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shielding {
    /// Reduces geometry reaching deeper layers
    pub deflection: f64,
    /// Reduces energy reaching deeper layers
    pub absorption: f64,
    /// Reduces rigidity for the next layer only
    pub dispersion: f64,
}

impl Shielding {
    pub fn new(deflection: f64, absorption: f64, dispersion: f64) -> Self {
        Shielding {
            deflection,
            absorption,
            dispersion,
        }
    }

    pub fn clamped(&self) -> Self {
        Shielding {
            deflection: self.deflection.clamp(0.0, 1.0),
            absorption: self.absorption.clamp(0.0, 1.0),
            dispersion: self.dispersion.clamp(0.0, 1.0),
        }
    }

    pub fn sum(&self) -> f64 {
        self.deflection + self.absorption + self.dispersion
    }
}

/// Threshold and ratio for one axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisSusceptibility {
    pub threshold: f64,
    pub ratio: f64,
}

impl AxisSusceptibility {
    pub fn new(threshold: f64, ratio: f64) -> Self {
        AxisSusceptibility { threshold, ratio }
    }

    /// `max(0, value - threshold) * ratio`
    pub fn damage(&self, value: f64) -> f64 {
        if value <= self.threshold {
            return 0.0;
        }
        (value - self.threshold) * self.ratio.max(0.0)
    }
}

/// How a layer takes damage itself, per axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Susceptibility {
    pub geometry: AxisSusceptibility,
    pub energy: AxisSusceptibility,
    pub rigidity: AxisSusceptibility,
}

/// One layer of a resolved stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLayer {
    pub name: String,
    pub shielding: Shielding,
    pub susceptibility: Susceptibility,
    pub thickness_cm: f64,
    #[serde(default)]
    pub durability: f64,
    /// Bone, cartilage
    #[serde(default)]
    pub structural: bool,
}
