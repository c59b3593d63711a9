//! DamagePacket - what a landed strike carries into the target

use crate::types::DamageKind;
use serde::{Deserialize, Serialize};

/// The three physical axes of a strike
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    /// Concentration of contact (sharp point/edge vs broad face)
    pub geometry: f64,
    /// Kinetic energy delivered, joule-like
    pub energy: f64,
    /// Structural support behind the contact
    pub rigidity: f64,
}

impl Axes {
    pub fn new(geometry: f64, energy: f64, rigidity: f64) -> Self {
        Axes {
            geometry,
            energy,
            rigidity,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// Immutable damage value passed outside-in through layer stacks
///
/// Each layer derives a residual packet from the one it received; nothing
/// mutates a packet after creation. Non-physical kinds always carry zero
/// axes and zero penetration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamagePacket {
    amount: f64,
    kind: DamageKind,
    /// Legacy depth budget in cm
    penetration: f64,
    axes: Axes,
}

impl DamagePacket {
    /// Build a packet, zeroing the physical fields for non-physical kinds
    pub fn new(amount: f64, kind: DamageKind, penetration: f64, axes: Axes) -> Self {
        if kind.is_physical() {
            DamagePacket {
                amount: amount.max(0.0),
                kind,
                penetration: penetration.max(0.0),
                axes: Axes {
                    geometry: axes.geometry.max(0.0),
                    energy: axes.energy.max(0.0),
                    rigidity: axes.rigidity.max(0.0),
                },
            }
        } else {
            Self::non_physical(amount, kind)
        }
    }

    /// Fire, frost and the like: only amount and kind matter
    pub fn non_physical(amount: f64, kind: DamageKind) -> Self {
        DamagePacket {
            amount: amount.max(0.0),
            kind,
            penetration: 0.0,
            axes: Axes::zero(),
        }
    }

    /// Derive the packet that continues past a layer
    pub fn residual(&self, amount: f64, penetration: f64, axes: Axes) -> Self {
        Self::new(amount, self.kind, penetration, axes)
    }

    /// Same packet with its energy scaled, e.g. by the striker's size
    pub fn with_energy_scale(&self, factor: f64) -> Self {
        let axes = Axes {
            energy: self.axes.energy * factor,
            ..self.axes
        };
        Self::new(self.amount, self.kind, self.penetration, axes)
    }

        pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn kind(&self) -> DamageKind {
        self.kind
    }

    pub fn penetration(&self) -> f64 {
        self.penetration
    }

    pub fn axes(&self) -> Axes {
        self.axes
    }

    pub fn geometry(&self) -> f64 {
        self.axes.geometry
    }

    pub fn energy(&self) -> f64 {
        self.axes.energy
    }

    pub fn rigidity(&self) -> f64 {
        self.axes.rigidity
    }

    pub fn is_physical(&self) -> bool {
        self.kind.is_physical()
    }
}
