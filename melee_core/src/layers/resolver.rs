//! Layer stack resolution
//!
//! One packet walks an outside-in stack. Each layer first shields (reducing
//! what it forwards), then takes its own damage from the post-shielding
//! values, then consumes the depth budget. The same code runs for armour and
//! for tissue.

use super::armour::ArmourStack;
use super::material::MaterialLayer;
use crate::config::LayerConstants;
use crate::damage::{Axes, DamagePacket};
use crate::rng::{DrawSource, StreamId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Damage a layer took, per axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisDamage {
    pub geometry: f64,
    pub energy: f64,
    pub rigidity: f64,
}

impl AxisDamage {
    pub fn total(&self) -> f64 {
        self.geometry + self.energy + self.rigidity
    }

    /// Destroyed volume: energy and rigidity damage
    pub fn volume(&self) -> f64 {
        self.energy + self.rigidity
    }

    /// Penetrating depth: geometry damage
    pub fn depth(&self) -> f64 {
        self.geometry
    }
}

/// What happened at one layer
#[derive(Debug, Clone, PartialEq)]
pub struct LayerResult {
    pub layer: String,
    pub structural: bool,
    pub damage: AxisDamage,
    /// Packet forwarded to the next layer
    pub residual: DamagePacket,
    pub continues: bool,
}

/// What happened across a whole stack
#[derive(Debug, Clone, PartialEq)]
pub struct StackResult {
    pub layers: Vec<LayerResult>,
    /// Packet leaving the innermost layer, `None` if it stopped inside
    pub exit: Option<DamagePacket>,
}

impl StackResult {
    pub fn passed_through(&self) -> bool {
        self.exit.is_some()
    }
}

/// Resolve a single layer
pub fn resolve_layer(
    packet: &DamagePacket,
    layer: &MaterialLayer,
    constants: &LayerConstants,
) -> LayerResult {
    let shielding = layer.shielding.clamped();
    let keep_geometry = 1.0 - shielding.deflection;
    let keep_energy = 1.0 - shielding.absorption;

    // Shielding
    let geometry = packet.geometry() * keep_geometry;
    let energy = packet.energy() * keep_energy;
    let rigidity_next = packet.rigidity() * (1.0 - shielding.dispersion);

    // Susceptibility, on this layer's post-shielding values; dispersion only
    // affects what the next layer sees
    let sus = &layer.susceptibility;
    let damage = AxisDamage {
        geometry: sus.geometry.damage(geometry),
        energy: sus.energy.damage(energy),
        rigidity: sus.rigidity.damage(packet.rigidity()),
    };

    // Depth budget
    let penetration = (packet.penetration() * keep_geometry - layer.thickness_cm).max(0.0);
    let geometry_next = if penetration > 0.0 { geometry } else { 0.0 };

    let amount = packet.amount() * (keep_geometry + keep_energy) / 2.0;
    let residual = packet.residual(
        amount,
        penetration,
        Axes::new(geometry_next, energy, rigidity_next),
    );

    let continues = if packet.kind().propagates_on_geometry() {
        residual.geometry() > 0.0
    } else {
        residual.energy() > constants.blunt_energy_floor
    };

    LayerResult {
        layer: layer.name.clone(),
        structural: layer.structural,
        damage,
        residual,
        continues,
    }
}

/// Resolve a stack outside-in
///
/// Non-physical packets never enter the stack and come out unchanged. An
/// empty stack also passes the packet through unchanged.
pub fn resolve_stack(
    packet: DamagePacket,
    layers: &[MaterialLayer],
    constants: &LayerConstants,
) -> StackResult {
    let mut results = Vec::with_capacity(layers.len());
    if !packet.is_physical() {
        return StackResult {
            layers: results,
            exit: Some(packet),
        };
    }

    let mut current = packet;
    for layer in layers {
        let result = resolve_layer(&current, layer, constants);
        let continues = result.continues;
        current = result.residual;
        results.push(result);

        if !continues {
            debug!(layer = %layer.name, kind = ?packet.kind(), "packet stopped");
            return StackResult {
                layers: results,
                exit: None,
            };
        }
    }

    StackResult {
        layers: results,
        exit: Some(current),
    }
}

/// Roll whether a strike finds a gap in the armour
///
/// Draws only when the part is covered at all.
pub fn roll_gap(stack: &ArmourStack, constants: &LayerConstants, draws: &mut impl DrawSource) -> bool {
    let Some(totality) = stack.totality else {
        return false;
    };
    let chance = constants.gap_chance.for_totality(totality);
    let roll = draws.draw(StreamId::Combat);
    roll < chance
}

/// Full resolution of one packet against one body part
#[derive(Debug, Clone, PartialEq)]
pub struct PartResolution {
    pub gap: bool,
    pub armour: StackResult,
    /// `None` when the armour stopped the packet
    pub tissue: Option<StackResult>,
}

impl PartResolution {
    /// Packet as it reached the tissue
    pub fn post_armour(&self) -> Option<DamagePacket> {
        self.armour.exit
    }

    /// Whether the packet left the innermost tissue layer
    pub fn passed_through(&self) -> bool {
        self.tissue.as_ref().map_or(false, |t| t.passed_through())
    }
}

/// Run a packet through armour (unless a gap is found) and then tissue
pub fn resolve_part(
    packet: DamagePacket,
    armour: &ArmourStack,
    tissue: &[MaterialLayer],
    constants: &LayerConstants,
    draws: &mut impl DrawSource,
) -> PartResolution {
    let gap = packet.is_physical() && roll_gap(armour, constants, draws);
    if gap {
        debug!("armour gap found");
    }

    let armour_result = if gap {
        StackResult {
            layers: Vec::new(),
            exit: Some(packet),
        }
    } else {
        resolve_stack(packet, &armour.layers, constants)
    };

    let tissue_result = armour_result
        .exit
        .map(|entering| resolve_stack(entering, tissue, constants));

    PartResolution {
        gap,
        armour: armour_result,
        tissue: tissue_result,
    }
}
