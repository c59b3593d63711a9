//! Packet derivation from technique, weapon, attacker and stakes

use super::packet::{Axes, DamagePacket};
use super::scaling::{mass_scale, velocity_scale};
use super::technique::Technique;
use super::weapon::OffensiveProfile;
use crate::agent::StatBlock;
use crate::config::CombatTuning;
use crate::types::Stakes;
use tracing::debug;

/// Derive the packet for a landed strike
///
/// `amount_mult` carries creation-time multipliers such as an offensive
/// overlay or a contested-roll tier. Returns `None` if the technique deals
/// no damage.
pub fn derive_packet(
    technique: &Technique,
    profile: &OffensiveProfile,
    stats: &StatBlock,
    stakes: Stakes,
    amount_mult: f64,
    tuning: &CombatTuning,
) -> Option<DamagePacket> {
    let kind = technique.primary_kind()?;
    let scaling = &tuning.stat_scaling;
    let stakes_mult = tuning.stakes.get(stakes).damage_mult;

    let amount = technique.base_damage()
        * technique.damage.scaling.multiplier(stats, scaling)
        * profile.damage_modifier
        * stakes_mult
        * amount_mult;

    if !kind.is_physical() {
        let packet = DamagePacket::non_physical(amount, kind);
        debug!(technique = %technique.id, ?kind, amount, "derived non-physical packet");
        return Some(packet);
    }

    let bias = &technique.axis_bias;
    let velocity = velocity_scale(stats, scaling);
    let mass = mass_scale(stats, scaling);

    let axes = Axes {
        geometry: profile.geometry_coeff * bias.geometry_mult,
        energy: profile.reference_energy
            * velocity
            * velocity
            * mass
            * stakes_mult
            * bias.energy_mult,
        rigidity: profile.rigidity_coeff * bias.rigidity_mult,
    };
    let penetration = profile.penetration_cm * bias.geometry_mult;

    let packet = DamagePacket::new(amount, kind, penetration, axes);
    debug!(
        technique = %technique.id,
        ?kind,
        amount,
        geometry = axes.geometry,
        energy = axes.energy,
        rigidity = axes.rigidity,
        "derived packet"
    );
    Some(packet)
}
