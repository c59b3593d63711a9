//! Damage system - packets and their derivation

mod derivation;
mod packet;
mod scaling;
mod technique;
mod weapon;

pub use derivation::derive_packet;
pub use packet::{Axes, DamagePacket};
pub use scaling::{
    group_value, mass_scale, stat_scaling_multiplier, velocity_scale, ScalingStats, StatScaling,
};
pub use technique::{
    AxisBias, DamageInstance, DefenseCoverage, DefenseMultipliers, OverlayBonus, Technique,
    TechniqueDamage,
};
pub use weapon::{OffensiveProfile, Weapon};
