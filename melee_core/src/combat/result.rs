//! AttackResolution - What one attack did

use crate::advantage::AdvantageEffect;
use crate::damage::DamagePacket;
use crate::events::OutcomeDetail;
use crate::layers::PartResolution;
use crate::outcome::RollMode;
use crate::types::{Outcome, Stakes};

/// Which outcome resolver decides the attack
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolutionMode {
    #[default]
    HitChance,
    Contested(RollMode),
}

/// One attack declared by the attacker
#[derive(Debug, Clone, PartialEq)]
pub struct AttackRequest {
    pub technique_id: String,
    pub stakes: Stakes,
    pub mode: ResolutionMode,
    /// Time point used for overlays and condition expiry
    pub tick: u64,
}

impl AttackRequest {
    pub fn new(technique_id: impl Into<String>, stakes: Stakes) -> Self {
        AttackRequest {
            technique_id: technique_id.into(),
            stakes,
            mode: ResolutionMode::default(),
            tick: 0,
        }
    }

    pub fn with_mode(mut self, mode: ResolutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn at_tick(mut self, tick: u64) -> Self {
        self.tick = tick;
        self
    }
}

/// Result of a resolved attack
#[derive(Debug, Clone, PartialEq)]
pub struct AttackResolution {
    // === Outcome ===
    pub outcome: Outcome,
    pub detail: OutcomeDetail,

    // === Damage ===
    /// Packet as derived; `None` unless the attack hit
    pub packet: Option<DamagePacket>,
    /// Struck part name
    pub part: Option<String>,
    /// Armour and tissue walk; `None` for non-physical packets
    pub layers: Option<PartResolution>,
    pub severed: bool,

    // === Advantage ===
    /// Effect after overrides and stakes scaling
    pub advantage: AdvantageEffect,
}

impl AttackResolution {
    pub fn is_hit(&self) -> bool {
        self.outcome.is_hit()
    }
}
