//! Structured combat events and the double-buffered sink they land in

use crate::advantage::AdvantageAxis;
use crate::agent::ConditionKind;
use crate::damage::DamagePacket;
use crate::outcome::ContestTier;
use crate::types::{AgentId, Outcome};
use crate::wound::Severity;
use serde::{Deserialize, Serialize};

/// How an outcome was decided
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutcomeDetail {
    HitChance { chance: f64, roll: f64 },
    Contested { margin: f64, tier: ContestTier },
}

/// Full lifecycle of a physical packet through armour and tissue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacketRecord {
    pub attacker: AgentId,
    pub defender: AgentId,
    pub part: String,
    /// Packet as derived, before any armour
    pub pre_armour: DamagePacket,
    /// Packet entering the tissue stack
    pub post_armour: DamagePacket,
    /// Whether the armour gap check let the packet skip the armour stack
    pub gap: bool,
    pub armour_layers: usize,
    /// Tissue layers that took any part of the packet
    pub tissue_layers_reached: usize,
    /// Whether the packet passed all the way through the part
    pub passed_through: bool,
}

/// One record per meaningful resolution step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CombatEvent {
    OutcomeResolved {
        attacker: AgentId,
        defender: AgentId,
        technique_id: String,
        outcome: Outcome,
        detail: OutcomeDetail,
    },
    EngagementChanged {
        attacker: AgentId,
        defender: AgentId,
        axis: AdvantageAxis,
        old: f64,
        new: f64,
    },
    BalanceChanged {
        agent: AgentId,
        old: f64,
        new: f64,
    },
    ConditionApplied {
        agent: AgentId,
        condition: ConditionKind,
        expires_at: u64,
    },
    ConditionExpired {
        agent: AgentId,
        condition: ConditionKind,
    },
    PacketResolved(PacketRecord),
    WoundInflicted {
        agent: AgentId,
        part: String,
        severity: Severity,
        severed: bool,
    },
    DirectDamage {
        agent: AgentId,
        packet: DamagePacket,
    },
}

/// Append-only destination for events
pub trait EventSink {
    fn push(&mut self, event: CombatEvent);
}

impl EventSink for Vec<CombatEvent> {
    fn push(&mut self, event: CombatEvent) {
        Vec::push(self, event);
    }
}

/// Double-buffered event queue
///
/// Producers write to the current buffer. The owner calls [`swap`] at a
/// frame boundary, after which the previous frame's events are readable via
/// [`readable`] or [`drain`] while new events accumulate in the other buffer.
///
/// [`swap`]: EventBuffer::swap
/// [`readable`]: EventBuffer::readable
/// [`drain`]: EventBuffer::drain
#[derive(Debug, Clone, Default)]
pub struct EventBuffer {
    buffers: [Vec<CombatEvent>; 2],
    current: usize,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events written since the last swap
    pub fn pending(&self) -> &[CombatEvent] {
        &self.buffers[self.current]
    }

    /// Events from before the last swap
    pub fn readable(&self) -> &[CombatEvent] {
        &self.buffers[1 - self.current]
    }

    /// Flip buffers; the new write buffer starts empty
    pub fn swap(&mut self) {
        self.current = 1 - self.current;
        self.buffers[self.current].clear();
    }

    /// Take all readable events
    pub fn drain(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.buffers[1 - self.current])
    }
}

impl EventSink for EventBuffer {
    fn push(&mut self, event: CombatEvent) {
        self.buffers[self.current].push(event);
    }
}
