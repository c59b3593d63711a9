//! melee_core - Deterministic combat resolution for turn-based melee
//!
//! This library provides:
//! - Damage packets: technique + weapon + attacker + stakes into amount,
//!   kind, penetration and geometry/energy/rigidity
//! - Layer resolution: armour then tissue, shielding then susceptibility
//! - Wounds: per-layer severity and severing
//! - Outcome resolution: single hit chance or contested rolls
//! - Advantage: pairwise engagement and agent balance
//! - Combat: the whole attack as one call, reported through events

pub mod advantage;
pub mod agent;
pub mod body;
pub mod combat;
pub mod config;
pub mod damage;
pub mod events;
pub mod layers;
pub mod outcome;
pub mod prelude;
pub mod rng;
pub mod types;
pub mod wound;

// Re-export core types for convenience
pub use advantage::{AdvantageEffect, Engagement, EngagementTable};
pub use agent::{Agent, ConditionKind, StatBlock};
pub use body::{Body, BodyPlan};
pub use combat::{resolve_attack, AttackRequest, AttackResolution, ResolutionMode};
pub use config::{default_content, default_tuning, CombatTuning, ConfigError, Content};
pub use damage::{DamagePacket, Technique, Weapon};
pub use events::{CombatEvent, EventBuffer, EventSink};
pub use rng::{DrawSource, RandomStreams, ScriptedDraws, StreamId};
pub use types::{AgentId, DamageKind, Outcome, Stakes};
pub use wound::Severity;
