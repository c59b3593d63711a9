//! Prelude module for convenient imports
//!
//! ```rust
//! use melee_core::prelude::*;
//! ```

// Agents and bodies
pub use crate::agent::{Agent, ConditionKind, DeclaredAction, SpeciesDefinition, StatBlock, Stance};
pub use crate::body::{Body, BodyPlan, Height};

// Damage
pub use crate::damage::{Axes, DamagePacket, Technique, Weapon};
pub use crate::wound::Severity;

// Resolution
pub use crate::advantage::EngagementTable;
pub use crate::combat::{resolve_attack, AttackRequest, AttackResolution, ResolutionMode};
pub use crate::outcome::{ContestTier, RollMode};

// Events and randomness
pub use crate::events::{CombatEvent, EventBuffer, EventSink};
pub use crate::rng::{DrawSource, RandomStreams, ScriptedDraws, StreamId};

// Config
pub use crate::config::{default_content, default_tuning, CombatTuning, Content};

pub use crate::types::{AgentId, DamageKind, Outcome, Stakes};
