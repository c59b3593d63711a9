//! Outcome resolution - does the attack land?
//!
//! Two interchangeable resolvers read the same [`AttackContext`]:
//! [`hit_chance`] rolls once against a single probability, [`contested`]
//! scores both sides and grades the margin.

mod context;
pub mod contested;
pub mod hit_chance;

pub use context::{AttackContext, DefenderContext};
pub use contested::{resolve_contested, ContestTier, ContestedResult, RollMode};
pub use hit_chance::{compute_hit_chance, resolve_hit_chance, HitChanceBreakdown, HitChanceResult};
