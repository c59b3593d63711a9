//! Combat resolution - One attack through outcome, damage and advantage

mod resolution;
mod result;

pub use resolution::resolve_attack;
pub use result::{AttackRequest, AttackResolution, ResolutionMode};
