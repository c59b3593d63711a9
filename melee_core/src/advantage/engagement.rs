//! Pairwise engagement records

use crate::types::AgentId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One axis of an engagement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvantageAxis {
    Pressure,
    Control,
    Position,
}

impl AdvantageAxis {
    pub fn all() -> &'static [AdvantageAxis] {
        &[
            AdvantageAxis::Pressure,
            AdvantageAxis::Control,
            AdvantageAxis::Position,
        ]
    }
}

/// Engagement between two agents, each axis in [0, 1] with 0.5 neutral
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Engagement {
    pub pressure: f64,
    pub control: f64,
    pub position: f64,
}

impl Default for Engagement {
    fn default() -> Self {
        Engagement {
            pressure: 0.5,
            control: 0.5,
            position: 0.5,
        }
    }
}

impl Engagement {
    pub fn get(&self, axis: AdvantageAxis) -> f64 {
        match axis {
            AdvantageAxis::Pressure => self.pressure,
            AdvantageAxis::Control => self.control,
            AdvantageAxis::Position => self.position,
        }
    }

    fn slot(&mut self, axis: AdvantageAxis) -> &mut f64 {
        match axis {
            AdvantageAxis::Pressure => &mut self.pressure,
            AdvantageAxis::Control => &mut self.control,
            AdvantageAxis::Position => &mut self.position,
        }
    }

    /// The same engagement from the other side
    pub fn flipped(&self) -> Engagement {
        Engagement {
            pressure: 1.0 - self.pressure,
            control: 1.0 - self.control,
            position: 1.0 - self.position,
        }
    }

    /// Mean of the three axes
    pub fn advantage(&self) -> f64 {
        (self.pressure + self.control + self.position) / 3.0
    }
}

/// Result of changing one axis, from the acting agent's point of view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisChange {
    pub axis: AdvantageAxis,
    pub old: f64,
    pub new: f64,
}

impl AxisChange {
    pub fn changed(&self) -> bool {
        self.old != self.new
    }
}

/// All active engagements
///
/// Each pair is stored once under its sorted ids, with values from the lower
/// id's point of view. Reads and writes take the acting agent's id and flip
/// as needed.
#[derive(Debug, Clone, Default)]
pub struct EngagementTable {
    records: HashMap<(AgentId, AgentId), Engagement>,
}

fn key(a: AgentId, b: AgentId) -> (AgentId, AgentId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl EngagementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a neutral engagement; an existing one is kept
    pub fn engage(&mut self, a: AgentId, b: AgentId) {
        self.records.entry(key(a, b)).or_default();
    }

    pub fn disengage(&mut self, a: AgentId, b: AgentId) -> bool {
        self.records.remove(&key(a, b)).is_some()
    }

    pub fn is_engaged(&self, a: AgentId, b: AgentId) -> bool {
        self.records.contains_key(&key(a, b))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Engagement as `viewer` sees it against `other`
    pub fn view(&self, viewer: AgentId, other: AgentId) -> Option<Engagement> {
        let stored = self.records.get(&key(viewer, other))?;
        if viewer <= other {
            Some(*stored)
        } else {
            Some(stored.flipped())
        }
    }

    /// Shift one axis in `viewer`'s favor by `delta`, clamped to [0, 1]
    pub fn shift(
        &mut self,
        viewer: AgentId,
        other: AgentId,
        axis: AdvantageAxis,
        delta: f64,
    ) -> Option<AxisChange> {
        let stored = self.records.get_mut(&key(viewer, other))?;
        let as_lower = viewer <= other;
        let slot = stored.slot(axis);

        let view = |v: f64| if as_lower { v } else { 1.0 - v };
        let old = view(*slot);
        let new = (old + delta).clamp(0.0, 1.0);
        *slot = view(new);

        Some(AxisChange {
            axis,
            old,
            new: view(*slot),
        })
    }
}
