//! Per-agent body state: wounds and severed parts

use super::plan::BodyPlan;
use crate::wound::{LayerWound, Severity};
use serde::{Deserialize, Serialize};

/// Wound state of one part
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartState {
    /// Indexed like the part's tissue template layers
    pub layers: Vec<LayerWound>,
    pub severed: bool,
    /// Depth edges have cut into the part so far
    #[serde(default)]
    pub cut_depth_cm: f64,
}

impl PartState {
    /// Worst layer severity; a severed part counts as missing
    pub fn severity(&self) -> Severity {
        if self.severed {
            return Severity::Missing;
        }
        self.layers
            .iter()
            .map(|l| l.severity)
            .max()
            .unwrap_or(Severity::None)
    }

    /// Deepen the cut, capped at the part's thickness
    pub fn add_cut(&mut self, depth_cm: f64, thickness_cm: f64) {
        self.cut_depth_cm = (self.cut_depth_cm + depth_cm.max(0.0)).min(thickness_cm.max(0.0));
    }

    /// Total destroyed volume over all layers
    pub fn destroyed_volume(&self) -> f64 {
        self.layers.iter().map(|l| l.volume).sum()
    }

    /// Wound record for a layer, created on first hit
    pub fn layer_mut(&mut self, index: usize) -> &mut LayerWound {
        if self.layers.len() <= index {
            self.layers.resize(index + 1, LayerWound::default());
        }
        &mut self.layers[index]
    }
}

/// A body plan instance with its wounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    plan: BodyPlan,
    parts: Vec<PartState>,
}

impl Body {
    pub fn new(plan: &BodyPlan) -> Self {
        Body {
            plan: plan.clone(),
            parts: vec![PartState::default(); plan.parts.len()],
        }
    }

    pub fn plan(&self) -> &BodyPlan {
        &self.plan
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn state(&self, index: usize) -> Option<&PartState> {
        self.parts.get(index)
    }

    pub fn state_mut(&mut self, index: usize) -> Option<&mut PartState> {
        self.parts.get_mut(index)
    }

    pub fn state_by_name(&self, name: &str) -> Option<&PartState> {
        self.plan.index_of(name).and_then(|i| self.parts.get(i))
    }

    /// Whether a part is still attached: neither it nor an ancestor is severed
    pub fn is_attached(&self, index: usize) -> bool {
        if index >= self.parts.len() {
            return false;
        }
        !self
            .parts
            .iter()
            .enumerate()
            .any(|(i, state)| state.severed && self.plan.is_within(index, i))
    }

    /// Indices of every attached part
    pub fn attached_parts(&self) -> Vec<usize> {
        (0..self.parts.len()).filter(|i| self.is_attached(*i)).collect()
    }

    pub fn sever(&mut self, index: usize) {
        if let Some(state) = self.parts.get_mut(index) {
            state.severed = true;
        }
    }

    /// Every seeing part is disabled, worse, or gone
    ///
    /// A plan with no seeing parts is never blind.
    pub fn is_blind(&self) -> bool {
        let mut seeing = self
            .plan
            .parts
            .iter()
            .enumerate()
            .filter(|(_, p)| p.flags.see)
            .peekable();
        if seeing.peek().is_none() {
            return false;
        }
        seeing.all(|(i, _)| {
            !self.is_attached(i) || self.parts[i].severity() >= Severity::Disabled
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BodyPartDef, Height, PartFlags, PartGeometry, PartTag, Side};

    fn part(name: &str, tag: PartTag, parent: Option<&str>, see: bool) -> BodyPartDef {
        BodyPartDef {
            name: name.to_string(),
            tag,
            side: Side::Center,
            parent: parent.map(str::to_string),
            tissue: "limb".to_string(),
            has_major_artery: false,
            flags: PartFlags {
                see,
                ..Default::default()
            },
            geometry: PartGeometry::default(),
            height: Height::Mid,
            exposure: 1.0,
        }
    }

    fn body() -> Body {
        Body::new(&BodyPlan {
            id: "test".to_string(),
            parts: vec![
                part("torso", PartTag::Torso, None, false),
                part("head", PartTag::Head, Some("torso"), false),
                part("left_eye", PartTag::Eye, Some("head"), true),
                part("right_eye", PartTag::Eye, Some("head"), true),
            ],
        })
    }

    fn disable(body: &mut Body, index: usize) {
        if let Some(state) = body.state_mut(index) {
            state.layer_mut(0).severity = Severity::Disabled;
        }
    }

    #[test]
    fn test_severed_parent_detaches_children() {
        let mut body = body();
        body.sever(1);

        assert!(!body.is_attached(1));
        assert!(!body.is_attached(2));
        assert!(body.is_attached(0));
        assert_eq!(body.attached_parts(), vec![0]);
    }

    #[test]
    fn test_blind_needs_all_eyes() {
        let mut body = body();
        assert!(!body.is_blind());

        disable(&mut body, 2);
        assert!(!body.is_blind());

        disable(&mut body, 3);
        assert!(body.is_blind());
    }

    #[test]
    fn test_severed_head_blinds() {
        let mut body = body();
        body.sever(1);
        assert!(body.is_blind());
    }

    #[test]
    fn test_part_severity_is_worst_layer() {
        let mut body = body();
        if let Some(state) = body.state_mut(0) {
            state.layer_mut(0).severity = Severity::Minor;
            state.layer_mut(3).severity = Severity::Broken;
            assert_eq!(state.layers.len(), 4);
        }
        assert_eq!(body.state(0).map(|s| s.severity()), Some(Severity::Broken));
    }

    #[test]
    fn test_cut_depth_capped_at_thickness() {
        let mut state = PartState::default();
        state.add_cut(1.5, 2.0);
        assert!((state.cut_depth_cm - 1.5).abs() < f64::EPSILON);

        state.add_cut(1.5, 2.0);
        assert!((state.cut_depth_cm - 2.0).abs() < f64::EPSILON);

        state.add_cut(-3.0, 2.0);
        assert!((state.cut_depth_cm - 2.0).abs() < f64::EPSILON);
    }
}
