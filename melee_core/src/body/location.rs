//! Weighted hit-location selection

use super::plan::Height;
use super::state::Body;
use crate::config::LocationConstants;
use crate::rng::{DrawSource, StreamId};

/// The defender's guard as seen by the location selector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guard {
    pub height: Height,
    pub covers_adjacent: bool,
}

/// Heights an attack aims at and the guard it meets
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocationRequest {
    pub primary: Option<Height>,
    pub secondary: Option<Height>,
    pub guard: Option<Guard>,
}

/// Height multiplier for a part at `height`
pub fn height_weight(height: Height, request: &LocationRequest, constants: &LocationConstants) -> f64 {
    let mut weight = match request.primary {
        None => 1.0,
        Some(primary) if primary == height => constants.primary_match,
        Some(_) if request.secondary == Some(height) => constants.secondary_match,
        Some(primary) if primary.is_adjacent(height) => constants.adjacent,
        Some(_) => constants.other,
    };

    if let Some(guard) = request.guard {
        if guard.height == height {
            weight *= constants.guarded_exact;
        } else if guard.covers_adjacent && guard.height.is_adjacent(height) {
            weight *= constants.guarded_adjacent;
        }
    }
    weight
}

/// Selection weight of every attached part, as `(part index, weight)`
pub fn location_weights(
    body: &Body,
    request: &LocationRequest,
    constants: &LocationConstants,
) -> Vec<(usize, f64)> {
    let plan = body.plan();
    body.attached_parts()
        .into_iter()
        .map(|i| {
            let part = &plan.parts[i];
            let weight = part.exposure.max(0.0) * height_weight(part.height, request, constants);
            (i, weight)
        })
        .collect()
}

/// Pick the struck part with one combat draw
///
/// Falls back to the torso when nothing is selectable. Returns `None` only
/// for a body with no attached torso and nothing else to hit.
pub fn select_hit_location(
    body: &Body,
    request: &LocationRequest,
    constants: &LocationConstants,
    draws: &mut impl DrawSource,
) -> Option<usize> {
    let weights = location_weights(body, request, constants);
    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    let roll = draws.draw(StreamId::Combat);

    if total > 0.0 {
        let mut target = roll * total;
        for (index, weight) in &weights {
            if *weight <= 0.0 {
                continue;
            }
            if target < *weight {
                return Some(*index);
            }
            target -= weight;
        }
        // Float drift past the last bucket
        if let Some((index, _)) = weights.iter().rev().find(|(_, w)| *w > 0.0) {
            return Some(*index);
        }
    }

    body.plan().torso_index().filter(|i| body.is_attached(*i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BodyPartDef, BodyPlan, PartFlags, PartGeometry, PartTag, Side};
    use crate::rng::ScriptedDraws;

    fn part(name: &str, tag: PartTag, height: Height) -> BodyPartDef {
        BodyPartDef {
            name: name.to_string(),
            tag,
            side: Side::Center,
            parent: if tag == PartTag::Torso { None } else { Some("torso".to_string()) },
            tissue: "limb".to_string(),
            has_major_artery: false,
            flags: PartFlags::default(),
            geometry: PartGeometry::default(),
            height,
            exposure: 1.0,
        }
    }

    fn body() -> Body {
        Body::new(&BodyPlan {
            id: "test".to_string(),
            parts: vec![
                part("torso", PartTag::Torso, Height::Mid),
                part("head", PartTag::Head, Height::High),
                part("leg", PartTag::Leg, Height::Low),
            ],
        })
    }

    #[test]
    fn test_height_weights() {
        let c = LocationConstants::default();
        let request = LocationRequest {
            primary: Some(Height::High),
            secondary: Some(Height::Low),
            guard: None,
        };

        assert_eq!(height_weight(Height::High, &request, &c), 2.0);
        assert_eq!(height_weight(Height::Low, &request, &c), 1.0);
        assert_eq!(height_weight(Height::Mid, &request, &c), 0.5);
    }

    #[test]
    fn test_no_primary_is_flat() {
        let c = LocationConstants::default();
        let request = LocationRequest::default();
        assert_eq!(height_weight(Height::Low, &request, &c), 1.0);
        assert_eq!(height_weight(Height::High, &request, &c), 1.0);
    }

    #[test]
    fn test_guard_reduces_weight() {
        let c = LocationConstants::default();
        let request = LocationRequest {
            primary: Some(Height::Mid),
            secondary: None,
            guard: Some(Guard {
                height: Height::Mid,
                covers_adjacent: true,
            }),
        };

        assert!((height_weight(Height::Mid, &request, &c) - 0.6).abs() < 1e-12);
        assert!((height_weight(Height::High, &request, &c) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_selection_follows_roll() {
        let c = LocationConstants::default();
        let body = body();
        let request = LocationRequest {
            primary: Some(Height::Mid),
            secondary: None,
            guard: None,
        };
        // Weights: torso 2.0, head 0.5, leg 0.5 -> total 3.0
        let pick = |roll| select_hit_location(&body, &request, &c, &mut ScriptedDraws::constant(roll));

        assert_eq!(pick(0.0), Some(0));
        assert_eq!(pick(0.7), Some(1));
        assert_eq!(pick(0.9), Some(2));
    }

    #[test]
    fn test_severed_parts_excluded() {
        let c = LocationConstants::default();
        let mut body = body();
        body.sever(1);

        let weights = location_weights(&body, &LocationRequest::default(), &c);
        assert!(weights.iter().all(|(i, _)| *i != 1));
    }

    #[test]
    fn test_falls_back_to_torso() {
        let c = LocationConstants::default();
        let body = body();
        let zero = LocationConstants {
            primary_match: 0.0,
            secondary_match: 0.0,
            adjacent: 0.0,
            other: 0.0,
            ..c
        };
        let request = LocationRequest {
            primary: Some(Height::Mid),
            secondary: None,
            guard: None,
        };
        let picked = select_hit_location(&body, &request, &zero, &mut ScriptedDraws::constant(0.5));
        assert_eq!(picked, Some(0));
    }
}
