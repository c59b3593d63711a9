#![allow(dead_code)]

use melee_core::body::{location_weights, Guard, LocationRequest};
use melee_core::prelude::*;

pub fn humanoid(content: &Content, id: u32) -> Agent {
    let plan = content.body_plan("humanoid").unwrap();
    Agent::new(AgentId(id), Body::new(plan))
}

/// Attacker and defender, engaged
pub fn duel(content: &Content) -> (Agent, Agent, EngagementTable) {
    let attacker = humanoid(content, 1);
    let defender = humanoid(content, 2);
    let mut table = EngagementTable::new();
    table.engage(attacker.id, defender.id);
    (attacker, defender, table)
}

/// Location draw that lands `technique` on the named part of `defender`
pub fn roll_for_part(
    content: &Content,
    tuning: &CombatTuning,
    technique_id: &str,
    defender: &Agent,
    part: &str,
) -> f64 {
    let technique = content.technique(technique_id).unwrap();
    let guard = defender
        .defense
        .as_deref()
        .and_then(|id| content.technique(id))
        .and_then(|t| t.defense.as_ref())
        .and_then(|d| {
            d.guard_height.map(|height| Guard {
                height,
                covers_adjacent: d.covers_adjacent,
            })
        });
    let request = LocationRequest {
        primary: technique.target_height,
        secondary: technique.secondary_height,
        guard,
    };

    let target = defender.body.plan().index_of(part).unwrap();
    let weights = location_weights(&defender.body, &request, &tuning.location);
    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    let mut before = 0.0;
    for (index, weight) in &weights {
        if *index == target {
            return (before + weight / 2.0) / total;
        }
        before += weight;
    }
    panic!("part {} is not selectable", part);
}

/// Worst severity over the defender's parts
pub fn worst_severity(agent: &Agent) -> Severity {
    (0..agent.body.part_count())
        .filter_map(|i| agent.body.state(i))
        .map(|s| s.severity())
        .max()
        .unwrap_or(Severity::None)
}
