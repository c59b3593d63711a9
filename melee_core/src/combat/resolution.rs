//! Attack resolution - Run one attack from declaration to events

use super::result::{AttackRequest, AttackResolution, ResolutionMode};
use crate::advantage::{advantage_effect, apply_advantage, EngagementTable};
use crate::agent::{Agent, ConditionKind};
use crate::body::{select_hit_location, BodyPartDef, Guard, LocationRequest};
use crate::config::{CombatTuning, Content, ResourceConstants};
use crate::damage::{derive_packet, DamagePacket};
use crate::events::{CombatEvent, EventSink, OutcomeDetail, PacketRecord};
use crate::layers::{resolve_part, PartResolution};
use crate::outcome::{resolve_contested, resolve_hit_chance, AttackContext, DefenderContext};
use crate::rng::{DrawSource, StreamId};
use crate::types::{AgentId, ContactShape, Outcome};
use crate::wound::{is_severed, is_through, Severity};
use tracing::debug;

/// Resolve one attack of `attacker` against `defender`
///
/// Returns `None` without touching any state when the technique, the
/// attacker's weapon (held in an attached hand, or a natural weapon whose part
/// remains), the weapon's profile for the technique's attack mode or the
/// pair's engagement record is missing, or when the technique deals no
/// damage. Otherwise:
/// 1. Expires stored conditions on both agents
/// 2. Resolves the outcome with the requested resolver
/// 3. On a hit, derives the packet and picks the struck part
/// 4. Walks physical packets through armour and tissue and records wounds,
///    severing and resource loss; non-physical packets hit resources directly
/// 5. Spends the attacker's stamina and applies the advantage effect
///
/// Events are collected locally and handed to `sink` at the end.
pub fn resolve_attack(
    content: &Content,
    tuning: &CombatTuning,
    attacker: &mut Agent,
    defender: &mut Agent,
    engagements: &mut EngagementTable,
    request: &AttackRequest,
    draws: &mut impl DrawSource,
    sink: &mut impl EventSink,
) -> Option<AttackResolution> {
    // Step 1: Look everything up before mutating anything
    let technique = content.technique(&request.technique_id)?;
    technique.primary_kind()?;
    let weapon = attacker.strike_weapon(content)?;
    let profile = weapon.profile(technique.attack_mode)?;
    let engagement = engagements.view(attacker.id, defender.id)?;

    let defense = defender
        .defense
        .as_deref()
        .and_then(|id| content.technique(id))
        .and_then(|t| t.defense.as_ref());
    let defender_parry = defender.strike_weapon(content).map_or(0.0, |w| w.parry);

    let mut events: Vec<CombatEvent> = Vec::new();
    let tick = request.tick;

    // Step 2: Expire stored conditions
    expire_conditions(attacker, tick, &mut events);
    expire_conditions(defender, tick, &mut events);

    // Step 3: Build the context from current state
    let overlay = attacker.active_overlay(content, tick);
    let ctx = AttackContext {
        technique,
        profile,
        stakes: request.stakes,
        engagement,
        balance: attacker.balance(),
        conditions: attacker.conditions(&tuning.resources),
        effectiveness: attacker.combat_effectiveness(tuning),
        overlay,
        stance_weight: attacker.stance.attack,
        defender: DefenderContext {
            defense,
            effectiveness: defender.combat_effectiveness(tuning),
            parry_rating: defender_parry,
            balance: defender.balance(),
            dodge_modifier: defender.dodge_modifier,
            conditions: defender.conditions(&tuning.resources),
            defense_bonus: defender.active_overlay(content, tick).defense_bonus,
            action: defender.action,
            stance_weight: defender.stance.defense,
        },
    };

    // Step 4: Outcome
    let (outcome, detail, tier_mult) = match request.mode {
        ResolutionMode::HitChance => {
            let result = resolve_hit_chance(&ctx, tuning, draws);
            let detail = OutcomeDetail::HitChance {
                chance: result.chance,
                roll: result.roll,
            };
            (result.outcome, detail, 1.0)
        }
        ResolutionMode::Contested(mode) => {
            let result = resolve_contested(&ctx, mode, tuning, draws);
            let detail = OutcomeDetail::Contested {
                margin: result.margin,
                tier: result.tier,
            };
            (result.outcome, detail, result.damage_mult)
        }
    };
    events.push(CombatEvent::OutcomeResolved {
        attacker: attacker.id,
        defender: defender.id,
        technique_id: technique.id.clone(),
        outcome,
        detail: detail.clone(),
    });

    let mut resolution = AttackResolution {
        outcome,
        detail,
        packet: None,
        part: None,
        layers: None,
        severed: false,
        advantage: advantage_effect(outcome, request.stakes, &technique.advantage, tuning),
    };

    // Step 5: Damage
    if outcome == Outcome::Hit {
        let amount_mult = overlay.damage_mult * tier_mult;
        if let Some(packet) =
            derive_packet(technique, profile, &attacker.stats, request.stakes, amount_mult, tuning)
                .map(|p| p.with_energy_scale(attacker.size.mass))
        {
            resolution.packet = Some(packet);
            if packet.is_physical() {
                let location = LocationRequest {
                    primary: technique.target_height,
                    secondary: technique.secondary_height,
                    guard: defense.and_then(|d| {
                        d.guard_height.map(|height| Guard {
                            height,
                            covers_adjacent: d.covers_adjacent,
                        })
                    }),
                };
                let struck = select_hit_location(&defender.body, &location, &tuning.location, draws);
                if let Some(index) = struck {
                    let part = defender.body.plan().parts[index].clone();
                    let armour = content.armour_stack(&defender.armour, &part);
                    let tissue = content.tissue_stack(&part).unwrap_or_default();
                    let layers = resolve_part(packet, &armour, &tissue, &tuning.layers, draws);

                    resolution.severed = apply_physical(
                        attacker.id,
                        defender,
                        index,
                        &part,
                        packet,
                        &layers,
                        tuning,
                        tick,
                        draws,
                        &mut events,
                    );
                    resolution.part = Some(part.name);
                    resolution.layers = Some(layers);
                }
            } else {
                apply_direct(defender, packet, tuning, tick, draws, &mut events);
            }
        }
    }

    // Step 6: Stamina and advantage
    attacker.resources.spend_stamina(technique.stamina_cost);
    apply_advantage(&resolution.advantage, attacker, defender, engagements, &mut events);

    debug!(
        attacker = %attacker.id,
        defender = %defender.id,
        technique = %technique.id,
        ?outcome,
        part = ?resolution.part,
        events = events.len(),
        "attack resolved"
    );

    for event in events {
        sink.push(event);
    }
    Some(resolution)
}

fn expire_conditions(agent: &mut Agent, tick: u64, events: &mut Vec<CombatEvent>) {
    for condition in agent.conditions.expire(tick) {
        events.push(CombatEvent::ConditionExpired {
            agent: agent.id,
            condition,
        });
    }
}

/// Record wounds, severing and resource loss from a walked packet
///
/// Returns whether the part was severed by this hit.
#[allow(clippy::too_many_arguments)]
fn apply_physical(
    attacker: AgentId,
    defender: &mut Agent,
    index: usize,
    part: &BodyPartDef,
    packet: DamagePacket,
    layers: &PartResolution,
    tuning: &CombatTuning,
    tick: u64,
    draws: &mut impl DrawSource,
    events: &mut Vec<CombatEvent>,
) -> bool {
    let id = defender.id;
    let post_armour = layers
        .post_armour()
        .or_else(|| layers.armour.layers.last().map(|l| l.residual))
        .unwrap_or(packet);

    events.push(CombatEvent::PacketResolved(PacketRecord {
        attacker,
        defender: id,
        part: part.name.clone(),
        pre_armour: packet,
        post_armour,
        gap: layers.gap,
        armour_layers: layers.armour.layers.len(),
        tissue_layers_reached: layers.tissue.as_ref().map_or(0, |t| t.layers.len()),
        passed_through: layers.passed_through(),
    }));

    let Some(tissue) = &layers.tissue else {
        return false;
    };
    let Some(state) = defender.body.state_mut(index) else {
        return false;
    };
    let Some(shape) = packet.kind().contact_shape() else {
        return false;
    };

    let mut volume = 0.0;
    let mut total = 0.0;
    for (i, layer) in tissue.layers.iter().enumerate() {
        volume += layer.damage.volume();
        total += layer.damage.total();

        let wound = state.layer_mut(i);
        let previous = wound.accumulate(&layer.damage, layer.structural, &tuning.wounds);
        if wound.severity > previous {
            events.push(CombatEvent::WoundInflicted {
                agent: id,
                part: part.name.clone(),
                severity: wound.severity,
                severed: false,
            });
        }
    }

    // Edges chop deeper with every hit that reaches the tissue with an edge left
    if shape == ContactShape::Edge {
        if let Some(entering) = layers.post_armour().filter(|p| p.geometry() > 0.0) {
            state.add_cut(entering.penetration(), part.geometry.thickness_cm);
        }
    }
    let through = is_through(
        shape,
        layers.passed_through(),
        state.cut_depth_cm,
        part.geometry.thickness_cm,
    );
    let severed = !state.severed
        && part.parent.is_some()
        && is_severed(
            through,
            state.destroyed_volume(),
            shape,
            part.tag.is_small(),
            &tuning.wounds.sever,
        );
    if severed {
        defender.body.sever(index);
        events.push(CombatEvent::WoundInflicted {
            agent: id,
            part: part.name.clone(),
            severity: Severity::Missing,
            severed: true,
        });
        debug!(agent = %id, part = %part.name, "part severed");
    }

    let c = &tuning.resources;
    let trauma_before = defender.resources.trauma;
    defender.resources.add_pain(total * c.pain_per_damage);
    if part.flags.vital {
        defender.resources.add_trauma(volume * c.trauma_per_vital_volume);
    }
    let bleed_mult = if part.has_major_artery {
        c.artery_bleed_mult
    } else {
        1.0
    };
    defender.resources.lose_blood(volume * c.blood_per_volume * bleed_mult);
    check_stun(defender, trauma_before, tick, c, draws, events);

    severed
}

/// Non-physical damage skips the layer walk and lands on resources
fn apply_direct(
    defender: &mut Agent,
    packet: DamagePacket,
    tuning: &CombatTuning,
    tick: u64,
    draws: &mut impl DrawSource,
    events: &mut Vec<CombatEvent>,
) {
    let c = &tuning.resources;
    let trauma_before = defender.resources.trauma;
    defender.resources.add_pain(packet.amount() * c.pain_per_damage);
    defender.resources.add_trauma(packet.amount() * c.trauma_per_direct);
    events.push(CombatEvent::DirectDamage {
        agent: defender.id,
        packet,
    });
    check_stun(defender, trauma_before, tick, c, draws, events);
}

/// Stun when trauma crosses the threshold on this hit
///
/// The duration draw comes from the effects stream, and only when a stun
/// lands with extra ticks configured.
fn check_stun(
    agent: &mut Agent,
    trauma_before: f64,
    tick: u64,
    c: &ResourceConstants,
    draws: &mut impl DrawSource,
    events: &mut Vec<CombatEvent>,
) {
    if trauma_before < c.stun_threshold && agent.resources.trauma >= c.stun_threshold {
        let extra = if c.stun_extra_ticks > 0 {
            let roll = draws.draw(StreamId::Effects);
            ((roll * (c.stun_extra_ticks + 1) as f64) as u64).min(c.stun_extra_ticks)
        } else {
            0
        };
        let expires_at = tick + c.stun_ticks + extra;
        agent.conditions.apply(ConditionKind::Stunned, expires_at);
        events.push(CombatEvent::ConditionApplied {
            agent: agent.id,
            condition: ConditionKind::Stunned,
            expires_at,
        });
    }
}
