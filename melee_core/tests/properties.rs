use melee_core::advantage::{apply_advantage, AdvantageAxis, AdvantageEffect};
use melee_core::config::{LayerConstants, TierThresholds, WoundConstants};
use melee_core::damage::{derive_packet, OffensiveProfile};
use melee_core::layers::{resolve_layer, AxisSusceptibility, MaterialLayer, Shielding, Susceptibility};
use melee_core::outcome::{compute_hit_chance, AttackContext};
use melee_core::prelude::*;
use melee_core::wound::{layer_severity, severity_from_volume};
use proptest::prelude::*;

fn any_stakes() -> impl Strategy<Value = Stakes> {
    prop_oneof![
        Just(Stakes::Probing),
        Just(Stakes::Guarded),
        Just(Stakes::Committed),
        Just(Stakes::Reckless),
    ]
}

fn physical_kind() -> impl Strategy<Value = DamageKind> {
    prop_oneof![
        Just(DamageKind::Pierce),
        Just(DamageKind::Slash),
        Just(DamageKind::Bludgeon),
        Just(DamageKind::Crush),
        Just(DamageKind::Shatter),
    ]
}

fn stat_block() -> impl Strategy<Value = StatBlock> {
    (0.0..10.0f64, 0.0..10.0f64, 0.0..10.0f64, 0.0..10.0f64).prop_map(|(power, speed, dexterity, fortitude)| {
        StatBlock {
            power,
            speed,
            dexterity,
            fortitude,
            ..StatBlock::default()
        }
    })
}

fn layer(shielding: Shielding, thresholds: (f64, f64, f64), thickness: f64) -> MaterialLayer {
    MaterialLayer {
        name: "layer".to_string(),
        shielding,
        susceptibility: Susceptibility {
            geometry: AxisSusceptibility::new(thresholds.0, 1.0),
            energy: AxisSusceptibility::new(thresholds.1, 0.02),
            rigidity: AxisSusceptibility::new(thresholds.2, 0.5),
        },
        thickness_cm: thickness,
        durability: 0.0,
        structural: false,
    }
}

fn blank_agent(id: u32) -> Agent {
    let plan = BodyPlan {
        id: "blank".to_string(),
        parts: Vec::new(),
    };
    Agent::new(AgentId(id), Body::new(&plan))
}

proptest! {
    #[test]
    fn prop_stakes_never_reduce_damage(stats in stat_block()) {
        let content = default_content();
        let tuning = default_tuning();
        for (technique_id, weapon_id) in [("thrust", "spear"), ("swing", "arming_sword"), ("overhead_smash", "mace")] {
            let technique = content.technique(technique_id).unwrap();
            let profile = content.weapon(weapon_id).unwrap().profile(technique.attack_mode).unwrap();

            let packets: Vec<DamagePacket> = Stakes::all()
                .iter()
                .map(|s| derive_packet(technique, profile, &stats, *s, 1.0, &tuning).unwrap())
                .collect();
            for pair in packets.windows(2) {
                prop_assert!(pair[0].amount() <= pair[1].amount());
                prop_assert!(pair[0].energy() <= pair[1].energy());
            }
        }
    }

    #[test]
    fn prop_non_physical_packets_carry_no_axes(
        amount in 0.0..100.0f64,
        penetration in 0.0..20.0f64,
        g in 0.0..2.0f64,
        e in 0.0..500.0f64,
    ) {
        for kind in [DamageKind::Fire, DamageKind::Frost, DamageKind::Shock, DamageKind::Corrosion] {
            let packet = DamagePacket::new(amount, kind, penetration, Axes::new(g, e, 1.0));
            prop_assert_eq!(packet.axes(), Axes::zero());
            prop_assert_eq!(packet.penetration(), 0.0);
        }
    }

    #[test]
    fn prop_residuals_within_incoming(
        kind in physical_kind(),
        g in 0.0..2.0f64,
        e in 0.0..500.0f64,
        r in 0.0..2.0f64,
        penetration in 0.0..20.0f64,
        deflection in 0.0..1.0f64,
        absorption in 0.0..1.0f64,
        dispersion in 0.0..1.0f64,
        thickness in 0.0..5.0f64,
    ) {
        let packet = DamagePacket::new(10.0, kind, penetration, Axes::new(g, e, r));
        let l = layer(Shielding::new(deflection, absorption, dispersion), (0.1, 5.0, 0.3), thickness);
        let result = resolve_layer(&packet, &l, &LayerConstants::default());
        let out = result.residual;

        prop_assert!((0.0..=g).contains(&out.geometry()));
        prop_assert!((0.0..=e).contains(&out.energy()));
        prop_assert!((0.0..=r).contains(&out.rigidity()));
        prop_assert!(out.amount() <= packet.amount());
    }

    #[test]
    fn prop_no_self_damage_under_threshold(
        kind in physical_kind(),
        g in 0.0..2.0f64,
        e in 0.0..500.0f64,
        r in 0.0..2.0f64,
        deflection in 0.0..1.0f64,
        absorption in 0.0..1.0f64,
        dispersion in 0.0..1.0f64,
        tg in 0.0..2.0f64,
        te in 0.0..500.0f64,
        tr in 0.0..2.0f64,
    ) {
        let packet = DamagePacket::new(10.0, kind, 5.0, Axes::new(g, e, r));
        let l = layer(Shielding::new(deflection, absorption, dispersion), (tg, te, tr), 1.0);
        let result = resolve_layer(&packet, &l, &LayerConstants::default());

        if g * (1.0 - deflection) <= tg {
            prop_assert_eq!(result.damage.geometry, 0.0);
        }
        if e * (1.0 - absorption) <= te {
            prop_assert_eq!(result.damage.energy, 0.0);
        }
        // Dispersion only shapes what the next layer sees
        if r <= tr {
            prop_assert_eq!(result.damage.rigidity, 0.0);
        }
    }

    #[test]
    fn prop_severity_caps(volume in 0.0..20.0f64, depth in 0.0..5.0f64) {
        let c = WoundConstants::default();

        prop_assert!(layer_severity(volume, depth, false, &c) <= Severity::Disabled);

        let structural = layer_severity(volume, depth, true, &c);
        if structural == Severity::Missing {
            prop_assert!(severity_from_volume(volume, true, &c) >= Severity::Broken);
        }
    }

    #[test]
    fn prop_hit_chance_always_clamped(
        difficulty in -10.0..10.0f64,
        accuracy in -10.0..10.0f64,
        balance in -2.0..2.0f64,
        to_hit in -5.0..5.0f64,
        defender_balance in -2.0..2.0f64,
        dodge in -5.0..5.0f64,
        stakes in any_stakes(),
    ) {
        let tuning = default_tuning();
        let mut technique = default_content().technique("thrust").unwrap().clone();
        technique.difficulty = difficulty;
        let profile = OffensiveProfile {
            accuracy,
            damage_modifier: 1.0,
            reference_energy: 80.0,
            geometry_coeff: 0.8,
            rigidity_coeff: 0.7,
            penetration_cm: 6.0,
        };

        let mut ctx = AttackContext::new(&technique, &profile, stakes);
        ctx.balance = balance;
        ctx.overlay.to_hit_bonus = to_hit;
        ctx.defender.balance = defender_balance;
        ctx.defender.dodge_modifier = dodge;
        ctx.conditions = vec![ConditionKind::Blinded, ConditionKind::Winded];

        let chance = compute_hit_chance(&ctx, &tuning).chance;
        prop_assert!((0.05..=0.95).contains(&chance));
    }

    #[test]
    fn prop_tier_monotone_in_margin(a in -2.0..2.0f64, b in -2.0..2.0f64) {
        let t = TierThresholds::default();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(ContestTier::from_margin(low, &t) <= ContestTier::from_margin(high, &t));
    }

    #[test]
    fn prop_advantage_stays_in_unit_interval(
        deltas in proptest::collection::vec((-2.0..2.0f64, -2.0..2.0f64, -2.0..2.0f64, -2.0..2.0f64, -2.0..2.0f64), 1..8),
    ) {
        let mut attacker = blank_agent(1);
        let mut defender = blank_agent(2);
        let mut table = EngagementTable::new();
        table.engage(attacker.id, defender.id);
        let mut events = Vec::new();

        for (pressure, control, position, self_balance, target_balance) in deltas {
            let effect = AdvantageEffect { pressure, control, position, self_balance, target_balance };
            prop_assert!(apply_advantage(&effect, &mut attacker, &mut defender, &mut table, &mut events));

            let view = table.view(attacker.id, defender.id).unwrap();
            for axis in AdvantageAxis::all() {
                prop_assert!((0.0..=1.0).contains(&view.get(*axis)));
            }
            prop_assert!((0.0..=1.0).contains(&attacker.balance()));
            prop_assert!((0.0..=1.0).contains(&defender.balance()));
        }
    }
}
