//! Invariant sweeps across randomized operation sequences.
use degen_game::{Badge, FortuneSession, factory_cost, upgrade_cost};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

const SWEEP_SEEDS: [u64; 4] = [1337, 0xACED, 42, 9_001];
const OPS_PER_SWEEP: usize = 600;

fn assert_invariants(session: &FortuneSession, earned_so_far: &mut Vec<Badge>) {
    let gs = session.state();
    assert!(gs.balance >= 0, "balance went negative: {}", gs.balance);
    assert!(
        (1.0..=10.0).contains(&gs.volatility),
        "volatility left [1, 10]: {}",
        gs.volatility
    );
    assert!(gs.lore.len() <= 5, "lore window overflowed");
    assert!(gs.lore_total >= gs.lore.len() as u64);
    assert!(gs.click_yield >= 1.0);

    let unique: HashSet<Badge> = gs.achievements.iter().copied().collect();
    assert_eq!(
        unique.len(),
        gs.achievements.len(),
        "duplicate badge awarded"
    );
    // Badges are append-only: everything earned earlier must still be there.
    for badge in earned_so_far.iter() {
        assert!(gs.achievements.contains(badge), "badge {badge} was removed");
    }
    earned_so_far.clone_from(&gs.achievements);
}

#[test]
fn randomized_operation_sequences_hold_invariants() {
    for sweep_seed in SWEEP_SEEDS {
        let mut driver = SmallRng::seed_from_u64(sweep_seed);
        let mut session = FortuneSession::new(sweep_seed ^ 0x5EED);
        let factory_types = session.catalogs().factories.len();
        let mut earned = Vec::new();

        for _ in 0..OPS_PER_SWEEP {
            match driver.gen_range(0..7_u8) {
                0..=3 => {
                    session.click();
                }
                4 => {
                    session.tick();
                }
                5 => {
                    session.buy_upgrade();
                }
                _ => {
                    let idx = driver.gen_range(0..factory_types);
                    session.buy_factory(idx);
                }
            }
            assert_invariants(&session, &mut earned);
        }
    }
}

#[test]
fn purchases_below_cost_never_mutate_state() {
    for level in 0..8_u32 {
        let mut session = FortuneSession::new(1);
        let cost = upgrade_cost(level);
        session.with_state_mut(|gs| {
            gs.upgrade_level = level;
            gs.balance = cost - 1;
        });
        let before = session.state().clone();
        let result = session.buy_upgrade();
        assert!(result.outcome.is_none());
        assert_eq!(session.state(), &before);
    }

    let mut session = FortuneSession::new(1);
    let base_cost = session.catalogs().factories.types[1].base_cost;
    session.with_state_mut(|gs| {
        gs.factory_counts[1] = 4;
        gs.balance = factory_cost(base_cost, 4) - 1;
    });
    let before = session.state().clone();
    let result = session.buy_factory(1);
    assert!(result.outcome.is_none());
    assert_eq!(session.state(), &before);
}

#[test]
fn cost_curves_match_closed_forms() {
    for level in 0..30_u32 {
        let expected = (100.0_f64 * 1.5_f64.powi(i32::try_from(level).unwrap())).floor();
        assert_eq!(upgrade_cost(level), expected as i64, "level {level}");
    }
    for (base, owned) in [(25_i64, 0_u32), (25, 7), (150, 3), (750, 11)] {
        let expected = (base as f64 * 1.15_f64.powi(i32::try_from(owned).unwrap())).floor();
        assert_eq!(factory_cost(base, owned), expected as i64);
    }
}

#[test]
fn long_grind_never_underflows_balance() {
    // Hostile catalog path: force the negative-multiplier event every click.
    let mut session = FortuneSession::new(77);
    let sec_raid = session
        .catalogs()
        .fortunes
        .events
        .iter()
        .position(|event| event.multiplier.is_some_and(|m| m < 0.0))
        .expect("embedded catalog has a negative event");

    session.with_state_mut(|gs| gs.click_yield = 1_000.0);
    for _ in 0..100 {
        session.click_forced(degen_game::FortuneDraw::Event(sec_raid));
        assert!(session.state().balance >= 0);
    }
}
